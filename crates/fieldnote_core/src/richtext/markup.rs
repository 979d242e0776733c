//! Tolerant markup reader for stored notes.
//!
//! # Responsibility
//! - Rebuild a node tree from the markup saved in `Entry::notes`.
//!
//! # Invariants
//! - Never fails: stray closing tags are dropped and unclosed elements are
//!   closed at the end of input.
//! - Character references (named or numeric) are decoded, so serializing the
//!   tree and reading it again yields the same markup.

use super::node::{is_void_tag, Element, Node};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::RefCell;

const ROOT_TAG: &str = "#root";

/// Builds the tree while the tokenizer runs; the bottom of the stack is a
/// synthetic root holding the top-level nodes.
struct TreeSink {
    stack: RefCell<Vec<Element>>,
}

impl TokenSink for TreeSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut stack = self.stack.borrow_mut();
        match token {
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let mut element = Element::new(name);
                        for attr in &tag.attrs {
                            element.set_attr(attr.name.local.to_string(), attr.value.to_string());
                        }
                        if tag.self_closing || element.is_void() {
                            append(&mut stack, Node::Element(element));
                        } else {
                            stack.push(element);
                        }
                    }
                    TagKind::EndTag => close_element(&mut stack, &name),
                }
            }
            Token::CharacterTokens(text) => push_text(&mut stack, &text),
            // Comments, doctypes and parse errors carry no content.
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Parses markup into a node list.
pub fn parse_markup(markup: &str) -> Vec<Node> {
    let sink = TreeSink {
        stack: RefCell::new(vec![Element::new(ROOT_TAG)]),
    };
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let mut queue = BufferQueue::default();
    queue.push_back(StrTendril::from(markup));
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();

    let mut stack = tokenizer.sink.stack.into_inner();
    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }
    stack.pop().map(|root| root.children).unwrap_or_default()
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(Node::text(text)),
    }
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn close_element(stack: &mut Vec<Element>, tag: &str) {
    if is_void_tag(tag) {
        return;
    }
    let Some(depth) = stack.iter().skip(1).rposition(|open| open.tag == tag) else {
        return;
    };
    // `depth` is relative to the skipped root.
    while stack.len() > depth + 1 {
        pop_into_parent(stack);
    }
}

fn pop_into_parent(stack: &mut Vec<Element>) {
    if let Some(element) = stack.pop() {
        append(stack, Node::Element(element));
    }
}
