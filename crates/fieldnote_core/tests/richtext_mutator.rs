use fieldnote_core::richtext::mutator::{
    NO_SELECTION_MESSAGE, OUTSIDE_SELECTION_MESSAGE, URL_PROMPT_MESSAGE,
};
use fieldnote_core::{
    begin_image_upload, intercept_click, ClickDisposition, EditingSurface, Element, Entry,
    EntryStore, FileBlob, Host, KeyDisposition, MemoryFileInput, MemoryStore, MemorySurface,
    Node, Outcome, Position, Range, RichTextMutator, Selection, SkipReason,
};

#[derive(Default)]
struct RecordingHost {
    alerts: Vec<String>,
    prompts: Vec<String>,
    reply: Option<String>,
    opened: Vec<String>,
}

impl RecordingHost {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }
}

impl Host for RecordingHost {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.reply.clone()
    }

    fn open_isolated(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}

/// Surface that records every formatting command it receives and accepts
/// all of them.
#[derive(Default)]
struct CommandLogSurface {
    inner: MemorySurface,
    commands: Vec<String>,
}

impl EditingSurface for CommandLogSurface {
    fn selection(&self) -> Option<Selection> {
        self.inner.selection()
    }

    fn contains(&self, selection: &Selection) -> bool {
        self.inner.contains(selection)
    }

    fn extract_range(&mut self, range: &Range) -> Option<(Vec<Node>, Position)> {
        self.inner.extract_range(range)
    }

    fn insert_node(&mut self, at: &Position, node: Node) -> Option<Position> {
        self.inner.insert_node(at, node)
    }

    fn collapse_selection_at(&mut self, at: Position) {
        self.inner.collapse_selection_at(at);
    }

    fn apply_format(&mut self, command: &str) -> bool {
        self.commands.push(command.to_string());
        true
    }

    fn markup(&self) -> String {
        self.inner.markup()
    }
}

fn mutator_selecting(markup: &str, needle: &str) -> RichTextMutator<MemorySurface> {
    let mut surface = MemorySurface::from_markup(markup);
    assert!(surface.select_text(needle), "`{needle}` not found");
    RichTextMutator::new(surface)
}

fn caret(mutator: &RichTextMutator<MemorySurface>) -> Range {
    mutator.surface().selection().expect("selection").range
}

#[test]
fn link_wraps_selected_text_and_places_caret_after_it() {
    let mut mutator = mutator_selecting("Saw a kingfisher today", "kingfisher");
    let mut host = RecordingHost::replying("https://example.com");

    let after = mutator.wrap_selection_in_link(&mut host).applied().unwrap();

    assert_eq!(host.prompts, vec![URL_PROMPT_MESSAGE.to_string()]);
    assert!(host.alerts.is_empty());
    assert_eq!(
        mutator.markup(),
        "Saw a <a href=\"https://example.com\" target=\"_blank\" \
         rel=\"noopener noreferrer\">kingfisher</a> today"
    );
    let link = mutator.surface().root().children[1].as_element().unwrap();
    assert_eq!(link.children[0].as_element(), None);
    assert_eq!(mutator.surface().root().children[1].text_content(), "kingfisher");

    let selection = caret(&mutator);
    assert!(selection.is_collapsed());
    assert_eq!(selection.start, Position::root(2));
    assert_eq!(after, Position::root(2));
}

#[test]
fn link_wrap_keeps_nested_formatting_inside_the_label() {
    let mut surface = MemorySurface::from_markup("a <b>bold</b> move");
    surface.select(Range::new(Position::new(vec![0], 0), Position::new(vec![2], 5)));
    let mut mutator = RichTextMutator::new(surface);
    let mut host = RecordingHost::default();

    mutator
        .wrap_selection_in_link_to(&mut host, "https://birds.example")
        .applied()
        .unwrap();
    assert_eq!(
        mutator.markup(),
        "<a href=\"https://birds.example\" target=\"_blank\" rel=\"noopener noreferrer\">\
         a <b>bold</b> move</a>"
    );
}

#[test]
fn link_wrap_without_highlight_alerts_and_does_not_prompt() {
    let mut surface = MemorySurface::from_markup("no highlight");
    surface.caret_at_end();
    let mut mutator = RichTextMutator::new(surface);
    let mut host = RecordingHost::replying("https://example.com");

    let outcome = mutator.wrap_selection_in_link(&mut host);

    assert_eq!(outcome, Outcome::Skipped(SkipReason::CollapsedSelection));
    assert_eq!(host.alerts, vec![NO_SELECTION_MESSAGE.to_string()]);
    assert!(host.prompts.is_empty());
    assert_eq!(mutator.markup(), "no highlight");
}

#[test]
fn link_wrap_outside_surface_alerts_with_location_message() {
    let mut surface = MemorySurface::from_markup("notes text");
    surface.set_selection(Some(Selection::outside(Range::new(
        Position::new(vec![0], 0),
        Position::new(vec![0], 5),
    ))));
    let mut mutator = RichTextMutator::new(surface);
    let mut host = RecordingHost::replying("https://example.com");

    let outcome = mutator.wrap_selection_in_link(&mut host);

    assert_eq!(outcome, Outcome::Skipped(SkipReason::OutsideSurface));
    assert_eq!(host.alerts, vec![OUTSIDE_SELECTION_MESSAGE.to_string()]);
    assert_eq!(mutator.markup(), "notes text");
}

#[test]
fn cancelled_or_blank_url_leaves_surface_untouched() {
    let mut mutator = mutator_selecting("keep me", "keep");

    let mut cancelled = RecordingHost::default();
    assert_eq!(
        mutator.wrap_selection_in_link(&mut cancelled),
        Outcome::Skipped(SkipReason::EmptyUrl)
    );
    let mut blank = RecordingHost::replying("   ");
    assert_eq!(
        mutator.wrap_selection_in_link(&mut blank),
        Outcome::Skipped(SkipReason::EmptyUrl)
    );

    assert_eq!(mutator.markup(), "keep me");
    assert!(cancelled.alerts.is_empty() && blank.alerts.is_empty());
}

#[test]
fn image_replaces_selected_text() {
    let mut mutator = mutator_selecting("before PLACEHOLDER after", "PLACEHOLDER");

    let after = mutator
        .insert_image_at_cursor("data:image/png;base64,AQID")
        .applied()
        .unwrap();

    assert_eq!(
        mutator.markup(),
        "before <img src=\"data:image/png;base64,AQID\" class=\"uploaded\"> after"
    );
    assert!(!mutator.markup().contains("PLACEHOLDER"));
    let selection = caret(&mutator);
    assert!(selection.is_collapsed());
    assert_eq!(selection.start, after);
    assert_eq!(after, Position::root(2));
}

#[test]
fn style_span_wraps_selection_and_collapses_after_it() {
    let mut mutator = mutator_selecting("tiny and huge", "huge");

    mutator.change_font_size("24px").applied().unwrap();
    assert_eq!(
        mutator.markup(),
        "tiny and <span style=\"font-size: 24px;\">huge</span>"
    );
    let selection = caret(&mutator);
    assert!(selection.is_collapsed());
    assert_eq!(selection.start, Position::root(2));

    assert!(mutator.surface_mut().select_text("tiny"));
    mutator.change_font_family("Georgia, serif").applied().unwrap();
    assert!(mutator
        .markup()
        .starts_with("<span style=\"font-family: Georgia, serif;\">tiny</span>"));
}

#[test]
fn style_span_accepts_any_single_property() {
    let mut mutator = mutator_selecting("red flag", "red");
    mutator
        .wrap_selection_in_style_span("color", "#b00")
        .applied()
        .unwrap();
    assert_eq!(mutator.markup(), "<span style=\"color: #b00;\">red</span> flag");
}

#[test]
fn collapsed_selection_skips_style_and_image_silently() {
    let mut surface = MemorySurface::from_markup("unchanged");
    surface.caret_at_end();
    let mut mutator = RichTextMutator::new(surface);

    assert_eq!(
        mutator.wrap_selection_in_style_span("font-size", "12px"),
        Outcome::Skipped(SkipReason::CollapsedSelection)
    );
    assert_eq!(
        mutator.insert_image_at_cursor("data:image/png;base64,AA=="),
        Outcome::Skipped(SkipReason::CollapsedSelection)
    );
    assert_eq!(mutator.markup(), "unchanged");
}

#[test]
fn missing_selection_is_reported_as_no_selection() {
    let mut mutator = RichTextMutator::new(MemorySurface::from_markup("text"));
    assert_eq!(
        mutator.change_font_size("12px"),
        Outcome::Skipped(SkipReason::NoSelection)
    );
}

#[test]
fn invalid_style_pair_is_skipped_without_mutation() {
    let mut mutator = mutator_selecting("plain", "plain");
    assert_eq!(
        mutator.wrap_selection_in_style_span("font-size", "12px; color: red"),
        Outcome::Skipped(SkipReason::InvalidStyle)
    );
    assert_eq!(mutator.markup(), "plain");
}

#[test]
fn enter_inserts_two_line_breaks_at_caret() {
    let mut surface = MemorySurface::from_markup("first line");
    surface.select(Range::caret(Position::new(vec![0], 5)));
    let mut mutator = RichTextMutator::new(surface);

    assert_eq!(mutator.handle_key("Enter"), KeyDisposition::Handled);
    assert_eq!(mutator.markup(), "first<br><br> line");
    assert_eq!(caret(&mutator), Range::caret(Position::root(3)));

    assert_eq!(mutator.handle_key("a"), KeyDisposition::PassThrough);
    assert_eq!(mutator.markup(), "first<br><br> line");
}

#[test]
fn enter_outside_the_surface_is_left_to_the_host() {
    let mut mutator = RichTextMutator::new(MemorySurface::from_markup("line"));
    assert_eq!(mutator.handle_key("Enter"), KeyDisposition::PassThrough);

    mutator
        .surface_mut()
        .set_selection(Some(Selection::outside(Range::caret(Position::root(0)))));
    assert_eq!(mutator.handle_key("Enter"), KeyDisposition::PassThrough);
    assert_eq!(mutator.markup(), "line");
}

#[test]
fn enter_replaces_highlighted_text() {
    let mut mutator = mutator_selecting("cut this out", " this");
    assert_eq!(mutator.handle_key("Enter"), KeyDisposition::Handled);
    assert_eq!(mutator.markup(), "cut<br><br> out");
}

#[test]
fn format_text_applies_known_toggle_on_memory_surface() {
    let mut mutator = mutator_selecting("calm water", "calm");
    assert!(mutator.format_text("italic").is_applied());
    assert_eq!(mutator.markup(), "<i>calm</i> water");
    assert_eq!(
        mutator.format_text("explode"),
        Outcome::Skipped(SkipReason::UnhandledCommand)
    );
    assert_eq!(mutator.markup(), "<i>calm</i> water");
}

#[test]
fn format_text_hands_any_command_name_to_the_surface() {
    let mut surface = CommandLogSurface::default();
    surface.inner.load_markup("list me");
    surface.inner.caret_at_end();
    let mut mutator = RichTextMutator::new(surface);

    assert_eq!(mutator.format_text("removeFormat"), Outcome::Applied(()));
    assert_eq!(mutator.format_text("insertOrderedList"), Outcome::Applied(()));
    assert_eq!(
        mutator.format_text("  "),
        Outcome::Skipped(SkipReason::UnhandledCommand)
    );
    assert_eq!(
        mutator.surface().commands,
        vec!["removeFormat".to_string(), "insertOrderedList".to_string()]
    );
}

#[test]
fn external_link_clicks_open_isolated_context() {
    let mut host = RecordingHost::default();
    let external = Element::new("a").with_attr("href", "https://example.com/map");
    let relative = Element::new("a").with_attr("href", "#top");
    let image = Element::new("img").with_attr("src", "https://example.com/x.png");

    assert_eq!(
        intercept_click(&mut host, &external),
        ClickDisposition::OpenedIsolated
    );
    assert_eq!(intercept_click(&mut host, &relative), ClickDisposition::PassThrough);
    assert_eq!(intercept_click(&mut host, &image), ClickDisposition::PassThrough);
    assert_eq!(host.opened, vec!["https://example.com/map".to_string()]);
}

#[test]
fn image_upload_lands_at_selection_current_when_decode_completes() {
    let mut mutator = mutator_selecting("alpha beta", "alpha");
    let mut input = MemoryFileInput::new();
    input.choose(FileBlob::new("owl.png", Some("image/png"), vec![1, 2, 3]));

    let pending = begin_image_upload(&mut input).expect("file chosen");
    // The user moves the selection before the decode finishes.
    assert!(mutator.surface_mut().select_text("beta"));
    pending.complete(&mut mutator).applied().unwrap();

    assert_eq!(
        mutator.markup(),
        "alpha <img src=\"data:image/png;base64,AQID\" class=\"uploaded\">"
    );
}

#[test]
fn saved_entry_captures_surface_markup_and_reloads_for_editing() {
    let mut mutator = mutator_selecting("Spotted an osprey", "osprey");
    let mut host = RecordingHost::replying("https://example.com/osprey");
    mutator.wrap_selection_in_link(&mut host).applied().unwrap();

    let mut notebook = EntryStore::load(MemoryStore::new());
    notebook.save(Entry::new("2024-08-10", "clear", "estuary", mutator.markup()));

    let stored = notebook.current().unwrap().notes.clone();
    let reloaded = MemorySurface::from_markup(&stored);
    assert_eq!(reloaded.markup(), stored);
    assert!(notebook
        .display()
        .as_markup()
        .contains("<a href=\"https://example.com/osprey\""));
}

#[test]
fn notes_with_named_references_survive_load_and_resave() {
    let surface = MemorySurface::from_markup("Fog &mdash; then sun by the caf&eacute;");
    assert_eq!(
        surface.root().children[0].text_content(),
        "Fog \u{2014} then sun by the caf\u{e9}"
    );

    let resaved = surface.markup();
    assert!(!resaved.contains("&amp;"));
    assert_eq!(MemorySurface::from_markup(&resaved).markup(), resaved);
}
