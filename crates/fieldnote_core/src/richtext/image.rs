//! Image upload: file selection, decoding and insertion.
//!
//! # Responsibility
//! - Take the selected file from a file input and reset the input.
//! - Decode the file into a `data:` URI the surface can display.
//!
//! # Invariants
//! - The insertion point is not captured when the file is chosen; the image
//!   lands wherever the selection is when the pending decode completes.

use super::mutator::RichTextMutator;
use super::range::Position;
use super::surface::EditingSurface;
use crate::guard::Outcome;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::debug;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Opaque file handed over by the host file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    /// MIME type reported by the host, if any.
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            bytes,
        }
    }
}

/// File-selection surface yielding zero or one file.
pub trait FileInput {
    fn selected(&self) -> Option<FileBlob>;
    /// Clears the selection so the same file can be chosen again.
    fn reset(&mut self);
}

/// File input driven directly by tests or a non-graphical host.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileInput {
    selected: Option<FileBlob>,
}

impl MemoryFileInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(&mut self, blob: FileBlob) {
        self.selected = Some(blob);
    }
}

impl FileInput for MemoryFileInput {
    fn selected(&self) -> Option<FileBlob> {
        self.selected.clone()
    }

    fn reset(&mut self) {
        self.selected = None;
    }
}

/// Decode in flight for one chosen file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PendingImage {
    blob: FileBlob,
}

impl PendingImage {
    pub fn file_name(&self) -> &str {
        &self.blob.name
    }

    /// Encodes the file as a `data:<mime>;base64,` URI.
    pub fn decode(&self) -> String {
        let mime = self
            .blob
            .mime_type
            .as_deref()
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(FALLBACK_MIME_TYPE);
        format!("data:{mime};base64,{}", BASE64.encode(&self.blob.bytes))
    }

    /// Finishes the upload against the selection current at this moment.
    pub fn complete<S: EditingSurface>(self, mutator: &mut RichTextMutator<S>) -> Outcome<Position> {
        let source = self.decode();
        debug!(
            "event=image_decode module=richtext status=ok bytes={}",
            self.blob.bytes.len()
        );
        mutator.insert_image_at_cursor(&source)
    }
}

/// Starts an upload from `input`. Returns `None` when no file is selected.
pub fn begin_image_upload(input: &mut impl FileInput) -> Option<PendingImage> {
    let blob = input.selected()?;
    input.reset();
    Some(PendingImage { blob })
}
