// ============================================================
// Layer 3 — Label Content Types
// ============================================================
// A ContentBlock is one `--labels <count> <file>` pair from
// the command line: "print this text on <count> labels".
//
// A LabelSlot is one position on the sheet. It is either left
// empty or filled with the trimmed text of a block. Every
// repetition of a block points at the same shared string, so
// 500 copies of one address cost a single allocation.

use std::{fmt, io::Read, rc::Rc};

use crate::error::LabelError;

/// Placeholder the labels package renders as an empty label
pub const BLANK_MARKER: &str = "\\quad";

/// One position on a label sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSlot {
    /// Left empty (skipped at the start or padded at the end)
    Blank,
    /// Filled with already-trimmed content
    Content(Rc<str>),
}

impl LabelSlot {
    pub fn content(text: &str) -> Self {
        Self::Content(Rc::from(text))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// The markup emitted for this slot
    pub fn as_markup(&self) -> &str {
        match self {
            Self::Blank         => BLANK_MARKER,
            Self::Content(text) => text,
        }
    }
}

impl fmt::Display for LabelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_markup())
    }
}

/// A repeat count paired with a text source.
///
/// The source is read exactly once, by [`ContentBlock::read_text`],
/// which consumes the block.
pub struct ContentBlock {
    repeat_count: usize,
    /// Where the text came from, for error messages
    name:         String,
    source:       Box<dyn Read>,
}

impl ContentBlock {
    pub fn new(repeat_count: usize, name: impl Into<String>, source: impl Read + 'static) -> Self {
        Self {
            repeat_count,
            name:   name.into(),
            source: Box::new(source),
        }
    }

    /// Build a block from in-memory text.
    pub fn from_text(repeat_count: usize, text: impl Into<String>) -> Self {
        let bytes = text.into().into_bytes();
        Self::new(repeat_count, "<inline>", std::io::Cursor::new(bytes))
    }

    pub fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the whole source and strip surrounding whitespace.
    pub fn read_text(mut self) -> Result<String, LabelError> {
        let mut text = String::new();
        self.source
            .read_to_string(&mut text)
            .map_err(|source| LabelError::Content { name: self.name.clone(), source })?;

        Ok(text.trim().to_string())
    }
}

// Box<dyn Read> has no Debug, so print everything else
impl fmt::Debug for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentBlock")
            .field("repeat_count", &self.repeat_count)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
