// ============================================================
// Layer 3 — Layout Configuration
// ============================================================
// The typed, read-only view of a format file:
//
//   generator:
//     label_count: 24        ← labels per sheet (required)
//     font_size: 12pt        ← optional, defaults to 14pt
//   format:
//     LabelCols: 3           ← becomes \LabelCols=3
//     numberoflabels: ~      ← becomes \numberoflabels
//
// Construction and validation live in data::format_loader;
// by the time a LayoutConfig exists it is known to be valid.

use std::num::NonZeroUsize;

/// Font size used when the generator section does not set one
pub const DEFAULT_FONT_SIZE: &str = "14pt";

/// One layout instruction handed to the labels package as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Macro name without the leading backslash
    pub name: String,

    /// `None` renders a bare flag, `Some` renders an assignment
    pub value: Option<String>,
}

impl Directive {
    pub fn flag(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: None }
    }

    pub fn assign(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }

    /// Render as a single markup line: `\name` or `\name=value`
    pub fn to_markup(&self) -> String {
        match &self.value {
            None        => format!("\\{}", self.name),
            Some(value) => format!("\\{}={}", self.name, value),
        }
    }
}

/// Layout parameters for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    label_count: NonZeroUsize,
    font_size:   Option<String>,
    directives:  Vec<Directive>,
}

impl LayoutConfig {
    pub fn new(
        label_count: NonZeroUsize,
        font_size:   Option<String>,
        directives:  Vec<Directive>,
    ) -> Self {
        Self { label_count, font_size, directives }
    }

    /// Number of label slots on one physical sheet
    pub fn label_count(&self) -> usize {
        self.label_count.get()
    }

    /// Configured font size, or [`DEFAULT_FONT_SIZE`]
    pub fn font_size(&self) -> &str {
        self.font_size.as_deref().unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// All directives, one per line, in format-file order.
    pub fn format_directives(&self) -> String {
        self.directives
            .iter()
            .map(Directive::to_markup)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
