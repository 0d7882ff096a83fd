// ============================================================
// Layer 4 — LaTeX Markup Builder
// ============================================================
// Turns a LayoutConfig plus a label sequence into a complete
// LaTeX document for the `labels` package:
//
//   preamble   — extarticle at the configured font size, the
//                labels/fontspec packages, the [format]
//                directives, and a commented-out grid switch
//   body       — one paragraph per label slot
//   footer     — closes the labels environment and document
//
// Two sheets are rendered from the same markup. The grid
// variant only differs by uncommenting `\LabelGridtrue`, which
// makes the labels package draw the cut lines, for
// checking alignment against a real sheet of label stock.

use std::fmt::Write as _;

use crate::domain::label::LabelSlot;
use crate::domain::layout::LayoutConfig;
use crate::error::LabelError;

const GRID_OFF: &str = "%\\LabelGridtrue";
const GRID_ON:  &str = "\\LabelGridtrue";

/// Which of the two sheets is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetVariant {
    /// The sheet to print
    Plain,
    /// Same labels with the cut grid drawn
    Grid,
}

impl SheetVariant {
    /// Render order: plain first, then grid
    pub const ALL: [SheetVariant; 2] = [SheetVariant::Plain, SheetVariant::Grid];

    /// Base name of the .tex/.pdf/.log files for this variant
    pub fn job_name(self) -> &'static str {
        match self {
            SheetVariant::Plain => "labels",
            SheetVariant::Grid  => "grid",
        }
    }

    /// Only the plain sheet's source is kept next to the PDFs
    pub fn keeps_source(self) -> bool {
        matches!(self, SheetVariant::Plain)
    }

    /// Markup for this variant, derived from the plain markup.
    pub fn apply(self, markup: &str) -> String {
        match self {
            SheetVariant::Plain => markup.to_string(),
            // Only the preamble switch, never label text
            SheetVariant::Grid  => markup.replacen(GRID_OFF, GRID_ON, 1),
        }
    }
}

/// The fixed preamble, filled with the layout's font size and directives.
pub fn preamble(layout: &LayoutConfig) -> String {
    format!(
        r"\documentclass[a4paper,{font_size}]{{extarticle}}
\usepackage[utf8]{{inputenc}}
\usepackage[newdimens]{{labels}}
\usepackage{{graphicx}}

\usepackage{{fontspec}}
\setmainfont{{Helvetica}}

{label_params}

\LabelInfotrue
{GRID_OFF}

\begin{{document}}
\begin{{labels}}
",
        font_size    = layout.font_size(),
        label_params = layout.format_directives(),
    )
}

/// Assemble the plain-sheet document from a label sequence.
///
/// Consumes the sequence; the first read error aborts the build.
pub fn build_document<S>(layout: &LayoutConfig, slots: S) -> Result<String, LabelError>
where
    S: IntoIterator<Item = Result<LabelSlot, LabelError>>,
{
    let mut doc = preamble(layout);
    doc.push('\n');

    let mut count = 0usize;
    for slot in slots {
        // Writing to a String cannot fail
        let _ = write!(doc, "{}\n\n", slot?);
        count += 1;
    }

    doc.push_str("\\end{labels}\n");
    doc.push_str("\\end{document}\n");

    tracing::debug!("Built markup with {} label slots ({} bytes)", count, doc.len());
    Ok(doc)
}
