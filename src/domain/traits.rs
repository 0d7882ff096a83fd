// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer never talks to xelatex directly. It
// hands markup to a Renderer and inspects the RenderOutput.
//
//   - XelatexRenderer (Layer 6) → runs the real engine
//   - test fakes                → return canned output
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::error::LabelError;

/// What a single render attempt produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// The rendered document bytes, if the engine wrote one
    pub document: Option<Vec<u8>>,

    /// The engine's own log file, if it wrote one
    pub log: Option<String>,

    /// Whether the engine exited successfully
    pub success: bool,
}

// ─── Renderer ─────────────────────────────────────────────────────────────────
/// Anything that can turn markup source into a finished document.
pub trait Renderer {
    /// Render `source` under `job_name` (the base name used for the
    /// engine's intermediate and output files).
    ///
    /// `Err` is reserved for failures to run the engine at all; an
    /// engine that ran and failed is reported through
    /// [`RenderOutput::success`].
    fn render(&self, job_name: &str, source: &str) -> Result<RenderOutput, LabelError>;
}
