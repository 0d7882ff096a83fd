// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything that turns inputs into markup, with no external
// processes involved:
//
//   format_loader.rs — YAML format file → LayoutConfig
//   sequencer.rs     — content blocks → ordered label slots
//                      (skip, repeat, pad to a full sheet)
//   markup.rs        — LayoutConfig + slots → LaTeX document,
//                      plus the plain/grid sheet variants
//
// All three are pure apart from reading the streams they are
// handed, so they are tested directly with in-memory input.

/// Format file parsing and validation
pub mod format_loader;

/// Label slot sequencing
pub mod sequencer;

/// LaTeX document assembly
pub mod markup;
