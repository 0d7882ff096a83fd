// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums, and traits describing a label sheet.
//
// Rules for this layer:
//   - NO YAML parsing here (that's Layer 4)
//   - NO subprocesses or temp directories (that's Layer 6)
//   - Only plain Rust types and the Renderer abstraction
//
// Keeping this layer free of I/O means the sequencer and the
// markup builder can be tested without a LaTeX installation.

// Validated layout parameters from the format file
pub mod layout;

// Content blocks and the label slots they expand into
pub mod label;

// Core abstractions (traits) that the infra layer implements
pub mod traits;
