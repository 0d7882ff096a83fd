// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to produce one set of label
// sheets.
//
// Rules for this layer:
//   - No YAML parsing or sequencing logic (that's Layer 4)
//   - No printing (that's Layer 1)
//   - No subprocess handling (that's Layer 6, behind a trait)
//   - Only workflow coordination

// The label sheet generation workflow
pub mod generate_use_case;
