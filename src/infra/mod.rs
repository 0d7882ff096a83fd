// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// The parts of a run that touch the outside world:
//
//   xelatex.rs — runs the LaTeX engine in a scoped temporary
//                directory and collects its PDF and log.
//                Implements the Renderer trait from Layer 3,
//                so nothing above this layer knows it is a
//                subprocess.
//
//   output.rs  — writes the finished files into the output
//                directory once every render has succeeded.

/// External typesetting engine
pub mod xelatex;

/// Output directory placement
pub mod output;
