// ============================================================
// Layer 6 — XeLaTeX Renderer
// ============================================================
// Runs the external typesetting engine on one markup document.
//
// Per render:
//   1. Create a fresh temporary directory
//   2. Write <job>.tex into it
//   3. Run `xelatex <job>.tex` there with an empty stdin, so
//      the engine cannot stop and wait for interactive input
//   4. Collect <job>.pdf (on success) and <job>.log (if any)
//
// The TempDir guard removes the directory when it goes out of
// scope, on the error paths as well as the normal one.
//
// There is no timeout: a hung engine blocks the run.

use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
};

use tempfile::TempDir;

use crate::domain::traits::{RenderOutput, Renderer};
use crate::error::LabelError;

/// Engine used when none is given on the command line
pub const DEFAULT_ENGINE: &str = "xelatex";

/// Renders markup by shelling out to a LaTeX engine.
#[derive(Debug, Clone)]
pub struct XelatexRenderer {
    /// Program name or path of the engine
    program: String,
}

impl XelatexRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for XelatexRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl Renderer for XelatexRenderer {
    fn render(&self, job_name: &str, source: &str) -> Result<RenderOutput, LabelError> {
        let workdir  = TempDir::new()?;
        let tex_name = format!("{job_name}.tex");

        fs::write(workdir.path().join(&tex_name), source)?;

        tracing::info!("Running {} on {}", self.program, tex_name);

        // output() waits for the process and captures both streams
        let output = Command::new(&self.program)
            .arg(&tex_name)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LabelError::Spawn { program: self.program.clone(), source })?;

        let log = read_optional_text(&workdir.path().join(format!("{job_name}.log")))?;

        if !output.status.success() {
            tracing::warn!("{} exited with {}", self.program, output.status);
            return Ok(RenderOutput { document: None, log, success: false });
        }

        let pdf_path = workdir.path().join(format!("{job_name}.pdf"));
        let document = if pdf_path.is_file() {
            Some(fs::read(&pdf_path)?)
        } else {
            None
        };

        tracing::debug!(
            "{} finished: document={}, log={}",
            self.program,
            document.as_ref().map_or(0, Vec::len),
            log.as_ref().map_or(0, String::len),
        );

        Ok(RenderOutput { document, log, success: true })
        // workdir dropped here → temporary directory removed
    }
}

/// Read a text file the engine may or may not have written.
/// The log is not guaranteed to be UTF-8, so decode lossily.
fn read_optional_text(path: &Path) -> Result<Option<String>, LabelError> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_is_xelatex() {
        assert_eq!(XelatexRenderer::default().program(), "xelatex");
    }

    #[test]
    fn test_missing_engine_is_spawn_error() {
        let renderer = XelatexRenderer::new("definitely-not-a-latex-engine-1f3a");
        let err      = renderer.render("labels", "\\relax").unwrap_err();

        assert!(matches!(err, LabelError::Spawn { ref program, .. } if program.starts_with("definitely")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_engine_reports_no_success() {
        // `false` ignores its arguments and exits 1 without writing a log
        let out = XelatexRenderer::new("false").render("labels", "\\relax").unwrap();

        assert!(!out.success);
        assert_eq!(out.document, None);
        assert_eq!(out.log, None);
    }

    #[test]
    fn test_read_optional_text() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("labels.log");

        assert_eq!(read_optional_text(&log).unwrap(), None);

        fs::write(&log, b"! Undefined control sequence.\n").unwrap();
        assert_eq!(
            read_optional_text(&log).unwrap().as_deref(),
            Some("! Undefined control sequence.\n")
        );
    }
}
