// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Produces the label sheets for one run, in order:
//
//   Step 1: Load and validate the format file    (Layer 4 - data)
//   Step 2: Open every content file              (Layer 2)
//   Step 3: Sequence skip/content/padding slots  (Layer 4 - data)
//   Step 4: Build the plain LaTeX document       (Layer 4 - data)
//   Step 5: Render the plain and grid variants   (Layer 6 - infra)
//   Step 6: Write the results to the output dir  (Layer 6 - infra)
//
// Steps 1-4 are `build_markup`, steps 5-6 are `render`. The CLI
// calls them separately so it can print the markup in between.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
};

use crate::data::{
    format_loader::load_layout,
    markup::{build_document, SheetVariant},
    sequencer::generate_content,
};
use crate::domain::{label::ContentBlock, traits::Renderer};
use crate::error::LabelError;
use crate::infra::{
    output::{Artifact, OutputDirectory},
    xelatex::XelatexRenderer,
};

/// Reported when the engine fails without leaving a log behind
pub const NO_LOG_MESSAGE: &str = "the renderer failed and produced no log file";

/// One `--labels <count> <file>` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    pub count: usize,
    pub file:  PathBuf,
}

/// Everything a run needs, already resolved by the CLI layer.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// YAML format file with `generator` and `format` sections
    pub format_file: PathBuf,

    /// Content files with their repeat counts, in print order
    pub labels: Vec<LabelSpec>,

    /// Blank slots to leave at the start of the first sheet
    pub skip: usize,

    /// Where the .tex and .pdf files end up
    pub output_dir: PathBuf,

    /// LaTeX engine to invoke
    pub engine: String,
}

pub struct GenerateUseCase<R> {
    config:   GenerateConfig,
    renderer: R,
}

impl GenerateUseCase<XelatexRenderer> {
    /// Use case backed by the configured LaTeX engine
    pub fn new(config: GenerateConfig) -> Self {
        let renderer = XelatexRenderer::new(config.engine.clone());
        Self { config, renderer }
    }
}

impl<R: Renderer> GenerateUseCase<R> {
    pub fn with_renderer(config: GenerateConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Steps 1-4: produce the plain-sheet LaTeX source.
    pub fn build_markup(&self) -> Result<String> {
        // ── Step 1: Format file ───────────────────────────────────────
        let format_path = &self.config.format_file;
        let format_file = File::open(format_path)
            .with_context(|| format!("Cannot open format file '{}'", format_path.display()))?;

        let layout = load_layout(BufReader::new(format_file))?;
        tracing::info!(
            "Format '{}': {} labels per sheet",
            format_path.display(),
            layout.label_count()
        );

        // ── Step 2: Content files ─────────────────────────────────────
        // Opened up front so a missing file stops the run before
        // anything is rendered; the sequencer reads them later.
        let blocks = self
            .config
            .labels
            .iter()
            .map(|spec| {
                let file = File::open(&spec.file).with_context(|| {
                    format!("Cannot open label file '{}'", spec.file.display())
                })?;
                Ok(ContentBlock::new(spec.count, spec.file.display().to_string(), BufReader::new(file)))
            })
            .collect::<Result<Vec<_>>>()?;

        // ── Steps 3-4: Sequence and assemble ──────────────────────────
        let requested: usize = self.config.labels.iter().map(|spec| spec.count).sum();
        tracing::info!(
            "Sequencing {} labels from {} file(s), skipping {}",
            requested,
            blocks.len(),
            self.config.skip
        );

        let slots  = generate_content(self.config.skip, layout.label_count(), blocks)?;
        let markup = build_document(&layout, slots)?;

        Ok(markup)
    }

    /// Steps 5-6: render both sheet variants and place the results.
    ///
    /// Both variants must render before anything is written, so a
    /// failure leaves the output directory untouched.
    pub fn render(&self, markup: &str) -> Result<Vec<PathBuf>> {
        let mut artifacts = Vec::new();

        // ── Step 5: Render ────────────────────────────────────────────
        for variant in SheetVariant::ALL {
            let job    = variant.job_name();
            let source = variant.apply(markup);
            let output = self.renderer.render(job, &source)?;

            if !output.success {
                let detail = output.log.unwrap_or_else(|| NO_LOG_MESSAGE.to_string());
                return Err(LabelError::Render(detail).into());
            }

            let document = output.document.ok_or_else(|| {
                LabelError::Render(format!("{job}.tex rendered without producing {job}.pdf"))
            })?;

            artifacts.push(Artifact::new(format!("{job}.pdf"), document));
            if variant.keeps_source() {
                artifacts.push(Artifact::new(format!("{job}.tex"), source));
            }
        }

        // ── Step 6: Place ─────────────────────────────────────────────
        let output_dir = OutputDirectory::new(&self.config.output_dir);
        let written    = output_dir.place(&artifacts)?;

        tracing::info!(
            "Wrote {} files to '{}'",
            written.len(),
            output_dir.path().display()
        );
        Ok(written)
    }

    /// Run the whole workflow.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let markup = self.build_markup()?;
        self.render(&markup)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::RenderOutput;
    use std::{cell::RefCell, fs, path::Path};
    use tempfile::TempDir;

    const FORMAT: &str = "generator:\n  label_count: 3\nformat:\n  LabelCols: 3\n  numberoflabels:\n";

    /// Records every job and succeeds unless told to fail one
    #[derive(Default)]
    struct FakeRenderer {
        fail_job: Option<&'static str>,
        fail_log: Option<String>,
        jobs:     RefCell<Vec<(String, String)>>,
    }

    impl Renderer for FakeRenderer {
        fn render(&self, job_name: &str, source: &str) -> Result<RenderOutput, LabelError> {
            self.jobs.borrow_mut().push((job_name.to_string(), source.to_string()));

            if self.fail_job == Some(job_name) {
                return Ok(RenderOutput { document: None, log: self.fail_log.clone(), success: false });
            }
            Ok(RenderOutput {
                document: Some(format!("PDF:{job_name}").into_bytes()),
                log:      Some("ok".into()),
                success:  true,
            })
        }
    }

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn config(dir: &TempDir, format: &str, skip: usize) -> GenerateConfig {
        GenerateConfig {
            format_file: write(dir.path(), "format.yaml", format),
            labels: vec![
                LabelSpec { count: 1, file: write(dir.path(), "a.txt", "Alice\n") },
                LabelSpec { count: 2, file: write(dir.path(), "b.txt", "  Bob  ") },
            ],
            skip,
            output_dir: dir.path().join("out"),
            engine: "xelatex".into(),
        }
    }

    #[test]
    fn test_markup_contains_sequenced_labels() {
        let dir    = tempfile::tempdir().unwrap();
        let uc     = GenerateUseCase::with_renderer(config(&dir, FORMAT, 2), FakeRenderer::default());
        let markup = uc.build_markup().unwrap();

        assert!(markup.contains("\\LabelCols=3\n\\numberoflabels\n"));
        assert!(markup.contains(
            "\\begin{labels}\n\n\\quad\n\n\\quad\n\nAlice\n\nBob\n\nBob\n\n\\quad\n\n\\end{labels}\n"
        ));
    }

    #[test]
    fn test_execute_writes_both_variants() {
        let dir      = tempfile::tempdir().unwrap();
        let renderer = FakeRenderer::default();
        let uc       = GenerateUseCase::with_renderer(config(&dir, FORMAT, 0), renderer);

        let written = uc.execute().unwrap();
        let out     = dir.path().join("out");

        assert_eq!(written.len(), 3);
        assert_eq!(fs::read_to_string(out.join("labels.pdf")).unwrap(), "PDF:labels");
        assert_eq!(fs::read_to_string(out.join("grid.pdf")).unwrap(), "PDF:grid");
        assert!(!out.join("grid.tex").exists());

        let jobs = uc.renderer.jobs.borrow();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].0, "labels");
        assert_eq!(jobs[1].0, "grid");
        assert!(jobs[0].1.contains("%\\LabelGridtrue"));
        assert!(!jobs[1].1.contains("%\\LabelGridtrue"));
        assert_eq!(fs::read_to_string(out.join("labels.tex")).unwrap(), jobs[0].1);
    }

    #[test]
    fn test_render_failure_surfaces_log_and_writes_nothing() {
        let dir      = tempfile::tempdir().unwrap();
        let renderer = FakeRenderer {
            fail_job: Some("grid"),
            fail_log: Some("! LaTeX Error: File `labels.sty' not found.".into()),
            ..Default::default()
        };
        let uc  = GenerateUseCase::with_renderer(config(&dir, FORMAT, 0), renderer);
        let err = uc.execute().unwrap_err();

        assert!(err.to_string().contains("File `labels.sty' not found."));
        assert!(matches!(err.downcast_ref::<LabelError>(), Some(LabelError::Render(_))));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_render_failure_without_log_uses_fallback() {
        let dir      = tempfile::tempdir().unwrap();
        let renderer = FakeRenderer { fail_job: Some("labels"), ..Default::default() };
        let uc       = GenerateUseCase::with_renderer(config(&dir, FORMAT, 0), renderer);

        let err = uc.execute().unwrap_err();
        assert!(err.to_string().contains(NO_LOG_MESSAGE));
        // Grid never attempted after the plain sheet failed
        assert_eq!(uc.renderer.jobs.borrow().len(), 1);
    }

    #[test]
    fn test_configuration_error_stops_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let uc  = GenerateUseCase::with_renderer(
            config(&dir, "generator:\n  label_count: 0\nformat:\n", 0),
            FakeRenderer::default(),
        );

        let err = uc.execute().unwrap_err();
        assert!(matches!(err.downcast_ref::<LabelError>(), Some(LabelError::Configuration(_))));
        assert!(uc.renderer.jobs.borrow().is_empty());
    }

    #[test]
    fn test_missing_label_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(&dir, FORMAT, 0);
        cfg.labels.push(LabelSpec { count: 1, file: dir.path().join("missing.txt") });

        let uc  = GenerateUseCase::with_renderer(cfg, FakeRenderer::default());
        let err = uc.execute().unwrap_err();

        assert!(err.to_string().contains("missing.txt"));
        assert!(uc.renderer.jobs.borrow().is_empty());
    }
}
