// ============================================================
// Layer 1 — Command Arguments
// ============================================================
// The single `generate-labels` command and its flags:
//
//   generate-labels FORMAT_FILE
//       --labels COUNT FILE      (repeatable, at least once)
//       [--skip N]               (default 0)
//       [--output_dir DIR]       (default: today's date)
//       [--print-latex]
//       [--engine PROGRAM]       (default: xelatex)
//
// clap collects every `--labels` pair into one flat list of
// values; into_config() splits it back into (count, file) pairs.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{ArgAction, Args};
use std::path::PathBuf;

use crate::application::generate_use_case::{GenerateConfig, LabelSpec};
use crate::infra::xelatex::DEFAULT_ENGINE;

/// All arguments of the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML file with the `generator` and `format` sections
    pub format_file: PathBuf,

    /// Number of labels and the file holding their text.
    /// Repeat for several different labels, in print order.
    #[arg(
        long,
        num_args = 2,
        value_names = ["COUNT", "FILE"],
        action = ArgAction::Append,
        required = true
    )]
    pub labels: Vec<String>,

    /// Number of labels to leave blank at the start of the first sheet
    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Output directory for the PDF files [default: current date, YYYY-MM-DD]
    #[arg(long = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Print the generated LaTeX code to the terminal
    #[arg(long = "print-latex")]
    pub print_latex: bool,

    /// LaTeX engine used to render the sheets
    #[arg(long, default_value = DEFAULT_ENGINE)]
    pub engine: String,
}

/// Directory name used when `--output_dir` is not given
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(Local::now().format("%Y-%m-%d").to_string())
}

impl GenerateArgs {
    /// Convert CLI args into the application-layer GenerateConfig.
    /// The application layer never sees clap types, and never
    /// decides the default output directory itself.
    pub fn into_config(self, default_dir: PathBuf) -> Result<GenerateConfig> {
        let labels = parse_label_pairs(&self.labels)?;

        Ok(GenerateConfig {
            format_file: self.format_file,
            labels,
            skip:        self.skip,
            output_dir:  self.output_dir.unwrap_or(default_dir),
            engine:      self.engine,
        })
    }
}

/// Split the flat `--labels` values into (count, file) pairs
fn parse_label_pairs(values: &[String]) -> Result<Vec<LabelSpec>> {
    // clap enforces two values per occurrence
    if values.len() % 2 != 0 {
        bail!("--labels expects a COUNT and a FILE");
    }

    values
        .chunks(2)
        .map(|pair| {
            let count = pair[0].trim().parse::<usize>().with_context(|| {
                format!("Invalid label count '{}' for '{}'", pair[0], pair[1])
            })?;
            Ok(LabelSpec { count, file: PathBuf::from(&pair[1]) })
        })
        .collect()
}
