// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and hands the work to the
// application layer. This is the only layer that prints to
// stdout; logging goes to stderr through tracing.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{default_output_dir, GenerateArgs};

use crate::application::generate_use_case::GenerateUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "generate-labels",
    version,
    about = "Typeset a sheet of address or product labels with LaTeX."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: GenerateArgs,
}

impl Cli {
    /// Build the markup, optionally echo it, then render and place
    /// the sheets.
    pub fn run(self) -> Result<()> {
        let print_latex = self.args.print_latex;
        let config      = self.args.into_config(default_output_dir())?;
        let output_dir  = config.output_dir.clone();

        let use_case = GenerateUseCase::new(config);
        let markup   = use_case.build_markup()?;

        if print_latex {
            println!("{markup}");
        }

        use_case.render(&markup)?;

        println!("Label sheets written to '{}'.", output_dir.display());
        Ok(())
    }
}
