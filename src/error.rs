// ============================================================
// Crate Error Type
// ============================================================
// Every failure the label generator can raise. The application
// and CLI layers wrap these in anyhow with file context, so
// the variants here only carry what the lower layers know.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    /// Invalid or incomplete format file
    #[error("{0}")]
    Configuration(String),

    /// A content file could not be read
    #[error("cannot read label content from '{name}': {source}")]
    Content {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The typesetting engine ran but did not produce a document
    #[error("Latex process ended with error:\n{0}")]
    Render(String),

    /// The typesetting engine could not be started at all
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("format file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LabelError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
