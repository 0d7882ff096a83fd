// ============================================================
// Layer 6 — Output Directory
// ============================================================
// Writes the finished artifacts of a run into the destination
// directory:
//
//   <output_dir>/
//     labels.tex   ← source of the plain sheet
//     labels.pdf   ← the sheet to print
//     grid.pdf     ← same sheet with cut lines
//
// Nothing is written until every artifact is ready, so a
// failed render never leaves half a run on disk. The directory
// itself is only created at that point too.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

/// One file to place in the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes:     Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }
}

/// Destination for the files of one run.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    dir: PathBuf,
}

impl OutputDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if needed and write every artifact,
    /// replacing files left by an earlier run.
    /// Returns the paths written, in order.
    pub fn place(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
        // create_dir_all is a no-op when the directory exists
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))?;

        let mut written = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            let path = self.dir.join(&artifact.file_name);
            fs::write(&path, &artifact.bytes)
                .with_context(|| format!("Cannot write '{}'", path.display()))?;

            tracing::debug!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
            written.push(path);
        }

        Ok(written)
    }
}
