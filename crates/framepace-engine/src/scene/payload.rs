use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Location of the binary payload an engine loads during `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    path: PathBuf,
}

impl Payload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole payload into memory.
    pub fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path)
            .with_context(|| format!("failed to read engine payload {}", self.path.display()))
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new("assets/scene.wgsl")
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
