//! Connection handle for the JSON document store: owns the base data
//! directory and hands out the per-collection paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Open (creating if needed) a data directory.
    pub fn new(base_directory: impl AsRef<Path>) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        fs::create_dir_all(&base_directory)?;
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn students_directory(&self) -> PathBuf {
        self.base_directory.join("students")
    }

    pub fn batches_directory(&self) -> PathBuf {
        self.base_directory.join("batches")
    }
}
