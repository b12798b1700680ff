//! Repository location
//!
//! Every path the store touches is derived from a single repository directory.
//! The binary resolves it from `GT_DIRECTORY` (falling back to `./.gt`) and
//! threads the resulting [`Config`] into the database, the index and the refs.

use std::path::{Path, PathBuf};

/// Environment variable naming the repository directory
pub const DIRECTORY_ENV: &str = "GT_DIRECTORY";

/// Repository directory used when `GT_DIRECTORY` is not set
pub const DEFAULT_DIRECTORY: &str = ".gt";

const OBJECTS_DIR: &str = "objects";
const INDEX_FILE: &str = "index";
const HEAD_FILE: &str = "HEAD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    directory: PathBuf,
}

impl Config {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Config {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn objects_path(&self) -> PathBuf {
        self.directory.join(OBJECTS_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.directory.join(INDEX_FILE)
    }

    pub fn head_path(&self) -> PathBuf {
        self.directory.join(HEAD_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTORY)
    }
}
