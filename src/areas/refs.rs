//! HEAD reference
//!
//! `HEAD` holds the 40 hex characters of the most recent commit made with
//! the `commit` command, without a trailing newline. It does not exist
//! before the first commit.

use crate::artifacts::core::atomic_file;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, Result};
use derive_new::new;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the HEAD file (typically `.gt/HEAD`)
    head_path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> &Path {
        &self.head_path
    }

    /// Commit HEAD points to, if any
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        let content = match std::fs::read_to_string(&self.head_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_path(&*self.head_path),
        };

        match content.trim() {
            "" => Ok(None),
            oid => ObjectId::try_parse(oid).map(Some),
        }
    }

    /// Point HEAD at a commit
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        atomic_file::write_atomically(&self.head_path, oid.to_hex().as_bytes())?;
        debug!(%oid, "HEAD updated");

        Ok(())
    }
}
