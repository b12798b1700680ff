//! Object database
//!
//! Content-addressable storage for blobs, trees and commits. Every object is
//! framed as `<type> <size>\0<payload>`, deflated, and stored under the SHA-1
//! of the **compressed** bytes at `objects/<2 hex>/<38 hex>`.
//!
//! Object files are created exclusively and never rewritten: two writers of
//! the same content produce the same bytes, so finding the file already in
//! place counts as success.

use crate::areas::index::Index;
use crate::artifacts::core::compression::{self, Inflater};
use crate::artifacts::core::mapped_file::MappedFile;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::{self, Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::debug;

/// Permissions of stored object files
const OBJECT_FILE_MODE: u32 = 0o444;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Fail with `RepositoryNotInitialized` unless the objects directory exists
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.path.is_dir() {
            Ok(())
        } else {
            Err(Error::RepositoryNotInitialized(self.path.to_path_buf()))
        }
    }

    /// Store an object and return its ID
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.write(object.object_type(), &object.serialize()?, true)
    }

    /// Compute an object's ID without storing it
    pub fn hash(&self, object: &impl Object) -> Result<ObjectId> {
        self.write(object.object_type(), &object.serialize()?, false)
    }

    /// Frame, compress and digest a payload, persisting it when asked to
    pub fn write(&self, object_type: ObjectType, payload: &[u8], persist: bool) -> Result<ObjectId> {
        let framed = object::frame(object_type, payload);
        let compressed = compression::compress(&framed)?;
        let oid = ObjectId::digest(&compressed);

        if persist {
            self.ensure_initialized()?;
            self.write_object(&oid, &compressed)?;
        }

        Ok(oid)
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).is_file()
    }

    /// Load an object's type and payload
    pub fn read(&self, oid: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(oid.to_path());

        let mapped = match MappedFile::open(&object_path) {
            Ok(mapped) => mapped,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(oid.clone()));
            }
            Err(e) => return Err(Error::Io { path: object_path, source: e }),
        };

        let mut inflater = Inflater::new(&mapped);
        let header = inflater
            .read_header()
            .map_err(|e| Error::corrupt_object(oid, e.to_string()))?
            .ok_or_else(|| Error::corrupt_object(oid, "unparsable object header"))?;

        let payload = inflater
            .read_exact_len(header.size)
            .and_then(|payload| inflater.finish().map(|_| payload))
            .map_err(|_| {
                Error::corrupt_object(
                    oid,
                    format!("payload does not match declared length {}", header.size),
                )
            })?;

        Ok((header.object_type, payload))
    }

    /// Load and parse an object
    pub fn parse_object(&self, oid: &ObjectId) -> Result<ObjectBox> {
        let (object_type, payload) = self.read(oid)?;
        ObjectBox::parse(object_type, &payload).map_err(|e| Error::corrupt_object(oid, e.to_string()))
    }

    /// Write the index as a flat tree object
    pub fn build_tree(&self, index: &Index) -> Result<ObjectId> {
        let tree = Tree::build(index.entries());
        let oid = self.store(&tree)?;
        debug!(%oid, entries = tree.len(), "tree written");

        Ok(oid)
    }

    /// Write a commit object
    ///
    /// Neither the tree nor the parents are checked for existence.
    pub fn build_commit(
        &self,
        tree_oid: ObjectId,
        parents: Vec<ObjectId>,
        author: Author,
        committer: Author,
        message: Bytes,
    ) -> Result<ObjectId> {
        let commit = Commit::new(tree_oid, parents, author, committer, message)?;
        let oid = self.store(&commit)?;
        debug!(%oid, parents = commit.parents().len(), "commit written");

        Ok(oid)
    }

    fn write_object(&self, oid: &ObjectId, compressed: &[u8]) -> Result<()> {
        let object_path = self.path.join(oid.to_path());

        let mut file = match Self::create_exclusive(&object_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(%oid, "object already stored");
                return Ok(());
            }
            // first object in this shard: create the directory and retry once
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(shard) = object_path.parent() {
                    std::fs::create_dir_all(shard).with_path(shard)?;
                    debug!(shard = %shard.display(), "shard directory created");
                }
                match Self::create_exclusive(&object_path) {
                    Ok(file) => file,
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
                    Err(e) => return Err(e).with_path(&object_path),
                }
            }
            Err(e) => return Err(e).with_path(&object_path),
        };

        if let Err(e) = file.write_all(compressed) {
            // never leave a truncated object behind under its final name
            let _ = std::fs::remove_file(&object_path);
            return Err(e).with_path(&object_path);
        }
        debug!(%oid, bytes = compressed.len(), "object stored");

        Ok(())
    }

    fn create_exclusive(path: &Path) -> std::io::Result<std::fs::File> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(OBJECT_FILE_MODE)
            .open(path)
    }
}
