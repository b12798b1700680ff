//! Tree object
//!
//! A tree is the flat listing of the index at the time it was written: one
//! entry per tracked path, in the index's ascending path order. Paths keep
//! their `/` separators; there are no nested trees.
//!
//! ## Format
//!
//! On disk (before compression): `tree <size>\0<entries>`
//! Each entry: `<octal-mode> <path>\0<20-byte-sha1>`

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::ffi::OsStr;
use std::io::BufRead;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: PathBuf,
    pub oid: ObjectId,
}

impl From<&IndexEntry> for TreeEntry {
    fn from(entry: &IndexEntry) -> Self {
        TreeEntry::new(entry.metadata.mode, entry.name.clone(), entry.oid.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from index entries
    ///
    /// The entries are taken in the order given; the index already keeps them
    /// in ascending byte-wise path order.
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Self {
        Tree {
            entries: entries.into_iter().map(TreeEntry::from).collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content_bytes = Vec::new();

        for entry in &self.entries {
            content_bytes.extend_from_slice(entry.mode.as_octal().as_bytes());
            content_bytes.push(b' ');
            content_bytes.extend_from_slice(entry.name.as_os_str().as_bytes());
            content_bytes.push(0);
            content_bytes.extend_from_slice(entry.oid.as_bytes());
        }

        Ok(Bytes::from(content_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes).map_err(truncated)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(Error::InvalidFormat("unexpected EOF in tree mode".into()));
            }
            let mode = std::str::from_utf8(&mode_bytes)
                .ok()
                .and_then(EntryMode::from_octal_str)
                .ok_or_else(|| Error::InvalidFormat("invalid tree entry mode".into()))?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes).map_err(truncated)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(Error::InvalidFormat("unexpected EOF in tree entry name".into()));
            }
            let name = PathBuf::from(OsStr::from_bytes(&name_bytes));

            let oid = ObjectId::read_h40_from(&mut reader).map_err(truncated)?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

fn truncated(error: std::io::Error) -> Error {
    Error::InvalidFormat(format!("truncated tree entry: {error}"))
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} {}\t{}", entry.mode, entry.oid, entry.name.display()))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
