//! Index (staging area)
//!
//! The index tracks every known file of the working tree together with the
//! metadata captured when its content was last stored, so later changes can
//! be noticed without rehashing.
//!
//! ## Lifecycle
//!
//! - [`Index::open`] loads and validates the file (or starts empty when the
//!   file does not exist yet)
//! - [`Index::upsert`] and [`Index::add_file`] mutate the table in memory
//! - [`Index::close`] rewrites the whole file and consumes the handle
//!
//! ## Ordering
//!
//! Entries are kept unique by path and in strictly ascending byte-wise path
//! order. `Path` compares component-wise (`a/b` sorts before `a.b`), so the
//! table is a `Vec` searched on raw path bytes rather than an ordered map.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::atomic_file;
use crate::artifacts::core::mapped_file::MappedFile;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{self, ENTRY_FIXED_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_PREFIX_SIZE, HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Result};
use std::cmp::Ordering;
use std::io::ErrorKind;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Index {
    /// Path to the index file (typically `.gt/index`)
    path: Box<Path>,
    /// Tracked files in ascending byte-wise path order
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Open the index file
    ///
    /// A missing file yields an empty index. Anything else that is not a
    /// well-formed index file (bad signature, version or checksum, truncated
    /// or unordered entries, trailing bytes) is `CorruptIndex`.
    pub fn open(path: Box<Path>) -> Result<Self> {
        let mapped = match MappedFile::open(&path) {
            Ok(mapped) => mapped,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no index file, starting empty");
                return Ok(Index {
                    path,
                    entries: Vec::new(),
                });
            }
            Err(e) => return Err(e).with_path(&*path),
        };

        let entries = Self::parse(&path, &mapped).inspect_err(|e| warn!("{e}"))?;
        debug!(path = %path.display(), entries = entries.len(), "index opened");

        Ok(Index { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(path: &Path, bytes: &[u8]) -> Result<Vec<IndexEntry>> {
        let header = IndexHeader::parse(bytes)
            .ok_or_else(|| Error::corrupt_index(path, "file is shorter than the header"))?;

        if header.signature != SIGNATURE {
            return Err(Error::corrupt_index(path, "invalid signature"));
        }
        if header.version != VERSION {
            return Err(Error::corrupt_index(
                path,
                format!("unsupported version {}", header.version),
            ));
        }

        let table = &bytes[HEADER_SIZE..];
        if Checksum::of_table(&bytes[..HEADER_PREFIX_SIZE], table) != header.checksum {
            return Err(Error::corrupt_index(path, "checksum mismatch"));
        }

        let mut reader = table;
        // the count is untrusted until every entry has been read
        let capacity = (header.entries_count as usize).min(table.len() / ENTRY_FIXED_SIZE);
        let mut entries: Vec<IndexEntry> = Vec::with_capacity(capacity);
        for _ in 0..header.entries_count {
            let entry = IndexEntry::deserialize(&mut reader)
                .map_err(|e| Error::corrupt_index(path, e.to_string()))?;

            if let Some(previous) = entries.last()
                && previous.cmp_name(entry.name_bytes()) != Ordering::Less
            {
                return Err(Error::corrupt_index(
                    path,
                    format!("entry {} is out of order", entry.name.display()),
                ));
            }
            entries.push(entry);
        }

        if !reader.is_empty() {
            return Err(Error::corrupt_index(
                path,
                format!("{} trailing bytes after the last entry", reader.len()),
            ));
        }

        Ok(entries)
    }

    /// Binary search for a path
    ///
    /// `Ok(position)` when the path is tracked, `Err(insertion_point)` when
    /// it is not.
    pub fn find(&self, name: &Path) -> std::result::Result<usize, usize> {
        let name = name.as_os_str().as_bytes();
        self.entries.binary_search_by(|entry| entry.cmp_name(name))
    }

    /// Insert an entry, replacing any entry with the same path
    pub fn upsert(&mut self, entry: IndexEntry) -> Result<()> {
        index_entry::validate_name(&entry.name)?;

        match self.find(&entry.name) {
            Ok(position) => self.entries[position] = entry,
            Err(position) => self.entries.insert(position, entry),
        }

        Ok(())
    }

    /// Store a working tree file as a blob and record it
    ///
    /// Content and metadata are read from the same open file. Nothing is
    /// recorded if any step fails.
    pub fn add_file(
        &mut self,
        database: &Database,
        workspace: &Workspace,
        path: &Path,
    ) -> Result<ObjectId> {
        let name = workspace.relative_path(path)?;
        index_entry::validate_name(&name)?;

        let (content, metadata) = workspace.open_file(&name)?;
        let oid = database.store(&Blob::new(content))?;
        debug!(path = %name.display(), %oid, "file added");

        self.upsert(IndexEntry::new(name, oid.clone(), metadata))?;

        Ok(oid)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.find(path).ok().map(|position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the header and entries as they appear on disk
    fn serialize(&self) -> Result<Vec<u8>> {
        let entries_count = u32::try_from(self.entries.len())
            .map_err(|_| Error::InvalidArgument("too many index entries".into()))?;

        let mut table = Vec::new();
        for entry in &self.entries {
            table.extend_from_slice(&entry.serialize()?);
        }

        let mut header = IndexHeader {
            entries_count,
            ..IndexHeader::empty()
        };
        header.checksum = Checksum::of_table(&header.prefix_bytes(), &table);

        let mut bytes = header.serialize();
        bytes.extend_from_slice(&table);

        Ok(bytes)
    }

    /// Rewrite the index file and release the handle
    ///
    /// The new content goes to a temporary file in the same directory which
    /// then replaces the index in one rename.
    pub fn close(self) -> Result<()> {
        let bytes = self.serialize()?;
        atomic_file::write_atomically(&self.path, &bytes)?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "index written");

        Ok(())
    }
}
