//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path, as given when the file was added
//! - Content hash (object ID)
//! - File metadata (mode, owner, size, timestamps, device and inode)
//!
//! The metadata lets the change detector notice modified files without
//! reading their content.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::io::{BufRead, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Maximum path length supported in index entries (length is stored as u16)
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;

/// Size of an index entry without its path
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Index entry representing a tracked file
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to the working tree
    pub name: PathBuf,
    /// SHA-1 hash of the blob holding the file content
    pub oid: ObjectId,
    /// File metadata captured when the content was read
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    /// Path bytes used for ordering and serialization
    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_os_str().as_bytes()
    }

    /// Byte-wise comparison of this entry's path with `name`
    pub fn cmp_name(&self, name: &[u8]) -> Ordering {
        self.name_bytes().cmp(name)
    }

    pub fn serialized_size(&self) -> usize {
        ENTRY_FIXED_SIZE + self.name_bytes().len()
    }
}

/// File metadata stored in index entries
///
/// Values are the low 32 bits of what the filesystem reports, the width the
/// index file stores.
///
/// ## Timestamps
///
/// - `ctime`: File status change time (inode modification)
/// - `mtime`: File content modification time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Change time (seconds since Unix epoch)
    pub ctime: u32,
    /// Change time nanoseconds
    pub ctime_nsec: u32,
    /// Modification time (seconds since Unix epoch)
    pub mtime: u32,
    /// Modification time nanoseconds
    pub mtime_nsec: u32,
    /// Device ID
    pub dev: u32,
    /// Inode number
    pub ino: u32,
    /// File mode (permissions and type)
    pub mode: EntryMode,
    /// User ID of owner
    pub uid: u32,
    /// Group ID of owner
    pub gid: u32,
    /// File size in bytes
    pub size: u32,
}

impl From<&Metadata> for EntryMetadata {
    fn from(metadata: &Metadata) -> Self {
        Self {
            ctime: metadata.ctime() as u32,
            ctime_nsec: metadata.ctime_nsec() as u32,
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode: EntryMode::new(metadata.mode()),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
        }
    }
}

/// Check that a path can be stored in an index entry
pub fn validate_name(name: &Path) -> Result<()> {
    let len = name.as_os_str().as_bytes().len();

    if len == 0 {
        return Err(Error::InvalidArgument("empty path".into()));
    }
    if len > MAX_PATH_SIZE {
        return Err(Error::InvalidArgument(format!(
            "path is {} bytes long, the index stores at most {}",
            len, MAX_PATH_SIZE
        )));
    }

    Ok(())
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Result<Bytes> {
        validate_name(&self.name)?;

        let mut entry_bytes = Vec::with_capacity(self.serialized_size());
        self.write_to(&mut entry_bytes)
            .map_err(|e| Error::InvalidFormat(format!("unable to serialize index entry: {e}")))?;

        Ok(Bytes::from(entry_bytes))
    }
}

impl IndexEntry {
    fn write_to(&self, entry_bytes: &mut Vec<u8>) -> std::io::Result<()> {
        let name = self.name_bytes();

        entry_bytes.write_u32::<NetworkEndian>(self.metadata.ctime)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.ctime_nsec)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.mtime)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.mtime_nsec)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.dev)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.ino)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.size)?;
        self.oid.write_h40_to(entry_bytes)?;
        entry_bytes.write_u16::<NetworkEndian>(name.len() as u16)?;
        entry_bytes.write_all(name)
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut read = || -> std::io::Result<IndexEntry> {
            let metadata = EntryMetadata {
                ctime: reader.read_u32::<NetworkEndian>()?,
                ctime_nsec: reader.read_u32::<NetworkEndian>()?,
                mtime: reader.read_u32::<NetworkEndian>()?,
                mtime_nsec: reader.read_u32::<NetworkEndian>()?,
                dev: reader.read_u32::<NetworkEndian>()?,
                ino: reader.read_u32::<NetworkEndian>()?,
                mode: EntryMode::new(reader.read_u32::<NetworkEndian>()?),
                uid: reader.read_u32::<NetworkEndian>()?,
                gid: reader.read_u32::<NetworkEndian>()?,
                size: reader.read_u32::<NetworkEndian>()?,
            };
            let oid = ObjectId::read_h40_from(&mut reader)?;

            let name_len = reader.read_u16::<NetworkEndian>()? as usize;
            let mut name = vec![0u8; name_len];
            reader.read_exact(&mut name)?;

            Ok(IndexEntry::new(
                PathBuf::from(OsStr::from_bytes(&name)),
                oid,
                metadata,
            ))
        };

        let entry =
            read().map_err(|e| Error::InvalidFormat(format!("truncated index entry: {e}")))?;
        if entry.name_bytes().is_empty() {
            return Err(Error::InvalidFormat("index entry with an empty path".into()));
        }

        Ok(entry)
    }
}
