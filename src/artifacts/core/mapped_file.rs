//! Read-only memory maps of repository files

use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// Contents of a file mapped into memory
///
/// Zero-length files are not mapped at all.
pub enum MappedFile {
    Empty,
    Mapped(Mmap),
}

impl MappedFile {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file(&file)
    }

    pub fn from_file(file: &File) -> std::io::Result<Self> {
        if file.metadata()?.len() == 0 {
            return Ok(MappedFile::Empty);
        }

        // Repository files are replaced by rename, never truncated in place
        let map = unsafe { Mmap::map(file)? };
        Ok(MappedFile::Mapped(map))
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            MappedFile::Empty => &[],
            MappedFile::Mapped(map) => map,
        }
    }
}
