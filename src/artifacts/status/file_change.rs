use bitflags::bitflags;

bitflags! {
    /// Attributes that differ between an index entry and the file on disk
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ChangeFlags: u32 {
        const CTIME = 0x01;
        const MTIME = 0x02;
        /// Device or inode number
        const INODE = 0x04;
        const MODE = 0x08;
        /// Owner uid or gid
        const OWNER = 0x10;
        const SIZE = 0x20;
    }
}

impl ChangeFlags {
    /// Short names of the set flags, in bit order
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "CTIME" => "ctime",
                "MTIME" => "mtime",
                "INODE" => "inode",
                "MODE" => "mode",
                "OWNER" => "owner",
                _ => "size",
            })
            .collect()
    }
}

impl std::fmt::Display for ChangeFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels().join(","))
    }
}

/// Outcome of comparing a tracked file against its index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Unchanged,
    /// Metadata differs; the content may or may not have changed
    MetadataChanged(ChangeFlags),
    Deleted,
}
