use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use crate::artifacts::status::file_change::{ChangeFlags, FileStatus};
use crate::errors::Result;
use derive_new::new;
use tracing::trace;

#[derive(new)]
pub struct Inspector<'w> {
    workspace: &'w Workspace,
}

impl<'w> Inspector<'w> {
    /// Classify a tracked file from a fresh status read of its path
    ///
    /// A missing path is `Deleted`; any other I/O failure is returned.
    pub fn classify_path(&self, entry: &IndexEntry) -> Result<FileStatus> {
        let stat = self.workspace.stat_file(&entry.name)?;
        let status = classify(entry, stat.as_ref());
        trace!(path = %entry.name.display(), ?status, "classified");

        Ok(status)
    }
}

/// Compare an index entry against the current metadata of its file
///
/// `None` means the filesystem reports the path absent.
pub fn classify(entry: &IndexEntry, stat: Option<&EntryMetadata>) -> FileStatus {
    match stat {
        None => FileStatus::Deleted,
        Some(stat) => match changed_attributes(&entry.metadata, stat) {
            flags if flags.is_empty() => FileStatus::Unchanged,
            flags => FileStatus::MetadataChanged(flags),
        },
    }
}

fn changed_attributes(recorded: &EntryMetadata, current: &EntryMetadata) -> ChangeFlags {
    let mut flags = ChangeFlags::empty();

    if (recorded.ctime, recorded.ctime_nsec) != (current.ctime, current.ctime_nsec) {
        flags |= ChangeFlags::CTIME;
    }
    if (recorded.mtime, recorded.mtime_nsec) != (current.mtime, current.mtime_nsec) {
        flags |= ChangeFlags::MTIME;
    }
    if recorded.dev != current.dev || recorded.ino != current.ino {
        flags |= ChangeFlags::INODE;
    }
    if recorded.mode != current.mode {
        flags |= ChangeFlags::MODE;
    }
    if recorded.uid != current.uid || recorded.gid != current.gid {
        flags |= ChangeFlags::OWNER;
    }
    if recorded.size != current.size {
        flags |= ChangeFlags::SIZE;
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::entry_mode::EntryMode;
    use crate::artifacts::objects::object_id::ObjectId;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use filetime::FileTime;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;

    fn recorded() -> EntryMetadata {
        EntryMetadata {
            ctime: 100,
            ctime_nsec: 1,
            mtime: 200,
            mtime_nsec: 2,
            dev: 3,
            ino: 4,
            mode: EntryMode::REGULAR,
            uid: 1000,
            gid: 1000,
            size: 42,
        }
    }

    fn entry_with(metadata: EntryMetadata) -> IndexEntry {
        IndexEntry::new(PathBuf::from("file.txt"), ObjectId::digest(b"x"), metadata)
    }

    #[test]
    fn identical_metadata_is_unchanged() {
        let recorded = recorded();
        let entry = entry_with(recorded.clone());
        assert_eq!(classify(&entry, Some(&recorded)), FileStatus::Unchanged);
    }

    #[test]
    fn absent_file_is_deleted() {
        assert_eq!(classify(&entry_with(recorded()), None), FileStatus::Deleted);
    }

    #[rstest]
    #[case::size(EntryMetadata { size: 43, ..recorded() }, ChangeFlags::SIZE)]
    #[case::mtime_nanos(EntryMetadata { mtime_nsec: 9, ..recorded() }, ChangeFlags::MTIME)]
    #[case::ctime(EntryMetadata { ctime: 101, ..recorded() }, ChangeFlags::CTIME)]
    #[case::device(EntryMetadata { dev: 7, ..recorded() }, ChangeFlags::INODE)]
    #[case::inode(EntryMetadata { ino: 7, ..recorded() }, ChangeFlags::INODE)]
    #[case::mode(EntryMetadata { mode: EntryMode::EXECUTABLE, ..recorded() }, ChangeFlags::MODE)]
    #[case::group(EntryMetadata { gid: 0, ..recorded() }, ChangeFlags::OWNER)]
    fn each_attribute_sets_its_own_flag(
        #[case] current: EntryMetadata,
        #[case] expected: ChangeFlags,
    ) {
        let entry = entry_with(recorded());
        assert_eq!(
            classify(&entry, Some(&current)),
            FileStatus::MetadataChanged(expected)
        );
    }

    #[test]
    fn size_change_is_flagged_alongside_others() {
        let recorded = recorded();
        let current = EntryMetadata {
            size: 0,
            mtime: 999,
            uid: 0,
            ..recorded.clone()
        };

        match classify(&entry_with(recorded), Some(&current)) {
            FileStatus::MetadataChanged(flags) => {
                assert!(flags.contains(ChangeFlags::SIZE));
                assert_eq!(flags, ChangeFlags::SIZE | ChangeFlags::MTIME | ChangeFlags::OWNER);
            }
            other => panic!("expected a metadata change, got {other:?}"),
        }
    }

    #[test]
    fn touching_a_file_changes_its_mtime() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("file.txt");
        file.write_str("content").unwrap();

        let workspace = Workspace::new(dir.path().into());
        let stat = workspace.stat_file("file.txt".as_ref()).unwrap().unwrap();
        let entry = IndexEntry::new(PathBuf::from("file.txt"), ObjectId::digest(b"x"), stat);
        let inspector = Inspector::new(&workspace);

        assert_eq!(inspector.classify_path(&entry).unwrap(), FileStatus::Unchanged);

        filetime::set_file_mtime(file.path(), FileTime::from_unix_time(1, 0)).unwrap();
        match inspector.classify_path(&entry).unwrap() {
            FileStatus::MetadataChanged(flags) => assert!(flags.contains(ChangeFlags::MTIME)),
            other => panic!("expected a metadata change, got {other:?}"),
        }

        std::fs::remove_file(file.path()).unwrap();
        assert_eq!(inspector.classify_path(&entry).unwrap(), FileStatus::Deleted);
    }
}
