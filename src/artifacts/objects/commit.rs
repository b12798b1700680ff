//! Commit object
//!
//! Commits record a snapshot of the index:
//! - A tree object ID
//! - Parent commit ID(s), in the order the caller supplied them
//! - Author and committer identities with a UNIX timestamp
//! - A free-form message, stored verbatim
//!
//! ## Format
//!
//! On disk (before compression):
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <timestamp>
//! committer <name> <timestamp>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::io::{BufRead, Read, Write};

/// Maximum number of parents a commit may reference
pub const MAX_PARENTS: usize = 20;

/// Author or committer identity
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    timestamp: DateTime<Utc>,
}

impl Author {
    pub fn new(name: String, timestamp: DateTime<Utc>) -> Self {
        Author { name, timestamp }
    }

    /// Create an author stamped with the current time
    pub fn now(name: String) -> Self {
        Self::new(name, Utc::now())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// `<name> <unix-seconds>`
    pub fn display(&self) -> String {
        format!("{} {}", self.name, self.timestamp.timestamp())
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // The name may contain spaces; the timestamp is the last field
        let (name, timestamp) = value
            .rsplit_once(' ')
            .ok_or_else(|| Error::InvalidFormat(format!("invalid identity: {value}")))?;
        let timestamp = timestamp
            .parse::<i64>()
            .ok()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
            .ok_or_else(|| Error::InvalidFormat(format!("invalid timestamp: {timestamp}")))?;

        Ok(Author::new(name.to_string(), timestamp))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    parents: Vec<ObjectId>,
    author: Author,
    committer: Author,
    message: Bytes,
}

impl Commit {
    /// Create a commit, rejecting more than [`MAX_PARENTS`] parents
    ///
    /// Neither the tree nor the parents are checked for existence.
    pub fn new(
        tree_oid: ObjectId,
        parents: Vec<ObjectId>,
        author: Author,
        committer: Author,
        message: Bytes,
    ) -> Result<Self> {
        if parents.len() > MAX_PARENTS {
            return Err(Error::InvalidArgument(format!(
                "a commit can have at most {} parents, got {}",
                MAX_PARENTS,
                parents.len()
            )));
        }

        Ok(Commit {
            tree_oid,
            parents,
            author,
            committer,
            message,
        })
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn message(&self) -> &Bytes {
        &self.message
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let mut content_bytes = Vec::new();
        let mut write = || -> std::io::Result<()> {
            writeln!(content_bytes, "tree {}", self.tree_oid)?;
            for parent in &self.parents {
                writeln!(content_bytes, "parent {}", parent)?;
            }
            writeln!(content_bytes, "author {}", self.author.display())?;
            writeln!(content_bytes, "committer {}", self.committer.display())?;
            writeln!(content_bytes)?;
            content_bytes.write_all(&self.message)
        };
        write().map_err(|e| Error::InvalidFormat(format!("unable to serialize commit: {e}")))?;

        Ok(Bytes::from(content_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let tree_line = next_line(&mut reader)?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .ok_or_else(|| Error::InvalidFormat("missing tree line".into()))
            .and_then(ObjectId::try_parse)?;

        // Parse all parent lines (there can be 0, 1, or multiple parents)
        let mut parents = Vec::new();
        let mut current = next_line(&mut reader)?;
        while let Some(parent) = current.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent)?);
            current = next_line(&mut reader)?;
        }

        let author = current
            .strip_prefix("author ")
            .ok_or_else(|| Error::InvalidFormat("missing author line".into()))
            .and_then(Author::try_from)?;

        let committer_line = next_line(&mut reader)?;
        let committer = committer_line
            .strip_prefix("committer ")
            .ok_or_else(|| Error::InvalidFormat("missing committer line".into()))
            .and_then(Author::try_from)?;

        if !next_line(&mut reader)?.is_empty() {
            return Err(Error::InvalidFormat(
                "missing blank line before commit message".into(),
            ));
        }

        let mut message = Vec::new();
        reader
            .read_to_end(&mut message)
            .map_err(|e| Error::InvalidFormat(format!("invalid commit message: {e}")))?;

        Commit::new(tree_oid, parents, author, committer, message.into())
    }
}

fn next_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| Error::InvalidFormat(format!("invalid commit header: {e}")))?;

    match line.strip_suffix('\n') {
        Some(content) => Ok(content.to_string()),
        None => Err(Error::InvalidFormat("truncated commit header".into())),
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.serialize()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn author() -> Author {
        Author::new(
            "alice".to_string(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[rstest]
    fn payload_starts_with_tree_parent_and_author(author: Author) {
        let tree = ObjectId::digest(b"tree");
        let parent = ObjectId::digest(b"parent");
        let commit = Commit::new(
            tree.clone(),
            vec![parent.clone()],
            author.clone(),
            author,
            Bytes::from_static(b"initial import\n"),
        )
        .unwrap();

        let payload = commit.serialize().unwrap();
        let payload = String::from_utf8(payload.to_vec()).unwrap();
        let lines = payload.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], format!("tree {tree}"));
        assert_eq!(lines[1], format!("parent {parent}"));
        assert_eq!(lines[2], "author alice 1700000000");
        assert_eq!(lines[3], "committer alice 1700000000");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "initial import");
    }

    #[rstest]
    fn payload_is_exact_without_parents(author: Author) {
        let tree = ObjectId::digest(b"tree");
        let commit = Commit::new(
            tree.clone(),
            vec![],
            author.clone(),
            author,
            Bytes::from_static(b"msg"),
        )
        .unwrap();

        let expected = format!(
            "tree {tree}\nauthor alice 1700000000\ncommitter alice 1700000000\n\nmsg"
        );
        assert_eq!(commit.serialize().unwrap().to_vec(), expected.into_bytes());
    }

    #[rstest]
    fn parents_keep_caller_order(author: Author) {
        let parents = (0..3u8)
            .map(|i| ObjectId::digest(&[i]))
            .collect::<Vec<_>>();
        let commit = Commit::new(
            ObjectId::digest(b"tree"),
            parents.clone(),
            author.clone(),
            author,
            Bytes::new(),
        )
        .unwrap();

        let parsed = Commit::deserialize(&commit.serialize().unwrap()[..]).unwrap();
        assert_eq!(parsed.parents(), parents.as_slice());
        assert_eq!(parsed, commit);
    }

    #[rstest]
    fn too_many_parents_is_rejected(author: Author) {
        let parents = (0..=MAX_PARENTS as u8)
            .map(|i| ObjectId::digest(&[i]))
            .collect::<Vec<_>>();
        let result = Commit::new(
            ObjectId::digest(b"tree"),
            parents,
            author.clone(),
            author,
            Bytes::new(),
        );

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[rstest]
    fn maximum_parents_is_accepted(author: Author) {
        let parents = (0..MAX_PARENTS as u8)
            .map(|i| ObjectId::digest(&[i]))
            .collect::<Vec<_>>();
        let result = Commit::new(
            ObjectId::digest(b"tree"),
            parents,
            author.clone(),
            author,
            Bytes::new(),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn identity_names_may_contain_spaces() {
        let author = Author::try_from("Alice Liddell 1700000000").unwrap();

        assert_eq!(author.name(), "Alice Liddell");
        assert_eq!(author.timestamp().timestamp(), 1_700_000_000);
    }

    #[rstest]
    fn message_bytes_are_kept_verbatim(author: Author) {
        let message = Bytes::from_static(b"line one\n\nline three\n\xff\n");
        let commit = Commit::new(
            ObjectId::digest(b"tree"),
            vec![],
            author.clone(),
            author,
            message.clone(),
        )
        .unwrap();

        let parsed = Commit::deserialize(&commit.serialize().unwrap()[..]).unwrap();
        assert_eq!(parsed.message(), &message);
    }
}
