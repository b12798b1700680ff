use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Read;

/// Environment variable overriding the author name
pub const AUTHOR_NAME_ENV: &str = "GT_AUTHOR_NAME";

impl Repository {
    /// Write a commit for `tree`; the message defaults to standard input
    pub fn commit_tree(
        &self,
        tree: &str,
        parents: &[String],
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        let tree_id = ObjectId::try_parse(tree)?;
        let parents = parents
            .iter()
            .map(|parent| ObjectId::try_parse(parent))
            .collect::<Result<Vec<_>, _>>()?;

        let message = match message {
            Some(message) => Bytes::copy_from_slice(message.as_bytes()),
            None => {
                let mut message = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut message)
                    .context("Unable to read the commit message from standard input")?;
                Bytes::from(message)
            }
        };

        let commit_id = self.store_commit(tree_id, parents, message)?;
        writeln!(self.writer(), "{}", commit_id)?;

        Ok(())
    }

    /// Store a commit authored and committed by the current user, now
    pub(crate) fn store_commit(
        &self,
        tree_id: ObjectId,
        parents: Vec<ObjectId>,
        message: Bytes,
    ) -> anyhow::Result<ObjectId> {
        let author = Author::now(identity()?);
        let committer = author.clone();

        Ok(self
            .database()
            .build_commit(tree_id, parents, author, committer, message)?)
    }
}

/// `GT_AUTHOR_NAME`, or the login name of the effective user
fn identity() -> anyhow::Result<String> {
    if let Some(name) = std::env::var(AUTHOR_NAME_ENV).ok().filter(|name| !name.is_empty()) {
        return Ok(name);
    }

    let uid = nix::unistd::geteuid();
    let user = nix::unistd::User::from_uid(uid)
        .context("Unable to look up the current user")?
        .with_context(|| format!("No user entry for uid {uid}"))?;

    Ok(user.name)
}
