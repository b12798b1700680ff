use crate::areas::repository::Repository;
use bytes::Bytes;

impl Repository {
    /// Commit the index on top of HEAD and move HEAD to the new commit
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let tree_id = self.store_index_tree()?;
        let parents = self.refs().read_head()?.into_iter().collect::<Vec<_>>();

        let mut message = message.trim().to_string();
        message.push('\n');

        let commit_id = self.store_commit(tree_id, parents, Bytes::from(message.clone()))?;
        self.refs().update_head(&commit_id)?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_id,
            message.lines().next().unwrap_or_default()
        )?;

        Ok(())
    }
}
