use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn write_tree(&self) -> anyhow::Result<()> {
        let tree_id = self.store_index_tree()?;
        writeln!(self.writer(), "{}", tree_id)?;

        Ok(())
    }

    /// Store the current index as a tree object
    pub(crate) fn store_index_tree(&self) -> anyhow::Result<ObjectId> {
        let index = self.open_index()?;
        Ok(self.database().build_tree(&index)?)
    }
}
