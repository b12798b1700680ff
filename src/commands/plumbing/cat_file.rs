use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatFileMode {
    /// Payload bytes as stored
    #[default]
    Raw,
    /// Type tag only
    Type,
    /// Human-readable rendering (tree listings)
    Pretty,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let (object_type, payload) = self.database().read(&object_id)?;

        let mut writer = self.writer();
        match mode {
            CatFileMode::Type => writeln!(writer, "{}", object_type)?,
            CatFileMode::Pretty if object_type == ObjectType::Tree => {
                let object = ObjectBox::parse(object_type, &payload)?;
                let listing = object.display();
                if !listing.is_empty() {
                    writeln!(writer, "{}", listing)?;
                }
            }
            CatFileMode::Raw | CatFileMode::Pretty => writer.write_all(&payload)?,
        }

        Ok(())
    }
}
