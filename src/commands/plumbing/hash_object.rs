use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Read;
use std::path::Path;

impl Repository {
    /// Print the ID of `file` (or stdin) stored as `object_type`
    pub fn hash_object(
        &self,
        file: Option<&Path>,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<()> {
        let payload = match file {
            Some(file) => std::fs::read(file)
                .with_context(|| format!("Unable to read {}", file.display()))?,
            None => {
                let mut payload = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut payload)
                    .context("Unable to read standard input")?;
                payload
            }
        };

        // structured payloads must parse before they get an ID
        if object_type != ObjectType::Blob {
            ObjectBox::parse(object_type, &payload)
                .with_context(|| format!("Payload is not a valid {object_type} object"))?;
        }

        let object_id = self.database().write(object_type, &payload, write)?;
        writeln!(self.writer(), "{}", object_id)?;

        Ok(())
    }
}
