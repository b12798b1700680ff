use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

/// Running SHA-1 over the header prefix and the entries of an index file
#[derive(Debug, Clone)]
pub struct Checksum {
    digest: Sha1,
}

impl Checksum {
    pub(crate) fn new() -> Self {
        Checksum {
            digest: Sha1::new(),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    pub(crate) fn finalize(self) -> ObjectId {
        ObjectId::from_bytes(self.digest.finalize().into())
    }

    /// Checksum of a whole table: header prefix followed by the entry bytes
    pub(crate) fn of_table(header_prefix: &[u8], entries: &[u8]) -> ObjectId {
        let mut checksum = Self::new();
        checksum.update(header_prefix);
        checksum.update(entries);
        checksum.finalize()
    }
}
