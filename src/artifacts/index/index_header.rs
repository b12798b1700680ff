use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_PREFIX_SIZE, HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, NetworkEndian};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) signature: u32,
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
    pub(crate) checksum: ObjectId,
}

impl IndexHeader {
    pub(crate) fn empty() -> Self {
        IndexHeader {
            signature: SIGNATURE,
            version: VERSION,
            entries_count: 0,
            checksum: ObjectId::default(),
        }
    }

    /// Signature, version and entry count: the part covered by the checksum
    pub(crate) fn prefix_bytes(&self) -> [u8; HEADER_PREFIX_SIZE] {
        let mut bytes = [0u8; HEADER_PREFIX_SIZE];
        NetworkEndian::write_u32(&mut bytes[0..4], self.signature);
        NetworkEndian::write_u32(&mut bytes[4..8], self.version);
        NetworkEndian::write_u32(&mut bytes[8..12], self.entries_count);
        bytes
    }

    pub(crate) fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(&self.prefix_bytes());
        bytes.extend_from_slice(self.checksum.as_bytes());
        bytes
    }

    /// Parse the fixed-size header at the start of an index file
    ///
    /// Only the size is checked here; signature, version and checksum are
    /// validated by the caller.
    pub(crate) fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }

        let checksum = ObjectId::try_from(&bytes[HEADER_PREFIX_SIZE..HEADER_SIZE]).ok()?;

        Some(IndexHeader {
            signature: NetworkEndian::read_u32(&bytes[0..4]),
            version: NetworkEndian::read_u32(&bytes[4..8]),
            entries_count: NetworkEndian::read_u32(&bytes[8..12]),
            checksum,
        })
    }
}
