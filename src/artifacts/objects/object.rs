use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Upper bound on `"<type> <size>\0"`: the longest type tag plus a 64-bit decimal size
pub const MAX_HEADER_SIZE: usize = 32;

/// Serialize an object's payload (without the type/size header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Parse an object's payload (the header has already been consumed)
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;
}

/// A stored object parsed into its typed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    /// Parse a payload according to its type tag
    pub fn parse(object_type: ObjectType, payload: &[u8]) -> Result<Self> {
        Ok(match object_type {
            ObjectType::Blob => ObjectBox::Blob(Box::new(Blob::deserialize(payload)?)),
            ObjectType::Tree => ObjectBox::Tree(Box::new(Tree::deserialize(payload)?)),
            ObjectType::Commit => ObjectBox::Commit(Box::new(Commit::deserialize(payload)?)),
        })
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(blob) => blob.object_type(),
            ObjectBox::Tree(tree) => tree.object_type(),
            ObjectBox::Commit(commit) => commit.object_type(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}

/// The `<type> <size>` prefix every stored object starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    /// Header bytes including the terminating NUL
    pub fn encode(&self) -> Vec<u8> {
        format!("{} {}\0", self.object_type.as_str(), self.size).into_bytes()
    }

    /// Parse a header given without its terminating NUL
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let header = std::str::from_utf8(bytes).ok()?;
        let (object_type, size) = header.split_once(' ')?;

        if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            object_type: ObjectType::try_from(object_type).ok()?,
            size: size.parse().ok()?,
        })
    }
}

/// Frame a payload as `<type> <size>\0<payload>`
///
/// The payload is complete before the header is computed, so the header is
/// simply prepended.
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let mut framed = ObjectHeader::new(object_type, payload.len()).encode();
    framed.reserve_exact(payload.len());
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}
