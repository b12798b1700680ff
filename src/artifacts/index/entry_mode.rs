//! File mode as recorded in the index and in tree objects
//!
//! The raw `st_mode` captured from the filesystem is kept verbatim so that
//! change detection can compare it bit-for-bit. Trees print it in octal.

const S_IFMT: u32 = 0o170000;
const S_IFREG: u32 = 0o100000;

#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub struct EntryMode(u32);

impl EntryMode {
    pub const REGULAR: EntryMode = EntryMode(0o100644);
    pub const EXECUTABLE: EntryMode = EntryMode(0o100755);

    pub fn new(mode: u32) -> Self {
        EntryMode(mode)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn is_regular(&self) -> bool {
        self.0 & S_IFMT == S_IFREG
    }

    /// Octal form without leading zeros (`100644`, `40000`)
    pub fn as_octal(&self) -> String {
        format!("{:o}", self.0)
    }

    pub fn from_octal_str(value: &str) -> Option<Self> {
        if value.is_empty() || !value.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return None;
        }
        u32::from_str_radix(value, 8).ok().map(EntryMode)
    }
}

impl From<u32> for EntryMode {
    fn from(mode: u32) -> Self {
        EntryMode(mode)
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.0
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:o}", self.0)
    }
}
