//! zlib codec for stored objects
//!
//! Objects are deflated at the best compression level. The digest of an
//! object is taken over these compressed bytes, so the level must never
//! change.

use crate::artifacts::objects::object::{MAX_HEADER_SIZE, ObjectHeader};
use crate::errors::{Error, Result};
use bytes::Bytes;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{BufRead, BufReader, Read, Write};

/// zlib level used for every stored object (`Z_BEST_COMPRESSION`)
pub const COMPRESSION_LEVEL: u32 = 9;

/// Deflate a buffer at [`COMPRESSION_LEVEL`]
pub fn compress(data: &[u8]) -> Result<Bytes> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2 + 64),
        Compression::new(COMPRESSION_LEVEL),
    );
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map(Bytes::from)
        .map_err(|e| Error::InvalidArgument(format!("unable to compress: {e}")))
}

/// Inflate a buffer that must expand to exactly `expected_len` bytes
pub fn decompress(data: &[u8], expected_len: usize) -> Result<Bytes> {
    let mut inflater = Inflater::new(data);
    let content = inflater.read_exact_len(expected_len)?;
    inflater.finish()?;

    Ok(content)
}

/// Incremental inflater
///
/// Lets the caller pull a short prefix out of the stream, decide how much
/// more to expect, and then resume inflation into an exactly-sized buffer.
pub struct Inflater<'d> {
    reader: BufReader<ZlibDecoder<&'d [u8]>>,
}

impl<'d> Inflater<'d> {
    pub fn new(data: &'d [u8]) -> Self {
        Inflater {
            reader: BufReader::new(ZlibDecoder::new(data)),
        }
    }

    /// Inflate up to and including the first NUL and parse the object header
    ///
    /// Returns `None` when no NUL appears within [`MAX_HEADER_SIZE`] bytes or
    /// the prefix is not a valid header.
    pub fn read_header(&mut self) -> Result<Option<ObjectHeader>> {
        let mut header = Vec::with_capacity(MAX_HEADER_SIZE);
        (&mut self.reader)
            .take(MAX_HEADER_SIZE as u64)
            .read_until(b'\0', &mut header)
            .map_err(corrupt)?;

        if header.pop() != Some(b'\0') {
            return Ok(None);
        }

        Ok(ObjectHeader::parse(&header))
    }

    /// Inflate exactly `len` more bytes
    ///
    /// `len` usually comes from the stream itself, so the buffer grows with
    /// what actually inflates instead of being sized up front.
    pub fn read_exact_len(&mut self, len: usize) -> Result<Bytes> {
        let mut content = Vec::new();
        (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut content)
            .map_err(corrupt)?;

        if content.len() != len {
            return Err(Error::CorruptStream(format!(
                "stream ends after {} of {} bytes",
                content.len(),
                len
            )));
        }

        Ok(Bytes::from(content))
    }

    /// Check that the stream holds no data past what has been read
    pub fn finish(mut self) -> Result<()> {
        let mut probe = [0u8; 1];
        match self.reader.read(&mut probe).map_err(corrupt)? {
            0 => Ok(()),
            _ => Err(Error::CorruptStream(
                "stream inflates past the declared length".into(),
            )),
        }
    }
}

fn corrupt(error: std::io::Error) -> Error {
    Error::CorruptStream(error.to_string())
}
