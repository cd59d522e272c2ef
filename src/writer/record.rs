//! TFRecord framing for event files.
//!
//! Each record is laid out as:
//! - `u64` length, little-endian
//! - `u32` masked CRC32C of the length bytes
//! - `byte[length]` data
//! - `u32` masked CRC32C of the data

use std::io::{self, Read, Write};

use crate::{Error, Result};

const MASK_DELTA: u32 = 0xa282_ead8;

/// CRC32C masked the way TensorFlow masks record checksums.
#[must_use]
pub fn masked_crc32c(data: &[u8]) -> u32 {
    let crc = crc32c::crc32c(data);
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

/// Writes length-prefixed, checksummed records.
#[derive(Debug)]
pub struct RecordWriter<W> {
    writer: W,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a byte sink.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the sink fails.
    pub fn write_record(&mut self, data: &[u8]) -> Result<()> {
        let length_bytes = (data.len() as u64).to_le_bytes();
        self.writer.write_all(&length_bytes)?;
        self.writer.write_all(&masked_crc32c(&length_bytes).to_le_bytes())?;
        self.writer.write_all(data)?;
        self.writer.write_all(&masked_crc32c(data).to_le_bytes())?;
        Ok(())
    }

    /// Flush the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the sink fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads records written by [`RecordWriter`], verifying both checksums.
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: R,
}

impl<R: Read> RecordReader<R> {
    /// Wrap a byte source.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    ///
    /// # Errors
    ///
    /// Returns `Error::TruncatedRecord` if the stream ends inside a record
    /// and `Error::CrcMismatch` if a checksum does not verify.
    pub fn read_record(&mut self) -> Result<Option<Vec<u8>>> {
        let mut length_bytes = [0u8; 8];
        match read_full(&mut self.reader, &mut length_bytes)? {
            0 => return Ok(None),
            8 => {}
            n => {
                return Err(Error::TruncatedRecord(format!(
                    "length header has {n} of 8 bytes"
                )))
            }
        }
        verify(&length_bytes, self.read_u32("length checksum")?)?;

        // Grow with the bytes actually present; the header alone never sizes
        // an allocation.
        let length = u64::from_le_bytes(length_bytes);
        let mut data = Vec::new();
        self.reader.by_ref().take(length).read_to_end(&mut data)?;
        if data.len() as u64 != length {
            return Err(Error::TruncatedRecord(format!(
                "payload has {} of {length} declared bytes",
                data.len()
            )));
        }
        verify(&data, self.read_u32("data checksum")?)?;
        Ok(Some(data))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        let mut buf = [0u8; 4];
        if read_full(&mut self.reader, &mut buf)? != 4 {
            return Err(Error::TruncatedRecord(format!("missing {what}")));
        }
        Ok(u32::from_le_bytes(buf))
    }
}

fn verify(data: &[u8], expected: u32) -> Result<()> {
    let actual = masked_crc32c(data);
    if actual == expected {
        Ok(())
    } else {
        Err(Error::CrcMismatch { expected, actual })
    }
}

/// Fill `buf` as far as the stream allows; returns bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
