//! Big-endian primitive readers over a seekable byte stream.

use std::fmt;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};

use crate::error::ParseError;

/// Parse context for a single extraction call.
///
/// Owns the cursor over the caller's stream for the duration of one parse and
/// is dropped afterwards; nothing is retained between calls.
pub struct FontReader<R> {
    inner: R,
    position: u64,
}

impl<R> fmt::Debug for FontReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontReader")
            .field("position", &self.position)
            .finish()
    }
}

impl<R: Read + Seek> FontReader<R> {
    /// Wrap a stream positioned at the start of a candidate font.
    pub fn new(mut inner: R) -> Result<Self, ParseError> {
        let position = inner.stream_position()?;
        Ok(Self { inner, position })
    }

    /// Current absolute cursor position.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16, ParseError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, ParseError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u32(&buf))
    }

    /// Fill `buf` completely, or fail with [`ParseError::Truncated`].
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ParseError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        self.position += filled as u64;

        if filled < buf.len() {
            return Err(ParseError::Truncated {
                needed: buf.len() as u64,
                available: filled as u64,
            });
        }
        Ok(())
    }

    /// Move the cursor to `offset` bytes from the start of the stream.
    pub fn seek_absolute(&mut self, offset: u64) -> Result<(), ParseError> {
        self.position = self
            .inner
            .seek(SeekFrom::Start(offset))
            .map_err(|_| ParseError::SeekFailed { offset })?;
        Ok(())
    }

    /// Total length of the underlying stream; the cursor is left where it was.
    pub fn stream_len(&mut self) -> Result<u64, ParseError> {
        let here = self.position;
        let end = self
            .inner
            .seek(SeekFrom::End(0))
            .map_err(|_| ParseError::SeekFailed { offset: here })?;
        self.seek_absolute(here)?;
        Ok(end)
    }
}

/// Read a big-endian u16 from `buf` at `offset`.
///
/// Out-of-range access is reported as [`ParseError::Malformed`].
pub fn get_u16_be(buf: &[u8], offset: usize) -> Result<u16, ParseError> {
    offset
        .checked_add(2)
        .and_then(|end| buf.get(offset..end))
        .map(BigEndian::read_u16)
        .ok_or_else(|| ParseError::out_of_bounds("u16 field", offset, buf.len()))
}
