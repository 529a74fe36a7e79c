//! In-memory builders for synthetic sfnt fonts used across the tests.
#![allow(dead_code)]

use std::io::{self, Read, Seek, SeekFrom};

pub const OPEN_TYPE: u32 = 0x0001_0000;
pub const APPLE_TRUE: u32 = 0x7472_7565;
pub const OTTO: u32 = 0x4F54_544F;

pub const MAC: u16 = 1;
pub const ISO: u16 = 2;
pub const WINDOWS: u16 = 3;

/// Builds a `name` table from `(platform, name_id, bytes)` records.
///
/// A padding byte follows the string pool unless `unpadded` is called, so
/// the last string does not end exactly at the table end.
#[derive(Debug, Clone, Default)]
pub struct NameTableBuilder {
    records: Vec<(u16, u16, Vec<u8>)>,
    padded: bool,
}

impl NameTableBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            padded: true,
        }
    }

    pub fn mac(self, name_id: u16, text: &str) -> Self {
        self.raw(MAC, name_id, text.as_bytes().to_vec())
    }

    pub fn windows(self, name_id: u16, text: &str) -> Self {
        self.raw(WINDOWS, name_id, utf16_be(text))
    }

    pub fn iso(self, name_id: u16, text: &str) -> Self {
        self.raw(ISO, name_id, text.as_bytes().to_vec())
    }

    pub fn raw(mut self, platform: u16, name_id: u16, bytes: Vec<u8>) -> Self {
        self.records.push((platform, name_id, bytes));
        self
    }

    pub fn unpadded(mut self) -> Self {
        self.padded = false;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let storage = 6 + self.records.len() * 12;
        let mut out = Vec::new();
        let mut pool = Vec::new();

        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&(self.records.len() as u16).to_be_bytes());
        out.extend_from_slice(&(storage as u16).to_be_bytes());
        for (platform, name_id, bytes) in &self.records {
            let fields = [
                *platform,
                0,
                0,
                *name_id,
                bytes.len() as u16,
                pool.len() as u16,
            ];
            for field in fields {
                out.extend_from_slice(&field.to_be_bytes());
            }
            pool.extend_from_slice(bytes);
        }
        out.extend(pool);
        if self.padded {
            out.push(0);
        }
        out
    }
}

/// Builds a whole font: offset table, directory and 4-byte aligned table data.
#[derive(Debug, Clone)]
pub struct FontBuilder {
    version: u32,
    tables: Vec<([u8; 4], Vec<u8>)>,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self {
            version: OPEN_TYPE,
            tables: Vec::new(),
        }
    }
}

impl FontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn table(mut self, tag: &[u8; 4], data: Vec<u8>) -> Self {
        self.tables.push((*tag, data));
        self
    }

    pub fn name(self, table: NameTableBuilder) -> Self {
        self.table(b"name", table.build())
    }

    pub fn build(&self) -> Vec<u8> {
        let header_len = 12 + 16 * self.tables.len();
        let mut out = Vec::new();
        let mut body = Vec::new();

        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(&(self.tables.len() as u16).to_be_bytes());
        out.extend_from_slice(&[0; 6]);
        for (tag, data) in &self.tables {
            let offset = header_len + body.len();
            out.extend_from_slice(tag);
            out.extend_from_slice(&0u32.to_be_bytes());
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            out.extend_from_slice(&(data.len() as u32).to_be_bytes());
            body.extend_from_slice(data);
            while body.len() % 4 != 0 {
                body.push(0);
            }
        }
        out.extend(body);
        out
    }
}

pub fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// Offset of the directory record for table `index`.
pub fn record_offset(index: usize) -> usize {
    12 + 16 * index
}

/// Seekable reader that counts how many bytes were consumed.
#[derive(Debug)]
pub struct CountingReader<R> {
    inner: R,
    pub bytes_read: u64,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for CountingReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
