//! sfnt header and table directory scanning.
//!
//! The file starts with a 12-byte offset table (version, table count and three
//! binary-search hints) followed by one 16-byte record per table.

use std::io::{Read, Seek};

use log::debug;
use read_fonts::types::Tag;

use crate::error::ParseError;
use crate::reader::FontReader;
use crate::tags::NAME_TAG;

/// Recognised sfnt version tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfntVersion {
    /// `0x00010000`, the standard TrueType / OpenType version.
    OpenType,
    /// `true`, Apple TrueType.
    AppleTrue,
    /// `OTTO`, CFF-flavoured OpenType.
    Cff,
}

impl SfntVersion {
    pub const OPEN_TYPE: u32 = 0x0001_0000;
    pub const APPLE_TRUE: u32 = 0x7472_7565;
    pub const CFF: u32 = 0x4F54_544F;

    pub fn from_u32(raw: u32) -> Option<Self> {
        match raw {
            Self::OPEN_TYPE => Some(SfntVersion::OpenType),
            Self::APPLE_TRUE => Some(SfntVersion::AppleTrue),
            Self::CFF => Some(SfntVersion::Cff),
            _ => None,
        }
    }
}

/// One entry of the table directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    /// Read but never verified.
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

/// The full table directory of a font, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDirectory {
    pub version: SfntVersion,
    pub records: Vec<TableRecord>,
}

impl TableDirectory {
    pub fn find(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.iter().find(|rec| rec.tag == tag)
    }
}

/// Result of looking for a single table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLookup {
    /// The version tag is not one of the recognised sfnt magics.
    NotAFont,
    /// A font, but the directory has no such table.
    Missing,
    Found(TableRecord),
}

impl TableLookup {
    pub fn found(self) -> Option<TableRecord> {
        match self {
            TableLookup::Found(rec) => Some(rec),
            TableLookup::NotAFont | TableLookup::Missing => None,
        }
    }
}

/// Read the offset table; `None` when the version is not a recognised magic.
///
/// Only the 4 version bytes are consumed for unrecognised input.
fn read_offset_table<R: Read + Seek>(
    reader: &mut FontReader<R>,
) -> Result<Option<(SfntVersion, u16)>, ParseError> {
    let raw_version = reader.read_u32_be()?;
    let Some(version) = SfntVersion::from_u32(raw_version) else {
        debug!(
            "unrecognised sfnt version {raw_version:#010x}, stopped at byte {}",
            reader.position()
        );
        return Ok(None);
    };

    let num_tables = reader.read_u16_be()?;
    let _search_range = reader.read_u16_be()?;
    let _entry_selector = reader.read_u16_be()?;
    let _range_shift = reader.read_u16_be()?;

    Ok(Some((version, num_tables)))
}

fn read_table_record<R: Read + Seek>(
    reader: &mut FontReader<R>,
) -> Result<TableRecord, ParseError> {
    let tag = Tag::from_be_bytes(reader.read_u32_be()?.to_be_bytes());
    let checksum = reader.read_u32_be()?;
    let offset = reader.read_u32_be()?;
    let length = reader.read_u32_be()?;

    Ok(TableRecord {
        tag,
        checksum,
        offset,
        length,
    })
}

/// Scan the directory for `tag`, stopping at the first match.
pub fn find_table<R: Read + Seek>(
    reader: &mut FontReader<R>,
    tag: Tag,
) -> Result<TableLookup, ParseError> {
    let Some((_, num_tables)) = read_offset_table(reader)? else {
        return Ok(TableLookup::NotAFont);
    };

    for _ in 0..num_tables {
        let record = read_table_record(reader)?;
        if record.tag == tag {
            return Ok(TableLookup::Found(record));
        }
    }

    Ok(TableLookup::Missing)
}

/// Locate the `name` table; `Ok(None)` for non-fonts and fonts without one.
pub fn locate_name_table<R: Read + Seek>(
    reader: &mut FontReader<R>,
) -> Result<Option<TableRecord>, ParseError> {
    find_table(reader, NAME_TAG).map(TableLookup::found)
}

/// Read every directory entry; `Ok(None)` when the input is not a font.
pub fn read_table_directory<R: Read + Seek>(
    reader: &mut FontReader<R>,
) -> Result<Option<TableDirectory>, ParseError> {
    let Some((version, num_tables)) = read_offset_table(reader)? else {
        return Ok(None);
    };

    let mut records = Vec::with_capacity(usize::from(num_tables));
    for _ in 0..num_tables {
        records.push(read_table_record(reader)?);
    }

    Ok(Some(TableDirectory { version, records }))
}
