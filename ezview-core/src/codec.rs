//! Byte-exact decoding and encoding of whole capture files.

use crate::container::header::{DATA_OFFSET, FileHeader, header_size_for};
use crate::container::magic::{MAGIC_LEN, check_magic, write_magic};
use crate::container::record::{RECORD_SIZE, Record};
use crate::error::{EzError, Result, Unsupported};
use crate::util::buf::le_u32;
use std::io::Write;
use std::iter::FusedIterator;
use std::slice::ChunksExact;

/// A decoded capture borrowing the input buffer.
#[derive(Debug, Clone, Copy)]
pub struct Capture<'a> {
    pub header: FileHeader,
    pub records: Records<'a>,
}

/// Lazily decoded view over the record region.
///
/// Cheap to copy; every call to [`Records::iter`] starts from the first
/// record again.
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    raw: &'a [u8],
}

impl<'a> Records<'a> {
    /// `raw` must be a whole number of records.
    pub(crate) fn from_validated(raw: &'a [u8]) -> Self {
        debug_assert_eq!(raw.len() % RECORD_SIZE, 0);
        Self { raw }
    }

    pub fn len(&self) -> usize {
        self.raw.len() / RECORD_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Record> {
        self.raw(index)?.try_into().ok().map(Record::from_array)
    }

    pub fn first(&self) -> Option<Record> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Record> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Raw bytes of record `index`.
    pub fn raw(&self, index: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(RECORD_SIZE)?;
        self.raw.get(start..start.checked_add(RECORD_SIZE)?)
    }

    pub fn iter(&self) -> RecordIter<'a> {
        RecordIter {
            chunks: self.raw.chunks_exact(RECORD_SIZE),
        }
    }

    pub fn to_vec(&self) -> Vec<Record> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for Records<'a> {
    type Item = Record;
    type IntoIter = RecordIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct RecordIter<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl Iterator for RecordIter<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.chunks
            .next()
            .and_then(|c| c.try_into().ok())
            .map(Record::from_array)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl DoubleEndedIterator for RecordIter<'_> {
    fn next_back(&mut self) -> Option<Record> {
        self.chunks
            .next_back()
            .and_then(|c| c.try_into().ok())
            .map(Record::from_array)
    }
}

impl ExactSizeIterator for RecordIter<'_> {}
impl FusedIterator for RecordIter<'_> {}

/// Validates `bytes` as a capture file and returns its header and records.
///
/// Checks run in file order: magic block, header length, version and layout
/// constants, then the record region length.
pub fn decode(bytes: &[u8]) -> Result<Capture<'_>> {
    check_magic(bytes)?;

    let header_size = le_u32(bytes, MAGIC_LEN).ok_or(EzError::TruncatedInput {
        have: bytes.len(),
        need: MAGIC_LEN + 4,
    })?;
    let header_end = MAGIC_LEN.saturating_add(header_size as usize);
    if bytes.len() < header_end {
        return Err(EzError::TruncatedInput {
            have: bytes.len(),
            need: header_end,
        });
    }

    // too short to even carry a version field
    if header_size < 8 {
        return Err(EzError::UnsupportedVersion(Unsupported::HeaderSize {
            version: None,
            have: header_size,
        }));
    }
    let header = FileHeader::parse(&bytes[MAGIC_LEN..header_end])?;

    let trailing = &bytes[header_end..];
    let expected = u64::from(header.record_count) * RECORD_SIZE as u64;
    if trailing.len() as u64 != expected {
        return Err(EzError::RecordCountMismatch {
            declared: header.record_count,
            trailing: trailing.len(),
        });
    }

    tracing::debug!(
        version = header.version,
        device = u32::from(header.device_type),
        records = header.record_count,
        "decoded capture"
    );
    Ok(Capture {
        header,
        records: Records::from_validated(trailing),
    })
}

/// Writes a complete capture.
///
/// `header_size`, `record_size` and `record_count` in `header` are ignored;
/// the layout constants and `records.len()` are written instead. A `version`
/// the decoder would not accept is rejected before anything is written.
pub fn write_to(mut w: impl Write, header: &FileHeader, records: &[Record]) -> Result<()> {
    let header_size = header_size_for(header.version)
        .ok_or(EzError::UnsupportedVersion(Unsupported::Version(header.version)))?;
    let record_count =
        u32::try_from(records.len()).map_err(|_| EzError::TooManyRecords(records.len()))?;
    let header = FileHeader {
        header_size,
        record_size: RECORD_SIZE as u32,
        record_count,
        ..*header
    };

    write_magic(&mut w)?;
    header.write_to(&mut w)?;
    for r in records {
        r.write_to(&mut w)?;
    }
    Ok(())
}

pub fn encode(header: &FileHeader, records: &[Record]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(DATA_OFFSET + records.len() * RECORD_SIZE);
    write_to(&mut out, header, records)?;
    tracing::debug!(records = records.len(), bytes = out.len(), "encoded capture");
    Ok(out)
}
