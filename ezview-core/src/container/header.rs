use super::magic::MAGIC_LEN;
use super::record::RECORD_SIZE;
use crate::clock::FileTime;
use crate::device::DeviceType;
use crate::error::{EzError, Result, Unsupported};
use crate::util::buf::{le_u32, le_u64};
use std::io::Write;

pub const VERSION_1: u32 = 1;
/// Five u32 fields (the size field counts itself) and two FILETIMEs.
pub const HEADER_SIZE_V1: u32 = 36;
/// Absolute offset of the first record in a version 1 file.
pub const DATA_OFFSET: usize = MAGIC_LEN + HEADER_SIZE_V1 as usize;

/// Header length the given version is laid out with, if known.
pub fn header_size_for(version: u32) -> Option<u32> {
    match version {
        VERSION_1 => Some(HEADER_SIZE_V1),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub header_size: u32,
    pub version: u32,
    pub device_type: DeviceType,
    pub record_count: u32,
    pub record_size: u32,
    /// Session start; record times count from here.
    pub capture_start: FileTime,
    /// Wall-clock time of the first record.
    pub first_record: FileTime,
}

impl FileHeader {
    pub fn new(device_type: DeviceType, capture_start: FileTime, first_record: FileTime) -> Self {
        Self {
            header_size: HEADER_SIZE_V1,
            version: VERSION_1,
            device_type,
            record_count: 0,
            record_size: RECORD_SIZE as u32,
            capture_start,
            first_record,
        }
    }

    /// Writes the header fields exactly as stored in `self`.
    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        w.write_all(&self.header_size.to_le_bytes())?;
        w.write_all(&self.version.to_le_bytes())?;
        w.write_all(&u32::from(self.device_type).to_le_bytes())?;
        w.write_all(&self.record_count.to_le_bytes())?;
        w.write_all(&self.record_size.to_le_bytes())?;
        w.write_all(&self.capture_start.0.to_le_bytes())?;
        w.write_all(&self.first_record.0.to_le_bytes())?;
        Ok(())
    }

    /// Parses the header block that follows the magic block.
    ///
    /// `block` must be exactly `header_size` bytes, as declared by its own
    /// first field.
    pub fn parse(block: &[u8]) -> Result<Self> {
        let short = || EzError::TruncatedInput {
            have: MAGIC_LEN + block.len(),
            need: DATA_OFFSET,
        };
        let header_size = le_u32(block, 0).ok_or_else(short)?;
        // Layout: [0]=size, [4]=version, [8]=device, [12]=count, [16]=rec size,
        // [20]=capture start, [28]=first record
        let version = le_u32(block, 4).ok_or(EzError::UnsupportedVersion(
            Unsupported::HeaderSize {
                version: None,
                have: header_size,
            },
        ))?;
        let expected = header_size_for(version)
            .ok_or(EzError::UnsupportedVersion(Unsupported::Version(version)))?;
        if header_size != expected || block.len() != expected as usize {
            return Err(EzError::UnsupportedVersion(Unsupported::HeaderSize {
                version: Some(version),
                have: header_size,
            }));
        }

        let device_type = DeviceType::from(le_u32(block, 8).ok_or_else(short)?);
        let record_count = le_u32(block, 12).ok_or_else(short)?;
        let record_size = le_u32(block, 16).ok_or_else(short)?;
        if record_size != RECORD_SIZE as u32 {
            return Err(EzError::UnsupportedVersion(Unsupported::RecordSize {
                have: record_size,
                need: RECORD_SIZE as u32,
            }));
        }
        let capture_start = FileTime(le_u64(block, 20).ok_or_else(short)?);
        let first_record = FileTime(le_u64(block, 28).ok_or_else(short)?);

        Ok(Self {
            header_size,
            version,
            device_type,
            record_count,
            record_size,
            capture_start,
            first_record,
        })
    }
}
