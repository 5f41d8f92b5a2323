use crate::codec::{Records, decode};
use crate::container::header::{DATA_OFFSET, FileHeader};
use crate::error::Result;
use crate::stats::Stats;
use std::path::Path;

/// A capture loaded into memory and validated once.
#[derive(Debug, Clone)]
pub struct CaptureFile {
    bytes: Vec<u8>,
    header: FileHeader,
}

impl CaptureFile {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "read capture");
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let header = decode(&bytes)?.header;
        Ok(Self { bytes, header })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn records(&self) -> Records<'_> {
        // decode() accepted exactly record_count records after DATA_OFFSET
        Records::from_validated(&self.bytes[DATA_OFFSET..])
    }

    pub fn stats(&self) -> Stats {
        Stats::collect(self.records())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FileTime;
    use crate::codec::encode;
    use crate::container::record::Record;
    use crate::device::DeviceType;
    use crate::error::EzError;
    use crate::event::EventType;
    use crate::signals::ControlSignals;

    #[test]
    fn open_reads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cap.dat");
        let h = FileHeader::new(DeviceType::EzTapPro, FileTime(1), FileTime(2));
        let rs = vec![Record::new(7, EventType::DceDataTx, b'x', ControlSignals::CTS).unwrap()];
        std::fs::write(&path, encode(&h, &rs).unwrap()).unwrap();

        let f = CaptureFile::open(&path).unwrap();
        assert_eq!(f.header().record_count, 1);
        assert_eq!(f.records().to_vec(), rs);
        assert_eq!(f.stats().records, 1);
    }

    #[test]
    fn open_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = CaptureFile::open(&dir.path().join("nope.dat")).unwrap_err();
        assert!(matches!(err, EzError::Io(_)));
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = CaptureFile::from_bytes(b"not a capture".to_vec()).unwrap_err();
        assert!(matches!(err, EzError::TruncatedInput { .. }));
    }
}
