use crate::codec::write_to;
use crate::container::header::FileHeader;
use crate::container::record::Record;
use crate::error::Result;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Encodes a capture and atomically replaces `out` with it.
///
/// The bytes go to a temporary file next to `out` first, so readers never see
/// a half-written capture.
pub fn write_capture(out: &Path, header: &FileHeader, records: &[Record]) -> Result<()> {
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file());
        write_to(&mut w, header, records)?;
        w.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(out).map_err(|e| e.error)?;
    tracing::debug!(path = %out.display(), records = records.len(), "wrote capture");
    Ok(())
}
