use super::opened::CaptureFile;
use crate::container::header::FileHeader;
use crate::error::EzError;
use crate::stats::Stats;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Summary {
    pub header: FileHeader,
    pub stats: Stats,
}

#[derive(Debug)]
pub struct CheckReport {
    pub path: PathBuf,
    pub outcome: Result<Summary, EzError>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn check_path(path: &Path) -> Result<Summary, EzError> {
    let f = CaptureFile::open(path)?;
    Ok(Summary {
        header: *f.header(),
        stats: f.stats(),
    })
}

/// Validates every path independently; reports come back in input order.
pub fn check_paths(paths: &[PathBuf]) -> Vec<CheckReport> {
    paths
        .par_iter() // In parallel, each file independent
        .map(|p| {
            let outcome = check_path(p);
            if let Err(e) = &outcome {
                tracing::warn!(path = %p.display(), error = %e, "capture failed validation");
            }
            CheckReport {
                path: p.clone(),
                outcome,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FileTime;
    use crate::codec::encode;
    use crate::device::DeviceType;

    #[test]
    fn mixed_inputs_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let h = FileHeader::new(DeviceType::EzTap, FileTime::UNSET, FileTime::UNSET);
        let good = encode(&h, &[]).unwrap();

        let mut paths = Vec::new();
        for i in 0..8 {
            let p = dir.path().join(format!("{i}.dat"));
            if i % 3 == 0 {
                std::fs::write(&p, b"EZView1").unwrap();
            } else {
                std::fs::write(&p, &good).unwrap();
            }
            paths.push(p);
        }

        let reports = check_paths(&paths);
        assert_eq!(reports.len(), 8);
        for (i, r) in reports.iter().enumerate() {
            assert_eq!(r.path, paths[i]);
            assert_eq!(r.is_ok(), i % 3 != 0, "report {i}");
        }
    }
}
