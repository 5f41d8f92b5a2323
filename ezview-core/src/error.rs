use thiserror::Error;

/// Why a header was refused as an unknown layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    Version(u32),
    HeaderSize { version: Option<u32>, have: u32 },
    RecordSize { have: u32, need: u32 },
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unsupported::Version(v) => write!(f, "version {v}"),
            Unsupported::HeaderSize {
                version: Some(v),
                have,
            } => write!(f, "header size {have} for version {v}"),
            Unsupported::HeaderSize {
                version: None,
                have,
            } => write!(f, "header size {have}"),
            Unsupported::RecordSize { have, need } => {
                write!(f, "record size {have} (expected {need})")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum EzError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated input: have {have} bytes, need {need}")]
    TruncatedInput { have: usize, need: usize },

    #[error("bad magic block: {found}")]
    BadMagic { found: String },

    #[error("unsupported layout: {0}")]
    UnsupportedVersion(Unsupported),

    #[error("record count mismatch: header declares {declared} records, {trailing} bytes follow")]
    RecordCountMismatch { declared: u32, trailing: usize },

    #[error("unknown device type {0}: tick unit not known")]
    UnknownDeviceType(u32),

    #[error("timestamp out of range")]
    TimestampOutOfRange,

    #[error("elapsed tick count {0} does not fit in 40 bits")]
    ElapsedOutOfRange(u64),

    #[error("too many records for one file: {0}")]
    TooManyRecords(usize),

    #[error("Format error: {0}")]
    Format(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, EzError>;
