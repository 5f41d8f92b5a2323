#![forbid(unsafe_code)]

pub mod error;

pub mod util {
    pub mod buf;
}

pub mod container {
    pub mod header;
    pub mod magic;
    pub mod record;
}

pub mod clock;
pub mod codec;
pub mod device;
pub mod event;
pub mod signals;
pub mod stats;

pub mod read {
    pub mod check;
    pub mod opened;
}

pub mod write;

// Re-exports: stable API surface
pub use clock::{DisplayClock, FileTime, derive_timestamp, derive_timestamp_with};
pub use codec::{Capture, Records, decode, encode};
pub use container::header::FileHeader;
pub use container::record::Record;
pub use device::{DeviceType, TickUnit};
pub use error::{EzError, Result};
pub use event::EventType;
pub use read::opened::CaptureFile;
pub use signals::{ControlSignals, DceLines, DteLines, LineErrors, Payload};
pub use write::write_capture;
