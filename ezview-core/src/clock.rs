//! Wall-clock anchors and record time reconstruction.
//!
//! Header timestamps are Win32 FILETIME values: 100 ns ticks since
//! 1601-01-01 UTC. Record times are 40-bit tick counts relative to
//! `capture_start`, in the unit of the capturing device.

use crate::container::header::FileHeader;
use crate::container::record::Record;
use crate::device::TickUnit;
use crate::error::{EzError, Result};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const FILETIME_EPOCH: OffsetDateTime = datetime!(1601-01-01 0:00 UTC);
const TICKS_PER_SEC: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileTime(pub u64);

impl FileTime {
    pub const UNSET: FileTime = FileTime(0);

    /// Zero is what the vendor software writes when it has no anchor.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }

    pub fn to_datetime(self) -> Result<OffsetDateTime> {
        let secs =
            i64::try_from(self.0 / TICKS_PER_SEC).map_err(|_| EzError::TimestampOutOfRange)?;
        let nanos = ((self.0 % TICKS_PER_SEC) * 100) as i32;
        FILETIME_EPOCH
            .checked_add(Duration::new(secs, nanos))
            .ok_or(EzError::TimestampOutOfRange)
    }

    pub fn from_datetime(dt: OffsetDateTime) -> Result<Self> {
        let nanos = (dt - FILETIME_EPOCH).whole_nanoseconds();
        if nanos < 0 {
            return Err(EzError::TimestampOutOfRange);
        }
        u64::try_from(nanos / 100)
            .map(FileTime)
            .map_err(|_| EzError::TimestampOutOfRange)
    }

    pub fn checked_add_ticks(self, ticks: u64) -> Option<Self> {
        self.0.checked_add(ticks).map(FileTime)
    }

    /// Signed distance `self - earlier`.
    pub fn since(self, earlier: FileTime) -> Duration {
        ticks_to_duration(i128::from(self.0) - i128::from(earlier.0))
    }
}

fn ticks_to_duration(ticks: i128) -> Duration {
    let per_sec = i128::from(TICKS_PER_SEC);
    // |ticks| < 2^64, so whole seconds always fit in i64.
    let secs = i64::try_from(ticks.div_euclid(per_sec)).unwrap_or(i64::MAX);
    let nanos = (ticks.rem_euclid(per_sec) * 100) as i32;
    Duration::new(secs, nanos)
}

/// Absolute time of `record`, using the tick unit of the header's device.
pub fn derive_timestamp(header: &FileHeader, record: &Record) -> Result<FileTime> {
    let unit = header
        .device_type
        .tick_unit()
        .ok_or(EzError::UnknownDeviceType(u32::from(header.device_type)))?;
    derive_timestamp_with(header, record, unit)
}

/// Like [`derive_timestamp`] with an explicit unit, for captures whose
/// device type is not recognised.
pub fn derive_timestamp_with(
    header: &FileHeader,
    record: &Record,
    unit: TickUnit,
) -> Result<FileTime> {
    record
        .elapsed_ticks()
        .checked_mul(unit.filetime_ticks())
        .and_then(|t| header.capture_start.checked_add_ticks(t))
        .ok_or(EzError::TimestampOutOfRange)
}

/// Relative clock as the vendor viewer presents it.
///
/// The first record's own counter rarely starts at zero, so the viewer shifts
/// every record by `(first_record - capture_start) - elapsed(first)`. A record
/// therefore reads as its distance from `capture_start` measured through the
/// `first_record` anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayClock {
    unit: TickUnit,
    offset: Duration,
}

impl DisplayClock {
    pub fn new(header: &FileHeader, first: Option<&Record>, unit: TickUnit) -> Self {
        let first_elapsed = first
            .map(|r| unit.to_duration(r.elapsed_ticks()))
            .unwrap_or(Duration::ZERO);
        let offset = header.first_record.since(header.capture_start) - first_elapsed;
        Self { unit, offset }
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn unit(&self) -> TickUnit {
        self.unit
    }

    pub fn relative(&self, record: &Record) -> Duration {
        self.unit.to_duration(record.elapsed_ticks()) + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceType;
    use crate::event::EventType;
    use crate::signals::ControlSignals;

    fn rec(ticks: u64) -> Record {
        Record::new(ticks, EventType::DteDataTx, 0, ControlSignals::empty()).unwrap()
    }

    fn header(device: DeviceType, start: u64, first: u64) -> FileHeader {
        FileHeader::new(device, FileTime(start), FileTime(first))
    }

    #[test]
    fn filetime_epoch_and_unix_epoch() {
        assert_eq!(FileTime(0).to_datetime().unwrap(), FILETIME_EPOCH);
        let unix = FileTime(116_444_736_000_000_000).to_datetime().unwrap();
        assert_eq!(unix, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(
            FileTime::from_datetime(OffsetDateTime::UNIX_EPOCH).unwrap(),
            FileTime(116_444_736_000_000_000)
        );
    }

    #[test]
    fn filetime_keeps_sub_second_ticks() {
        let ft = FileTime(133_000_000_000_000_123);
        let dt = ft.to_datetime().unwrap();
        assert_eq!(dt.nanosecond() % 1_000, 300);
        assert_eq!(FileTime::from_datetime(dt).unwrap(), ft);
    }

    #[test]
    fn before_epoch_is_out_of_range() {
        let dt = datetime!(1600-12-31 23:59 UTC);
        assert!(matches!(FileTime::from_datetime(dt), Err(EzError::TimestampOutOfRange)));
    }

    #[test]
    fn derive_micros() {
        let t0 = 133_100_000_000_000_000;
        let h = header(DeviceType::EzTapPro, t0, t0);
        let got = derive_timestamp(&h, &rec(5000)).unwrap();
        assert_eq!(got.since(FileTime(t0)), Duration::microseconds(5000));
    }

    #[test]
    fn derive_tenth_millis_uses_high_byte() {
        let h = header(DeviceType::EzTap, 0, 0);
        let got = derive_timestamp(&h, &rec((1 << 32) + 1)).unwrap();
        assert_eq!(got, FileTime(((1u64 << 32) + 1) * 1_000));
    }

    #[test]
    fn derive_unknown_device() {
        let h = header(DeviceType::Other(9), 0, 0);
        assert!(matches!(
            derive_timestamp(&h, &rec(1)),
            Err(EzError::UnknownDeviceType(9))
        ));
        let got = derive_timestamp_with(&h, &rec(1), TickUnit::Micros).unwrap();
        assert_eq!(got, FileTime(10));
    }

    #[test]
    fn derive_overflow() {
        let h = header(DeviceType::EzTap, u64::MAX - 5, 0);
        assert!(matches!(
            derive_timestamp(&h, &rec(1)),
            Err(EzError::TimestampOutOfRange)
        ));
    }

    #[test]
    fn since_is_signed() {
        assert_eq!(FileTime(0).since(FileTime(15)), Duration::nanoseconds(-1500));
        assert_eq!(FileTime(10_000_005).since(FileTime(0)), Duration::new(1, 500));
    }

    #[test]
    fn display_clock_with_unset_anchors() {
        // Both anchors zero and a first counter of 973476 (0.1 ms units).
        let h = header(DeviceType::EzTap, 0, 0);
        let first = rec(973_476);
        let clock = DisplayClock::new(&h, Some(&first), TickUnit::TenthMillis);
        assert_eq!(clock.offset(), -Duration::microseconds(97_347_600));
        assert_eq!(clock.relative(&first), Duration::ZERO);
        assert_eq!(clock.relative(&rec(973_477)), Duration::microseconds(100));
    }

    #[test]
    fn display_clock_follows_first_anchor() {
        let h = header(DeviceType::EzTapPro, 1_000_000_000, 1_000_000_000 + 20_000);
        let first = rec(500);
        let clock = DisplayClock::new(&h, Some(&first), TickUnit::Micros);
        assert_eq!(clock.relative(&first), Duration::milliseconds(2));
        assert_eq!(clock.relative(&rec(1500)), Duration::milliseconds(3));
    }

    #[test]
    fn display_clock_without_records() {
        let h = header(DeviceType::EzTap, 0, 0);
        let clock = DisplayClock::new(&h, None, TickUnit::TenthMillis);
        assert_eq!(clock.offset(), Duration::ZERO);
    }
}
