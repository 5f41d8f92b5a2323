//! Capturing hardware and the tick unit it stamps records with.

use std::hash::{Hash, Hasher};
use time::Duration;

/// Record tick duration. Values are expressed in FILETIME ticks (100 ns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickUnit {
    /// 0.1 ms per tick (EZ-Tap).
    TenthMillis,
    /// 1 µs per tick (EZ-Tap Pro / EZ-Tap Plus).
    Micros,
}

impl TickUnit {
    /// Number of 100 ns FILETIME ticks in one record tick.
    pub const fn filetime_ticks(self) -> u64 {
        match self {
            TickUnit::TenthMillis => 1_000,
            TickUnit::Micros => 10,
        }
    }

    pub fn to_duration(self, ticks: u64) -> Duration {
        // 40-bit counts times 100 µs stay far below i64::MAX µs.
        let micros = ticks.saturating_mul(self.filetime_ticks() / 10);
        Duration::microseconds(i64::try_from(micros).unwrap_or(i64::MAX))
    }
}

/// Equality and hashing follow the raw header code, so `Other(1)` is the
/// same device as `EzTapPro`.
#[derive(Debug, Clone, Copy)]
pub enum DeviceType {
    EzTap,
    EzTapPro,
    Other(u32),
}

impl DeviceType {
    pub fn tick_unit(self) -> Option<TickUnit> {
        match self.canonical() {
            DeviceType::EzTap => Some(TickUnit::TenthMillis),
            DeviceType::EzTapPro => Some(TickUnit::Micros),
            DeviceType::Other(_) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self.canonical() {
            DeviceType::EzTap => "EZ-Tap",
            DeviceType::EzTapPro => "EZ-Tap Pro",
            DeviceType::Other(_) => "unknown",
        }
    }

    /// The variant a decoder would produce for this device's raw code.
    pub fn canonical(self) -> Self {
        DeviceType::from(u32::from(self))
    }
}

impl PartialEq for DeviceType {
    fn eq(&self, other: &Self) -> bool {
        u32::from(*self) == u32::from(*other)
    }
}

impl Eq for DeviceType {}

impl Hash for DeviceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        u32::from(*self).hash(state);
    }
}

impl From<u32> for DeviceType {
    fn from(raw: u32) -> Self {
        match raw {
            0 => DeviceType::EzTap,
            1 => DeviceType::EzTapPro,
            other => DeviceType::Other(other),
        }
    }
}

impl From<DeviceType> for u32 {
    fn from(d: DeviceType) -> u32 {
        match d {
            DeviceType::EzTap => 0,
            DeviceType::EzTapPro => 1,
            DeviceType::Other(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_codes_map_to_units() {
        assert_eq!(DeviceType::from(0).tick_unit(), Some(TickUnit::TenthMillis));
        assert_eq!(DeviceType::from(1).tick_unit(), Some(TickUnit::Micros));
        assert_eq!(DeviceType::from(7), DeviceType::Other(7));
        assert_eq!(DeviceType::from(7).tick_unit(), None);
        assert_eq!(u32::from(DeviceType::Other(7)), 7);
    }

    #[test]
    fn tick_durations() {
        assert_eq!(TickUnit::TenthMillis.to_duration(3), Duration::microseconds(300));
        assert_eq!(TickUnit::Micros.to_duration(5000), Duration::milliseconds(5));
        assert_eq!(TickUnit::Micros.filetime_ticks(), 10);
    }

    #[test]
    fn other_with_known_code_is_that_device() {
        assert_eq!(DeviceType::Other(1), DeviceType::EzTapPro);
        assert_eq!(DeviceType::Other(0).tick_unit(), Some(TickUnit::TenthMillis));
        assert_eq!(DeviceType::Other(1).name(), "EZ-Tap Pro");
        assert!(matches!(DeviceType::Other(0).canonical(), DeviceType::EzTap));
        assert_ne!(DeviceType::Other(2), DeviceType::Other(3));
    }
}
