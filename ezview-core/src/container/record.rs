use crate::error::{EzError, Result};
use crate::event::EventType;
use crate::signals::{ControlSignals, Payload};
use std::io::Write;

pub const RECORD_SIZE: usize = 8;
/// Largest count the 40-bit elapsed-time field can hold.
pub const MAX_ELAPSED: u64 = (1 << 40) - 1;

/// One captured event.
///
/// Layout: `[0..4]=time_low`, `[4]=event`, `[5]=data`, `[6]=controls`,
/// `[7]=time_high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub time_low: u32,
    pub time_high: u8,
    pub event: EventType,
    pub data: u8,
    pub controls: ControlSignals,
}

impl Record {
    pub fn new(
        elapsed_ticks: u64,
        event: EventType,
        data: u8,
        controls: ControlSignals,
    ) -> Result<Self> {
        if elapsed_ticks > MAX_ELAPSED {
            return Err(EzError::ElapsedOutOfRange(elapsed_ticks));
        }
        Ok(Self {
            time_low: elapsed_ticks as u32,
            time_high: (elapsed_ticks >> 32) as u8,
            event,
            data,
            controls,
        })
    }

    /// Ticks since capture start, unit set by the header's device type.
    #[inline]
    pub fn elapsed_ticks(&self) -> u64 {
        (u64::from(self.time_high) << 32) | u64::from(self.time_low)
    }

    pub fn payload(&self) -> Payload {
        Payload::interpret(self.event, self.data)
    }

    pub fn from_array(b: &[u8; RECORD_SIZE]) -> Self {
        Self {
            time_low: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            event: EventType::from(b[4]),
            data: b[5],
            controls: ControlSignals::from_bits_retain(b[6]),
            time_high: b[7],
        }
    }

    pub fn to_array(&self) -> [u8; RECORD_SIZE] {
        let t = self.time_low.to_le_bytes();
        [
            t[0],
            t[1],
            t[2],
            t[3],
            self.event.code(),
            self.data,
            self.controls.bits(),
            self.time_high,
        ]
    }

    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        w.write_all(&self.to_array())
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.controls;
        write!(
            f,
            "t={} type={} data={} controls=0x{:02x} rts={} dtr={} cts={} dsr={} cd={} ri={}",
            self.elapsed_ticks(),
            self.event.label(),
            self.payload(),
            c.bits(),
            u8::from(c.contains(ControlSignals::RTS)),
            u8::from(c.contains(ControlSignals::DTR)),
            u8::from(c.contains(ControlSignals::CTS)),
            u8::from(c.contains(ControlSignals::DSR)),
            u8::from(c.contains(ControlSignals::DCD)),
            u8::from(c.contains(ControlSignals::RI)),
        )
    }
}
