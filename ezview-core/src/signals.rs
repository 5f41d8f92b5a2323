//! Bit meanings of the packed `data` and `controls` record bytes.

use crate::event::EventType;

bitflags::bitflags! {
    /// Line states sampled with every record, 1 = active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ControlSignals: u8 {
        const RTS = 0b0000_0001;
        const DTR = 0b0000_0010;
        const CTS = 0b0000_0100;
        const DSR = 0b0000_1000;
        const DCD = 0b0001_0000;
        const RI  = 0b0010_0000;
    }
}

bitflags::bitflags! {
    /// Status byte of an error/break record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LineErrors: u8 {
        const DTE_BREAK   = 0b0000_0001;
        const DTE_PARITY  = 0b0000_0010;
        const DTE_FRAMING = 0b0000_0100;
        const DCE_BREAK   = 0b0000_1000;
        const DCE_PARITY  = 0b0001_0000;
        const DCE_FRAMING = 0b0010_0000;
    }
}

bitflags::bitflags! {
    /// Status byte of a DTE handshake change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DteLines: u8 {
        const RTS = 0b0000_0001;
        const DTR = 0b0000_0010;
    }
}

bitflags::bitflags! {
    /// Status byte of a DCE handshake change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DceLines: u8 {
        const CTS = 0b0000_0001;
        const DSR = 0b0000_0010;
        const CD  = 0b0000_0100;
        const RI  = 0b0000_1000;
    }
}

/// The `data` byte of a record, read according to its event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Undefined(u8),
    DteData(u8),
    DceData(u8),
    Errors(LineErrors),
    DteHandshake(DteLines),
    DceHandshake(DceLines),
    Unknown { event: u8, raw: u8 },
}

impl Payload {
    pub fn interpret(event: EventType, raw: u8) -> Self {
        match event.canonical() {
            EventType::Undefined => Payload::Undefined(raw),
            EventType::DteDataTx => Payload::DteData(raw),
            EventType::DceDataTx => Payload::DceData(raw),
            EventType::ErrorOrBreak => Payload::Errors(LineErrors::from_bits_retain(raw)),
            EventType::DteHandshakeChange => Payload::DteHandshake(DteLines::from_bits_retain(raw)),
            EventType::DceHandshakeChange => Payload::DceHandshake(DceLines::from_bits_retain(raw)),
            EventType::Unknown(event) => Payload::Unknown { event, raw },
        }
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Undefined(b) | Payload::Unknown { raw: b, .. } => write!(f, "0x{b:02x}"),
            Payload::DteData(b) | Payload::DceData(b) => {
                if b.is_ascii_graphic() || *b == b' ' {
                    write!(f, "0x{b:02x} '{}'", *b as char)
                } else {
                    write!(f, "0x{b:02x}")
                }
            }
            Payload::Errors(e) => write_flags(f, e.iter_names()),
            Payload::DteHandshake(l) => write_flags(f, l.iter_names()),
            Payload::DceHandshake(l) => write_flags(f, l.iter_names()),
        }
    }
}

fn write_flags<'a, T>(
    f: &mut std::fmt::Formatter<'_>,
    names: impl Iterator<Item = (&'a str, T)>,
) -> std::fmt::Result {
    let names: Vec<&str> = names.map(|(n, _)| n).collect();
    if names.is_empty() {
        f.write_str("-")
    } else {
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_bits_depend_on_side() {
        match Payload::interpret(EventType::DteHandshakeChange, 0b11) {
            Payload::DteHandshake(l) => assert_eq!(l, DteLines::RTS | DteLines::DTR),
            other => panic!("unexpected: {other:?}"),
        }
        match Payload::interpret(EventType::DceHandshakeChange, 0b1100) {
            Payload::DceHandshake(l) => assert_eq!(l, DceLines::CD | DceLines::RI),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn error_bits() {
        let p = Payload::interpret(EventType::ErrorOrBreak, 0b10_0001);
        assert_eq!(
            p,
            Payload::Errors(LineErrors::DTE_BREAK | LineErrors::DCE_FRAMING)
        );
        assert_eq!(p.to_string(), "DTE_BREAK|DCE_FRAMING");
    }

    #[test]
    fn unknown_with_error_code_reads_as_errors() {
        assert!(matches!(
            Payload::interpret(EventType::Unknown(3), 0x01),
            Payload::Errors(_)
        ));
    }

    #[test]
    fn undocumented_control_bits_are_kept() {
        let c = ControlSignals::from_bits_retain(0xc1);
        assert!(c.contains(ControlSignals::RTS));
        assert_eq!(c.bits(), 0xc1);
    }

    #[test]
    fn data_display() {
        assert_eq!(Payload::DteData(b'A').to_string(), "0x41 'A'");
        assert_eq!(Payload::DceData(0x0d).to_string(), "0x0d");
        assert_eq!(Payload::Unknown { event: 9, raw: 1 }.to_string(), "0x01");
    }
}
