use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Event code carried in byte 4 of every record.
///
/// Codes past the documented range decode to `Unknown` and encode back to the
/// same byte, so newer captures pass through untouched.
///
/// Equality, hashing and ordering follow [`EventType::code`], so a
/// hand-built `Unknown(3)` is the same event as `ErrorOrBreak`.
#[derive(Debug, Clone, Copy)]
pub enum EventType {
    Undefined,
    DteDataTx,
    DceDataTx,
    ErrorOrBreak,
    DteHandshakeChange,
    DceHandshakeChange,
    Unknown(u8),
}

impl EventType {
    pub const fn code(self) -> u8 {
        match self {
            EventType::Undefined => 0,
            EventType::DteDataTx => 1,
            EventType::DceDataTx => 2,
            EventType::ErrorOrBreak => 3,
            EventType::DteHandshakeChange => 4,
            EventType::DceHandshakeChange => 5,
            EventType::Unknown(code) => code,
        }
    }

    /// The variant a decoder would produce for this event's code.
    pub fn canonical(self) -> Self {
        EventType::from(self.code())
    }

    pub fn is_data(self) -> bool {
        matches!(self.canonical(), EventType::DteDataTx | EventType::DceDataTx)
    }

    pub fn label(self) -> &'static str {
        match self.canonical() {
            EventType::Undefined => "undefined",
            EventType::DteDataTx => "dte-tx",
            EventType::DceDataTx => "dce-tx",
            EventType::ErrorOrBreak => "error",
            EventType::DteHandshakeChange => "dte-hs",
            EventType::DceHandshakeChange => "dce-hs",
            EventType::Unknown(_) => "unknown",
        }
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl PartialOrd for EventType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

impl From<u8> for EventType {
    fn from(code: u8) -> Self {
        match code {
            0 => EventType::Undefined,
            1 => EventType::DteDataTx,
            2 => EventType::DceDataTx,
            3 => EventType::ErrorOrBreak,
            4 => EventType::DteHandshakeChange,
            5 => EventType::DceHandshakeChange,
            other => EventType::Unknown(other),
        }
    }
}

impl From<EventType> for u8 {
    fn from(e: EventType) -> u8 {
        e.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_maps_back() {
        for code in 0..=u8::MAX {
            assert_eq!(EventType::from(code).code(), code);
        }
    }

    #[test]
    fn documented_codes() {
        assert_eq!(EventType::from(1), EventType::DteDataTx);
        assert_eq!(EventType::from(5), EventType::DceHandshakeChange);
        assert_eq!(EventType::from(6), EventType::Unknown(6));
        assert!(EventType::DceDataTx.is_data());
        assert!(!EventType::ErrorOrBreak.is_data());
    }

    #[test]
    fn unknown_with_documented_code_is_that_event() {
        use std::collections::HashSet;

        assert_eq!(EventType::Unknown(3), EventType::ErrorOrBreak);
        assert_eq!(EventType::Unknown(1).cmp(&EventType::DteDataTx), Ordering::Equal);
        assert!(EventType::Unknown(5) < EventType::Unknown(6));
        assert_ne!(EventType::Unknown(6), EventType::Unknown(7));
        assert_eq!(EventType::Unknown(2).label(), "dce-tx");
        assert!(EventType::Unknown(1).is_data());

        let set: HashSet<_> = [EventType::Unknown(2), EventType::DceDataTx].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
