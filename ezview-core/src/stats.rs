use crate::codec::Records;
use crate::event::EventType;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub records: u64,
    pub per_event: BTreeMap<EventType, u64>,
    pub first_ticks: Option<u64>,
    pub last_ticks: Option<u64>,
    /// Records whose elapsed count is below their predecessor's.
    pub regressions: u64,
}

impl Stats {
    pub fn collect(records: Records<'_>) -> Self {
        let mut s = Stats::default();
        let mut prev: Option<u64> = None;
        for r in records {
            let t = r.elapsed_ticks();
            s.records += 1;
            *s.per_event.entry(r.event).or_default() += 1;
            if prev.is_some_and(|p| t < p) {
                s.regressions += 1;
            }
            if s.first_ticks.is_none() {
                s.first_ticks = Some(t);
            }
            s.last_ticks = Some(t);
            prev = Some(t);
        }
        s
    }

    pub fn count(&self, event: EventType) -> u64 {
        self.per_event.get(&event).copied().unwrap_or(0)
    }

    /// Records whose code is outside the documented event range, summed
    /// over every such code.
    pub fn unknown_count(&self) -> u64 {
        self.per_event
            .iter()
            .filter(|(e, _)| matches!(e.canonical(), EventType::Unknown(_)))
            .map(|(_, n)| n)
            .sum()
    }

    /// Ticks between first and last record. `None` when empty or when any
    /// record steps back in time.
    pub fn span_ticks(&self) -> Option<u64> {
        if !self.is_monotonic() {
            return None;
        }
        self.last_ticks?.checked_sub(self.first_ticks?)
    }

    pub fn is_monotonic(&self) -> bool {
        self.regressions == 0
    }
}
