//! Mutable context threaded through the placement phases.

use rand::Rng;
use uuid::Builder;

use super::ledger::{ResourceLedger, SlotRequest};
use crate::models::{Faculty, ScheduledEntry, Timetable, Unscheduled};

/// Ledger plus the output accumulated so far.
///
/// Each phase takes `&mut GenerationState`; nothing is shared between
/// generation runs.
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    pub ledger: ResourceLedger,
    pub entries: Vec<ScheduledEntry>,
    pub unscheduled: Vec<Unscheduled>,
}

impl GenerationState {
    /// Fresh state with faculty capacities registered.
    pub fn new(faculty: &[Faculty]) -> Self {
        Self {
            ledger: ResourceLedger::new(faculty),
            entries: Vec::new(),
            unscheduled: Vec::new(),
        }
    }

    /// Books a slot and records the entry. Ids come from `rng` so seeded
    /// runs are repeatable.
    pub fn commit<R: Rng + ?Sized>(&mut self, slot: &SlotRequest<'_>, rng: &mut R) {
        let id = Builder::from_random_bytes(rng.random()).into_uuid();
        self.ledger.occupy(slot);
        self.entries.push(slot.to_entry(id.to_string()));
    }

    /// Records a residual. Zero-session residuals are dropped.
    pub fn report(&mut self, residual: Unscheduled) {
        if residual.sessions > 0 {
            self.unscheduled.push(residual);
        }
    }

    pub fn into_timetable(self) -> Timetable {
        Timetable {
            entries: self.entries,
            unscheduled: self.unscheduled,
        }
    }
}
