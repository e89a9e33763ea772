//! Resource ledger: who is busy when.
//!
//! Tracks occupancy of faculty, rooms and section/batch units per
//! (day, period), cumulative faculty load against declared capacity, and
//! which periods each (subject, section, day) already holds.
//!
//! # Batch containment
//! A whole-class booking occupies every batch of the section at that slot.
//! Checking whether the whole class is free therefore requires that neither
//! the whole-class stream nor any batch stream is occupied, while a batch is
//! free iff the whole class and that batch are both unoccupied.

use std::collections::{HashMap, HashSet};

use crate::models::{Day, Faculty, ScheduledEntry};

/// Which occupancy set to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Faculty,
    Room,
    Section,
}

/// A prospective booking of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest<'a> {
    pub subject_id: &'a str,
    pub faculty_id: &'a str,
    pub room_id: &'a str,
    pub section_id: &'a str,
    pub day: Day,
    pub period: u8,
    /// `None` = whole class.
    pub batch: Option<&'a str>,
}

impl<'a> SlotRequest<'a> {
    /// The same booking moved to another period.
    pub fn at_period(self, period: u8) -> Self {
        Self { period, ..self }
    }

    /// Materializes the booking as an entry with the given id.
    pub fn to_entry(&self, id: String) -> ScheduledEntry {
        ScheduledEntry {
            id,
            day: self.day,
            period: self.period,
            subject_id: self.subject_id.to_string(),
            faculty_id: self.faculty_id.to_string(),
            room_id: self.room_id.to_string(),
            section_id: self.section_id.to_string(),
            batch: self.batch.map(str::to_string),
        }
    }
}

type SlotKey = (String, Day, u8);

#[derive(Debug, Clone, Default)]
struct SectionSlot {
    whole_class: bool,
    batches: HashSet<String>,
}

/// Mutable occupancy state shared by the placement phases.
///
/// Rebuilt for every generation run. `occupy` performs no checking; the
/// caller consults the conflict predicate first.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    faculty_busy: HashSet<SlotKey>,
    room_busy: HashSet<SlotKey>,
    section_busy: HashMap<SlotKey, SectionSlot>,
    faculty_load: HashMap<String, u32>,
    faculty_capacity: HashMap<String, u32>,
    placements: HashMap<(String, String, Day), Vec<u8>>,
}

fn key(id: &str, day: Day, period: u8) -> SlotKey {
    (id.to_string(), day, period)
}

impl ResourceLedger {
    /// Creates an empty ledger with faculty capacities registered.
    pub fn new(faculty: &[Faculty]) -> Self {
        Self {
            faculty_capacity: faculty
                .iter()
                .map(|f| (f.id.clone(), f.weekly_load))
                .collect(),
            ..Default::default()
        }
    }

    /// Rebuilds a ledger from committed entries.
    pub fn from_entries<'e>(
        faculty: &[Faculty],
        entries: impl IntoIterator<Item = &'e ScheduledEntry>,
    ) -> Self {
        let mut ledger = Self::new(faculty);
        for e in entries {
            ledger.occupy(&SlotRequest {
                subject_id: &e.subject_id,
                faculty_id: &e.faculty_id,
                room_id: &e.room_id,
                section_id: &e.section_id,
                day: e.day,
                period: e.period,
                batch: e.batch.as_deref(),
            });
        }
        ledger
    }

    /// Marks the faculty, room and section/batch busy and updates counters.
    pub fn occupy(&mut self, slot: &SlotRequest<'_>) {
        self.faculty_busy
            .insert(key(slot.faculty_id, slot.day, slot.period));
        self.room_busy.insert(key(slot.room_id, slot.day, slot.period));

        let section = self
            .section_busy
            .entry(key(slot.section_id, slot.day, slot.period))
            .or_default();
        match slot.batch {
            None => section.whole_class = true,
            Some(b) => {
                section.batches.insert(b.to_string());
            }
        }

        *self
            .faculty_load
            .entry(slot.faculty_id.to_string())
            .or_insert(0) += 1;
        self.placements
            .entry((
                slot.subject_id.to_string(),
                slot.section_id.to_string(),
                slot.day,
            ))
            .or_default()
            .push(slot.period);
    }

    /// Whether an entity is free at a slot.
    ///
    /// `batch` only matters for [`EntityKind::Section`].
    pub fn is_free(
        &self,
        kind: EntityKind,
        id: &str,
        day: Day,
        period: u8,
        batch: Option<&str>,
    ) -> bool {
        let k = key(id, day, period);
        match kind {
            EntityKind::Faculty => !self.faculty_busy.contains(&k),
            EntityKind::Room => !self.room_busy.contains(&k),
            EntityKind::Section => match self.section_busy.get(&k) {
                None => true,
                Some(slot) => match batch {
                    None => !slot.whole_class && slot.batches.is_empty(),
                    Some(b) => !slot.whole_class && !slot.batches.contains(b),
                },
            },
        }
    }

    /// Whether the section holds any booking (whole class or batch) at a slot.
    pub fn section_has_any(&self, section_id: &str, day: Day, period: u8) -> bool {
        !self.is_free(EntityKind::Section, section_id, day, period, None)
    }

    /// Periods consumed so far by a faculty member.
    pub fn load(&self, faculty_id: &str) -> u32 {
        self.faculty_load.get(faculty_id).copied().unwrap_or(0)
    }

    /// Declared weekly capacity. `None` for unregistered faculty (uncapped).
    pub fn capacity(&self, faculty_id: &str) -> Option<u32> {
        self.faculty_capacity.get(faculty_id).copied()
    }

    /// Periods already holding this subject for this section on a day.
    pub fn placed_on(&self, subject_id: &str, section_id: &str, day: Day) -> &[u8] {
        self.placements
            .get(&(subject_id.to_string(), section_id.to_string(), day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
