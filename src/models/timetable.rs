//! Timetable (solution) model.
//!
//! A timetable is the list of scheduled entries produced by generation or
//! manual editing, together with the requirements generation could not
//! place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{Catalog, Day};
use crate::editing::{validate_edit, EditConflict};

/// One (day, period) booking of a subject for a section.
///
/// Identity is assigned at creation and never changes. Entries are
/// replaced or removed wholesale, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    /// Immutable entry identifier.
    pub id: String,
    pub day: Day,
    /// 1-based period index.
    pub period: u8,
    pub subject_id: String,
    pub faculty_id: String,
    pub room_id: String,
    pub section_id: String,
    /// Batch label for split lab sessions. `None` = whole class.
    pub batch: Option<String>,
}

/// A requirement that generation failed to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unscheduled {
    pub subject_id: String,
    pub section_id: String,
    /// Batch the residual belongs to, for split labs.
    pub batch: Option<String>,
    /// Number of periods not placed.
    pub sessions: u32,
    pub reason: UnscheduledReason,
}

/// Why a requirement was left unplaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnscheduledReason {
    /// Fewer lab-capable rooms than batches.
    InsufficientLabRooms,
    /// The search ran out of conflict-free slots.
    NoFeasibleSlot,
}

/// Result of applying an accepted edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// An entry with the same id was replaced.
    Replaced,
    /// The entry was new and appended.
    Appended,
}

/// A generated (and possibly hand-edited) timetable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Scheduled entries.
    pub entries: Vec<ScheduledEntry>,
    /// Requirements the generator could not place.
    pub unscheduled: Vec<Unscheduled>,
}

impl ScheduledEntry {
    /// Creates a whole-class entry with a fresh random id.
    pub fn new(
        day: Day,
        period: u8,
        subject_id: impl Into<String>,
        faculty_id: impl Into<String>,
        room_id: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            day,
            period,
            subject_id: subject_id.into(),
            faculty_id: faculty_id.into(),
            room_id: room_id.into(),
            section_id: section_id.into(),
            batch: None,
        }
    }

    /// Replaces the id (used when editing an existing entry).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the batch label.
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Whether two entries fall on the same (day, period).
    #[inline]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.day == other.day && self.period == other.period
    }
}

impl Unscheduled {
    /// Residual caused by a lack of lab rooms.
    pub fn insufficient_lab_rooms(
        subject_id: impl Into<String>,
        section_id: impl Into<String>,
        batch: Option<String>,
        sessions: u32,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            section_id: section_id.into(),
            batch,
            sessions,
            reason: UnscheduledReason::InsufficientLabRooms,
        }
    }

    /// Residual left after the search exhausted its candidates.
    pub fn no_feasible_slot(
        subject_id: impl Into<String>,
        section_id: impl Into<String>,
        batch: Option<String>,
        sessions: u32,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            section_id: section_id.into(),
            batch,
            sessions,
            reason: UnscheduledReason::NoFeasibleSlot,
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total periods reported as unscheduled.
    pub fn unscheduled_count(&self) -> u32 {
        self.unscheduled.iter().map(|u| u.sessions).sum()
    }

    /// Whether every requirement was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Finds an entry by id.
    pub fn entry(&self, id: &str) -> Option<&ScheduledEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries for a section at a slot (several when a lab is split by batch).
    pub fn entries_at(&self, section_id: &str, day: Day, period: u8) -> Vec<&ScheduledEntry> {
        self.entries
            .iter()
            .filter(|e| e.section_id == section_id && e.day == day && e.period == period)
            .collect()
    }

    /// The first entry for a section at a slot.
    pub fn entry_at(&self, section_id: &str, day: Day, period: u8) -> Option<&ScheduledEntry> {
        self.entries
            .iter()
            .find(|e| e.section_id == section_id && e.day == day && e.period == period)
    }

    /// All entries for a section.
    pub fn entries_for_section(&self, section_id: &str) -> Vec<&ScheduledEntry> {
        self.entries
            .iter()
            .filter(|e| e.section_id == section_id)
            .collect()
    }

    /// All entries taught by a faculty member.
    pub fn entries_for_faculty(&self, faculty_id: &str) -> Vec<&ScheduledEntry> {
        self.entries
            .iter()
            .filter(|e| e.faculty_id == faculty_id)
            .collect()
    }

    /// Placed periods per (subject, section).
    pub fn placed_by_subject(&self) -> HashMap<(&str, &str), u32> {
        let mut placed: HashMap<(&str, &str), u32> = HashMap::new();
        for e in &self.entries {
            *placed
                .entry((e.subject_id.as_str(), e.section_id.as_str()))
                .or_insert(0) += 1;
        }
        placed
    }

    /// Periods taught per faculty member.
    pub fn faculty_load(&self) -> HashMap<&str, u32> {
        let mut load: HashMap<&str, u32> = HashMap::new();
        for e in &self.entries {
            *load.entry(e.faculty_id.as_str()).or_insert(0) += 1;
        }
        load
    }

    /// Validates a manual edit and commits it on success.
    ///
    /// The entry replaces any existing entry with the same id, or is
    /// appended. On conflict the timetable is left unchanged.
    pub fn apply_edit(
        &mut self,
        candidate: ScheduledEntry,
        catalog: &Catalog,
    ) -> Result<EditOutcome, EditConflict> {
        validate_edit(&candidate, &self.entries, catalog)?;

        match self.entries.iter_mut().find(|e| e.id == candidate.id) {
            Some(existing) => {
                *existing = candidate;
                Ok(EditOutcome::Replaced)
            }
            None => {
                self.entries.push(candidate);
                Ok(EditOutcome::Appended)
            }
        }
    }

    /// Removes an entry wholesale.
    pub fn remove_entry(&mut self, id: &str) -> Option<ScheduledEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }
}
