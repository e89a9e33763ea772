//! Validation of manual timetable edits.
//!
//! An edit proposes a complete [`ScheduledEntry`]: either a new booking or a
//! replacement for an existing one (same id). The candidate is checked
//! against every *other* entry for faculty and room clashes at the same
//! (day, period); the entry it replaces is ignored.
//!
//! Weekly load and repetition caps are not re-checked here. A hand edit is
//! allowed to exceed them.

use thiserror::Error;
use tracing::debug;

use crate::models::{Catalog, ScheduledEntry};

/// A manual edit rejected because it would double-book a resource.
///
/// The display text is the message shown to the person making the edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditConflict {
    #[error("Conflict: {faculty} is already teaching Section {section} at this time.")]
    FacultyBusy { faculty: String, section: String },

    #[error("Conflict: Room {room} is already occupied by Section {section} at this time.")]
    RoomBusy { room: String, section: String },
}

/// Checks a candidate entry against the existing entries.
///
/// Faculty clashes are reported before room clashes. Names are resolved
/// through `catalog`, falling back to raw ids.
pub fn validate_edit(
    candidate: &ScheduledEntry,
    entries: &[ScheduledEntry],
    catalog: &Catalog,
) -> Result<(), EditConflict> {
    let others = move || {
        entries
            .iter()
            .filter(move |e| e.id != candidate.id && e.same_slot(candidate))
    };

    if let Some(clash) = others().find(|e| e.faculty_id == candidate.faculty_id) {
        debug!(entry = %candidate.id, with = %clash.id, "edit rejected: faculty busy");
        return Err(EditConflict::FacultyBusy {
            faculty: catalog.faculty_name(&candidate.faculty_id).to_string(),
            section: catalog.section_name(&clash.section_id).to_string(),
        });
    }

    if let Some(clash) = others().find(|e| e.room_id == candidate.room_id) {
        debug!(entry = %candidate.id, with = %clash.id, "edit rejected: room busy");
        return Err(EditConflict::RoomBusy {
            room: catalog.room_name(&candidate.room_id).to_string(),
            section: catalog.section_name(&clash.section_id).to_string(),
        });
    }

    Ok(())
}
