//! Conflict predicates consulted by every placement phase.
//!
//! Pure functions over the [`ResourceLedger`]; none of them mutate state.

use super::ledger::{EntityKind, ResourceLedger, SlotRequest};
use crate::models::{Day, WeekCalendar};

/// Whether a single-period booking is conflict-free.
///
/// Rejects the lunch period and periods outside the grid, any busy faculty,
/// room or section/batch unit (with whole-class containment), and bookings
/// that would push the faculty past their weekly capacity. Multi-period
/// placements must additionally check [`has_capacity_for`] for the full
/// block.
pub fn is_slot_available(
    ledger: &ResourceLedger,
    calendar: &WeekCalendar,
    slot: &SlotRequest<'_>,
) -> bool {
    if calendar.is_lunch(slot.period) || !calendar.contains_period(slot.period) {
        return false;
    }
    has_capacity_for(ledger, slot.faculty_id, 1)
        && ledger.is_free(EntityKind::Faculty, slot.faculty_id, slot.day, slot.period, None)
        && ledger.is_free(EntityKind::Room, slot.room_id, slot.day, slot.period, None)
        && ledger.is_free(
            EntityKind::Section,
            slot.section_id,
            slot.day,
            slot.period,
            slot.batch,
        )
}

/// Whether `faculty_id` can take `periods` more periods this week.
pub fn has_capacity_for(ledger: &ResourceLedger, faculty_id: &str, periods: u32) -> bool {
    match ledger.capacity(faculty_id) {
        None => true,
        Some(cap) => ledger.load(faculty_id) + periods <= cap,
    }
}

/// Theory distribution rules for one more session of a subject.
///
/// Rejects when the (subject, section, day) count has reached `daily_cap`,
/// or when the new period would extend a run of period-adjacent sessions of
/// the subject beyond `max_consecutive`.
pub fn can_place_theory(
    ledger: &ResourceLedger,
    subject_id: &str,
    section_id: &str,
    day: Day,
    period: u8,
    daily_cap: u32,
    max_consecutive: u32,
) -> bool {
    let placed = ledger.placed_on(subject_id, section_id, day);
    if placed.len() as u32 >= daily_cap {
        return false;
    }

    let mut run = 1u32;
    let mut p = period;
    while p > 1 && placed.contains(&(p - 1)) {
        run += 1;
        p -= 1;
    }
    let mut p = period;
    while let Some(next) = p.checked_add(1).filter(|n| placed.contains(n)) {
        run += 1;
        p = next;
    }
    run <= max_consecutive
}
