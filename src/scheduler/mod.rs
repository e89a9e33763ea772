//! Timetable generation engine.
//!
//! Provides the resource ledger, conflict predicates, the three placement
//! phases, the generator that sequences them, and timetable KPIs.
//!
//! # Algorithm
//!
//! `TimetableGenerator` is a greedy, randomized, single-pass heuristic:
//! labs first (hardest to place: contiguous blocks, parallel rooms), then
//! theory, then fillers. It does not backtrack and does not guarantee a
//! complete timetable; unplaced requirements are returned as residuals.
//!
//! # KPI
//!
//! `TimetableKpi` summarizes faculty load against capacity, placed versus
//! unscheduled sessions, and how full sections' mornings are.

mod filler;
mod generator;
mod kpi;
mod lab;
mod ledger;
mod predicate;
mod state;
mod theory;

#[cfg(test)]
pub(crate) mod fixtures;

pub use filler::fill_gaps;
pub use generator::TimetableGenerator;
pub use kpi::TimetableKpi;
pub use lab::{batch_count, batch_labels, place_labs};
pub use ledger::{EntityKind, ResourceLedger, SlotRequest};
pub use predicate::{can_place_theory, has_capacity_for, is_slot_available};
pub use state::GenerationState;
pub use theory::{day_shares, place_theory};
