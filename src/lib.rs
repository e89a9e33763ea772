//! Weekly timetable generation for academic departments.
//!
//! Builds a conflict-free weekly timetable for every section of a department
//! from a catalog of faculty, rooms, subjects and sections, and validates
//! hand edits to the result.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Catalog`, `Faculty`, `Room`, `Subject`,
//!   `Section`, `WeekCalendar`, `ScheduledEntry`, `Timetable`
//! - **`config`**: Generator configuration: calendar, lab blocks, batching,
//!   caps, fillers, seed
//! - **`scheduler`**: Resource ledger, conflict predicates, lab/theory/filler
//!   placement phases, `TimetableGenerator`, `TimetableKpi`
//! - **`editing`**: Manual edit validation with user-facing conflict messages
//! - **`validation`**: Catalog integrity checks (duplicate IDs, dangling refs)
//!
//! # Architecture
//!
//! Generation is a greedy, randomized, single-pass heuristic over a shared
//! ledger of faculty, room and section/batch occupancy. It never fails:
//! requirements it cannot place come back as residuals on the timetable.
//! Randomness is drawn from a seedable RNG, so runs are reproducible.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod config;
pub mod editing;
pub mod models;
pub mod scheduler;
pub mod validation;
