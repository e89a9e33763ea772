//! Timetabling domain models.
//!
//! Provides the data types for describing a department (faculty, rooms,
//! subjects, sections), the weekly calendar, and the generated timetable.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Subject | Recurring task |
//! | Faculty, Room | Resource |
//! | Section (and batch) | Consumer that must not be double-booked |
//! | ScheduledEntry | Assignment |
//! | Timetable | Schedule |

mod calendar;
mod catalog;
mod resource;
mod section;
mod subject;
mod timetable;

pub use calendar::{Day, WeekCalendar};
pub use catalog::Catalog;
pub use resource::{Faculty, Room, RoomKind};
pub use section::Section;
pub use subject::{SectionScope, Subject, SubjectKind};
pub use timetable::{EditOutcome, ScheduledEntry, Timetable, Unscheduled, UnscheduledReason};
