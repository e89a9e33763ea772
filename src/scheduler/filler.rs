//! Gap-filling phase.
//!
//! Runs after the academic phases. For every section and working day that
//! already carries an academic session before lunch, empty pre-lunch periods
//! receive the library filler; if the post-lunch window is mostly empty, up
//! to `max_post_lunch_fillers` of its periods receive the sports filler.
//!
//! Days with nothing before lunch are left untouched: they may be holidays
//! for the cohort or days the search could not use, and the phase does not
//! try to tell the two apart.
//!
//! Filler bookings pass the same slot predicate as academic ones, so a
//! shared library room or librarian is never double-booked.

use rand::Rng;
use tracing::{debug, info, warn};

use super::ledger::SlotRequest;
use super::predicate::is_slot_available;
use super::state::GenerationState;
use crate::config::{FillerActivity, GeneratorConfig};
use crate::models::{Catalog, Day, Section, Subject};

/// A filler activity resolved against the catalog.
#[derive(Debug, Clone, Copy)]
struct Filler<'a> {
    subject: &'a Subject,
    room_id: &'a str,
}

impl<'a> Filler<'a> {
    fn resolve(activity: &'a FillerActivity, catalog: &'a Catalog) -> Option<Self> {
        let subject = catalog.subject_by_id(&activity.subject_id)?;
        let room = catalog.room_by_id(&activity.room_id)?;
        Some(Self {
            subject,
            room_id: &room.id,
        })
    }

    /// Books the filler if the slot is free. Returns whether it was placed.
    fn try_place<R: Rng + ?Sized>(
        &self,
        state: &mut GenerationState,
        config: &GeneratorConfig,
        section: &Section,
        day: Day,
        period: u8,
        rng: &mut R,
    ) -> bool {
        let slot = SlotRequest {
            subject_id: &self.subject.id,
            faculty_id: &self.subject.faculty_id,
            room_id: self.room_id,
            section_id: &section.id,
            day,
            period,
            batch: None,
        };
        if !is_slot_available(&state.ledger, &config.calendar, &slot) {
            return false;
        }
        state.commit(&slot, rng);
        true
    }
}

/// Fills gaps with the configured library and sports activities.
///
/// No-op when fillers are not configured or cannot be resolved.
pub fn fill_gaps<R: Rng + ?Sized>(
    state: &mut GenerationState,
    catalog: &Catalog,
    config: &GeneratorConfig,
    rng: &mut R,
) {
    let Some(fillers) = &config.fillers else {
        debug!("no filler activities configured; skipping gap filling");
        return;
    };
    let (Some(library), Some(sports)) = (
        Filler::resolve(&fillers.library, catalog),
        Filler::resolve(&fillers.sports, catalog),
    ) else {
        warn!("filler subject or room missing from catalog; skipping gap filling");
        return;
    };

    let calendar = &config.calendar;
    let before = state.entries.len();

    for section in &catalog.sections {
        for day in calendar.working_days(section.year) {
            let has_academic = calendar
                .pre_lunch()
                .any(|p| state.ledger.section_has_any(&section.id, day, p));
            if !has_academic {
                continue;
            }

            for period in calendar.pre_lunch() {
                if !state.ledger.section_has_any(&section.id, day, period) {
                    library.try_place(state, config, section, day, period, rng);
                }
            }

            let post: Vec<u8> = calendar.post_lunch().collect();
            let occupied = post
                .iter()
                .filter(|&&p| state.ledger.section_has_any(&section.id, day, p))
                .count();
            if occupied * 2 >= post.len() {
                continue;
            }
            let mut filled = 0;
            for &period in &post {
                if filled >= config.max_post_lunch_fillers {
                    break;
                }
                if !state.ledger.section_has_any(&section.id, day, period)
                    && sports.try_place(state, config, section, day, period, rng)
                {
                    filled += 1;
                }
            }
        }
    }

    info!(
        placed = state.entries.len() - before,
        "gap filling complete"
    );
}
