//! Theory placement phase.
//!
//! # Algorithm
//!
//! For each section, theory subjects are taken in descending order of weekly
//! sessions (ties by id). Each subject's sessions are split into per-day
//! shares by [`day_shares`], then placed on working days visited in a
//! shuffled order. Within a day, periods are scanned pre-lunch first and
//! every candidate must pass both the slot predicate and the distribution
//! rules (per-day cap, no over-long same-subject runs).
//!
//! The section's default room is tried first; other lecture rooms are used
//! when it is taken. A day on which nothing lands does not consume a share.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::ledger::SlotRequest;
use super::predicate::{can_place_theory, is_slot_available};
use super::state::GenerationState;
use crate::config::GeneratorConfig;
use crate::models::{Catalog, Day, Section, Subject, SubjectKind, Unscheduled};

/// Splits `sessions` into per-day shares.
///
/// Even requirements of four or more go out in pairs (4 → 2+2, 6 → 2+2+2);
/// everything else one per day (3 → 1+1+1, 2 → 1+1). When there are more
/// shares than `days`, trailing shares are folded into earlier ones up to
/// `cap`.
pub fn day_shares(sessions: u32, days: usize, cap: u32) -> Vec<u32> {
    let mut shares = if sessions >= 4 && sessions % 2 == 0 && cap >= 2 {
        vec![2; (sessions / 2) as usize]
    } else {
        vec![1; sessions as usize]
    };

    while shares.len() > days.max(1) {
        let Some(last) = shares.pop() else { break };
        match shares.iter_mut().find(|s| **s + last <= cap) {
            Some(share) => *share += last,
            None => {
                shares.push(last);
                break;
            }
        }
    }
    shares
}

fn daily_cap(subject: &Subject, config: &GeneratorConfig) -> u32 {
    match subject.kind {
        SubjectKind::Theory {
            daily_cap: Some(cap),
        } => cap,
        _ => config.daily_repetition_cap,
    }
}

/// Lecture rooms for a section: default room first.
fn room_order<'a>(section: &'a Section, catalog: &'a Catalog) -> Vec<&'a str> {
    let mut rooms: Vec<&str> = section.default_room_id.iter().map(String::as_str).collect();
    rooms.extend(
        catalog
            .theory_rooms()
            .into_iter()
            .map(|r| r.id.as_str())
            .filter(|id| section.default_room_id.as_deref() != Some(*id)),
    );
    rooms
}

/// One subject's placement inputs for a section.
#[derive(Debug, Clone, Copy)]
struct Lecture<'a> {
    section: &'a Section,
    subject: &'a Subject,
    /// Candidate rooms, default room first.
    rooms: &'a [&'a str],
    daily_cap: u32,
}

impl Lecture<'_> {
    /// Places up to `quota` sessions on `day`. Returns the count placed.
    fn place_on_day<R: Rng + ?Sized>(
        &self,
        state: &mut GenerationState,
        config: &GeneratorConfig,
        day: Day,
        quota: u32,
        rng: &mut R,
    ) -> u32 {
        let mut placed = 0;

        for period in config.calendar.teaching_periods() {
            if placed == quota {
                break;
            }
            if !can_place_theory(
                &state.ledger,
                &self.subject.id,
                &self.section.id,
                day,
                period,
                self.daily_cap,
                config.max_consecutive,
            ) {
                continue;
            }

            let slot = self
                .rooms
                .iter()
                .map(|&room_id| SlotRequest {
                    subject_id: &self.subject.id,
                    faculty_id: &self.subject.faculty_id,
                    room_id,
                    section_id: &self.section.id,
                    day,
                    period,
                    batch: None,
                })
                .find(|slot| is_slot_available(&state.ledger, &config.calendar, slot));

            if let Some(slot) = slot {
                state.commit(&slot, rng);
                placed += 1;
            }
        }
        placed
    }
}

/// Distributes theory sessions for every section.
pub fn place_theory<R: Rng + ?Sized>(
    state: &mut GenerationState,
    catalog: &Catalog,
    config: &GeneratorConfig,
    rng: &mut R,
) {
    let before = state.entries.len();

    for section in &catalog.sections {
        let mut subjects: Vec<&Subject> = catalog
            .subjects_for(section)
            .filter(|s| s.is_theory() && s.sessions_per_week > 0)
            .collect();
        if subjects.is_empty() {
            continue;
        }
        subjects.sort_by(|a, b| {
            b.sessions_per_week
                .cmp(&a.sessions_per_week)
                .then_with(|| a.id.cmp(&b.id))
        });

        let working_days = config.calendar.working_days(section.year);
        let rooms = room_order(section, catalog);
        if rooms.is_empty() || working_days.is_empty() {
            warn!(section = %section.id, "no lecture room or working day; skipping theory");
            for subject in subjects {
                state.report(Unscheduled::no_feasible_slot(
                    &subject.id,
                    &section.id,
                    None,
                    subject.sessions_per_week,
                ));
            }
            continue;
        }

        for subject in subjects {
            let cap = daily_cap(subject, config);
            let lecture = Lecture {
                section,
                subject,
                rooms: &rooms,
                daily_cap: cap,
            };
            let shares = day_shares(subject.sessions_per_week, working_days.len(), cap);
            let mut days = working_days.clone();
            days.shuffle(rng);

            let mut remaining = subject.sessions_per_week;
            let mut next_share = 0;
            for day in days {
                if remaining == 0 {
                    break;
                }
                let quota = shares.get(next_share).copied().unwrap_or(cap).min(remaining);
                let placed = lecture.place_on_day(state, config, day, quota, rng);
                if placed > 0 {
                    next_share += 1;
                }
                remaining -= placed;
            }

            if remaining > 0 {
                debug!(
                    section = %section.id,
                    subject = %subject.id,
                    remaining,
                    "theory requirement not fully placed"
                );
                state.report(Unscheduled::no_feasible_slot(
                    &subject.id,
                    &section.id,
                    None,
                    remaining,
                ));
            }
        }
    }

    info!(
        placed = state.entries.len() - before,
        "theory phase complete"
    );
}
