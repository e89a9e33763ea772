//! Lab placement phase.
//!
//! # Algorithm
//!
//! For each section independently:
//! 1. Collect the section's lab subjects and derive the batch count from the
//!    configured [`BatchStrategy`].
//! 2. Reject the section's labs outright when there are fewer lab rooms than
//!    batches.
//! 3. Run rotation rounds. In round `r`, batch `b` takes rotation position
//!    `(b + r) mod positions`, where `positions = max(batches, labs)`;
//!    positions past the last lab leave the batch idle for the round.
//! 4. For each round, scan working days in shuffled order (one rotation per
//!    section per day) and the preferred blocks in order. A (day, block) is
//!    taken only if every active batch gets its own free lab room with its
//!    lab's faculty free; the round is then committed atomically.
//! 5. Stop when all requirements are met or a round finds no (day, block).
//!
//! Requirements are per (lab subject, batch): each batch must accumulate the
//! lab's `sessions_per_week` periods. Whatever is left is reported as a
//! residual for that batch.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::ledger::SlotRequest;
use super::predicate::{has_capacity_for, is_slot_available};
use super::state::GenerationState;
use crate::config::{BatchStrategy, GeneratorConfig, LabBlock};
use crate::models::{Catalog, Day, Room, Section, Subject, SubjectKind, Unscheduled};

/// Number of parallel batches for a section.
pub fn batch_count(strategy: BatchStrategy, section: &Section, lab_count: usize) -> usize {
    match strategy {
        BatchStrategy::PerLabSubject => lab_count.max(1),
        BatchStrategy::ByHeadcount { max_per_room } => section
            .strength
            .map_or(1, |s| s.div_ceil(max_per_room.max(1)) as usize)
            .max(1),
    }
}

/// Batch labels; a single batch is the whole class.
pub fn batch_labels(count: usize) -> Vec<Option<String>> {
    if count <= 1 {
        return vec![None];
    }
    (0..count)
        .map(|i| match u8::try_from(i) {
            Ok(i) if i < 26 => Some(format!("BATCH {}", (b'A' + i) as char)),
            _ => Some(format!("BATCH {}", i + 1)),
        })
        .collect()
}

/// One batch's share of a committed round.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedBatch<'a> {
    batch: usize,
    lab: usize,
    room_id: &'a str,
    periods: u32,
}

/// Rotation bookkeeping for one section.
struct Rotation<'a> {
    section: &'a Section,
    labs: Vec<&'a Subject>,
    labels: Vec<Option<String>>,
    rooms: Vec<&'a Room>,
    /// Periods still owed, indexed `[lab][batch]`.
    remaining: Vec<Vec<u32>>,
}

impl<'a> Rotation<'a> {
    fn new(
        section: &'a Section,
        labs: Vec<&'a Subject>,
        labels: Vec<Option<String>>,
        rooms: Vec<&'a Room>,
    ) -> Self {
        let remaining = labs
            .iter()
            .map(|l| vec![l.sessions_per_week; labels.len()])
            .collect();
        Self {
            section,
            labs,
            labels,
            rooms,
            remaining,
        }
    }

    fn positions(&self) -> usize {
        self.labels.len().max(self.labs.len())
    }

    fn is_done(&self) -> bool {
        self.remaining.iter().flatten().all(|&r| r == 0)
    }

    /// (batch, lab) pairs with work left in round `round`.
    fn active(&self, round: usize) -> Vec<(usize, usize)> {
        let positions = self.positions();
        (0..self.labels.len())
            .filter_map(|b| {
                let lab = (b + round) % positions;
                (lab < self.labs.len() && self.remaining[lab][b] > 0).then_some((b, lab))
            })
            .collect()
    }

    /// Booking of `lab` for `batch` in `room_id` at one period.
    fn slot<'s>(
        &'s self,
        lab: usize,
        batch: usize,
        room_id: &'s str,
        day: Day,
        period: u8,
    ) -> SlotRequest<'s> {
        let subject = self.labs[lab];
        SlotRequest {
            subject_id: &subject.id,
            faculty_id: &subject.faculty_id,
            room_id,
            section_id: &self.section.id,
            day,
            period,
            batch: self.labels[batch].as_deref(),
        }
    }

    /// Lab rooms in preference order for a lab subject.
    fn candidate_rooms(&self, lab: usize) -> Vec<&'a Room> {
        let preferred: &[String] = match &self.labs[lab].kind {
            SubjectKind::Lab { room_ids } => room_ids,
            SubjectKind::Theory { .. } => &[],
        };
        let mut rooms: Vec<&Room> = preferred
            .iter()
            .filter_map(|id| self.rooms.iter().copied().find(|r| r.id == *id))
            .collect();
        rooms.extend(
            self.rooms
                .iter()
                .copied()
                .filter(|r| !preferred.contains(&r.id)),
        );
        rooms
    }

    /// Tries to seat every active batch in `block` on `day`.
    ///
    /// Returns `None` unless all batches fit at once.
    fn plan(
        &self,
        state: &GenerationState,
        config: &GeneratorConfig,
        day: Day,
        block: LabBlock,
        active: &[(usize, usize)],
    ) -> Option<Vec<PlannedBatch<'a>>> {
        let mut taken_rooms: HashSet<&str> = HashSet::new();
        let mut faculty_periods: HashMap<&str, u32> = HashMap::new();
        let mut faculty_slots: HashSet<(&str, u8)> = HashSet::new();
        let mut plan = Vec::with_capacity(active.len());

        for &(batch, lab) in active {
            let subject = self.labs[lab];
            let take = self.remaining[lab][batch].min(u32::from(block.len));
            let periods: Vec<u8> = block.periods().take(take as usize).collect();

            let extra = faculty_periods.entry(subject.faculty_id.as_str()).or_insert(0);
            *extra += take;
            if !has_capacity_for(&state.ledger, &subject.faculty_id, *extra) {
                return None;
            }
            for &p in &periods {
                if !faculty_slots.insert((subject.faculty_id.as_str(), p)) {
                    return None;
                }
            }

            let room = self.candidate_rooms(lab).into_iter().find(|room| {
                let base = self.slot(lab, batch, &room.id, day, block.start);
                !taken_rooms.contains(room.id.as_str())
                    && periods.iter().all(|&p| {
                        is_slot_available(&state.ledger, &config.calendar, &base.at_period(p))
                    })
            })?;

            taken_rooms.insert(room.id.as_str());
            plan.push(PlannedBatch {
                batch,
                lab,
                room_id: room.id.as_str(),
                periods: take,
            });
        }
        Some(plan)
    }

    fn commit<R: Rng + ?Sized>(
        &mut self,
        state: &mut GenerationState,
        day: Day,
        block: LabBlock,
        plan: &[PlannedBatch<'_>],
        rng: &mut R,
    ) {
        for planned in plan {
            let base = self.slot(planned.lab, planned.batch, planned.room_id, day, block.start);
            for period in block.periods().take(planned.periods as usize) {
                state.commit(&base.at_period(period), rng);
            }
            self.remaining[planned.lab][planned.batch] -= planned.periods;
        }
    }

    fn report_residuals(&self, state: &mut GenerationState) {
        for (lab, per_batch) in self.remaining.iter().enumerate() {
            for (batch, &sessions) in per_batch.iter().enumerate() {
                state.report(Unscheduled::no_feasible_slot(
                    &self.labs[lab].id,
                    &self.section.id,
                    self.labels[batch].clone(),
                    sessions,
                ));
            }
        }
    }
}

/// Places lab rotations for every section.
pub fn place_labs<R: Rng + ?Sized>(
    state: &mut GenerationState,
    catalog: &Catalog,
    config: &GeneratorConfig,
    rng: &mut R,
) {
    let lab_rooms = catalog.lab_rooms();
    let before = state.entries.len();

    for section in &catalog.sections {
        let labs: Vec<&Subject> = catalog
            .subjects_for(section)
            .filter(|s| s.is_lab() && s.sessions_per_week > 0)
            .collect();
        if labs.is_empty() {
            continue;
        }

        let batches = batch_count(config.batch_strategy, section, labs.len());
        let labels = batch_labels(batches);

        if lab_rooms.len() < batches {
            warn!(
                section = %section.id,
                batches,
                lab_rooms = lab_rooms.len(),
                "not enough lab rooms for batch rotation"
            );
            for lab in &labs {
                for label in &labels {
                    state.report(Unscheduled::insufficient_lab_rooms(
                        &lab.id,
                        &section.id,
                        label.clone(),
                        lab.sessions_per_week,
                    ));
                }
            }
            continue;
        }

        let mut rotation = Rotation::new(section, labs, labels, lab_rooms.clone());
        let mut days = config.calendar.working_days(section.year);
        days.shuffle(rng);
        let mut used_days: HashSet<Day> = HashSet::new();

        let mut round = 0usize;
        let mut idle_rounds = 0usize;
        while !rotation.is_done() && idle_rounds < rotation.positions() {
            let active = rotation.active(round);
            round += 1;
            if active.is_empty() {
                idle_rounds += 1;
                continue;
            }
            idle_rounds = 0;

            let snapshot: &GenerationState = state;
            let found = days
                .iter()
                .filter(|d| !used_days.contains(*d))
                .find_map(|&day| {
                    config.lab_blocks.iter().find_map(|&block| {
                        rotation
                            .plan(snapshot, config, day, block, &active)
                            .map(|plan| (day, block, plan))
                    })
                });

            let Some((day, block, plan)) = found else {
                debug!(section = %section.id, round, "no day/block fits the rotation round");
                break;
            };
            debug!(
                section = %section.id,
                round,
                %day,
                start = block.start,
                batches = plan.len(),
                "committing lab rotation"
            );
            rotation.commit(state, day, block, &plan, rng);
            used_days.insert(day);
        }

        rotation.report_residuals(state);
    }

    info!(
        placed = state.entries.len() - before,
        "lab phase complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Faculty;
    use crate::scheduler::fixtures::assert_invariants;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lab_catalog(lab_rooms: usize) -> Catalog {
        let mut rooms = vec![Room::theory("r1")];
        for i in 0..lab_rooms {
            rooms.push(Room::lab(format!("lab{i}")));
        }
        Catalog::new(
            vec![
                Faculty::new("f1", 20),
                Faculty::new("f2", 20),
                Faculty::new("f3", 20),
            ],
            rooms,
            vec![
                Subject::lab("dbms-lab", "f1").for_term(3, 5).with_sessions(2),
                Subject::lab("os-lab", "f2").for_term(3, 5).with_sessions(2),
            ],
            vec![Section::new("s1", 3, 5, "A").with_strength(60)],
        )
    }

    #[test]
    fn test_batch_count_strategies() {
        let s = Section::new("s1", 3, 5, "A").with_strength(61);
        assert_eq!(batch_count(BatchStrategy::PerLabSubject, &s, 3), 3);
        assert_eq!(batch_count(BatchStrategy::PerLabSubject, &s, 0), 1);
        assert_eq!(
            batch_count(BatchStrategy::ByHeadcount { max_per_room: 30 }, &s, 1),
            3
        );
        let no_strength = Section::new("s2", 3, 5, "B");
        assert_eq!(
            batch_count(BatchStrategy::ByHeadcount { max_per_room: 30 }, &no_strength, 2),
            1
        );
    }

    #[test]
    fn test_batch_labels() {
        assert_eq!(batch_labels(1), vec![None]);
        assert_eq!(
            batch_labels(3),
            vec![
                Some("BATCH A".to_string()),
                Some("BATCH B".to_string()),
                Some("BATCH C".to_string())
            ]
        );
    }

    #[test]
    fn test_rotation_swaps_labs_between_rounds() {
        let catalog = lab_catalog(2);
        let config = GeneratorConfig::default();
        let mut state = GenerationState::new(&catalog.faculty);
        let mut rng = StdRng::seed_from_u64(1);

        place_labs(&mut state, &catalog, &config, &mut rng);

        // 2 labs × 2 batches × 2 periods
        assert_eq!(state.entries.len(), 8);
        assert!(state.unscheduled.is_empty());
        for label in ["BATCH A", "BATCH B"] {
            for lab in ["dbms-lab", "os-lab"] {
                let n = state
                    .entries
                    .iter()
                    .filter(|e| e.batch.as_deref() == Some(label) && e.subject_id == lab)
                    .count();
                assert_eq!(n, 2, "{label} should attend {lab} once");
            }
        }
        // One rotation per day.
        let days: HashSet<Day> = state.entries.iter().map(|e| e.day).collect();
        assert_eq!(days.len(), 2);

        let tt = state.into_timetable();
        assert_invariants(&tt, &catalog, &config);
    }

    #[test]
    fn test_insufficient_lab_rooms() {
        let catalog = lab_catalog(1);
        let config = GeneratorConfig::default();
        let mut state = GenerationState::new(&catalog.faculty);
        let mut rng = StdRng::seed_from_u64(2);

        place_labs(&mut state, &catalog, &config, &mut rng);

        assert!(state.entries.is_empty());
        assert_eq!(state.unscheduled.len(), 4);
        assert!(state
            .unscheduled
            .iter()
            .all(|u| u.reason == crate::models::UnscheduledReason::InsufficientLabRooms));
    }

    #[test]
    fn test_round_is_atomic() {
        // Both labs share one instructor, so the two batches can never run
        // side by side: nothing may be committed.
        let mut catalog = lab_catalog(2);
        catalog.subjects[1].faculty_id = "f1".into();
        let config = GeneratorConfig::default();
        let mut state = GenerationState::new(&catalog.faculty);
        let mut rng = StdRng::seed_from_u64(3);

        place_labs(&mut state, &catalog, &config, &mut rng);

        assert!(state.entries.is_empty());
        assert_eq!(state.unscheduled.iter().map(|u| u.sessions).sum::<u32>(), 8);
    }

    #[test]
    fn test_plan_rejects_when_second_room_busy() {
        let catalog = lab_catalog(2);
        let config = GeneratorConfig::default();
        let mut state = GenerationState::new(&catalog.faculty);
        // Another section holds lab1 on Monday periods 1-2.
        for p in [1, 2] {
            state.ledger.occupy(&SlotRequest {
                subject_id: "other",
                faculty_id: "f3",
                room_id: "lab1",
                section_id: "s9",
                day: Day::Mon,
                period: p,
                batch: None,
            });
        }

        let section = &catalog.sections[0];
        let labs: Vec<&Subject> = catalog.subjects.iter().collect();
        let rotation = Rotation::new(section, labs, batch_labels(2), catalog.lab_rooms());
        let active = rotation.active(0);
        assert_eq!(active, vec![(0, 0), (1, 1)]);

        assert!(rotation
            .plan(&state, &config, Day::Mon, LabBlock::new(1, 2), &active)
            .is_none());
        let plan = rotation
            .plan(&state, &config, Day::Mon, LabBlock::new(6, 2), &active)
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert_ne!(plan[0].room_id, plan[1].room_id);
    }

    #[test]
    fn test_odd_requirement_takes_partial_block() {
        let mut catalog = lab_catalog(2);
        catalog.subjects.truncate(1);
        catalog.subjects[0].sessions_per_week = 3;
        let config = GeneratorConfig::default();
        let mut state = GenerationState::new(&catalog.faculty);
        let mut rng = StdRng::seed_from_u64(4);

        place_labs(&mut state, &catalog, &config, &mut rng);

        // Single lab → whole class, 2 + 1 periods on two days.
        assert_eq!(state.entries.len(), 3);
        assert!(state.entries.iter().all(|e| e.batch.is_none()));
        assert!(state.unscheduled.is_empty());
    }

    #[test]
    fn test_preferred_room_used_first() {
        let mut catalog = lab_catalog(2);
        catalog.subjects.truncate(1);
        catalog.subjects[0] = catalog.subjects[0].clone().with_lab_room("lab1");
        let config = GeneratorConfig::default();
        let mut state = GenerationState::new(&catalog.faculty);
        let mut rng = StdRng::seed_from_u64(5);

        place_labs(&mut state, &catalog, &config, &mut rng);

        assert!(!state.entries.is_empty());
        assert!(state.entries.iter().all(|e| e.room_id == "lab1"));
    }
}
