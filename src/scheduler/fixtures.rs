//! Shared test data and invariant checks.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{batch_count, batch_labels};
use crate::config::{FillerActivity, GeneratorConfig};
use crate::models::{
    Catalog, Day, Faculty, Room, Section, Subject, SubjectKind, Timetable, WeekCalendar,
};

/// A small IT department: one final-year section and two third-year
/// sections with split labs.
pub(crate) fn department() -> Catalog {
    let faculty = vec![
        Faculty::new("f1", 18).with_name("MS. MIZNA"),
        Faculty::new("f2", 15).with_name("MRS. Y. SIRISHA"),
        Faculty::new("f3", 12).with_name("DR. M. KRISHNA"),
        Faculty::new("f4", 15).with_name("MRS. M. SRIVIDYA"),
        Faculty::new("f5", 14).with_name("MS. J. NAGALAXMI"),
        Faculty::new("f6", 16).with_name("MRS. STVSAV. RAMYA"),
        Faculty::new("f7", 14).with_name("MRS. S. NAGAJYOTHI"),
        Faculty::new("f8", 12).with_name("MRS. T. ARUNA JYOTHI"),
        Faculty::new("f9", 10).with_name("DR. J. SRINIVAS"),
        Faculty::new("f10", 14).with_name("MRS. K. MOUNIKA"),
        Faculty::new("f11", 12).with_name("MR. A. RAJESH"),
        Faculty::new("f12", 12).with_name("MS. T. VIJAYA LAXMI"),
        Faculty::new("lib-f", 60).with_name("LIBRARIAN"),
        Faculty::new("pe-f", 60).with_name("PHYSICAL DIRECTOR"),
    ];
    let rooms = vec![
        Room::theory("r1").with_name("N 305").with_capacity(60),
        Room::theory("r2").with_name("N 313").with_capacity(60),
        Room::theory("r3").with_name("N 314").with_capacity(60),
        Room::theory("r4").with_name("N 304").with_capacity(60),
        Room::lab("r5").with_name("IT LAB 1").with_capacity(35),
        Room::lab("r6").with_name("IT LAB 2").with_capacity(35),
        Room::theory("r-lib").with_name("LIBRARY").with_capacity(120),
        Room::theory("r-ground").with_name("GROUND").with_capacity(200),
    ];
    let y4 = |s: Subject| s.for_term(4, 7).for_section("A");
    let y3a = |s: Subject| s.for_term(3, 5).for_section("A");
    let y3b = |s: Subject| s.for_term(3, 5).for_section("B");
    let subjects = vec![
        y4(Subject::theory("sub1", "f1").with_names("PC701IT", "Internet of Things", "IOT"))
            .with_sessions(3),
        y4(Subject::theory("sub2", "f2").with_names("PC702IT", "Big Data Analytics", "BDA"))
            .with_sessions(3),
        y4(Subject::theory("sub3", "f3").with_names("OE704ME", "Entrepreneurship", "ENT"))
            .with_sessions(3),
        y4(Subject::theory("sub4", "f4").with_names("PE734IT", "Natural Language Processing", "NLP"))
            .with_sessions(3),
        y4(Subject::theory("sub5", "f5").with_names("PE741IT", "Software Project Management", "SPM"))
            .with_sessions(3),
        y4(Subject::lab("sub6", "f1").with_names("PC751IT", "Internet of Things Lab", "IOT LAB"))
            .with_sessions(2),
        y3a(Subject::theory("a-dbms", "f6")).with_sessions(4),
        y3a(Subject::theory("a-os", "f7")).with_sessions(3),
        y3a(Subject::theory("a-cn", "f8")).with_sessions(3),
        y3a(Subject::theory("a-se", "f9")).with_sessions(2),
        y3a(Subject::lab("a-dbms-lab", "f10").with_lab_room("r5")).with_sessions(2),
        y3a(Subject::lab("a-os-lab", "f11")).with_sessions(2),
        y3b(Subject::theory("b-dbms", "f6")).with_sessions(4),
        y3b(Subject::theory("b-os", "f7")).with_sessions(3),
        y3b(Subject::theory("b-cn", "f8")).with_sessions(3),
        y3b(Subject::theory("b-ai", "f12")).with_sessions(3),
        y3b(Subject::lab("b-dbms-lab", "f10")).with_sessions(2),
        y3b(Subject::lab("b-os-lab", "f11")).with_sessions(2),
        Subject::theory("lib", "lib-f").with_names("LIB", "Library", "LIB").for_term(0, 0),
        Subject::theory("sports", "pe-f").with_names("SPORTS", "Sports", "SPORTS").for_term(0, 0),
    ];
    let sections = vec![
        Section::new("s1", 4, 7, "A")
            .with_class_teacher("f6")
            .with_default_room("r1")
            .with_strength(60),
        Section::new("s2", 3, 5, "B")
            .with_class_teacher("f7")
            .with_default_room("r2")
            .with_strength(66),
        Section::new("s3", 3, 5, "A")
            .with_class_teacher("f11")
            .with_default_room("r3")
            .with_strength(70),
    ];
    Catalog::new(faculty, rooms, subjects, sections)
}

/// Default configuration with fillers and final-year Friday/Saturday off.
pub(crate) fn department_config() -> GeneratorConfig {
    GeneratorConfig::default()
        .with_calendar(WeekCalendar::default().with_year_off_days(4, vec![Day::Fri, Day::Sat]))
        .with_fillers(
            FillerActivity::new("lib", "r-lib"),
            FillerActivity::new("sports", "r-ground"),
        )
}

fn is_filler(config: &GeneratorConfig, subject_id: &str) -> bool {
    config.fillers.as_ref().is_some_and(|f| {
        f.library.subject_id == subject_id || f.sports.subject_id == subject_id
    })
}

/// Asserts every hard invariant and the residual accounting of a timetable.
pub(crate) fn assert_invariants(tt: &Timetable, catalog: &Catalog, config: &GeneratorConfig) {
    let cal = &config.calendar;

    let mut faculty_slots = HashSet::new();
    let mut room_slots = HashSet::new();
    let mut section_slots: HashMap<(&str, Day, u8), Vec<Option<&str>>> = HashMap::new();
    for e in &tt.entries {
        assert!(!cal.is_lunch(e.period), "entry in lunch period: {e:?}");
        assert!(
            faculty_slots.insert((e.faculty_id.as_str(), e.day, e.period)),
            "faculty double-booked: {e:?}"
        );
        assert!(
            room_slots.insert((e.room_id.as_str(), e.day, e.period)),
            "room double-booked: {e:?}"
        );
        let section = catalog.section_by_id(&e.section_id).unwrap();
        assert!(
            cal.working_days(section.year).contains(&e.day),
            "entry on a non-working day: {e:?}"
        );
        section_slots
            .entry((e.section_id.as_str(), e.day, e.period))
            .or_default()
            .push(e.batch.as_deref());
    }

    for (slot, batches) in &section_slots {
        if batches.len() > 1 {
            assert!(
                batches.iter().all(Option::is_some),
                "whole class overlaps another booking at {slot:?}"
            );
            let distinct: HashSet<_> = batches.iter().collect();
            assert_eq!(distinct.len(), batches.len(), "batch double-booked at {slot:?}");
        }
    }

    let load = tt.faculty_load();
    for f in &catalog.faculty {
        let used = load.get(f.id.as_str()).copied().unwrap_or(0);
        assert!(used <= f.weekly_load, "{} over capacity: {used}", f.id);
    }

    let mut theory_days: HashMap<(&str, &str, Day), Vec<u8>> = HashMap::new();
    for e in &tt.entries {
        let subject = catalog.subject_by_id(&e.subject_id).unwrap();
        if subject.is_theory() && !is_filler(config, &subject.id) {
            theory_days
                .entry((e.subject_id.as_str(), e.section_id.as_str(), e.day))
                .or_default()
                .push(e.period);
        }
    }
    for ((subject_id, _, _), periods) in theory_days.iter_mut() {
        let subject = catalog.subject_by_id(subject_id).unwrap();
        let cap = match subject.kind {
            SubjectKind::Theory {
                daily_cap: Some(cap),
            } => cap,
            _ => config.daily_repetition_cap,
        };
        assert!(periods.len() as u32 <= cap, "{subject_id} over daily cap");
        periods.sort_unstable();
        let mut run = 1;
        for w in periods.windows(2) {
            run = if w[1] == w[0] + 1 { run + 1 } else { 1 };
            assert!(run <= config.max_consecutive, "{subject_id} run too long");
        }
    }

    for section in &catalog.sections {
        let lab_count = catalog
            .subjects_for(section)
            .filter(|s| s.is_lab() && s.sessions_per_week > 0)
            .count();
        let lab_labels = batch_labels(batch_count(config.batch_strategy, section, lab_count));

        for subject in catalog.subjects_for(section) {
            if is_filler(config, &subject.id) || subject.sessions_per_week == 0 {
                continue;
            }
            let expected: Vec<Option<&str>> = if subject.is_lab() {
                lab_labels.iter().map(Option::as_deref).collect()
            } else {
                vec![None]
            };

            let mut seen: BTreeSet<Option<&str>> = BTreeSet::new();
            seen.extend(
                tt.entries
                    .iter()
                    .filter(|e| e.subject_id == subject.id && e.section_id == section.id)
                    .map(|e| e.batch.as_deref()),
            );
            seen.extend(
                tt.unscheduled
                    .iter()
                    .filter(|u| u.subject_id == subject.id && u.section_id == section.id)
                    .map(|u| u.batch.as_deref()),
            );
            assert!(
                seen.iter().all(|label| expected.contains(label)),
                "{} / {}: unexpected batch labels {seen:?}",
                subject.id,
                section.id
            );

            for label in expected {
                let placed = tt
                    .entries
                    .iter()
                    .filter(|e| {
                        e.subject_id == subject.id
                            && e.section_id == section.id
                            && e.batch.as_deref() == label
                    })
                    .count() as u32;
                let missing: u32 = tt
                    .unscheduled
                    .iter()
                    .filter(|u| {
                        u.subject_id == subject.id
                            && u.section_id == section.id
                            && u.batch.as_deref() == label
                    })
                    .map(|u| u.sessions)
                    .sum();
                assert_eq!(
                    placed + missing,
                    subject.sessions_per_week,
                    "{} / {} / {label:?}",
                    subject.id,
                    section.id
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScheduledEntry, Unscheduled};

    fn two_batch_catalog() -> Catalog {
        Catalog::new(
            vec![Faculty::new("f1", 20), Faculty::new("f2", 20)],
            vec![Room::lab("lab0"), Room::lab("lab1")],
            vec![
                Subject::lab("dbms-lab", "f1").for_term(3, 5).with_sessions(2),
                Subject::lab("os-lab", "f2").for_term(3, 5).with_sessions(2),
            ],
            vec![Section::new("s1", 3, 5, "A")],
        )
    }

    fn batch_a_only() -> Timetable {
        let mut tt = Timetable::new();
        for (period, lab, room) in [(1, "dbms-lab", "lab0"), (2, "dbms-lab", "lab0")] {
            tt.entries.push(
                ScheduledEntry::new(Day::Mon, period, lab, "f1", room, "s1").with_batch("BATCH A"),
            );
        }
        for period in [1, 2] {
            tt.entries.push(
                ScheduledEntry::new(Day::Tue, period, "os-lab", "f2", "lab1", "s1")
                    .with_batch("BATCH A"),
            );
        }
        tt
    }

    #[test]
    fn test_accounting_covers_every_batch() {
        let catalog = two_batch_catalog();
        let config = GeneratorConfig::default();
        let mut tt = batch_a_only();
        for lab in ["dbms-lab", "os-lab"] {
            tt.unscheduled.push(Unscheduled::no_feasible_slot(
                lab,
                "s1",
                Some("BATCH B".into()),
                2,
            ));
        }
        assert_invariants(&tt, &catalog, &config);
    }

    #[test]
    #[should_panic(expected = "BATCH B")]
    fn test_vanished_batch_is_caught() {
        // BATCH B has neither entries nor residuals.
        assert_invariants(&batch_a_only(), &two_batch_catalog(), &GeneratorConfig::default());
    }
}
