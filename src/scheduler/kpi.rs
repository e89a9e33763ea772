//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a generated or edited timetable.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Academic sessions | Placed entries that are not fillers |
//! | Filler entries | Library and sports bookings |
//! | Unscheduled sessions | Sum of residual periods |
//! | Faculty utilization | Periods taught / weekly capacity |
//! | Max utilization | Largest single faculty utilization |
//! | Pre-lunch fill rate | Occupied pre-lunch periods / pre-lunch periods, averaged over (section, working day) |

use std::collections::HashMap;

use crate::config::GeneratorConfig;
use crate::models::{Catalog, Timetable};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Placed entries excluding fillers.
    pub academic_sessions: usize,
    /// Placed filler entries.
    pub filler_entries: usize,
    /// Periods left unplaced.
    pub unscheduled_sessions: u32,
    /// Periods taught per faculty member (every catalog faculty appears).
    pub load_by_faculty: HashMap<String, u32>,
    /// Load / weekly capacity per faculty member with non-zero capacity.
    pub utilization_by_faculty: HashMap<String, f64>,
    /// Largest value in `utilization_by_faculty` (0.0 when empty).
    pub max_utilization: f64,
    /// Average fraction of pre-lunch periods in use (0.0..1.0).
    pub pre_lunch_fill_rate: f64,
}

impl TimetableKpi {
    /// Computes KPIs for a timetable.
    ///
    /// # Arguments
    /// * `timetable` - Entries and residuals to summarize.
    /// * `catalog` - Faculty capacities and the sections to average over.
    /// * `config` - Calendar shape and filler activity ids.
    pub fn calculate(timetable: &Timetable, catalog: &Catalog, config: &GeneratorConfig) -> Self {
        let is_filler = |subject_id: &str| {
            config.fillers.as_ref().is_some_and(|f| {
                f.library.subject_id == subject_id || f.sports.subject_id == subject_id
            })
        };

        let filler_entries = timetable
            .entries
            .iter()
            .filter(|e| is_filler(&e.subject_id))
            .count();

        let load = timetable.faculty_load();
        let mut load_by_faculty = HashMap::new();
        let mut utilization_by_faculty = HashMap::new();
        for f in &catalog.faculty {
            let used = load.get(f.id.as_str()).copied().unwrap_or(0);
            load_by_faculty.insert(f.id.clone(), used);
            if f.weekly_load > 0 {
                utilization_by_faculty.insert(f.id.clone(), used as f64 / f.weekly_load as f64);
            }
        }
        let max_utilization = utilization_by_faculty
            .values()
            .copied()
            .fold(0.0, f64::max);

        let calendar = &config.calendar;
        let pre_lunch = calendar.pre_lunch().count();
        let mut rate_sum = 0.0;
        let mut day_count = 0usize;
        if pre_lunch > 0 {
            for section in &catalog.sections {
                for day in calendar.working_days(section.year) {
                    let used = calendar
                        .pre_lunch()
                        .filter(|&p| timetable.entry_at(&section.id, day, p).is_some())
                        .count();
                    rate_sum += used as f64 / pre_lunch as f64;
                    day_count += 1;
                }
            }
        }
        let pre_lunch_fill_rate = if day_count == 0 {
            0.0
        } else {
            rate_sum / day_count as f64
        };

        Self {
            academic_sessions: timetable.entries.len() - filler_entries,
            filler_entries,
            unscheduled_sessions: timetable.unscheduled_count(),
            load_by_faculty,
            utilization_by_faculty,
            max_utilization,
            pre_lunch_fill_rate,
        }
    }

    /// Whether no faculty member exceeds `max_utilization` and at most
    /// `max_unscheduled` periods were left unplaced.
    pub fn meets_thresholds(&self, max_utilization: f64, max_unscheduled: u32) -> bool {
        self.max_utilization <= max_utilization && self.unscheduled_sessions <= max_unscheduled
    }
}
