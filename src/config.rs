//! Generator configuration.
//!
//! Collects the weekly calendar and the policy knobs the placement phases
//! read: repetition and adjacency caps, preferred lab blocks, how lab
//! batches are counted, and which filler activities close gaps.
//!
//! All types derive serde so callers can load the configuration from
//! whatever format they persist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::WeekCalendar;

/// A contiguous run of periods that can host one lab rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabBlock {
    /// First period of the block.
    pub start: u8,
    /// Number of periods.
    pub len: u8,
}

impl LabBlock {
    /// Creates a block starting at `start`.
    pub const fn new(start: u8, len: u8) -> Self {
        Self { start, len }
    }

    /// Periods covered, in order. Stops at `u8::MAX`.
    pub fn periods(&self) -> impl Iterator<Item = u8> {
        (self.start..=u8::MAX).take(usize::from(self.len))
    }

    /// Last period covered. `None` for an empty block or one that runs
    /// past `u8::MAX`.
    #[inline]
    pub fn end(&self) -> Option<u8> {
        self.len
            .checked_sub(1)
            .and_then(|extra| self.start.checked_add(extra))
    }
}

/// How many parallel batches a section's labs are split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStrategy {
    /// One batch per distinct lab subject; batches rotate through the labs.
    PerLabSubject,
    /// `ceil(strength / max_per_room)` batches. Sections without a declared
    /// strength get a single batch.
    ByHeadcount { max_per_room: u32 },
}

/// A filler activity with its fixed room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerActivity {
    pub subject_id: String,
    pub room_id: String,
}

impl FillerActivity {
    pub fn new(subject_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            room_id: room_id.into(),
        }
    }
}

/// Filler activities used by gap filling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerConfig {
    /// Fills empty pre-lunch periods.
    pub library: FillerActivity,
    /// Fills a bounded number of post-lunch periods.
    pub sports: FillerActivity,
}

/// Configuration errors detected before generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("calendar has no working days or no periods")]
    EmptyCalendar,
    #[error("lunch period {lunch} is outside 1..={periods}")]
    LunchOutOfRange { lunch: u8, periods: u8 },
    #[error("lab block starting at period {start} with length {len} does not fit the day")]
    LabBlockOutOfRange { start: u8, len: u8 },
    #[error("lab block starting at period {start} spans the lunch period")]
    LabBlockCrossesLunch { start: u8 },
    #[error("no lab blocks configured")]
    NoLabBlocks,
    #[error("daily repetition cap must be at least 1")]
    ZeroRepetitionCap,
    #[error("maximum consecutive periods must be at least 1")]
    ZeroConsecutiveCap,
    #[error("lab room headcount capacity must be at least 1")]
    ZeroHeadcountCapacity,
}

/// Timetable generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Weekly grid.
    pub calendar: WeekCalendar,
    /// Max sessions of one subject per section per day.
    pub daily_repetition_cap: u32,
    /// Max run of period-adjacent sessions of one subject.
    pub max_consecutive: u32,
    /// Candidate lab blocks in preference order.
    pub lab_blocks: Vec<LabBlock>,
    /// Lab batch derivation.
    pub batch_strategy: BatchStrategy,
    /// Gap-filling activities. `None` disables gap filling.
    pub fillers: Option<FillerConfig>,
    /// Max post-lunch periods filled per section and day.
    pub max_post_lunch_fillers: u32,
    /// Random seed for repeatable output. `None` = OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            calendar: WeekCalendar::default(),
            daily_repetition_cap: 2,
            max_consecutive: 2,
            lab_blocks: vec![
                LabBlock::new(1, 2),
                LabBlock::new(2, 2),
                LabBlock::new(6, 2),
                LabBlock::new(3, 2),
            ],
            batch_strategy: BatchStrategy::PerLabSubject,
            fillers: None,
            max_post_lunch_fillers: 1,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly calendar.
    pub fn with_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the per-day repetition cap.
    pub fn with_daily_repetition_cap(mut self, cap: u32) -> Self {
        self.daily_repetition_cap = cap;
        self
    }

    /// Sets the adjacency cap.
    pub fn with_max_consecutive(mut self, max: u32) -> Self {
        self.max_consecutive = max;
        self
    }

    /// Replaces the candidate lab blocks.
    pub fn with_lab_blocks(mut self, blocks: Vec<LabBlock>) -> Self {
        self.lab_blocks = blocks;
        self
    }

    /// Sets the batch strategy.
    pub fn with_batch_strategy(mut self, strategy: BatchStrategy) -> Self {
        self.batch_strategy = strategy;
        self
    }

    /// Enables gap filling.
    pub fn with_fillers(mut self, library: FillerActivity, sports: FillerActivity) -> Self {
        self.fillers = Some(FillerConfig { library, sports });
        self
    }

    /// Sets the post-lunch filler cap.
    pub fn with_max_post_lunch_fillers(mut self, max: u32) -> Self {
        self.max_post_lunch_fillers = max;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for structural errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cal = &self.calendar;
        if cal.days.is_empty() || cal.periods_per_day == 0 {
            return Err(ConfigError::EmptyCalendar);
        }
        if !cal.contains_period(cal.lunch_period) {
            return Err(ConfigError::LunchOutOfRange {
                lunch: cal.lunch_period,
                periods: cal.periods_per_day,
            });
        }
        if self.lab_blocks.is_empty() {
            return Err(ConfigError::NoLabBlocks);
        }
        for block in &self.lab_blocks {
            let fits = block.start >= 1
                && block
                    .end()
                    .is_some_and(|end| end <= cal.periods_per_day);
            if !fits {
                return Err(ConfigError::LabBlockOutOfRange {
                    start: block.start,
                    len: block.len,
                });
            }
            if block.periods().any(|p| cal.is_lunch(p)) {
                return Err(ConfigError::LabBlockCrossesLunch { start: block.start });
            }
        }
        if self.daily_repetition_cap == 0 {
            return Err(ConfigError::ZeroRepetitionCap);
        }
        if self.max_consecutive == 0 {
            return Err(ConfigError::ZeroConsecutiveCap);
        }
        if let BatchStrategy::ByHeadcount { max_per_room: 0 } = self.batch_strategy {
            return Err(ConfigError::ZeroHeadcountCapacity);
        }
        Ok(())
    }
}
