//! Timetable generator: runs the placement phases in order.
//!
//! # Algorithm
//!
//! 1. Build a fresh [`GenerationState`] with faculty capacities registered.
//! 2. Lab phase: batch rotations in contiguous blocks.
//! 3. Theory phase: lectures spread across the week.
//! 4. Gap-filling phase: library and sports fillers.
//!
//! Each phase commits greedily; there is no backtracking, so a feasible
//! timetable may be missed. Anything that could not be placed is reported
//! in [`Timetable::unscheduled`] rather than failing the run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::filler::fill_gaps;
use super::lab::place_labs;
use super::state::GenerationState;
use super::theory::place_theory;
use crate::config::{ConfigError, GeneratorConfig};
use crate::models::{Catalog, Timetable};

/// Multi-phase greedy timetable generator.
///
/// # Example
///
/// ```
/// use u_timetable::config::GeneratorConfig;
/// use u_timetable::models::{Catalog, Faculty, Room, Section, Subject};
/// use u_timetable::scheduler::TimetableGenerator;
///
/// let catalog = Catalog::new(
///     vec![Faculty::new("f1", 10)],
///     vec![Room::theory("r1")],
///     vec![Subject::theory("sub1", "f1").for_term(3, 5).with_sessions(3)],
///     vec![Section::new("s1", 3, 5, "A")],
/// );
/// let generator = TimetableGenerator::new(GeneratorConfig::default().with_seed(42)).unwrap();
/// let timetable = generator.generate(&catalog);
/// assert_eq!(timetable.entry_count(), 3);
/// assert!(timetable.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: GeneratorConfig,
}

impl TimetableGenerator {
    /// Creates a generator after validating the configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a timetable, seeding from the configuration when a seed is
    /// set and from OS entropy otherwise.
    pub fn generate(&self, catalog: &Catalog) -> Timetable {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with_rng(catalog, &mut rng)
    }

    /// Generates a timetable drawing all randomness from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> Timetable {
        let mut state = GenerationState::new(&catalog.faculty);

        place_labs(&mut state, catalog, &self.config, rng);
        place_theory(&mut state, catalog, &self.config, rng);
        fill_gaps(&mut state, catalog, &self.config, rng);

        let timetable = state.into_timetable();
        info!(
            sections = catalog.sections.len(),
            entries = timetable.entry_count(),
            unscheduled = timetable.unscheduled_count(),
            "timetable generated"
        );
        timetable
    }
}
