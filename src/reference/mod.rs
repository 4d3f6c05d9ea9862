//! Reference tables consumed by the engine: birth cohorts, survival,
//! macro-economic history, immigration arrivals, and COFOG expenditure
//!
//! Loading is an explicit phase: construct a `ReferenceData` (builtin or from
//! CSV) and validate it before any simulation step runs. There is no lazy
//! fetching; a simulation either starts with complete tables or not at all.

mod demographics;
mod economy;
mod migration;
mod spending;
pub mod loader;

pub use demographics::{BirthHistory, SurvivalTable, MAX_AGE, MORTALITY_CEILING};
pub use economy::{EconomyRecord, EconomySeries};
pub use migration::{ArrivalsByType, ImmigrationHistory};
pub use spending::{CofogGroup, SpendingHistory};

use crate::EngineError;
use std::path::Path;

/// Last year covered by the historical record; later years are projected
pub const HISTORICAL_CUTOFF: u32 = 2024;

/// Base year for fiscal unit costs and wage levels; growth adjustments apply
/// only to later years
pub const BASE_YEAR: u32 = 2024;

/// Total fertility rate observed in the base year
pub const BASE_TFR: f64 = 1.26;

/// Container for all reference tables
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub births: BirthHistory,
    pub survival: SurvivalTable,
    pub economy: EconomySeries,
    pub immigration: ImmigrationHistory,
    pub spending: SpendingHistory,
}

impl ReferenceData {
    /// Builtin tables calibrated to published series
    pub fn builtin() -> Self {
        Self {
            births: BirthHistory::builtin(),
            survival: SurvivalTable::builtin(),
            economy: EconomySeries::builtin(),
            immigration: ImmigrationHistory::builtin(),
            spending: SpendingHistory::builtin(),
        }
    }

    /// Load tables from CSV files in a directory, falling back to builtin
    /// values for files that are absent
    ///
    /// A present-but-malformed file is an error; only a missing file falls
    /// back. See the loader module for the expected file names and shapes.
    pub fn from_csv_path(path: &Path) -> Result<Self, EngineError> {
        loader::load_from(path)
    }

    /// Check structural completeness of the tables
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.births.is_empty() {
            return Err(EngineError::Reference("birth history is empty".into()));
        }
        if self.economy.is_empty() {
            return Err(EngineError::Reference("economy series is empty".into()));
        }
        if self.immigration.is_empty() {
            return Err(EngineError::Reference("immigration history is empty".into()));
        }
        if self.spending.is_empty() {
            return Err(EngineError::Reference("spending history is empty".into()));
        }
        if self.births.last_year() < HISTORICAL_CUTOFF {
            return Err(EngineError::Reference(format!(
                "birth history ends {} before the historical cutoff {}",
                self.births.last_year(),
                HISTORICAL_CUTOFF
            )));
        }
        Ok(())
    }
}
