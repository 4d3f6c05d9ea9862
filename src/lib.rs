//! Fiscal System - Population and public-finance projection engine
//!
//! This library provides:
//! - Cohort-based population projection (aging, mortality, births)
//! - An immigration model with age placement, emigration, and integration curves
//! - Per-person fiscal calculation with decile stratification and memoization
//! - GDP and government-debt projection under configurable scenarios
//! - A COFOG spending projection engine for cross-checking costs
//! - A year-by-year simulation driver with run-level summary statistics

pub mod demographics;
pub mod economy;
pub mod fiscal;
pub mod immigration;
pub mod population;
pub mod reference;
pub mod scenario;
pub mod simulation;
pub mod spending;

// Re-export commonly used types
pub use population::{CohortKey, ImmigrantType, PopulationState};
pub use reference::ReferenceData;
pub use scenario::ScenarioConfig;
pub use simulation::{
    initialize_state, simulate_range, SimulationOutcome, SimulationState, YearResult,
};

/// Errors surfaced by the projection engine
///
/// Most anomalies degrade gracefully (see the validation module); these are
/// the conditions a caller cannot recover from.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("reference data is invalid: {0}")]
    Reference(String),

    #[error("invalid simulation range {start}..={end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("unknown scenario preset '{0}'")]
    UnknownScenario(String),
}
