//! Simulation state for one year

use crate::economy::EconomicState;
use crate::population::PopulationState;
use crate::reference::HISTORICAL_CUTOFF;

/// Full state of the simulation at the end of one year
///
/// Immutable once produced: transitions build a new instance, the previous
/// one is superseded rather than mutated.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub year: u32,
    pub population: PopulationState,
    pub economy: EconomicState,
    pub is_historical: bool,
}

impl SimulationState {
    pub fn new(year: u32, population: PopulationState, economy: EconomicState) -> Self {
        Self {
            year,
            population,
            economy,
            is_historical: year <= HISTORICAL_CUTOFF,
        }
    }
}
