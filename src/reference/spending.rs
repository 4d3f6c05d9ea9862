//! Historical government expenditure by COFOG function
//!
//! Five-year snapshots of general government expenditure (millions of euros)
//! by the ten top-level COFOG divisions; intermediate historical years are
//! linearly interpolated between snapshots.

use std::collections::BTreeMap;

/// Top-level COFOG expenditure divisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CofogGroup {
    GeneralPublicServices,
    Defence,
    PublicOrderSafety,
    EconomicAffairs,
    EnvironmentalProtection,
    HousingCommunity,
    Health,
    RecreationCulture,
    Education,
    SocialProtection,
}

impl CofogGroup {
    pub const ALL: [CofogGroup; 10] = [
        CofogGroup::GeneralPublicServices,
        CofogGroup::Defence,
        CofogGroup::PublicOrderSafety,
        CofogGroup::EconomicAffairs,
        CofogGroup::EnvironmentalProtection,
        CofogGroup::HousingCommunity,
        CofogGroup::Health,
        CofogGroup::RecreationCulture,
        CofogGroup::Education,
        CofogGroup::SocialProtection,
    ];

    /// COFOG division code
    pub fn code(&self) -> &'static str {
        match self {
            CofogGroup::GeneralPublicServices => "01",
            CofogGroup::Defence => "02",
            CofogGroup::PublicOrderSafety => "03",
            CofogGroup::EconomicAffairs => "04",
            CofogGroup::EnvironmentalProtection => "05",
            CofogGroup::HousingCommunity => "06",
            CofogGroup::Health => "07",
            CofogGroup::RecreationCulture => "08",
            CofogGroup::Education => "09",
            CofogGroup::SocialProtection => "10",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CofogGroup::GeneralPublicServices => "General public services",
            CofogGroup::Defence => "Defence",
            CofogGroup::PublicOrderSafety => "Public order and safety",
            CofogGroup::EconomicAffairs => "Economic affairs",
            CofogGroup::EnvironmentalProtection => "Environmental protection",
            CofogGroup::HousingCommunity => "Housing and community amenities",
            CofogGroup::Health => "Health",
            CofogGroup::RecreationCulture => "Recreation, culture and religion",
            CofogGroup::Education => "Education",
            CofogGroup::SocialProtection => "Social protection",
        }
    }
}

/// Historical expenditure snapshots by COFOG group (millions)
#[derive(Debug, Clone)]
pub struct SpendingHistory {
    /// Snapshot year -> expenditure per group, in `CofogGroup::ALL` order
    snapshots: BTreeMap<u32, [f64; 10]>,
}

impl SpendingHistory {
    pub fn builtin() -> Self {
        let mut snapshots = BTreeMap::new();
        snapshots.insert(1990, [6200.0, 1600.0, 1300.0, 5300.0, 200.0, 400.0, 6000.0, 1100.0, 5400.0, 16000.0]);
        snapshots.insert(1995, [9400.0, 1900.0, 1600.0, 6500.0, 250.0, 500.0, 6900.0, 1400.0, 6600.0, 23500.0]);
        snapshots.insert(2000, [10200.0, 2100.0, 1800.0, 7300.0, 300.0, 500.0, 8100.0, 1700.0, 7700.0, 24700.0]);
        snapshots.insert(2005, [11600.0, 2400.0, 2200.0, 8400.0, 350.0, 550.0, 10600.0, 2000.0, 9400.0, 28900.0]);
        snapshots.insert(2010, [14900.0, 2800.0, 2600.0, 10300.0, 450.0, 600.0, 14000.0, 2500.0, 12000.0, 38500.0]);
        snapshots.insert(2015, [17700.0, 2900.0, 2900.0, 11500.0, 500.0, 650.0, 16500.0, 3000.0, 13400.0, 46500.0]);
        snapshots.insert(2020, [20300.0, 3200.0, 3200.0, 13200.0, 550.0, 700.0, 18800.0, 3300.0, 14300.0, 52800.0]);
        snapshots.insert(2024, [24000.0, 6200.0, 3700.0, 13500.0, 600.0, 700.0, 21500.0, 3600.0, 15500.0, 57000.0]);
        Self { snapshots }
    }

    /// Expenditure by group for a historical year, interpolating between
    /// snapshots; `None` outside the covered range
    pub fn get(&self, year: u32) -> Option<[f64; 10]> {
        if let Some(values) = self.snapshots.get(&year) {
            return Some(*values);
        }
        let before = self.snapshots.range(..year).next_back()?;
        let after = self.snapshots.range(year..).next()?;
        let span = (after.0 - before.0) as f64;
        let t = (year - before.0) as f64 / span;
        let mut values = [0.0; 10];
        for (i, value) in values.iter_mut().enumerate() {
            *value = before.1[i] + (after.1[i] - before.1[i]) * t;
        }
        Some(values)
    }

    /// Base-year expenditure per group (latest snapshot)
    pub fn base_year_values(&self) -> (u32, [f64; 10]) {
        self.snapshots
            .iter()
            .next_back()
            .map(|(year, values)| (*year, *values))
            .unwrap_or((0, [0.0; 10]))
    }

    pub fn first_year(&self) -> u32 {
        self.snapshots.keys().next().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup() {
        let history = SpendingHistory::builtin();
        let y2020 = history.get(2020).unwrap();
        assert_eq!(y2020[6], 18_800.0); // Health
        assert!(history.get(1985).is_none());
    }

    #[test]
    fn test_interpolated_year() {
        let history = SpendingHistory::builtin();
        let y2022 = history.get(2022).unwrap();
        // Health halfway between the 2020 and 2024 snapshots
        assert!((y2022[6] - 20_150.0).abs() < 1.0);
    }

    #[test]
    fn test_base_year() {
        let (year, values) = SpendingHistory::builtin().base_year_values();
        assert_eq!(year, 2024);
        let total: f64 = values.iter().sum();
        assert!(total > 140_000.0);
    }
}
