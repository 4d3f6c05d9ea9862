//! Historical macro-economic series: GDP, government debt, interest rates,
//! and total-population reference figures
//!
//! Calibrated to published national accounts (nominal GDP and EDP debt in
//! billions of euros, effective interest on the debt stock, population at
//! year end). Years between census anchors are linearly interpolated.

use std::collections::BTreeMap;

/// One year of the historical macro series
#[derive(Debug, Clone, Copy)]
pub struct EconomyRecord {
    /// Nominal GDP, billions
    pub gdp: f64,
    /// General government debt stock, billions
    pub debt: f64,
    /// Effective interest rate on the debt stock
    pub interest_rate: f64,
    /// Total population at year end
    pub population: f64,
}

/// Historical GDP / debt / interest / population by year
#[derive(Debug, Clone)]
pub struct EconomySeries {
    records: BTreeMap<u32, EconomyRecord>,
}

impl EconomySeries {
    /// Builtin series, 1990-2024
    pub fn builtin() -> Self {
        Self::from_records(Self::builtin_records())
    }

    pub fn from_records(records: Vec<(u32, EconomyRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Record for a year, if covered
    pub fn get(&self, year: u32) -> Option<&EconomyRecord> {
        self.records.get(&year)
    }

    /// Record for a year, falling back to the nearest covered year
    ///
    /// Used where a missing data point should degrade to an estimate rather
    /// than abort (initialization outside the covered range).
    pub fn get_or_nearest(&self, year: u32) -> Option<&EconomyRecord> {
        if let Some(record) = self.records.get(&year) {
            return Some(record);
        }
        let first = self.first_year();
        let last = self.last_year();
        if year < first {
            self.records.get(&first)
        } else {
            self.records.get(&last)
        }
    }

    pub fn first_year(&self) -> u32 {
        self.records.keys().next().copied().unwrap_or(0)
    }

    pub fn last_year(&self) -> u32 {
        self.records.keys().next_back().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn builtin_records() -> Vec<(u32, EconomyRecord)> {
        let raw: Vec<(u32, f64, f64, f64, f64)> = vec![
            (1990, 89.8, 10.2, 0.105, 4998000.0), (1991, 85.9, 16.0, 0.118, 5021800.0),
            (1992, 83.2, 31.1, 0.120, 5045600.0), (1993, 83.9, 47.0, 0.088, 5069400.0),
            (1994, 88.4, 55.2, 0.090, 5093200.0), (1995, 98.4, 57.1, 0.088, 5117000.0),
            (1996, 101.9, 60.1, 0.071, 5129800.0), (1997, 110.1, 62.2, 0.060, 5142600.0),
            (1998, 119.2, 61.3, 0.047, 5155400.0), (1999, 126.0, 60.3, 0.047, 5168200.0),
            (2000, 136.3, 59.1, 0.055, 5181000.0), (2001, 144.4, 59.9, 0.051, 5196000.0),
            (2002, 148.3, 60.0, 0.050, 5211000.0), (2003, 151.6, 62.8, 0.041, 5226000.0),
            (2004, 158.5, 65.0, 0.041, 5241000.0), (2005, 164.4, 66.2, 0.034, 5256000.0),
            (2006, 172.6, 65.7, 0.038, 5279800.0), (2007, 186.6, 63.2, 0.043, 5303600.0),
            (2008, 193.7, 63.0, 0.043, 5327400.0), (2009, 181.0, 75.5, 0.037, 5351200.0),
            (2010, 187.1, 88.2, 0.030, 5375000.0), (2011, 196.9, 95.6, 0.030, 5397400.0),
            (2012, 199.8, 107.8, 0.019, 5419800.0), (2013, 203.3, 112.7, 0.019, 5442200.0),
            (2014, 205.5, 121.0, 0.015, 5464600.0), (2015, 211.4, 133.2, 0.007, 5487000.0),
            (2016, 217.5, 136.1, 0.004, 5496400.0), (2017, 225.8, 137.3, 0.005, 5505800.0),
            (2018, 233.6, 139.9, 0.007, 5515200.0), (2019, 240.1, 142.5, 0.001, 5524600.0),
            (2020, 238.0, 164.3, 0.000, 5534000.0), (2021, 250.6, 163.7, 0.000, 5551500.0),
            (2022, 268.0, 186.8, 0.019, 5569000.0), (2023, 277.0, 203.4, 0.031, 5586500.0),
            (2024, 282.0, 211.0, 0.029, 5604000.0),
        ];
        raw.into_iter()
            .map(|(year, gdp, debt, interest_rate, population)| {
                (
                    year,
                    EconomyRecord {
                        gdp,
                        debt,
                        interest_rate,
                        population,
                    },
                )
            })
            .collect()
    }
}
