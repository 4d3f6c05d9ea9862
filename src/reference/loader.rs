//! CSV override loader for reference tables
//!
//! Each table can be replaced by dropping a CSV file into the reference
//! directory; absent files keep their builtin values. Expected files:
//!
//! - `births.csv`: year,count
//! - `survival.csv`: age,probability (one row per age 0-100)
//! - `economy.csv`: year,gdp_billions,debt_billions,interest_rate,population
//! - `immigration.csv`: year,work,family,humanitarian
//!
//! COFOG spending snapshots have no CSV form; the builtin table is always
//! used.

use super::{
    ArrivalsByType, BirthHistory, EconomyRecord, EconomySeries, ImmigrationHistory, ReferenceData,
    SurvivalTable,
};
use crate::EngineError;
use std::path::Path;

/// Default reference-data directory relative to the working directory
pub const DEFAULT_REFERENCE_PATH: &str = "data/reference";

pub(super) fn load_from(dir: &Path) -> Result<ReferenceData, EngineError> {
    if !dir.is_dir() {
        return Err(EngineError::Io {
            path: dir.display().to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "reference directory does not exist",
            ),
        });
    }

    let mut data = ReferenceData::builtin();

    if let Some(records) = read_csv(dir, "births.csv", parse_birth_row)? {
        data.births = BirthHistory::from_records(records);
        log::info!("loaded {} birth records from CSV", data.births.last_year() - data.births.first_year() + 1);
    }

    if let Some(rows) = read_csv(dir, "survival.csv", parse_survival_row)? {
        let mut values = vec![0.0; rows.len()];
        for (age, probability) in rows {
            if age < values.len() {
                values[age] = probability;
            }
        }
        data.survival = SurvivalTable::from_values(values).map_err(EngineError::Reference)?;
    }

    if let Some(records) = read_csv(dir, "economy.csv", parse_economy_row)? {
        data.economy = EconomySeries::from_records(records);
    }

    if let Some(records) = read_csv(dir, "immigration.csv", parse_immigration_row)? {
        data.immigration = ImmigrationHistory::from_records(records);
    }

    data.validate()?;
    Ok(data)
}

/// Read a CSV file through a row parser; `Ok(None)` when the file is absent
fn read_csv<T>(
    dir: &Path,
    name: &str,
    parse: fn(&csv::StringRecord) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<Option<Vec<T>>, EngineError> {
    let path = dir.join(name);
    if !path.exists() {
        log::debug!("{} not present, keeping builtin table", name);
        return Ok(None);
    }

    let file = std::fs::File::open(&path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| EngineError::Csv {
            file: name.to_string(),
            source,
        })?;
        let row = parse(&record).map_err(|e| EngineError::Reference(format!("{}: {}", name, e)))?;
        rows.push(row);
    }
    Ok(Some(rows))
}

fn parse_birth_row(record: &csv::StringRecord) -> Result<(u32, f64), Box<dyn std::error::Error>> {
    let year: u32 = record[0].parse()?;
    let count: f64 = record[1].parse()?;
    Ok((year, count))
}

fn parse_survival_row(
    record: &csv::StringRecord,
) -> Result<(usize, f64), Box<dyn std::error::Error>> {
    let age: usize = record[0].parse()?;
    let probability: f64 = record[1].parse()?;
    Ok((age, probability))
}

fn parse_economy_row(
    record: &csv::StringRecord,
) -> Result<(u32, EconomyRecord), Box<dyn std::error::Error>> {
    let year: u32 = record[0].parse()?;
    Ok((
        year,
        EconomyRecord {
            gdp: record[1].parse()?,
            debt: record[2].parse()?,
            interest_rate: record[3].parse()?,
            population: record[4].parse()?,
        },
    ))
}

fn parse_immigration_row(
    record: &csv::StringRecord,
) -> Result<(u32, ArrivalsByType), Box<dyn std::error::Error>> {
    let year: u32 = record[0].parse()?;
    Ok((
        year,
        ArrivalsByType::new(record[1].parse()?, record[2].parse()?, record[3].parse()?),
    ))
}
