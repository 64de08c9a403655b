//! CSV exports of trucks and loads, used to seed the in-memory fleet store.
//!
//! `trucks.csv` columns: `company_id,id,unit_number,status`.
//! `loads.csv` columns: `company_id,id,truck_id,pickup_date,delivery_date,deleted`.

mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::fleet::domain::{CompanyId, Load, Truck, TruckId};

#[derive(Debug)]
pub enum FleetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate {
        line: usize,
        field: &'static str,
        value: String,
    },
    InvalidFlag {
        line: usize,
        value: String,
    },
}

impl std::fmt::Display for FleetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetImportError::Io(err) => write!(f, "failed to read fleet export: {}", err),
            FleetImportError::Csv(err) => write!(f, "invalid fleet CSV data: {}", err),
            FleetImportError::InvalidDate { line, field, value } => write!(
                f,
                "line {}: {} '{}' is not an RFC 3339 timestamp or YYYY-MM-DD date",
                line, field, value
            ),
            FleetImportError::InvalidFlag { line, value } => {
                write!(f, "line {}: deleted flag '{}' is not a boolean", line, value)
            }
        }
    }
}

impl std::error::Error for FleetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetImportError::Io(err) => Some(err),
            FleetImportError::Csv(err) => Some(err),
            FleetImportError::InvalidDate { .. } | FleetImportError::InvalidFlag { .. } => None,
        }
    }
}

impl From<std::io::Error> for FleetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FleetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Trucks and loads for any number of tenants, as read from an export.
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    pub trucks: Vec<Truck>,
    pub loads: Vec<Load>,
}

impl FleetSnapshot {
    pub fn companies(&self) -> Vec<CompanyId> {
        let mut companies: Vec<CompanyId> = self
            .trucks
            .iter()
            .map(|truck| truck.company_id.clone())
            .chain(self.loads.iter().map(|load| load.company_id.clone()))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        companies.sort();
        companies
    }
}

pub struct FleetCsvImporter;

impl FleetCsvImporter {
    pub fn from_paths<P, Q>(trucks: P, loads: Q) -> Result<FleetSnapshot, FleetImportError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let trucks = std::fs::File::open(trucks)?;
        let loads = std::fs::File::open(loads)?;
        Self::from_readers(trucks, loads)
    }

    pub fn from_readers<T: Read, L: Read>(
        trucks: T,
        loads: L,
    ) -> Result<FleetSnapshot, FleetImportError> {
        Ok(FleetSnapshot {
            trucks: Self::trucks_from_reader(trucks)?,
            loads: Self::loads_from_reader(loads)?,
        })
    }

    /// Later rows repeating a tenant's truck id are dropped so the first row wins.
    pub fn trucks_from_reader<R: Read>(reader: R) -> Result<Vec<Truck>, FleetImportError> {
        let mut seen: HashSet<(CompanyId, TruckId)> = HashSet::new();
        let mut trucks = Vec::new();

        for truck in parser::parse_trucks(reader)? {
            if !seen.insert((truck.company_id.clone(), truck.id.clone())) {
                warn!(
                    company = %truck.company_id,
                    truck = truck.id.0.as_str(),
                    "duplicate truck row skipped"
                );
                continue;
            }
            trucks.push(truck);
        }

        Ok(trucks)
    }

    pub fn loads_from_reader<R: Read>(reader: R) -> Result<Vec<Load>, FleetImportError> {
        parser::parse_loads(reader)
    }
}
