use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::normalizer::{normalize_status, normalize_unit_number, parse_flag};
use super::FleetImportError;
use crate::fleet::domain::{CompanyId, Load, LoadId, Truck, TruckId};
use crate::fleet::utilization::parse_instant;

/// Header row occupies line 1, so data row `n` (zero based) sits on line `n + 2`.
const FIRST_DATA_LINE: usize = 2;

pub(crate) fn parse_trucks<R: Read>(reader: R) -> Result<Vec<Truck>, FleetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut trucks = Vec::new();

    for record in csv_reader.deserialize::<TruckRow>() {
        let row = record?;
        let unit_number = row
            .unit_number
            .as_deref()
            .map(normalize_unit_number)
            .filter(|unit| !unit.is_empty())
            .unwrap_or_else(|| row.id.clone());

        trucks.push(Truck {
            id: TruckId(row.id),
            company_id: CompanyId(row.company_id),
            unit_number,
            status: normalize_status(row.status.as_deref()),
        });
    }

    Ok(trucks)
}

pub(crate) fn parse_loads<R: Read>(reader: R) -> Result<Vec<Load>, FleetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut loads = Vec::new();

    for (index, record) in csv_reader.deserialize::<LoadRow>().enumerate() {
        let row = record?;
        let line = index + FIRST_DATA_LINE;

        let pickup_date = parse_date_field(row.pickup_date.as_deref(), "pickup_date", line)?;
        let delivery_date =
            parse_date_field(row.delivery_date.as_deref(), "delivery_date", line)?;
        let deleted = match row.deleted.as_deref() {
            None => false,
            Some(raw) => parse_flag(raw).ok_or_else(|| FleetImportError::InvalidFlag {
                line,
                value: raw.to_string(),
            })?,
        };

        loads.push(Load {
            id: LoadId(row.id),
            company_id: CompanyId(row.company_id),
            truck_id: row.truck_id.map(TruckId),
            pickup_date,
            delivery_date,
            deleted,
        });
    }

    Ok(loads)
}

fn parse_date_field(
    value: Option<&str>,
    field: &'static str,
    line: usize,
) -> Result<Option<DateTime<Utc>>, FleetImportError> {
    match value {
        None => Ok(None),
        Some(raw) => parse_instant(raw)
            .map(Some)
            .ok_or_else(|| FleetImportError::InvalidDate {
                line,
                field,
                value: raw.to_string(),
            }),
    }
}

#[derive(Debug, Deserialize)]
struct TruckRow {
    company_id: String,
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    unit_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoadRow {
    company_id: String,
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    truck_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pickup_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    delivery_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deleted: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
