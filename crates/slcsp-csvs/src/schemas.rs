/*!
# CSV Schema Definitions

This module defines the CSV schemas for the three SLCSP tables:
- `plans.csv` (reference, read by header name)
- `zips.csv` (reference, read by header name)
- `slcsp.csv` (target list, kept verbatim so it can be written back unchanged)

Reference tables may carry extra columns (`plan_id`, `county_code`, `name`, ...) in any
order; only the columns listed in the `*_REQUIRED_HEADERS` constants are read.
*/

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Metal level of the plans that take part in rate selection
pub const SILVER_METAL_LEVEL: &str = "Silver";

// ================================================================================================
// Plans CSV Schema
// ================================================================================================

/// Headers that must be present in plans.csv (any order, extra columns allowed)
pub const PLANS_CSV_REQUIRED_HEADERS: &[&str] = &["state", "rate_area", "metal_level", "rate"];

/// Row structure for plans.csv
///
/// **File**: `plans.csv`
/// **Purpose**: Health plan catalog, one row per plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanCsvRow {
    /// Two-letter state code (e.g. "MO")
    pub state: String,

    /// Rate area number within the state
    pub rate_area: u32,

    /// Metal level ("Bronze", "Silver", "Gold", ...)
    pub metal_level: String,

    /// Monthly premium
    #[serde(
        deserialize_with = "deserialize_decimal",
        serialize_with = "serialize_decimal"
    )]
    pub rate: Decimal,
}

impl PlanCsvRow {
    pub fn is_silver(&self) -> bool {
        self.metal_level == SILVER_METAL_LEVEL
    }
}

// ================================================================================================
// Zips CSV Schema
// ================================================================================================

/// Headers that must be present in zips.csv (any order, extra columns allowed)
pub const ZIPS_CSV_REQUIRED_HEADERS: &[&str] = &["zipcode", "state", "rate_area"];

/// Row structure for zips.csv
///
/// **File**: `zips.csv`
/// **Purpose**: Maps ZIP codes to rate areas. A ZIP that spans several counties appears on
/// several rows, possibly with different rate areas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZipCsvRow {
    /// Five-digit ZIP code, kept as text so leading zeros survive
    pub zipcode: String,

    /// Two-letter state code
    pub state: String,

    /// Rate area number within the state
    pub rate_area: u32,
}

// ================================================================================================
// Slcsp CSV Schema
// ================================================================================================

/// Headers that must be present in slcsp.csv
pub const SLCSP_CSV_HEADERS: &[&str] = &["zipcode", "rate"];

/// The target list exactly as read: original header, original rows, original order.
///
/// Only the `rate` cell of each row is ever changed, so writing the table back reproduces
/// every other byte of field content and the row sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    zipcode_column: usize,
    rate_column: usize,
}

impl TargetTable {
    pub fn new(
        headers: StringRecord,
        rows: Vec<StringRecord>,
        zipcode_column: usize,
        rate_column: usize,
    ) -> Self {
        Self {
            headers,
            rows,
            zipcode_column,
            rate_column,
        }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Trimmed zipcode of row `index`, or "" when the row is too short to have one
    pub fn zipcode(&self, index: usize) -> &str {
        self.rows
            .get(index)
            .and_then(|row| row.get(self.zipcode_column))
            .map(str::trim)
            .unwrap_or("")
    }

    /// Zipcodes in input order
    pub fn zipcodes(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).map(move |index| self.zipcode(index))
    }

    /// Rate cell of row `index` as currently stored
    pub fn rate(&self, index: usize) -> Option<&str> {
        self.rows
            .get(index)
            .and_then(|row| row.get(self.rate_column))
    }

    /// Fill (or blank, with `None`) the rate cell of row `index`.
    ///
    /// Rows shorter than the rate column are padded with empty fields.
    pub fn set_rate(&mut self, index: usize, rate: Option<&str>) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };

        let mut fields: Vec<String> = row.iter().map(str::to_owned).collect();
        if fields.len() <= self.rate_column {
            fields.resize(self.rate_column + 1, String::new());
        }
        fields[self.rate_column] = rate.unwrap_or_default().to_owned();

        *row = StringRecord::from(fields);
    }
}

// ================================================================================================
// Read Results
// ================================================================================================

/// A reference row that failed to parse and was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source file (0 when unknown)
    pub line: u64,
    pub reason: String,
}

/// Rows read from a reference table, plus the rows that were skipped
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRead<T> {
    pub rows: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

/// Per-table schema information used by the generic reference reader
pub(crate) trait ReferenceRow: serde::de::DeserializeOwned {
    const FILE_TYPE: &'static str;
    const REQUIRED_HEADERS: &'static [&'static str];

    /// Semantic problem with an otherwise well-typed row
    fn problem(&self) -> Option<String>;
}

impl ReferenceRow for PlanCsvRow {
    const FILE_TYPE: &'static str = "plans.csv";
    const REQUIRED_HEADERS: &'static [&'static str] = PLANS_CSV_REQUIRED_HEADERS;

    fn problem(&self) -> Option<String> {
        if self.state.is_empty() {
            return Some("empty state".to_string());
        }
        if self.metal_level.is_empty() {
            return Some("empty metal_level".to_string());
        }
        None
    }
}

impl ReferenceRow for ZipCsvRow {
    const FILE_TYPE: &'static str = "zips.csv";
    const REQUIRED_HEADERS: &'static [&'static str] = ZIPS_CSV_REQUIRED_HEADERS;

    fn problem(&self) -> Option<String> {
        if self.zipcode.is_empty() {
            return Some("empty zipcode".to_string());
        }
        if self.state.is_empty() {
            return Some("empty state".to_string());
        }
        None
    }
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

/// Deserialize a decimal string (e.g. "245.2") without going through f64
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Decimal::from_str(s.trim()).map_err(serde::de::Error::custom)
}

fn serialize_decimal<S>(rate: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&rate.to_string())
}

// ================================================================================================
// Tests
// ================================================================================================
