use slcsp_csvs::{PlanCsvRow, ZipCsvRow};
use std::fmt;

/// A rate area: the (state, rate area number) pair that joins zips.csv to plans.csv.
///
/// Kept as two structured fields so that e.g. ("A1", 23) and ("A", 123) never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RateArea {
    pub state: String,
    pub rate_area: u32,
}

impl RateArea {
    pub fn new(state: impl Into<String>, rate_area: u32) -> Self {
        Self {
            state: state.into(),
            rate_area,
        }
    }
}

impl From<&PlanCsvRow> for RateArea {
    fn from(row: &PlanCsvRow) -> Self {
        Self::new(row.state.as_str(), row.rate_area)
    }
}

impl From<&ZipCsvRow> for RateArea {
    fn from(row: &ZipCsvRow) -> Self {
        Self::new(row.state.as_str(), row.rate_area)
    }
}

impl fmt::Display for RateArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.state, self.rate_area)
    }
}
