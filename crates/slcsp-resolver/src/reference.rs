/*!
# Reference Indexes

In-memory lookup structures built once from the plan and ZIP tables:

- [`SilverRates`]: rate area → distinct silver plan rates
- [`ZipIndex`]: ZIP code → its unique rate area, or [`ZipAssignment::Ambiguous`]

Both are read-only once built.
*/

use crate::rate_area::RateArea;
use rust_decimal::Decimal;
use slcsp_csvs::{PlanCsvRow, ZipCsvRow};
use std::collections::{BTreeSet, HashMap};

/// Distinct silver rates per rate area.
///
/// Rates are kept in a `BTreeSet`, so numerically equal rates (`100` and `100.00`)
/// collapse on insert and iteration is ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilverRates {
    by_area: HashMap<RateArea, BTreeSet<Decimal>>,
}

impl SilverRates {
    pub fn from_plans(plans: &[PlanCsvRow]) -> Self {
        let mut by_area: HashMap<RateArea, BTreeSet<Decimal>> = HashMap::new();

        for plan in plans.iter().filter(|plan| plan.is_silver()) {
            by_area
                .entry(RateArea::from(plan))
                .or_default()
                .insert(plan.rate);
        }

        Self { by_area }
    }

    pub fn rates(&self, area: &RateArea) -> Option<&BTreeSet<Decimal>> {
        self.by_area.get(area)
    }

    /// Number of rate areas with at least one silver plan
    pub fn area_count(&self) -> usize {
        self.by_area.len()
    }
}

/// What a ZIP code maps to after all of its zips.csv rows have been seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipAssignment {
    /// Every row for this ZIP agrees on one rate area
    Unique(RateArea),
    /// Rows for this ZIP disagree; the ZIP can never be resolved
    Ambiguous,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZipIndex {
    by_zip: HashMap<String, ZipAssignment>,
}

impl ZipIndex {
    pub fn from_zips(zips: &[ZipCsvRow]) -> Self {
        let mut index = Self::default();
        for row in zips {
            index.insert(row);
        }
        index
    }

    fn insert(&mut self, row: &ZipCsvRow) {
        let area = RateArea::from(row);

        self.by_zip
            .entry(row.zipcode.clone())
            .and_modify(|assignment| {
                if let ZipAssignment::Unique(existing) = assignment {
                    if *existing != area {
                        *assignment = ZipAssignment::Ambiguous;
                    }
                }
            })
            .or_insert(ZipAssignment::Unique(area));
    }

    pub fn get(&self, zipcode: &str) -> Option<&ZipAssignment> {
        self.by_zip.get(zipcode)
    }

    pub fn len(&self) -> usize {
        self.by_zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_zip.is_empty()
    }

    pub fn ambiguous_count(&self) -> usize {
        self.by_zip
            .values()
            .filter(|assignment| **assignment == ZipAssignment::Ambiguous)
            .count()
    }
}

/// Everything the resolver needs, loaded fully before resolution starts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub silver_rates: SilverRates,
    pub zip_index: ZipIndex,
}

impl ReferenceData {
    pub fn from_rows(plans: &[PlanCsvRow], zips: &[ZipCsvRow]) -> Self {
        Self {
            silver_rates: SilverRates::from_plans(plans),
            zip_index: ZipIndex::from_zips(zips),
        }
    }
}

/// Distinct rates in ascending order. Applying it to its own output changes nothing.
pub fn dedup_sorted<I>(rates: I) -> Vec<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    rates
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
