/*!
# SLCSP Resolver

Resolves a ZIP code to its second lowest cost silver plan rate:

1. The ZIP must map to exactly one rate area ([`ZipAssignment::Unique`]).
2. That rate area must have at least two *distinct* silver rates.
3. The answer is the second distinct rate in ascending order, rendered with two decimals.

Plans priced identically count once, so two silver plans tied at the lowest price do not make
that price the second lowest.
*/

use crate::reference::{ReferenceData, ZipAssignment};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of resolving one ZIP code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Second lowest distinct silver rate
    Resolved(Decimal),
    /// The ZIP spans more than one rate area
    Ambiguous,
    /// The ZIP does not appear in zips.csv
    NotFound,
    /// The rate area has fewer than two distinct silver rates
    InsufficientData { distinct_rates: usize },
}

impl Resolution {
    /// Value for the output `rate` cell; `None` leaves it blank
    pub fn rate_field(&self) -> Option<String> {
        match self {
            Resolution::Resolved(rate) => Some(format_rate(*rate)),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Resolved(rate) => write!(f, "{}", format_rate(*rate)),
            Resolution::Ambiguous => write!(f, "ambiguous rate area"),
            Resolution::NotFound => write!(f, "zipcode not found"),
            Resolution::InsufficientData { distinct_rates } => {
                write!(f, "only {} distinct silver rate(s)", distinct_rates)
            }
        }
    }
}

/// Resolve a single ZIP code against the loaded reference data
pub fn resolve_zip(reference: &ReferenceData, zipcode: &str) -> Resolution {
    let area = match reference.zip_index.get(zipcode.trim()) {
        None => return Resolution::NotFound,
        Some(ZipAssignment::Ambiguous) => return Resolution::Ambiguous,
        Some(ZipAssignment::Unique(area)) => area,
    };

    let Some(rates) = reference.silver_rates.rates(area) else {
        return Resolution::InsufficientData { distinct_rates: 0 };
    };

    match second_lowest_distinct(rates) {
        Some(rate) => Resolution::Resolved(rate),
        None => Resolution::InsufficientData {
            distinct_rates: rates.len(),
        },
    }
}

/// Second element of an already-distinct ascending set
pub fn second_lowest_distinct(rates: &BTreeSet<Decimal>) -> Option<Decimal> {
    rates.iter().nth(1).copied()
}

/// Money formatting: always exactly two decimal places (`221.4` -> `"221.40"`)
pub fn format_rate(rate: Decimal) -> String {
    let mut rounded = rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

// ================================================================================================
// Batch Summary
// ================================================================================================

/// Outcome counts for a batch of ZIP codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub resolved: usize,
    pub ambiguous: usize,
    pub not_found: usize,
    pub insufficient_data: usize,
}

impl ResolutionSummary {
    pub fn record(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Resolved(_) => self.resolved += 1,
            Resolution::Ambiguous => self.ambiguous += 1,
            Resolution::NotFound => self.not_found += 1,
            Resolution::InsufficientData { .. } => self.insufficient_data += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.resolved + self.ambiguous + self.not_found + self.insufficient_data
    }

    pub fn blank(&self) -> usize {
        self.total() - self.resolved
    }
}

impl fmt::Display for ResolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} zipcodes: {} resolved, {} ambiguous, {} not found, {} without two distinct silver rates",
            self.total(),
            self.resolved,
            self.ambiguous,
            self.not_found,
            self.insufficient_data
        )
    }
}

// ================================================================================================
// Tests
// ================================================================================================
