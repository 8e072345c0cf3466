mod pipeline;
mod rate_area;
mod reference;
mod resolver;

pub use pipeline::*;
pub use rate_area::RateArea;
pub use reference::{dedup_sorted, ReferenceData, SilverRates, ZipAssignment, ZipIndex};
pub use resolver::*;

// Re-export the CSV layer so callers need a single dependency
pub use slcsp_csvs::{write_slcsp_csv, CsvError, TargetTable};
