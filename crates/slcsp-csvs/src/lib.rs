/*!
# SLCSP CSV Schema Definitions

This crate provides the CSV schemas and I/O for the three SLCSP tables.

## Schema Files

### Plans CSV (`plans.csv`)
Health plan catalog. Columns read (by name, any order, extra columns ignored):
- `state`: Two-letter state code
- `rate_area`: Rate area number within the state
- `metal_level`: Metal level; only `Silver` plans matter downstream
- `rate`: Monthly premium (decimal)

### Zips CSV (`zips.csv`)
ZIP to rate area mapping. Columns read:
- `zipcode`: Five-digit ZIP code (text)
- `state`: Two-letter state code
- `rate_area`: Rate area number within the state

### Slcsp CSV (`slcsp.csv`)
Target list with columns `zipcode` and `rate` (initially empty). Read and written verbatim,
apart from the rate column.

## Usage

```rust,no_run
use slcsp_csvs::{read_plans_csv, read_slcsp_csv, read_zips_csv, write_slcsp_csv, CsvResult};

fn example() -> CsvResult<()> {
    let plans = read_plans_csv("plans.csv")?;
    let zips = read_zips_csv("zips.csv")?;
    let mut targets = read_slcsp_csv("slcsp.csv")?;

    println!("{} plans, {} skipped", plans.rows.len(), plans.skipped.len());
    println!("{} zip rows", zips.rows.len());

    targets.set_rate(0, Some("245.20"));
    write_slcsp_csv(std::io::stdout(), &targets)?;
    Ok(())
}
```
*/

pub mod errors;
pub mod schemas;
pub mod validation;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use schemas::{
    CsvRead, PlanCsvRow, SkippedRow, TargetTable, ZipCsvRow, PLANS_CSV_REQUIRED_HEADERS,
    SILVER_METAL_LEVEL, SLCSP_CSV_HEADERS, ZIPS_CSV_REQUIRED_HEADERS,
};
pub use validation::{
    read_plans_csv, read_plans_csv_from_reader, read_slcsp_csv, read_slcsp_csv_from_reader,
    read_zips_csv, read_zips_csv_from_reader, write_slcsp_csv,
};
