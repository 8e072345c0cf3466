/*!
# CSV Validation & I/O

Reading and writing for the three SLCSP tables.

Reference tables (`plans.csv`, `zips.csv`) are read leniently: a row that does not parse is
skipped, logged and reported back to the caller, and loading continues. Missing headers are
fatal because every row would fail. The target table (`slcsp.csv`) is read verbatim so it can be
written back with only its rate column changed.
*/

use crate::{
    errors::{CsvError, CsvResult},
    schemas::{
        CsvRead, PlanCsvRow, ReferenceRow, SkippedRow, TargetTable, ZipCsvRow, SLCSP_CSV_HEADERS,
    },
};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

// ================================================================================================
// CSV Reading with Validation
// ================================================================================================

/// Read plans.csv, skipping malformed rows
pub fn read_plans_csv<P: AsRef<Path>>(path: P) -> CsvResult<CsvRead<PlanCsvRow>> {
    read_plans_csv_from_reader(open(path.as_ref())?)
}

pub fn read_plans_csv_from_reader<R: Read>(reader: R) -> CsvResult<CsvRead<PlanCsvRow>> {
    read_reference(reader)
}

/// Read zips.csv, skipping malformed rows
pub fn read_zips_csv<P: AsRef<Path>>(path: P) -> CsvResult<CsvRead<ZipCsvRow>> {
    read_zips_csv_from_reader(open(path.as_ref())?)
}

pub fn read_zips_csv_from_reader<R: Read>(reader: R) -> CsvResult<CsvRead<ZipCsvRow>> {
    read_reference(reader)
}

/// Read slcsp.csv verbatim
pub fn read_slcsp_csv<P: AsRef<Path>>(path: P) -> CsvResult<TargetTable> {
    read_slcsp_csv_from_reader(open(path.as_ref())?)
}

pub fn read_slcsp_csv_from_reader<R: Read>(reader: R) -> CsvResult<TargetTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = locate_headers(&headers, SLCSP_CSV_HEADERS, "slcsp.csv")?;
    let (zipcode_column, rate_column) = (columns[0], columns[1]);

    // Every target row must come back out, so a row the reader cannot decode is fatal
    let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;

    info!("Read {} target ZIP codes from slcsp.csv", rows.len());

    Ok(TargetTable::new(headers, rows, zipcode_column, rate_column))
}

fn read_reference<T: ReferenceRow, R: Read>(reader: R) -> CsvResult<CsvRead<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    locate_headers(&headers, T::REQUIRED_HEADERS, T::FILE_TYPE)?;

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if is_row_error(&err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                skip(&mut skipped, T::FILE_TYPE, line, err.to_string());
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => match row.problem() {
                Some(problem) => skip(&mut skipped, T::FILE_TYPE, line, problem),
                None => rows.push(row),
            },
            Err(err) => skip(&mut skipped, T::FILE_TYPE, line, err.to_string()),
        }
    }

    info!(
        "Read {} rows from {} ({} skipped)",
        rows.len(),
        T::FILE_TYPE,
        skipped.len()
    );

    Ok(CsvRead { rows, skipped })
}

fn skip(skipped: &mut Vec<SkippedRow>, file_type: &str, line: u64, reason: String) {
    warn!("{}: skipping line {}: {}", file_type, line, reason);
    skipped.push(SkippedRow { line, reason });
}

/// Errors confined to a single record; anything else (I/O) aborts the read
fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Utf8 { .. }
            | csv::ErrorKind::Deserialize { .. }
    )
}

fn open(path: &Path) -> CsvResult<File> {
    File::open(path).map_err(|source| CsvError::Open {
        path: path.to_path_buf(),
        source,
    })
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Write the target table: original header, then every row in original order
pub fn write_slcsp_csv<W: Write>(writer: W, table: &TargetTable) -> CsvResult<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(table.headers())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

// ================================================================================================
// Header Validation
// ================================================================================================

/// Column index of each expected header, in the order given
fn locate_headers(
    actual: &StringRecord,
    expected: &[&str],
    file_type: &str,
) -> CsvResult<Vec<usize>> {
    expected
        .iter()
        .map(|header| {
            let mut positions = actual
                .iter()
                .enumerate()
                .filter(|(_, name)| name.trim() == *header)
                .map(|(i, _)| i);

            let first = positions.next().ok_or_else(|| CsvError::MissingHeader {
                file: file_type.to_string(),
                header: header.to_string(),
            })?;

            if positions.next().is_some() {
                return Err(CsvError::DuplicateHeader {
                    file: file_type.to_string(),
                    header: header.to_string(),
                });
            }

            Ok(first)
        })
        .collect()
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    const PLANS: &str = "\
plan_id,state,metal_level,rate,rate_area
74449NR9870320,GA,Silver,298.62,7
26325VH2723968,FL,Silver,421.43,60
92136OR2934271,MO,Gold,300.00,3
";

    const SLCSP: &str = "zipcode,rate\n64148,\n67118,\n40813,\n";

    #[test]
    fn test_read_plans_csv() {
        let read = read_plans_csv_from_reader(PLANS.as_bytes()).unwrap();

        assert_eq!(read.rows.len(), 3);
        assert!(read.skipped.is_empty());
        assert_eq!(read.rows[1].state, "FL");
        assert_eq!(read.rows[1].rate_area, 60);
        assert_eq!(read.rows[1].rate, dec!(421.43));
    }

    #[test]
    fn test_malformed_reference_rows_are_skipped() {
        let data = "\
zipcode,state,county_code,name,rate_area
36749,AL,01001,Autauga,11
36703,AL,01001
,AL,01001,Autauga,11
36003,AL,01001,Autauga,eleven
36008,AL,01001,Autauga,11
";
        let read = read_zips_csv_from_reader(data.as_bytes()).unwrap();

        let zips: Vec<&str> = read.rows.iter().map(|r| r.zipcode.as_str()).collect();
        assert_eq!(zips, vec!["36749", "36008"]);

        let lines: Vec<u64> = read.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn test_unparsable_rate_is_skipped_not_zeroed() {
        let data = "state,rate_area,metal_level,rate\nGA,7,Silver,\nGA,7,Silver,abc\nGA,7,Silver,1.5\n";
        let read = read_plans_csv_from_reader(data.as_bytes()).unwrap();

        assert_eq!(read.rows.len(), 1);
        assert_eq!(read.rows[0].rate, dec!(1.5));
        assert_eq!(read.skipped.len(), 2);
    }

    #[test]
    fn test_reference_fields_are_trimmed() {
        let data = "zipcode,state,rate_area\n 36749 , AL , 011 \n";
        let read = read_zips_csv_from_reader(data.as_bytes()).unwrap();

        assert_eq!(read.rows[0].zipcode, "36749");
        assert_eq!(read.rows[0].state, "AL");
        assert_eq!(read.rows[0].rate_area, 11);
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let data = "zipcode,state,county_code\n36749,AL,01001\n";
        let err = read_zips_csv_from_reader(data.as_bytes()).unwrap_err();

        assert!(matches!(err, CsvError::MissingHeader { ref header, .. } if header == "rate_area"));
        assert!(err.to_string().contains("zips.csv"));
    }

    #[test]
    fn test_duplicate_target_header_is_fatal() {
        let data = "zipcode,rate,rate\n64148,,\n";
        let err = read_slcsp_csv_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CsvError::DuplicateHeader { .. }));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_plans_csv("/definitely/not/here/plans.csv").unwrap_err();

        assert!(matches!(err, CsvError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here/plans.csv"));
    }

    #[test]
    fn test_slcsp_round_trip_is_exact() {
        let table = read_slcsp_csv_from_reader(SLCSP.as_bytes()).unwrap();

        let mut out = Vec::new();
        write_slcsp_csv(&mut out, &table).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), SLCSP);
    }

    #[test]
    fn test_slcsp_round_trip_keeps_extra_columns_and_order() {
        let data = "rate,zipcode,note\n,64148,first\n,67118,second\n";
        let mut table = read_slcsp_csv_from_reader(data.as_bytes()).unwrap();
        table.set_rate(1, Some("212.35"));

        let mut out = Vec::new();
        write_slcsp_csv(&mut out, &table).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rate,zipcode,note\n,64148,first\n212.35,67118,second\n"
        );
    }

    #[test]
    fn test_read_slcsp_csv_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SLCSP.as_bytes()).unwrap();

        let table = read_slcsp_csv(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        let zips: Vec<&str> = table.zipcodes().collect();
        assert_eq!(zips, vec!["64148", "67118", "40813"]);
    }
}
