/*!
# SLCSP Pipeline

Runs the whole batch: load plans.csv and zips.csv into [`ReferenceData`], read the target list,
resolve every target in order, and hand back the filled table.

All input is read fully into memory before resolution starts. Only input-level failures
(missing/unreadable file, missing required header) are errors; per-ZIP failures just leave the
rate blank.
*/

use crate::reference::ReferenceData;
use crate::resolver::{resolve_zip, Resolution, ResolutionSummary};
use slcsp_csvs::{read_plans_csv, read_slcsp_csv, read_zips_csv, TargetTable};
use std::path::PathBuf;
use tracing::{debug, info};

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] slcsp_csvs::CsvError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Paths of the three input tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlcspInputs {
    pub plans_csv: PathBuf,
    pub zips_csv: PathBuf,
    pub slcsp_csv: PathBuf,
}

/// Result of a full run, ready to be written out
#[derive(Debug, Clone)]
pub struct ResolvedSlcsp {
    pub table: TargetTable,
    pub summary: ResolutionSummary,
    pub skipped_plan_rows: usize,
    pub skipped_zip_rows: usize,
}

/// Load all three tables and resolve every target ZIP
pub fn resolve_slcsp(inputs: &SlcspInputs) -> PipelineResult<ResolvedSlcsp> {
    // Step 1: Read everything before resolving anything
    let plans = read_plans_csv(&inputs.plans_csv)?;
    let zips = read_zips_csv(&inputs.zips_csv)?;
    let mut table = read_slcsp_csv(&inputs.slcsp_csv)?;

    // Step 2: Build the lookup indexes
    let reference = ReferenceData::from_rows(&plans.rows, &zips.rows);
    info!(
        "Indexed {} rate areas with silver plans and {} zipcodes ({} ambiguous)",
        reference.silver_rates.area_count(),
        reference.zip_index.len(),
        reference.zip_index.ambiguous_count()
    );

    // Step 3: Resolve in input order
    let summary = resolve_targets(&reference, &mut table);
    info!("{}", summary);

    Ok(ResolvedSlcsp {
        table,
        summary,
        skipped_plan_rows: plans.skipped.len(),
        skipped_zip_rows: zips.skipped.len(),
    })
}

/// Fill the rate cell of every target row, keeping row order
pub fn resolve_targets(reference: &ReferenceData, table: &mut TargetTable) -> ResolutionSummary {
    let resolutions: Vec<Resolution> = table
        .zipcodes()
        .map(|zipcode| resolve_zip(reference, zipcode))
        .collect();

    let mut summary = ResolutionSummary::default();
    for (index, resolution) in resolutions.iter().enumerate() {
        debug!("{}: {}", table.zipcode(index), resolution);
        summary.record(resolution);
        table.set_rate(index, resolution.rate_field().as_deref());
    }

    summary
}
