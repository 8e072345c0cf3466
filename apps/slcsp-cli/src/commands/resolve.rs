use crate::config::{OutputTarget, RunConfig};
use crate::error::{CliError, CliResult};
use slcsp_resolver::{resolve_slcsp, write_slcsp_csv, TargetTable};
use std::fs;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub fn execute(config: RunConfig) -> CliResult<()> {
    info!("Plans CSV: {}", config.inputs.plans_csv.display());
    info!("Zips CSV: {}", config.inputs.zips_csv.display());
    info!("Slcsp CSV: {}", config.inputs.slcsp_csv.display());

    let resolved = resolve_slcsp(&config.inputs)?;

    if resolved.skipped_plan_rows > 0 || resolved.skipped_zip_rows > 0 {
        warn!(
            "Skipped {} malformed plan rows and {} malformed zip rows",
            resolved.skipped_plan_rows, resolved.skipped_zip_rows
        );
    }

    match &config.output {
        OutputTarget::Stdout => {
            write_slcsp_csv(io::stdout().lock(), &resolved.table)?;
        }
        OutputTarget::File(path) => {
            write_atomically(path, &resolved.table)?;
            println!("{}", resolved.summary);
            println!("Results written to: {}", path.display());
        }
    }

    Ok(())
}

/// Render the table next to `path` and move it into place only once it is complete
fn write_atomically(path: &Path, table: &TargetTable) -> CliResult<()> {
    let output_error = |source: io::Error| CliError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(output_error)?;
    write_slcsp_csv(&mut temp, table)?;
    temp.as_file().sync_all().map_err(output_error)?;

    // Keep the permissions of a file we are replacing
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions()).map_err(output_error)?;
    }

    temp.persist(path).map_err(|err| output_error(err.error))?;
    Ok(())
}
