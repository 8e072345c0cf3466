use crate::error::{CliError, CliResult};
use slcsp_resolver::SlcspInputs;
use std::path::{Path, PathBuf};

/// Output path value that selects standard output
pub const STDOUT_MARKER: &str = "-";

/// Where the answered target table goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub inputs: SlcspInputs,
    pub output: OutputTarget,
}

impl RunConfig {
    /// Build a run configuration from the command line paths.
    ///
    /// With no explicit output the target list is rewritten in place.
    pub fn new(
        plans_csv: PathBuf,
        zips_csv: PathBuf,
        slcsp_csv: PathBuf,
        output: Option<PathBuf>,
    ) -> CliResult<Self> {
        for path in [&plans_csv, &zips_csv, &slcsp_csv] {
            if !path.is_file() {
                return Err(CliError::MissingFile(path.clone()));
            }
        }

        if same_file(&plans_csv, &zips_csv)
            || same_file(&plans_csv, &slcsp_csv)
            || same_file(&zips_csv, &slcsp_csv)
        {
            return Err(CliError::InvalidConfig(
                "plans, zips and slcsp inputs must be three different files".to_string(),
            ));
        }

        let output = match output {
            Some(path) if path.as_os_str() == STDOUT_MARKER => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::File(slcsp_csv.clone()),
        };

        if let OutputTarget::File(path) = &output {
            if same_file(path, &plans_csv) || same_file(path, &zips_csv) {
                return Err(CliError::InvalidConfig(format!(
                    "output {} would overwrite reference data",
                    path.display()
                )));
            }
        }

        Ok(Self {
            inputs: SlcspInputs {
                plans_csv,
                zips_csv,
                slcsp_csv,
            },
            output,
        })
    }
}

/// Compare canonical paths when both exist, raw paths otherwise
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
