use slcsp_resolver::{resolve_slcsp, write_slcsp_csv, CsvError, PipelineError, SlcspInputs};
use std::fs;
use tempfile::TempDir;

const PLANS_CSV: &str = "\
plan_id,state,metal_level,rate,rate_area
74449NR9870320,MO,Silver,245.2,3
26325VH2723968,MO,Silver,251.4,3
92136OR2934271,MO,Silver,245.20,3
74449NR9870321,MO,Gold,200.00,3
11111AA1111111,KS,Silver,290.05,6
22222BB2222222,KS,Silver,290.05,6
33333CC3333333,WI,Silver,200.00,11
44444DD4444444,WI,Silver,210.00,11
55555EE5555555,WI,Silver,190.00,15
66666FF6666666,WI,Silver,195.00,15
77777GG7777777,AL,Silver,abc,1
";

const ZIPS_CSV: &str = "\
zipcode,state,county_code,name,rate_area
64148,MO,29095,Jackson,3
64148,MO,29047,Clay,03
67118,KS,20077,Harper,6
54923,WI,55137,Waushara,11
54923,WI,55139,Winnebago,15
40813,KY,21013,Bell,8
36749,AL,01001
";

const SLCSP_CSV: &str = "\
zipcode,rate
64148,
67118,
54923,
40813,
00000,
64148,
";

/// Write the three fixture files into a fresh directory
fn fixture_dir(plans: &str, zips: &str, slcsp: &str) -> (TempDir, SlcspInputs) {
    let dir = TempDir::new().unwrap();
    let inputs = SlcspInputs {
        plans_csv: dir.path().join("plans.csv"),
        zips_csv: dir.path().join("zips.csv"),
        slcsp_csv: dir.path().join("slcsp.csv"),
    };
    fs::write(&inputs.plans_csv, plans).unwrap();
    fs::write(&inputs.zips_csv, zips).unwrap();
    fs::write(&inputs.slcsp_csv, slcsp).unwrap();
    (dir, inputs)
}

/// Resolve the fixtures and render the output table as text
fn render(inputs: &SlcspInputs) -> String {
    let resolved = resolve_slcsp(inputs).unwrap();
    let mut out = Vec::new();
    write_slcsp_csv(&mut out, &resolved.table).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_output() {
    let (_dir, inputs) = fixture_dir(PLANS_CSV, ZIPS_CSV, SLCSP_CSV);

    let output = render(&inputs);

    assert_eq!(
        output,
        "\
zipcode,rate
64148,251.40
67118,
54923,
40813,
00000,
64148,251.40
"
    );
}

#[test]
fn test_end_to_end_summary_and_skips() {
    let (_dir, inputs) = fixture_dir(PLANS_CSV, ZIPS_CSV, SLCSP_CSV);

    let resolved = resolve_slcsp(&inputs).unwrap();

    assert_eq!(resolved.table.len(), 6);
    assert_eq!(resolved.summary.total(), 6);
    assert_eq!(resolved.summary.resolved, 2);
    assert_eq!(resolved.summary.ambiguous, 1);
    assert_eq!(resolved.summary.not_found, 1);
    assert_eq!(resolved.summary.insufficient_data, 2);
    assert_eq!(resolved.skipped_plan_rows, 1);
    assert_eq!(resolved.skipped_zip_rows, 1);
}

#[test]
fn test_untouched_target_table_round_trips() {
    let slcsp = "zipcode,rate\n99999,\n88888,\n";
    let (_dir, inputs) = fixture_dir(PLANS_CSV, ZIPS_CSV, slcsp);

    assert_eq!(render(&inputs), slcsp);
}

#[test]
fn test_missing_input_is_fatal() {
    let (_dir, mut inputs) = fixture_dir(PLANS_CSV, ZIPS_CSV, SLCSP_CSV);
    inputs.zips_csv = inputs.zips_csv.with_file_name("missing.csv");

    let err = resolve_slcsp(&inputs).unwrap_err();

    assert!(matches!(err, PipelineError::Csv(CsvError::Open { .. })));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn test_missing_header_is_fatal() {
    let plans = "state,metal_level,rate\nMO,Silver,245.2\n";
    let (_dir, inputs) = fixture_dir(plans, ZIPS_CSV, SLCSP_CSV);

    let err = resolve_slcsp(&inputs).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Csv(CsvError::MissingHeader { .. })
    ));
}
