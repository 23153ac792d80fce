#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{fs, path::Path};

use cosmian_logger::log_init;
use cosmian_signature_validation::{
    DiagnosticData, Indication, ValidationExecutor, ValidationOptions,
    reexport::cosmian_crypto_constraints::ConstraintsParameters,
};
use tempfile::TempDir;

const POLICY: &str = "../../test_data/policy/default-only-constraint-policy.toml";
const UNIVERSIGN: &str = "../../test_data/diagnostic/universign.json";
const PAST_SIGNATURE: &str = "../../test_data/diagnostic/past-signature-validation.json";

#[test]
fn validate_files() {
    log_init("info");
    let policy = ConstraintsParameters::load_from_file(Path::new(POLICY)).unwrap();
    let diagnostic = DiagnosticData::load_from_file(Path::new(UNIVERSIGN)).unwrap();
    let reports = ValidationExecutor::new(policy, diagnostic)
        .unwrap()
        .execute();

    let simple_report = reports.simple_report();
    assert_eq!(simple_report.signatures_count(), 1);
    assert_eq!(simple_report.valid_signatures_count(), 1);
    let id = simple_report.first_signature_id().unwrap();
    assert_eq!(simple_report.indication(id), Some(Indication::TotalPassed));
    assert_eq!(
        reports.detailed_report().first_signature_id(),
        Some(id)
    );
    assert_eq!(reports.detailed_report().timestamp_ids().len(), 1);
    assert_eq!(reports.detailed_report().revocation_ids().len(), 1);

    let json: serde_json::Value = serde_json::from_str(&reports.to_json_string().unwrap()).unwrap();
    assert_eq!(
        json["simple_report"]["signatures"][0]["indication"],
        "TOTAL_PASSED"
    );
    assert_eq!(
        json["detailed_report"]["validation_time"],
        "2018-02-06T09:39:33Z"
    );
}

#[test]
fn recommended_policy_rejects_expired_algorithms() {
    log_init("info");
    let diagnostic = DiagnosticData::load_from_file(Path::new(PAST_SIGNATURE)).unwrap();
    let executor = ValidationExecutor::new(ConstraintsParameters::recommended(), diagnostic)
        .unwrap()
        .with_options(ValidationOptions {
            current_time: Some(time::macros::datetime!(2035-01-01 0:00 UTC)),
            past_signature_validation: true,
        });
    let reports = executor.execute();
    let id = reports.simple_report().first_signature_id().unwrap();
    // the timestamps are expired as well: no proof of existence is left
    assert_eq!(
        reports.simple_report().indication(id),
        Some(Indication::Indeterminate)
    );
}

#[test]
fn malformed_diagnostic_files() {
    log_init("info");
    let tmp_dir = TempDir::new().unwrap();

    let missing = tmp_dir.path().join("missing.json");
    let err = DiagnosticData::load_from_file(&missing).unwrap_err();
    assert!(err.to_string().contains("missing.json"));

    let not_json = tmp_dir.path().join("not_json.json");
    fs::write(&not_json, "validation_time = 2018").unwrap();
    assert!(DiagnosticData::load_from_file(&not_json).is_err());

    let dangling = tmp_dir.path().join("dangling.json");
    fs::write(
        &dangling,
        r#"{
            "validation_time": "2018-02-06T09:39:33Z",
            "signatures": [{
                "id": "S-1",
                "digest_algorithm": "SHA256",
                "timestamp_ids": ["T-1"]
            }]
        }"#,
    )
    .unwrap();
    let err = DiagnosticData::load_from_file(&dangling).unwrap_err();
    assert!(err.to_string().starts_with("Invalid diagnostic data"), "{err}");

    // a copy written back is read identically
    let diagnostic = DiagnosticData::load_from_file(Path::new(UNIVERSIGN)).unwrap();
    let copy = tmp_dir.path().join("copy.json");
    fs::write(&copy, diagnostic.to_json_string().unwrap()).unwrap();
    assert_eq!(DiagnosticData::load_from_file(&copy).unwrap(), diagnostic);
}
