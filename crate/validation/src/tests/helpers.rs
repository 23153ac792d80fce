use cosmian_crypto_constraints::{ConstraintsParameters, Context, CryptographicConstraint};

use crate::{
    DiagnosticData, Indication, MessageTag, ValidationExecutor, ValidationOptions,
    reports::Reports,
};

pub(super) const SHA1: &str = "SHA1";
pub(super) const SHA256: &str = "SHA256";
pub(super) const RSA: &str = "RSA";
pub(super) const DSA: &str = "DSA";
pub(super) const RSA2048: &str = "RSA2048";
pub(super) const RSA4096: &str = "RSA4096";

/// Larger than every key of the test diagnostic data.
pub(super) const LARGE_MINIMUM_KEY_SIZE: u32 = 4096;

pub(super) fn default_only_policy() -> ConstraintsParameters {
    ConstraintsParameters::from_toml_str(include_str!(
        "../../../../test_data/policy/default-only-constraint-policy.toml"
    ))
    .expect("default only policy should parse")
}

pub(super) fn all_constraint_specified_policy() -> ConstraintsParameters {
    ConstraintsParameters::from_toml_str(include_str!(
        "../../../../test_data/policy/all-constraint-specified-policy.toml"
    ))
    .expect("all constraint specified policy should parse")
}

/// One signature with one timestamp and one OCSP response, all `SHA256` / `RSA` 2048.
pub(super) fn universign_diagnostic() -> DiagnosticData {
    DiagnosticData::from_json_str(include_str!(
        "../../../../test_data/diagnostic/universign.json"
    ))
    .expect("diagnostic data should parse")
}

/// A `SHA256` / `RSA` 2048 signature validated mid 2019, timestamped on 2018-06-01.
pub(super) fn past_signature_diagnostic() -> DiagnosticData {
    DiagnosticData::from_json_str(include_str!(
        "../../../../test_data/diagnostic/past-signature-validation.json"
    ))
    .expect("diagnostic data should parse")
}

pub(super) fn validate(policy: &ConstraintsParameters, diagnostic: &DiagnosticData) -> Reports {
    validate_with_options(policy, diagnostic, ValidationOptions::default())
}

pub(super) fn validate_with_options(
    policy: &ConstraintsParameters,
    diagnostic: &DiagnosticData,
    options: ValidationOptions,
) -> Reports {
    ValidationExecutor::new(policy.clone(), diagnostic.clone())
        .expect("diagnostic data should be consistent")
        .with_options(options)
        .execute()
}

pub(super) fn validate_past_signature(
    policy: &ConstraintsParameters,
    diagnostic: &DiagnosticData,
) -> Reports {
    validate_with_options(
        policy,
        diagnostic,
        ValidationOptions {
            past_signature_validation: true,
            ..ValidationOptions::default()
        },
    )
}

pub(super) fn first_signature_id(reports: &Reports) -> String {
    reports
        .simple_report()
        .first_signature_id()
        .expect("there should be a signature")
        .to_owned()
}

pub(super) fn signature_indication(reports: &Reports) -> Indication {
    let id = first_signature_id(reports);
    reports
        .simple_report()
        .indication(&id)
        .expect("the signature should be in the simple report")
}

pub(super) fn first_timestamp_id(reports: &Reports) -> String {
    reports.detailed_report().timestamp_ids()[0].to_owned()
}

pub(super) fn first_revocation_id(reports: &Reports) -> String {
    reports.detailed_report().revocation_ids()[0].to_owned()
}

/// Whether `tag` was recorded for the signature building block, as an error
/// or, under a lenient level, as a warning.
pub(super) fn signature_message_present(reports: &Reports, tag: MessageTag) -> bool {
    let id = first_signature_id(reports);
    let detailed_report = reports.detailed_report();
    detailed_report.errors(&id).contains(&tag) || detailed_report.warnings(&id).contains(&tag)
}

pub(super) fn assert_error_presence(reports: &Reports, id: &str, tag: MessageTag, present: bool) {
    assert_eq!(
        reports.detailed_report().errors(id).contains(&tag),
        present,
        "{tag} presence in the errors of {id}"
    );
}

/// Indication of the SAV conclusion of a revocation or timestamp building block.
pub(super) fn sav_indication(reports: &Reports, id: &str) -> Indication {
    reports
        .detailed_report()
        .building_block(id)
        .and_then(|block| block.sav())
        .expect("the building block should have a SAV conclusion")
        .indication()
}

/// The policy with its default constraint transformed by `update`.
pub(super) fn update_default(
    policy: &ConstraintsParameters,
    update: impl FnOnce(CryptographicConstraint) -> CryptographicConstraint,
) -> ConstraintsParameters {
    let default = policy
        .cryptographic
        .clone()
        .expect("the policy should have a default constraint");
    policy.clone().with_cryptographic(update(default))
}

/// The policy with the override of `context` transformed by `update`.
pub(super) fn update_context(
    policy: &ConstraintsParameters,
    context: Context,
    update: impl FnOnce(CryptographicConstraint) -> CryptographicConstraint,
) -> ConstraintsParameters {
    let overridden = policy
        .context_constraints(context)
        .cryptographic
        .clone()
        .expect("the policy should override the context");
    policy
        .clone()
        .with_context_cryptographic(context, update(overridden))
}
