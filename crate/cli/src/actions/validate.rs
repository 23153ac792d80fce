use std::{fmt::Write, path::PathBuf};

use clap::Parser;
use cosmian_crypto_constraints::ConstraintsParameters;
use cosmian_signature_validation::{
    DiagnosticData, MessageTag, ValidationExecutor, ValidationOptions,
    reports::SimpleReport,
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info};

use crate::{
    actions::console::Stdout,
    cli_bail,
    error::{
        CliError,
        result::{CliResult, CliResultHelper},
    },
};

/// Validate the cryptographic algorithms of the signatures of a diagnostic data file.
///
/// Without `--policy`, the built-in recommended policy is used.
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct ValidateAction {
    /// The constraints policy file (TOML)
    #[clap(long = "policy", short = 'p')]
    policy_file: Option<PathBuf>,

    /// The diagnostic data file (JSON)
    #[clap(long = "diagnostic", short = 'd', required = true)]
    diagnostic_file: PathBuf,

    /// Reference date of the checks, RFC 3339 (e.g. 2020-01-01T00:00:00Z).
    /// Defaults to the validation time of the diagnostic data
    #[clap(long = "current-time", value_parser = parse_rfc3339, verbatim_doc_comment)]
    current_time: Option<OffsetDateTime>,

    /// Re-run the expiration checks at the proof of existence dates
    #[clap(long = "past-signature-validation", default_value = "false")]
    past_signature_validation: bool,

    /// Print both reports as JSON
    #[clap(long = "json", default_value = "false")]
    json: bool,
}

impl ValidateAction {
    pub fn process(&self) -> CliResult<()> {
        let policy = match &self.policy_file {
            Some(path) => ConstraintsParameters::load_from_file(path)?,
            None => {
                debug!("no policy file given, using the recommended policy");
                ConstraintsParameters::recommended()
            }
        };
        let diagnostic = DiagnosticData::load_from_file(&self.diagnostic_file)?;
        if diagnostic.signatures.is_empty() {
            cli_bail!("no signature found in {}", self.diagnostic_file.display());
        }

        let reports = ValidationExecutor::new(policy, diagnostic)?
            .with_options(ValidationOptions {
                current_time: self.current_time,
                past_signature_validation: self.past_signature_validation,
            })
            .execute();
        info!(
            "{} signature(s) validated, {} valid",
            reports.simple_report().signatures_count(),
            reports.simple_report().valid_signatures_count()
        );

        let mut stdout = Stdout::new(&render_simple_report(reports.simple_report())?);
        stdout.set_json(&reports)?;
        stdout.write(Stdout::json_format(self.json))
    }
}

/// Parse an RFC 3339 date time given on the command line.
pub fn parse_rfc3339(value: &str) -> CliResult<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| CliError::InvalidArgument(format!("{value} is not an RFC 3339 date: {e}")))
}

fn write_tags(out: &mut String, label: &str, tags: &[MessageTag]) -> CliResult<()> {
    for tag in tags {
        writeln!(out, "  {label} {tag}: {}", tag.message())?;
    }
    Ok(())
}

/// Text rendering of the simple report.
pub fn render_simple_report(report: &SimpleReport) -> CliResult<String> {
    let mut out = String::new();
    let validation_time = report
        .validation_time()
        .format(&Rfc3339)
        .context("cannot format the validation time")?;
    writeln!(out, "Validation time: {validation_time}")?;
    for summary in report.signatures() {
        match summary.sub_indication {
            Some(sub_indication) => writeln!(
                out,
                "Signature {}: {} / {sub_indication}",
                summary.id, summary.indication
            )?,
            None => writeln!(out, "Signature {}: {}", summary.id, summary.indication)?,
        }
        write_tags(&mut out, "error", &summary.errors)?;
        write_tags(&mut out, "warning", &summary.warnings)?;
        write_tags(&mut out, "info", &summary.infos)?;
    }
    write!(
        out,
        "Valid signatures: {}/{}",
        report.valid_signatures_count(),
        report.signatures_count()
    )?;
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cosmian_crypto_constraints::ConstraintsParameters;
    use cosmian_signature_validation::{
        AlgorithmUsage, DiagnosticData, SignatureFacts, ValidationExecutor,
        reports::SimpleReport,
    };
    use time::macros::datetime;

    use super::{parse_rfc3339, render_simple_report};

    fn validate(digest: &str) -> SimpleReport {
        let diagnostic = DiagnosticData::new(datetime!(2018-02-06 09:39:33 UTC)).with_signature(
            SignatureFacts::new("S-1", AlgorithmUsage::new(digest, "RSA", 2048)),
        );
        ValidationExecutor::new(ConstraintsParameters::recommended(), diagnostic)
            .unwrap()
            .execute()
            .simple_report()
            .clone()
    }

    #[test]
    fn test_render_passed_signature() {
        let text = render_simple_report(&validate("SHA256")).unwrap();
        assert_eq!(
            text,
            "Validation time: 2018-02-06T09:39:33Z\nSignature S-1: TOTAL_PASSED\nValid \
             signatures: 1/1"
        );
    }

    #[test]
    fn test_render_failed_signature() {
        let text = render_simple_report(&validate("MD5")).unwrap();
        assert!(text.contains("Signature S-1: INDETERMINATE / CRYPTO_CONSTRAINTS_FAILURE"));
        assert!(text.contains("error ASCCM_ANS_2: The digest algorithm is not authorised!"));
        assert!(text.ends_with("Valid signatures: 0/1"));
    }

    #[test]
    fn test_parse_current_time() {
        assert_eq!(
            parse_rfc3339("2020-01-01T00:00:00Z").unwrap(),
            datetime!(2020-01-01 0:00 UTC)
        );
        let err = parse_rfc3339("yesterday").unwrap_err();
        assert!(err.to_string().starts_with("Invalid argument: yesterday"));
    }
}
