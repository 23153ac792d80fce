use std::{fmt::Write, path::PathBuf};

use clap::Parser;
use cosmian_crypto_constraints::{
    ConstraintSource, ConstraintsParameters, Context, ResolvedConstraint,
};
use strum::IntoEnumIterator;

use crate::{actions::console::Stdout, error::result::CliResult};

/// Show which configuration point governs each validation context.
///
/// A context override, when present, replaces the default constraint as a whole.
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct ResolveAction {
    /// The constraints policy file (TOML).
    /// The recommended policy is resolved when omitted
    #[clap(long = "policy", short = 'p', verbatim_doc_comment)]
    policy_file: Option<PathBuf>,

    /// Print the resolved constraints as JSON
    #[clap(long = "json", default_value = "false")]
    json: bool,
}

impl ResolveAction {
    pub fn process(&self) -> CliResult<()> {
        let policy = match &self.policy_file {
            Some(path) => ConstraintsParameters::load_from_file(path)?,
            None => ConstraintsParameters::recommended(),
        };
        let resolved = resolve_all(&policy);
        let mut stdout = Stdout::new(&render_resolved(&resolved)?);
        stdout.set_json(&resolved)?;
        stdout.write(Stdout::json_format(self.json))
    }
}

#[must_use]
pub fn resolve_all(policy: &ConstraintsParameters) -> Vec<ResolvedConstraint> {
    Context::iter().map(|context| policy.resolve(context)).collect()
}

pub fn render_resolved(resolved: &[ResolvedConstraint]) -> CliResult<String> {
    let mut out = String::new();
    for (index, item) in resolved.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let origin = match item.source {
            ConstraintSource::Context(_) => "context override",
            ConstraintSource::Default => "default",
            ConstraintSource::Undefined => {
                write!(out, "{}: undefined", item.context)?;
                continue;
            }
        };
        write!(
            out,
            "{}: {origin}, level {}",
            item.context, item.constraint.level
        )?;
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cosmian_crypto_constraints::{
        ConstraintsParameters, Context, CryptographicConstraint, Level,
    };

    use super::{render_resolved, resolve_all};

    #[test]
    fn test_resolve_recommended_policy() {
        let text = render_resolved(&resolve_all(&ConstraintsParameters::recommended())).unwrap();
        assert_eq!(
            text,
            "SIGNATURE: default, level FAIL\nREVOCATION: default, level FAIL\nTIMESTAMP: default, \
             level FAIL"
        );
    }

    #[test]
    fn test_resolve_context_override() {
        let policy = ConstraintsParameters::recommended().with_context_cryptographic(
            Context::Timestamp,
            CryptographicConstraint::default()
                .with_level(Level::Warn)
                .with_minimum_key_size("RSA", 4096),
        );
        let resolved = resolve_all(&policy);
        assert_eq!(resolved.len(), 3);
        let text = render_resolved(&resolved).unwrap();
        assert!(text.ends_with("TIMESTAMP: context override, level WARN"));
    }

    #[test]
    fn test_resolve_empty_policy() {
        let text = render_resolved(&resolve_all(&ConstraintsParameters::default())).unwrap();
        assert!(text.starts_with("SIGNATURE: undefined"));
    }
}
