use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ConstraintsResult, ConstraintsResultHelper, context::Context,
    cryptographic_constraint::CryptographicConstraint,
};

/// Constraints of one validation context (signature, revocation or timestamp).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic: Option<CryptographicConstraint>,
}

/// Root of a validation policy.
///
/// An instance is a snapshot: evaluation reads it and never mutates it.
/// Changing the policy between runs means building a new value, e.g. with
/// [`ConstraintsParameters::with_cryptographic`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsParameters {
    /// The default constraint, used by every context without an override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic: Option<CryptographicConstraint>,

    pub signature: ContextConstraints,

    pub revocation: ContextConstraints,

    pub timestamp: ContextConstraints,
}

impl ConstraintsParameters {
    #[must_use]
    pub const fn context_constraints(&self, context: Context) -> &ContextConstraints {
        match context {
            Context::Signature => &self.signature,
            Context::Revocation => &self.revocation,
            Context::Timestamp => &self.timestamp,
        }
    }

    #[must_use]
    pub fn with_cryptographic(mut self, cryptographic: CryptographicConstraint) -> Self {
        self.cryptographic = Some(cryptographic);
        self
    }

    /// Replace the override of `context`. An empty constraint removes the override
    /// in effect, since empty overrides are not considered by the resolver.
    #[must_use]
    pub fn with_context_cryptographic(
        mut self,
        context: Context,
        cryptographic: CryptographicConstraint,
    ) -> Self {
        let container = match context {
            Context::Signature => &mut self.signature,
            Context::Revocation => &mut self.revocation,
            Context::Timestamp => &mut self.timestamp,
        };
        container.cryptographic = Some(cryptographic);
        self
    }

    /// Check the policy invariants on every configured constraint.
    pub fn validate(&self) -> ConstraintsResult<()> {
        if let Some(default) = &self.cryptographic {
            default.validate("cryptographic")?;
        }
        for (name, container) in [
            ("signature", &self.signature),
            ("revocation", &self.revocation),
            ("timestamp", &self.timestamp),
        ] {
            if let Some(cryptographic) = &container.cryptographic {
                cryptographic.validate(&format!("{name}.cryptographic"))?;
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML policy.
    pub fn from_toml_str(policy: &str) -> ConstraintsResult<Self> {
        let parameters: Self = toml::from_str(policy)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Read, parse and validate a TOML policy file.
    pub fn load_from_file(path: &Path) -> ConstraintsResult<Self> {
        debug!("loading the validation policy from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read the policy file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ConstraintsResult<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use time::macros::date;

    use super::ConstraintsParameters;
    use crate::{
        algo::ListAlgo, context::Context, cryptographic_constraint::CryptographicConstraint,
        level::Level,
    };

    const POLICY: &str = r#"
[cryptographic]
level = "FAIL"
acceptable_digest_algo = [{ name = "SHA256" }, { name = "SHA512" }]
acceptable_encryption_algo = [{ name = "RSA" }]
mini_public_key_size = [{ name = "RSA", size = 2048 }]
algo_expiration_date = [
    { name = "SHA256", date = "2029-12-31" },
    { name = "RSA2048", date = "2029-12-31" },
]

[timestamp.cryptographic]
level = "WARN"
acceptable_digest_algo = [{ name = "SHA1" }]
"#;

    #[test]
    fn test_parse_policy() {
        let parameters = ConstraintsParameters::from_toml_str(POLICY).unwrap();
        let default = parameters.cryptographic.as_ref().unwrap();
        assert_eq!(default.level, Level::Fail);
        assert!(default.is_digest_algo_acceptable("SHA512"));
        assert_eq!(default.minimum_key_size("RSA"), Some(2048));
        assert!(parameters.signature.cryptographic.is_none());
        assert!(parameters.revocation.cryptographic.is_none());

        let timestamp = parameters
            .context_constraints(Context::Timestamp)
            .cryptographic
            .as_ref()
            .unwrap();
        assert_eq!(timestamp.level, Level::Warn);
        assert!(timestamp.is_digest_algo_acceptable("SHA1"));
        assert!(timestamp.algo_expiration_date.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let parameters = ConstraintsParameters::from_toml_str(POLICY).unwrap();
        let serialized = parameters.to_toml_string().unwrap();
        assert!(serialized.contains(r#"date = "2029-12-31""#));
        assert_eq!(
            ConstraintsParameters::from_toml_str(&serialized).unwrap(),
            parameters
        );
    }

    #[test]
    fn test_invalid_policies_are_rejected() {
        let duplicated = r#"
[signature.cryptographic]
acceptable_digest_algo = [{ name = "SHA256" }, { name = "SHA256" }]
"#;
        let err = ConstraintsParameters::from_toml_str(duplicated).unwrap_err();
        assert!(err.to_string().contains("signature.cryptographic"));

        let bad_date = r#"
[cryptographic]
algo_expiration_date = [{ name = "SHA256", date = "24/02/2020" }]
"#;
        assert!(ConstraintsParameters::from_toml_str(bad_date).is_err());

        let bad_level = r#"
[cryptographic]
level = "FATAL"
"#;
        assert!(ConstraintsParameters::from_toml_str(bad_level).is_err());
    }

    #[test]
    fn test_with_context_cryptographic_leaves_other_contexts() {
        let signature = CryptographicConstraint::default()
            .with_expiration_date("SHA256", date!(2015 - 01 - 01));
        let parameters = ConstraintsParameters::default()
            .with_cryptographic(CryptographicConstraint {
                acceptable_digest_algo: Some(ListAlgo::from_names(&["SHA256"])),
                ..CryptographicConstraint::default()
            })
            .with_context_cryptographic(Context::Signature, signature.clone());

        assert_eq!(parameters.signature.cryptographic, Some(signature));
        assert!(parameters.revocation.cryptographic.is_none());
        assert!(parameters.timestamp.cryptographic.is_none());
        assert!(parameters.cryptographic.is_some());
    }
}
