use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    constraints_parameters::ConstraintsParameters, context::Context,
    cryptographic_constraint::CryptographicConstraint,
};

/// Which configuration point a resolved constraint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConstraintSource {
    /// The context-specific override.
    Context(Context),
    /// The default constraint of the policy.
    Default,
    /// Neither an override nor a default is configured: every check fails as "not defined".
    Undefined,
}

/// An owned copy of the constraint in effect for one context.
///
/// Later changes to the policy it was resolved from cannot affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConstraint {
    pub context: Context,
    pub source: ConstraintSource,
    pub constraint: CryptographicConstraint,
}

impl ConstraintsParameters {
    /// Resolve the cryptographic constraint to apply for `context`.
    ///
    /// A non-empty override replaces the default as a whole; the two are never merged.
    #[must_use]
    pub fn resolve(&self, context: Context) -> ResolvedConstraint {
        let overridden = self
            .context_constraints(context)
            .cryptographic
            .as_ref()
            .filter(|constraint| !constraint.is_empty());

        let (source, constraint) = match (overridden, &self.cryptographic) {
            (Some(constraint), _) => (ConstraintSource::Context(context), constraint.clone()),
            (None, Some(default)) => (ConstraintSource::Default, default.clone()),
            (None, None) => (
                ConstraintSource::Undefined,
                CryptographicConstraint::default(),
            ),
        };
        if source == ConstraintSource::Undefined {
            warn!("no cryptographic constraint configured for {context}: every check will fail");
        } else {
            debug!(
                "{context} cryptographic constraint resolved from {source:?} with level {}",
                constraint.level
            );
        }
        ResolvedConstraint {
            context,
            source,
            constraint,
        }
    }

    /// Shorthand for [`ConstraintsParameters::resolve`] keeping only the constraint.
    #[must_use]
    pub fn cryptographic_constraint(&self, context: Context) -> CryptographicConstraint {
        self.resolve(context).constraint
    }
}
