use cosmian_crypto_constraints::Level;
use tracing::trace;

use crate::{checker::Violation, conclusion::Conclusion, indication::SubIndication};

/// What a violation does to a conclusion once its level is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Skipped,
    Info,
    Warning,
    Error,
}

impl From<Level> for Effect {
    fn from(level: Level) -> Self {
        match level {
            Level::Ignore => Self::Skipped,
            Level::Info => Self::Info,
            Level::Warn => Self::Warning,
            Level::Fail => Self::Error,
        }
    }
}

/// Fold violations into a conclusion under the level of the constraint they were checked against.
pub struct SeverityClassifier {
    level: Level,
    sub_indication: SubIndication,
}

impl SeverityClassifier {
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self {
            level,
            sub_indication: SubIndication::CryptoConstraintsFailure,
        }
    }

    /// Use another sub-indication for errors.
    #[must_use]
    pub const fn with_sub_indication(mut self, sub_indication: SubIndication) -> Self {
        self.sub_indication = sub_indication;
        self
    }

    #[must_use]
    pub fn effect(&self) -> Effect {
        Effect::from(self.level)
    }

    pub fn apply(&self, conclusion: &mut Conclusion, violation: &Violation) {
        trace!(
            "{} violation {} on {} at level {}",
            violation.kind, violation.tag, violation.algorithm, self.level
        );
        match self.effect() {
            Effect::Skipped => {}
            Effect::Info => conclusion.add_info(violation.tag),
            Effect::Warning => conclusion.add_warning(violation.tag),
            Effect::Error => conclusion.add_error(violation.tag, self.sub_indication),
        }
    }

    pub fn apply_all<'a>(
        &self,
        conclusion: &mut Conclusion,
        violations: impl IntoIterator<Item = &'a Violation>,
    ) {
        for violation in violations {
            self.apply(conclusion, violation);
        }
    }
}
