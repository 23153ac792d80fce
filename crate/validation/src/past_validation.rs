use time::OffsetDateTime;
use tracing::debug;

use crate::{
    building_block::{BuildingBlockEvaluator, SubjectKind},
    checker::AlgorithmAcceptabilityChecker,
    conclusion::Conclusion,
    diagnostic::AlgorithmUsage,
    indication::{Indication, SubIndication},
    message_tag::MessageTag,
    severity::SeverityClassifier,
};

/// Re-runs the expiration checks of one algorithm usage at a proof of existence
/// date instead of the current time.
///
/// The acceptability and key size checks do not depend on a date and are not re-run.
pub struct HistoricalValidationAdapter<'a> {
    evaluator: &'a BuildingBlockEvaluator,
    kind: SubjectKind,
    usage: &'a AlgorithmUsage,
}

impl<'a> HistoricalValidationAdapter<'a> {
    #[must_use]
    pub const fn new(
        evaluator: &'a BuildingBlockEvaluator,
        kind: SubjectKind,
        usage: &'a AlgorithmUsage,
    ) -> Self {
        Self {
            evaluator,
            kind,
            usage,
        }
    }

    /// Only a conclusion made indeterminate by expired algorithms alone can be
    /// cured by an earlier date.
    #[must_use]
    pub fn is_applicable(cryptographic_conclusion: &Conclusion) -> bool {
        cryptographic_conclusion.indication() == Indication::Indeterminate
            && !cryptographic_conclusion.errors().is_empty()
            && cryptographic_conclusion
                .errors()
                .iter()
                .all(|tag| *tag == MessageTag::ASCCM_ANS_5)
    }

    /// The expiration checks at `poe`.
    ///
    /// May be called for as many proof of existence dates as needed.
    #[must_use]
    pub fn evaluate_at(&self, poe: OffsetDateTime) -> Conclusion {
        let mut conclusion = Conclusion::passed();
        let resolved = self.evaluator.constraint(self.kind);
        let level = resolved.constraint.level;
        if level.is_enforced() {
            let violations = AlgorithmAcceptabilityChecker::new(&resolved.constraint)
                .check_usage_expiration(self.usage, poe);
            SeverityClassifier::new(level)
                .with_sub_indication(SubIndication::CryptoConstraintsFailureNoPoe)
                .apply_all(&mut conclusion, &violations);
        }
        debug!(
            "past validation of {} at {poe}: {}",
            self.usage.digest_algorithm,
            conclusion.indication()
        );
        conclusion
    }

    /// The expiration checks at `poe`, or an indeterminate conclusion when no
    /// proof of existence is available.
    #[must_use]
    pub fn evaluate(&self, poe: Option<OffsetDateTime>) -> Conclusion {
        poe.map_or_else(
            || {
                let mut conclusion = Conclusion::passed();
                conclusion.add_error(
                    MessageTag::ASCCM_ANS_5,
                    SubIndication::CryptoConstraintsFailureNoPoe,
                );
                conclusion
            },
            |poe| self.evaluate_at(poe),
        )
    }
}
