use cosmian_crypto_constraints::{ConstraintsParameters, Context, ResolvedConstraint};
use serde::Serialize;
use strum::Display;
use time::OffsetDateTime;
use tracing::debug;

use crate::{
    checker::AlgorithmAcceptabilityChecker,
    conclusion::Conclusion,
    diagnostic::{AlgorithmUsage, RevocationFacts, SignatureFacts, TimestampFacts},
    indication::{Indication, SubIndication},
    message_tag::MessageTag,
    severity::SeverityClassifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SubjectKind {
    Signature,
    Timestamp,
    Revocation,
}

/// One evaluated subject of the detailed report.
///
/// For a signature, the cryptographic constraint checks are part of its own
/// conclusion. For a timestamp or revocation data, they are held by the nested
/// `sav` conclusion while the own conclusion only reflects the signature
/// verification of the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingBlock {
    id: String,
    kind: SubjectKind,
    conclusion: Conclusion,
    #[serde(skip_serializing_if = "Option::is_none")]
    sav: Option<Conclusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    psv: Option<Conclusion>,
}

impl BuildingBlock {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> SubjectKind {
        self.kind
    }

    #[must_use]
    pub const fn conclusion(&self) -> &Conclusion {
        &self.conclusion
    }

    #[must_use]
    pub const fn sav(&self) -> Option<&Conclusion> {
        self.sav.as_ref()
    }

    #[must_use]
    pub const fn psv(&self) -> Option<&Conclusion> {
        self.psv.as_ref()
    }

    /// The conclusion holding the cryptographic constraint checks.
    #[must_use]
    pub fn cryptographic_conclusion(&self) -> &Conclusion {
        self.sav.as_ref().unwrap_or(&self.conclusion)
    }

    /// The conclusion deciding the indication of the subject.
    ///
    /// A failed verification of the token wins. Otherwise the past signature
    /// validation result, when present, replaces the cryptographic one.
    #[must_use]
    pub fn effective_conclusion(&self) -> &Conclusion {
        if self.token_verification_failed() {
            return &self.conclusion;
        }
        self.psv
            .as_ref()
            .unwrap_or_else(|| self.cryptographic_conclusion())
    }

    fn token_verification_failed(&self) -> bool {
        self.sav.is_some() && !self.conclusion.is_passed()
    }

    /// Errors of the effective conclusion. When the verification of a token
    /// failed, its cryptographic constraint errors are kept as well.
    pub(crate) fn reported_errors(&self) -> Vec<MessageTag> {
        let mut errors = self.effective_conclusion().errors().to_vec();
        if self.token_verification_failed() {
            errors.extend(
                self.cryptographic_conclusion()
                    .errors()
                    .iter()
                    .copied()
                    .filter(|tag| tag.is_cryptographic_constraint()),
            );
        }
        errors
    }

    #[must_use]
    pub fn indication(&self) -> Indication {
        self.effective_conclusion().indication()
    }

    /// Messages of the own, SAV and PSV conclusions, in that order.
    pub(crate) fn messages<'a>(
        &'a self,
        select: impl Fn(&'a Conclusion) -> &'a [MessageTag],
    ) -> Vec<MessageTag> {
        std::iter::once(&self.conclusion)
            .chain(self.sav.as_ref())
            .chain(self.psv.as_ref())
            .flat_map(|conclusion| select(conclusion).iter().copied())
            .collect()
    }

    pub(crate) fn set_psv(&mut self, psv: Conclusion) {
        self.psv = Some(psv);
    }
}

/// Evaluates subjects against the constraints resolved once from a policy.
///
/// The resolved constraints are owned copies, so the evaluator is unaffected
/// by anything done to the policy after its creation.
#[derive(Debug, Clone)]
pub struct BuildingBlockEvaluator {
    signature: ResolvedConstraint,
    timestamp: ResolvedConstraint,
    revocation: ResolvedConstraint,
    current_time: OffsetDateTime,
}

impl BuildingBlockEvaluator {
    #[must_use]
    pub fn new(policy: &ConstraintsParameters, current_time: OffsetDateTime) -> Self {
        Self {
            signature: policy.resolve(Context::Signature),
            timestamp: policy.resolve(Context::Timestamp),
            revocation: policy.resolve(Context::Revocation),
            current_time,
        }
    }

    #[must_use]
    pub const fn current_time(&self) -> OffsetDateTime {
        self.current_time
    }

    #[must_use]
    pub const fn constraint(&self, kind: SubjectKind) -> &ResolvedConstraint {
        match kind {
            SubjectKind::Signature => &self.signature,
            SubjectKind::Timestamp => &self.timestamp,
            SubjectKind::Revocation => &self.revocation,
        }
    }

    /// Run the cryptographic constraint checks of one usage at `usage_date`.
    #[must_use]
    pub fn evaluate_usage(
        &self,
        kind: SubjectKind,
        usage: &AlgorithmUsage,
        usage_date: OffsetDateTime,
    ) -> Conclusion {
        let mut conclusion = Conclusion::passed();
        self.check_usage_into(&mut conclusion, kind, usage, usage_date);
        conclusion
    }

    fn check_usage_into(
        &self,
        conclusion: &mut Conclusion,
        kind: SubjectKind,
        usage: &AlgorithmUsage,
        usage_date: OffsetDateTime,
    ) {
        let resolved = self.constraint(kind);
        let level = resolved.constraint.level;
        if !level.is_enforced() {
            return;
        }
        let violations =
            AlgorithmAcceptabilityChecker::new(&resolved.constraint).check_usage(usage, usage_date);
        SeverityClassifier::new(level).apply_all(conclusion, &violations);
    }

    fn verification_conclusion(signature_intact: bool) -> Conclusion {
        let mut conclusion = Conclusion::passed();
        if !signature_intact {
            conclusion.add_failure(MessageTag::BBB_CV_ISCR_ANS, SubIndication::SigCryptoFailure);
        }
        conclusion
    }

    #[must_use]
    pub fn evaluate_signature(&self, signature: &SignatureFacts) -> BuildingBlock {
        let mut conclusion = Self::verification_conclusion(signature.signature_intact);
        self.check_usage_into(
            &mut conclusion,
            SubjectKind::Signature,
            &signature.usage,
            self.current_time,
        );
        debug!("signature {}: {}", signature.id, conclusion.indication());
        BuildingBlock {
            id: signature.id.clone(),
            kind: SubjectKind::Signature,
            conclusion,
            sav: None,
            psv: None,
        }
    }

    #[must_use]
    pub fn evaluate_timestamp(&self, timestamp: &TimestampFacts) -> BuildingBlock {
        self.evaluate_token(
            SubjectKind::Timestamp,
            &timestamp.id,
            &timestamp.usage,
            timestamp.signature_intact,
        )
    }

    #[must_use]
    pub fn evaluate_revocation(&self, revocation: &RevocationFacts) -> BuildingBlock {
        self.evaluate_token(
            SubjectKind::Revocation,
            &revocation.id,
            &revocation.usage,
            revocation.signature_intact,
        )
    }

    fn evaluate_token(
        &self,
        kind: SubjectKind,
        id: &str,
        usage: &AlgorithmUsage,
        signature_intact: bool,
    ) -> BuildingBlock {
        let conclusion = Self::verification_conclusion(signature_intact);
        let sav = self.evaluate_usage(kind, usage, self.current_time);
        debug!(
            "{} {id}: {}, sav {}",
            kind.to_string().to_lowercase(),
            conclusion.indication(),
            sav.indication()
        );
        BuildingBlock {
            id: id.to_owned(),
            kind,
            conclusion,
            sav: Some(sav),
            psv: None,
        }
    }
}
