use std::sync::Arc;

use cosmian_crypto_constraints::ConstraintsParameters;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::{
    ValidationResult,
    building_block::{BuildingBlock, BuildingBlockEvaluator},
    diagnostic::{AlgorithmUsage, DiagnosticData, SignatureFacts},
    past_validation::HistoricalValidationAdapter,
    reports::{DetailedReport, ReportAggregator, Reports},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reference date of the checks; the validation time of the diagnostic data when unset.
    pub current_time: Option<OffsetDateTime>,
    /// Re-run expired algorithm checks at the proof of existence dates.
    pub past_signature_validation: bool,
}

/// Runs a validation of diagnostic data against a policy snapshot.
///
/// The executor only holds shared read-only references: it can be cloned and
/// executed from several threads at once.
#[derive(Debug, Clone)]
pub struct ValidationExecutor {
    policy: Arc<ConstraintsParameters>,
    diagnostic: Arc<DiagnosticData>,
    options: ValidationOptions,
}

impl ValidationExecutor {
    /// Fails when the diagnostic data is inconsistent.
    pub fn new(
        policy: impl Into<Arc<ConstraintsParameters>>,
        diagnostic: impl Into<Arc<DiagnosticData>>,
    ) -> ValidationResult<Self> {
        let diagnostic = diagnostic.into();
        diagnostic.validate()?;
        Ok(Self {
            policy: policy.into(),
            diagnostic,
            options: ValidationOptions::default(),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// The same diagnostic data against another policy snapshot.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<Arc<ConstraintsParameters>>) -> Self {
        self.policy = policy.into();
        self
    }

    #[must_use]
    pub fn policy(&self) -> &ConstraintsParameters {
        &self.policy
    }

    #[must_use]
    pub fn diagnostic(&self) -> &DiagnosticData {
        &self.diagnostic
    }

    #[must_use]
    pub fn current_time(&self) -> OffsetDateTime {
        self.options
            .current_time
            .unwrap_or(self.diagnostic.validation_time)
    }

    /// Evaluate every subject and build the reports.
    ///
    /// Policy violations end up in the conclusions: this never fails.
    #[must_use]
    pub fn execute(&self) -> Reports {
        let current_time = self.current_time();
        info!(
            "validating {} signature(s) at {current_time}, past signature validation: {}",
            self.diagnostic.signatures.len(),
            self.options.past_signature_validation
        );
        let evaluator = BuildingBlockEvaluator::new(&self.policy, current_time);

        let timestamps: Vec<BuildingBlock> = self
            .diagnostic
            .timestamps
            .iter()
            .map(|timestamp| {
                let mut block = evaluator.evaluate_timestamp(timestamp);
                self.past_validation(&evaluator, &mut block, &timestamp.usage, timestamp.poe);
                block
            })
            .collect();

        let revocations: Vec<BuildingBlock> = self
            .diagnostic
            .revocations
            .iter()
            .map(|revocation| {
                let mut block = evaluator.evaluate_revocation(revocation);
                self.past_validation(&evaluator, &mut block, &revocation.usage, revocation.poe);
                block
            })
            .collect();

        let signatures: Vec<BuildingBlock> = self
            .diagnostic
            .signatures
            .iter()
            .map(|signature| {
                let mut block = evaluator.evaluate_signature(signature);
                let poe = self.signature_poe(signature, &timestamps);
                self.past_validation(&evaluator, &mut block, &signature.usage, poe);
                block
            })
            .collect();

        let building_blocks = signatures
            .into_iter()
            .chain(timestamps)
            .chain(revocations)
            .collect();
        let detailed_report = DetailedReport::new(current_time, building_blocks);
        let simple_report =
            ReportAggregator::new(&self.diagnostic, &detailed_report).simple_report();
        Reports::new(detailed_report, simple_report)
    }

    /// Earliest production time of the valid timestamps covering the signature.
    fn signature_poe(
        &self,
        signature: &SignatureFacts,
        timestamps: &[BuildingBlock],
    ) -> Option<OffsetDateTime> {
        signature
            .timestamp_ids
            .iter()
            .filter(|id| {
                timestamps
                    .iter()
                    .any(|block| block.id() == id.as_str() && block.indication().is_passed())
            })
            .filter_map(|id| self.diagnostic.timestamp(id))
            .map(|timestamp| timestamp.production_time)
            .min()
    }

    fn past_validation(
        &self,
        evaluator: &BuildingBlockEvaluator,
        block: &mut BuildingBlock,
        usage: &AlgorithmUsage,
        poe: Option<OffsetDateTime>,
    ) {
        if !self.options.past_signature_validation
            || !HistoricalValidationAdapter::is_applicable(block.cryptographic_conclusion())
        {
            return;
        }
        debug!("past signature validation of {} with poe {poe:?}", block.id());
        let psv = HistoricalValidationAdapter::new(evaluator, block.kind(), usage).evaluate(poe);
        block.set_psv(psv);
    }
}
