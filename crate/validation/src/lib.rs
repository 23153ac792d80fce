//! Validation of the cryptographic algorithms used by a signature, its
//! timestamps and its revocation data against a constraints policy.
//!
//! [`ValidationExecutor::execute`] evaluates one [`BuildingBlock`] per subject
//! of the [`DiagnosticData`] and rolls them up into [`reports::Reports`].

pub use building_block::{BuildingBlock, BuildingBlockEvaluator, SubjectKind};
pub use checker::{AlgorithmAcceptabilityChecker, CheckKind, Violation};
pub use conclusion::Conclusion;
pub use diagnostic::{
    AlgorithmUsage, DiagnosticData, RevocationFacts, SignatureFacts, TimestampFacts,
};
pub use error::{
    ValidationError,
    result::{ValidationResult, ValidationResultHelper},
};
pub use executor::{ValidationExecutor, ValidationOptions};
pub use indication::{Indication, SubIndication};
pub use message_tag::MessageTag;
pub use past_validation::HistoricalValidationAdapter;
pub use severity::{Effect, SeverityClassifier};

mod building_block;
mod checker;
mod conclusion;
mod diagnostic;
pub mod eidas;
mod error;
mod executor;
mod indication;
mod message_tag;
mod past_validation;
pub mod reports;
mod severity;

#[cfg(test)]
mod tests;

pub mod reexport {
    pub use cosmian_crypto_constraints;
}
