use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    indication::{Indication, SubIndication},
    message_tag::MessageTag,
};

/// The rolled-up result of one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureSummary {
    pub id: String,
    pub indication: Indication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_indication: Option<SubIndication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<MessageTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleReport {
    #[serde(with = "time::serde::rfc3339")]
    validation_time: OffsetDateTime,
    signatures: Vec<SignatureSummary>,
}

impl SimpleReport {
    pub(crate) const fn new(
        validation_time: OffsetDateTime,
        signatures: Vec<SignatureSummary>,
    ) -> Self {
        Self {
            validation_time,
            signatures,
        }
    }

    #[must_use]
    pub const fn validation_time(&self) -> OffsetDateTime {
        self.validation_time
    }

    #[must_use]
    pub fn signatures(&self) -> &[SignatureSummary] {
        &self.signatures
    }

    #[must_use]
    pub fn signature(&self, id: &str) -> Option<&SignatureSummary> {
        self.signatures.iter().find(|summary| summary.id == id)
    }

    #[must_use]
    pub fn indication(&self, id: &str) -> Option<Indication> {
        self.signature(id).map(|summary| summary.indication)
    }

    #[must_use]
    pub fn sub_indication(&self, id: &str) -> Option<SubIndication> {
        self.signature(id).and_then(|summary| summary.sub_indication)
    }

    #[must_use]
    pub fn errors(&self, id: &str) -> &[MessageTag] {
        self.signature(id)
            .map(|summary| summary.errors.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn warnings(&self, id: &str) -> &[MessageTag] {
        self.signature(id)
            .map(|summary| summary.warnings.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn first_signature_id(&self) -> Option<&str> {
        self.signatures.first().map(|summary| summary.id.as_str())
    }

    #[must_use]
    pub fn signatures_count(&self) -> usize {
        self.signatures.len()
    }

    #[must_use]
    pub fn valid_signatures_count(&self) -> usize {
        self.signatures
            .iter()
            .filter(|summary| summary.indication == Indication::TotalPassed)
            .count()
    }
}
