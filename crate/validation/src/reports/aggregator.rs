use tracing::debug;

use crate::{
    building_block::BuildingBlock,
    diagnostic::{DiagnosticData, SignatureFacts},
    indication::Indication,
    message_tag::MessageTag,
    reports::{DetailedReport, SignatureSummary, SimpleReport},
};

/// Rolls the building blocks a signature depends on up into its simple report entry.
pub struct ReportAggregator<'a> {
    diagnostic: &'a DiagnosticData,
    detailed_report: &'a DetailedReport,
}

fn push_unique(tags: &mut Vec<MessageTag>, new_tags: impl IntoIterator<Item = MessageTag>) {
    for tag in new_tags {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
}

impl<'a> ReportAggregator<'a> {
    #[must_use]
    pub const fn new(diagnostic: &'a DiagnosticData, detailed_report: &'a DetailedReport) -> Self {
        Self {
            diagnostic,
            detailed_report,
        }
    }

    /// The signature block, then its timestamps, then its revocation data.
    fn subjects(&self, signature: &SignatureFacts) -> Vec<&'a BuildingBlock> {
        std::iter::once(&signature.id)
            .chain(&signature.timestamp_ids)
            .chain(&signature.revocation_ids)
            .filter_map(|id| self.detailed_report.building_block(id))
            .collect()
    }

    #[must_use]
    pub fn summarize(&self, signature: &SignatureFacts) -> SignatureSummary {
        let subjects = self.subjects(signature);
        let worst = subjects
            .iter()
            .map(|block| block.indication())
            .fold(Indication::Passed, Indication::worst);

        let (indication, sub_indication) = if worst.is_passed() {
            (Indication::TotalPassed, None)
        } else {
            let sub_indication = subjects
                .iter()
                .find(|block| block.indication() == worst)
                .and_then(|block| block.effective_conclusion().sub_indication());
            (worst, sub_indication)
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut infos = Vec::new();
        for block in &subjects {
            push_unique(&mut errors, block.reported_errors());
            push_unique(&mut warnings, block.messages(|c| c.warnings()));
            push_unique(&mut infos, block.messages(|c| c.infos()));
        }
        debug!("signature {}: {indication}", signature.id);

        SignatureSummary {
            id: signature.id.clone(),
            indication,
            sub_indication,
            errors,
            warnings,
            infos,
        }
    }

    #[must_use]
    pub fn simple_report(&self) -> SimpleReport {
        SimpleReport::new(
            self.detailed_report.validation_time(),
            self.diagnostic
                .signatures
                .iter()
                .map(|signature| self.summarize(signature))
                .collect(),
        )
    }
}
