use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    building_block::{BuildingBlock, SubjectKind},
    indication::Indication,
    message_tag::MessageTag,
};

/// Every building block of a validation, addressable by subject id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedReport {
    #[serde(with = "time::serde::rfc3339")]
    validation_time: OffsetDateTime,
    building_blocks: Vec<BuildingBlock>,
}

impl DetailedReport {
    pub(crate) const fn new(
        validation_time: OffsetDateTime,
        building_blocks: Vec<BuildingBlock>,
    ) -> Self {
        Self {
            validation_time,
            building_blocks,
        }
    }

    #[must_use]
    pub const fn validation_time(&self) -> OffsetDateTime {
        self.validation_time
    }

    #[must_use]
    pub fn building_blocks(&self) -> &[BuildingBlock] {
        &self.building_blocks
    }

    #[must_use]
    pub fn building_block(&self, id: &str) -> Option<&BuildingBlock> {
        self.building_blocks.iter().find(|block| block.id() == id)
    }

    fn ids(&self, kind: SubjectKind) -> Vec<&str> {
        self.building_blocks
            .iter()
            .filter(|block| block.kind() == kind)
            .map(BuildingBlock::id)
            .collect()
    }

    #[must_use]
    pub fn signature_ids(&self) -> Vec<&str> {
        self.ids(SubjectKind::Signature)
    }

    #[must_use]
    pub fn timestamp_ids(&self) -> Vec<&str> {
        self.ids(SubjectKind::Timestamp)
    }

    #[must_use]
    pub fn revocation_ids(&self) -> Vec<&str> {
        self.ids(SubjectKind::Revocation)
    }

    #[must_use]
    pub fn first_signature_id(&self) -> Option<&str> {
        self.signature_ids().first().copied()
    }

    /// Errors of a subject, own conclusion first, then SAV and PSV.
    /// Empty for an unknown id.
    #[must_use]
    pub fn errors(&self, id: &str) -> Vec<MessageTag> {
        self.building_block(id)
            .map(|block| block.messages(|conclusion| conclusion.errors()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn warnings(&self, id: &str) -> Vec<MessageTag> {
        self.building_block(id)
            .map(|block| block.messages(|conclusion| conclusion.warnings()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn infos(&self, id: &str) -> Vec<MessageTag> {
        self.building_block(id)
            .map(|block| block.messages(|conclusion| conclusion.infos()))
            .unwrap_or_default()
    }

    fn indication_of(&self, id: &str, kind: SubjectKind) -> Option<Indication> {
        self.building_block(id)
            .filter(|block| block.kind() == kind)
            .map(BuildingBlock::indication)
    }

    #[must_use]
    pub fn signature_validation_indication(&self, id: &str) -> Option<Indication> {
        self.indication_of(id, SubjectKind::Signature)
    }

    #[must_use]
    pub fn timestamp_validation_indication(&self, id: &str) -> Option<Indication> {
        self.indication_of(id, SubjectKind::Timestamp)
    }

    #[must_use]
    pub fn revocation_validation_indication(&self, id: &str) -> Option<Indication> {
        self.indication_of(id, SubjectKind::Revocation)
    }
}
