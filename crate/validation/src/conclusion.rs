use serde::Serialize;

use crate::{
    indication::{Indication, SubIndication},
    message_tag::MessageTag,
};

/// Outcome of a (sub) process: an indication, an optional sub-indication
/// and the messages collected while checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conclusion {
    indication: Indication,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_indication: Option<SubIndication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    infos: Vec<MessageTag>,
}

impl Default for Conclusion {
    fn default() -> Self {
        Self::passed()
    }
}

impl Conclusion {
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            indication: Indication::Passed,
            sub_indication: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
        }
    }

    #[must_use]
    pub const fn indication(&self) -> Indication {
        self.indication
    }

    #[must_use]
    pub const fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    #[must_use]
    pub fn errors(&self) -> &[MessageTag] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[MessageTag] {
        &self.warnings
    }

    #[must_use]
    pub fn infos(&self) -> &[MessageTag] {
        &self.infos
    }

    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.indication.is_passed()
    }

    #[must_use]
    pub fn has_error(&self, tag: MessageTag) -> bool {
        self.errors.contains(&tag)
    }

    /// Record a blocking error.
    ///
    /// The indication becomes `INDETERMINATE` unless the conclusion already
    /// `FAILED`, in which case the failure and its sub-indication are kept.
    pub(crate) fn add_error(&mut self, tag: MessageTag, sub_indication: SubIndication) {
        self.errors.push(tag);
        if self.indication != Indication::Failed {
            self.indication = Indication::Indeterminate;
            self.sub_indication = Some(sub_indication);
        }
    }

    /// Record an error turning the conclusion into a definitive failure.
    pub(crate) fn add_failure(&mut self, tag: MessageTag, sub_indication: SubIndication) {
        self.errors.push(tag);
        self.indication = Indication::Failed;
        self.sub_indication = Some(sub_indication);
    }

    pub(crate) fn add_warning(&mut self, tag: MessageTag) {
        self.warnings.push(tag);
    }

    pub(crate) fn add_info(&mut self, tag: MessageTag) {
        self.infos.push(tag);
    }
}
