use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Severity attached to a cryptographic constraint.
///
/// The ordering is significant: `Ignore < Info < Warn < Fail`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Level {
    /// The check is not performed at all.
    Ignore,
    /// A violation is reported as an information.
    #[serde(alias = "INFORM")]
    #[strum(to_string = "INFO", serialize = "INFORM")]
    Info,
    /// A violation is reported as a warning, the indication is unchanged.
    Warn,
    /// A violation is reported as an error and degrades the indication.
    #[default]
    Fail,
}

impl Level {
    /// Whether checks governed by this level run at all.
    #[must_use]
    pub const fn is_enforced(self) -> bool {
        !matches!(self, Self::Ignore)
    }
}
