use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Main status of a validation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Indication {
    Passed,
    Indeterminate,
    Failed,
    /// Only used by the simple report, when every check of a signature passed.
    TotalPassed,
}

impl Indication {
    /// Rank used to pick the worst of several indications:
    /// `FAILED` > `INDETERMINATE` > `PASSED` (and `TOTAL_PASSED`).
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Passed | Self::TotalPassed => 0,
            Self::Indeterminate => 1,
            Self::Failed => 2,
        }
    }

    #[must_use]
    pub const fn is_passed(self) -> bool {
        self.severity() == 0
    }

    /// The worse of `self` and `other`, `self` winning ties.
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Secondary status explaining a non passed indication.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubIndication {
    /// A cryptographic constraint of the policy is not met.
    CryptoConstraintsFailure,
    /// An algorithm expired and no proof of existence before its expiration is available.
    CryptoConstraintsFailureNoPoe,
    /// The signature value does not verify.
    SigCryptoFailure,
}
