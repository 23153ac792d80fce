use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Stable identifiers of the messages attached to a conclusion.
///
/// The identifiers are part of the report contract and never change.
#[allow(non_camel_case_types)]
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
pub enum MessageTag {
    /// The encryption algorithm is not in the acceptable list.
    ASCCM_ANS_1,
    /// The digest algorithm is not in the acceptable list.
    ASCCM_ANS_2,
    /// The public key is smaller than the minimum for its family.
    ASCCM_ANS_3,
    /// No expiration date is defined for the algorithm.
    ASCCM_ANS_4,
    /// The algorithm expired before the date it was used.
    ASCCM_ANS_5,
    /// The cryptographic verification of the signature value failed.
    BBB_CV_ISCR_ANS,
}

impl MessageTag {
    /// Human readable text of the message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ASCCM_ANS_1 => "The encryption algorithm is not authorised!",
            Self::ASCCM_ANS_2 => "The digest algorithm is not authorised!",
            Self::ASCCM_ANS_3 => "The public key size is too small!",
            Self::ASCCM_ANS_4 => "The algorithm expiration date is not defined!",
            Self::ASCCM_ANS_5 => "The algorithm is expired!",
            Self::BBB_CV_ISCR_ANS => "The signature is not intact!",
        }
    }

    /// Whether the tag is produced by the cryptographic constraint checks.
    #[must_use]
    pub const fn is_cryptographic_constraint(self) -> bool {
        !matches!(self, Self::BBB_CV_ISCR_ANS)
    }
}
