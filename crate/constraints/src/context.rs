use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The validation context a cryptographic constraint applies to.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Context {
    Signature,
    Revocation,
    Timestamp,
}
