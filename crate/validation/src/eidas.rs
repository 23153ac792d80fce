//! Certificate conditions whose rule depends on the eIDAS regulation era.
//!
//! The era is selected once from the certificate issuance date, then each
//! condition applies the rule of that era.

use serde::{Deserialize, Serialize};
use strum::Display;
use time::{OffsetDateTime, macros::datetime};

/// Date from which the eIDAS regulation applies.
pub const EIDAS_DATE: OffsetDateTime = datetime!(2016-07-01 0:00 UTC);

/// ETSI certificate policy: qualified certificate issued to the public (QCP).
pub const QCP_PUBLIC: &str = "0.4.0.1456.1.2";
/// ETSI certificate policy: qualified certificate with a secure signature creation device (QCP+).
pub const QCP_PUBLIC_WITH_SSCD: &str = "0.4.0.1456.1.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EidasEra {
    PreEidas,
    PostEidas,
}

impl EidasEra {
    /// A certificate issued strictly before [`EIDAS_DATE`] belongs to the pre-eIDAS era.
    #[must_use]
    pub fn for_not_before(not_before: OffsetDateTime) -> Self {
        if not_before < EIDAS_DATE {
            Self::PreEidas
        } else {
            Self::PostEidas
        }
    }
}

/// The certificate facts the conditions look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateFacts {
    #[serde(with = "time::serde::rfc3339")]
    pub not_before: OffsetDateTime,
    /// The `QcCompliance` statement is present.
    #[serde(default)]
    pub qc_compliance: bool,
    /// The `QcSSCD` statement is present.
    #[serde(default)]
    pub qc_sscd: bool,
    #[serde(default)]
    pub policy_ids: Vec<String>,
}

impl CertificateFacts {
    #[must_use]
    pub fn era(&self) -> EidasEra {
        EidasEra::for_not_before(self.not_before)
    }

    fn has_policy(&self, oid: &str) -> bool {
        self.policy_ids.iter().any(|policy_id| policy_id == oid)
    }
}

pub trait CertificateCondition {
    fn check(&self, certificate: &CertificateFacts) -> bool;
}

/// Whether the certificate is qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedCondition {
    era: EidasEra,
}

impl QualifiedCondition {
    #[must_use]
    pub const fn new(era: EidasEra) -> Self {
        Self { era }
    }

    #[must_use]
    pub fn for_certificate(certificate: &CertificateFacts) -> Self {
        Self::new(certificate.era())
    }
}

impl CertificateCondition for QualifiedCondition {
    fn check(&self, certificate: &CertificateFacts) -> bool {
        match self.era {
            EidasEra::PreEidas => {
                certificate.qc_compliance
                    || certificate.has_policy(QCP_PUBLIC)
                    || certificate.has_policy(QCP_PUBLIC_WITH_SSCD)
            }
            EidasEra::PostEidas => certificate.qc_compliance,
        }
    }
}

/// Whether the private key of the certificate is held in a secure signature creation device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SscdCondition {
    era: EidasEra,
}

impl SscdCondition {
    #[must_use]
    pub const fn new(era: EidasEra) -> Self {
        Self { era }
    }

    #[must_use]
    pub fn for_certificate(certificate: &CertificateFacts) -> Self {
        Self::new(certificate.era())
    }
}

impl CertificateCondition for SscdCondition {
    fn check(&self, certificate: &CertificateFacts) -> bool {
        match self.era {
            EidasEra::PreEidas => {
                certificate.qc_sscd || certificate.has_policy(QCP_PUBLIC_WITH_SSCD)
            }
            EidasEra::PostEidas => certificate.qc_sscd,
        }
    }
}
