use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::{ValidationResult, ValidationResultHelper, validation_bail, validation_ensure};

const fn intact() -> bool {
    true
}

/// The algorithms used to produce one signature value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmUsage {
    pub digest_algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,
}

impl AlgorithmUsage {
    #[must_use]
    pub fn new(digest_algorithm: &str, encryption_algorithm: &str, key_size: u32) -> Self {
        Self {
            digest_algorithm: digest_algorithm.to_owned(),
            encryption_algorithm: Some(encryption_algorithm.to_owned()),
            key_size: Some(key_size),
        }
    }

    /// Name under which the encryption algorithm is listed in the expiration
    /// dates: `RSA2048` when the key size is known, `RSA` otherwise.
    #[must_use]
    pub fn encryption_expiration_key(&self) -> Option<String> {
        let encryption = self.encryption_algorithm.as_deref()?;
        Some(self.key_size.map_or_else(
            || encryption.to_owned(),
            |size| format!("{encryption}{size}"),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureFacts {
    pub id: String,
    #[serde(flatten)]
    pub usage: AlgorithmUsage,
    #[serde(default = "intact")]
    pub signature_intact: bool,
    /// Timestamps covering this signature.
    #[serde(default)]
    pub timestamp_ids: Vec<String>,
    /// Revocation data used to validate the signing certificate.
    #[serde(default)]
    pub revocation_ids: Vec<String>,
}

impl SignatureFacts {
    #[must_use]
    pub fn new(id: &str, usage: AlgorithmUsage) -> Self {
        Self {
            id: id.to_owned(),
            usage,
            signature_intact: true,
            timestamp_ids: Vec::new(),
            revocation_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp_id: &str) -> Self {
        self.timestamp_ids.push(timestamp_id.to_owned());
        self
    }

    #[must_use]
    pub fn with_revocation(mut self, revocation_id: &str) -> Self {
        self.revocation_ids.push(revocation_id.to_owned());
        self
    }

    #[must_use]
    pub const fn with_signature_intact(mut self, signature_intact: bool) -> Self {
        self.signature_intact = signature_intact;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFacts {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub production_time: OffsetDateTime,
    /// Proof of existence of the timestamp itself, when another evidence provides one.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub poe: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub usage: AlgorithmUsage,
    #[serde(default = "intact")]
    pub signature_intact: bool,
}

impl TimestampFacts {
    #[must_use]
    pub fn new(id: &str, production_time: OffsetDateTime, usage: AlgorithmUsage) -> Self {
        Self {
            id: id.to_owned(),
            production_time,
            poe: None,
            usage,
            signature_intact: true,
        }
    }

    #[must_use]
    pub const fn with_poe(mut self, poe: OffsetDateTime) -> Self {
        self.poe = Some(poe);
        self
    }

    #[must_use]
    pub const fn with_signature_intact(mut self, signature_intact: bool) -> Self {
        self.signature_intact = signature_intact;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationFacts {
    pub id: String,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub production_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub poe: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub usage: AlgorithmUsage,
    #[serde(default = "intact")]
    pub signature_intact: bool,
}

impl RevocationFacts {
    #[must_use]
    pub fn new(id: &str, usage: AlgorithmUsage) -> Self {
        Self {
            id: id.to_owned(),
            production_time: None,
            poe: None,
            usage,
            signature_intact: true,
        }
    }

    #[must_use]
    pub const fn with_production_time(mut self, production_time: OffsetDateTime) -> Self {
        self.production_time = Some(production_time);
        self
    }

    #[must_use]
    pub const fn with_poe(mut self, poe: OffsetDateTime) -> Self {
        self.poe = Some(poe);
        self
    }

    #[must_use]
    pub const fn with_signature_intact(mut self, signature_intact: bool) -> Self {
        self.signature_intact = signature_intact;
        self
    }
}

/// The already verified facts about a signed document the engine works on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticData {
    #[serde(with = "time::serde::rfc3339")]
    pub validation_time: OffsetDateTime,
    #[serde(default)]
    pub signatures: Vec<SignatureFacts>,
    #[serde(default)]
    pub timestamps: Vec<TimestampFacts>,
    #[serde(default)]
    pub revocations: Vec<RevocationFacts>,
}

impl DiagnosticData {
    #[must_use]
    pub const fn new(validation_time: OffsetDateTime) -> Self {
        Self {
            validation_time,
            signatures: Vec::new(),
            timestamps: Vec::new(),
            revocations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: SignatureFacts) -> Self {
        self.signatures.push(signature);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: TimestampFacts) -> Self {
        self.timestamps.push(timestamp);
        self
    }

    #[must_use]
    pub fn with_revocation(mut self, revocation: RevocationFacts) -> Self {
        self.revocations.push(revocation);
        self
    }

    #[must_use]
    pub const fn with_validation_time(mut self, validation_time: OffsetDateTime) -> Self {
        self.validation_time = validation_time;
        self
    }

    #[must_use]
    pub fn signature(&self, id: &str) -> Option<&SignatureFacts> {
        self.signatures.iter().find(|signature| signature.id == id)
    }

    #[must_use]
    pub fn timestamp(&self, id: &str) -> Option<&TimestampFacts> {
        self.timestamps.iter().find(|timestamp| timestamp.id == id)
    }

    #[must_use]
    pub fn revocation(&self, id: &str) -> Option<&RevocationFacts> {
        self.revocations.iter().find(|revocation| revocation.id == id)
    }

    /// Check that ids are unique, that signatures only reference known timestamps
    /// and revocation data, and that no proof of existence predates the
    /// production of its token.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut ids = HashSet::new();
        let all_ids = self
            .signatures
            .iter()
            .map(|s| s.id.as_str())
            .chain(self.timestamps.iter().map(|t| t.id.as_str()))
            .chain(self.revocations.iter().map(|r| r.id.as_str()));
        for id in all_ids {
            validation_ensure!(!id.is_empty(), "a subject has an empty id");
            if !ids.insert(id) {
                validation_bail!("duplicate subject id: {id}");
            }
        }
        for signature in &self.signatures {
            for timestamp_id in &signature.timestamp_ids {
                validation_ensure!(
                    self.timestamp(timestamp_id).is_some(),
                    "signature {} references an unknown timestamp: {timestamp_id}",
                    signature.id
                );
            }
            for revocation_id in &signature.revocation_ids {
                validation_ensure!(
                    self.revocation(revocation_id).is_some(),
                    "signature {} references unknown revocation data: {revocation_id}",
                    signature.id
                );
            }
        }
        for timestamp in &self.timestamps {
            if let Some(poe) = timestamp.poe {
                validation_ensure!(
                    poe >= timestamp.production_time,
                    "timestamp {} has a proof of existence before its production time",
                    timestamp.id
                );
            }
        }
        for revocation in &self.revocations {
            if let (Some(poe), Some(production_time)) = (revocation.poe, revocation.production_time)
            {
                validation_ensure!(
                    poe >= production_time,
                    "revocation data {} has a proof of existence before its production time",
                    revocation.id
                );
            }
        }
        Ok(())
    }

    /// Parse and check diagnostic data serialized in JSON.
    pub fn from_json_str(diagnostic: &str) -> ValidationResult<Self> {
        let diagnostic_data: Self = serde_json::from_str(diagnostic)?;
        diagnostic_data.validate()?;
        Ok(diagnostic_data)
    }

    pub fn load_from_file(path: &Path) -> ValidationResult<Self> {
        debug!("loading diagnostic data from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read the diagnostic data file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> ValidationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
