use cosmian_crypto_constraints::{CryptographicConstraint, ExpirationLookup};
use serde::Serialize;
use strum::Display;
use time::OffsetDateTime;

use crate::{diagnostic::AlgorithmUsage, message_tag::MessageTag};

/// The four checks run against a cryptographic constraint, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckKind {
    DigestAcceptability,
    EncryptionAcceptability,
    MinimumKeySize,
    Expiration,
}

/// A failed check, naming the algorithm it was run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: CheckKind,
    pub tag: MessageTag,
    pub algorithm: String,
}

impl Violation {
    fn new(kind: CheckKind, tag: MessageTag, algorithm: &str) -> Self {
        Self {
            kind,
            tag,
            algorithm: algorithm.to_owned(),
        }
    }
}

/// Pure checks of algorithm usages against one resolved constraint.
///
/// The checker knows nothing about severities: it only reports violations.
pub struct AlgorithmAcceptabilityChecker<'a> {
    constraint: &'a CryptographicConstraint,
}

impl<'a> AlgorithmAcceptabilityChecker<'a> {
    #[must_use]
    pub const fn new(constraint: &'a CryptographicConstraint) -> Self {
        Self { constraint }
    }

    #[must_use]
    pub fn check_digest_acceptability(&self, digest_algorithm: &str) -> Option<Violation> {
        (!self.constraint.is_digest_algo_acceptable(digest_algorithm)).then(|| {
            Violation::new(
                CheckKind::DigestAcceptability,
                MessageTag::ASCCM_ANS_2,
                digest_algorithm,
            )
        })
    }

    #[must_use]
    pub fn check_encryption_acceptability(&self, encryption_algorithm: &str) -> Option<Violation> {
        (!self
            .constraint
            .is_encryption_algo_acceptable(encryption_algorithm))
        .then(|| {
            Violation::new(
                CheckKind::EncryptionAcceptability,
                MessageTag::ASCCM_ANS_1,
                encryption_algorithm,
            )
        })
    }

    /// A family without configured minimum is not a violation.
    #[must_use]
    pub fn check_key_size(&self, family: &str, key_size: u32) -> Option<Violation> {
        let minimum = self.constraint.minimum_key_size(family)?;
        (key_size < minimum).then(|| {
            Violation::new(CheckKind::MinimumKeySize, MessageTag::ASCCM_ANS_3, family)
        })
    }

    /// The algorithm is acceptable strictly before its expiration instant.
    #[must_use]
    pub fn check_expiration(&self, algorithm: &str, usage_date: OffsetDateTime) -> Option<Violation> {
        let lookup = self
            .constraint
            .algo_expiration_date
            .as_ref()
            .map_or(ExpirationLookup::Undefined, |expirations| {
                expirations.lookup(algorithm)
            });
        match lookup {
            ExpirationLookup::Defined(expiration) if usage_date < expiration => None,
            ExpirationLookup::Defined(_) => Some(Violation::new(
                CheckKind::Expiration,
                MessageTag::ASCCM_ANS_5,
                algorithm,
            )),
            ExpirationLookup::Undefined => Some(Violation::new(
                CheckKind::Expiration,
                MessageTag::ASCCM_ANS_4,
                algorithm,
            )),
        }
    }

    /// Expiration checks of a usage at `usage_date`: the digest, then the encryption algorithm.
    #[must_use]
    pub fn check_usage_expiration(
        &self,
        usage: &AlgorithmUsage,
        usage_date: OffsetDateTime,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        violations.extend(self.check_expiration(&usage.digest_algorithm, usage_date));
        if let Some(key) = usage.encryption_expiration_key() {
            violations.extend(self.check_expiration(&key, usage_date));
        }
        violations
    }

    /// Every check for one usage, in evaluation order:
    /// digest, encryption, key size, expiration.
    #[must_use]
    pub fn check_usage(&self, usage: &AlgorithmUsage, usage_date: OffsetDateTime) -> Vec<Violation> {
        let mut violations = Vec::new();
        violations.extend(self.check_digest_acceptability(&usage.digest_algorithm));
        if let Some(encryption) = usage.encryption_algorithm.as_deref() {
            violations.extend(self.check_encryption_acceptability(encryption));
            if let Some(key_size) = usage.key_size {
                violations.extend(self.check_key_size(encryption, key_size));
            }
        }
        violations.extend(self.check_usage_expiration(usage, usage_date));
        violations
    }
}

#[cfg(test)]
mod tests {
    use cosmian_crypto_constraints::{CryptographicConstraint, ListAlgo};
    use time::macros::{date, datetime};

    use super::{AlgorithmAcceptabilityChecker, CheckKind};
    use crate::{diagnostic::AlgorithmUsage, message_tag::MessageTag};

    fn constraint() -> CryptographicConstraint {
        CryptographicConstraint {
            acceptable_digest_algo: Some(ListAlgo::from_names(&["SHA256", "SHA512"])),
            acceptable_encryption_algo: Some(ListAlgo::from_names(&["RSA", "ECDSA"])),
            ..CryptographicConstraint::default()
        }
        .with_minimum_key_size("RSA", 2048)
        .with_expiration_date("SHA256", date!(2020 - 02 - 24))
        .with_expiration_date("RSA2048", date!(2022 - 01 - 01))
    }

    fn tags(violations: &[super::Violation]) -> Vec<MessageTag> {
        violations.iter().map(|violation| violation.tag).collect()
    }

    #[test]
    fn test_acceptability() {
        let constraint = constraint();
        let checker = AlgorithmAcceptabilityChecker::new(&constraint);
        assert!(checker.check_digest_acceptability("SHA256").is_none());
        assert_eq!(
            checker.check_digest_acceptability("SHA1").map(|v| v.tag),
            Some(MessageTag::ASCCM_ANS_2)
        );
        // names are compared exactly
        assert!(checker.check_digest_acceptability("sha256").is_some());
        assert!(checker.check_encryption_acceptability("ECDSA").is_none());
        assert_eq!(
            checker.check_encryption_acceptability("DSA").map(|v| v.tag),
            Some(MessageTag::ASCCM_ANS_1)
        );
    }

    #[test]
    fn test_key_size_compares_the_supplied_size() {
        let constraint = constraint();
        let checker = AlgorithmAcceptabilityChecker::new(&constraint);
        assert!(checker.check_key_size("RSA", 2048).is_none());
        assert!(checker.check_key_size("RSA", 4096).is_none());
        let violation = checker.check_key_size("RSA", 1024);
        assert_eq!(violation.as_ref().map(|v| v.kind), Some(CheckKind::MinimumKeySize));
        assert_eq!(violation.map(|v| v.tag), Some(MessageTag::ASCCM_ANS_3));
        // no configured minimum for the family
        assert!(checker.check_key_size("ECDSA", 160).is_none());
    }

    #[test]
    fn test_expiration_is_exclusive() {
        let constraint = constraint();
        let checker = AlgorithmAcceptabilityChecker::new(&constraint);
        assert!(
            checker
                .check_expiration("SHA256", datetime!(2020-02-23 23:59:59 UTC))
                .is_none()
        );
        assert_eq!(
            checker
                .check_expiration("SHA256", datetime!(2020-02-24 0:00 UTC))
                .map(|v| v.tag),
            Some(MessageTag::ASCCM_ANS_5)
        );
        assert_eq!(
            checker
                .check_expiration("SHA512", datetime!(2010-01-01 0:00 UTC))
                .map(|v| v.tag),
            Some(MessageTag::ASCCM_ANS_4)
        );
    }

    #[test]
    fn test_usage_checks_are_ordered() {
        let constraint = CryptographicConstraint::default();
        let checker = AlgorithmAcceptabilityChecker::new(&constraint);
        let violations = checker.check_usage(
            &AlgorithmUsage::new("SHA256", "RSA", 2048),
            datetime!(2018-02-06 09:39:33 UTC),
        );
        assert_eq!(
            tags(&violations),
            vec![
                MessageTag::ASCCM_ANS_2,
                MessageTag::ASCCM_ANS_1,
                MessageTag::ASCCM_ANS_4,
                MessageTag::ASCCM_ANS_4,
            ]
        );
        assert_eq!(violations[2].algorithm, "SHA256");
        assert_eq!(violations[3].algorithm, "RSA2048");

        let constraint = self::constraint();
        let checker = AlgorithmAcceptabilityChecker::new(&constraint);
        let violations = checker.check_usage(
            &AlgorithmUsage::new("SHA256", "RSA", 1024),
            datetime!(2021-01-01 0:00 UTC),
        );
        assert_eq!(
            tags(&violations),
            vec![
                MessageTag::ASCCM_ANS_3,
                MessageTag::ASCCM_ANS_5,
                MessageTag::ASCCM_ANS_4,
            ]
        );
    }
}
