use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    ConstraintsResult,
    algo::{Algo, AlgoExpirationDate, ListAlgo},
    constraints_ensure,
    level::Level,
};

/// The cryptographic constraint applied at one configuration point.
///
/// A single [`Level`] governs every check performed under the constraint.
/// A list left unset (`None`) is treated by the checks as an empty list,
/// except `mini_public_key_size` where a missing entry means "no minimum".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptographicConstraint {
    pub level: Level,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable_digest_algo: Option<ListAlgo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable_encryption_algo: Option<ListAlgo>,

    /// Minimum public key sizes keyed by algorithm family (`RSA`, `DSA`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mini_public_key_size: Option<ListAlgo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub algo_expiration_date: Option<AlgoExpirationDate>,
}

impl CryptographicConstraint {
    /// `true` when none of the four sub-constraints is configured.
    ///
    /// The level alone does not make a constraint non-empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.acceptable_digest_algo.is_none()
            && self.acceptable_encryption_algo.is_none()
            && self.mini_public_key_size.is_none()
            && self.algo_expiration_date.is_none()
    }

    #[must_use]
    pub fn is_digest_algo_acceptable(&self, name: &str) -> bool {
        self.acceptable_digest_algo
            .as_ref()
            .is_some_and(|list| list.contains(name))
    }

    #[must_use]
    pub fn is_encryption_algo_acceptable(&self, name: &str) -> bool {
        self.acceptable_encryption_algo
            .as_ref()
            .is_some_and(|list| list.contains(name))
    }

    /// The configured minimum key size for an algorithm family, if any.
    #[must_use]
    pub fn minimum_key_size(&self, family: &str) -> Option<u32> {
        self.mini_public_key_size
            .as_ref()
            .and_then(|list| list.get(family))
            .and_then(|algo| algo.size)
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set (or add) the expiration date of `name`.
    #[must_use]
    pub fn with_expiration_date(mut self, name: &str, date: Date) -> Self {
        let expirations = self.algo_expiration_date.unwrap_or_default();
        self.algo_expiration_date = Some(expirations.with_expiration_date(name, date));
        self
    }

    /// Remove `name` from the expiration list.
    #[must_use]
    pub fn without_expiration_date(mut self, name: &str) -> Self {
        self.algo_expiration_date = self
            .algo_expiration_date
            .map(|expirations| expirations.without(name));
        self
    }

    #[must_use]
    pub fn without_acceptable_digest_algo(mut self, name: &str) -> Self {
        self.acceptable_digest_algo = self.acceptable_digest_algo.map(|list| list.without(name));
        self
    }

    #[must_use]
    pub fn without_acceptable_encryption_algo(mut self, name: &str) -> Self {
        self.acceptable_encryption_algo = self
            .acceptable_encryption_algo
            .map(|list| list.without(name));
        self
    }

    /// Set (or add) the minimum key size of an algorithm family.
    #[must_use]
    pub fn with_minimum_key_size(mut self, family: &str, size: u32) -> Self {
        let list = self.mini_public_key_size.unwrap_or_default();
        let algo = list
            .get(family)
            .cloned()
            .unwrap_or_else(|| Algo::new(family))
            .with_size(size);
        self.mini_public_key_size = Some(list.with(algo));
        self
    }

    /// Check the structural invariants of the lists.
    ///
    /// `location` names the configuration point in error messages.
    pub fn validate(&self, location: &str) -> ConstraintsResult<()> {
        let lists = [
            ("acceptable_digest_algo", self.acceptable_digest_algo.as_ref()),
            (
                "acceptable_encryption_algo",
                self.acceptable_encryption_algo.as_ref(),
            ),
            ("mini_public_key_size", self.mini_public_key_size.as_ref()),
            (
                "algo_expiration_date",
                self.algo_expiration_date.as_ref().map(AlgoExpirationDate::algos),
            ),
        ];
        for (list_name, list) in lists {
            let Some(list) = list else { continue };
            if let Some(duplicate) = list.first_duplicate() {
                crate::constraints_bail!(
                    "{location}.{list_name}: algorithm {duplicate} is listed more than once"
                );
            }
            constraints_ensure!(
                list.iter().all(|algo| !algo.name.trim().is_empty()),
                "{location}.{list_name}: algorithm names cannot be empty"
            );
        }
        if let Some(list) = &self.mini_public_key_size {
            if let Some(algo) = list.iter().find(|algo| algo.size.is_none()) {
                crate::constraints_bail!(
                    "{location}.mini_public_key_size: {} has no size",
                    algo.name
                );
            }
        }
        if let Some(expirations) = &self.algo_expiration_date {
            if let Some(algo) = expirations
                .algos()
                .iter()
                .find(|algo| algo.expiration_date.is_none())
            {
                crate::constraints_bail!(
                    "{location}.algo_expiration_date: {} has no date",
                    algo.name
                );
            }
        }
        Ok(())
    }
}
