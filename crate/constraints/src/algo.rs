use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

time::serde::format_description!(policy_date, Date, "[year]-[month]-[day]");

/// An algorithm entry of a policy list.
///
/// The name is the identity key within a list and is compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Algo {
    pub name: String,

    /// First day on which the algorithm is no longer acceptable.
    #[serde(
        rename = "date",
        default,
        with = "policy_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<Date>,

    /// Minimum key size in bits, for size-qualified lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Algo {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            expiration_date: None,
            size: None,
        }
    }

    #[must_use]
    pub fn with_expiration_date(mut self, expiration_date: Date) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// The expiration instant: midnight UTC of the expiration date.
    #[must_use]
    pub fn expiration_time(&self) -> Option<OffsetDateTime> {
        self.expiration_date
            .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
    }
}

/// An ordered allow-list of algorithms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListAlgo {
    algos: Vec<Algo>,
}

impl ListAlgo {
    #[must_use]
    pub const fn new(algos: Vec<Algo>) -> Self {
        Self { algos }
    }

    /// Build a list of bare names.
    #[must_use]
    pub fn from_names(names: &[&str]) -> Self {
        Self {
            algos: names.iter().map(|name| Algo::new(name)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Algo> {
        self.algos.iter().find(|algo| algo.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Algo> {
        self.algos.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.algos.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.algos.is_empty()
    }

    /// A copy of this list without any entry named `name`.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        Self {
            algos: self
                .algos
                .iter()
                .filter(|algo| algo.name != name)
                .cloned()
                .collect(),
        }
    }

    /// A copy of this list where the entry named like `algo` is replaced,
    /// or `algo` is appended when no such entry exists.
    #[must_use]
    pub fn with(&self, algo: Algo) -> Self {
        let mut algos = self.algos.clone();
        match algos.iter_mut().find(|a| a.name == algo.name) {
            Some(existing) => *existing = algo,
            None => algos.push(algo),
        }
        Self { algos }
    }

    /// The first name appearing more than once, if any.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.algos
            .iter()
            .map(|algo| algo.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

/// Expiration dates of algorithms, keyed by algorithm name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlgoExpirationDate {
    algos: ListAlgo,
}

/// Outcome of an expiration date lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationLookup {
    /// The algorithm is listed with this expiration instant.
    Defined(OffsetDateTime),
    /// The algorithm is not listed, or listed without a date.
    Undefined,
}

impl AlgoExpirationDate {
    #[must_use]
    pub const fn new(algos: ListAlgo) -> Self {
        Self { algos }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> ExpirationLookup {
        self.algos
            .get(name)
            .and_then(Algo::expiration_time)
            .map_or(ExpirationLookup::Undefined, ExpirationLookup::Defined)
    }

    #[must_use]
    pub const fn algos(&self) -> &ListAlgo {
        &self.algos
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.algos.is_empty()
    }

    /// A copy where `name` expires on `date`, added when missing.
    #[must_use]
    pub fn with_expiration_date(&self, name: &str, date: Date) -> Self {
        let algo = self
            .algos
            .get(name)
            .cloned()
            .unwrap_or_else(|| Algo::new(name))
            .with_expiration_date(date);
        Self {
            algos: self.algos.with(algo),
        }
    }

    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        Self {
            algos: self.algos.without(name),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use time::macros::{date, datetime};

    use super::{Algo, AlgoExpirationDate, ExpirationLookup, ListAlgo};

    #[test]
    fn test_list_lookup_is_exact() {
        let list = ListAlgo::from_names(&["SHA256", "SHA512"]);
        assert!(list.contains("SHA256"));
        assert!(!list.contains("sha256"));
        assert!(!list.contains("SHA-256"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_list_transformations_do_not_alias() {
        let list = ListAlgo::from_names(&["RSA", "DSA"]);
        let tightened = list.with(Algo::new("RSA").with_size(4096)).without("DSA");

        assert_eq!(list.get("RSA").unwrap().size, None);
        assert!(list.contains("DSA"));
        assert_eq!(tightened.get("RSA").unwrap().size, Some(4096));
        assert!(!tightened.contains("DSA"));

        let extended = list.with(Algo::new("ECDSA").with_size(256));
        assert_eq!(
            extended.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            vec!["RSA", "DSA", "ECDSA"]
        );
    }

    #[test]
    fn test_first_duplicate() {
        let list = ListAlgo::new(vec![Algo::new("SHA1"), Algo::new("SHA256"), Algo::new("SHA1")]);
        assert_eq!(list.first_duplicate(), Some("SHA1"));
        assert_eq!(ListAlgo::from_names(&["SHA1"]).first_duplicate(), None);
    }

    #[test]
    fn test_expiration_lookup() {
        let expirations = AlgoExpirationDate::new(ListAlgo::new(vec![
            Algo::new("SHA256").with_expiration_date(date!(2020 - 02 - 24)),
            Algo::new("SHA1"),
        ]));
        assert_eq!(
            expirations.lookup("SHA256"),
            ExpirationLookup::Defined(datetime!(2020-02-24 00:00 UTC))
        );
        assert_eq!(expirations.lookup("SHA1"), ExpirationLookup::Undefined);
        assert_eq!(expirations.lookup("MD5"), ExpirationLookup::Undefined);

        let updated = expirations.with_expiration_date("SHA1", date!(2009 - 12 - 31));
        assert_eq!(
            updated.lookup("SHA1"),
            ExpirationLookup::Defined(datetime!(2009-12-31 00:00 UTC))
        );
        assert_eq!(expirations.lookup("SHA1"), ExpirationLookup::Undefined);
        assert_eq!(updated.without("SHA256").lookup("SHA256"), ExpirationLookup::Undefined);
    }
}
