use time::{Date, Month};

use crate::{
    algo::{Algo, AlgoExpirationDate, ListAlgo},
    constraints_parameters::ConstraintsParameters,
    cryptographic_constraint::CryptographicConstraint,
    level::Level,
};

const fn first_of_january(year: i32) -> Date {
    match Date::from_calendar_date(year, Month::January, 1) {
        Ok(date) => date,
        Err(_) => Date::MIN,
    }
}

impl ConstraintsParameters {
    /// A conservative policy used when no policy file is provided.
    ///
    /// Only a default constraint is configured, at level `FAIL`.
    /// Legacy algorithms stay listed so that their expiration is reported as
    /// `ASCCM_ANS_5` instead of a missing entry.
    #[must_use]
    pub fn recommended() -> Self {
        let digests = ListAlgo::from_names(&[
            "SHA1", "SHA224", "SHA256", "SHA384", "SHA512", "SHA3-256", "SHA3-384", "SHA3-512",
            "RIPEMD160",
        ]);
        let encryptions = ListAlgo::from_names(&["RSA", "RSA-PSS", "DSA", "ECDSA", "EdDSA"]);
        let minimum_sizes = ListAlgo::new(vec![
            Algo::new("RSA").with_size(2048),
            Algo::new("RSA-PSS").with_size(2048),
            Algo::new("DSA").with_size(2048),
            Algo::new("ECDSA").with_size(256),
            Algo::new("EdDSA").with_size(256),
        ]);

        let expirations = [
            ("MD5", 2005),
            ("SHA1", 2010),
            ("RIPEMD160", 2012),
            ("SHA224", 2027),
            ("SHA256", 2031),
            ("SHA384", 2031),
            ("SHA512", 2031),
            ("SHA3-256", 2031),
            ("SHA3-384", 2031),
            ("SHA3-512", 2031),
            ("RSA1024", 2010),
            ("RSA1536", 2017),
            ("RSA2048", 2031),
            ("RSA3072", 2031),
            ("RSA4096", 2031),
            ("RSA-PSS2048", 2031),
            ("RSA-PSS3072", 2031),
            ("RSA-PSS4096", 2031),
            ("DSA1024", 2016),
            ("DSA2048", 2031),
            ("DSA3072", 2031),
            ("ECDSA192", 2013),
            ("ECDSA256", 2031),
            ("ECDSA384", 2031),
            ("ECDSA512", 2031),
            ("ECDSA521", 2031),
            ("EdDSA256", 2031),
            ("EdDSA456", 2031),
        ]
        .into_iter()
        .map(|(name, year)| Algo::new(name).with_expiration_date(first_of_january(year)))
        .collect();

        Self::default().with_cryptographic(CryptographicConstraint {
            level: Level::Fail,
            acceptable_digest_algo: Some(digests),
            acceptable_encryption_algo: Some(encryptions),
            mini_public_key_size: Some(minimum_sizes),
            algo_expiration_date: Some(AlgoExpirationDate::new(ListAlgo::new(expirations))),
        })
    }
}
