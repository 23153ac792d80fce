//! Cryptographic constraints of a signature validation policy.
//!
//! The policy holds a default [`CryptographicConstraint`] and optional
//! overrides for the signature, revocation and timestamp contexts.
//! [`ConstraintsParameters::resolve`] picks the constraint in effect for a context.

pub use algo::{Algo, AlgoExpirationDate, ExpirationLookup, ListAlgo};
pub use constraints_parameters::{ConstraintsParameters, ContextConstraints};
pub use context::Context;
pub use cryptographic_constraint::CryptographicConstraint;
pub use error::{
    ConstraintsError,
    result::{ConstraintsResult, ConstraintsResultHelper},
};
pub use level::Level;
pub use resolver::{ConstraintSource, ResolvedConstraint};

mod algo;
mod constraints_parameters;
mod context;
mod cryptographic_constraint;
mod error;
mod level;
mod recommended;
mod resolver;

pub mod reexport {
    pub use time;
}
