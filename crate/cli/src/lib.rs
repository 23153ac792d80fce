pub mod actions;
pub mod error;

pub mod reexport {
    pub use cosmian_crypto_constraints;
    pub use cosmian_signature_validation;
}
