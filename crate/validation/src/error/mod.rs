use cosmian_crypto_constraints::ConstraintsError;
use thiserror::Error;

pub(crate) mod result;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    Default(String),

    #[error("Invalid diagnostic data: {0}")]
    InvalidDiagnostic(String),

    #[error(transparent)]
    Constraints(#[from] ConstraintsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! validation_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::validation_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::validation_error!($fmt, $($arg)*));
        }
    };
}

/// Construct an invalid diagnostic data error from a string.
#[macro_export]
macro_rules! validation_error {
    ($msg:literal) => {
        $crate::ValidationError::InvalidDiagnostic(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::ValidationError::InvalidDiagnostic($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::ValidationError::InvalidDiagnostic(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! validation_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::validation_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::validation_error!($fmt, $($arg)*))
    };
}
