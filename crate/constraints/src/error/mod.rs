use thiserror::Error;

pub(crate) mod result;

#[derive(Error, Debug)]
pub enum ConstraintsError {
    #[error("{0}")]
    Default(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Policy parsing error: {0}")]
    TomlDeserialization(#[from] toml::de::Error),

    #[error("Policy serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! constraints_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::constraints_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::constraints_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a policy error from a string.
#[macro_export]
macro_rules! constraints_error {
    ($msg:literal) => {
        $crate::ConstraintsError::InvalidPolicy(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::ConstraintsError::InvalidPolicy($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::ConstraintsError::InvalidPolicy(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! constraints_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::constraints_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::constraints_error!($fmt, $($arg)*))
    };
}
