use std::fmt::Display;

use crate::error::ValidationError;

pub type ValidationResult<R> = Result<R, ValidationError>;

pub trait ValidationResultHelper<T> {
    fn context(self, context: &str) -> ValidationResult<T>;
    fn with_context<D, O>(self, op: O) -> ValidationResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D;
}

impl<T, E> ValidationResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> ValidationResult<T> {
        self.map_err(|e| ValidationError::Default(format!("{context}: {e}")))
    }

    fn with_context<D, O>(self, op: O) -> ValidationResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.map_err(|e| ValidationError::Default(format!("{}: {e}", op())))
    }
}

impl<T> ValidationResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> ValidationResult<T> {
        self.ok_or_else(|| ValidationError::Default(context.to_owned()))
    }

    fn with_context<D, O>(self, op: O) -> ValidationResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.ok_or_else(|| ValidationError::Default(format!("{}", op())))
    }
}
