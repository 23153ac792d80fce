use std::fmt::Display;

use crate::error::ConstraintsError;

pub type ConstraintsResult<R> = Result<R, ConstraintsError>;

pub trait ConstraintsResultHelper<T> {
    fn context(self, context: &str) -> ConstraintsResult<T>;
    fn with_context<D, O>(self, op: O) -> ConstraintsResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D;
}

impl<T, E> ConstraintsResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> ConstraintsResult<T> {
        self.map_err(|e| ConstraintsError::Default(format!("{context}: {e}")))
    }

    fn with_context<D, O>(self, op: O) -> ConstraintsResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.map_err(|e| ConstraintsError::Default(format!("{}: {e}", op())))
    }
}

impl<T> ConstraintsResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> ConstraintsResult<T> {
        self.ok_or_else(|| ConstraintsError::Default(context.to_owned()))
    }

    fn with_context<D, O>(self, op: O) -> ConstraintsResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.ok_or_else(|| ConstraintsError::Default(format!("{}", op())))
    }
}
