//! Helpers for wrapping an error with a higher level message.
//!
//! The wrapped error keeps the original as its source, so it still shows up in
//! `{:#}` / `{:?}` output and can be recovered with
//! [`anyhow::Error::downcast_ref`] or [`std::error::Error::source`].

use std::fmt::Display;

/// Wraps `err` in a new error whose message is `msg`.
pub fn wrap<E, M>(err: E, msg: M) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
    M: Display + Send + Sync + 'static,
{
    anyhow::Error::new(err).context(msg)
}

/// Formatting front-end for [`wrap`].
///
/// ```
/// use std::io;
///
/// let cause = io::Error::new(io::ErrorKind::NotFound, "no such file");
/// let err = cookies::wrap!(cause, "failed to open {}", "notes.txt");
///
/// assert_eq!(err.to_string(), "failed to open notes.txt");
/// assert_eq!(err.root_cause().to_string(), "no such file");
/// ```
#[macro_export]
macro_rules! wrap {
    ($err:expr, $($arg:tt)+) => {
        $crate::errors::wrap($err, ::std::format!($($arg)+))
    };
}

/// Extension methods to wrap the error of a `Result` in place.
pub trait Wrap<T> {
    /// Wraps the error, if any, with a fixed message.
    fn wrap<M>(self, msg: M) -> anyhow::Result<T>
    where
        M: Display + Send + Sync + 'static;

    /// Wraps the error, if any, with a lazily built message.
    fn wrap_with<M, F>(self, f: F) -> anyhow::Result<T>
    where
        M: Display + Send + Sync + 'static,
        F: FnOnce() -> M;
}

impl<T, E> Wrap<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn wrap<M>(self, msg: M) -> anyhow::Result<T>
    where
        M: Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e, msg))
    }

    fn wrap_with<M, F>(self, f: F) -> anyhow::Result<T>
    where
        M: Display + Send + Sync + 'static,
        F: FnOnce() -> M,
    {
        self.map_err(|e| wrap(e, f()))
    }
}
