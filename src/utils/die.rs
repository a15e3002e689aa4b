use std::fmt::Display;
use std::process::exit;

/// Fail-fast extension for `Result`/`Option`, used throughout this crate at
/// every call site the error taxonomy (configuration errors, I/O errors during
/// emission) designates as fatal.
///
/// This reproduces the call-site idiom the teacher codebase gets from its
/// `zoe` dependency (`.unwrap_or_die(message)`); since this crate drops `zoe`
/// entirely (see `DESIGN.md`), the trait is reimplemented locally rather than
/// hand-rolling `match`/`panic!` at each site.
pub(crate) trait OrDie<T> {
    fn unwrap_or_die(self, message: &str) -> T;
}

impl<T, E: Display> OrDie<T> for Result<T, E> {
    #[inline]
    fn unwrap_or_die(self, message: &str) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                log::error!("{message}: {error}");
                exit(1);
            }
        }
    }
}

impl<T> OrDie<T> for Option<T> {
    #[inline]
    fn unwrap_or_die(self, message: &str) -> T {
        match self {
            Some(value) => value,
            None => {
                log::error!("{message}");
                exit(1);
            }
        }
    }
}
