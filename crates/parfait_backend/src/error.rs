// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Error types for cache operations.

/// An error from a cache operation.
///
/// This is an opaque error type that can wrap any underlying error from a
/// cache backend. The tiered facade introduces no error kinds of its own;
/// whatever a backend raises travels through unchanged. Use
/// [`source_as`](Error::source_as) to recover the underlying cause if needed.
///
/// # Example
///
/// ```
/// use parfait_backend::Error;
///
/// let error = Error::from_message("operation failed");
/// assert!(error.to_string().contains("operation failed"));
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct Error {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl Error {
    /// Creates a new error from a plain message.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfait_backend::Error;
    ///
    /// let error = Error::from_message("operation failed");
    /// ```
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            source: message.into().into(),
        }
    }

    /// Creates a new error wrapping an underlying cause.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfait_backend::Error;
    /// use std::io;
    ///
    /// let error = Error::from_source(io::Error::new(io::ErrorKind::TimedOut, "backend timed out"));
    /// assert!(error.source_as::<io::Error>().is_some());
    /// ```
    pub fn from_source(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the underlying cause as type `T`, if it is one.
    #[must_use]
    pub fn source_as<T: std::error::Error + 'static>(&self) -> Option<&T> {
        self.source.downcast_ref()
    }
}

/// A specialized [`Result`](std::result::Result) type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_debug_contains_cause_message() {
        let error = Error::from_message("test error message");
        let debug_str = format!("{error:?}");
        assert!(
            debug_str.contains("test error message"),
            "debug output should contain the cause message, got: {debug_str}"
        );
    }

    #[test]
    fn error_display_contains_cause_message() {
        let error = Error::from_message("display test");
        let display_str = format!("{error}");
        assert!(
            display_str.contains("display test"),
            "display output should contain the cause message, got: {display_str}"
        );
    }

    #[test]
    fn source_as_recovers_wrapped_error() {
        let io = std::io::Error::other("disk on fire");
        let error = Error::from_source(io);

        let recovered = error.source_as::<std::io::Error>().expect("source should be io::Error");
        assert_eq!(recovered.to_string(), "disk on fire");
        assert!(error.source_as::<std::fmt::Error>().is_none());
    }

    #[test]
    fn result_type_alias_propagates_errors() {
        fn returns_err() -> Result<i32> {
            Err(Error::from_message("expected failure"))
        }

        let err = returns_err().expect_err("should return an error");
        assert!(format!("{err}").contains("expected failure"));
    }
}
