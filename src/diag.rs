use nix::errno::Errno;
use std::{
    backtrace::{Backtrace, BacktraceStatus},
    fmt, result,
};

const INVALID_ARGUMENT: &str =
    "Invalid argument. Please specify an instance or a Class.";

pub struct Error {
    error: String,
    backtrace: Backtrace,
}

impl Error {
    fn new(error: String) -> Self {
        Self {
            error,
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    /// Build the error raised when a command argument resolves to neither a
    /// class nor an instance.
    pub fn invalid_argument() -> Self {
        Self::new(format!("{:?}: {INVALID_ARGUMENT}", Errno::EINVAL))
    }

    #[must_use]
    /// Message carried by this error, without the backtrace.
    pub fn message(&self) -> &str {
        &self.error
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if self.backtrace.status() == BacktraceStatus::Captured {
            write!(f, "\nBacktrace:\n{}", self.backtrace)
        } else {
            Ok(())
        }
    }
}

impl<E: fmt::Display> From<E> for Error {
    fn from(e: E) -> Error {
        Error::new(e.to_string())
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    use ctor::ctor;

    #[ctor]
    fn init() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    #[test]
    fn test_error_new() {
        let error = Error::new("Test error".to_string());
        assert_eq!(error.error, "Test error");
        assert!(error.backtrace.status() == BacktraceStatus::Captured);
    }

    #[test]
    fn test_error_from() {
        let error: Error = "Test error".to_string().into();
        assert_eq!(error.message(), "Test error");
        assert!(error.backtrace.status() == BacktraceStatus::Captured);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::new("Test error".to_string());
        let debug_output = format!("{error:?}");
        assert!(debug_output.contains("Test error"));
        assert!(debug_output.contains("Backtrace"));
    }

    #[test]
    fn test_invalid_argument_message() {
        let error = Error::invalid_argument();
        assert!(error.message().starts_with("EINVAL"));
        assert!(error
            .message()
            .ends_with("Please specify an instance or a Class."));
    }

    #[test]
    fn test_result_err() {
        let result: Result<u32> = Err(Errno::EINVAL.into());
        assert!(result.is_err());
        assert!(result.unwrap_err().error.contains("EINVAL"));
    }
}
