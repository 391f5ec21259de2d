//! Error handling for run synthesis.
//!
//! Every failure is terminal: a run either completes fully or aborts with
//! one of these variants. There is no partial-run resume.

use thiserror::Error;

/// A specialized `Result` type for rungen operations.
pub type Result<T> = std::result::Result<T, RunGenError>;

/// Error types for run synthesis.
#[derive(Error, Debug)]
pub enum RunGenError {
    /// I/O error from the underlying writer or directory creation.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Compression error from niffler while writing a gzip artifact.
    #[error("Niffler error")]
    Niffler(#[from] niffler::Error),

    /// XML serialization error while rendering a run metadata document.
    #[error("XML error")]
    Xml(#[from] quick_xml::se::SeError),

    /// A configured count exceeds the platform's physical capability.
    ///
    /// Raised during validation unless clamping is requested; the encoders
    /// themselves treat the configuration as a precondition.
    #[error("Parameter {param} = {requested} exceeds {platform} capability ({max})")]
    ParamOutOfRange {
        param: &'static str,
        platform: &'static str,
        requested: u32,
        max: u32,
    },

    /// A configured value is unusable regardless of platform.
    #[error("Invalid parameter {param}: {reason}")]
    InvalidParam { param: &'static str, reason: String },

    /// A read specification string could not be parsed.
    #[error("Invalid read spec {0:?} (expected e.g. \"151\" or \"8i\")")]
    InvalidReadSpec(String),

    /// An external compression binary is not on the PATH.
    ///
    /// Fatal: block-gzipped base-call output cannot be produced without it.
    #[error("External tool `{tool}` not found on PATH")]
    CompressorMissing { tool: &'static str },

    /// An external compression binary ran but did not exit cleanly.
    #[error("External tool `{tool}` exited with status {status}")]
    CompressorFailed { tool: &'static str, status: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = RunGenError::ParamOutOfRange {
            param: "tiles",
            platform: "miseq",
            requested: 40,
            max: 19,
        };
        let display = format!("{}", err);
        assert!(display.contains("tiles"));
        assert!(display.contains("40"));
        assert!(display.contains("19"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RunGenError = io_err.into();
        match err {
            RunGenError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<RunGenError>();
        is_sync::<RunGenError>();
    }
}
