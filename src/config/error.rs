//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid option values or combinations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("output directory `{0}` does not exist")]
    MissingOutputDir(PathBuf),

    #[error("--allow-redirect only applies to restfile output")]
    StatusWithJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingOutputDir(PathBuf::from("out/nested"));
        assert_eq!(err.to_string(), "output directory `out/nested` does not exist");
        assert!(ConfigError::ZeroTimeout.to_string().contains("timeout"));
    }
}
