use thiserror::Error;

/// Engine-level error type.
///
/// Only configuration loading and batch worker failures are fatal. Scoring and
/// packing never fail: degraded input is reported through `Diagnostic`s.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Configuration I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Batch worker failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Batch worker error: {err}");
        EngineError::Worker(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = EngineError::InvalidConfig("grade bands must descend".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: grade bands must descend"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EngineError = parse_err.into();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }
}
