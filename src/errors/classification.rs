use super::types::ProbeError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl ProbeError {
    /// Classify this error to determine its type and the process exit code.
    /// Configuration errors exit 2, transport errors 3, decode errors 4,
    /// everything else (including failed checks) exits 1.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ProbeError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            ProbeError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                exit_code: 3,
            },
            ProbeError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                exit_code: 3,
            },
            ProbeError::Decode(_) => ErrorClassification {
                error_type: "DecodeError",
                exit_code: 4,
            },
            ProbeError::Conformance(_) => ErrorClassification {
                error_type: "ConformanceError",
                exit_code: 1,
            },
            ProbeError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            ProbeError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
            ProbeError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                exit_code: 1,
            },
        }
    }
}
