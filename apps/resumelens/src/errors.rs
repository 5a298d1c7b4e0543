use thiserror::Error;

/// Input-side failures. Raised while the wizard sits at `Input` and never
/// cause a state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload your resume first")]
    MissingResume,

    #[error("Please paste the job description")]
    MissingJobDescription,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large ({size} bytes, limit {limit} bytes)")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Invalid text file encoding: {0}")]
    UnreadableText(String),
}

impl ValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingJobDescription => "job_description",
            _ => "resume",
        }
    }
}

/// Every failure the analysis workflow can report.
///
/// `Clone + PartialEq` so the wizard can keep the last failure as its error
/// flag and tests can assert on the exact variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Remote analysis mode is not available. Enable AI mode to analyze.")]
    ModeUnavailable,

    #[error("Scoring service unreachable: {0}")]
    Network(String),

    #[error("Scoring service returned status {status_code}: {message}")]
    Server { status_code: u16, message: String },

    #[error("Scoring response did not match the analysis contract: {0}")]
    Parse(String),

    #[error("An analysis is already in progress")]
    ConcurrentRequest,

    #[error(
        "Bullet rewrite count mismatch: {resume_bullets} original vs {improved_bullets} improved"
    )]
    MismatchedLength {
        resume_bullets: usize,
        improved_bullets: usize,
    },

    #[error("Cannot apply '{event}' while in {from}")]
    InvalidTransition { from: String, event: String },
}

impl AnalysisError {
    /// Stable machine-readable label, one per taxonomy entry.
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "VALIDATION_ERROR",
            AnalysisError::ModeUnavailable => "MODE_UNAVAILABLE",
            AnalysisError::Network(_) => "NETWORK_ERROR",
            AnalysisError::Server { .. } => "SERVER_ERROR",
            AnalysisError::Parse(_) => "PARSE_ERROR",
            AnalysisError::ConcurrentRequest => "CONCURRENT_REQUEST_ERROR",
            AnalysisError::MismatchedLength { .. } => "MISMATCHED_LENGTH_ERROR",
            AnalysisError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }

    /// True when the scoring collaborator broke its response contract, as
    /// opposed to being unreachable or refusing the request.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            AnalysisError::Parse(_) | AnalysisError::MismatchedLength { .. }
        )
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_missing_field() {
        assert_eq!(ValidationError::MissingResume.field(), "resume");
        assert_eq!(
            ValidationError::MissingJobDescription.field(),
            "job_description"
        );
    }

    #[test]
    fn test_categories_are_distinct() {
        let errors = [
            AnalysisError::Validation(ValidationError::MissingResume),
            AnalysisError::ModeUnavailable,
            AnalysisError::Network("refused".to_string()),
            AnalysisError::Server {
                status_code: 500,
                message: String::new(),
            },
            AnalysisError::Parse("bad".to_string()),
            AnalysisError::ConcurrentRequest,
            AnalysisError::MismatchedLength {
                resume_bullets: 1,
                improved_bullets: 2,
            },
        ];
        let mut labels: Vec<&str> = errors.iter().map(|e| e.category()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), errors.len());
    }

    #[test]
    fn test_contract_violations_are_separate_from_network_failures() {
        assert!(AnalysisError::Parse("x".to_string()).is_contract_violation());
        assert!(AnalysisError::MismatchedLength {
            resume_bullets: 1,
            improved_bullets: 2
        }
        .is_contract_violation());
        assert!(!AnalysisError::Network("timeout".to_string()).is_contract_violation());
        assert!(!AnalysisError::Server {
            status_code: 500,
            message: String::new()
        }
        .is_contract_violation());
    }

    #[test]
    fn test_server_error_message_includes_status() {
        let e = AnalysisError::Server {
            status_code: 503,
            message: "maintenance".to_string(),
        };
        assert!(e.to_string().contains("503"));
    }
}
