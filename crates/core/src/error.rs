#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("case id already present in store: {0}")]
    DuplicateCaseId(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl CaseError {
    /// True for errors caused by caller input rather than a fault in the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, CaseError::Validation(_))
    }
}

impl From<oncora_types::CategoryError> for CaseError {
    fn from(err: oncora_types::CategoryError) -> Self {
        CaseError::Validation(err.to_string())
    }
}

pub type CaseResult<T> = std::result::Result<T, CaseError>;
