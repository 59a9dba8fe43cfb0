use thiserror::Error;

/// Error taxonomy shared by the orchestration core and the collaborator
/// clients. None of these are retried internally — recovery belongs to the
/// process engine's own error-boundary configuration.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Invalid or missing required input to create or mutate an entity.
    #[error("entity creation failed: {0}")]
    EntityCreation(String),

    /// A referenced case, stage, or process variable does not exist.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Malformed key/value argument list from a process step.
    #[error("invalid method argument: {0}")]
    InvalidMethodArgument(String),

    /// A collaborator answered with a non-2xx status.
    #[error("{service} returned {status}: {message}")]
    Remote {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Transport or serialisation failure.
    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl OrchestrationError {
    pub fn http_status(&self) -> u16 {
        match self {
            // Creation failures surface as 500, matching the upstream
            // exception handler contract.
            Self::EntityCreation(_) => 500,
            Self::EntityNotFound(_) => 404,
            Self::InvalidMethodArgument(_) => 400,
            Self::Remote { .. } => 502,
            Self::Internal(_) => 500,
        }
    }
}
