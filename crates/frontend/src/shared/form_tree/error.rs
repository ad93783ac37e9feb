use thiserror::Error;

use super::api::ApiError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// A required parent has no records and cannot be created here
    #[error("no {target} exist yet, so {entity}.{field} cannot be filled in")]
    EmptyOptions {
        entity: String,
        field: String,
        target: String,
    },

    #[error("{entity}.{field}: {message}")]
    Validation {
        entity: String,
        field: String,
        message: String,
    },

    /// A deferred foreign key found no id from its parent's write
    #[error("{entity}.{field} is waiting for a new {target} that was never created")]
    DataIntegrity {
        entity: String,
        field: String,
        target: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] ApiError),

    #[error("unknown entity `{0}`")]
    UnknownEntity(String),

    #[error("{0} needs a target record id")]
    MissingTargetId(&'static str),

    #[error("no row at position {0}")]
    RowOutOfRange(usize),

    #[error("form has not been fully rendered")]
    NotRendered,

    #[error("a submission is already running")]
    SubmitInProgress,

    #[error("form was already submitted")]
    AlreadySubmitted,
}

impl FormError {
    /// Can the user fix this by editing the form and trying again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyOptions { .. } | Self::Validation { .. } | Self::Transport(_)
        )
    }
}
