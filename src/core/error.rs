use thiserror::Error;

#[derive(Debug, Error)]
pub enum FfxError {
    #[error("invalid format for {input:?}: {reason}")]
    Format { input: String, reason: String },
    #[error("{program} binary not found in PATH")]
    BinaryNotFound { program: String },
    #[error("failed to execute {program}: {source}")]
    Execution {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid command: {message}")]
    InvalidCommand { message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FfxError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        FfxError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn spawn(program: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            FfxError::BinaryNotFound {
                program: program.to_string(),
            }
        } else {
            FfxError::Execution {
                program: program.to_string(),
                source: err,
            }
        }
    }

    /// True when the external tool could not be started at all.
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            FfxError::BinaryNotFound { .. } | FfxError::Execution { .. }
        )
    }
}
