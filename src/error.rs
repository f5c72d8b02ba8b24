use thiserror::Error;

/// Errors raised by the wizard engine itself.
///
/// Failures originating in collaborators (remote-service calls, prompt
/// functions) are not wrapped in these variants; they propagate to the caller
/// as whatever error the collaborator produced.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Stage not found: {0}")]
    StageNotFound(String),

    #[error("Invalid interaction type: {0}")]
    InvalidInteraction(String),

    #[error("Interaction error: {0}")]
    Interaction(String),
}
