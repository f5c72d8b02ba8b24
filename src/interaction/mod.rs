//! Interaction screens turning retrieved data into user-confirmed values.
//!
//! Screens form a closed set dispatched on the `ScreenType` discriminant of a
//! stage's interaction descriptor. Unknown discriminants are an error, never
//! a silent no-op.

pub mod prompts;
pub mod screens;

pub use prompts::{MockPrompter, Prompter, TerminalPrompter};
pub use screens::{FilePrompt, SimplePrompt, SimpleSelect};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::abstractions::FileSystem;
use crate::error::WizardError;
use crate::wizard::InteractionSpec;

/// A single interaction step: transforms retrieved data into the value the
/// user confirmed.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    async fn execute(&self, data: Value) -> Result<Value>;
}

impl std::fmt::Debug for dyn InteractionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("InteractionHandler")
    }
}

/// Factory for interaction handlers.
///
/// Holds the prompter and filesystem collaborators the screens need and
/// instantiates the screen named by a descriptor's discriminant.
pub struct InteractionRegistry {
    prompter: Arc<dyn Prompter>,
    fs: Arc<dyn FileSystem>,
}

impl InteractionRegistry {
    pub fn new(prompter: Arc<dyn Prompter>, fs: Arc<dyn FileSystem>) -> Self {
        Self { prompter, fs }
    }

    pub fn create(
        &self,
        spec: &InteractionSpec,
        message: &str,
    ) -> Result<Box<dyn InteractionHandler>> {
        match spec.screen_type.as_str() {
            "SimpleSelect" => Ok(Box::new(SimpleSelect::new(
                message,
                spec.path.clone(),
                self.prompter.clone(),
            ))),
            "SimplePrompt" => Ok(Box::new(SimplePrompt::new(self.prompter.clone()))),
            "FilePrompt" => Ok(Box::new(FilePrompt::new(
                message,
                self.prompter.clone(),
                self.fs.clone(),
            ))),
            other => Err(WizardError::InvalidInteraction(other.to_string()).into()),
        }
    }
}
