//! The closed set of interaction screens.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::abstractions::FileSystem;
use crate::error::WizardError;
use crate::query;

use super::prompts::Prompter;
use super::InteractionHandler;

/// Presents a list of options and returns the chosen element.
///
/// When a path is configured it is evaluated against the retrieved list to
/// build display labels. The returned value is always the original element at
/// the chosen index, never the label, so projection loses nothing.
pub struct SimpleSelect {
    message: String,
    path: Option<String>,
    prompter: Arc<dyn Prompter>,
}

impl SimpleSelect {
    pub fn new(message: impl Into<String>, path: Option<String>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            message: message.into(),
            path,
            prompter,
        }
    }
}

#[async_trait]
impl InteractionHandler for SimpleSelect {
    async fn execute(&self, data: Value) -> Result<Value> {
        let items = match data {
            Value::Array(items) if !items.is_empty() => items,
            _ => {
                return Err(
                    WizardError::Interaction("SimpleSelect expects a non-empty list".to_string())
                        .into(),
                )
            }
        };

        let labels: Vec<String> = match &self.path {
            Some(path) => {
                let projected = query::search(path, &Value::Array(items.clone()));
                match projected {
                    // Projection misses stay as nulls, so a well-formed path
                    // always yields a list parallel to the options.
                    Value::Array(labels) if labels.len() == items.len() => {
                        labels.iter().map(query::value_to_string).collect()
                    }
                    _ => items.iter().map(query::value_to_string).collect(),
                }
            }
            None => items.iter().map(query::value_to_string).collect(),
        };

        let (_, index) = self.prompter.select(&self.message, &labels).await?;
        items.into_iter().nth(index).ok_or_else(|| {
            WizardError::Interaction(format!("selection index {index} out of range")).into()
        })
    }
}

/// Rewrites every field of a mapping with freshly prompted input.
pub struct SimplePrompt {
    prompter: Arc<dyn Prompter>,
}

impl SimplePrompt {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self { prompter }
    }
}

#[async_trait]
impl InteractionHandler for SimplePrompt {
    async fn execute(&self, data: Value) -> Result<Value> {
        let mut fields = match data {
            Value::Object(fields) => fields,
            _ => {
                return Err(
                    WizardError::Interaction("SimplePrompt expects a dict as data".to_string())
                        .into(),
                )
            }
        };

        for (key, value) in fields.iter_mut() {
            let response = self.prompter.text(&format!("{key}: ")).await?;
            *value = Value::String(response);
        }
        Ok(Value::Object(fields))
    }
}

/// Prompts for a file path and returns the file's contents.
pub struct FilePrompt {
    message: String,
    prompter: Arc<dyn Prompter>,
    fs: Arc<dyn FileSystem>,
    home: Option<PathBuf>,
}

impl FilePrompt {
    pub fn new(
        message: impl Into<String>,
        prompter: Arc<dyn Prompter>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            message: message.into(),
            prompter,
            fs,
            home: dirs::home_dir(),
        }
    }

    /// Override the home directory used for `~` expansion.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Prompt for a path, expanding a leading `~` segment to the home
    /// directory. All other path forms pass through unchanged.
    pub async fn get_path(&self) -> Result<String> {
        let raw = self.prompter.text(&self.message).await?;
        Ok(self.expand_home(&raw))
    }

    fn expand_home(&self, path: &str) -> String {
        let Some(home) = &self.home else {
            return path.to_string();
        };
        if path == "~" {
            home.to_string_lossy().into_owned()
        } else if let Some(rest) = path.strip_prefix("~/") {
            home.join(rest).to_string_lossy().into_owned()
        } else {
            path.to_string()
        }
    }
}

#[async_trait]
impl InteractionHandler for FilePrompt {
    async fn execute(&self, _data: Value) -> Result<Value> {
        let path = self.get_path().await?;
        if !self.fs.exists(Path::new(&path)) {
            return Err(WizardError::Interaction(format!("File not found: {path}")).into());
        }
        let contents = self.fs.read_to_string(Path::new(&path))?;
        Ok(Value::String(contents))
    }
}
