//! Loading and validation of wizard specifications.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::WizardError;

use super::WizardSpec;

pub struct WizardParser;

impl WizardParser {
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<WizardSpec> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read wizard spec: {:?}", path.as_ref()))?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> Result<WizardSpec> {
        let spec: WizardSpec =
            serde_json::from_str(content).context("Failed to parse wizard spec JSON")?;
        Self::validate(&spec)?;
        Ok(spec)
    }

    fn validate(spec: &WizardSpec) -> Result<()> {
        match &spec.start_stage {
            Some(name) if !name.is_empty() => {}
            _ => return Err(WizardError::Config("Start stage not specified".to_string()).into()),
        }

        let mut seen = HashSet::new();
        for stage in &spec.stages {
            if stage.name.is_empty() {
                return Err(WizardError::Config("Stage name cannot be empty".to_string()).into());
            }
            if !seen.insert(stage.name.as_str()) {
                return Err(
                    WizardError::Config(format!("Duplicate stage name: {}", stage.name)).into(),
                );
            }
        }
        Ok(())
    }
}
