//! The stage-to-stage execution loop.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::abstractions::{ClientProvider, FileSystem, OsFileSystem, OutputSink, StdoutSink};
use crate::environment::Environment;
use crate::error::WizardError;
use crate::interaction::{InteractionRegistry, Prompter, TerminalPrompter};

use super::retrieval::RetrievalResolver;
use super::stage::{Stage, StageContext};
use super::WizardSpec;

/// Drives a wizard from its start stage until a stage declares no successor,
/// then writes the accumulated environment to the output sink.
///
/// Execution is strictly sequential: each retrieval, prompt, and store
/// completes before the next begins, and every error aborts the run without
/// emitting the environment.
pub struct WizardEngine {
    start_stage: String,
    stages: HashMap<String, Stage>,
    env: Environment,
    provider: Arc<dyn ClientProvider>,
    prompter: Arc<dyn Prompter>,
    fs: Arc<dyn FileSystem>,
    output: Arc<dyn OutputSink>,
}

impl std::fmt::Debug for WizardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardEngine")
            .field("start_stage", &self.start_stage)
            .finish_non_exhaustive()
    }
}

impl WizardEngine {
    /// Build an engine from a parsed spec. Fails if the spec names no start
    /// stage. Terminal collaborators are used unless overridden with the
    /// `with_*` methods.
    pub fn new(spec: WizardSpec, provider: Arc<dyn ClientProvider>) -> Result<Self> {
        let start_stage = match spec.start_stage {
            Some(name) if !name.is_empty() => name,
            _ => return Err(WizardError::Config("Start stage not specified".to_string()).into()),
        };
        let stages = spec
            .stages
            .into_iter()
            .map(|spec| (spec.name.clone(), Stage::new(spec)))
            .collect();
        Ok(Self {
            start_stage,
            stages,
            env: Environment::new(),
            provider,
            prompter: Arc::new(TerminalPrompter::new()),
            fs: Arc::new(OsFileSystem),
            output: Arc::new(StdoutSink),
        })
    }

    pub fn with_prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_output(mut self, output: Arc<dyn OutputSink>) -> Self {
        self.output = output;
        self
    }

    /// Run the wizard to completion. A stage reference that matches no
    /// registered stage fails at transition time, naming the missing stage.
    pub async fn execute(&mut self) -> Result<()> {
        let ctx = StageContext {
            retrieval: RetrievalResolver::new(self.provider.clone()),
            interactions: InteractionRegistry::new(self.prompter.clone(), self.fs.clone()),
            output: self.output.clone(),
        };

        let mut current = Some(self.start_stage.clone());
        while let Some(name) = current {
            let stage = self
                .stages
                .get(&name)
                .ok_or_else(|| WizardError::StageNotFound(name.clone()))?;
            debug!(stage = %name, "executing stage");
            stage.execute(&mut self.env, &ctx).await?;
            current = stage.next_stage(&self.env);
        }

        info!("wizard complete");
        self.output.write(&self.env.to_display_string());
        Ok(())
    }

    /// The environment accumulated so far.
    pub fn environment(&self) -> &Environment {
        &self.env
    }
}
