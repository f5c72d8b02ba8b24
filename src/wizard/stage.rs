//! Single-stage execution: prompt, retrieval, interaction, resolution, and
//! next-stage selection.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::abstractions::OutputSink;
use crate::environment::Environment;
use crate::interaction::InteractionRegistry;
use crate::query;

use super::retrieval::RetrievalResolver;
use super::{NextStageSpec, StageSpec};

/// Collaborators a stage needs while executing.
pub struct StageContext {
    pub retrieval: RetrievalResolver,
    pub interactions: InteractionRegistry,
    pub output: Arc<dyn OutputSink>,
}

/// One node of the wizard graph, executed once per visit.
pub struct Stage {
    spec: StageSpec,
}

impl Stage {
    pub fn new(spec: StageSpec) -> Self {
        Self { spec }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Run the stage: emit the prompt, retrieve data, run the interaction,
    /// and commit the resolution into the environment. Without an interaction
    /// descriptor the retrieved data passes through unchanged; without a
    /// resolution descriptor the environment is untouched.
    pub async fn execute(&self, env: &mut Environment, ctx: &StageContext) -> Result<()> {
        if let Some(prompt) = &self.spec.prompt {
            ctx.output.write(prompt);
        }

        let data = ctx
            .retrieval
            .resolve(self.spec.retrieval.as_ref(), env)
            .await?;

        let transformed = match &self.spec.interaction {
            Some(interaction) => {
                let message = self.spec.prompt.as_deref().unwrap_or("");
                let handler = ctx.interactions.create(interaction, message)?;
                handler.execute(data).await?
            }
            None => data,
        };

        if let Some(resolution) = &self.spec.resolution {
            let projected = match resolution.path.as_deref() {
                Some(expr) => query::search(expr, &transformed),
                None => transformed,
            };
            debug!(stage = %self.spec.name, key = %resolution.key, "storing resolution");
            env.store(resolution.key.clone(), projected);
        }
        Ok(())
    }

    /// Identifier of the stage to run next, or `None` when the wizard ends.
    ///
    /// Variable references resolving to null also end the wizard; non-string
    /// values are stringified and left for the engine's registry lookup to
    /// reject.
    pub fn next_stage(&self, env: &Environment) -> Option<String> {
        match &self.spec.next_stage {
            None => None,
            Some(NextStageSpec::Name { name }) => Some(name.clone()),
            Some(NextStageSpec::Variable { name }) => match env.retrieve(name) {
                Value::Null => None,
                Value::String(next) => Some(next),
                other => Some(query::value_to_string(&other)),
            },
        }
    }
}
