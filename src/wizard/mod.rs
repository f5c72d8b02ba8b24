//! Wizard specification model and the stage execution engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod engine;
pub mod parser;
pub mod retrieval;
pub mod stage;

pub use engine::WizardEngine;
pub use parser::WizardParser;
pub use retrieval::RetrievalResolver;
pub use stage::{Stage, StageContext};

/// A parsed wizard specification: a start stage plus the stage graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WizardSpec {
    #[serde(default)]
    pub start_stage: Option<String>,
    pub stages: Vec<StageSpec>,
}

/// One node of the wizard graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StageSpec {
    pub name: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub retrieval: Option<RetrievalSpec>,
    #[serde(default)]
    pub interaction: Option<InteractionSpec>,
    #[serde(default)]
    pub resolution: Option<ResolutionSpec>,
    #[serde(default)]
    pub next_stage: Option<NextStageSpec>,
}

/// Where a stage's input data comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum RetrievalSpec {
    /// Data embedded directly in the spec, with an optional projection.
    Static {
        resource: Value,
        #[serde(default)]
        path: Option<String>,
    },
    /// Data fetched from a remote-service operation.
    Request {
        service: String,
        operation: String,
        #[serde(default)]
        parameters: Map<String, Value>,
        #[serde(default)]
        env_parameters: HashMap<String, String>,
        #[serde(default)]
        path: Option<String>,
    },
}

/// Interaction descriptor. The discriminant stays a plain string here so an
/// unknown screen type surfaces as an interaction error at execution time,
/// not as a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InteractionSpec {
    pub screen_type: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// Projects the interaction result and commits it into the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolutionSpec {
    #[serde(default)]
    pub path: Option<String>,
    pub key: String,
}

/// Rule for choosing the following stage; an absent descriptor means the
/// wizard terminates after this stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum NextStageSpec {
    /// A literal stage name.
    Name { name: String },
    /// A path expression resolved against the environment.
    Variable { name: String },
}
