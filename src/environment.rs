//! Run-scoped variable store for wizard executions.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::query;

/// Accumulates every resolved answer for one wizard run.
///
/// Keys are unique; `store` replaces any existing binding. Retrieval goes
/// through the path evaluator against the whole store, so an expression may
/// cross several stored keys (`"a.b"` selects key `a`, then field `b`).
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: Map<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any existing binding for the key.
    pub fn store(&mut self, key: impl Into<String>, value: Value) {
        self.variables.insert(key.into(), value);
    }

    /// Evaluate a path expression against the whole store.
    pub fn retrieve(&self, expr: &str) -> Value {
        query::search_object(expr, &self.variables)
    }

    /// Resolve a map of path expressions into their current values.
    ///
    /// Returns a new map; the input is never mutated, so descriptors holding
    /// the expression map can be re-resolved on later visits.
    pub fn resolve_parameters(&self, parameters: &HashMap<String, String>) -> Map<String, Value> {
        parameters
            .iter()
            .map(|(key, expr)| (key.clone(), self.retrieve(expr)))
            .collect()
    }

    /// Deterministic, sorted-key rendering of the full store.
    pub fn to_display_string(&self) -> String {
        serde_json::to_string_pretty(&self.variables).unwrap_or_else(|_| "{}".to_string())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
