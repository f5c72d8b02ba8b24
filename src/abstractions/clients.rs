//! Remote-service client abstraction.
//!
//! The engine asks a [`ClientProvider`] for a per-service handle and invokes
//! operations on it. Caching one handle per service name is the provider's
//! responsibility, not the engine's.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A handle to one remote service.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Invoke a single operation with the given parameters.
    async fn invoke(&self, operation: &str, parameters: &Map<String, Value>) -> Result<Value>;
}

impl std::fmt::Debug for dyn ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceClient")
    }
}

/// Source of per-service client handles.
pub trait ClientProvider: Send + Sync {
    fn get_client(&self, service: &str) -> Result<Arc<dyn ServiceClient>>;
}

/// Client provider backed by explicit registration.
///
/// Handles are registered once and shared across lookups, so repeated stages
/// hitting the same service reuse the same client.
#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<String, Arc<dyn ServiceClient>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, service: impl Into<String>, client: Arc<dyn ServiceClient>) {
        self.clients.lock().unwrap().insert(service.into(), client);
    }
}

impl ClientProvider for ClientRegistry {
    fn get_client(&self, service: &str) -> Result<Arc<dyn ServiceClient>> {
        self.clients
            .lock()
            .unwrap()
            .get(service)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No client registered for service: {service}"))
    }
}

/// Scripted client for tests: queued responses, recorded invocations.
#[derive(Default)]
pub struct MockServiceClient {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    invocations: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl MockServiceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn invocations(&self) -> Vec<(String, Map<String, Value>)> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServiceClient for MockServiceClient {
    async fn invoke(&self, operation: &str, parameters: &Map<String, Value>) -> Result<Value> {
        self.invocations
            .lock()
            .unwrap()
            .push((operation.to_string(), parameters.clone()));
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("No mock response configured")),
        }
    }
}
