//! Stage data retrieval: static resources and remote-service requests.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

use crate::abstractions::ClientProvider;
use crate::environment::Environment;
use crate::query;

use super::RetrievalSpec;

/// Resolves a stage's retrieval descriptor into its input data.
pub struct RetrievalResolver {
    provider: Arc<dyn ClientProvider>,
}

impl RetrievalResolver {
    pub fn new(provider: Arc<dyn ClientProvider>) -> Self {
        Self { provider }
    }

    /// Produce the stage's data. An absent descriptor resolves to an empty
    /// map; both branches apply their optional path projection.
    pub async fn resolve(&self, spec: Option<&RetrievalSpec>, env: &Environment) -> Result<Value> {
        match spec {
            None => Ok(Value::Object(Map::new())),
            Some(RetrievalSpec::Static { resource, path }) => {
                Ok(apply_path(resource.clone(), path.as_deref()))
            }
            Some(RetrievalSpec::Request {
                service,
                operation,
                parameters,
                env_parameters,
                path,
            }) => {
                let client = self.provider.get_client(service)?;
                let operation = xform_name(operation);
                let resolved = env.resolve_parameters(env_parameters);
                let merged = merge_parameters(parameters, resolved);
                debug!(service = %service, operation = %operation, "invoking remote operation");
                let result = client.invoke(&operation, &merged).await?;
                Ok(apply_path(result, path.as_deref()))
            }
        }
    }
}

fn apply_path(value: Value, path: Option<&str>) -> Value {
    match path {
        Some(expr) => query::search(expr, &value),
        None => value,
    }
}

/// Union of static and environment-resolved parameters; environment values
/// win on key collision. Neither input map is mutated.
fn merge_parameters(
    static_params: &Map<String, Value>,
    env_params: Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = static_params.clone();
    for (key, value) in env_params {
        merged.insert(key, value);
    }
    merged
}

/// Normalize an operation name into the provider's callable form:
/// `GetRestApis` becomes `get_rest_apis`, acronym runs stay together
/// (`DescribeDBInstances` becomes `describe_db_instances`).
fn xform_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev_lower = chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit();
            let next_lower = chars.get(i + 1).map(|c| c.is_lowercase()).unwrap_or(false);
            if prev_lower || (chars[i - 1].is_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::{ClientRegistry, MockServiceClient};
    use serde_json::json;
    use std::collections::HashMap;

    fn resolver_with(client: Arc<MockServiceClient>) -> RetrievalResolver {
        let registry = ClientRegistry::new();
        registry.register("apigateway", client);
        RetrievalResolver::new(Arc::new(registry))
    }

    #[test]
    fn test_xform_name() {
        assert_eq!(xform_name("GetRestApis"), "get_rest_apis");
        assert_eq!(xform_name("DescribeDBInstances"), "describe_db_instances");
        assert_eq!(xform_name("ListBuckets"), "list_buckets");
        assert_eq!(xform_name("already_snake"), "already_snake");
    }

    #[test]
    fn test_merge_parameters_env_wins() {
        let mut static_params = Map::new();
        static_params.insert("position".to_string(), json!("static"));
        static_params.insert("limit".to_string(), json!(25));
        let mut env_params = Map::new();
        env_params.insert("position".to_string(), json!("resolved"));

        let merged = merge_parameters(&static_params, env_params);
        assert_eq!(merged.get("position"), Some(&json!("resolved")));
        assert_eq!(merged.get("limit"), Some(&json!(25)));
        // The static map is untouched.
        assert_eq!(static_params.get("position"), Some(&json!("static")));
    }

    #[tokio::test]
    async fn test_absent_retrieval_is_empty_map() {
        let resolver = resolver_with(Arc::new(MockServiceClient::new()));
        let data = resolver.resolve(None, &Environment::new()).await.unwrap();
        assert_eq!(data, json!({}));
    }

    #[tokio::test]
    async fn test_static_retrieval() {
        let resolver = resolver_with(Arc::new(MockServiceClient::new()));
        let spec = RetrievalSpec::Static {
            resource: json!([{"Stage": "CreateApi"}, {"Stage": "NewSwaggerApi"}]),
            path: None,
        };
        let data = resolver
            .resolve(Some(&spec), &Environment::new())
            .await
            .unwrap();
        assert_eq!(data, json!([{"Stage": "CreateApi"}, {"Stage": "NewSwaggerApi"}]));
    }

    #[tokio::test]
    async fn test_static_retrieval_with_path() {
        let resolver = resolver_with(Arc::new(MockServiceClient::new()));
        let spec = RetrievalSpec::Static {
            resource: json!([{"Stage": "CreateApi"}]),
            path: Some("[0].Stage".to_string()),
        };
        let data = resolver
            .resolve(Some(&spec), &Environment::new())
            .await
            .unwrap();
        assert_eq!(data, json!("CreateApi"));
    }

    #[tokio::test]
    async fn test_request_retrieval_merges_and_projects() {
        let client = Arc::new(MockServiceClient::new());
        client.push_response(json!({"items": [{"name": "one"}], "position": "next"}));
        let resolver = resolver_with(client.clone());

        let mut env = Environment::new();
        env.store("Marker", json!("abc"));

        let mut parameters = Map::new();
        parameters.insert("limit".to_string(), json!(25));
        parameters.insert("position".to_string(), json!("overridden"));
        let mut env_parameters = HashMap::new();
        env_parameters.insert("position".to_string(), "Marker".to_string());

        let spec = RetrievalSpec::Request {
            service: "apigateway".to_string(),
            operation: "GetRestApis".to_string(),
            parameters,
            env_parameters,
            path: Some("items".to_string()),
        };

        let data = resolver.resolve(Some(&spec), &env).await.unwrap();
        assert_eq!(data, json!([{"name": "one"}]));

        let invocations = client.invocations();
        assert_eq!(invocations.len(), 1);
        let (operation, params) = &invocations[0];
        assert_eq!(operation, "get_rest_apis");
        assert_eq!(params.get("limit"), Some(&json!(25)));
        assert_eq!(params.get("position"), Some(&json!("abc")));
    }

    #[tokio::test]
    async fn test_provider_errors_propagate_unwrapped() {
        let client = Arc::new(MockServiceClient::new());
        client.push_error("rate exceeded");
        let resolver = resolver_with(client);

        let spec = RetrievalSpec::Request {
            service: "apigateway".to_string(),
            operation: "GetRestApis".to_string(),
            parameters: Map::new(),
            env_parameters: HashMap::new(),
            path: None,
        };
        let err = resolver
            .resolve(Some(&spec), &Environment::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rate exceeded");
    }

    #[tokio::test]
    async fn test_unknown_service_fails() {
        let resolver = RetrievalResolver::new(Arc::new(ClientRegistry::new()));
        let spec = RetrievalSpec::Request {
            service: "nosuch".to_string(),
            operation: "List".to_string(),
            parameters: Map::new(),
            env_parameters: HashMap::new(),
            path: None,
        };
        let err = resolver
            .resolve(Some(&spec), &Environment::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No client registered for service: nosuch"));
    }
}
