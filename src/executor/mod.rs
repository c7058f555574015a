//! HTTP request execution.
//!
//! Builds a `reqwest` request from a fully-overridden [`ApiCall`] and
//! performs the exchange. By the time a call reaches this module all tag
//! substitution and overriding has already happened; the executor only
//! translates the declarative description to the wire.

pub mod error;

pub use error::RequestError;

use crate::models::{ApiCall, BodyKind, Method, RunnerConfig};
use serde_json::Value;
use std::time::Duration;

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct CallResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl CallResponse {
    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a call and returns the raw response.
///
/// Per-call headers are applied first, then the config-wide headers, so
/// global headers win on collision. Query parameters are appended to the
/// URL. JSON bodies are serialized from the call's untyped value; form
/// bodies are encoded from a flat mapping.
///
/// # Arguments
///
/// * `call` - The fully-overridden call description
/// * `config` - Runner configuration (global headers, timeout)
///
/// # Returns
///
/// The response status and body, or a [`RequestError`] describing why
/// the request could not be built or completed.
pub async fn execute(call: &ApiCall, config: &RunnerConfig) -> Result<CallResponse, RequestError> {
    // Catch bad URLs before reqwest does, with a clearer error.
    url::Url::parse(&call.url)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()
        .map_err(|e| RequestError::BuildError(e.to_string()))?;

    let method = to_reqwest_method(call.method);
    let mut builder = client.request(method, &call.url);

    for (name, value) in &call.headers {
        builder = builder.header(name, value);
    }

    for (name, value) in &config.headers {
        builder = builder.header(name, value);
    }

    if !call.query_parameters.is_empty() {
        builder = builder.query(&call.query_parameters);
    }

    if let Some(body) = &call.body {
        builder = match body.kind {
            BodyKind::Json => builder.json(&body.value),
            BodyKind::FormUrlencoded => builder.form(&form_fields(&body.value)?),
        };
    }

    log::info!("{} {}", call.method, call.url);

    let response = builder.send().await.map_err(RequestError::from)?;
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(RequestError::from)?.to_vec();

    log::info!("{} {} -> {} ({} bytes)", call.method, call.url, status, body.len());

    Ok(CallResponse { status, body })
}

/// Converts the declarative method to reqwest's.
fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::GET => reqwest::Method::GET,
        Method::POST => reqwest::Method::POST,
        Method::PUT => reqwest::Method::PUT,
        Method::DELETE => reqwest::Method::DELETE,
        Method::PATCH => reqwest::Method::PATCH,
        Method::HEAD => reqwest::Method::HEAD,
        Method::OPTIONS => reqwest::Method::OPTIONS,
    }
}

/// Flattens a form body value into encodable name-value pairs.
///
/// Form bodies must be a mapping of scalars; nested mappings or
/// sequences have no defined form encoding here.
fn form_fields(value: &Value) -> Result<Vec<(String, String)>, RequestError> {
    let mapping = value.as_object().ok_or_else(|| {
        RequestError::UnsupportedBody("form-urlencoded body must be a mapping".to_string())
    })?;

    let mut fields = Vec::with_capacity(mapping.len());
    for (name, entry) in mapping {
        let rendered = match entry {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(RequestError::UnsupportedBody(format!(
                    "form field '{}' is not a scalar: {}",
                    name, other
                )))
            }
        };
        fields.push((name.clone(), rendered));
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn call(method: Method, url: String) -> ApiCall {
        ApiCall {
            url,
            method,
            headers: Default::default(),
            query_parameters: Default::default(),
            body: None,
        }
    }

    #[test]
    fn test_form_fields_flat_mapping() {
        let fields = form_fields(&json!({"user": "alice", "attempts": 3, "ok": true})).unwrap();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&("user".to_string(), "alice".to_string())));
        assert!(fields.contains(&("attempts".to_string(), "3".to_string())));
        assert!(fields.contains(&("ok".to_string(), "true".to_string())));
    }

    #[test]
    fn test_form_fields_rejects_nested() {
        assert!(form_fields(&json!({"user": {"id": 1}})).is_err());
        assert!(form_fields(&json!(["not", "a", "mapping"])).is_err());
    }

    #[tokio::test]
    async fn test_execute_get_with_query_and_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", "2"))
            .and(header("X-Api-Key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let mut api_call = call(Method::GET, format!("{}/users", server.uri()));
        api_call
            .query_parameters
            .insert("page".to_string(), "2".to_string());

        let mut config = RunnerConfig::default();
        config
            .headers
            .insert("X-Api-Key".to_string(), "secret".to_string());

        let response = execute(&api_call, &config).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.status, 200);

        let body: Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_execute_post_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({"name": "Alice"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let mut api_call = call(Method::POST, format!("{}/users", server.uri()));
        api_call.body = Some(crate::models::CallBody {
            kind: BodyKind::Json,
            value: json!({"name": "Alice"}),
        });

        let response = execute(&api_call, &RunnerConfig::default()).await.unwrap();
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn test_execute_invalid_url() {
        let api_call = call(Method::GET, "not a url".to_string());
        let err = execute(&api_call, &RunnerConfig::default()).await.unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_execute_non_2xx_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api_call = call(Method::GET, format!("{}/missing", server.uri()));
        let response = execute(&api_call, &RunnerConfig::default()).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }
}
