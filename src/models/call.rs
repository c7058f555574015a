//! Declarative API call description.
//!
//! An `ApiCall` is the YAML description of a single HTTP exchange: the
//! method and URL, optional headers and query parameters, and an optional
//! body carrying a type tag and an untyped value. The call file is the
//! unit a workflow step references.
//!
//! ```yaml
//! url: https://api.example.com/users
//! method: POST
//! headers:
//!   Accept: application/json
//! body:
//!   type: json
//!   value:
//!     name: Alice
//!     roles: [admin]
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Method {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
}

impl Method {
    /// Returns the string representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a method name, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "PATCH" => Some(Method::PATCH),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            _ => None,
        }
    }
}

impl TryFrom<String> for Method {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Method::from_str(&s).ok_or_else(|| format!("unsupported HTTP method '{}'", s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a call body should be encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BodyKind {
    /// Serialize the value as JSON with `Content-Type: application/json`.
    #[serde(rename = "json")]
    Json,

    /// Encode the value as a form with
    /// `Content-Type: application/x-www-form-urlencoded`. The value must
    /// be a flat mapping of scalars.
    #[serde(rename = "form-urlencoded")]
    FormUrlencoded,
}

/// A call body: a type tag plus an untyped value tree.
///
/// The value is kept untyped so body overrides can address arbitrarily
/// nested fields through the document mutator before the request is
/// built.
#[derive(Debug, Clone, Deserialize)]
pub struct CallBody {
    /// Encoding of the body on the wire.
    #[serde(rename = "type")]
    pub kind: BodyKind,

    /// The body payload as a parsed document tree.
    pub value: Value,
}

/// A declarative API call loaded from a call file.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCall {
    /// Target URL for the request.
    pub url: String,

    /// HTTP method.
    pub method: Method,

    /// Request headers as name-value pairs.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Query parameters appended to the URL.
    #[serde(default, rename = "queryParameters")]
    pub query_parameters: HashMap<String, String>,

    /// Optional request body.
    #[serde(default)]
    pub body: Option<CallBody>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::GET.as_str(), "GET");
        assert_eq!(Method::PATCH.as_str(), "PATCH");
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(Method::from_str("get"), Some(Method::GET));
        assert_eq!(Method::from_str("Post"), Some(Method::POST));
        assert_eq!(Method::from_str("INVALID"), None);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(format!("{}", Method::DELETE), "DELETE");
    }

    #[test]
    fn test_deserialize_call_minimal() {
        let yaml = "url: https://example.com\nmethod: GET\n";
        let call: ApiCall = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(call.url, "https://example.com");
        assert_eq!(call.method, Method::GET);
        assert!(call.headers.is_empty());
        assert!(call.query_parameters.is_empty());
        assert!(call.body.is_none());
    }

    #[test]
    fn test_deserialize_call_full() {
        let yaml = r#"
url: https://api.example.com/users
method: post
headers:
  Accept: application/json
queryParameters:
  page: "2"
body:
  type: json
  value:
    name: Alice
    tags: [a, b]
"#;
        let call: ApiCall = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(call.method, Method::POST);
        assert_eq!(call.headers.get("Accept").unwrap(), "application/json");
        assert_eq!(call.query_parameters.get("page").unwrap(), "2");

        let body = call.body.unwrap();
        assert_eq!(body.kind, BodyKind::Json);
        assert_eq!(body.value, json!({"name": "Alice", "tags": ["a", "b"]}));
    }

    #[test]
    fn test_deserialize_form_body() {
        let yaml = r#"
url: https://example.com/login
method: POST
body:
  type: form-urlencoded
  value:
    username: alice
    password: secret
"#;
        let call: ApiCall = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(call.body.unwrap().kind, BodyKind::FormUrlencoded);
    }

    #[test]
    fn test_deserialize_unknown_method() {
        let yaml = "url: https://example.com\nmethod: YEET\n";
        let result: Result<ApiCall, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_unknown_body_kind() {
        let yaml = "url: https://example.com\nmethod: POST\nbody:\n  type: msgpack\n  value: {}\n";
        let result: Result<ApiCall, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
