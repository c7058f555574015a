//! Tag substitution against the environment store.
//!
//! Override values in workflow files may reference previously captured
//! values through `{{ name }}` tags (optional single spaces around the
//! name). Substitution runs to completion before an override value is
//! written into a call document, and never recurses into the substituted
//! value: whatever text a capture contains is inserted literally.

use super::environment::EnvironmentStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Cached pattern for `{{ name }}` tags. Compiled once; the same pattern
/// is applied to every override value in a run.
static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{ ?(\w+) ?\}\}").expect("Failed to compile tag regex"));

/// Errors raised during tag substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableError {
    /// A tag referenced a capture name that was never populated.
    UnknownEnvironmentKey(String),
}

impl fmt::Display for VariableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableError::UnknownEnvironmentKey(name) => {
                write!(f, "Unknown environment key '{}'", name)
            }
        }
    }
}

impl std::error::Error for VariableError {}

/// Replaces every `{{ name }}` tag in `raw` with the string form of the
/// capture stored under `name`.
///
/// Tags are found leftmost-first in a single pass over the input, so
/// every occurrence of a tag is replaced but text inserted by one
/// substitution is never scanned again. Scalars render in their
/// canonical textual form (numbers and booleans as written, null as
/// `null`, strings without quotes); captured mappings and sequences
/// render as their serialized JSON form.
///
/// # Arguments
///
/// * `raw` - The templated string from an override value
/// * `env` - The captures accumulated by earlier workflow steps
///
/// # Returns
///
/// The fully substituted string, or
/// `VariableError::UnknownEnvironmentKey` if any tag names a capture the
/// store does not hold.
///
/// # Examples
///
/// ```
/// use apirun::variables::{substitute, EnvironmentStore};
/// use serde_json::json;
///
/// let mut env = EnvironmentStore::new();
/// env.put("userId", json!("42"));
///
/// assert_eq!(substitute("id={{ userId }}", &env).unwrap(), "id=42");
/// ```
pub fn substitute(raw: &str, env: &EnvironmentStore) -> Result<String, VariableError> {
    // Fast path: no tag markers at all.
    if !raw.contains("{{") {
        return Ok(raw.to_string());
    }

    let mut result = String::with_capacity(raw.len());
    let mut last_match_end = 0;

    for captures in TAG_REGEX.captures_iter(raw) {
        let tag = captures.get(0).unwrap();
        let name = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

        let value = env
            .get(name)
            .ok_or_else(|| VariableError::UnknownEnvironmentKey(name.to_string()))?;

        result.push_str(&raw[last_match_end..tag.start()]);
        result.push_str(&render_value(value));
        last_match_end = tag.end();
    }

    result.push_str(&raw[last_match_end..]);

    Ok(result)
}

/// Renders a captured value as the text a tag expands to.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Value's Display prints compact canonical JSON, which is also the
        // canonical textual form for numbers, booleans, and null.
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env_with(pairs: &[(&str, Value)]) -> EnvironmentStore {
        let mut env = EnvironmentStore::new();
        for (name, value) in pairs {
            env.put(*name, value.clone());
        }
        env
    }

    #[test]
    fn test_simple_substitution() {
        let env = env_with(&[("userId", json!("42"))]);
        assert_eq!(substitute("id={{ userId }}", &env).unwrap(), "id=42");
    }

    #[test]
    fn test_no_spaces_in_tag() {
        let env = env_with(&[("token", json!("abc"))]);
        assert_eq!(
            substitute("Bearer {{token}}", &env).unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn test_unknown_key() {
        let env = EnvironmentStore::new();
        let err = substitute("id={{ userId }}", &env).unwrap_err();
        assert_eq!(err, VariableError::UnknownEnvironmentKey("userId".to_string()));
    }

    #[test]
    fn test_multiple_distinct_tags() {
        let env = env_with(&[("host", json!("api.example.com")), ("id", json!(7))]);
        assert_eq!(
            substitute("https://{{ host }}/users/{{ id }}", &env).unwrap(),
            "https://api.example.com/users/7"
        );
    }

    #[test]
    fn test_repeated_tag_replaced_everywhere() {
        let env = env_with(&[("v", json!("x"))]);
        assert_eq!(
            substitute("{{ v }}-{{ v }}-{{ v }}", &env).unwrap(),
            "x-x-x"
        );
    }

    #[test]
    fn test_number_and_bool_rendering() {
        let env = env_with(&[
            ("count", json!(42)),
            ("price", json!(19.99)),
            ("active", json!(true)),
            ("nothing", json!(null)),
        ]);
        assert_eq!(
            substitute("{{count}} {{price}} {{active}} {{nothing}}", &env).unwrap(),
            "42 19.99 true null"
        );
    }

    #[test]
    fn test_structured_value_serialized() {
        let env = env_with(&[("user", json!({"id": 1}))]);
        assert_eq!(
            substitute("payload={{ user }}", &env).unwrap(),
            r#"payload={"id":1}"#
        );
    }

    #[test]
    fn test_string_rendered_without_quotes() {
        let env = env_with(&[("name", json!("Alice"))]);
        assert_eq!(substitute("hello {{ name }}", &env).unwrap(), "hello Alice");
    }

    #[test]
    fn test_no_tags_passthrough() {
        let env = EnvironmentStore::new();
        assert_eq!(
            substitute("no tags here", &env).unwrap(),
            "no tags here"
        );
        assert_eq!(substitute("", &env).unwrap(), "");
    }

    #[test]
    fn test_no_recursion_into_substituted_value() {
        // A capture whose text looks like a tag is inserted literally.
        let env = env_with(&[("outer", json!("{{ inner }}"))]);
        assert_eq!(
            substitute("v={{ outer }}", &env).unwrap(),
            "v={{ inner }}"
        );
    }

    #[test]
    fn test_inserted_value_not_rescanned_by_later_tags() {
        // A capture whose text spells out another step's tag must survive
        // the rest of the scan untouched.
        let env = env_with(&[("outer", json!("{{ inner }}")), ("inner", json!("SECRET"))]);
        assert_eq!(
            substitute("a={{ outer }} b={{ inner }}", &env).unwrap(),
            "a={{ inner }} b=SECRET"
        );
    }

    #[test]
    fn test_unmatched_braces_left_alone() {
        let env = env_with(&[("a", json!("1"))]);
        assert_eq!(substitute("{{ a }} {{", &env).unwrap(), "1 {{");
    }

    #[test]
    fn test_first_unknown_key_aborts() {
        let env = env_with(&[("known", json!("k"))]);
        let err = substitute("{{ missing }} and {{ known }}", &env).unwrap_err();
        assert!(matches!(err, VariableError::UnknownEnvironmentKey(name) if name == "missing"));
    }
}
