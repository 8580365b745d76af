//! URL path templating and query-string construction.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoachError, Result};

/// Substitute `{name}` placeholders in a path template.
///
/// For each `(key, value)` pair the first occurrence of `{key}` is replaced
/// with the percent-encoded value. Placeholders without a matching key are
/// left untouched.
///
/// ```
/// use coachapi::build_path;
///
/// assert_eq!(build_path("/users/{id}/settings", [("id", "123")]), "/users/123/settings");
/// ```
pub fn build_path<I, K, V>(template: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let mut path = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key.as_ref());
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        path = path.replacen(&placeholder, &encoded, 1);
    }
    path
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Absent value; the key is dropped.
    Null,
    /// A single value.
    Scalar(String),
    /// Repeated key, one pair per element in order.
    List(Vec<String>),
}

impl QueryValue {
    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .filter(|v| !v.is_null())
                    .map(json_scalar)
                    .collect(),
            ),
            other => Self::Scalar(json_scalar(other)),
        }
    }
}

fn json_scalar(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

macro_rules! query_value_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(value: $t) -> Self {
                Self::Scalar(value.to_string())
            }
        })*
    };
}

query_value_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Display> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Ordered query parameters.
///
/// Entries keep insertion order, so the same sequence of pushes always
/// produces the same query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    #[must_use]
    pub fn push(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Build parameters from a serializable struct or map.
    ///
    /// Fields are taken in declaration order. `null` fields are dropped,
    /// arrays become repeated keys, and nested objects are sent as JSON text.
    ///
    /// # Errors
    ///
    /// Returns a network error if the value does not serialize to a JSON
    /// object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)
            .map_err(|e| CoachError::network(format!("Failed to encode query parameters: {e}")))?;

        match json {
            Value::Object(map) => Ok(Self {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (k, QueryValue::from_json(v)))
                    .collect(),
            }),
            Value::Null => Ok(Self::new()),
            other => Err(CoachError::network(format!(
                "Query parameters must be an object, got {other}"
            ))),
        }
    }

    /// Returns true if no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a query string, see [`build_query`].
    #[must_use]
    pub fn to_query_string(&self) -> String {
        build_query(self)
    }
}

/// Serialize query parameters into a query string.
///
/// Null and empty-string values are skipped; list values produce one
/// `key=value` pair per element. Returns `""` when nothing remains,
/// otherwise the pairs joined with `&` and prefixed with `?`.
///
/// ```
/// use coachapi::{build_query, QueryParams};
///
/// let params = QueryParams::new().push("page", 1).push("limit", 10);
/// assert_eq!(build_query(&params), "?page=1&limit=10");
/// assert_eq!(build_query(&QueryParams::new()), "");
/// ```
#[must_use]
pub fn build_query(params: &QueryParams) -> String {
    let mut pairs = Vec::new();

    for (key, value) in &params.entries {
        match value {
            QueryValue::Null => {}
            QueryValue::Scalar(v) if v.is_empty() => {}
            QueryValue::Scalar(v) => pairs.push(encode_pair(key, v)),
            QueryValue::List(items) => {
                pairs.extend(items.iter().map(|item| encode_pair(key, item)));
            }
        }
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

/// Append a query string to a path that may already carry one.
pub(crate) fn append_query(path: &str, params: &QueryParams) -> String {
    let query = build_query(params);
    if query.is_empty() {
        return path.to_string();
    }
    if path.contains('?') {
        format!("{path}&{}", &query[1..])
    } else {
        format!("{path}{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_build_path_substitutes_placeholder() {
        assert_eq!(
            build_path("/users/{id}/settings", [("id", "123")]),
            "/users/123/settings"
        );
    }

    #[test]
    fn test_build_path_encodes_values() {
        assert_eq!(
            build_path("/clients/{id}", [("id", "a b/c?d")]),
            "/clients/a%20b%2Fc%3Fd"
        );
    }

    #[test]
    fn test_build_path_multiple_params() {
        let path = build_path(
            "/clients/{id}/programs/{programId}",
            [("id", "c1"), ("programId", "p9")],
        );
        assert_eq!(path, "/clients/c1/programs/p9");
    }

    #[test]
    fn test_build_path_leaves_unmatched_placeholders() {
        assert_eq!(
            build_path("/programs/{id}/exercises/{exerciseId}", [("id", 7)]),
            "/programs/7/exercises/{exerciseId}"
        );
    }

    #[test]
    fn test_build_path_replaces_first_occurrence_only() {
        assert_eq!(build_path("/{id}/{id}", [("id", "x")]), "/x/{id}");
    }

    #[test]
    fn test_build_query_empty() {
        assert_eq!(build_query(&QueryParams::new()), "");
    }

    #[test]
    fn test_build_query_preserves_order() {
        let params = QueryParams::new().push("page", 1).push("limit", 10);
        assert_eq!(build_query(&params), "?page=1&limit=10");

        let params = QueryParams::new().push("limit", 10).push("page", 1);
        assert_eq!(build_query(&params), "?limit=10&page=1");
    }

    #[test]
    fn test_build_query_skips_null_and_empty() {
        let params = QueryParams::new()
            .push("search", "")
            .push("status", None::<String>)
            .push("page", 2);
        assert_eq!(build_query(&params), "?page=2");

        let params = QueryParams::new().push("search", "").push("sort", None::<&str>);
        assert_eq!(build_query(&params), "");
    }

    #[test]
    fn test_build_query_repeats_list_values() {
        let params = QueryParams::new()
            .push("tags", vec!["knee", "acl rehab"])
            .push("active", true);
        assert_eq!(build_query(&params), "?tags=knee&tags=acl%20rehab&active=true");
    }

    #[test]
    fn test_from_serialize_uses_field_order() {
        #[derive(Serialize)]
        struct Filter {
            page: Option<u32>,
            limit: Option<u32>,
            search: Option<String>,
            tags: Vec<String>,
        }

        let filter = Filter {
            page: Some(1),
            limit: Some(10),
            search: None,
            tags: vec!["a".into(), "b".into()],
        };
        let params = QueryParams::from_serialize(&filter).unwrap();
        assert_eq!(params.to_query_string(), "?page=1&limit=10&tags=a&tags=b");
    }

    #[test]
    fn test_from_serialize_rejects_non_object() {
        let err = QueryParams::from_serialize(&42).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Network);
    }

    #[test]
    fn test_append_query() {
        let params = QueryParams::new().push("page", 2);
        assert_eq!(append_query("/users", &params), "/users?page=2");
        assert_eq!(append_query("/users?x=1", &params), "/users?x=1&page=2");
        assert_eq!(append_query("/users", &QueryParams::new()), "/users");
    }
}
