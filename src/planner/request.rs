//! Raw listing request
//!
//! Every parameter arrives as an optional string, exactly as the query
//! string carries it. Parsing and validation happen in the planner so that
//! a non-numeric `limit` can fall back to its default instead of failing
//! extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters of `GET /api/sales`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub min_age: Option<String>,
    #[serde(default)]
    pub max_age: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl QueryRequest {
    /// Builds a request from a JSON object, as read by the CLI.
    ///
    /// Numbers and booleans are accepted and stringified, so `{"page": 2}`
    /// and `{"page": "2"}` are equivalent. Nulls are treated as absent.
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        let normalized = match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter_map(|(k, v)| {
                        let v = match v {
                            Value::Null => return None,
                            Value::String(s) => Value::String(s.clone()),
                            Value::Array(items) => Value::String(
                                items
                                    .iter()
                                    .map(|i| match i {
                                        Value::String(s) => s.clone(),
                                        other => other.to_string(),
                                    })
                                    .collect::<Vec<_>>()
                                    .join(","),
                            ),
                            other => Value::String(other.to_string()),
                        };
                        Some((k.clone(), v))
                    })
                    .collect(),
            ),
            other => other.clone(),
        };
        serde_json::from_value(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_keys() {
        let req: QueryRequest = serde_json::from_value(json!({
            "minAge": "20",
            "paymentMethod": "UPI,Cash",
            "sortBy": "Total Amount"
        }))
        .unwrap();
        assert_eq!(req.min_age.as_deref(), Some("20"));
        assert_eq!(req.payment_method.as_deref(), Some("UPI,Cash"));
        assert_eq!(req.sort_by.as_deref(), Some("Total Amount"));
        assert!(req.page.is_none());
    }

    #[test]
    fn test_from_json_stringifies_scalars() {
        let req = QueryRequest::from_json(&json!({
            "page": 2,
            "limit": 25,
            "region": ["North", "East"],
            "search": null
        }))
        .unwrap();
        assert_eq!(req.page.as_deref(), Some("2"));
        assert_eq!(req.limit.as_deref(), Some("25"));
        assert_eq!(req.region.as_deref(), Some("North,East"));
        assert!(req.search.is_none());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(QueryRequest::from_json(&json!([1, 2])).is_err());
    }
}
