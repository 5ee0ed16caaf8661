//! Shared payload types and JSON field helpers.
//!
//! Step payloads arrive as the `content` object of a step in the app JSON.
//! Fields are read loosely: a wrong JSON type is treated like an absent field.

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

pub type JsonObject = Map<String, Value>;

/// Raw step description as found in the workflow JSON.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StepPayload {
    #[serde(alias = "identifier")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub step_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: JsonObject,
}

impl StepPayload {
    pub fn new(id: &str, step_type: Option<&str>, content: JsonObject) -> Self {
        Self {
            id: id.to_string(),
            step_type: step_type.map(str::to_string),
            title: None,
            content,
        }
    }

    pub fn from_value(value: Value) -> crate::error::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Step types this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    LocalGrid,
    RemoteGrid,
    ContentStack,
}

impl StepType {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "grid" => Some(StepType::LocalGrid),
            "networkGrid" => Some(StepType::RemoteGrid),
            "contentStack" => Some(StepType::ContentStack),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StepType::LocalGrid => "grid",
            StepType::RemoteGrid => "networkGrid",
            StepType::ContentStack => "contentStack",
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, StepType::LocalGrid | StepType::RemoteGrid)
    }
}

// ============================================================================
// Helper functions for extracting values from JSON objects
// ============================================================================

/// Extract a string value.
pub fn get_str<'a>(data: &'a JsonObject, key: &str) -> Option<&'a str> {
    data.get(key).and_then(|v| v.as_str())
}

/// Extract an identifier. Accepts strings and integers (ids written as
/// numbers in hand-edited app files); empty strings count as missing.
pub fn get_id(data: &JsonObject, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Resolve a URL string. Malformed or relative strings resolve to `None`.
pub fn parse_url(raw: &str) -> Option<Url> {
    Url::parse(raw.trim()).ok()
}

/// Extract a string field and resolve it as a URL.
pub fn get_url(data: &JsonObject, key: &str) -> Option<Url> {
    get_str(data, key).and_then(parse_url)
}

/// Extract the object entries of an array field. Non-object entries are skipped.
pub fn get_objects<'a>(data: &'a JsonObject, key: &str) -> Vec<&'a JsonObject> {
    match data.get(key).and_then(|v| v.as_array()) {
        Some(entries) => entries.iter().filter_map(|v| v.as_object()).collect(),
        None => Vec::new(),
    }
}

/// Collect `id` strings from the `workflows` array, ignoring entries without one.
/// Order is kept and repeats are dropped.
pub fn workflow_ids(content: &JsonObject) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in get_objects(content, "workflows")
        .into_iter()
        .filter_map(|w| get_id(w, "id"))
    {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn test_get_str_ignores_wrong_types() {
        let data = obj(json!({"a": "x", "b": 3}));
        assert_eq!(get_str(&data, "a"), Some("x"));
        assert_eq!(get_str(&data, "b"), None);
        assert_eq!(get_str(&data, "c"), None);
    }

    #[test]
    fn test_get_id_accepts_integers() {
        let data = obj(json!({"s": "abc", "n": 42, "f": 1.5, "e": ""}));
        assert_eq!(get_id(&data, "s").as_deref(), Some("abc"));
        assert_eq!(get_id(&data, "n").as_deref(), Some("42"));
        assert_eq!(get_id(&data, "f"), None);
        assert_eq!(get_id(&data, "e"), None, "Empty id counts as missing");
    }

    #[test]
    fn test_get_objects_skips_non_objects() {
        let data = obj(json!({"items": [{"id": "1"}, "junk", 7, {"id": "2"}]}));
        assert_eq!(get_objects(&data, "items").len(), 2);
        assert!(get_objects(&data, "missing").is_empty());
    }

    #[test]
    fn test_get_url() {
        let data = obj(json!({
            "good": "https://cdn.example.com/a.png",
            "bad": "not a url",
            "empty": ""
        }));
        assert_eq!(
            get_url(&data, "good").map(|u| u.to_string()),
            Some("https://cdn.example.com/a.png".to_string())
        );
        assert!(get_url(&data, "bad").is_none());
        assert!(get_url(&data, "empty").is_none());
        assert!(get_url(&data, "missing").is_none());
    }

    #[test]
    fn test_workflow_ids() {
        let content = obj(json!({
            "workflows": [{"id": "wf-1"}, {"name": "no id"}, {"id": "wf-2"}, {"id": "wf-1"}]
        }));
        assert_eq!(workflow_ids(&content), vec!["wf-1", "wf-2"]);
    }

    #[test]
    fn test_step_type_names() {
        assert_eq!(StepType::from_type_name("grid"), Some(StepType::LocalGrid));
        assert_eq!(StepType::from_type_name("networkGrid"), Some(StepType::RemoteGrid));
        assert_eq!(StepType::from_type_name("contentStack"), Some(StepType::ContentStack));
        assert_eq!(StepType::from_type_name("Grid"), None);
        assert!(StepType::RemoteGrid.is_grid());
        assert!(!StepType::ContentStack.is_grid());
    }

    #[test]
    fn test_payload_accepts_identifier_alias() {
        let payload = StepPayload::from_value(json!({
            "identifier": "step-1",
            "type": "grid",
            "content": {"items": []}
        }))
        .unwrap();
        assert_eq!(payload.id, "step-1");
        assert_eq!(payload.step_type.as_deref(), Some("grid"));
        assert!(payload.title.is_none());
    }
}
