//! Flattening of the CMS's wrapped entity graph.
//!
//! The CMS nests every record as `{ id, attributes: { .. } }` and wraps
//! related records and media as `{ data: <entity | [entity] | null> }`.
//! [`normalize`] turns that into plain objects of the form
//! `{ id, ..attributes }` with relations replaced by their targets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A CMS list or single response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsResponse {
    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub meta: Value,
}

impl CmsResponse {
    /// An empty list response, used when a fetch fails
    pub fn empty() -> Self {
        Self {
            data: Value::Array(Vec::new()),
            meta: Value::Null,
        }
    }

    /// Normalize `data`, keeping `meta` untouched
    pub fn normalized(self) -> Self {
        Self {
            data: normalize(self.data),
            meta: self.meta,
        }
    }

    /// The entities in `data`, whether it holds a list or a single record
    pub fn entities(&self) -> Vec<&Value> {
        match &self.data {
            Value::Array(items) => items.iter().collect(),
            Value::Null => Vec::new(),
            single => vec![single],
        }
    }
}

/// How a JSON value participates in normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `{ id, attributes }` record
    Entity,
    /// `{ data }` envelope around related records
    Relation,
    /// Anything else: scalars, flat objects, components
    Passthrough,
}

impl Shape {
    fn of(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Shape::Passthrough;
        };

        if map.contains_key("id") && map.contains_key("attributes") {
            Shape::Entity
        } else if is_relation_wrapper(map) {
            Shape::Relation
        } else {
            Shape::Passthrough
        }
    }
}

/// A relation envelope carries `data` and at most a `meta` sibling
fn is_relation_wrapper(map: &Map<String, Value>) -> bool {
    map.contains_key("data") && map.keys().all(|key| key == "data" || key == "meta")
}

/// Normalize a CMS value.
///
/// Arrays are normalized element-wise, entities are flattened, and
/// anything that is not an entity is returned unchanged. Never fails:
/// unexpected shapes come back as they went in.
///
/// # Example
///
/// ```
/// use polysite_core::normalize::normalize;
/// use serde_json::json;
///
/// let raw = json!({
///     "id": 7,
///     "attributes": {
///         "title": "Hello",
///         "category": { "data": { "id": 2, "attributes": { "name": "News" } } }
///     }
/// });
///
/// assert_eq!(
///     normalize(raw),
///     json!({ "id": 7, "title": "Hello", "category": { "id": 2, "name": "News" } })
/// );
/// ```
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_entity).collect()),
        other => normalize_entity(other),
    }
}

fn normalize_entity(value: Value) -> Value {
    if Shape::of(&value) != Shape::Entity {
        return value;
    }
    let mut record = match value {
        Value::Object(record) => record,
        other => return other,
    };

    let id = record.remove("id").unwrap_or(Value::Null);
    let attributes = match record.remove("attributes") {
        Some(Value::Object(attributes)) => attributes,
        _ => Map::new(),
    };

    let mut flat = Map::with_capacity(attributes.len() + 1);
    flat.insert("id".to_string(), id);

    for (key, field) in attributes {
        if key == "id" {
            continue;
        }
        flat.insert(key, resolve_field(field));
    }

    Value::Object(flat)
}

fn resolve_field(field: Value) -> Value {
    if Shape::of(&field) != Shape::Relation {
        return field;
    }

    match unwrap_relation(field) {
        Value::Null => Value::Null,
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_entity).collect()),
        single => normalize_entity(single),
    }
}

fn unwrap_relation(wrapper: Value) -> Value {
    match wrapper {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}
