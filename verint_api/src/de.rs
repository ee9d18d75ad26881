//! Lenient field deserializers for upstream payloads.
//!
//! The API is inconsistent about scalar types: ids are usually strings but
//! sometimes numbers, and free-text fields are occasionally `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Renders a scalar JSON value as a string. `null`, arrays and objects yield `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserializes a string or number id into a `String`; `null` becomes empty.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value).unwrap_or_default())
}

/// Deserializes any scalar into `Some(String)`, and `null` or structured values into `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

/// Deserializes a possibly-null string, defaulting to empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Deserializes a possibly-null boolean, defaulting to `false`.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Deserializes a possibly-null value into `T::default()`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id")]
        id: String,
        #[serde(default, deserialize_with = "opt_string")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "null_default")]
        tags: Vec<String>,
    }

    #[test]
    fn numeric_ids_become_strings() {
        let p: Probe = serde_json::from_value(json!({"id": 42, "parent": 7})).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.parent.as_deref(), Some("7"));
    }

    #[test]
    fn nulls_fall_back_to_defaults() {
        let p: Probe =
            serde_json::from_value(json!({"id": "a", "parent": null, "name": null, "tags": null}))
                .unwrap();
        assert_eq!(p.parent, None);
        assert_eq!(p.name, "");
        assert!(p.tags.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let p: Probe = serde_json::from_value(json!({"id": "a"})).unwrap();
        assert_eq!(p.parent, None);
        assert_eq!(p.name, "");
    }
}
