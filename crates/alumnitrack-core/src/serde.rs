//! Deserialization helpers for query strings.
//!
//! Query parameters arrive as strings and are frequently empty
//! (`?page=&alumni_id=`). These helpers treat empty values as absent.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parses an optional integer, treating empty or non-numeric input as absent
/// so that `?page=abc` falls back to the default page instead of failing.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Trims a required string, so validators see the value that gets stored.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Trims a string and maps blank values to `None`.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        n: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        s: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Name {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
    }

    #[test]
    fn test_required_string_is_trimmed() {
        let n: Name = serde_json::from_str(r#"{"name":"  a  "}"#).unwrap();
        assert_eq!(n.name, "a");

        let missing: Result<Name, _> = serde_json::from_str("{}");
        assert!(missing.unwrap_err().to_string().contains("missing field `name`"));
    }

    #[test]
    fn test_empty_values_are_none() {
        let p: Probe = serde_json::from_str(r#"{"id":"","n":"","s":"   "}"#).unwrap();
        assert!(p.id.is_none());
        assert!(p.n.is_none());
        assert!(p.s.is_none());
    }

    #[test]
    fn test_missing_values_are_none() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert!(p.id.is_none());
        assert!(p.n.is_none());
        assert!(p.s.is_none());
    }

    #[test]
    fn test_non_numeric_integer_is_none() {
        let p: Probe = serde_json::from_str(r#"{"n":"abc"}"#).unwrap();
        assert!(p.n.is_none());
    }

    #[test]
    fn test_values_parse() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{}","n":"-3","s":" acme "}}"#, id);
        let p: Probe = serde_json::from_str(&json).unwrap();
        assert_eq!(p.id, Some(id));
        assert_eq!(p.n, Some(-3));
        assert_eq!(p.s.as_deref(), Some("acme"));
    }

    #[test]
    fn test_invalid_uuid_is_rejected() {
        let result: Result<Probe, _> = serde_json::from_str(r#"{"id":"not-a-uuid"}"#);
        assert!(result.is_err());
    }
}
