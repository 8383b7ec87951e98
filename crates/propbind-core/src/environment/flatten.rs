//! Flattening of structured documents into property keys
//!
//! Documents are parsed by figment's format providers. Mappings become dotted
//! keys (`db.host`) and sequence items become indexed keys (`servers[0]`).
//! Null values are left out.

use figment::providers::{Format, Json, Yaml};
use figment::value::{Dict, Value};
use figment::Figment;

use super::traits::{EnvironmentResult, SEPARATOR};

pub(crate) fn flatten_yaml(document: &str) -> EnvironmentResult<Vec<(String, String)>> {
    let root: Dict = Figment::from(Yaml::string(document)).extract()?;
    flatten(&root)
}

pub(crate) fn flatten_json(document: &str) -> EnvironmentResult<Vec<(String, String)>> {
    let root: Dict = Figment::from(Json::string(document)).extract()?;
    flatten(&root)
}

fn flatten(root: &Dict) -> EnvironmentResult<Vec<(String, String)>> {
    let mut out = Vec::new();
    for (key, value) in root {
        walk(key.clone(), value, &mut out)?;
    }
    Ok(out)
}

fn walk(key: String, value: &Value, out: &mut Vec<(String, String)>) -> EnvironmentResult<()> {
    match value {
        Value::Dict(_, dict) => {
            for (element, child) in dict {
                walk(format!("{key}{SEPARATOR}{element}"), child, out)?;
            }
        }
        Value::Array(_, items) => {
            for (index, item) in items.iter().enumerate() {
                walk(format!("{key}[{index}]"), item, out)?;
            }
        }
        Value::Empty(..) => {}
        Value::String(_, s) => out.push((key, s.clone())),
        Value::Char(_, c) => out.push((key, c.to_string())),
        // Numbers and booleans keep their document spelling.
        other => out.push((key, serde_json::to_string(other)?)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_yaml_nested() {
        let flat = flatten_yaml("db:\n  host: localhost\n  port: 5432\nservers:\n  - a\n  - name: b\n")
            .unwrap();
        assert_eq!(
            flat,
            vec![
                ("db.host".to_string(), "localhost".to_string()),
                ("db.port".to_string(), "5432".to_string()),
                ("servers[0]".to_string(), "a".to_string()),
                ("servers[1].name".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_yaml_rejects_scalar_root() {
        assert!(flatten_yaml("42").is_err());
    }

    #[test]
    fn test_flatten_json_scalars() {
        let flat = flatten_json(r#"{"feature": {"enabled": true, "ratio": 0.5, "note": null}}"#)
            .unwrap();
        assert_eq!(
            flat,
            vec![
                ("feature.enabled".to_string(), "true".to_string()),
                ("feature.ratio".to_string(), "0.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_json_rejects_array_root() {
        assert!(flatten_json(r#"["a", "b"]"#).is_err());
    }
}
