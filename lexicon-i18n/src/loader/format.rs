use serde_json::Value;

/// Parses the content of a resource file into a JSON-like tree.
pub trait FormatParser: Send {
    /// Parse `content`. Errors are human-readable reasons.
    fn parse(&self, content: &str) -> Result<Value, String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl FormatParser for JsonParser {
    fn parse(&self, content: &str) -> Result<Value, String> {
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl FormatParser for TomlParser {
    fn parse(&self, content: &str) -> Result<Value, String> {
        toml::from_str(content).map_err(|e| format!("invalid TOML: {}", e))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl FormatParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Value, String> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {}", e))?;
        Ok(yaml_to_json(value))
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::from)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(members) => Value::Object(
            members
                .into_iter()
                .filter_map(|(k, v)| {
                    // Keys like `0:` or `yes:` name translations too
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        _ => return None,
                    };
                    Some((key, yaml_to_json(v)))
                })
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
