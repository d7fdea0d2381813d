use fixvm_numeric::FixedPoint;
use serde_json::{Map, Value as JsonValue};

/// Ordered result fields of one command.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    fields: Vec<(&'static str, JsonValue)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &'static str, value: impl Into<JsonValue>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// `value`, `raw` and `semantics` of a result.
    pub fn value(self, value: &FixedPoint) -> Self {
        self.field("value", value.to_string())
            .field("raw", value.raw_value().to_string())
            .field("semantics", value.semantics().to_string())
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// Text of a field as `to_lines` prints it.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(plain)
    }

    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            out.push_str(key);
            out.push('=');
            out.push_str(&plain(value));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (key, value) in &self.fields {
            map.insert((*key).to_string(), value.clone());
        }
        JsonValue::Object(map)
    }

    pub fn print(&self, json: bool) {
        if json {
            println!("{}", self.to_json());
        } else {
            print!("{}", self.to_lines());
        }
    }
}

fn plain(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_keep_field_order_and_drop_quotes() {
        let report = Report::new()
            .field("value", "7.5")
            .field("overflow", false)
            .field("bits", 3u64);
        assert_eq!(report.to_lines(), "value=7.5\noverflow=false\nbits=3\n");
        assert_eq!(
            report.to_json(),
            serde_json::json!({"value": "7.5", "overflow": false, "bits": 3})
        );
        assert_eq!(
            report.to_json().to_string(),
            r#"{"value":"7.5","overflow":false,"bits":3}"#
        );
        assert_eq!(report.text("bits").as_deref(), Some("3"));
        assert_eq!(report.get("missing"), None);
    }
}
