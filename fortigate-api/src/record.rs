use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configuration object as returned by the appliance.
///
/// The field set is defined by the appliance schema and is never interpreted
/// here beyond natural keys and a handful of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Natural key of this record under `field`, if present and scalar.
    pub fn key(&self, field: &str) -> Option<ObjectKey> {
        ObjectKey::from_value(self.0.get(field)?)
    }

    /// String value of `field`, if it holds a string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Whether `field` holds a non-empty value.
    ///
    /// Absent fields, `null`, `false`, zero, empty strings and empty
    /// collections are all considered empty.
    pub fn is_truthy(&self, field: &str) -> bool {
        match self.0.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Canonical form of a natural key.
///
/// Route sequence numbers and policy ids are numeric on the wire but some
/// firmware versions echo them back as strings; both forms compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collect the natural keys of `records` under `field`.
///
/// Records without a usable key are left out of the set.
pub fn key_set<'a, I>(records: I, field: &str) -> HashSet<ObjectKey>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|record| record.key(field))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{key_set, ObjectKey, Record};

    fn record(value: serde_json::Value) -> Record {
        Record::try_from(value).expect("object")
    }

    #[test]
    fn numeric_and_string_keys_compare_equal() {
        let numeric = record(json!({"seq-num": 7}));
        let text = record(json!({"seq-num": "7"}));
        assert_eq!(numeric.key("seq-num"), text.key("seq-num"));
        assert_eq!(numeric.key("seq-num"), Some(ObjectKey::from("7")));
    }

    #[test]
    fn non_scalar_key_is_none() {
        let rec = record(json!({"name": ["a"], "policyid": null}));
        assert_eq!(rec.key("name"), None);
        assert_eq!(rec.key("policyid"), None);
        assert_eq!(rec.key("missing"), None);
    }

    #[test]
    fn truthiness_follows_emptiness() {
        let rec = record(json!({
            "empty": "",
            "set": "strict",
            "zero": 0,
            "one": 1,
            "none": null,
            "list": [],
            "full": [{"name": "x"}],
            "off": false
        }));
        assert!(!rec.is_truthy("empty"));
        assert!(rec.is_truthy("set"));
        assert!(!rec.is_truthy("zero"));
        assert!(rec.is_truthy("one"));
        assert!(!rec.is_truthy("none"));
        assert!(!rec.is_truthy("list"));
        assert!(rec.is_truthy("full"));
        assert!(!rec.is_truthy("off"));
        assert!(!rec.is_truthy("absent"));
    }

    #[test]
    fn key_set_skips_records_without_key() {
        let records = vec![
            record(json!({"name": "lan"})),
            record(json!({"alias": "nameless"})),
            record(json!({"name": "wan"})),
        ];
        let keys = key_set(&records, "name");
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&ObjectKey::from("lan")));
        assert!(keys.contains(&ObjectKey::from("wan")));
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = json!({"name": "web", "future-field": {"nested": [1, 2]}});
        let rec = record(raw.clone());
        assert_eq!(serde_json::to_value(&rec).expect("serialize"), raw);
    }
}
