use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Externally supplied field values, classified by shape.
///
/// Only a JSON object is a record. Anything else (string, number, bool,
/// null, array, or no value at all) means "no data", not "a record with no
/// fields".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormData {
    #[default]
    Absent,
    Record(Map<String, Value>),
}

impl FormData {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(record)) => FormData::Record(record.clone()),
            _ => FormData::Absent,
        }
    }

    pub fn as_record(&self) -> Option<&Map<String, Value>> {
        match self {
            FormData::Record(record) => Some(record),
            FormData::Absent => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, FormData::Record(_))
    }
}

impl From<Value> for FormData {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(record) => FormData::Record(record),
            _ => FormData::Absent,
        }
    }
}

impl From<Option<Value>> for FormData {
    fn from(value: Option<Value>) -> Self {
        value.map(FormData::from).unwrap_or_default()
    }
}

/// True for values that fail a presence check: missing, null, empty string
/// or empty array.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Text shown in a field's input for a stored value.
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The live field values of one rendered form, with per-field error markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: IndexMap<String, Value>,
    errors: IndexMap<String, String>,
    mounted: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> String {
        display_text(self.get(key))
    }

    pub fn is_empty_at(&self, key: &str) -> bool {
        is_empty_value(self.get(key))
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Stores what the user typed into a text input.
    pub fn set_text(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.set_value(key, Value::String(text.into()));
    }

    /// Overwrites every key present in `record`; other keys keep their
    /// values. Returns the keys written, in record order.
    pub fn set_fields_value(&mut self, record: &Map<String, Value>) -> Vec<String> {
        record
            .iter()
            .map(|(key, value)| {
                self.values.insert(key.clone(), value.clone());
                self.errors.shift_remove(key);
                key.clone()
            })
            .collect()
    }

    /// Returns every field to its uninitialized state.
    pub fn reset_fields(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The record handed to a submission handler: one entry per key, unset
    /// keys as `null`.
    pub fn snapshot<'a, I>(&self, keys: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .map(|key| {
                let value = self.values.get(key).cloned().unwrap_or(Value::Null);
                (key.to_string(), value)
            })
            .collect()
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn set_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(key.into(), message.into());
    }

    pub fn clear_error(&mut self, key: &str) {
        self.errors.shift_remove(key);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
