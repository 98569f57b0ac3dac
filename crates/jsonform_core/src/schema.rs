use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Stable identity of a schema value.
///
/// Every schema gets a fresh id when it is built or parsed; clones share it.
/// The resolver memoizes synthesized field sets under this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaId(Uuid);

impl SchemaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SchemaId {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic type of a field. Advisory only: every field renders as a
/// single-line text input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Boolean,
    Other,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Other => "other",
        }
    }

    /// Type of a sample value, computed once when a field is synthesized.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::String(_) => FieldType::Text,
            Value::Number(_) => FieldType::Number,
            Value::Bool(_) => FieldType::Boolean,
            Value::Null | Value::Array(_) | Value::Object(_) => FieldType::Other,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "string" | "text" => FieldType::Text,
            "number" | "integer" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            _ => FieldType::Other,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::parse(&name)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            field_type: FieldType::Text,
            hidden: false,
        }
    }

    /// Descriptor derived from a sample value: title and key are the record key.
    pub fn synthesized(key: &str, sample: &Value) -> Self {
        Self {
            key: key.to_string(),
            title: Some(key.to_string()),
            field_type: FieldType::of_value(sample),
            hidden: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Label text; falls back to the key when no title is set.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSchema")]
pub struct Schema {
    #[serde(skip)]
    id: SchemaId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, FieldDescriptor>>,
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: Option<IndexMap<String, FieldDescriptor>>,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        Self {
            id: SchemaId::new(),
            title: raw.title,
            description: raw.description,
            required: raw.required,
            properties: raw.properties.map(normalize_keys),
        }
    }
}

/// The map key is the field identity; descriptor keys are forced to match it.
pub(crate) fn normalize_keys(
    properties: IndexMap<String, FieldDescriptor>,
) -> IndexMap<String, FieldDescriptor> {
    properties
        .into_iter()
        .map(|(key, mut descriptor)| {
            descriptor.key = key.clone();
            (key, descriptor)
        })
        .collect()
}

impl Default for Schema {
    fn default() -> Self {
        Self::new("")
    }
}

impl Schema {
    /// A schema without `properties`: fields are synthesized from data.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SchemaId::new(),
            title: title.into(),
            description: None,
            required: Vec::new(),
            properties: None,
        }
    }

    /// The schema a page builder starts from: explicitly empty properties.
    pub fn registration_default() -> Self {
        Self {
            id: SchemaId::new(),
            title: "A registration form".to_string(),
            description: Some("A simple form example.".to_string()),
            required: Vec::new(),
            properties: Some(IndexMap::new()),
        }
    }

    pub(crate) fn with_id(id: SchemaId, title: String) -> Self {
        Self {
            id,
            title,
            description: None,
            required: Vec::new(),
            properties: None,
        }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Declares `properties` explicitly, even if no field is ever added.
    pub fn with_empty_properties(mut self) -> Self {
        self.properties.get_or_insert_with(IndexMap::new);
        self
    }

    pub fn with_field(mut self, descriptor: FieldDescriptor) -> Self {
        self.add_field(descriptor);
        self
    }

    pub fn add_field(&mut self, descriptor: FieldDescriptor) {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(descriptor.key.clone(), descriptor);
    }

    pub fn remove_field(&mut self, key: &str) -> Option<FieldDescriptor> {
        self.properties.as_mut().and_then(|p| p.shift_remove(key))
    }

    pub fn get_field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    pub fn has_properties(&self) -> bool {
        self.properties.is_some()
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }
}
