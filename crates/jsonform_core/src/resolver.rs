use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::{normalize_keys, FieldDescriptor, Schema, SchemaId};
use crate::state::FormData;

/// The field set a form renders, plus the schema metadata it renders with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSchema {
    #[serde(skip)]
    pub schema_id: SchemaId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: Vec<String>,
    pub fields: IndexMap<String, FieldDescriptor>,
    pub synthesized: bool,
}

impl ResolvedSchema {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required keys without a matching field are inert.
    pub fn is_required(&self, key: &str) -> bool {
        self.fields.contains_key(key) && self.required.iter().any(|k| k == key)
    }

    /// A new schema value carrying the resolved properties. The caller's
    /// schema is left untouched.
    pub fn into_schema(self) -> Schema {
        let mut schema = Schema::with_id(self.schema_id, self.title);
        schema.description = self.description;
        schema.required = self.required;
        schema.properties = Some(self.fields);
        schema
    }
}

/// Derives field sets from schemas, synthesizing them from data when a
/// schema declares no `properties`.
///
/// Synthesis happens once per schema identity; later calls reuse the memo
/// entry whatever data they carry.
#[derive(Debug, Default)]
pub struct SchemaResolver {
    memo: HashMap<SchemaId, IndexMap<String, FieldDescriptor>>,
}

impl SchemaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, schema: &Schema, data: &FormData) -> ResolvedSchema {
        let (fields, synthesized) = match &schema.properties {
            Some(properties) => (normalize_keys(properties.clone()), false),
            None => (self.synthesized_for(schema.id(), data).clone(), true),
        };

        ResolvedSchema {
            schema_id: schema.id(),
            title: schema.title.clone(),
            description: schema.description.clone(),
            required: schema.required.clone(),
            fields,
            synthesized,
        }
    }

    fn synthesized_for(
        &mut self,
        id: SchemaId,
        data: &FormData,
    ) -> &IndexMap<String, FieldDescriptor> {
        self.memo.entry(id).or_insert_with(|| {
            let fields = synthesize_fields(data);
            tracing::debug!(
                schema = %id.as_uuid(),
                fields = fields.len(),
                "synthesized field set from data"
            );
            fields
        })
    }

    pub fn is_memoized(&self, id: SchemaId) -> bool {
        self.memo.contains_key(&id)
    }

    /// Drops the memo entry so the next resolution synthesizes again.
    pub fn forget(&mut self, id: SchemaId) -> bool {
        self.memo.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }
}

/// One descriptor per record key, in record order. No data means no fields.
pub fn synthesize_fields(data: &FormData) -> IndexMap<String, FieldDescriptor> {
    match data.as_record() {
        Some(record) => record
            .iter()
            .map(|(key, value)| (key.clone(), FieldDescriptor::synthesized(key, value)))
            .collect(),
        None => IndexMap::new(),
    }
}
