use serde::Serialize;

use crate::errors::FormError;
use crate::resolver::ResolvedSchema;
use crate::schema::FieldType;
use crate::state::FormState;

/// Message shown under a required field left empty.
pub const REQUIRED_MESSAGE: &str = "请输入";

/// Render model of one labeled text input. `key` is the reconciliation
/// identity of the control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub visible: bool,
    pub required: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn render_fields(resolved: &ResolvedSchema, state: &FormState) -> Vec<FieldView> {
    resolved
        .fields
        .iter()
        .map(|(key, descriptor)| FieldView {
            key: key.clone(),
            label: descriptor.label().to_string(),
            field_type: descriptor.field_type,
            visible: descriptor.is_visible(),
            required: resolved.is_required(key),
            text: state.text(key),
            error: state.error(key).map(str::to_string),
        })
        .collect()
}

/// Required fields whose current value is empty, in field order.
pub fn missing_required(resolved: &ResolvedSchema, state: &FormState) -> Vec<String> {
    resolved
        .keys()
        .filter(|key| resolved.is_required(key) && state.is_empty_at(key))
        .map(str::to_string)
        .collect()
}

/// Submit-time check. Marks every empty required field and fails if any.
pub fn validate_required(resolved: &ResolvedSchema, state: &mut FormState) -> Result<(), FormError> {
    let missing = missing_required(resolved, state);
    for key in resolved.keys() {
        if missing.iter().any(|m| m == key) {
            state.set_error(key, REQUIRED_MESSAGE);
        } else if resolved.is_required(key) {
            state.clear_error(key);
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::Validation { missing })
    }
}

/// On-change check for a single field.
pub fn revalidate_field(resolved: &ResolvedSchema, state: &mut FormState, key: &str) {
    if !resolved.is_required(key) {
        return;
    }
    if state.is_empty_at(key) {
        state.set_error(key, REQUIRED_MESSAGE);
    } else {
        state.clear_error(key);
    }
}
