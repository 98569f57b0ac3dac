use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConfigResult;
use crate::options::FormOptions;
use crate::schema::Schema;

/// Everything needed to stand up a form from a JSON file.
///
/// ```json
/// {
///   "schema": { "title": "Sign up", "required": ["email"],
///               "properties": { "email": { "title": "Email" } } },
///   "data": { "email": "" },
///   "showLoading": true,
///   "layout": "vertical",
///   "submitText": "Send"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub options: FormOptions,
}

impl FormConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded form config");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
