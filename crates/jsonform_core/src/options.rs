use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::schema::Schema;

pub const COMPONENT_NAME: &str = "JSONSchemaForm";
pub const DEFAULT_SUBMIT_TEXT: &str = "提交";

/// Visual arrangement of labels and inputs. No behavioral effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
    Inline,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
            Layout::Inline => "inline",
        }
    }

    pub fn all() -> [Layout; 3] {
        [Layout::Horizontal, Layout::Vertical, Layout::Inline]
    }
}

/// How incoming data is folded into the live form state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergePolicy {
    /// Keys present in the data are overwritten; the rest keep their values.
    #[default]
    OverwritePresent,
    /// The state is reset before the data is applied.
    OverwriteAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOptions {
    pub show_loading: bool,
    pub layout: Layout,
    pub submit_text: String,
    pub merge_policy: MergePolicy,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            show_loading: true,
            layout: Layout::Horizontal,
            submit_text: DEFAULT_SUBMIT_TEXT.to_string(),
            merge_policy: MergePolicy::OverwritePresent,
        }
    }
}

impl FormOptions {
    pub fn with_show_loading(mut self, show_loading: bool) -> Self {
        self.show_loading = show_loading;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = text.into();
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

/// Editor widget a page builder uses for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Json,
    Text,
    Switch,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    pub key: String,
    pub title: String,
    pub kind: OptionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub default: Value,
}

impl OptionDescriptor {
    fn new(key: &str, title: &str, kind: OptionKind, default: Value) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            kind,
            choices: Vec::new(),
            default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    pub options: Vec<OptionDescriptor>,
}

impl ComponentDescriptor {
    pub fn option(&self, key: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.key == key)
    }
}

/// Describes the component's configuration surface for page builders.
pub fn component_descriptor() -> ComponentDescriptor {
    let defaults = FormOptions::default();
    let schema_default =
        serde_json::to_value(Schema::registration_default()).unwrap_or(Value::Null);

    let mut layout = OptionDescriptor::new(
        "layout",
        "文本对齐",
        OptionKind::Select,
        json!(defaults.layout.as_str()),
    );
    layout.choices = Layout::all().iter().map(|l| l.as_str().to_string()).collect();

    ComponentDescriptor {
        name: COMPONENT_NAME.to_string(),
        options: vec![
            OptionDescriptor::new("schema", "Schema", OptionKind::Json, schema_default),
            OptionDescriptor::new("data", "数据", OptionKind::Text, json!("")),
            OptionDescriptor::new("onSubmit", "提交事件", OptionKind::Text, json!("")),
            OptionDescriptor::new(
                "submitText",
                "提交文字",
                OptionKind::Text,
                json!(defaults.submit_text),
            ),
            OptionDescriptor::new(
                "showLoading",
                "提交时加载",
                OptionKind::Switch,
                json!(defaults.show_loading),
            ),
            layout,
        ],
    }
}
