use serde::{Deserialize, Serialize};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "提交成功";
pub const SUBMIT_FAILURE_MESSAGE: &str = "提交失败";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// Transient message surfaced after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Failure notification; the handler's message follows the fixed prefix
    /// when there is one.
    pub fn submit_failed(detail: Option<&str>) -> Self {
        match detail.filter(|d| !d.is_empty()) {
            Some(detail) => Self::error(format!("{SUBMIT_FAILURE_MESSAGE}：{detail}")),
            None => Self::error(SUBMIT_FAILURE_MESSAGE),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Host-facing effects queued by a form, drained by whatever renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSideEffect {
    Notify(Notification),
    ValidationFailed { missing: Vec<String> },
}
