use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::FormError;
use crate::events::{Notification, SUBMIT_FAILURE_MESSAGE, SUBMIT_SUCCESS_MESSAGE};

/// Rejection from a submission handler. The message, when present, is shown
/// to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or(SUBMIT_FAILURE_MESSAGE))]
pub struct SubmitFailure {
    pub message: Option<String>,
}

impl SubmitFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self::default()
    }
}

impl From<String> for SubmitFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for SubmitFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// External collaborator that receives the submitted record.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: Map<String, Value>) -> Result<(), SubmitFailure>;
}

/// Adapts an async closure into a [`SubmitHandler`].
pub struct FnHandler<F, Fut> {
    f: F,
    _fut: PhantomData<fn() -> Fut>,
}

pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F, Fut>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SubmitFailure>> + Send,
{
    FnHandler {
        f,
        _fut: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> SubmitHandler for FnHandler<F, Fut>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SubmitFailure>> + Send,
{
    async fn submit(&self, values: Map<String, Value>) -> Result<(), SubmitFailure> {
        (self.f)(values).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Owns the busy flag of a form: `Idle -> Submitting -> Idle`.
#[derive(Debug, Clone)]
pub struct SubmissionController {
    phase: SubmitPhase,
    show_loading: bool,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SubmissionController {
    pub fn new(show_loading: bool) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            show_loading,
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn set_show_loading(&mut self, show_loading: bool) {
        self.show_loading = show_loading;
    }

    pub fn loading_visible(&self) -> bool {
        self.show_loading && self.is_busy()
    }

    /// Enters `Submitting`. A submit while one is in flight is ignored.
    pub fn begin(&mut self) -> Result<(), FormError> {
        if self.is_busy() {
            tracing::warn!("submit ignored: a submission is already in flight");
            return Err(FormError::Busy);
        }
        self.phase = SubmitPhase::Submitting;
        Ok(())
    }

    /// Back to `Idle` without a notification, for a submit that never
    /// reached the handler.
    pub fn cancel(&mut self) {
        self.phase = SubmitPhase::Idle;
    }

    /// Returns to `Idle` whatever the outcome and produces the notification
    /// to surface.
    pub fn settle(&mut self, outcome: Result<(), SubmitFailure>) -> Notification {
        self.phase = SubmitPhase::Idle;
        match outcome {
            Ok(()) => {
                tracing::info!("submission succeeded");
                Notification::success(SUBMIT_SUCCESS_MESSAGE)
            }
            Err(failure) => {
                tracing::info!(error = %failure, "submission failed");
                Notification::submit_failed(failure.message.as_deref())
            }
        }
    }
}
