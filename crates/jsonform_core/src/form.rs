use std::collections::VecDeque;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::FormConfig;
use crate::errors::FormError;
use crate::events::{FormSideEffect, Notification};
use crate::field::{render_fields, revalidate_field, validate_required, FieldView};
use crate::options::{FormOptions, Layout};
use crate::resolver::{ResolvedSchema, SchemaResolver};
use crate::schema::Schema;
use crate::state::{FormData, FormState};
use crate::submit::{SubmissionController, SubmitFailure, SubmitHandler};
use crate::sync::{DataSynchronizer, SyncOutcome};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub layout: Layout,
    pub fields: Vec<FieldView>,
    pub submit_text: String,
    pub loading: bool,
}

/// A schema-driven form: resolves fields, owns their live values, keeps them
/// in step with external data and drives submissions.
#[derive(Debug)]
pub struct SchemaForm {
    schema: Schema,
    data: Option<Value>,
    options: FormOptions,
    resolver: SchemaResolver,
    resolved: ResolvedSchema,
    state: FormState,
    synchronizer: DataSynchronizer,
    controller: SubmissionController,
    side_effects: VecDeque<FormSideEffect>,
}

impl SchemaForm {
    /// Builds an unmounted form. An absent schema behaves like a schema
    /// without `properties`: fields come from `data`.
    pub fn new(schema: Option<Schema>, data: Option<Value>, options: FormOptions) -> Self {
        let schema = schema.unwrap_or_default();
        let mut resolver = SchemaResolver::new();
        let resolved = resolver.resolve(&schema, &FormData::from_value(data.as_ref()));

        Self {
            schema,
            data,
            synchronizer: DataSynchronizer::new(options.merge_policy),
            controller: SubmissionController::new(options.show_loading),
            options,
            resolver,
            resolved,
            state: FormState::new(),
            side_effects: VecDeque::new(),
        }
    }

    pub fn from_config(config: FormConfig) -> Self {
        Self::new(config.schema, config.data, config.options)
    }

    /// Attaches the form state to its rendering surface and applies the
    /// current data.
    pub fn mount(&mut self) -> SyncOutcome {
        self.state.mount();
        self.synchronizer.sync(self.data.as_ref(), &mut self.state)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn resolved(&self) -> &ResolvedSchema {
        &self.resolved
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    /// Swaps the schema. The replaced schema's synthesized fields are
    /// dropped from the memo.
    pub fn set_schema(&mut self, schema: Option<Schema>) {
        let previous = self.schema.id();
        self.schema = schema.unwrap_or_default();
        if self.schema.id() != previous {
            self.resolver.forget(previous);
        }
        self.resolve();
    }

    pub fn set_options(&mut self, options: FormOptions) {
        self.synchronizer.set_policy(options.merge_policy);
        self.controller.set_show_loading(options.show_loading);
        self.options = options;
    }

    /// Replaces the external data and pushes it into the form state.
    pub fn set_data(&mut self, data: Option<Value>) -> SyncOutcome {
        self.data = data;
        self.resolve();
        self.synchronizer.sync(self.data.as_ref(), &mut self.state)
    }

    fn resolve(&mut self) {
        let data = FormData::from_value(self.data.as_ref());
        self.resolved = self.resolver.resolve(&self.schema, &data);
    }

    /// Applies user input to a rendered field. Unknown keys are ignored.
    pub fn edit(&mut self, key: &str, text: impl Into<String>) -> bool {
        if self.resolved.field(key).is_none() {
            tracing::debug!(key, "edit ignored: no such field");
            return false;
        }
        self.state.set_text(key, text);
        revalidate_field(&self.resolved, &mut self.state, key);
        true
    }

    pub fn fields(&self) -> Vec<FieldView> {
        render_fields(&self.resolved, &self.state)
    }

    pub fn view(&self) -> FormView {
        FormView {
            title: self.resolved.title.clone(),
            description: self.resolved.description.clone(),
            layout: self.options.layout,
            fields: self.fields(),
            submit_text: self.options.submit_text.clone(),
            loading: self.controller.loading_visible(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn loading_visible(&self) -> bool {
        self.controller.loading_visible()
    }

    /// Every field's current value, hidden ones included.
    pub fn values(&self) -> Map<String, Value> {
        self.state.snapshot(self.resolved.keys())
    }

    /// First half of a submission: busy flag, required-field check, snapshot.
    /// The host awaits the handler and then calls [`finish_submit`].
    ///
    /// [`finish_submit`]: SchemaForm::finish_submit
    pub fn begin_submit(&mut self) -> Result<Map<String, Value>, FormError> {
        self.controller.begin()?;
        if let Err(err) = validate_required(&self.resolved, &mut self.state) {
            self.controller.cancel();
            if let FormError::Validation { missing } = &err {
                tracing::debug!(?missing, "submit aborted: required fields are empty");
                self.side_effects.push_back(FormSideEffect::ValidationFailed {
                    missing: missing.clone(),
                });
            }
            return Err(err);
        }
        Ok(self.values())
    }

    pub fn finish_submit(&mut self, outcome: Result<(), SubmitFailure>) -> Notification {
        let notification = self.controller.settle(outcome);
        self.side_effects
            .push_back(FormSideEffect::Notify(notification.clone()));
        notification
    }

    /// Full submission against `handler`, for hosts that can hold the form
    /// across the await.
    pub async fn submit<H>(&mut self, handler: &H) -> Result<Notification, FormError>
    where
        H: SubmitHandler + ?Sized,
    {
        let values = self.begin_submit()?;
        let outcome = handler.submit(values).await;
        Ok(self.finish_submit(outcome))
    }

    pub fn pop_side_effect(&mut self) -> Option<FormSideEffect> {
        self.side_effects.pop_front()
    }

    pub fn drain_side_effects(&mut self) -> Vec<FormSideEffect> {
        self.side_effects.drain(..).collect()
    }
}
