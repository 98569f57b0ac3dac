use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use jsonform_core::{
    FieldView, FormSideEffect, Layout, Notification, NotificationKind, SchemaForm, SubmitHandler,
};
use serde_json::Value;

/// How long a notification stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Public context wrapper – whoever embeds the panel provides this via
// `use_context_provider`. The panel reads everything it renders from here.
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct FormHost {
    pub form: Signal<SchemaForm>,
    /// External data. Writing a new value re-synchronizes the form.
    pub data: Signal<Option<Value>>,
    pub handler: Arc<dyn SubmitHandler>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct LayoutStyle {
    form: &'static str,
    row: &'static str,
    label: &'static str,
}

fn layout_style(layout: Layout) -> LayoutStyle {
    match layout {
        Layout::Horizontal => LayoutStyle {
            form: "display: flex; flex-direction: column; gap: 16px;",
            row: "display: flex; align-items: flex-start; gap: 12px;",
            label: "width: 30%; text-align: right; padding-top: 6px;",
        },
        Layout::Vertical => LayoutStyle {
            form: "display: flex; flex-direction: column; gap: 16px;",
            row: "display: flex; flex-direction: column; gap: 6px;",
            label: "padding-bottom: 2px;",
        },
        Layout::Inline => LayoutStyle {
            form: "display: flex; flex-wrap: wrap; align-items: flex-start; gap: 16px;",
            row: "display: flex; align-items: flex-start; gap: 8px;",
            label: "padding-top: 6px;",
        },
    }
}

fn toast_colors(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Success => ("#f6ffed", "#52c41a"),
        NotificationKind::Error => ("#fff2f0", "#ff4d4f"),
    }
}

/// Drains the form's side-effect queue into the toast signal. Returns the
/// toast ticket when a notification was shown.
fn process_side_effects(
    form: &mut Signal<SchemaForm>,
    toast: &mut Signal<Option<Notification>>,
    toast_seq: &mut Signal<u64>,
) -> Option<u64> {
    let mut shown = None;
    let effects = form.write().drain_side_effects();
    for effect in effects {
        match effect {
            FormSideEffect::Notify(notification) => {
                let ticket = *toast_seq.peek() + 1;
                toast_seq.set(ticket);
                toast.set(Some(notification));
                shown = Some(ticket);
            }
            FormSideEffect::ValidationFailed { missing } => {
                tracing::debug!(?missing, "required fields are empty");
            }
        }
    }
    shown
}

// ---------------------------------------------------------------------------
// SchemaFormPanel – the rendered form: title, fields, submit button and the
// notification toast.
// ---------------------------------------------------------------------------

#[component]
pub fn SchemaFormPanel() -> Element {
    let host = use_context::<FormHost>();
    let mut form = host.form;
    let data = host.data;

    let mut toast = use_signal(|| None::<Notification>);
    let mut toast_seq = use_signal(|| 0u64);

    // ── Data synchronization ────────────────────────────────────────────
    // Runs after render, and again whenever `data` changes.
    use_effect(move || {
        let next = data.read().clone();
        let mut current = form.write();
        if !current.state().is_mounted() {
            current.mount();
        }
        let outcome = current.set_data(next);
        tracing::debug!(?outcome, "form data changed");
    });

    let handler = host.handler.clone();
    let on_submit = move |_: MouseEvent| {
        let started = form.write().begin_submit();
        let values = match started {
            Ok(values) => values,
            Err(err) => {
                tracing::debug!(%err, "submit not started");
                process_side_effects(&mut form, &mut toast, &mut toast_seq);
                return;
            }
        };

        let handler = handler.clone();
        spawn(async move {
            let outcome = handler.submit(values).await;
            form.write().finish_submit(outcome);

            if let Some(ticket) = process_side_effects(&mut form, &mut toast, &mut toast_seq) {
                tokio::time::sleep(TOAST_DURATION).await;
                if *toast_seq.peek() == ticket {
                    toast.set(None);
                }
            }
        });
    };

    // ── Render ───────────────────────────────────────────────────────────
    let view = form.read().view();
    let style = layout_style(view.layout);
    let toast_view = toast.read().clone().map(|notification| {
        let (background, border) = toast_colors(notification.kind);
        (
            format!("position: fixed; top: 16px; left: 50%; transform: translateX(-50%); padding: 8px 16px; border-radius: 6px; background: {background}; border: 1px solid {border}; box-shadow: 0 6px 16px rgba(0,0,0,.08);"),
            notification.message,
        )
    });

    rsx! {
        div {
            class: "jsonform",
            style: "padding: 16px; background: #fff; box-shadow: 0 0 16px rgba(0,0,0,.03); border: 1px solid #ddd; position: relative; font-family: 'Segoe UI', sans-serif;",

            h1 { style: "margin: 0 0 8px 0; font-size: 22px;", "{view.title}" }
            if let Some(description) = view.description.clone() {
                p { style: "margin: 0 0 16px 0; color: #64748b;", "{description}" }
            }

            div {
                class: "jsonform-body",
                style: "{style.form}",

                for field in view.fields.iter().cloned() {
                    FieldRow {
                        key: "{field.key}",
                        field: field.clone(),
                        layout: view.layout,
                    }
                }

                div {
                    style: "{style.row}",
                    if view.layout == Layout::Horizontal {
                        div { style: "{style.label}" }
                    }
                    button {
                        r#type: "button",
                        style: "padding: 6px 16px; border: none; border-radius: 6px; background: #1677ff; color: white; cursor: pointer; display: flex; align-items: center; gap: 6px;",
                        onclick: on_submit,
                        if view.loading {
                            span {
                                class: "jsonform-spinner",
                                style: "width: 12px; height: 12px; border: 2px solid rgba(255,255,255,.4); border-top-color: white; border-radius: 50%; display: inline-block;",
                            }
                        }
                        "{view.submit_text}"
                    }
                }
            }

            if let Some((toast_style, message)) = toast_view {
                div {
                    class: "jsonform-toast",
                    style: "{toast_style}",
                    "{message}"
                }
            }
        }
    }
}

/// One labeled input, keyed by field key so edits survive re-renders.
#[component]
fn FieldRow(field: FieldView, layout: Layout) -> Element {
    let host = use_context::<FormHost>();
    let mut form = host.form;
    let style = layout_style(layout);

    let key = field.key.clone();
    let visibility = if field.visible { "" } else { "display: none;" };
    let border = if field.error.is_some() { "#ff4d4f" } else { "#cbd5e1" };

    rsx! {
        div {
            class: "jsonform-field",
            style: "{style.row} {visibility}",

            label {
                style: "{style.label}",
                if field.required {
                    span { style: "color: #ff4d4f; margin-right: 4px;", "*" }
                }
                "{field.label}"
            }
            div {
                style: "flex: 1; display: flex; flex-direction: column; gap: 4px;",
                input {
                    r#type: "text",
                    name: "{field.key}",
                    style: "padding: 6px 8px; border: 1px solid {border}; border-radius: 6px;",
                    value: "{field.text}",
                    oninput: move |evt| {
                        form.write().edit(&key, evt.value());
                    }
                }
                if let Some(error) = field.error.clone() {
                    div { style: "color: #ff4d4f; font-size: 13px;", "{error}" }
                }
            }
        }
    }
}
