use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

use jsonform_core::{ConfigResult, FormConfig, SchemaForm, COMPONENT_NAME};

use crate::form_panel::{FormHost, SchemaFormPanel};
use crate::output::JsonLinesHandler;

// ---------------------------------------------------------------------------
// Thread-local used to pass the loaded config into the named Dioxus App
// component. (Dioxus `launch()` requires a plain fn-pointer, so we can't use
// a closure.)
// ---------------------------------------------------------------------------
struct Launch {
    config: FormConfig,
    output: Option<PathBuf>,
}

thread_local! {
    static LAUNCH: RefCell<Option<Launch>> = const { RefCell::new(None) };
}

/// Open a desktop window showing the form described by `config_path`.
///
/// Submitted records are appended as JSON lines to `output`, or written to
/// stdout when no output file is given.
pub fn run(config_path: &Path, output: Option<PathBuf>) -> ConfigResult<()> {
    let config = FormConfig::load(config_path)?;
    let title = window_title(&config);
    tracing::info!(config = %config_path.display(), %title, "launching form window");

    LAUNCH.with(|cell| *cell.borrow_mut() = Some(Launch { config, output }));

    let desktop = Config::new().with_window(
        WindowBuilder::new()
            .with_title(title)
            .with_resizable(true),
    );

    LaunchBuilder::desktop().with_cfg(desktop).launch(ShellApp);
    Ok(())
}

/// The schema title, or the component name for untitled forms.
pub fn window_title(config: &FormConfig) -> String {
    config
        .schema
        .as_ref()
        .map(|s| s.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(COMPONENT_NAME)
        .to_string()
}

/// Top-level Dioxus component for the standalone window.
#[component]
fn ShellApp() -> Element {
    use_context_provider(|| {
        let Launch { config, output } = LAUNCH
            .with(|cell| cell.borrow_mut().take())
            .unwrap_or_else(|| Launch {
                config: FormConfig::default(),
                output: None,
            });
        let data = config.data.clone();

        FormHost {
            form: Signal::new(SchemaForm::from_config(config)),
            data: Signal::new(data),
            handler: Arc::new(JsonLinesHandler::from_path(output)),
        }
    });

    rsx! {
        div {
            style: "min-height: 100vh; background: #f5f5f5; padding: 24px; box-sizing: border-box;",
            SchemaFormPanel {}
        }
    }
}
