use std::path::{Path, PathBuf};

use clap::Parser;
use jsonform_core::{component_descriptor, ConfigResult, FormConfig, SchemaForm};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonform")]
#[command(about = "Render and submit forms described by a JSON schema", long_about = None)]
#[command(version)]
enum Cli {
    /// Open the form in a desktop window
    Run {
        /// Form config file (schema, data and options)
        config: PathBuf,

        /// Append submitted records here as JSON lines (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the resolved form as JSON without opening a window
    Inspect {
        /// Form config file (schema, data and options)
        config: PathBuf,
    },

    /// Print the component's option descriptors as JSON
    Describe,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::parse() {
        Cli::Run { config, output } => jsonform_ui::run(&config, output),
        Cli::Inspect { config } => inspect(&config),
        Cli::Describe => print_json(&component_descriptor()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn inspect(path: &Path) -> ConfigResult<()> {
    let mut form = SchemaForm::from_config(FormConfig::load(path)?);
    let outcome = form.mount();
    tracing::debug!(fields = form.resolved().len(), ?outcome, "inspecting form");
    print_json(&form.view())
}

fn print_json<T: serde::Serialize>(value: &T) -> ConfigResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
