use std::path::PathBuf;

use async_trait::async_trait;
use jsonform_core::{SubmitFailure, SubmitHandler};
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Submission handler that appends every submitted record as one JSON line.
#[derive(Debug, Clone)]
pub struct JsonLinesHandler {
    target: OutputTarget,
}

impl JsonLinesHandler {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    pub fn from_path(path: Option<PathBuf>) -> Self {
        Self::new(path.map(OutputTarget::File).unwrap_or(OutputTarget::Stdout))
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }
}

fn write_failure(err: std::io::Error) -> SubmitFailure {
    SubmitFailure::new(err.to_string())
}

#[async_trait]
impl SubmitHandler for JsonLinesHandler {
    async fn submit(&self, values: Map<String, Value>) -> Result<(), SubmitFailure> {
        let mut line = serde_json::to_string(&values).map_err(|e| SubmitFailure::new(e.to_string()))?;
        line.push('\n');

        match &self.target {
            OutputTarget::Stdout => {
                let mut out = tokio::io::stdout();
                out.write_all(line.as_bytes()).await.map_err(write_failure)?;
                out.flush().await.map_err(write_failure)?;
            }
            OutputTarget::File(path) => {
                let mut file = tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await
                    .map_err(write_failure)?;
                file.write_all(line.as_bytes()).await.map_err(write_failure)?;
                file.flush().await.map_err(write_failure)?;
            }
        }
        tracing::info!(fields = values.len(), output = ?self.target, "wrote submission");
        Ok(())
    }
}
