//! Console display and JSON file persistence.

use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::output::path::account_dir_name;
use crate::output::{DocumentScope, DocumentSink, OutputError, OutputResult};
use crate::Document;

/// Sink that pretty-prints every document to stdout and, when an output
/// directory is configured, persists it as a timestamped JSON file under a
/// per-account directory.
pub struct JsonSink {
    output_dir: Option<PathBuf>,
}

impl JsonSink {
    /// Create a sink. `output_dir = None` disables persistence entirely.
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    /// Directory a document in the given scope is persisted to.
    fn scope_dir(&self, scope: DocumentScope<'_>) -> Option<PathBuf> {
        let root = self.output_dir.as_ref()?;
        Some(match scope {
            DocumentScope::Run => root.clone(),
            DocumentScope::Account(account) => root.join(account_dir_name(account)),
        })
    }
}

impl DocumentSink for JsonSink {
    fn emit(&self, scope: DocumentScope<'_>, document: &Document) -> OutputResult<()> {
        // A body that is not valid JSON is still a successfully fetched
        // document: print it raw and move on.
        let formatted = match serde_json::from_slice::<Value>(&document.body) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .map_err(|e| OutputError::SerializationError(e.to_string()))?,
            Err(_) => {
                warn!("invalid JSON from {}", document.name);
                println!(
                    "\n=== {} (RAW) ===\n{}\n",
                    document.name,
                    String::from_utf8_lossy(&document.body)
                );
                return Ok(());
            }
        };

        println!("\n=== {} ===\n{}\n", document.name, formatted);

        if let Some(dir) = self.scope_dir(scope) {
            fs::create_dir_all(&dir).map_err(|e| {
                OutputError::IoError(format!("creating directory {}: {e}", dir.display()))
            })?;

            let path = dir.join(format!("{}_{}.json", document.name, Utc::now().timestamp()));
            fs::write(&path, &formatted).map_err(|e| {
                OutputError::IoError(format!("writing file {}: {e}", path.display()))
            })?;
            info!("saved to: {}", path.display());
        }

        Ok(())
    }
}
