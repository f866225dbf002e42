//! Execution trace handling.
//!
//! The loop reports each iteration and the terminal result to an injected
//! `TraceSink` rather than reaching out to ambient logging state, so runs
//! are observable without real files in tests and transcript persistence is
//! a construction-time choice. Absence of a sink changes observability only,
//! never loop behavior; sink I/O failures are logged and swallowed for the
//! same reason.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core_types::AgentResult;
use crate::errors::AgentError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Value,
}

/// One loop iteration as reported to the sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub iteration: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ToolInvocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

pub trait TraceSink: Send + Sync {
    /// Called after each iteration of the loop.
    fn on_step(&mut self, step: &TraceStep);

    /// Called once when the run terminates.
    fn on_run_complete(&mut self, result: &AgentResult);
}

/// Sink that forwards the transcript to the `log` facade.
pub struct LogTraceSink {
    agent_name: String,
}

impl LogTraceSink {
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
        }
    }
}

impl TraceSink for LogTraceSink {
    fn on_step(&mut self, step: &TraceStep) {
        if let Some(thought) = &step.thought {
            log::info!("[{}] Thought: {}", self.agent_name, thought);
        }
        if let Some(action) = &step.action {
            log::info!(
                "[{}] Action: {} {}",
                self.agent_name,
                action.name,
                action.arguments
            );
        }
        if let Some(observation) = &step.observation {
            log::info!("[{}] Observation: {}", self.agent_name, observation);
        }
    }

    fn on_run_complete(&mut self, result: &AgentResult) {
        if result.success {
            log::info!(
                "[{}] Run succeeded after {} step(s)",
                self.agent_name,
                result.history.len()
            );
        } else {
            log::warn!(
                "[{}] Run failed: {}",
                self.agent_name,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

/// Append-only JSONL transcript, one file per run under a timestamped run id.
pub struct JsonlTraceSink {
    path: PathBuf,
    file: File,
}

impl JsonlTraceSink {
    /// Creates `<base_dir>/<timestamp>_<run_name>.jsonl`, creating the base
    /// directory if needed.
    pub fn create(base_dir: impl AsRef<Path>, run_name: &str) -> Result<Self, AgentError> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let run_id = format!(
            "{}_{}",
            chrono::Local::now().format("%Y%m%d_%H%M%S"),
            run_name
        );
        let path = base_dir.join(format!("{}.jsonl", run_id));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&mut self, record: Value) {
        match serde_json::to_string(&record) {
            Ok(line) => {
                if let Err(e) = writeln!(self.file, "{}", line) {
                    log::warn!("Failed to append trace record to {:?}: {}", self.path, e);
                }
            }
            Err(e) => log::warn!("Failed to serialize trace record: {}", e),
        }
    }
}

impl TraceSink for JsonlTraceSink {
    fn on_step(&mut self, step: &TraceStep) {
        let mut record = serde_json::to_value(step).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut record {
            map.insert(
                "type".to_string(),
                Value::String("step".to_string()),
            );
            map.insert(
                "time".to_string(),
                Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        self.append(record);
    }

    fn on_run_complete(&mut self, result: &AgentResult) {
        self.append(serde_json::json!({
            "type": "result",
            "time": chrono::Utc::now().to_rfc3339(),
            "success": result.success,
            "answer": result.answer,
            "error": result.error,
            "steps": result.history.len(),
        }));
    }
}
