//! Resolved tool contract: the JSON job file an automated pipeline hands to
//! the tool in place of a command line.
//!
//! ```json
//! { "resolved_tool_contract": {
//!     "tool_contract_id": "mapping.tasks.pbmm2_index",
//!     "input_files": ["ref.fasta"], "output_files": ["out.mmi"],
//!     "nproc": 16, "log_level": "INFO",
//!     "options": { "mapping.task_options.kmer_size": 19 } } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{catalog, ids, ValueKind, TASK_ID, TASK_OPTION_NAMESPACE};
use crate::options::{InvocationSource, OptionValue, ParsedOptions};
use crate::settings::LogLevel;

/// Errors that can occur when loading a resolved tool contract.
#[derive(Debug, Error)]
pub enum RtcError {
    #[error("Failed to read resolved tool contract '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse resolved tool contract '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Resolved tool contract is for task '{found}', expected '{expected}'")]
    WrongTask {
        expected: &'static str,
        found: String,
    },

    #[error("Resolved tool contract sets unknown option '{key}'")]
    UnknownOption { key: String },

    #[error("Resolved tool contract option '{id}' has invalid value {value}: {reason}")]
    InvalidValue {
        id: &'static str,
        value: Value,
        reason: String,
    },
}

/// Top-level resolved tool contract document.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedToolContract {
    pub resolved_tool_contract: ResolvedTask,
}

/// The task part of a resolved tool contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedTask {
    pub tool_contract_id: String,
    #[serde(default)]
    pub input_files: Vec<String>,
    #[serde(default)]
    pub output_files: Vec<String>,
    /// Processors the runner allotted to this task.
    pub nproc: i32,
    /// Wins over a `log_level` entry in `options`.
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl ResolvedToolContract {
    /// Read and parse a resolved tool contract file.
    pub fn load(path: &Path) -> Result<Self, RtcError> {
        let content = fs::read_to_string(path).map_err(|e| RtcError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| RtcError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Convert into parsed options.
    ///
    /// Positionals are the input files followed by the output files. Values
    /// are checked against the catalog here, since clap never saw them.
    pub fn into_options(self, command_line: String) -> Result<ParsedOptions, RtcError> {
        let task = self.resolved_tool_contract;
        if task.tool_contract_id != TASK_ID {
            return Err(RtcError::WrongTask {
                expected: TASK_ID,
                found: task.tool_contract_id,
            });
        }

        let positionals = task
            .input_files
            .into_iter()
            .chain(task.output_files)
            .collect();
        let mut options = ParsedOptions::new(command_line, positionals).with_source(
            InvocationSource::ToolContract {
                num_processors: task.nproc,
            },
        );

        for (key, value) in &task.options {
            let (id, value) = option_value(key, value)?;
            options = options.with_value(id, value);
        }

        // Without a top-level level, fall back to the options map, then the
        // catalog default.
        let raw = match task.log_level {
            Some(raw) => raw,
            None => options
                .string(ids::LOG_LEVEL)
                .unwrap_or_else(|_| LogLevel::default().as_str().to_string()),
        };
        let log_level = raw.parse::<LogLevel>().map_err(|e| RtcError::InvalidValue {
            id: ids::LOG_LEVEL,
            value: Value::String(raw.clone()),
            reason: e.to_string(),
        })?;

        Ok(options
            .with_value(ids::LOG_LEVEL, OptionValue::Str(log_level.as_str().to_string()))
            .with_log_level(log_level))
    }
}

fn option_value(key: &str, value: &Value) -> Result<(&'static str, OptionValue), RtcError> {
    let id = key
        .strip_prefix(TASK_OPTION_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(key);
    let def = catalog()
        .find(id)
        .ok_or_else(|| RtcError::UnknownOption {
            key: key.to_string(),
        })?;
    let invalid = |reason: String| RtcError::InvalidValue {
        id: def.id,
        value: value.clone(),
        reason,
    };

    let typed = match def.kind {
        ValueKind::Bool { .. } => value.as_bool().map(OptionValue::Bool),
        ValueKind::Int { .. } => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(OptionValue::Int),
        ValueKind::Str { allowed, .. } => match value.as_str() {
            Some(s) if !allowed.is_empty() && !allowed.contains(&s) => {
                return Err(invalid(format!("expected one of {}", allowed.join(", "))));
            }
            Some(s) => Some(OptionValue::Str(s.to_string())),
            None => None,
        },
    };

    typed
        .map(|typed| (def.id, typed))
        .ok_or_else(|| invalid(format!("expected {}", def.kind.type_name())))
}
