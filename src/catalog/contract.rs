//! Tool contract: the tool described as a pipeline task, so an automated
//! runner can invoke it without a hand-written command line.

use serde::{Serialize, Serializer};
use serde_json::json;

/// Task identity in the pipeline's namespace.
pub const TASK_ID: &str = "mapping.tasks.pbmm2_index";

/// Prefix of fully-qualified option ids in resolved tool contracts.
pub const TASK_OPTION_NAMESPACE: &str = "mapping.task_options";

/// Processor allotment the task may be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumProcessors {
    /// A fixed number of processors.
    Fixed(u32),
    /// Whatever the runner can spare.
    Max,
}

impl Serialize for NumProcessors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumProcessors::Fixed(n) => serializer.serialize_u32(*n),
            NumProcessors::Max => serializer.serialize_str("$max_nproc"),
        }
    }
}

/// A typed input or output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRole {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub file_type_id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_name: Option<&'static str>,
}

/// The automation view of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDescriptor {
    #[serde(rename = "tool_contract_id")]
    pub task_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub version: String,
    pub nproc: NumProcessors,
    pub input_types: Vec<FileRole>,
    pub output_types: Vec<FileRole>,
}

impl TaskDescriptor {
    /// Render the full tool contract document a pipeline registers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let document = json!({
            "version": self.version,
            "tool_contract_id": self.task_id,
            "driver": {
                "exe": format!("{} --resolved-tool-contract ", self.name),
            },
            "tool_contract": self,
        });
        serde_json::to_string_pretty(&document)
    }
}
