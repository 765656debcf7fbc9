//! Option catalog for pbmm2_index.
//!
//! A static, declarative description of the command-line interface:
//!
//! ```text
//! OptionCatalog → clap::Command (help, parsing)
//!               → TaskDescriptor (automation view)
//! ```
//!
//! Nothing here has side effects; the catalog is built once and read everywhere.

mod contract;
mod registry;

pub use contract::{FileRole, NumProcessors, TaskDescriptor, TASK_ID, TASK_OPTION_NAMESPACE};
pub use registry::{
    catalog, ids, version_string, CatalogError, OptionCatalog, OptionDef, OptionGroup,
    PositionalArg, ValueKind, TOOL_DESCRIPTION, TOOL_NAME,
};
