//! Option registry: single source of truth for every option pbmm2_index accepts.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use thiserror::Error;

use crate::catalog::contract::{FileRole, NumProcessors, TaskDescriptor, TASK_ID};

/// Tool identity shown in help and usage output.
pub const TOOL_NAME: &str = "pbmm2_index";

/// One-line description of the tool.
pub const TOOL_DESCRIPTION: &str = "Index reference and store as .mmi file";

/// Stable internal keys of every option in the catalog.
pub mod ids {
    pub const HELP: &str = "help";
    pub const VERSION: &str = "version";
    pub const LOG_FILE: &str = "log_file";
    pub const LOG_LEVEL: &str = "log_level";
    pub const NUM_THREADS: &str = "numthreads";
    pub const ALIGN_MODE: &str = "align_mode";
    pub const KMER_SIZE: &str = "kmer_size";
    pub const MINIMIZER_WINDOW_SIZE: &str = "minimizer_window_size";
    pub const DISABLE_HPC: &str = "disable_hpc";
}

/// Value type of an option, carrying its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Switch, present or absent.
    Bool { default: bool },
    /// Signed integer.
    Int { default: i32 },
    /// Free-form string, or one of `allowed` when that set is non-empty.
    Str {
        default: &'static str,
        allowed: &'static [&'static str],
    },
}

impl ValueKind {
    /// Name of the value type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Bool { .. } => "boolean",
            ValueKind::Int { .. } => "integer",
            ValueKind::Str { .. } => "string",
        }
    }

    /// Closed set of legal values; empty when any value is accepted.
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match *self {
            ValueKind::Str { allowed, .. } => allowed,
            ValueKind::Bool { .. } | ValueKind::Int { .. } => &[],
        }
    }
}

/// A single option definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    /// Internal key (e.g., "numthreads").
    pub id: &'static str,
    /// User-facing spellings. One character is a short flag, anything longer a long flag.
    pub aliases: &'static [&'static str],
    /// Short display name (used by the automation view).
    pub display_name: &'static str,
    /// Human-readable description (for help text).
    pub description: &'static str,
    /// Value type and default.
    pub kind: ValueKind,
}

impl OptionDef {
    /// Check if this definition is spelled `alias` on the command line.
    pub fn matches(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| *a == alias)
    }
}

/// Options shown together under one help heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub title: &'static str,
    pub options: Vec<OptionDef>,
}

/// A required positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalArg {
    /// Name, also used as the placeholder in usage output.
    pub name: &'static str,
    pub description: &'static str,
}

/// Errors found when checking catalog invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Option identity '{id}' is declared more than once")]
    DuplicateId { id: &'static str },

    #[error("Option '{id}' declares no aliases")]
    NoAliases { id: &'static str },

    #[error("Alias '{alias}' is declared by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("Default '{default}' of option '{id}' is not one of its allowed values")]
    DefaultNotAllowed {
        id: &'static str,
        default: &'static str,
    },
}

/// Declarative description of the whole command-line interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCatalog {
    pub name: &'static str,
    pub description: &'static str,
    pub version: String,
    pub groups: Vec<OptionGroup>,
    pub positionals: Vec<PositionalArg>,
}

static CATALOG: LazyLock<OptionCatalog> = LazyLock::new(OptionCatalog::build);

/// The process-wide catalog, built on first use and never mutated.
pub fn catalog() -> &'static OptionCatalog {
    &CATALOG
}

/// Version string with the commit the binary was built from.
pub fn version_string() -> String {
    format!(
        "{} (commit {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("PBMM2_GIT_SHA").unwrap_or("unknown")
    )
}

impl OptionCatalog {
    /// Build the complete option catalog.
    pub fn build() -> Self {
        Self {
            name: TOOL_NAME,
            description: TOOL_DESCRIPTION,
            version: version_string(),
            groups: vec![
                OptionGroup {
                    title: "Basic Options",
                    options: vec![
                        OptionDef {
                            id: ids::HELP,
                            aliases: &["h", "help"],
                            display_name: "Help",
                            description: "Output this help.",
                            kind: ValueKind::Bool { default: false },
                        },
                        OptionDef {
                            id: ids::VERSION,
                            aliases: &["version"],
                            display_name: "Version",
                            description: "Output version information.",
                            kind: ValueKind::Bool { default: false },
                        },
                        OptionDef {
                            id: ids::LOG_FILE,
                            aliases: &["log-file"],
                            display_name: "Log to a File",
                            description: "Log to a file, instead of stdout.",
                            kind: ValueKind::Str {
                                default: "",
                                allowed: &[],
                            },
                        },
                        OptionDef {
                            id: ids::LOG_LEVEL,
                            aliases: &["log-level"],
                            display_name: "Log Level",
                            description: r#"Set log level: "TRACE", "DEBUG", "INFO", "WARN", "FATAL"."#,
                            kind: ValueKind::Str {
                                default: "WARN",
                                allowed: &["TRACE", "DEBUG", "INFO", "WARN", "FATAL"],
                            },
                        },
                        OptionDef {
                            id: ids::NUM_THREADS,
                            aliases: &["j", "num-threads"],
                            display_name: "Number of Threads",
                            description: "Number of threads to use, 0 means autodetection.",
                            kind: ValueKind::Int { default: 0 },
                        },
                    ],
                },
                OptionGroup {
                    title: "Parameter Set Option",
                    options: vec![OptionDef {
                        id: ids::ALIGN_MODE,
                        aliases: &["preset"],
                        display_name: "Alignment mode",
                        description: "Set alignment mode:\n  \
                            - \"SUBREAD\" -k 19 -w 10\n  \
                            - \"CCS\" -k 19 -w 10 -u\n  \
                            - \"ISOSEQ\" -k 15 -w 5 -u\n  \
                            - \"UNROLLED\" -k 15 -w 15",
                        kind: ValueKind::Str {
                            default: "SUBREAD",
                            allowed: &["SUBREAD", "CCS", "ISOSEQ", "UNROLLED"],
                        },
                    }],
                },
                OptionGroup {
                    title: "Parameter Override Options",
                    options: vec![
                        OptionDef {
                            id: ids::KMER_SIZE,
                            aliases: &["k"],
                            display_name: "K-mer Size",
                            description: "k-mer size (no larger than 28).",
                            kind: ValueKind::Int { default: -1 },
                        },
                        OptionDef {
                            id: ids::MINIMIZER_WINDOW_SIZE,
                            aliases: &["w"],
                            display_name: "Minimizer Window Size",
                            description: "Minimizer window size.",
                            kind: ValueKind::Int { default: -1 },
                        },
                        OptionDef {
                            id: ids::DISABLE_HPC,
                            aliases: &["u", "no-kmer-compression"],
                            display_name: "Disable Homopolymer-Compressed seeding",
                            description: "Disable homopolymer-compressed k-mer \
                                (compression is active for SUBREAD & UNROLLED presets).",
                            kind: ValueKind::Bool { default: false },
                        },
                    ],
                },
            ],
            positionals: vec![
                PositionalArg {
                    name: "ref.fa|xml",
                    description: "Reference FASTA, ReferenceSet XML",
                },
                PositionalArg {
                    name: "out.mmi",
                    description: "Output Reference Index",
                },
            ],
        }
    }

    /// All options, in group order.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.groups.iter().flat_map(|group| group.options.iter())
    }

    /// Look up an option by identity.
    pub fn find(&self, id: &str) -> Option<&OptionDef> {
        self.options().find(|def| def.id == id)
    }

    /// Look up an option by one of its command-line spellings.
    pub fn find_alias(&self, alias: &str) -> Option<&OptionDef> {
        self.options().find(|def| def.matches(alias))
    }

    /// Check that identities and aliases are unique and that every
    /// enumerated default is one of its allowed values.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_ids = HashSet::new();
        let mut seen_aliases: HashMap<&'static str, &'static str> = HashMap::new();

        for def in self.options() {
            if !seen_ids.insert(def.id) {
                return Err(CatalogError::DuplicateId { id: def.id });
            }
            if def.aliases.is_empty() {
                return Err(CatalogError::NoAliases { id: def.id });
            }
            for &alias in def.aliases {
                if let Some(first) = seen_aliases.insert(alias, def.id) {
                    return Err(CatalogError::DuplicateAlias {
                        alias,
                        first,
                        second: def.id,
                    });
                }
            }
            if let ValueKind::Str { default, allowed } = def.kind {
                if !allowed.is_empty() && !allowed.contains(&default) {
                    return Err(CatalogError::DefaultNotAllowed {
                        id: def.id,
                        default,
                    });
                }
            }
        }

        Ok(())
    }

    /// Automation view: the same tool described as a pipeline task.
    pub fn task(&self) -> TaskDescriptor {
        TaskDescriptor {
            task_id: TASK_ID,
            name: self.name,
            description: self.description,
            version: self.version.clone(),
            nproc: NumProcessors::Max,
            input_types: vec![FileRole {
                id: "reference_set",
                title: "ReferenceSet",
                description: "ReferenceSet or .fasta file",
                file_type_id: "PacBio.DataSet.ReferenceSet",
                default_name: None,
            }],
            output_types: vec![FileRole {
                id: "reference_index_output",
                title: "Minimap2IndexSet",
                description: "Minimap2IndexSet for output .mmi file",
                file_type_id: "PacBio.DataSet.Minimap2IndexSet",
                default_name: Some("pbmm2_output"),
            }],
        }
    }
}
