//! Parsed options, the generic results object the resolver reads from.
//!
//! Filled either from command-line matches or from a resolved tool contract.
//! Values are looked up by option identity; anything the caller did not set
//! falls back to the catalog default.

use std::collections::BTreeMap;

use crate::catalog::{catalog, ValueKind};
use crate::settings::{LogLevel, SettingsError};

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Str(String),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Str(_) => "string",
        }
    }
}

impl From<ValueKind> for OptionValue {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool { default } => OptionValue::Bool(default),
            ValueKind::Int { default } => OptionValue::Int(default),
            ValueKind::Str { default, .. } => OptionValue::Str(default.to_string()),
        }
    }
}

/// Where the invocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSource {
    /// A person typed a command line.
    Interactive,
    /// A pipeline handed over a resolved tool contract with its own
    /// processor allotment.
    ToolContract { num_processors: i32 },
}

/// Options as parsed, before any validation or derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOptions {
    command_line: String,
    positionals: Vec<String>,
    log_level: LogLevel,
    source: InvocationSource,
    values: BTreeMap<&'static str, OptionValue>,
}

impl ParsedOptions {
    /// Interactive options with every value at its default.
    pub fn new(command_line: impl Into<String>, positionals: Vec<String>) -> Self {
        Self {
            command_line: command_line.into(),
            positionals,
            log_level: LogLevel::default(),
            source: InvocationSource::Interactive,
            values: BTreeMap::new(),
        }
    }

    /// Set the value of option `id`.
    pub fn with_value(mut self, id: &'static str, value: OptionValue) -> Self {
        self.values.insert(id, value);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_source(mut self, source: InvocationSource) -> Self {
        self.source = source;
        self
    }

    /// Value of option `id`, or its catalog default when unset.
    pub fn get(&self, id: &str) -> Result<OptionValue, SettingsError> {
        if let Some(value) = self.values.get(id) {
            return Ok(value.clone());
        }
        catalog()
            .find(id)
            .map(|def| OptionValue::from(def.kind))
            .ok_or_else(|| SettingsError::MissingOption { id: id.to_string() })
    }

    pub fn int(&self, id: &str) -> Result<i32, SettingsError> {
        match self.get(id)? {
            OptionValue::Int(n) => Ok(n),
            other => Err(mismatch(id, "integer", &other)),
        }
    }

    pub fn flag(&self, id: &str) -> Result<bool, SettingsError> {
        match self.get(id)? {
            OptionValue::Bool(b) => Ok(b),
            other => Err(mismatch(id, "boolean", &other)),
        }
    }

    pub fn string(&self, id: &str) -> Result<String, SettingsError> {
        match self.get(id)? {
            OptionValue::Str(s) => Ok(s),
            other => Err(mismatch(id, "string", &other)),
        }
    }

    pub fn positional_arguments(&self) -> &[String] {
        &self.positionals
    }

    pub fn input_command_line(&self) -> &str {
        &self.command_line
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn source(&self) -> InvocationSource {
        self.source
    }

    pub fn is_from_rtc(&self) -> bool {
        matches!(self.source, InvocationSource::ToolContract { .. })
    }

    /// Processor allotment from the tool contract, if that is the source.
    pub fn num_processors(&self) -> Option<i32> {
        match self.source {
            InvocationSource::ToolContract { num_processors } => Some(num_processors),
            InvocationSource::Interactive => None,
        }
    }
}

fn mismatch(id: &str, expected: &'static str, actual: &OptionValue) -> SettingsError {
    SettingsError::TypeMismatch {
        id: id.to_string(),
        expected,
        actual: actual.type_name(),
    }
}
