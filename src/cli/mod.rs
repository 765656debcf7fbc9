//! Command-line front end.
//!
//! Builds the clap command from the option catalog and turns the matches
//! into [`ParsedOptions`]. Two hidden flags serve automated pipelines:
//! `--emit-tool-contract` prints the task descriptor, and
//! `--resolved-tool-contract <FILE>` reads options from a job file instead
//! of the command line.

pub mod rtc;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;

use crate::catalog::{catalog, ids, OptionDef, ValueKind};
use crate::options::{OptionValue, ParsedOptions};
use crate::settings::{LogLevel, SettingsError};

pub use rtc::{ResolvedTask, ResolvedToolContract, RtcError};

const EMIT_TOOL_CONTRACT: &str = "emit_tool_contract";
const RESOLVED_TOOL_CONTRACT: &str = "resolved_tool_contract";

/// Errors from reading the invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Usage error, or a help/version request.
    #[error(transparent)]
    Clap(#[from] clap::Error),

    #[error(transparent)]
    ToolContract(#[from] RtcError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print the tool contract and stop.
    EmitToolContract,
    /// Resolve these options into settings.
    Resolve(ParsedOptions),
}

/// The clap command described by the catalog.
pub fn command() -> Command {
    let catalog = catalog();

    // The positionals are only optional next to the hidden automation flags,
    // so the usage line shows them as required.
    let usage = catalog
        .positionals
        .iter()
        .fold(format!("{} [OPTIONS]", catalog.name), |usage, positional| {
            format!("{usage} <{}>", positional.name)
        });

    let mut cmd = Command::new(catalog.name)
        .about(catalog.description)
        .version(catalog.version.as_str())
        .override_usage(usage)
        .disable_help_flag(true)
        .disable_version_flag(true);

    for group in &catalog.groups {
        for def in &group.options {
            cmd = cmd.arg(option_arg(def).help_heading(group.title));
        }
    }

    for (index, positional) in catalog.positionals.iter().enumerate() {
        cmd = cmd.arg(
            Arg::new(positional.name)
                .help(positional.description)
                .value_name(positional.name)
                .index(index + 1)
                .required_unless_present_any([EMIT_TOOL_CONTRACT, RESOLVED_TOOL_CONTRACT]),
        );
    }

    cmd.arg(
        Arg::new(EMIT_TOOL_CONTRACT)
            .long("emit-tool-contract")
            .action(ArgAction::SetTrue)
            .hide(true),
    )
    .arg(
        Arg::new(RESOLVED_TOOL_CONTRACT)
            .long("resolved-tool-contract")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .conflicts_with(EMIT_TOOL_CONTRACT)
            .hide(true),
    )
}

fn option_arg(def: &'static OptionDef) -> Arg {
    let mut arg = Arg::new(def.id).help(def.description);

    let mut has_short = false;
    let mut has_long = false;
    for &alias in def.aliases {
        let mut chars = alias.chars();
        arg = match (chars.next(), chars.next()) {
            (Some(c), None) if has_short => arg.short_alias(c),
            (Some(c), None) => {
                has_short = true;
                arg.short(c)
            }
            _ if has_long => arg.alias(alias),
            _ => {
                has_long = true;
                arg.long(alias)
            }
        };
    }

    match def.kind {
        ValueKind::Bool { .. } if def.id == ids::HELP => arg.action(ArgAction::Help),
        ValueKind::Bool { .. } if def.id == ids::VERSION => arg.action(ArgAction::Version),
        ValueKind::Bool { .. } => arg.action(ArgAction::SetTrue),
        ValueKind::Int { default } => arg
            .value_name("INT")
            .value_parser(value_parser!(i32))
            .allow_negative_numbers(true)
            .default_value(default.to_string()),
        ValueKind::Str { default, allowed } => {
            let arg = arg.value_name("STR");
            let arg = if allowed.is_empty() {
                arg
            } else {
                arg.value_parser(PossibleValuesParser::new(allowed.iter().copied()))
            };
            if default.is_empty() {
                arg
            } else {
                arg.default_value(default)
            }
        }
    }
}

/// Parse `argv` (program name first).
///
/// clap errors, including help and version requests, come back as
/// [`CliError::Clap`] for the caller to print and exit on.
pub fn parse_from<I, T>(argv: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let command_line = argv
        .iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");

    let matches = command().try_get_matches_from(argv)?;

    if matches.get_flag(EMIT_TOOL_CONTRACT) {
        return Ok(Invocation::EmitToolContract);
    }

    if let Some(path) = matches.get_one::<PathBuf>(RESOLVED_TOOL_CONTRACT) {
        let options = ResolvedToolContract::load(path)?.into_options(command_line)?;
        return Ok(Invocation::Resolve(options));
    }

    Ok(Invocation::Resolve(from_matches(&matches, command_line)?))
}

fn from_matches(matches: &ArgMatches, command_line: String) -> Result<ParsedOptions, SettingsError> {
    let catalog = catalog();

    let positionals = catalog
        .positionals
        .iter()
        .filter_map(|positional| matches.get_one::<String>(positional.name).cloned())
        .collect();

    let mut options = ParsedOptions::new(command_line, positionals);
    for def in catalog.options() {
        if def.id == ids::HELP || def.id == ids::VERSION {
            continue;
        }
        let value = match def.kind {
            ValueKind::Bool { .. } => Some(OptionValue::Bool(matches.get_flag(def.id))),
            ValueKind::Int { .. } => matches.get_one::<i32>(def.id).copied().map(OptionValue::Int),
            ValueKind::Str { .. } => matches
                .get_one::<String>(def.id)
                .cloned()
                .map(OptionValue::Str),
        };
        if let Some(value) = value {
            options = options.with_value(def.id, value);
        }
    }

    let level: LogLevel = options.string(ids::LOG_LEVEL)?.parse()?;
    Ok(options.with_log_level(level))
}
