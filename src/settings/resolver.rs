use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::ids;
use crate::options::{InvocationSource, ParsedOptions};
use crate::settings::error::{IndexParameter, SettingsError};
use crate::settings::threads::{hardware_concurrency, thread_count};
use crate::settings::{AlignmentMode, LogLevel, SeedingParameters};

/// Sentinel for "take the value from the preset".
pub const USE_PRESET: i32 = -1;

/// Validated settings for building one index.
///
/// Built once per process from [`ParsedOptions`] and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    cli: String,
    input_files: Vec<String>,
    num_threads: usize,
    log_file: Option<PathBuf>,
    log_level: LogLevel,
    align_mode: AlignmentMode,
    kmer_size: i32,
    minimizer_window_size: i32,
    disable_hpc: bool,
}

impl IndexSettings {
    /// Resolve against the processor count of this machine.
    pub fn from_options(options: &ParsedOptions) -> Result<Self, SettingsError> {
        Self::resolve(options, hardware_concurrency())
    }

    /// Resolve parsed options into settings.
    ///
    /// Returns an error, and no settings, when `-k` or `-w` is neither `-1`
    /// nor positive, or when the options break the catalog contract.
    pub fn resolve(
        options: &ParsedOptions,
        hardware_concurrency: usize,
    ) -> Result<Self, SettingsError> {
        let log_file = options.string(ids::LOG_FILE)?;
        let log_file = (!log_file.is_empty()).then(|| PathBuf::from(log_file));

        let kmer_size = options.int(ids::KMER_SIZE)?;
        let minimizer_window_size = options.int(ids::MINIMIZER_WINDOW_SIZE)?;
        let disable_hpc = options.flag(ids::DISABLE_HPC)?;

        let requested = match options.source() {
            InvocationSource::ToolContract { num_processors } => num_processors,
            InvocationSource::Interactive => options.int(ids::NUM_THREADS)?,
        };
        let num_threads = thread_count(requested, hardware_concurrency);

        let preset = options.string(ids::ALIGN_MODE)?;
        let align_mode = AlignmentMode::from_preset(&preset)
            .ok_or(SettingsError::UnknownPreset { token: preset })?;

        check_index_parameter(IndexParameter::KmerSize, kmer_size)?;
        check_index_parameter(IndexParameter::MinimizerWindowSize, minimizer_window_size)?;

        debug!(
            requested,
            hardware_concurrency, num_threads, "Resolved thread count"
        );

        Ok(Self {
            cli: options.input_command_line().to_string(),
            input_files: options.positional_arguments().to_vec(),
            num_threads,
            log_file,
            log_level: options.log_level(),
            align_mode,
            kmer_size,
            minimizer_window_size,
            disable_hpc,
        })
    }

    /// The command line exactly as invoked.
    pub fn cli(&self) -> &str {
        &self.cli
    }

    /// Positional arguments, in order: reference, then output index.
    pub fn input_files(&self) -> &[String] {
        &self.input_files
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Log file, or `None` for stdout.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn align_mode(&self) -> AlignmentMode {
        self.align_mode
    }

    /// k-mer size override, [`USE_PRESET`] when unset.
    pub fn kmer_size(&self) -> i32 {
        self.kmer_size
    }

    /// Minimizer window override, [`USE_PRESET`] when unset.
    pub fn minimizer_window_size(&self) -> i32 {
        self.minimizer_window_size
    }

    pub fn disable_hpc(&self) -> bool {
        self.disable_hpc
    }

    /// Preset defaults with the user's overrides applied.
    pub fn seeding(&self) -> SeedingParameters {
        let preset = self.align_mode.preset();
        let pick = |value: i32, default: i32| if value == USE_PRESET { default } else { value };
        SeedingParameters {
            kmer_size: pick(self.kmer_size, preset.kmer_size),
            minimizer_window_size: pick(self.minimizer_window_size, preset.minimizer_window_size),
            homopolymer_compressed: preset.homopolymer_compressed && !self.disable_hpc,
        }
    }
}

fn check_index_parameter(parameter: IndexParameter, value: i32) -> Result<(), SettingsError> {
    if value == USE_PRESET || value > 0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositiveIndexParameter { parameter, value })
    }
}
