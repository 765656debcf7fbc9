use std::process::ExitCode;

use tracing::{error, info};

use pbmm2_index::catalog::catalog;
use pbmm2_index::cli::{self, CliError, Invocation};
use pbmm2_index::logging::init_logging;
use pbmm2_index::settings::IndexSettings;

fn main() -> ExitCode {
    let options = match cli::parse_from(std::env::args_os()) {
        Ok(Invocation::Resolve(options)) => options,
        Ok(Invocation::EmitToolContract) => return emit_tool_contract(),
        Err(CliError::Clap(err)) => err.exit(),
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&options) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    let settings = match IndexSettings::from_options(&options) {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let seeding = settings.seeding();
    info!(
        cli = settings.cli(),
        inputs = ?settings.input_files(),
        threads = settings.num_threads(),
        mode = %settings.align_mode(),
        k = seeding.kmer_size,
        w = seeding.minimizer_window_size,
        hpc = seeding.homopolymer_compressed,
        "Resolved index settings"
    );

    ExitCode::SUCCESS
}

fn emit_tool_contract() -> ExitCode {
    match catalog().task().to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: failed to render tool contract: {err}");
            ExitCode::FAILURE
        }
    }
}
