//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - resolves data/model paths from flags, environment and defaults
//! - dispatches to the pipeline
//! - prints summaries and writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, DataArgs, GenerateArgs, TrainArgs};
use crate::config::Settings;
use crate::error::AppError;
use crate::logging::{LogConfig, init_logging};

pub mod pipeline;

/// Entry point for the `churn-synth` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format));

    let settings = Settings::from_env();
    match cli.command {
        Command::Check(args) => handle_check(args, settings),
        Command::Train(args) => handle_train(args, settings),
        Command::Generate(args) => handle_generate(args, settings),
    }
}

fn handle_check(args: DataArgs, settings: Settings) -> Result<(), AppError> {
    let settings = settings.with_overrides(args.data, None);
    let data = crate::cli::picker::resolve_data_path(&settings.data)?;
    let check = pipeline::run_check(&data)?;

    print!(
        "{}",
        crate::report::format_check_summary(&check.path, &check.schema, check.rows)
    );
    Ok(())
}

fn handle_train(args: TrainArgs, settings: Settings) -> Result<(), AppError> {
    let config = args.train_config();
    let settings = settings.with_overrides(args.data.data, args.model);
    let data = crate::cli::picker::resolve_data_path(&settings.data)?;

    let run = pipeline::run_train(&data, &config)?;
    crate::io::write_artifact(&settings.model, &run.artifact)?;

    print!(
        "{}",
        crate::report::format_train_summary(&run.outcome, run.rows, &settings.model)
    );
    Ok(())
}

fn handle_generate(args: GenerateArgs, settings: Settings) -> Result<(), AppError> {
    let settings = settings.with_overrides(args.data.data, args.model);
    let data = crate::cli::picker::resolve_data_path(&settings.data)?;
    let artifact = crate::io::read_artifact(&settings.model)?;

    let session = pipeline::run_generate(&data, &artifact, args.num_samples, args.seed)?;
    let dataset = session
        .last_generated()
        .ok_or(crate::error::PipelineError::EmptyResult)?;

    print!(
        "{}",
        crate::report::format_generate_summary(dataset.table.len(), artifact.accuracy)
    );
    print!("{}", crate::report::format_preview(&dataset.preview));

    if let Some(path) = &args.export {
        crate::io::write_csv_file(path, &dataset.table)?;
        println!("Exported: {}", path.display());
    }
    Ok(())
}
