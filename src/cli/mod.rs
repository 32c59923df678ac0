//! Command-line parsing for the churn data synthesizer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::data::MAX_SAMPLES;
use crate::logging::LogFormat;
use crate::train::{MAX_EPOCHS, MAX_LAYER_WIDTH, TrainConfig};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "churn-synth", version, about = "Synthetic customer-churn data generator (GAN-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace). Overrides RUST_LOG.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the reference dataset and print its shape.
    Check(DataArgs),
    /// Train a generator on the reference dataset and save it.
    Train(TrainArgs),
    /// Generate synthetic rows with a saved generator.
    Generate(GenerateArgs),
}

#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Reference CSV, or a directory (its first `.csv` is used).
    /// Defaults to $CHURN_SYNTH_DATA or data/master.
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Where to write the trained generator.
    /// Defaults to $CHURN_SYNTH_MODEL or data/saved_models/generator.json.
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    #[arg(long, default_value_t = 100, value_parser = bounded(MAX_EPOCHS))]
    pub epochs: usize,

    #[arg(long, default_value_t = 32, value_parser = bounded(MAX_SAMPLES))]
    pub batch_size: usize,

    /// Width of both generator and discriminator hidden layers.
    #[arg(long, default_value_t = 32, value_parser = bounded(MAX_LAYER_WIDTH))]
    pub hidden_dim: usize,

    #[arg(long, default_value_t = 0.0002)]
    pub learning_rate: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl TrainArgs {
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            epochs: self.epochs,
            batch_size: self.batch_size,
            hidden_dim: self.hidden_dim,
            learning_rate: self.learning_rate,
            seed: self.seed,
            ..TrainConfig::default()
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Trained generator to load.
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Number of rows to generate.
    #[arg(short = 'n', long = "samples", default_value_t = 1000, value_parser = bounded(MAX_SAMPLES))]
    pub num_samples: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Export the generated rows as CSV (`--export` alone writes generated_data.csv).
    #[arg(long, num_args = 0..=1, default_missing_value = crate::io::DEFAULT_EXPORT_NAME)]
    pub export: Option<PathBuf>,
}

/// Counts accepted on the command line: 1..=max.
fn bounded(max: usize) -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=max as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_export_flag_uses_default_file_name() {
        let cli = Cli::parse_from(["churn-synth", "generate", "-n", "20", "--export"]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.num_samples, 20);
                assert_eq!(args.export, Some(PathBuf::from("generated_data.csv")));
                assert_eq!(args.data.data, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn train_flags_feed_config() {
        let cli = Cli::parse_from(["churn-synth", "-vv", "train", "--epochs", "3", "--seed", "9"]);
        assert_eq!(cli.verbose, 2);
        let Command::Train(args) = cli.command else {
            panic!("expected train");
        };
        let config = args.train_config();
        assert_eq!(config.epochs, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.latent_dim, crate::models::LATENT_DIM);
    }

    #[test]
    fn counts_outside_limits_are_usage_errors() {
        for argv in [
            vec!["churn-synth", "generate", "-n", "10001"],
            vec!["churn-synth", "generate", "-n", "0"],
            vec!["churn-synth", "train", "--epochs", "10001"],
            vec!["churn-synth", "train", "--batch-size", "18446744073709551615"],
        ] {
            let err = Cli::try_parse_from(argv.iter().copied()).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{argv:?}");
        }

        let cli = Cli::parse_from(["churn-synth", "generate", "-n", "10000"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.num_samples, MAX_SAMPLES);
    }

    #[test]
    fn log_format_is_global() {
        let cli = Cli::parse_from(["churn-synth", "check", "--log-format", "json", "--data", "x.csv"]);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
