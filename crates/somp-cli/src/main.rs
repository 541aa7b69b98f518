//! `somp` command line: language exam, welder and pipeline runner.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use somp_core::pipeline::{
    run_exam, run_pipeline, run_welder, DataLayout, ExamStep, PipelineConfig, WelderStep,
    DEFAULT_OUTPUTS_DIR, DEFAULT_REPORT_PATH, DEFAULT_SUITES_DIR, DEFAULT_WELDED_PATH,
};
use somp_core::types::{
    DEFAULT_CLARITY_THRESHOLD, DEFAULT_CONTENT_THRESHOLD, DEFAULT_MAX_ERROR_RATE,
};

#[derive(Debug, Parser)]
#[command(name = "somp", version, about = "Evaluate and normalize language model outputs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the language exam against a test suite
    Exam(ExamArgs),

    /// Normalize a raw model output into a universal + specific record
    Weld(WeldArgs),

    /// Run the steps of a pipeline config file
    Run {
        /// Path to a pipeline JSON or YAML file
        #[arg(long)]
        pipeline: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ExamArgs {
    /// Model name under test
    #[arg(long)]
    model: String,

    /// Suite name (looked up in --suites-dir) or path to a suite file
    #[arg(long)]
    test_suite: String,

    /// JSON file mapping case id to model output
    #[arg(long)]
    outputs: Option<PathBuf>,

    /// Minimum paraphrase consistency score per case
    #[arg(long, default_value_t = DEFAULT_CLARITY_THRESHOLD)]
    clarity_threshold: f64,

    /// Minimum content alignment score per case
    #[arg(long, default_value_t = DEFAULT_CONTENT_THRESHOLD)]
    content_threshold: f64,

    /// Maximum allowable error rate for the suite
    #[arg(long, default_value_t = DEFAULT_MAX_ERROR_RATE)]
    max_error_rate: f64,

    /// Where to write the exam report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    output_json: PathBuf,

    #[arg(long, default_value = DEFAULT_SUITES_DIR)]
    suites_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_OUTPUTS_DIR)]
    outputs_dir: PathBuf,
}

impl ExamArgs {
    fn into_step(self) -> (ExamStep, DataLayout) {
        let step = ExamStep {
            model: self.model,
            test_suite: self.test_suite,
            outputs: self.outputs,
            clarity_threshold: self.clarity_threshold,
            content_threshold: self.content_threshold,
            max_error_rate: self.max_error_rate,
            output_json: self.output_json,
        };
        let data = DataLayout {
            suites_dir: self.suites_dir,
            outputs_dir: self.outputs_dir,
        };
        (step, data)
    }
}

#[derive(Debug, Args)]
struct WeldArgs {
    /// Raw text or JSON file to normalize
    #[arg(long)]
    input: PathBuf,

    /// Where to write the normalized record
    #[arg(long, default_value = DEFAULT_WELDED_PATH)]
    output: PathBuf,

    /// Fail if the universal layer is missing or invalid
    #[arg(long)]
    strict: bool,
}

impl From<WeldArgs> for WelderStep {
    fn from(args: WeldArgs) -> Self {
        WelderStep {
            input: args.input,
            output: args.output,
            strict: args.strict,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Exam(args) => {
            let (step, data) = args.into_step();
            run_exam(&step, &data, &mut stdout)
                .with_context(|| format!("exam failed for suite {}", step.test_suite))?;
        }
        Command::Weld(args) => {
            let step = WelderStep::from(args);
            run_welder(&step, &mut stdout)
                .with_context(|| format!("welding {} failed", step.input.display()))?;
        }
        Command::Run { pipeline } => {
            let config = PipelineConfig::from_file(&pipeline)
                .with_context(|| format!("loading pipeline {}", pipeline.display()))?;
            run_pipeline(&config, &mut stdout)
                .with_context(|| format!("pipeline {} failed", pipeline.display()))?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
