mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::financing::{StructuresArgs, WaterfallArgs};
use commands::scenario::ScenarioArgs;
use commands::InputArgs;

/// Bankability readiness assessment for energy infrastructure projects
#[derive(Parser)]
#[command(
    name = "bankability",
    version,
    about = "Bankability readiness assessment for energy infrastructure projects",
    long_about = "Scores an energy project's readiness for debt financing with decimal \
                  precision. Reads a project parameter snapshot (JSON or YAML) from \
                  --input or stdin and runs the pro forma, credit, scoring, sensitivity, \
                  benchmarking and financing-structure engines."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (JSON or YAML)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log engine activity to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full assessment: score report, benchmarking, sensitivity and project info
    Assess(InputArgs),
    /// Composite bankability score report
    Score(InputArgs),
    /// Pro forma financial summary with annual cash flows
    ProForma(InputArgs),
    /// Credit risk assessment (PD, LGD, expected loss)
    Credit(InputArgs),
    /// Standard one-factor-at-a-time sensitivity tables
    Sensitivity(InputArgs),
    /// Run one what-if scenario with section.field overrides
    Scenario(ScenarioArgs),
    /// Cash-flow waterfall and debt schedule
    Waterfall(WaterfallArgs),
    /// Ranked financing structure recommendations with term sheets
    Structures(StructuresArgs),
    /// Techno-economic benchmarking against industry ranges
    Benchmark(InputArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Version = cli.command {
        println!("bankability {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let config = match input::file::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args, &config),
        Commands::Score(args) => commands::assess::run_score(args, &config),
        Commands::ProForma(args) => commands::financial::run_pro_forma(args),
        Commands::Credit(args) => commands::financial::run_credit(args),
        Commands::Sensitivity(args) => commands::scenario::run_sensitivity(args, &config),
        Commands::Scenario(args) => commands::scenario::run_scenario(args),
        Commands::Waterfall(args) => commands::financing::run_waterfall(args),
        Commands::Structures(args) => commands::financing::run_structures(args, &config),
        Commands::Benchmark(args) => commands::financial::run_benchmark(args),
        Commands::Version => return,
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
