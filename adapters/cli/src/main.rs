#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the user dynamics dashboard and the report demo.

mod config;
mod dashboard;
mod export;
mod scenario_transfer;

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use env_logger::{Builder, Env};
use user_dynamics_rendering::{RenderingBackend, TextBackend};
use user_dynamics_system_analytics::Analytics;
use user_dynamics_system_reporting::ReportFacade;
use user_dynamics_system_user_flow::simulate;

use crate::{config::ParameterArgs, dashboard::ChartOptions};

/// Simulates user arrivals and departures on a web server.
#[derive(Debug, Parser)]
#[command(name = "user-dynamics", version, about)]
struct Cli {
    /// Raises log verbosity; repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Runs the simulation and prints the dashboard.
    Simulate(SimulateArgs),
    /// Generates reports through the facade, one per `--kind`.
    Patterns(PatternArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[command(flatten)]
    parameters: ParameterArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Plot width in characters.
    #[arg(long, default_value_t = 72, value_parser = clap::value_parser!(u16).range(20..=1000))]
    width: u16,
    /// Plot height in characters.
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u16).range(5..=200))]
    height: u16,
    /// Hides the background grid.
    #[arg(long)]
    no_grid: bool,
    /// Appends an explanation of the model.
    #[arg(long)]
    explain: bool,
    /// When to color the dashboard.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct PatternArgs {
    /// Report type to generate; may be repeated.
    #[arg(
        long = "kind",
        value_name = "TYPE",
        default_values_t = [String::from("PDF"), String::from("HTML")]
    )]
    kinds: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Entry point for the User Dynamics command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.mode {
        Mode::Simulate(args) => run_simulation(&args),
        Mode::Patterns(args) => run_patterns(&args),
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn run_simulation(args: &SimulateArgs) -> Result<()> {
    let parameters = args.parameters.resolve()?;
    let trajectory = simulate(&parameters).context("simulation rejected its parameters")?;
    let summary = Analytics::new().summarize(&parameters, &trajectory);
    log::info!(
        "run finished: {} samples, final active users {:.2}",
        trajectory.len(),
        summary.totals.final_active
    );

    let stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            let options = ChartOptions {
                width: usize::from(args.width),
                height: usize::from(args.height),
                grid: !args.no_grid,
                explain: args.explain,
            };
            let dashboard = dashboard::build(&parameters, &trajectory, &summary, options)?;
            TextBackend::new(stdout, args.color.enabled()).present(&dashboard)
        }
        OutputFormat::Csv => export::write_csv(&trajectory, stdout),
        OutputFormat::Json => export::write_json(&parameters, &summary, &trajectory, stdout),
    }
}

fn run_patterns(args: &PatternArgs) -> Result<()> {
    let facade = ReportFacade::new();
    let mut stdout = io::stdout().lock();
    for kind in &args.kinds {
        let transcript = facade.generate_report(kind);
        writeln!(stdout, "{}", transcript.connection).context("failed to write output")?;
        stdout.flush().context("failed to write output")?;
        let report = transcript
            .report
            .with_context(|| format!("failed to generate report of type `{kind}`"))?;
        writeln!(stdout, "{report}").context("failed to write output")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn patterns_default_to_pdf_then_html() {
        let cli = Cli::try_parse_from(["user-dynamics", "patterns"]).expect("valid arguments");
        match cli.mode {
            Mode::Patterns(args) => assert_eq!(args.kinds, vec!["PDF", "HTML"]),
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_flags_are_rejected_by_the_parser() {
        for arguments in [
            ["user-dynamics", "simulate", "--duration", "5"],
            ["user-dynamics", "simulate", "--capacity", "0"],
            ["user-dynamics", "simulate", "--abandonment-percent", "101"],
            ["user-dynamics", "simulate", "--width", "18446744073709551615"],
            ["user-dynamics", "simulate", "--width", "1001"],
            ["user-dynamics", "simulate", "--height", "201"],
            ["user-dynamics", "simulate", "--height", "4"],
        ] {
            assert!(Cli::try_parse_from(arguments).is_err(), "{arguments:?}");
        }
    }
}
