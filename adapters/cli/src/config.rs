use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use user_dynamics_core::SimulationParameters;

use crate::scenario_transfer;

/// Parameter sources accepted on the command line.
///
/// Sources apply in order: built-in defaults, `--config`, `--scenario`, then
/// the individual flags.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct ParameterArgs {
    /// TOML file holding any subset of the simulation parameters.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
    /// Scenario code printed by a previous run.
    #[arg(long, value_name = "CODE")]
    pub(crate) scenario: Option<String>,
    /// Users active when the simulation starts (U₀).
    #[arg(long)]
    pub(crate) initial_users: Option<u32>,
    /// Users the server processes per second (C).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) capacity: Option<u32>,
    /// Users arriving per second (λ).
    #[arg(long)]
    pub(crate) arrival_rate: Option<f64>,
    /// Percentage of unserved users that abandon on every step.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) abandonment_percent: Option<u8>,
    /// Average response time in seconds.
    #[arg(long = "response-time", value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) response_time_secs: Option<u32>,
    /// Maximum simultaneous connections.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) max_connections: Option<u32>,
    /// Simulated time in seconds.
    #[arg(long = "duration", value_parser = clap::value_parser!(u32).range(10..=600))]
    pub(crate) duration_secs: Option<u32>,
}

impl ParameterArgs {
    /// Layers every source and validates the result.
    pub(crate) fn resolve(&self) -> Result<SimulationParameters> {
        let mut parameters = match &self.config {
            Some(path) => load_file(path)?,
            None => SimulationParameters::default(),
        };

        if let Some(code) = &self.scenario {
            parameters = scenario_transfer::decode(code).context("invalid --scenario code")?;
        }

        self.apply_overrides(&mut parameters);
        parameters
            .validate()
            .context("invalid simulation parameters")?;

        log::debug!("resolved parameters: {parameters:?}");
        Ok(parameters)
    }

    fn apply_overrides(&self, parameters: &mut SimulationParameters) {
        if let Some(value) = self.initial_users {
            parameters.initial_users = value;
        }
        if let Some(value) = self.capacity {
            parameters.capacity = value;
        }
        if let Some(value) = self.arrival_rate {
            parameters.arrival_rate = value;
        }
        if let Some(value) = self.abandonment_percent {
            parameters.abandonment_percent = value;
        }
        if let Some(value) = self.response_time_secs {
            parameters.response_time_secs = value;
        }
        if let Some(value) = self.max_connections {
            parameters.max_connections = value;
        }
        if let Some(value) = self.duration_secs {
            parameters.duration_secs = value;
        }
    }
}

/// Reads simulation parameters from a TOML file.
pub(crate) fn load_file(path: &Path) -> Result<SimulationParameters> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameter file at {}", path.display()))?;
    parse_parameters(&contents)
        .with_context(|| format!("failed to parse parameter file at {}", path.display()))
}

fn parse_parameters(contents: &str) -> Result<SimulationParameters> {
    toml::from_str(contents).context("parameter file is not valid TOML")
}
