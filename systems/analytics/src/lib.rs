#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that condenses a trajectory into summary metrics.

pub mod metrics;

use serde::Serialize;
use user_dynamics_core::{SimulationParameters, Trajectory};

pub use metrics::{format_decimal, format_users, Metric};

/// Headline figures shown at the top of the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    /// Users active when the simulation started.
    pub initial_users: u32,
    /// Users arriving per second.
    pub arrival_rate: f64,
    /// Abandonment probability expressed as a percentage.
    pub abandonment_percent: f64,
}

/// Aggregates accumulated over the whole run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunTotals {
    /// Sum of users served across every step.
    pub processed: f64,
    /// Sum of users that abandoned across every step.
    pub abandoned: f64,
    /// Largest active count observed.
    pub peak_active: f64,
    /// Time in seconds at which the peak was first observed.
    pub peak_time: f64,
    /// Active users at the end of the run.
    pub final_active: f64,
    /// Steps after the initial sample that ended at the connection ceiling.
    /// Each step lasts one second.
    pub steps_at_ceiling: usize,
}

/// Complete summary published for a single run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Figures echoed from the configured parameters.
    pub headline: HeadlineMetrics,
    /// Figures derived from the trajectory.
    pub totals: RunTotals,
    /// Configured average response time, reported for reference.
    pub response_time_secs: u32,
    /// Configured connection ceiling.
    pub max_connections: u32,
}

impl SummaryReport {
    /// The three metrics the dashboard highlights.
    #[must_use]
    pub fn headline_metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new(
                "Usuarios Iniciales",
                self.headline.initial_users.to_string(),
            ),
            Metric::new(
                "Tasa de Llegada",
                format!("{} usuarios/seg", format_decimal(self.headline.arrival_rate)),
            ),
            Metric::new(
                "Probabilidad de Abandono",
                format!("{}%", format_decimal(self.headline.abandonment_percent)),
            ),
        ]
    }

    /// Secondary metrics describing how the run unfolded.
    #[must_use]
    pub fn run_metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new(
                "Usuarios Procesados",
                format_users(self.totals.processed),
            ),
            Metric::new(
                "Usuarios que Abandonan",
                format_users(self.totals.abandoned),
            ),
            Metric::new(
                "Pico de Usuarios Activos",
                format!(
                    "{} (t = {} s)",
                    format_users(self.totals.peak_active),
                    format_users(self.totals.peak_time)
                ),
            ),
            Metric::new(
                "Usuarios Activos al Final",
                format_users(self.totals.final_active),
            ),
            Metric::new(
                "Segundos en Saturación",
                format!(
                    "{} s (límite {})",
                    self.totals.steps_at_ceiling, self.max_connections
                ),
            ),
            Metric::new(
                "Tiempo de Respuesta Promedio",
                format!("{} s", self.response_time_secs),
            ),
        ]
    }
}

/// Pure analytics system deriving summaries from finished runs.
#[derive(Debug, Default)]
pub struct Analytics;

impl Analytics {
    /// Creates a new analytics system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Condenses `trajectory`, produced from `parameters`, into a summary.
    #[must_use]
    pub fn summarize(
        &self,
        parameters: &SimulationParameters,
        trajectory: &Trajectory,
    ) -> SummaryReport {
        let ceiling = f64::from(parameters.max_connections);
        let mut totals = RunTotals {
            processed: 0.0,
            abandoned: 0.0,
            peak_active: 0.0,
            peak_time: 0.0,
            final_active: 0.0,
            steps_at_ceiling: 0,
        };

        for record in trajectory.records() {
            totals.processed += record.processed;
            totals.abandoned += record.abandoned;
            if record.active > totals.peak_active {
                totals.peak_active = record.active;
                totals.peak_time = record.time;
            }
            if record.time > 0.0 && record.active >= ceiling {
                totals.steps_at_ceiling += 1;
            }
            totals.final_active = record.active;
        }

        SummaryReport {
            headline: HeadlineMetrics {
                initial_users: parameters.initial_users,
                arrival_rate: parameters.arrival_rate,
                abandonment_percent: f64::from(parameters.abandonment_percent),
            },
            totals,
            response_time_secs: parameters.response_time_secs,
            max_connections: parameters.max_connections,
        }
    }
}
