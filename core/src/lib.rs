#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the User Dynamics workspace.
//!
//! This crate defines the data that flows between the pure systems and the
//! adapters. Adapters assemble [`SimulationParameters`], validate them, and
//! hand them to the user flow system, which fills a [`Trajectory`] one
//! [`StepRecord`] at a time. Analytics and rendering only ever read the
//! finished trajectory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical title shown above every dashboard.
pub const DASHBOARD_TITLE: &str = "Maqueta Virtual";

/// Subtitle describing what the dashboard simulates.
pub const DASHBOARD_SUBTITLE: &str = "Dinámica de Usuarios en un Sistema Web";

/// Length of a single simulation step measured in seconds.
pub const STEP_SECONDS: f64 = 1.0;

/// Shortest simulation span accepted, in seconds.
pub const MIN_DURATION_SECS: u32 = 10;

/// Longest simulation span accepted, in seconds.
pub const MAX_DURATION_SECS: u32 = 600;

/// Largest abandonment percentage accepted.
pub const MAX_ABANDONMENT_PERCENT: u8 = 100;

/// Configured inputs of a single simulation run.
///
/// Missing fields fall back to [`SimulationParameters::default`] when the
/// structure is deserialised, so partial parameter files are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParameters {
    /// Users already active when the simulation starts.
    pub initial_users: u32,
    /// Users the server processes per second.
    pub capacity: u32,
    /// Users arriving per second.
    pub arrival_rate: f64,
    /// Percentage of unserved users that leave on every step.
    pub abandonment_percent: u8,
    /// Average response time in seconds. Reported, never simulated.
    pub response_time_secs: u32,
    /// Ceiling on simultaneously active users.
    pub max_connections: u32,
    /// Simulated time span in seconds.
    pub duration_secs: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_users: 20,
            capacity: 10,
            arrival_rate: 5.0,
            abandonment_percent: 10,
            response_time_secs: 5,
            max_connections: 100,
            duration_secs: 120,
        }
    }
}

impl SimulationParameters {
    /// Checks every field against its accepted range.
    ///
    /// The first violation found is reported; fields are checked in
    /// declaration order.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.capacity == 0 {
            return Err(ParameterError::CapacityTooLow);
        }

        if !self.arrival_rate.is_finite() || self.arrival_rate < 0.0 {
            return Err(ParameterError::InvalidArrivalRate(self.arrival_rate));
        }

        if self.abandonment_percent > MAX_ABANDONMENT_PERCENT {
            return Err(ParameterError::AbandonmentOutOfRange(
                self.abandonment_percent,
            ));
        }

        if self.response_time_secs == 0 {
            return Err(ParameterError::ResponseTimeTooLow);
        }

        if self.max_connections == 0 {
            return Err(ParameterError::MaxConnectionsTooLow);
        }

        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&self.duration_secs) {
            return Err(ParameterError::DurationOutOfRange(self.duration_secs));
        }

        Ok(())
    }

    /// Abandonment percentage expressed as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn abandonment_fraction(&self) -> f64 {
        f64::from(self.abandonment_percent) / 100.0
    }

    /// Number of samples a trajectory of these parameters holds.
    ///
    /// The time axis includes both `0` and the configured duration.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        let steps = (f64::from(self.duration_secs) / STEP_SECONDS).floor() as usize;
        steps + 1
    }
}

/// Reasons a parameter set may be rejected before simulating.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ParameterError {
    /// The server must process at least one user per second.
    #[error("capacity must be at least 1 user per second")]
    CapacityTooLow,
    /// Arrival rate was negative or not a finite number.
    #[error("arrival rate must be a finite, non-negative number (got {0})")]
    InvalidArrivalRate(f64),
    /// Abandonment percentage exceeded 100.
    #[error("abandonment percentage must lie within 0..=100 (got {0})")]
    AbandonmentOutOfRange(u8),
    /// Response time must be at least one second.
    #[error("response time must be at least 1 second")]
    ResponseTimeTooLow,
    /// The connection ceiling must admit at least one user.
    #[error("maximum connections must be at least 1")]
    MaxConnectionsTooLow,
    /// Duration fell outside the accepted span.
    #[error("simulation duration must lie within 10..=600 seconds (got {0})")]
    DurationOutOfRange(u32),
}

/// State of the system captured at a single time step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Simulated time of the sample in seconds.
    pub time: f64,
    /// Users occupying the server after the step.
    pub active: f64,
    /// Users served during the step.
    pub processed: f64,
    /// Users that left without being served during the step.
    pub abandoned: f64,
}

/// Equal-length series produced by a simulation run.
///
/// Index `i` of every series describes the same time step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    time: Vec<f64>,
    active: Vec<f64>,
    processed: Vec<f64>,
    abandoned: Vec<f64>,
}

impl Trajectory {
    /// Creates an empty trajectory with room for `samples` records.
    #[must_use]
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            time: Vec::with_capacity(samples),
            active: Vec::with_capacity(samples),
            processed: Vec::with_capacity(samples),
            abandoned: Vec::with_capacity(samples),
        }
    }

    /// Appends a record to every series.
    pub fn push(&mut self, record: StepRecord) {
        self.time.push(record.time);
        self.active.push(record.active);
        self.processed.push(record.processed);
        self.abandoned.push(record.abandoned);
    }

    /// Number of recorded time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Reports whether no step has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time axis in seconds.
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Active users per step.
    #[must_use]
    pub fn active(&self) -> &[f64] {
        &self.active
    }

    /// Processed users per step.
    #[must_use]
    pub fn processed(&self) -> &[f64] {
        &self.processed
    }

    /// Abandoning users per step.
    #[must_use]
    pub fn abandoned(&self) -> &[f64] {
        &self.abandoned
    }

    /// Returns the record stored at `index`, if any.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<StepRecord> {
        Some(StepRecord {
            time: *self.time.get(index)?,
            active: *self.active.get(index)?,
            processed: *self.processed.get(index)?,
            abandoned: *self.abandoned.get(index)?,
        })
    }

    /// Iterator over the records in time order.
    pub fn records(&self) -> impl Iterator<Item = StepRecord> + '_ {
        (0..self.len()).filter_map(move |index| self.record(index))
    }
}

impl Extend<StepRecord> for Trajectory {
    fn extend<I: IntoIterator<Item = StepRecord>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}

impl FromIterator<StepRecord> for Trajectory {
    fn from_iter<I: IntoIterator<Item = StepRecord>>(records: I) -> Self {
        let records = records.into_iter();
        let mut trajectory = Self::with_capacity(records.size_hint().0);
        trajectory.extend(records);
        trajectory
    }
}
