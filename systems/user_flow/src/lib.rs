#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic user flow system that integrates arrivals, service and abandonment.
//!
//! Each step applies an explicit Euler update with a fixed step of
//! [`STEP_SECONDS`]: arrivals are added, up to `capacity` users are served,
//! and a fixed fraction of the unserved remainder leaves. Users above the
//! connection ceiling are reclassified as abandonment.
//!
//! Stored counts are whole users. The active count is truncated toward zero
//! before the ceiling check, and the recorded abandonment is truncated once
//! the overflow has been added to it.

use user_dynamics_core::{
    ParameterError, SimulationParameters, StepRecord, Trajectory, STEP_SECONDS,
};

/// Per-step rates derived from validated parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowRates {
    /// Users arriving during one step.
    pub arrivals: f64,
    /// Users the server can serve during one step.
    pub capacity: f64,
    /// Fraction of unserved users that abandon during one step.
    pub abandonment: f64,
    /// Ceiling on simultaneously active users.
    pub ceiling: f64,
}

impl FlowRates {
    /// Converts configured parameters into per-step quantities.
    #[must_use]
    pub fn from_parameters(parameters: &SimulationParameters) -> Self {
        Self {
            arrivals: parameters.arrival_rate * STEP_SECONDS,
            capacity: f64::from(parameters.capacity) * STEP_SECONDS,
            abandonment: parameters.abandonment_fraction(),
            ceiling: f64::from(parameters.max_connections),
        }
    }
}

/// Result of applying a single update to the previous active count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Active users after the step.
    pub active: f64,
    /// Users served during the step.
    pub processed: f64,
    /// Users that abandoned during the step, including ceiling overflow.
    pub abandoned: f64,
    /// Whether the step ended at the connection ceiling.
    pub saturated: bool,
}

/// Applies one step of the recurrence to `previous` active users.
///
/// `previous` is expected to be a whole number of users, as produced by an
/// earlier step.
#[must_use]
pub fn advance(previous: f64, rates: &FlowRates) -> StepOutcome {
    let served = rates.capacity.min(previous);
    let mut abandoned = rates.abandonment * (previous - served);
    let mut active = (previous + rates.arrivals - served - abandoned).trunc();

    if active > rates.ceiling {
        abandoned += active - rates.ceiling;
        active = rates.ceiling;
    }
    let active = active.max(0.0);

    StepOutcome {
        active,
        processed: served.trunc(),
        abandoned: abandoned.trunc(),
        saturated: active >= rates.ceiling,
    }
}

/// Stepper that yields one [`StepRecord`] per time step, starting at `t = 0`.
#[derive(Clone, Debug)]
pub struct UserFlow {
    rates: FlowRates,
    active: f64,
    initial_overflow: f64,
    next_step: usize,
    samples: usize,
    saturated_steps: usize,
}

impl UserFlow {
    /// Creates a stepper positioned before the initial sample.
    ///
    /// Initial users above the connection ceiling are clamped and reported as
    /// abandonment in the initial sample.
    pub fn new(parameters: &SimulationParameters) -> Result<Self, ParameterError> {
        parameters.validate()?;

        let rates = FlowRates::from_parameters(parameters);
        let initial = f64::from(parameters.initial_users);
        let initial_overflow = (initial - rates.ceiling).max(0.0);
        if initial_overflow > 0.0 {
            log::warn!(
                "initial users ({}) exceed the connection ceiling ({}); clamping",
                parameters.initial_users,
                parameters.max_connections
            );
        }

        Ok(Self {
            rates,
            active: initial.min(rates.ceiling),
            initial_overflow,
            next_step: 0,
            samples: parameters.sample_count(),
            saturated_steps: 0,
        })
    }

    /// Per-step rates driving the stepper.
    #[must_use]
    pub const fn rates(&self) -> &FlowRates {
        &self.rates
    }

    /// Active users after the most recent step.
    #[must_use]
    pub const fn active(&self) -> f64 {
        self.active
    }

    /// Number of steps after the initial sample that ended at the ceiling so far.
    #[must_use]
    pub const fn saturated_steps(&self) -> usize {
        self.saturated_steps
    }

    /// Validates `parameters` and steps a fresh flow until the duration is covered.
    pub fn run(parameters: &SimulationParameters) -> Result<Trajectory, ParameterError> {
        let mut flow = Self::new(parameters)?;
        let mut trajectory = Trajectory::with_capacity(parameters.sample_count());
        while let Some(record) = flow.step() {
            trajectory.push(record);
        }

        log::debug!(
            "simulated {} samples over {}s; ceiling reached on {} steps",
            trajectory.len(),
            parameters.duration_secs,
            flow.saturated_steps()
        );

        Ok(trajectory)
    }

    /// Produces the next record, or `None` once the configured duration is covered.
    pub fn step(&mut self) -> Option<StepRecord> {
        if self.next_step >= self.samples {
            return None;
        }

        let index = self.next_step;
        self.next_step += 1;
        let time = index as f64 * STEP_SECONDS;

        if index == 0 {
            return Some(StepRecord {
                time,
                active: self.active,
                processed: 0.0,
                abandoned: self.initial_overflow,
            });
        }

        let outcome = advance(self.active, &self.rates);
        if outcome.saturated {
            if self.saturated_steps == 0 {
                log::warn!(
                    "connection ceiling of {} reached at t = {time}s; overflow abandons",
                    self.rates.ceiling
                );
            }
            self.saturated_steps += 1;
        }
        self.active = outcome.active;

        log::trace!(
            "t = {time}s active = {:.3} processed = {:.3} abandoned = {:.3}",
            outcome.active,
            outcome.processed,
            outcome.abandoned
        );

        Some(StepRecord {
            time,
            active: outcome.active,
            processed: outcome.processed,
            abandoned: outcome.abandoned,
        })
    }
}

impl Iterator for UserFlow {
    type Item = StepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.saturating_sub(self.next_step);
        (remaining, Some(remaining))
    }
}

/// Validates `parameters` and runs the full simulation.
///
/// Shorthand for [`UserFlow::run`].
pub fn simulate(parameters: &SimulationParameters) -> Result<Trajectory, ParameterError> {
    UserFlow::run(parameters)
}
