use proptest::prelude::*;
use user_dynamics_core::{ParameterError, SimulationParameters, Trajectory};
use user_dynamics_system_user_flow::{simulate, UserFlow};

fn parameters_strategy() -> impl Strategy<Value = SimulationParameters> {
    (
        0u32..500,
        1u32..50,
        0.0f64..80.0,
        0u8..=100,
        1u32..30,
        1u32..400,
        10u32..=600,
    )
        .prop_map(
            |(
                initial_users,
                capacity,
                arrival_rate,
                abandonment_percent,
                response_time_secs,
                max_connections,
                duration_secs,
            )| SimulationParameters {
                initial_users,
                capacity,
                arrival_rate,
                abandonment_percent,
                response_time_secs,
                max_connections,
                duration_secs,
            },
        )
}

#[test]
fn default_run_matches_hand_computed_prefix() {
    let trajectory = simulate(&SimulationParameters::default()).expect("valid defaults");

    assert_eq!(trajectory.len(), 121);
    assert_eq!(trajectory.time()[0], 0.0);
    assert_eq!(trajectory.time()[120], 120.0);

    // 20 -> 20 + 5 - 10 - 0.1 * 10 = 14
    // 14 -> 14 + 5 - 10 - 0.1 * 4 = 8.6, stored as 8
    // 8 -> 8 + 5 - 8 - 0 = 5
    assert_eq!(&trajectory.active()[..5], &[20.0, 14.0, 8.0, 5.0, 5.0]);
    assert_eq!(&trajectory.processed()[..5], &[0.0, 10.0, 10.0, 8.0, 5.0]);
    assert_eq!(&trajectory.abandoned()[..5], &[0.0, 1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn idle_system_stays_empty() {
    let parameters = SimulationParameters {
        initial_users: 0,
        arrival_rate: 0.0,
        ..SimulationParameters::default()
    };
    let trajectory = simulate(&parameters).expect("valid parameters");

    assert!(trajectory.active().iter().all(|&value| value == 0.0));
    assert!(trajectory.processed().iter().all(|&value| value == 0.0));
    assert!(trajectory.abandoned().iter().all(|&value| value == 0.0));
}

#[test]
fn initial_users_above_ceiling_are_clamped() {
    let parameters = SimulationParameters {
        initial_users: 150,
        max_connections: 100,
        ..SimulationParameters::default()
    };
    let trajectory = simulate(&parameters).expect("valid parameters");

    assert_eq!(trajectory.active()[0], 100.0);
    assert_eq!(trajectory.abandoned()[0], 50.0);
}

#[test]
fn saturating_arrivals_pin_active_users_to_ceiling() {
    let parameters = SimulationParameters {
        initial_users: 0,
        capacity: 1,
        arrival_rate: 30.0,
        abandonment_percent: 0,
        max_connections: 50,
        duration_secs: 10,
        ..SimulationParameters::default()
    };
    let mut flow = UserFlow::new(&parameters).expect("valid parameters");
    let records: Vec<_> = flow.by_ref().collect();

    assert_eq!(records.len(), 11);
    assert_eq!(records[1].active, 30.0);
    assert_eq!(records[2].active, 50.0);
    assert_eq!(records[2].abandoned, 9.0);
    assert!(records[2..].iter().all(|record| record.active == 50.0));
    assert_eq!(flow.saturated_steps(), 9);
}

#[test]
fn stepper_and_simulate_agree() {
    let parameters = SimulationParameters::default();
    let collected: Trajectory = UserFlow::new(&parameters)
        .expect("valid parameters")
        .collect();
    let simulated = simulate(&parameters).expect("valid parameters");
    assert_eq!(collected, simulated);
    assert_eq!(UserFlow::run(&parameters), Ok(simulated));
}

#[test]
fn starting_at_the_ceiling_counts_only_later_steps() {
    let parameters = SimulationParameters {
        initial_users: 5,
        capacity: 10,
        arrival_rate: 5.0,
        abandonment_percent: 0,
        max_connections: 5,
        duration_secs: 10,
        ..SimulationParameters::default()
    };
    let mut flow = UserFlow::new(&parameters).expect("valid parameters");
    let records: Vec<_> = flow.by_ref().collect();

    assert!(records.iter().all(|record| record.active == 5.0));
    assert!(records.iter().all(|record| record.abandoned == 0.0));
    assert_eq!(flow.saturated_steps(), 10);
}

#[test]
fn stepper_is_exhausted_after_duration() {
    let parameters = SimulationParameters {
        duration_secs: 10,
        ..SimulationParameters::default()
    };
    let mut flow = UserFlow::new(&parameters).expect("valid parameters");
    assert_eq!(flow.size_hint(), (11, Some(11)));
    for _ in 0..11 {
        assert!(flow.step().is_some());
    }
    assert!(flow.step().is_none());
    assert_eq!(flow.size_hint(), (0, Some(0)));
}

#[test]
fn invalid_parameters_are_rejected() {
    let parameters = SimulationParameters {
        duration_secs: 5,
        ..SimulationParameters::default()
    };
    assert_eq!(
        simulate(&parameters),
        Err(ParameterError::DurationOutOfRange(5))
    );
}

proptest! {
    #[test]
    fn active_users_stay_within_bounds(parameters in parameters_strategy()) {
        let trajectory = simulate(&parameters).expect("strategy yields valid parameters");
        let ceiling = f64::from(parameters.max_connections);

        prop_assert_eq!(trajectory.len(), parameters.duration_secs as usize + 1);
        for &active in trajectory.active() {
            prop_assert!(active >= 0.0);
            prop_assert!(active <= ceiling);
        }
        for (&processed, &abandoned) in trajectory.processed().iter().zip(trajectory.abandoned()) {
            prop_assert!(processed >= 0.0);
            prop_assert!(abandoned >= 0.0);
        }
    }

    #[test]
    fn processed_never_exceeds_capacity_or_prior_active(parameters in parameters_strategy()) {
        let trajectory = simulate(&parameters).expect("strategy yields valid parameters");
        let capacity = f64::from(parameters.capacity);

        for (index, &processed) in trajectory.processed().iter().enumerate().skip(1) {
            prop_assert!(processed <= capacity);
            prop_assert!(processed <= trajectory.active()[index - 1]);
        }
    }

    #[test]
    fn stored_counts_are_whole_users(parameters in parameters_strategy()) {
        let trajectory = simulate(&parameters).expect("strategy yields valid parameters");
        for series in [trajectory.active(), trajectory.processed(), trajectory.abandoned()] {
            for &value in series {
                prop_assert_eq!(value.fract(), 0.0);
            }
        }
    }

    #[test]
    fn runs_are_deterministic(parameters in parameters_strategy()) {
        let first = simulate(&parameters).expect("strategy yields valid parameters");
        let second = simulate(&parameters).expect("strategy yields valid parameters");
        prop_assert_eq!(first, second);
    }
}
