//! Pendulum integration
//!
//! Semi-implicit Euler with quadratic air drag. The step is always the fixed
//! `timestep` from the config, never the real frame duration.

use super::state::PendulumState;
use crate::settings::PendulumParams;

/// Angular acceleration from gravity and drag.
///
/// Drag uses `ω·|ω|` so it always opposes the swing.
#[inline]
pub fn angular_acceleration(theta: f64, omega: f64, params: &PendulumParams) -> f64 {
    let l = params.length;
    let gravity = -(params.gravity / l) * theta.sin();
    let drag = (params.drag_factor() / params.mass) * omega * omega.abs() * l * l;
    gravity - drag
}

/// Advance the pendulum one step of length `h`.
///
/// The angle moves with the old velocity; the velocity update sees the new angle.
pub fn integrate(state: &PendulumState, params: &PendulumParams, h: f64) -> PendulumState {
    let theta = state.theta + h * state.omega;
    let omega = state.omega + h * angular_acceleration(theta, state.omega, params);
    PendulumState { theta, omega }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    fn frictionless() -> PendulumParams {
        PendulumParams {
            drag_coefficient: 0.0,
            ..PendulumParams::default()
        }
    }

    /// Average time between downward zero crossings
    fn measure_period(theta0: f64, params: &PendulumParams, steps: usize) -> f64 {
        let mut state = PendulumState::at_angle(theta0);
        let mut crossings = Vec::new();
        for step in 0..steps {
            let next = integrate(&state, params, SIM_DT);
            if state.theta > 0.0 && next.theta <= 0.0 {
                let frac = state.theta / (state.theta - next.theta);
                crossings.push((step as f64 + frac) * SIM_DT);
            }
            state = next;
        }
        assert!(crossings.len() >= 2, "pendulum never completed a swing");
        (crossings[crossings.len() - 1] - crossings[0]) / (crossings.len() - 1) as f64
    }

    #[test]
    fn test_rest_is_equilibrium() {
        let next = integrate(&PendulumState::default(), &PendulumParams::default(), SIM_DT);
        assert_eq!(next, PendulumState::default());
    }

    #[test]
    fn test_first_step_from_rest() {
        let params = frictionless();
        let next = integrate(&PendulumState::at_angle(0.5), &params, SIM_DT);
        // Angle does not move on the first step, velocity picks up gravity
        assert_eq!(next.theta, 0.5);
        let expected = -SIM_DT * (params.gravity / params.length) * 0.5_f64.sin();
        assert!((next.omega - expected).abs() < 1e-12);
    }

    #[test]
    fn test_drag_opposes_motion() {
        let params = PendulumParams::default();
        let forward = angular_acceleration(0.0, 2.0, &params);
        let backward = angular_acceleration(0.0, -2.0, &params);
        assert!(forward < 0.0);
        assert!(backward > 0.0);
        assert!((forward + backward).abs() < 1e-12);
    }

    #[test]
    fn test_drag_decays_amplitude() {
        let params = PendulumParams::default();
        let mut state = PendulumState::at_angle(1.0);
        let mut peak: f64 = 0.0;
        for step in 0..2000 {
            state = integrate(&state, &params, SIM_DT);
            if step > 1000 {
                peak = peak.max(state.theta.abs());
            }
        }
        assert!(peak < 1.0);
        assert!(state.theta.is_finite() && state.omega.is_finite());
    }

    proptest! {
        #[test]
        fn small_angle_period_matches_harmonic_oscillator(theta0 in 0.01f64..0.2) {
            let params = frictionless();
            let expected = TAU * (params.length / params.gravity).sqrt();
            let period = measure_period(theta0, &params, 800);
            prop_assert!(
                ((period - expected) / expected).abs() < 0.01,
                "period {} vs expected {}", period, expected
            );
        }

        #[test]
        fn negative_start_angle_has_same_period(theta0 in 0.01f64..0.2) {
            let params = frictionless();
            let a = measure_period(theta0, &params, 800);
            let b = measure_period(-theta0, &params, 800);
            prop_assert!((a - b).abs() < 2.0 * SIM_DT);
        }
    }
}
