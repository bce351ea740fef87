//! Bob/block impact response
//!
//! A one-dimensional elastic collision along the swing tangent. The bob only
//! hands energy to a block on its forward swing (ω ≥ 0).

use serde::{Deserialize, Serialize};

use super::state::{Block, PendulumState};
use crate::settings::PendulumParams;

/// What the block remembers about the hit that set it sliding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// Block velocity after the exchange (vCube')
    pub block_velocity: f64,
    /// Bob linear velocity after the exchange (vPend)
    pub pendulum_velocity: f64,
    /// Pendulum angle at the moment of impact
    pub angle: f64,
}

/// Elastic exchange between the bob (mass `m`, linear speed `omega * length`)
/// and a block (mass `mc`, speed `v_block`).
///
/// Returns `(v_block', v_bob')`.
#[inline]
pub fn exchange_momentum(m: f64, mc: f64, omega: f64, length: f64, v_block: f64) -> (f64, f64) {
    let v_bob = omega * length;
    let v_bob_after = (v_bob * (m - mc) + 2.0 * mc * v_block) / (m + mc);
    let v_block_after = (v_block * (mc - m) + 2.0 * m * v_bob) / (mc + m);
    (v_block_after, v_bob_after)
}

/// Apply an impact between the bob and `block`.
///
/// Does nothing and returns `None` while the pendulum swings backwards.
/// Otherwise overwrites ω, pushes the block clear of the bob's swing
/// position, marks it struck and records the hit on it.
pub fn resolve_impact(
    pendulum: &mut PendulumState,
    params: &PendulumParams,
    block: &mut Block,
) -> Option<Impact> {
    if pendulum.omega < 0.0 {
        return None;
    }

    let (block_velocity, pendulum_velocity) = exchange_momentum(
        params.mass,
        block.mass,
        pendulum.omega,
        params.length,
        block.velocity,
    );
    pendulum.omega = pendulum_velocity / params.length;

    // Never pulls a block back toward the pivot
    let swing_front = pendulum.theta * params.length + params.diameter / 2.0;
    if block.position.x - block.side / 2.0 < swing_front {
        block.position.x = block.position.x.max(swing_front);
    }

    let impact = Impact {
        block_velocity,
        pendulum_velocity,
        angle: pendulum.theta,
    };
    block.impact = Some(impact);
    block.velocity = block_velocity;
    // A fresh hit restarts the friction history
    block.hit_history.clear();

    log::debug!(
        "Block {} hit at θ={:.3}: v_block={:.3}, v_bob={:.3}",
        block.index,
        impact.angle,
        block_velocity,
        pendulum_velocity
    );

    Some(impact)
}

/// Feed one frame's bob contact for `block` into the resolver.
///
/// An impact fires only once per uninterrupted contact; the latch opens
/// again as soon as the bob and block separate.
pub fn process_contact(
    pendulum: &mut PendulumState,
    params: &PendulumParams,
    block: &mut Block,
    touching: bool,
) -> Option<Impact> {
    if !touching {
        block.engaged = false;
        return None;
    }
    if block.engaged {
        return None;
    }

    let impact = resolve_impact(pendulum, params, block)?;
    block.engaged = true;
    Some(impact)
}
