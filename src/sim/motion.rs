//! Block motion: falling and sliding after a hit
//!
//! Two independent per-block state machines run every frame. A block can be
//! falling and struck at the same time.
//!
//! Falling adds a fixed `sqrt(2g)/fps` to the block's fall accumulator each
//! frame and drops it by the accumulated amount. The accumulator survives
//! landing unless `reset_fall_on_landing` is set, so a block raised again
//! without a reset starts its second fall at the old speed.
//!
//! Struck blocks slide at their impact velocity converted to a per-frame step,
//! optionally worn down by a constant friction loss applied to the first
//! recorded sample.

use super::state::Block;
use crate::consts::{DEFLECT_PHASE, LIFT_PHASE};
use crate::settings::SimConfig;

/// Per-frame motion rules derived from the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionModel {
    pub gravity: f64,
    pub fps: f64,
    /// Speed lost to friction each frame, `None` for frictionless sliding
    pub friction_decel: Option<f64>,
    /// Push and spin blocks away from the swing plane
    pub deflection: bool,
    pub reset_fall_on_landing: bool,
    /// z of the pendulum's swing plane
    pub swing_z: f64,
}

impl MotionModel {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            gravity: config.pendulum.gravity,
            fps: config.fps,
            friction_decel: config.friction_deceleration(),
            deflection: config.deflection,
            reset_fall_on_landing: config.reset_fall_on_landing,
            swing_z: config.pendulum.pivot.z,
        }
    }

    /// Increment added to the fall accumulator each frame
    #[inline]
    pub fn fall_step(&self) -> f64 {
        (2.0 * self.gravity).sqrt() / self.fps
    }

    /// Drop an airborne block toward the floor.
    ///
    /// `supported` blocks sit exactly on top of another block and stay put.
    pub fn apply_gravity(&self, block: &mut Block, supported: bool) {
        if block.position.y == 0.0 || supported {
            return;
        }

        block.fall_distance += self.fall_step();
        block.position.y -= block.fall_distance;

        if block.position.y <= 0.0 {
            block.position.y = 0.0;
            if self.reset_fall_on_landing {
                block.fall_distance = 0.0;
            }
        }
    }

    /// Slide a struck block one frame. Clears the hit once its speed is spent.
    pub fn advance_struck(&self, block: &mut Block) {
        let Some(impact) = block.impact else {
            return;
        };

        let hit_speed = impact.block_velocity / self.fps;
        let speed = match self.friction_decel {
            None => hit_speed,
            Some(decel) => {
                block.hit_history.push(hit_speed);
                let first = &mut block.hit_history[0];
                *first -= decel;
                first.max(0.0)
            }
        };

        if speed <= 0.0 {
            log::debug!("Block {} came to rest", block.index);
            block.clear_hit();
            return;
        }
        block.velocity = speed * self.fps;

        let along = impact.angle.sin();
        block.position.x += if along != 0.0 { along * speed } else { speed };

        if self.deflection {
            let step = (impact.angle + DEFLECT_PHASE).cos() * speed;
            let offset = block.position.z - self.swing_z;
            if offset > 0.0 {
                block.rotation.y -= step;
                block.position.z += step;
            }
            // Only the -z side stays level; centered and +z blocks are lifted
            if offset < 0.0 {
                block.rotation.y += step;
                block.position.z -= step;
            } else {
                block.position.y += step;
            }
        } else {
            block.position.y += (impact.angle + LIFT_PHASE).sin() * speed;
        }
    }

    /// One frame of motion: gravity, then sliding, then the floor clamp
    pub fn update(&self, block: &mut Block, supported: bool) {
        self.apply_gravity(block, supported);
        self.advance_struck(block);
        block.position.y = block.position.y.max(0.0);
    }
}
