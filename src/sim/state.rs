//! Simulation state and core types
//!
//! All mutable state lives in one [`Simulation`] value: the pendulum, the
//! blocks and the frame counter. Nothing is global.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::impact::Impact;
use crate::error::ConfigError;
use crate::settings::{PendulumParams, Preset, SimConfig};

/// Pendulum angle and angular velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angle from vertical (radians, positive swings toward the wall)
    pub theta: f64,
    /// Angular velocity (rad/s)
    pub omega: f64,
}

impl PendulumState {
    pub fn at_angle(theta: f64) -> Self {
        Self { theta, omega: 0.0 }
    }
}

/// A block in the wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the wall, also the resolution order
    pub index: usize,
    pub mass: f64,
    pub side: f64,
    /// Center in world space, `y >= 0`
    pub position: DVec3,
    /// Euler angles; only y (deflection) and z (tipping) ever change
    pub rotation: DVec3,
    /// Current sliding speed (world units per second), zero at rest
    pub velocity: f64,
    /// Hit that set the block sliding; `Some` while struck
    pub impact: Option<Impact>,
    /// Accumulated per-frame fall step
    pub fall_distance: f64,
    /// Per-frame hit speeds recorded while struck (oldest first)
    pub hit_history: Vec<f64>,
    /// An impact already fired during the current contact with the bob
    pub engaged: bool,
    /// Display color (0xRRGGBB)
    pub color: u32,
}

impl Block {
    pub fn new(index: usize, mass: f64, side: f64, position: DVec3, color: u32) -> Self {
        Self {
            index,
            mass,
            side,
            position,
            rotation: DVec3::ZERO,
            velocity: 0.0,
            impact: None,
            fall_distance: 0.0,
            hit_history: Vec::new(),
            engaged: false,
            color,
        }
    }

    /// Block is under active hit-velocity motion
    pub fn is_struck(&self) -> bool {
        self.impact.is_some()
    }

    /// Stop sliding and forget the hit
    pub fn clear_hit(&mut self) {
        self.impact = None;
        self.velocity = 0.0;
        self.hit_history.clear();
    }

    /// Put the block back at `position` with every transient cleared
    pub fn reset(&mut self, position: DVec3) {
        self.position = position;
        self.rotation = DVec3::ZERO;
        self.fall_distance = 0.0;
        self.engaged = false;
        self.clear_hit();
    }

    pub fn pose(&self) -> BlockPose {
        BlockPose {
            index: self.index,
            position: self.position,
            rotation: self.rotation,
            color: self.color,
        }
    }
}

/// Pendulum pose for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumPose {
    /// Rod rotation about z
    pub angle: f64,
    pub bob: DVec3,
}

/// Block pose for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPose {
    pub index: usize,
    pub position: DVec3,
    pub rotation: DVec3,
    pub color: u32,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) pendulum: PendulumState,
    /// Sorted by index; never grows or shrinks after construction
    pub(crate) blocks: Vec<Block>,
    pub(crate) frame: u64,
}

impl Simulation {
    /// Validate the config and build the wall
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.color_seed);
        let blocks = (0..config.wall.len())
            .map(|index| {
                Block::new(
                    index,
                    config.block_mass,
                    config.wall.side,
                    config.wall.position(index),
                    rng.random_range(0..0x0100_0000),
                )
            })
            .collect::<Vec<_>>();

        log::info!(
            "Built {}x{} wall ({} blocks, side {})",
            config.wall.rows,
            config.wall.columns,
            blocks.len(),
            config.wall.side
        );

        Ok(Self {
            config,
            pendulum: PendulumState::default(),
            blocks,
            frame: 0,
        })
    }

    pub fn from_preset(preset: Preset) -> Result<Self, ConfigError> {
        log::info!("Using preset {}", preset.as_str());
        Self::new(SimConfig::from_preset(preset))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn params(&self) -> &PendulumParams {
        &self.config.pendulum
    }

    pub fn pendulum(&self) -> PendulumState {
        self.pendulum
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Frames stepped since construction or the last [`reset_all`](Self::reset_all)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Set the start angle; the pendulum is released from rest
    pub fn set_pendulum_angle(&mut self, theta: f64) {
        self.pendulum = PendulumState::at_angle(theta);
    }

    /// Restore the initial grid and clear every block's motion
    pub fn reset_blocks(&mut self) {
        for block in &mut self.blocks {
            block.reset(self.config.wall.position(block.index));
        }
        log::info!("Blocks reset");
    }

    /// Reset blocks, bring the pendulum to rest at vertical, restart the frame count
    pub fn reset_all(&mut self) {
        self.reset_blocks();
        self.pendulum = PendulumState::default();
        self.frame = 0;
    }

    /// Lift one block to `height` and let it fall from rest again.
    ///
    /// Returns false if there is no block at `index`.
    pub fn drop_block(&mut self, index: usize, height: f64) -> bool {
        let wall = &self.config.wall;
        let Some(block) = self.blocks.get_mut(index) else {
            return false;
        };
        let mut position = wall.position(index);
        position.y = height.max(0.0);
        block.reset(position);
        log::debug!("Block {} raised to {}", index, position.y);
        true
    }

    pub fn pendulum_pose(&self) -> PendulumPose {
        PendulumPose {
            angle: self.pendulum.theta,
            bob: self.params().bob_center(self.pendulum.theta),
        }
    }

    pub fn block_poses(&self) -> Vec<BlockPose> {
        self.blocks.iter().map(Block::pose).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Preset;

    #[test]
    fn test_new_builds_wall_in_row_major_order() {
        let sim = Simulation::from_preset(Preset::TippingWall).unwrap();
        assert_eq!(sim.blocks().len(), 12);
        for (i, block) in sim.blocks().iter().enumerate() {
            assert_eq!(block.index, i);
            assert_eq!(block.position, sim.config().wall.position(i));
            assert!(!block.is_struck());
            assert!(block.color < 0x0100_0000);
        }
        assert_eq!(sim.block(4).unwrap().position.y, 2.0);
        assert_eq!(sim.block(8).unwrap().position.y, 4.0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.pendulum.mass = 0.0;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_colors_follow_seed() {
        let a = Simulation::new(SimConfig::default()).unwrap();
        let b = Simulation::new(SimConfig::default()).unwrap();
        let colors = |s: &Simulation| s.blocks().iter().map(|b| b.color).collect::<Vec<_>>();
        assert_eq!(colors(&a), colors(&b));
    }

    #[test]
    fn test_set_angle_releases_from_rest() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.pendulum.omega = 3.0;
        sim.set_pendulum_angle(-1.2);
        assert_eq!(sim.pendulum(), PendulumState { theta: -1.2, omega: 0.0 });
    }

    #[test]
    fn test_reset_blocks_clears_transients() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let block = &mut sim.blocks[2];
        block.position = DVec3::new(9.0, 0.5, 4.0);
        block.rotation.y = 0.7;
        block.velocity = 12.0;
        block.impact = Some(Impact {
            block_velocity: 12.0,
            pendulum_velocity: 8.0,
            angle: 0.3,
        });
        block.fall_distance = 1.5;
        block.hit_history.push(0.2);
        block.engaged = true;

        sim.reset_blocks();
        let block = sim.block(2).unwrap();
        assert_eq!(block.position, sim.config().wall.position(2));
        assert_eq!(block.rotation, DVec3::ZERO);
        assert_eq!(block.velocity, 0.0);
        assert!(block.impact.is_none());
        assert_eq!(block.fall_distance, 0.0);
        assert!(block.hit_history.is_empty());
        assert!(!block.engaged);
    }

    #[test]
    fn test_drop_block() {
        let mut sim = Simulation::from_preset(Preset::SingleBlock).unwrap();
        sim.blocks[0].position.y = 0.0;
        sim.blocks[0].fall_distance = 4.0;

        assert!(sim.drop_block(0, 25.0));
        assert_eq!(sim.block(0).unwrap().position, DVec3::new(2.0, 25.0, 0.0));
        assert_eq!(sim.block(0).unwrap().fall_distance, 0.0);

        assert!(sim.drop_block(0, -3.0));
        assert_eq!(sim.block(0).unwrap().position.y, 0.0);
        assert!(!sim.drop_block(7, 10.0));
    }

    #[test]
    fn test_poses() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.set_pendulum_angle(0.5);
        let pose = sim.pendulum_pose();
        assert_eq!(pose.angle, 0.5);
        assert_eq!(pose.bob, sim.params().bob_center(0.5));

        let poses = sim.block_poses();
        assert_eq!(poses.len(), 8);
        assert_eq!(poses[5].position, sim.block(5).unwrap().position);
    }
}
