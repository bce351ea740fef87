//! Scene presets and physical parameters
//!
//! Everything here is fixed for the lifetime of a [`Simulation`](crate::Simulation).
//! Configs can be built from a named preset or loaded from JSON; either way
//! they pass through [`SimConfig::validate`] before a simulation is built.

use std::f64::consts::PI;
use std::path::Path;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// The three tuned scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// One block dropped from above into the swing path, no friction
    SingleBlock,
    /// 3x4 wall, no friction, blocks tip over their neighbors' edges
    TippingWall,
    /// 2x4 wall, constant-force friction, off-center hits spin blocks
    #[default]
    FrictionWall,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::SingleBlock, Preset::TippingWall, Preset::FrictionWall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::SingleBlock => "single-block",
            Preset::TippingWall => "tipping-wall",
            Preset::FrictionWall => "friction-wall",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single-block" | "single" => Ok(Preset::SingleBlock),
            "tipping-wall" | "tipping" => Ok(Preset::TippingWall),
            "friction-wall" | "friction" => Ok(Preset::FrictionWall),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// How a struck block loses speed while sliding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrictionModel {
    /// Block keeps its hit velocity until something else stops it
    #[default]
    None,
    /// Constant friction force `coefficient * g * mass`, applied as a fixed
    /// per-frame speed loss
    ConstantForce { coefficient: f64 },
}

impl FrictionModel {
    /// Speed lost per frame (world units per frame), if friction applies
    pub fn deceleration_per_frame(&self, gravity: f64, mass: f64, fps: f64) -> Option<f64> {
        match *self {
            FrictionModel::None => None,
            FrictionModel::ConstantForce { coefficient } => {
                let force = coefficient * gravity * mass;
                Some((2.0 * force / mass).sqrt() / fps)
            }
        }
    }
}

/// Pendulum physical constants and rig geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumParams {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Rod length
    pub length: f64,
    /// Bob mass
    pub mass: f64,
    /// Linear damping coefficient (legacy, the quadratic drag model ignores it)
    pub damping: f64,
    /// Bob diameter, used for the drag area and the push-ahead on impact
    pub diameter: f64,
    pub air_density: f64,
    pub drag_coefficient: f64,
    /// Half extent of the bob's bounding box
    pub bob_radius: f64,
    /// Rod pivot in world space
    pub pivot: DVec3,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            length: ROD_LENGTH,
            mass: PENDULUM_MASS,
            damping: LINEAR_DAMPING,
            diameter: BOB_DIAMETER,
            air_density: AIR_DENSITY,
            drag_coefficient: DRAG_COEFFICIENT,
            bob_radius: BOB_RADIUS,
            pivot: DVec3::new(PIVOT_X, ROD_LENGTH + PIVOT_HEIGHT_OFFSET, 0.0),
        }
    }
}

impl PendulumParams {
    /// Cross-sectional area of the bob
    pub fn area(&self) -> f64 {
        self.diameter * self.diameter * PI / 4.0
    }

    /// Precomputed drag factor D = ½·C·ρ·A
    pub fn drag_factor(&self) -> f64 {
        0.5 * self.drag_coefficient * self.air_density * self.area()
    }

    /// Distance from pivot to bob center (rod plus half the bob radius)
    pub fn bob_offset(&self) -> f64 {
        self.length + self.bob_radius / 2.0
    }

    /// World-space bob center for a swing angle
    pub fn bob_center(&self, theta: f64) -> DVec3 {
        let r = self.bob_offset();
        self.pivot + DVec3::new(r * theta.sin(), -r * theta.cos(), 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("gravity", self.gravity)?;
        ConfigError::require_positive("rod length", self.length)?;
        ConfigError::require_positive("pendulum mass", self.mass)?;
        ConfigError::require_non_negative("damping", self.damping)?;
        ConfigError::require_non_negative("bob diameter", self.diameter)?;
        ConfigError::require_non_negative("air density", self.air_density)?;
        ConfigError::require_non_negative("drag coefficient", self.drag_coefficient)?;
        ConfigError::require_non_negative("bob radius", self.bob_radius)?;
        ConfigError::require_finite("pivot", self.pivot)
    }
}

/// Grid placement of the wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    pub rows: usize,
    pub columns: usize,
    /// Block side length
    pub side: f64,
    /// x and y of the bottom row; z is the centerline the wall spans around
    pub origin: DVec3,
}

impl Default for WallLayout {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 4,
            side: BLOCK_SIDE,
            origin: DVec3::new(3.0, 0.0, 0.0),
        }
    }
}

impl WallLayout {
    /// Total number of blocks
    pub fn len(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// z of the first column, so the wall spans symmetrically around `origin.z`
    pub fn first_column_z(&self) -> f64 {
        self.origin.z - self.side * (self.columns as f64 - 1.0) / 2.0
    }

    /// Initial position of block `index` (row-major, bottom row first)
    pub fn position(&self, index: usize) -> DVec3 {
        let row = index / self.columns;
        let column = index % self.columns;
        DVec3::new(
            self.origin.x,
            self.origin.y + row as f64 * self.side,
            self.first_column_z() + column as f64 * self.side,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyWall {
                rows: self.rows,
                columns: self.columns,
            });
        }
        match self.rows.checked_mul(self.columns) {
            Some(count) if count <= MAX_WALL_BLOCKS => {}
            _ => {
                return Err(ConfigError::WallTooLarge {
                    rows: self.rows,
                    columns: self.columns,
                });
            }
        }
        ConfigError::require_positive("block side", self.side)?;
        ConfigError::require_finite("wall origin", self.origin)?;
        // Blocks rest on the floor at y = 0
        ConfigError::require_non_negative("wall origin y", self.origin.y)
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub pendulum: PendulumParams,
    pub wall: WallLayout,
    /// Mass of every block
    pub block_mass: f64,
    pub friction: FrictionModel,
    /// Topple blocks hanging over a lower neighbor's edge
    pub tipping: bool,
    /// Push and spin blocks hit off the swing plane
    pub deflection: bool,
    /// Clear a block's fall accumulator when it lands
    #[serde(default)]
    pub reset_fall_on_landing: bool,
    /// Fixed integration step (seconds)
    pub timestep: f64,
    /// Frame rate used for per-frame velocity steps
    pub fps: f64,
    /// Seed for block display colors
    #[serde(default)]
    pub color_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl SimConfig {
    /// Create a config from one of the tuned scenes
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            pendulum: PendulumParams::default(),
            wall: WallLayout::default(),
            block_mass: BLOCK_MASS,
            friction: FrictionModel::None,
            tipping: false,
            deflection: false,
            reset_fall_on_landing: false,
            timestep: SIM_DT,
            fps: FRAMES_PER_SECOND,
            color_seed: 0,
        };

        match preset {
            Preset::SingleBlock => Self {
                wall: WallLayout {
                    rows: 1,
                    columns: 1,
                    origin: DVec3::new(2.0, 25.0, 0.0),
                    ..WallLayout::default()
                },
                ..base
            },
            Preset::TippingWall => Self {
                wall: WallLayout {
                    rows: 3,
                    columns: 4,
                    ..WallLayout::default()
                },
                tipping: true,
                ..base
            },
            Preset::FrictionWall => Self {
                friction: FrictionModel::ConstantForce {
                    coefficient: FRICTION_COEFFICIENT,
                },
                deflection: true,
                ..base
            },
        }
    }

    /// Reject parameters that would produce NaN or infinite state
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pendulum.validate()?;
        self.wall.validate()?;
        ConfigError::require_positive("block mass", self.block_mass)?;
        ConfigError::require_positive("timestep", self.timestep)?;
        ConfigError::require_positive("fps", self.fps)?;
        if let FrictionModel::ConstantForce { coefficient } = self.friction {
            ConfigError::require_non_negative("friction coefficient", coefficient)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Per-frame speed lost to friction, if the friction model has any
    pub fn friction_deceleration(&self) -> Option<f64> {
        self.friction
            .deceleration_per_frame(self.pendulum.gravity, self.block_mass, self.fps)
    }
}
