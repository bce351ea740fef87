//! Wrecking Cubes - a damped pendulum knocking over a wall of blocks
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (pendulum, contacts, blocks)
//! - `settings`: Scene presets, physical parameters and validation
//! - `error`: Construction-time configuration errors
//!
//! Rendering is left to the caller: read poses from [`sim::Simulation`] once
//! per frame and push them into whatever scene graph draws the wall.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{FrictionModel, PendulumParams, Preset, SimConfig, WallLayout};
pub use sim::{FrameReport, Simulation};

/// Scene configuration constants
pub mod consts {
    /// Fixed integration step (seconds), independent of real frame time
    pub const SIM_DT: f64 = 0.05;
    /// Display rate used to turn per-second velocities into per-frame steps
    pub const FRAMES_PER_SECOND: f64 = 60.0;

    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.82;

    /// Pendulum defaults
    pub const ROD_LENGTH: f64 = 10.0;
    pub const PENDULUM_MASS: f64 = 1000.0;
    /// Linear damping from the old linear drag model (kept, not used)
    pub const LINEAR_DAMPING: f64 = 2.83;
    pub const BOB_DIAMETER: f64 = 1.0;
    pub const BOB_RADIUS: f64 = 1.0;
    pub const AIR_DENSITY: f64 = 1.2041;
    /// Drag coefficient as tuned for the scene
    pub const DRAG_COEFFICIENT: f64 = 4.7;
    /// Pivot sits this far above the rod length
    pub const PIVOT_HEIGHT_OFFSET: f64 = 1.5;
    pub const PIVOT_X: f64 = -1.0;

    /// Block defaults
    pub const BLOCK_MASS: f64 = 10.0;
    pub const BLOCK_SIDE: f64 = 2.0;
    /// Largest wall accepted; the overlap pass visits every block pair each frame
    pub const MAX_WALL_BLOCKS: usize = 65_536;
    /// Wood sliding on stone
    pub const FRICTION_COEFFICIENT: f64 = 0.3;

    /// Tipping heuristic: rotation per frame (radians) and forward nudge
    pub const TIP_RATE: f64 = 28.0 / 60.0;
    pub const TIP_NUDGE: f64 = 0.05;

    /// Phase offsets added to the hit angle (raw radians, as tuned)
    pub const LIFT_PHASE: f64 = 90.0;
    pub const DEFLECT_PHASE: f64 = 45.0;
}
