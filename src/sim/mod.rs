//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by wall index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod impact;
pub mod integrate;
pub mod motion;
pub mod stack;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, ContactSet, detect_contacts};
pub use impact::{Impact, exchange_momentum, process_contact, resolve_impact};
pub use integrate::integrate;
pub use motion::MotionModel;
pub use stack::StackResolver;
pub use state::{Block, BlockPose, PendulumPose, PendulumState, Simulation};
pub use tick::{FrameReport, tick};
