//! Fixed timestep simulation tick
//!
//! One call is one frame: integrate the pendulum, find contacts, resolve
//! impacts, move blocks, then correct block overlaps.

use serde::Serialize;

use super::collision::detect_contacts;
use super::impact::{Impact, process_contact};
use super::integrate::integrate;
use super::motion::MotionModel;
use super::stack::StackResolver;
use super::state::Simulation;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame number after this step (first step reports 1)
    pub frame: u64,
    /// Blocks overlapping the bob
    pub bob_contacts: Vec<usize>,
    /// Overlapping block pairs `(i, j)` with `j < i`
    pub block_contacts: Vec<(usize, usize)>,
    /// Impacts fired this frame, in block order
    pub impacts: Vec<(usize, Impact)>,
}

/// Advance the simulation by one fixed timestep
pub fn tick(sim: &mut Simulation) -> FrameReport {
    let Simulation {
        config,
        pendulum,
        blocks,
        frame,
    } = sim;
    let params = &config.pendulum;

    *pendulum = integrate(pendulum, params, config.timestep);

    let contacts = detect_contacts(pendulum, params, blocks);

    let mut impacts = Vec::new();
    for (block, contact) in blocks.iter_mut().zip(&contacts.bob) {
        if let Some(impact) = process_contact(pendulum, params, block, contact.overlap) {
            impacts.push((block.index, impact));
        }
    }

    let resolver = StackResolver::new(config.wall.side, config.tipping);
    let motion = MotionModel::from_config(config);
    let supported = resolver.support_map(blocks);
    for (block, supported) in blocks.iter_mut().zip(supported) {
        motion.update(block, supported);
    }

    resolver.resolve_overlaps(blocks);

    *frame += 1;
    log::trace!(
        "Frame {}: θ={:.4} ω={:.4}, {} bob contacts, {} impacts",
        *frame,
        pendulum.theta,
        pendulum.omega,
        contacts.bob_hits().count(),
        impacts.len()
    );

    FrameReport {
        frame: *frame,
        bob_contacts: contacts.bob_hits().collect(),
        block_contacts: contacts.block_pairs,
        impacts,
    }
}

impl Simulation {
    /// Advance one frame with the configured fixed timestep
    pub fn step(&mut self) -> FrameReport {
        tick(self)
    }

    /// Step `frames` times, discarding the reports
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            tick(self);
        }
    }
}
