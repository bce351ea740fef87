//! Contact detection between the bob and the blocks
//!
//! Everything is an axis-aligned box rebuilt from the current position every
//! frame. Block rotation is ignored; a block's box is always its side cube.

use glam::DVec3;

use super::state::{Block, PendulumState};
use crate::settings::PendulumParams;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn from_center(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Closed-interval overlap on all three axes (touching faces count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// Box around the bob at the pendulum's current angle
pub fn bob_aabb(pendulum: &PendulumState, params: &PendulumParams) -> Aabb {
    Aabb::from_center(
        params.bob_center(pendulum.theta),
        DVec3::splat(params.bob_radius),
    )
}

pub fn block_aabb(block: &Block) -> Aabb {
    Aabb::from_center(block.position, DVec3::splat(block.side / 2.0))
}

/// Bob/block overlap for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub bob: Aabb,
    pub block: Aabb,
    pub overlap: bool,
}

impl Contact {
    pub fn between(bob: Aabb, block: Aabb) -> Self {
        Self {
            bob,
            block,
            overlap: bob.intersects(&block),
        }
    }
}

/// Every overlap found in one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet {
    /// Per block, indexed like the wall
    pub bob: Vec<Contact>,
    /// Overlapping block pairs `(i, j)` with `j < i`
    pub block_pairs: Vec<(usize, usize)>,
}

impl ContactSet {
    /// Indices of blocks the bob is touching
    pub fn bob_hits(&self) -> impl Iterator<Item = usize> + '_ {
        self.bob
            .iter()
            .enumerate()
            .filter(|(_, c)| c.overlap)
            .map(|(i, _)| i)
    }

    pub fn touches_bob(&self, index: usize) -> bool {
        self.bob.get(index).is_some_and(|c| c.overlap)
    }
}

/// Test the bob against every block and every block against the ones before it
pub fn detect_contacts(
    pendulum: &PendulumState,
    params: &PendulumParams,
    blocks: &[Block],
) -> ContactSet {
    let bob = bob_aabb(pendulum, params);
    let boxes: Vec<Aabb> = blocks.iter().map(block_aabb).collect();

    let mut contacts = ContactSet {
        bob: boxes.iter().map(|b| Contact::between(bob, *b)).collect(),
        block_pairs: Vec::new(),
    };

    for (i, a) in boxes.iter().enumerate() {
        for (j, b) in boxes[..i].iter().enumerate() {
            if a.intersects(b) {
                contacts.block_pairs.push((i, j));
            }
        }
    }

    contacts
}
