//! Block/block overlap correction
//!
//! A single positional pass over every pair `(i, j)` with `j < i`, in index
//! order. Earlier blocks are the fixed reference for later ones within a
//! frame, and a later pair may undo an earlier correction. There is no
//! iteration to convergence; the result depends on wall order.

use super::state::Block;
use crate::consts::{TIP_NUDGE, TIP_RATE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackResolver {
    /// Block side, used as the overlap tolerance on every axis
    pub side: f64,
    /// Topple blocks hanging past a lower neighbor's edge
    pub tipping: bool,
}

impl StackResolver {
    pub fn new(side: f64, tipping: bool) -> Self {
        Self { side, tipping }
    }

    /// Footprints overlap on x and z
    #[inline]
    fn footprints_overlap(&self, a: &Block, b: &Block) -> bool {
        (a.position.x - b.position.x).abs() < self.side
            && (a.position.z - b.position.z).abs() < self.side
    }

    /// `block` rests exactly on top of some other block
    pub fn is_supported(&self, blocks: &[Block], index: usize) -> bool {
        let block = &blocks[index];
        blocks.iter().any(|other| {
            other.index != block.index
                && block.position.y == other.position.y + self.side
                && self.footprints_overlap(block, other)
        })
    }

    /// Support flags for every block, taken before anything moves
    pub fn support_map(&self, blocks: &[Block]) -> Vec<bool> {
        (0..blocks.len()).map(|i| self.is_supported(blocks, i)).collect()
    }

    /// Correct `block` against one earlier block
    fn resolve_pair(&self, block: &mut Block, below: &Block) {
        let side = self.side;

        // Vertical support: sit on top of the earlier block
        let dy = (block.position.y - below.position.y).abs();
        if self.footprints_overlap(block, below) && dy > 0.0 && dy < side {
            block.position.y = below.position.y + side;
        }

        // Lateral separation within a layer, along the axis with more clearance
        if block.position.y == below.position.y && self.footprints_overlap(block, below) {
            let dx = (block.position.x - below.position.x).abs();
            let dz = (block.position.z - below.position.z).abs();
            if dx > dz {
                block.position.x = below.position.x + side;
            } else {
                block.position.z = below.position.z + side;
            }
        }

        if self.tipping
            && block.position.x > below.position.x + side / 2.0
            && (block.position.y - below.position.y).abs() == side
            && block.position.z == below.position.z
        {
            block.rotation.z -= TIP_RATE;
            block.position.x += TIP_NUDGE;
        }
    }

    /// One pass over every ordered pair, in wall order
    pub fn resolve_overlaps(&self, blocks: &mut [Block]) {
        for i in 1..blocks.len() {
            let (earlier, rest) = blocks.split_at_mut(i);
            let block = &mut rest[0];
            for below in earlier.iter() {
                self.resolve_pair(block, below);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn blocks_at(positions: &[DVec3]) -> Vec<Block> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| Block::new(i, 10.0, 2.0, *p, 0))
            .collect()
    }

    #[test]
    fn test_same_spot_separates_along_larger_clearance() {
        let resolver = StackResolver::new(2.0, false);
        let mut blocks = blocks_at(&[DVec3::ZERO, DVec3::new(0.0, 0.0, 0.5)]);
        resolver.resolve_overlaps(&mut blocks);

        assert_eq!(blocks[0].position, DVec3::ZERO);
        assert_eq!(blocks[1].position, DVec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_lateral_prefers_x_when_x_clearance_larger() {
        let resolver = StackResolver::new(2.0, false);
        let mut blocks = blocks_at(&[DVec3::ZERO, DVec3::new(1.0, 0.0, 0.5)]);
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks[1].position, DVec3::new(2.0, 0.0, 0.5));
    }

    #[test]
    fn test_lateral_tie_resolves_along_z() {
        let resolver = StackResolver::new(2.0, false);
        let mut blocks = blocks_at(&[DVec3::ZERO, DVec3::ZERO]);
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks[1].position, DVec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_sinking_block_snaps_on_top() {
        let resolver = StackResolver::new(2.0, false);
        let mut blocks = blocks_at(&[DVec3::new(3.0, 0.0, -1.0), DVec3::new(3.5, 1.2, -0.5)]);
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks[1].position.y, 2.0);
        assert_eq!(blocks[1].position.x, 3.5);
    }

    #[test]
    fn test_block_below_earlier_block_is_lifted_on_top() {
        // Later index always yields, even when it is the lower one
        let resolver = StackResolver::new(2.0, false);
        let mut blocks = blocks_at(&[DVec3::new(0.0, 1.5, 0.0), DVec3::new(0.0, 0.5, 0.0)]);
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks[1].position.y, 3.5);
    }

    #[test]
    fn test_resting_wall_is_left_alone() {
        let resolver = StackResolver::new(2.0, true);
        let mut blocks = blocks_at(&[
            DVec3::new(3.0, 0.0, -1.0),
            DVec3::new(3.0, 0.0, 1.0),
            DVec3::new(3.0, 2.0, -1.0),
            DVec3::new(3.0, 2.0, 1.0),
        ]);
        let before = blocks.clone();
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks, before);
    }

    #[test]
    fn test_earlier_correction_can_be_undone_by_later_pair() {
        let resolver = StackResolver::new(2.0, false);
        // Block 2 is pushed off block 0 along z, onto block 1's spot, then along z again
        let mut blocks = blocks_at(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(0.0, 0.0, 0.5),
        ]);
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks[2].position, DVec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_tipping_rotates_overhanging_block() {
        let resolver = StackResolver::new(2.0, true);
        let mut blocks = blocks_at(&[DVec3::new(3.0, 0.0, -1.0), DVec3::new(4.5, 2.0, -1.0)]);
        resolver.resolve_overlaps(&mut blocks);
        assert!((blocks[1].rotation.z + TIP_RATE).abs() < 1e-12);
        assert!((blocks[1].position.x - (4.5 + TIP_NUDGE)).abs() < 1e-12);
        assert_eq!(blocks[1].position.y, 2.0);
    }

    #[test]
    fn test_tipping_disabled() {
        let resolver = StackResolver::new(2.0, false);
        let mut blocks = blocks_at(&[DVec3::new(3.0, 0.0, -1.0), DVec3::new(4.5, 2.0, -1.0)]);
        resolver.resolve_overlaps(&mut blocks);
        assert_eq!(blocks[1].rotation.z, 0.0);
        assert_eq!(blocks[1].position.x, 4.5);
    }

    #[test]
    fn test_support() {
        let resolver = StackResolver::new(2.0, false);
        let blocks = blocks_at(&[
            DVec3::new(3.0, 0.0, -1.0),
            DVec3::new(3.5, 2.0, -1.0),
            DVec3::new(6.0, 2.0, -1.0),
            DVec3::new(3.0, 2.5, 5.0),
        ]);
        assert_eq!(resolver.support_map(&blocks), vec![false, true, false, false]);
    }
}
