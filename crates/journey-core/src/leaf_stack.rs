//! # Leaf Stack
//!
//! Z-order bookkeeping for a page-flipping book.
//!
//! Each leaf carries two pages. Resting leaves on the right are stacked with
//! the first leaf on top; a leaf in motion is lifted above everything; once a
//! flip finishes the leaf settles on the left pile, where later leaves lie on
//! top of earlier ones.

use crate::error::LeafError;

/// Stacking value of the first unflipped leaf.
pub const TOP_BASE: i32 = 1000;
/// Added to `TOP_BASE` while a leaf is turning.
const LIFT: i32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    Next,
    Prev,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafStack {
    flipped: usize,
    order: Vec<i32>,
    turning: Vec<bool>,
}

impl LeafStack {
    pub fn new(leaf_count: usize) -> Self {
        Self {
            flipped: 0,
            order: (0..leaf_count).map(resting_unflipped).collect(),
            turning: vec![false; leaf_count],
        }
    }

    /// A book of `page_count` pages: the cover page and the back page are
    /// fixed, the pages in between are paired onto leaves.
    pub fn for_pages(page_count: usize) -> Self {
        Self::new(page_count.saturating_sub(1) / 2)
    }

    pub fn leaf_count(&self) -> usize {
        self.order.len()
    }

    pub fn flipped_count(&self) -> usize {
        self.flipped
    }

    pub fn is_flipped(&self, leaf: usize) -> bool {
        leaf < self.flipped
    }

    pub fn is_turning(&self, leaf: usize) -> bool {
        self.turning.get(leaf).copied().unwrap_or(false)
    }

    /// Current stacking value of every leaf, higher on top.
    pub fn z_order(&self) -> &[i32] {
        &self.order
    }

    pub fn can_turn(&self, direction: FlipDirection) -> bool {
        match direction {
            FlipDirection::Next => self.flipped < self.leaf_count(),
            FlipDirection::Prev => self.flipped > 0,
        }
    }

    /// Starts turning one leaf. Returns the index of the leaf in motion.
    pub fn turn(&mut self, direction: FlipDirection) -> Result<usize, LeafError> {
        if !self.can_turn(direction) {
            return Err(LeafError::NoLeafToTurn { direction });
        }

        let leaf = match direction {
            FlipDirection::Next => {
                self.flipped += 1;
                self.flipped - 1
            }
            FlipDirection::Prev => {
                self.flipped -= 1;
                self.flipped
            }
        };

        self.order[leaf] = TOP_BASE + LIFT + leaf as i32;
        self.turning[leaf] = true;
        tracing::debug!("Turning leaf {} ({:?}), {} flipped", leaf, direction, self.flipped);
        Ok(leaf)
    }

    /// Called when a leaf's flip animation ends; drops it onto the pile it
    /// now belongs to.
    pub fn settle(&mut self, leaf: usize) -> Result<(), LeafError> {
        if leaf >= self.leaf_count() {
            return Err(LeafError::UnknownLeaf {
                leaf,
                count: self.leaf_count(),
            });
        }

        self.order[leaf] = if self.is_flipped(leaf) {
            leaf as i32
        } else {
            resting_unflipped(leaf)
        };
        self.turning[leaf] = false;
        Ok(())
    }

    /// Leaf currently drawn on top, if any.
    pub fn topmost(&self) -> Option<usize> {
        self.order
            .iter()
            .enumerate()
            .max_by_key(|&(_, z)| *z)
            .map(|(i, _)| i)
    }
}

fn resting_unflipped(leaf: usize) -> i32 {
    TOP_BASE - leaf as i32
}
