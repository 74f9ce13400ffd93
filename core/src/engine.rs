// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shape supply interface
//!
//! Deciding which shapes a player is offered is the host's job; the core
//! only needs something it can ask for the next batch.

use crate::shapes::BlockShape;

/// Source of the shapes offered to the player each round
pub trait ShapeSource {
    /// Produce the next `count` shapes
    fn next_shapes(&mut self, count: usize) -> Vec<BlockShape>;
}

/// Replays a fixed list of shapes in order, wrapping around
#[derive(Debug, Clone)]
pub struct SequenceSource {
    shapes: Vec<BlockShape>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source over the given shapes
    pub fn new(shapes: Vec<BlockShape>) -> Self {
        Self { shapes, cursor: 0 }
    }
}

impl ShapeSource for SequenceSource {
    fn next_shapes(&mut self, count: usize) -> Vec<BlockShape> {
        if self.shapes.is_empty() {
            return Vec::new();
        }

        (0..count)
            .map(|_| {
                let shape = self.shapes[self.cursor % self.shapes.len()].clone();
                self.cursor = (self.cursor + 1) % self.shapes.len();
                shape
            })
            .collect()
    }
}
