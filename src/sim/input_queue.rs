//! Buffered player input
//!
//! Directional taps arrive faster than the tick rate; they are queued in
//! order rather than overwriting each other, and drained one per tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Heading;
use crate::consts::INPUT_QUEUE_CAPACITY;

/// Bounded FIFO of pending player headings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputQueue {
    pending: VecDeque<Heading>,
    capacity: usize,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(INPUT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue a turn. `current` is the player's heading right now; the turn is
    /// checked against the last queued entry, or `current` when nothing is
    /// queued. Full queues and reversals are dropped silently.
    ///
    /// Returns whether the heading was accepted.
    pub fn enqueue(&mut self, candidate: Heading, current: Heading) -> bool {
        if self.pending.len() >= self.capacity {
            return false;
        }
        let last = self.pending.back().copied().unwrap_or(current);
        if candidate.is_reverse_of(last) {
            return false;
        }
        self.pending.push_back(candidate);
        true
    }

    /// Oldest pending heading, if any
    pub fn dequeue_one(&mut self) -> Option<Heading> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
