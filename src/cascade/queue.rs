//! FIFO of pending detonations with O(1) duplicate rejection.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Pending-detonation queue.
///
/// A membership bitmap sits alongside the FIFO so `push` can reject
/// duplicates without scanning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeQueue {
    order: VecDeque<usize>,
    queued: Vec<bool>,
}

impl CascadeQueue {
    /// Create an empty queue for a grid of `cell_count` cells.
    #[must_use]
    pub fn new(cell_count: usize) -> Self {
        Self {
            order: VecDeque::new(),
            queued: vec![false; cell_count],
        }
    }

    /// Enqueue `index` unless already queued. Returns true if added.
    pub fn push(&mut self, index: usize) -> bool {
        match self.queued.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                self.order.push_back(index);
                true
            }
            _ => false,
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        let index = self.order.pop_front()?;
        self.queued[index] = false;
        Some(index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.queued.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop entries for which `keep` returns false, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let queued = &mut self.queued;
        self.order.retain(|&index| {
            let kept = keep(index);
            if !kept {
                queued[index] = false;
            }
            kept
        });
    }

    pub fn clear(&mut self) {
        for index in self.order.drain(..) {
            self.queued[index] = false;
        }
    }

    /// Queued indices in dequeue order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}
