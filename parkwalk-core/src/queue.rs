//! Indexed binary min-heap with decrease-key.
//!
//! The heap stores item handles (dense `usize` indices) and never owns the
//! keys. Keys and the per-item slot live in caller-provided storage behind
//! [`KeyedSlots`], so each item knows where it sits in the heap and
//! [`IndexedMinHeap::decrease_key`] runs without a linear scan.

use thiserror::Error;

/// Errors raised by [`IndexedMinHeap`].
///
/// Both variants indicate broken search bookkeeping rather than bad user
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `extract_min` was called on an empty heap.
    #[error("cannot extract from an empty priority queue")]
    Empty,
    /// `decrease_key` was called for an item that is not queued.
    #[error("item {item} is not in the priority queue")]
    NotQueued {
        /// Handle of the offending item.
        item: usize,
    },
}

/// Storage that exposes ordering keys and heap slots for item handles.
///
/// Implementations must return a stable key between calls that do not
/// modify the item, and must persist whatever slot the heap assigns.
pub trait KeyedSlots {
    /// Ordering key; smaller keys are extracted first.
    type Key: PartialOrd + Copy;

    /// Current key of `item`.
    fn key(&self, item: usize) -> Self::Key;

    /// Heap slot last recorded for `item`, if any.
    fn slot(&self, item: usize) -> Option<usize>;

    /// Record the heap slot of `item`; `None` marks it as not queued.
    fn set_slot(&mut self, item: usize, slot: Option<usize>);
}

/// Binary min-heap over item handles with embedded position tracking.
///
/// # Examples
///
/// ```
/// use parkwalk_core::queue::{IndexedMinHeap, KeyedSlots};
///
/// struct Keys {
///     keys: Vec<u32>,
///     slots: Vec<Option<usize>>,
/// }
///
/// impl KeyedSlots for Keys {
///     type Key = u32;
///     fn key(&self, item: usize) -> u32 {
///         self.keys.get(item).copied().unwrap_or(u32::MAX)
///     }
///     fn slot(&self, item: usize) -> Option<usize> {
///         self.slots.get(item).copied().flatten()
///     }
///     fn set_slot(&mut self, item: usize, slot: Option<usize>) {
///         if let Some(entry) = self.slots.get_mut(item) {
///             *entry = slot;
///         }
///     }
/// }
///
/// let mut keys = Keys { keys: vec![5, 3, 9], slots: vec![None; 3] };
/// let mut heap = IndexedMinHeap::new();
/// for item in 0..3 {
///     heap.insert(&mut keys, item);
/// }
/// keys.keys[2] = 1;
/// heap.decrease_key(&mut keys, 2)?;
/// assert_eq!(heap.extract_min(&mut keys)?, 2);
/// assert_eq!(heap.extract_min(&mut keys)?, 1);
/// # Ok::<(), parkwalk_core::queue::QueueError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexedMinHeap {
    items: Vec<usize>,
}

impl IndexedMinHeap {
    /// Create an empty heap.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty heap with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` is currently queued.
    ///
    /// The slot recorded in `slots` is cross-checked against the heap, so a
    /// stale slot left by another heap is not mistaken for membership.
    pub fn contains<S: KeyedSlots>(&self, slots: &S, item: usize) -> bool {
        slots
            .slot(item)
            .is_some_and(|slot| self.items.get(slot) == Some(&item))
    }

    /// Queue `item` using its current key.
    pub fn insert<S: KeyedSlots>(&mut self, slots: &mut S, item: usize) {
        let slot = self.items.len();
        self.items.push(item);
        slots.set_slot(item, Some(slot));
        self.sift_up(slots, slot);
    }

    /// Remove and return the item with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] when no items are queued.
    pub fn extract_min<S: KeyedSlots>(&mut self, slots: &mut S) -> Result<usize, QueueError> {
        if self.items.is_empty() {
            return Err(QueueError::Empty);
        }
        let min = self.items.swap_remove(0);
        slots.set_slot(min, None);
        if let Some(&moved) = self.items.first() {
            slots.set_slot(moved, Some(0));
            self.sift_down(slots, 0);
        }
        Ok(min)
    }

    /// Restore heap order after the key of a queued `item` decreased.
    ///
    /// Callers must only lower keys; raising one leaves the heap unordered.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NotQueued`] when `item` is not in this heap.
    pub fn decrease_key<S: KeyedSlots>(
        &mut self,
        slots: &mut S,
        item: usize,
    ) -> Result<(), QueueError> {
        let slot = slots
            .slot(item)
            .filter(|&slot| self.items.get(slot) == Some(&item))
            .ok_or(QueueError::NotQueued { item })?;
        self.sift_up(slots, slot);
        Ok(())
    }

    fn sift_up<S: KeyedSlots>(&mut self, slots: &mut S, start: usize) {
        let mut slot = start;
        while slot > 0 {
            let parent = (slot - 1) >> 1;
            if !self.less(slots, slot, parent) {
                break;
            }
            self.swap(slots, slot, parent);
            slot = parent;
        }
    }

    fn sift_down<S: KeyedSlots>(&mut self, slots: &mut S, start: usize) {
        let mut slot = start;
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.items.len() && self.less(slots, left, smallest) {
                smallest = left;
            }
            if right < self.items.len() && self.less(slots, right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slots, slot, smallest);
            slot = smallest;
        }
    }

    fn less<S: KeyedSlots>(&self, slots: &S, a: usize, b: usize) -> bool {
        match (self.items.get(a), self.items.get(b)) {
            (Some(&lhs), Some(&rhs)) => slots.key(lhs) < slots.key(rhs),
            _ => false,
        }
    }

    fn swap<S: KeyedSlots>(&mut self, slots: &mut S, a: usize, b: usize) {
        self.items.swap(a, b);
        if let Some(&item) = self.items.get(a) {
            slots.set_slot(item, Some(a));
        }
        if let Some(&item) = self.items.get(b) {
            slots.set_slot(item, Some(b));
        }
    }
}
