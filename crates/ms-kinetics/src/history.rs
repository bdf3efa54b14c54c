//! Fixed-capacity ring buffer of precursor vectors.
//!
//! Entries are stored back to back in one flat buffer. `head` is the slot of the
//! oldest entry; once the buffer is full every push overwrites that slot and
//! moves `head` forward, so pushes never allocate.

use crate::error::{KineticsError, KineticsResult};
use ms_core::ensure_len;

#[derive(Debug, Clone, PartialEq)]
pub struct PrecursorHistory {
    groups: usize,
    capacity: usize,
    data: Vec<f64>,
    head: usize,
    len: usize,
}

impl PrecursorHistory {
    /// Empty history holding up to `capacity` vectors of `groups` entries.
    pub fn new(capacity: usize, groups: usize) -> KineticsResult<Self> {
        if capacity == 0 {
            return Err(KineticsError::InvalidArg {
                what: "history capacity must be positive",
            });
        }
        if groups == 0 {
            return Err(KineticsError::InvalidArg {
                what: "at least one precursor group is required",
            });
        }
        Ok(Self {
            groups,
            capacity,
            data: vec![0.0; capacity * groups],
            head: 0,
            len: 0,
        })
    }

    /// Full history where every slot holds `initial`.
    pub fn filled(capacity: usize, initial: &[f64]) -> KineticsResult<Self> {
        let mut history = Self::new(capacity, initial.len())?;
        for slot in history.data.chunks_exact_mut(initial.len()) {
            slot.copy_from_slice(initial);
        }
        history.len = capacity;
        Ok(history)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Append a vector, evicting the oldest one when full.
    pub fn push(&mut self, values: &[f64]) -> KineticsResult<()> {
        ensure_len(values.len(), self.groups, "precursor vector")?;
        self.record(values);
        Ok(())
    }

    /// `push` for callers whose vectors have `groups` entries by construction.
    pub(crate) fn record(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.groups);
        let slot = if self.len == self.capacity {
            let slot = self.head;
            self.head = (self.head + 1) % self.capacity;
            slot
        } else {
            let slot = (self.head + self.len) % self.capacity;
            self.len += 1;
            slot
        };
        for (dst, v) in self.slot_mut(slot).iter_mut().zip(values) {
            *dst = *v;
        }
    }

    /// Entry `age` pushes back; age 0 is the newest.
    pub fn get(&self, age: usize) -> Option<&[f64]> {
        if age >= self.len {
            return None;
        }
        let slot = (self.head + self.len - 1 - age) % self.capacity;
        Some(self.slot(slot))
    }

    pub fn newest(&self) -> Option<&[f64]> {
        self.get(0)
    }

    pub fn oldest(&self) -> Option<&[f64]> {
        self.len.checked_sub(1).and_then(|age| self.get(age))
    }

    /// Delayed read for a lag of `steps`.
    ///
    /// Returns the `steps`-th most recent entry counting the newest as the first.
    /// A lag of zero, or one longer than the history, reads the oldest entry.
    pub fn lagged(&self, steps: usize) -> Option<&[f64]> {
        (!self.is_empty()).then(|| self.delayed(steps))
    }

    /// `lagged` for a history that is never empty, such as one built by
    /// `filled`. An empty history reads the zeroed slot before `head`.
    pub(crate) fn delayed(&self, steps: usize) -> &[f64] {
        let age = if steps == 0 || steps > self.len {
            self.len.saturating_sub(1)
        } else {
            steps - 1
        };
        let slot = (self.head + self.capacity + self.len - 1 - age) % self.capacity;
        self.slot(slot)
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.len).rev().filter_map(move |age| self.get(age))
    }

    fn slot(&self, slot: usize) -> &[f64] {
        &self.data[slot * self.groups..(slot + 1) * self.groups]
    }

    fn slot_mut(&mut self, slot: usize) -> &mut [f64] {
        &mut self.data[slot * self.groups..(slot + 1) * self.groups]
    }
}
