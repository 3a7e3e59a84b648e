//! Growable storage for the operand and call-frame stacks.

use crate::VmConfig;

/// A LIFO stack whose capacity doubles when full and halves once
/// utilization has stayed at or below a third for `patience` consecutive
/// operations. Capacity never shrinks below `floor`.
#[derive(Clone, Debug)]
pub struct GrowableStack<T> {
    items: Vec<T>,
    floor: usize,
    patience: u32,
    low_streak: u32,
}

impl<T: Copy> GrowableStack<T> {
    pub fn new(initial_capacity: usize, floor: usize, patience: u32) -> Self {
        GrowableStack {
            items: Vec::with_capacity(initial_capacity),
            floor,
            patience,
            low_streak: 0,
        }
    }

    pub fn from_config(config: &VmConfig) -> Self {
        Self::new(
            config.initial_stack_capacity,
            config.stack_floor,
            config.shrink_patience,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn push(&mut self, value: T) {
        if self.items.len() == self.items.capacity() {
            let extra = self.items.capacity().max(1);
            self.items.reserve_exact(extra);
            tracing::trace!(capacity = self.items.capacity(), "stack grown");
        }
        self.items.push(value);
        self.note_utilization();
    }

    pub fn pop(&mut self) -> Option<T> {
        let value = self.items.pop();
        self.note_utilization();
        value
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }

    /// Overwrite an existing slot. Returns `false` if `index` is not live.
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn last(&self) -> Option<T> {
        self.items.last().copied()
    }

    /// Drop everything above `len`. Returns `false`, changing nothing, if
    /// the stack is shorter than `len`.
    pub fn truncate(&mut self, len: usize) -> bool {
        if len > self.items.len() {
            return false;
        }
        self.items.truncate(len);
        self.note_utilization();
        true
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn note_utilization(&mut self) {
        let capacity = self.items.capacity();
        if capacity <= self.floor || self.items.len() > capacity / 3 {
            self.low_streak = 0;
            return;
        }
        self.low_streak += 1;
        if self.low_streak >= self.patience {
            let target = (capacity / 2).max(self.floor);
            self.items.shrink_to(target);
            self.low_streak = 0;
            tracing::trace!(capacity = self.items.capacity(), "stack shrunk");
        }
    }
}

#[cfg(test)]
mod tests;
