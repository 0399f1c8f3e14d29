//! Generational slot storage.
//!
//! Handles are `(generation, index)` pairs packed into a `NonZeroU64`. Removing
//! an entry bumps the slot's generation, so a handle that outlives its entry is
//! detected instead of silently aliasing whatever reuses the slot.

use crate::profiling::profile_function;
use std::num::NonZeroU64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexSlot(NonZeroU64);

impl IndexSlot {
    pub fn new(generation: u32, idx: u32) -> Self {
        // The low word stores `idx + 1` so it is never zero.
        let raw = ((generation as u64) << 32) | (idx as u64 + 1);
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }

    /// Raw packed representation, stable for the lifetime of the entry.
    pub fn to_bits(&self) -> u64 {
        self.0.get()
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

pub struct SparseSet<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> SparseSet<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn push(&mut self, data: T) -> IndexSlot {
        profile_function!();
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(data);
            IndexSlot::new(slot.generation, idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(data),
            });
            IndexSlot::new(0, idx)
        }
    }

    fn slot(&self, idx: IndexSlot) -> Option<&Slot<T>> {
        self.slots
            .get(idx.index() as usize)
            .filter(|slot| slot.generation == idx.generation())
    }

    fn slot_mut(&mut self, idx: IndexSlot) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(idx.index() as usize)
            .filter(|slot| slot.generation == idx.generation())
    }

    /// Returns true if `idx` refers to a live entry.
    pub fn contains(&self, idx: IndexSlot) -> bool {
        self.try_get(idx).is_some()
    }

    pub fn get(&self, idx: IndexSlot) -> &T {
        match self.try_get(idx) {
            Some(value) => value,
            None => panic!("invalid generation, use after free! ({idx:?})"),
        }
    }

    pub fn get_mut(&mut self, idx: IndexSlot) -> &mut T {
        match self.try_get_mut(idx) {
            Some(value) => value,
            None => panic!("invalid generation, use after free! ({idx:?})"),
        }
    }

    pub fn try_get(&self, idx: IndexSlot) -> Option<&T> {
        self.slot(idx).and_then(|slot| slot.value.as_ref())
    }

    pub fn try_get_mut(&mut self, idx: IndexSlot) -> Option<&mut T> {
        self.slot_mut(idx).and_then(|slot| slot.value.as_mut())
    }

    pub fn remove(&mut self, idx: IndexSlot) -> T {
        match self.try_remove(idx) {
            Some(value) => value,
            None => panic!("invalid generation, use after free! ({idx:?})"),
        }
    }

    pub fn try_remove(&mut self, idx: IndexSlot) -> Option<T> {
        profile_function!();
        let slot = self.slot_mut(idx)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx.index());
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (IndexSlot, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (IndexSlot::new(slot.generation, idx as u32), value))
        })
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_eq_size!(IndexSlot, Option<IndexSlot>);
