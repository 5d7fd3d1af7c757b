//! Generational arena with insertion-order traversal
//!
//! Handles stay valid until their entry is removed; a stale handle simply
//! resolves to `None`. Traversal follows insertion order, which is also the
//! eviction order when the pool grows past its soft cap.

use std::collections::VecDeque;

/// Stable reference to a pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    /// Live handles, oldest first
    order: VecDeque<Handle>,
    max_len: usize,
}

impl<T> Pool<T> {
    /// Empty pool that keeps at most `max_len` entries after [`Pool::evict_overflow`]
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_len + 1),
            free: Vec::new(),
            order: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert as the newest entry
    pub fn insert(&mut self, value: T) -> Handle {
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                Handle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                Handle {
                    index,
                    generation: 0,
                }
            }
        };
        self.order.push_back(handle);
        handle
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Remove an entry; stale handles return `None`
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        if let Some(pos) = self.order.iter().position(|h| *h == handle) {
            self.order.remove(pos);
        }
        Some(value)
    }

    /// Handle of the oldest live entry
    pub fn oldest(&self) -> Option<Handle> {
        self.order.front().copied()
    }

    /// Remove oldest entries until at most `max_len` remain; returns how many were evicted
    pub fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;
        while self.order.len() > self.max_len {
            let Some(oldest) = self.order.front().copied() else {
                break;
            };
            self.remove(oldest);
            evicted += 1;
        }
        evicted
    }

    /// Snapshot of live handles, oldest first
    ///
    /// Safe to iterate while inserting or removing.
    pub fn handles(&self) -> Vec<Handle> {
        self.order.iter().copied().collect()
    }

    /// Live entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.order
            .iter()
            .filter_map(|h| self.get(*h).map(|v| (*h, v)))
    }

    /// Remove every entry matching `pred`; returns how many were removed
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let doomed: Vec<Handle> = self
            .iter()
            .filter(|(_, v)| pred(*v))
            .map(|(h, _)| h)
            .collect();
        for handle in &doomed {
            self.remove(*handle);
        }
        doomed.len()
    }
}
