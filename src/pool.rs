use macroquad::prelude::Vec2;

/// Stable index of a pool slot. Handles are never invalidated: a released
/// slot keeps its index and is handed out again by a later acquire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Anything that can live in a pool needs a settable position.
pub trait Pooled: Default {
    fn place(&mut self, position: Vec2);
}

/// Recycling arena.
///
/// Slots are toggled active/inactive instead of allocated and dropped.
/// Released indices go on a free list; `acquire` always reuses the lowest
/// free index so iteration and handout order stay deterministic.
pub struct Pool<T> {
    items: Vec<T>,
    active: Vec<bool>,
    free_list: Vec<usize>,
}

impl<T: Pooled> Pool<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            active: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Pre-allocates `capacity` inactive slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self::new();
        for i in 0..capacity {
            pool.items.push(T::default());
            pool.active.push(false);
            pool.free_list.push(i);
        }
        pool
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    /// Hands out an inactive slot placed at `position`, or `None` when every
    /// slot is in use.
    pub fn acquire(&mut self, position: Vec2) -> Option<Handle> {
        let slot = self.take_lowest_free()?;
        self.items[slot].place(position);
        self.active[slot] = true;
        Some(Handle(slot))
    }

    /// Like [`Pool::acquire`] but appends a new slot when the pool is
    /// exhausted.
    pub fn acquire_or_grow(&mut self, position: Vec2) -> Handle {
        if let Some(handle) = self.acquire(position) {
            return handle;
        }
        let mut item = T::default();
        item.place(position);
        self.items.push(item);
        self.active.push(true);
        Handle(self.items.len() - 1)
    }

    /// Marks the slot inactive. Returns `false` if it already was (or the
    /// handle is unknown), in which case nothing changes.
    pub fn release(&mut self, handle: Handle) -> bool {
        match self.active.get_mut(handle.0) {
            Some(active) if *active => {
                *active = false;
                self.free_list.push(handle.0);
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, handle: Handle) -> bool {
        self.active.get(handle.0).copied().unwrap_or(false)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        if self.is_active(handle) {
            self.items.get(handle.0)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if self.is_active(handle) {
            self.items.get_mut(handle.0)
        } else {
            None
        }
    }

    /// Active slots in creation order.
    pub fn iter_active(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.items
            .iter()
            .zip(self.active.iter())
            .enumerate()
            .filter(|(_, (_, active))| **active)
            .map(|(i, (item, _))| (Handle(i), item))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.items
            .iter_mut()
            .zip(self.active.iter())
            .enumerate()
            .filter(|(_, (_, active))| **active)
            .map(|(i, (item, _))| (Handle(i), item))
    }

    fn take_lowest_free(&mut self) -> Option<usize> {
        let (pos, _) = self
            .free_list
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| **slot)?;
        Some(self.free_list.swap_remove(pos))
    }
}

impl<T: Pooled> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
