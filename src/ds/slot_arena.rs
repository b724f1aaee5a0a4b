//! Generational slot arena for per-slot replacement metadata.
//!
//! The host cache owns one arena entry per tracked slot. The policy engine
//! never owns entries; it keeps [`SlotId`]s. Every slot carries a generation
//! that is bumped when the slot is freed, so an id that outlived its slot
//! resolves to `None` instead of aliasing whatever reused the index.
//!
//! ```text
//!   slots:  [ g0:Some(a) | g1:None | g0:Some(c) ]      free_list: [1]
//!              ▲
//!   SlotId { index: 0, generation: 0 } ──┘  (live)
//!   SlotId { index: 1, generation: 0 }      (stale: slot 1 is now g1)
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Id for position `index` in a plain `Vec`-backed store (generation 0).
    pub fn from_index(index: usize) -> Self {
        let index = u32::try_from(index).unwrap_or_else(|_| panic!("slot index {index} exceeds u32"));
        Self::new(index, 0)
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            SlotId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len())
                .unwrap_or_else(|_| panic!("slot arena exceeds u32::MAX slots"));
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            SlotId::new(idx, 0)
        };
        self.len += 1;
        id
    }

    /// Frees the slot and invalidates every outstanding copy of `id`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every value. Generations survive, so old ids stay stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(idx as u32);
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (SlotId::new(idx as u32, slot.generation), value))
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_index_with_new_generation() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);

        let id3 = arena.insert("c");
        assert_eq!(id1.index(), id3.index());
        assert_ne!(id1.generation(), id3.generation());
        assert_eq!(arena.get(id3), Some(&"c"));
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut arena = SlotArena::new();
        let old = arena.insert(1u32);
        arena.remove(old);
        let new = arena.insert(2u32);

        assert!(!arena.contains(old));
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get_mut(old), None);
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn clear_invalidates_all_ids() {
        let mut arena = SlotArena::with_capacity(4);
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.clear();
        assert!(arena.is_empty());
        for id in &ids {
            assert!(!arena.contains(*id));
        }

        let fresh = arena.insert(9);
        assert_eq!(fresh.index(), 0);
        assert_eq!(arena.get(fresh), Some(&9));
        assert_eq!(arena.ids().count(), 1);
    }

    #[test]
    fn iter_yields_live_slots_in_index_order() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let seen: Vec<_> = arena.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(seen, vec![(a, 'a'), (c, 'c')]);
    }

    #[test]
    fn from_index_matches_vec_position() {
        let id = SlotId::from_index(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.generation(), 0);
    }
}
