//! Seams between the replacement policy and its host.
//!
//! A host cache owns the slots and their replacement metadata; a policy only
//! decides how metadata changes and which slot to evict. The two meet at
//! [`EntryStore`] (how the policy reaches a slot's metadata) and
//! [`ReplacementPolicy`] (the lifecycle calls the host makes).
//!
//! ```text
//!   ┌──────────── host cache ────────────┐
//!   │  slot 0  slot 1  slot 2  ...       │       ┌──────────────────────┐
//!   │  meta    meta    meta     ◄────────┼───────┤  ReplacementPolicy   │
//!   │  (EntryStore<E>)                   │ SlotId│  reset / touch /     │
//!   └────────────────────────────────────┘       │  invalidate / victim │
//!                                                └──────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use seglru::ds::{SlotArena, SlotId};
//! use seglru::policy::slru::SlruPolicy;
//! use seglru::traits::ReplacementPolicy;
//!
//! // A host written against the trait, not a concrete policy.
//! fn fill<P: ReplacementPolicy>(
//!     policy: &mut P,
//!     store: &mut SlotArena<P::Entry>,
//!     set: &[SlotId],
//! ) -> SlotId {
//!     let victim = policy.victim(store, set);
//!     policy.reset(store, victim);
//!     victim
//! }
//!
//! let mut policy = SlruPolicy::new(1, 3);
//! let mut store = SlotArena::new();
//! let set: Vec<SlotId> = (0..4).map(|_| store.insert(policy.instantiate_entry())).collect();
//!
//! let slot = fill(&mut policy, &mut store, &set);
//! assert!(set.contains(&slot));
//! ```

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Slot-indexed storage of per-slot replacement metadata, owned by the host.
pub trait EntryStore<E> {
    /// Returns the metadata for `slot`, or `None` if the store does not hold it.
    fn entry(&self, slot: SlotId) -> Option<&E>;

    fn entry_mut(&mut self, slot: SlotId) -> Option<&mut E>;

    /// Visits every live slot. Used by consistency checks.
    fn for_each_entry(&self, f: &mut dyn FnMut(SlotId, &E));
}

impl<E> EntryStore<E> for SlotArena<E> {
    #[inline]
    fn entry(&self, slot: SlotId) -> Option<&E> {
        self.get(slot)
    }

    #[inline]
    fn entry_mut(&mut self, slot: SlotId) -> Option<&mut E> {
        self.get_mut(slot)
    }

    fn for_each_entry(&self, f: &mut dyn FnMut(SlotId, &E)) {
        for (slot, entry) in self.iter() {
            f(slot, entry);
        }
    }
}

/// Fixed slot tables: a slot's id is its position (generation 0).
impl<E> EntryStore<E> for [E] {
    #[inline]
    fn entry(&self, slot: SlotId) -> Option<&E> {
        if slot.generation() != 0 {
            return None;
        }
        self.get(slot.index())
    }

    #[inline]
    fn entry_mut(&mut self, slot: SlotId) -> Option<&mut E> {
        if slot.generation() != 0 {
            return None;
        }
        self.get_mut(slot.index())
    }

    fn for_each_entry(&self, f: &mut dyn FnMut(SlotId, &E)) {
        for (idx, entry) in self.iter().enumerate() {
            f(SlotId::from_index(idx), entry);
        }
    }
}

impl<E> EntryStore<E> for Vec<E> {
    #[inline]
    fn entry(&self, slot: SlotId) -> Option<&E> {
        self.as_slice().entry(slot)
    }

    #[inline]
    fn entry_mut(&mut self, slot: SlotId) -> Option<&mut E> {
        self.as_mut_slice().entry_mut(slot)
    }

    fn for_each_entry(&self, f: &mut dyn FnMut(SlotId, &E)) {
        self.as_slice().for_each_entry(f)
    }
}

/// Lifecycle calls a host cache makes into its replacement policy.
///
/// - `instantiate_entry`: once per slot, when the slot starts being tracked.
/// - `reset`: when the slot is refilled with new contents.
/// - `touch`: on every hit.
/// - `invalidate`: when the contents are dropped without a refill.
/// - `victim`: when the host needs one slot out of `candidates` to evict.
pub trait ReplacementPolicy {
    /// Per-slot metadata type.
    type Entry;

    fn instantiate_entry(&self) -> Self::Entry;

    fn reset<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<Self::Entry> + ?Sized;

    fn touch<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<Self::Entry> + ?Sized;

    fn invalidate<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<Self::Entry> + ?Sized;

    /// Picks the slot to evict.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty.
    fn victim<S>(&mut self, store: &mut S, candidates: &[SlotId]) -> SlotId
    where
        S: EntryStore<Self::Entry> + ?Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_store_rejects_out_of_range_and_foreign_generations() {
        let mut table = vec![10u8, 20, 30];
        assert_eq!(table.entry(SlotId::from_index(1)), Some(&20));
        assert_eq!(table.entry(SlotId::from_index(3)), None);
        assert_eq!(table.entry(SlotId::new(0, 1)), None);

        *table.entry_mut(SlotId::from_index(2)).unwrap() = 31;
        assert_eq!(table[2], 31);
    }

    #[test]
    fn arena_store_visits_live_slots_only() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1u8);
        let b = arena.insert(2u8);
        arena.remove(a);

        let mut seen = Vec::new();
        arena.for_each_entry(&mut |slot, v| seen.push((slot, *v)));
        assert_eq!(seen, vec![(b, 2)]);
        assert_eq!(EntryStore::entry(&arena, a), None);
    }
}
