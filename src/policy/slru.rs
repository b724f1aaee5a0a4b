//! Segmented LRU (SLRU) replacement policy.
//!
//! Splits tracked slots into two segments. New contents start in
//! **probation**; a hit promotes the slot into the capacity-bounded
//! **protected** segment. Victims come from probation first, so a burst of
//! one-time fills cannot flush slots that have proven reuse.
//!
//! The policy does not own slots. The host keeps one [`SlruEntry`] per slot in
//! an [`EntryStore`] and hands the engine [`SlotId`]s; the engine keeps only
//! the ids of protected slots.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                          SlruPolicy<C> Layout                            │
//! │                                                                          │
//! │   host EntryStore (owned by the cache)         engine state              │
//! │   ┌────────┬──────────────────────────┐   ┌──────────────────────────┐   │
//! │   │ SlotId │ SlruEntry                │   │ protected: Vec<SlotId>   │   │
//! │   ├────────┼──────────────────────────┤   │  (insertion order)       │   │
//! │   │ s0     │ Probation,  t0 (epoch)   │   │                          │   │
//! │   │ s1     │ Protected,  t7           │◄──┤  [s1, s3]                │   │
//! │   │ s2     │ Probation,  t5           │   │                          │   │
//! │   │ s3     │ Protected,  t9           │◄──┤  protected_capacity = 2  │   │
//! │   └────────┴──────────────────────────┘   └──────────────────────────┘   │
//! │                                                                          │
//! │   slot ∈ protected  ⇔  entry.segment == Protected                        │
//! └──────────────────────────────────────────────────────────────────────────┘
//!
//! touch(slot)
//! ───────────
//!   Protected               → last_touch = now
//!   Probation, room left    → promote (append to protected)
//!   Probation, segment full → demote the protected member with the oldest
//!                             last_touch (earliest inserted on ties),
//!                             promote slot in its place
//!   always                  → last_touch = now
//!
//! victim(candidates)
//! ──────────────────
//!   oldest Probation candidate, if any
//!   else, per VictimFallback:
//!     DemoteProtected → demote oldest Protected candidate (stamped now), return it
//!     Strict          → panic
//! ```
//!
//! ## Operations
//!
//! | Operation    | Time          | Notes                                       |
//! |--------------|---------------|---------------------------------------------|
//! | `touch`      | O(protected)  | Linear scan only when a swap is needed      |
//! | `reset`      | O(protected)  | Membership removal if protected             |
//! | `invalidate` | O(protected)  | Same as reset, stamps the epoch             |
//! | `victim`     | O(candidates) | Plus membership removal on fallback         |
//!
//! Segments are bounded by cache associativity, so linear scans beat an
//! ordered structure here.
//!
//! ## Example Usage
//!
//! ```
//! use seglru::ds::SlotArena;
//! use seglru::policy::slru::{Segment, SlruPolicy};
//!
//! let mut policy = SlruPolicy::new(2, 2);
//! let mut store = SlotArena::new();
//! let a = store.insert(policy.instantiate_entry());
//! let b = store.insert(policy.instantiate_entry());
//! let c = store.insert(policy.instantiate_entry());
//!
//! policy.touch(&mut store, a);
//! policy.touch(&mut store, b);
//! policy.touch(&mut store, c); // protected is full: `a` is demoted
//!
//! assert_eq!(store.get(a).unwrap().segment(), Segment::Probation);
//! assert_eq!(policy.protected_slots(), &[b, c]);
//! assert_eq!(policy.victim(&mut store, &[a, b, c]), a);
//! ```
//!
//! ## Thread Safety
//!
//! - [`SlruPolicy`]: single-threaded, mutation through `&mut self`.
//! - `ConcurrentSlruPolicy` (feature `concurrency`): engine and store behind a
//!   single `parking_lot::RwLock`.
//!
//! ## References
//!
//! - Karedla et al., "Caching Strategies to Improve Disk System Performance", 1994

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::builder::{SlruConfig, SlruPolicyBuilder};
use crate::clock::{Clock, LogicalClock, Tick};
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SlruPolicyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SlruPolicyMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider, SlruPolicyMetricsRecorder};
use crate::traits::{EntryStore, ReplacementPolicy};

#[cfg(feature = "concurrency")]
use crate::ds::slot_arena::SlotArena;
#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Per-slot metadata
// ---------------------------------------------------------------------------

/// Which segment a slot belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Not yet proven to be reused. Preferred eviction source.
    #[default]
    Probation,
    /// Reused at least once; bounded by the protected capacity.
    Protected,
}

/// Replacement metadata for one slot.
///
/// Created by [`SlruPolicy::instantiate_entry`], stored by the host, and
/// mutated only by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlruEntry {
    segment: Segment,
    last_touch: Tick,
}

impl SlruEntry {
    /// Probation, stamped with [`Tick::EPOCH`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            segment: Segment::Probation,
            last_touch: Tick::EPOCH,
        }
    }

    #[inline]
    pub fn segment(&self) -> Segment {
        self.segment
    }

    #[inline]
    pub fn last_touch(&self) -> Tick {
        self.last_touch
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        self.segment == Segment::Protected
    }

    #[inline]
    pub fn is_probation(&self) -> bool {
        self.segment == Segment::Probation
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// What [`SlruPolicy::victim`] does when no candidate is in probation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VictimFallback {
    /// Demote the oldest protected candidate and evict it.
    #[default]
    DemoteProtected,
    /// Treat a candidate set without probation entries as a caller bug and panic.
    Strict,
}

/// Segmented LRU replacement engine.
///
/// Holds the protected membership (slot ids in insertion order) and the
/// capacities. Every operation takes the host's [`EntryStore`].
///
/// # Panics
///
/// Every operation except [`forget`](Self::forget) panics when given a slot
/// the store does not hold. Hosts must call [`invalidate`](Self::invalidate)
/// or [`forget`](Self::forget) before freeing a slot.
pub struct SlruPolicy<C = LogicalClock> {
    /// Protected members, oldest insertion first.
    protected: Vec<SlotId>,
    protected_capacity: usize,
    /// Reported, never enforced: probation is every slot not in `protected`.
    probation_capacity: usize,
    fallback: VictimFallback,
    clock: C,
    #[cfg(feature = "metrics")]
    metrics: SlruPolicyMetrics,
}

impl SlruPolicy<LogicalClock> {
    /// Creates an engine driven by its own [`LogicalClock`].
    ///
    /// # Example
    ///
    /// ```
    /// use seglru::policy::slru::SlruPolicy;
    ///
    /// let policy = SlruPolicy::new(4, 12);
    /// assert_eq!(policy.protected_capacity(), 4);
    /// assert_eq!(policy.probation_capacity(), 12);
    /// assert_eq!(policy.protected_len(), 0);
    /// ```
    pub fn new(protected_capacity: usize, probation_capacity: usize) -> Self {
        Self::with_clock(protected_capacity, probation_capacity, LogicalClock::new())
    }

    /// Starts a [`SlruPolicyBuilder`] with the given protected capacity.
    pub fn builder(protected_capacity: usize) -> SlruPolicyBuilder {
        SlruPolicyBuilder::new(protected_capacity)
    }
}

impl<C: Clock> SlruPolicy<C> {
    pub fn with_clock(protected_capacity: usize, probation_capacity: usize, clock: C) -> Self {
        Self::with_config(
            SlruConfig {
                protected_capacity,
                probation_capacity,
                ..SlruConfig::default()
            },
            clock,
        )
    }

    pub fn with_config(config: SlruConfig, clock: C) -> Self {
        debug!(
            protected_capacity = config.protected_capacity,
            probation_capacity = config.probation_capacity,
            fallback = ?config.victim_fallback,
            "slru policy created"
        );
        Self {
            protected: Vec::with_capacity(config.protected_capacity),
            protected_capacity: config.protected_capacity,
            probation_capacity: config.probation_capacity,
            fallback: config.victim_fallback,
            clock,
            #[cfg(feature = "metrics")]
            metrics: SlruPolicyMetrics::default(),
        }
    }

    /// Fresh metadata for a newly tracked slot. Does not change engine state.
    #[inline]
    pub fn instantiate_entry(&self) -> SlruEntry {
        SlruEntry::new()
    }

    /// The slot was refilled: back to probation, stamped with the current tick.
    pub fn reset<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        let now = self.clock.now();
        let was_protected = self.leave_protected(store, slot);
        entry_mut(store, slot).last_touch = now;

        #[cfg(feature = "metrics")]
        self.metrics.record_reset(was_protected);
        #[cfg(not(feature = "metrics"))]
        let _ = was_protected;

        debug_assert_invariants(self, &*store);
    }

    /// The slot's contents are gone: back to probation, stamped with the epoch
    /// so it sorts as the stalest slot in any later comparison.
    pub fn invalidate<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        let was_protected = self.leave_protected(store, slot);
        entry_mut(store, slot).last_touch = Tick::EPOCH;

        #[cfg(feature = "metrics")]
        self.metrics.record_invalidate(was_protected);
        #[cfg(not(feature = "metrics"))]
        let _ = was_protected;

        debug_assert_invariants(self, &*store);
    }

    /// Records a hit on `slot`.
    ///
    /// A probation slot is promoted. When the protected segment is full, the
    /// member with the oldest `last_touch` is demoted to make room (the
    /// earliest inserted wins a tie). With a protected capacity of zero the
    /// slot stays in probation.
    pub fn touch<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        let now = self.clock.now();
        let segment = entry_ref(&*store, slot).segment;

        match segment {
            Segment::Protected => {
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_protected();
            },
            Segment::Probation if self.protected.len() < self.protected_capacity => {
                self.promote(store, slot);
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_promoted();
            },
            Segment::Probation if !self.protected.is_empty() => {
                let pos = self.oldest_member(&*store);
                let demoted = self.protected.remove(pos);
                entry_mut(store, demoted).segment = Segment::Probation;
                trace!(demoted = ?demoted, promoted = ?slot, "protected segment full, swapped");
                self.promote(store, slot);
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_swapped();
            },
            Segment::Probation => {
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_unpromoted();
            },
        }

        entry_mut(store, slot).last_touch = now;
        debug_assert_invariants(self, &*store);
    }

    /// Chooses the slot to evict from `candidates`.
    ///
    /// Returns the probation candidate with the oldest `last_touch` (first in
    /// `candidates` on ties). Without probation candidates, behaves according
    /// to the configured [`VictimFallback`].
    ///
    /// # Panics
    ///
    /// - `candidates` is empty.
    /// - No candidate is in probation and the fallback is
    ///   [`VictimFallback::Strict`].
    ///
    /// # Example
    ///
    /// ```
    /// use seglru::policy::slru::{Segment, SlruPolicy};
    /// use seglru::ds::SlotId;
    ///
    /// let mut policy = SlruPolicy::new(2, 0);
    /// let mut table = vec![policy.instantiate_entry(); 2];
    /// let (a, b) = (SlotId::from_index(0), SlotId::from_index(1));
    /// policy.touch(&mut table, a);
    /// policy.touch(&mut table, b);
    ///
    /// // Both protected: the oldest is demoted and returned.
    /// assert_eq!(policy.victim(&mut table, &[b, a]), a);
    /// assert_eq!(table[0].segment(), Segment::Probation);
    /// assert_eq!(policy.protected_len(), 1);
    /// ```
    pub fn victim<S>(&mut self, store: &mut S, candidates: &[SlotId]) -> SlotId
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        assert!(
            !candidates.is_empty(),
            "victim selection needs at least one candidate"
        );

        let mut oldest_probation: Option<(SlotId, Tick)> = None;
        let mut oldest_protected: Option<(SlotId, Tick)> = None;
        for &slot in candidates {
            let entry = entry_ref(&*store, slot);
            let oldest = match entry.segment {
                Segment::Probation => &mut oldest_probation,
                Segment::Protected => &mut oldest_protected,
            };
            if oldest.is_none_or(|(_, tick)| entry.last_touch < tick) {
                *oldest = Some((slot, entry.last_touch));
            }
        }

        let victim = match (oldest_probation, oldest_protected) {
            (Some((slot, _)), _) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_probation_victim();
                slot
            },
            (None, Some((slot, _))) => self.fallback_victim(store, slot, candidates.len()),
            (None, None) => unreachable!("a non-empty candidate set always has an oldest entry"),
        };

        debug_assert_invariants(self, &*store);
        victim
    }

    /// Drops `slot` from the protected membership, tolerating a slot the
    /// store no longer holds.
    ///
    /// For hosts that are about to free a slot (or already have). Returns
    /// whether the slot was a member. If the store still holds the slot, it
    /// ends in probation stamped with the epoch, as after `invalidate`.
    pub fn forget<S>(&mut self, store: &mut S, slot: SlotId) -> bool
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        let was_member = match self.protected.iter().position(|&m| m == slot) {
            Some(pos) => {
                self.protected.remove(pos);
                true
            },
            None => false,
        };
        if let Some(entry) = store.entry_mut(slot) {
            entry.segment = Segment::Probation;
            entry.last_touch = Tick::EPOCH;
        }
        was_member
    }

    /// Empties the protected membership. Entries are left as they are, so
    /// this is only for hosts that are discarding every slot.
    pub fn clear(&mut self) {
        self.protected.clear();
    }

    #[inline]
    pub fn protected_capacity(&self) -> usize {
        self.protected_capacity
    }

    #[inline]
    pub fn probation_capacity(&self) -> usize {
        self.probation_capacity
    }

    #[inline]
    pub fn protected_len(&self) -> usize {
        self.protected.len()
    }

    /// Protected members in insertion order.
    #[inline]
    pub fn protected_slots(&self) -> &[SlotId] {
        &self.protected
    }

    #[inline]
    pub fn is_protected(&self, slot: SlotId) -> bool {
        self.protected.contains(&slot)
    }

    #[inline]
    pub fn victim_fallback(&self) -> VictimFallback {
        self.fallback
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Verifies the membership against the store.
    ///
    /// Checks that membership fits the capacity, holds no duplicates, names
    /// only live protected slots, and that the store has no protected slot
    /// outside the membership.
    pub fn check_invariants<S>(&self, store: &S) -> Result<(), InvariantError>
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        if self.protected.len() > self.protected_capacity {
            return Err(InvariantError::new(format!(
                "protected membership holds {} slots, capacity is {}",
                self.protected.len(),
                self.protected_capacity
            )));
        }

        let mut seen = FxHashSet::default();
        for &slot in &self.protected {
            if !seen.insert(slot) {
                return Err(InvariantError::new(format!(
                    "slot {slot:?} listed twice in protected membership"
                )));
            }
            match store.entry(slot) {
                None => {
                    return Err(InvariantError::new(format!(
                        "protected membership names untracked slot {slot:?}"
                    )));
                },
                Some(entry) if !entry.is_protected() => {
                    return Err(InvariantError::new(format!(
                        "slot {slot:?} is a protected member but its entry is in probation"
                    )));
                },
                Some(_) => {},
            }
        }

        let mut stray = None;
        store.for_each_entry(&mut |slot, entry| {
            if stray.is_none() && entry.is_protected() && !seen.contains(&slot) {
                stray = Some(slot);
            }
        });
        if let Some(slot) = stray {
            return Err(InvariantError::new(format!(
                "slot {slot:?} is marked protected but missing from membership"
            )));
        }

        Ok(())
    }

    /// Removes `slot` from protected (if there) and marks it probation.
    fn leave_protected<S>(&mut self, store: &mut S, slot: SlotId) -> bool
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        let entry = entry_mut(store, slot);
        let was_protected = entry.is_protected();
        entry.segment = Segment::Probation;
        if was_protected {
            let pos = self.protected.iter().position(|&m| m == slot);
            debug_assert!(pos.is_some(), "protected slot {slot:?} missing from membership");
            if let Some(pos) = pos {
                self.protected.remove(pos);
            }
        }
        was_protected
    }

    fn promote<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        entry_mut(store, slot).segment = Segment::Protected;
        self.protected.push(slot);
    }

    /// Position of the member with the smallest `last_touch`; earliest wins ties.
    fn oldest_member<S>(&self, store: &S) -> usize
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        self.protected
            .iter()
            .enumerate()
            .min_by_key(|&(_, &slot)| entry_ref(store, slot).last_touch)
            .map(|(pos, _)| pos)
            .unwrap_or_else(|| unreachable!("swap requires a non-empty protected segment"))
    }

    fn fallback_victim<S>(&mut self, store: &mut S, slot: SlotId, candidates: usize) -> SlotId
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        match self.fallback {
            VictimFallback::Strict => panic!(
                "no probation entry among {candidates} victim candidates (strict fallback)"
            ),
            VictimFallback::DemoteProtected => {
                let now = self.clock.now();
                self.leave_protected(store, slot);
                entry_mut(store, slot).last_touch = now;
                trace!(victim = ?slot, "no probation candidate, evicting oldest protected");
                #[cfg(feature = "metrics")]
                self.metrics.record_protected_victim();
                slot
            },
        }
    }
}

#[inline]
fn entry_ref<S>(store: &S, slot: SlotId) -> &SlruEntry
where
    S: EntryStore<SlruEntry> + ?Sized,
{
    store
        .entry(slot)
        .unwrap_or_else(|| panic!("slot {slot:?} is not held by the entry store"))
}

#[inline]
fn entry_mut<S>(store: &mut S, slot: SlotId) -> &mut SlruEntry
where
    S: EntryStore<SlruEntry> + ?Sized,
{
    store
        .entry_mut(slot)
        .unwrap_or_else(|| panic!("slot {slot:?} is not held by the entry store"))
}

#[inline]
fn debug_assert_invariants<C, S>(policy: &SlruPolicy<C>, store: &S)
where
    C: Clock,
    S: EntryStore<SlruEntry> + ?Sized,
{
    if cfg!(debug_assertions) {
        if let Err(err) = policy.check_invariants(store) {
            panic!("slru invariant violated: {err}");
        }
    }
}

impl<C> fmt::Debug for SlruPolicy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlruPolicy")
            .field("protected_capacity", &self.protected_capacity)
            .field("probation_capacity", &self.probation_capacity)
            .field("protected_len", &self.protected.len())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl Default for SlruPolicy<LogicalClock> {
    /// Zero capacities: nothing is ever promoted.
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<C: Clock> ReplacementPolicy for SlruPolicy<C> {
    type Entry = SlruEntry;

    #[inline]
    fn instantiate_entry(&self) -> SlruEntry {
        SlruPolicy::instantiate_entry(self)
    }

    #[inline]
    fn reset<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        SlruPolicy::reset(self, store, slot)
    }

    #[inline]
    fn touch<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        SlruPolicy::touch(self, store, slot)
    }

    #[inline]
    fn invalidate<S>(&mut self, store: &mut S, slot: SlotId)
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        SlruPolicy::invalidate(self, store, slot)
    }

    #[inline]
    fn victim<S>(&mut self, store: &mut S, candidates: &[SlotId]) -> SlotId
    where
        S: EntryStore<SlruEntry> + ?Sized,
    {
        SlruPolicy::victim(self, store, candidates)
    }
}

#[cfg(feature = "metrics")]
impl<C> MetricsSnapshotProvider<SlruPolicyMetricsSnapshot> for SlruPolicy<C> {
    fn snapshot(&self) -> SlruPolicyMetricsSnapshot {
        self.metrics
            .snapshot(self.protected.len(), self.protected_capacity, self.probation_capacity)
    }
}

#[cfg(feature = "metrics")]
impl<C> MetricsReset for SlruPolicy<C> {
    fn reset_metrics(&mut self) {
        self.metrics = SlruPolicyMetrics::default();
    }
}

// ---------------------------------------------------------------------------
// Concurrent wrapper
// ---------------------------------------------------------------------------

#[cfg(feature = "concurrency")]
struct Shared<S, C> {
    policy: SlruPolicy<C>,
    store: S,
}

/// Thread-safe SLRU engine and entry store behind one `RwLock`.
///
/// `touch` and `victim` read and write both the membership and the entries,
/// so the two share a single lock per cache instance. Mutating calls take
/// the write lock; inspection takes the read lock. Clones share state.
///
/// # Example
///
/// ```
/// use seglru::policy::slru::{ConcurrentSlruPolicy, SlruPolicy};
///
/// let cache = ConcurrentSlruPolicy::with_arena(SlruPolicy::new(1, 3));
/// let a = cache.track();
/// let b = cache.track();
///
/// cache.touch(a);
/// assert_eq!(cache.protected_len(), 1);
/// assert_eq!(cache.victim(&[a, b]), b);
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentSlruPolicy<S, C = LogicalClock> {
    inner: Arc<RwLock<Shared<S, C>>>,
}

#[cfg(feature = "concurrency")]
impl<S, C> Clone for ConcurrentSlruPolicy<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<S, C> fmt::Debug for ConcurrentSlruPolicy<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.read();
        f.debug_struct("ConcurrentSlruPolicy")
            .field("policy", &shared.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<S, C> ConcurrentSlruPolicy<S, C>
where
    S: EntryStore<SlruEntry>,
    C: Clock,
{
    pub fn new(policy: SlruPolicy<C>, store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Shared { policy, store })),
        }
    }

    pub fn touch(&self, slot: SlotId) {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        policy.touch(store, slot);
    }

    pub fn reset(&self, slot: SlotId) {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        policy.reset(store, slot);
    }

    pub fn invalidate(&self, slot: SlotId) {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        policy.invalidate(store, slot);
    }

    /// See [`SlruPolicy::victim`].
    pub fn victim(&self, candidates: &[SlotId]) -> SlotId {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        policy.victim(store, candidates)
    }

    /// Picks a victim and refills it in one critical section.
    pub fn replace(&self, candidates: &[SlotId]) -> SlotId {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        let slot = policy.victim(store, candidates);
        policy.reset(store, slot);
        slot
    }

    pub fn segment_of(&self, slot: SlotId) -> Option<Segment> {
        self.inner.read().store.entry(slot).map(SlruEntry::segment)
    }

    pub fn entry(&self, slot: SlotId) -> Option<SlruEntry> {
        self.inner.read().store.entry(slot).copied()
    }

    pub fn protected_len(&self) -> usize {
        self.inner.read().policy.protected_len()
    }

    pub fn protected_capacity(&self) -> usize {
        self.inner.read().policy.protected_capacity()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let shared = self.inner.read();
        shared.policy.check_invariants(&shared.store)
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.write().store)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> SlruPolicyMetricsSnapshot {
        self.inner.read().policy.snapshot()
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) {
        self.inner.write().policy.reset_metrics();
    }
}

#[cfg(feature = "concurrency")]
impl<C: Clock> ConcurrentSlruPolicy<SlotArena<SlruEntry>, C> {
    /// Wraps `policy` together with an empty arena store.
    pub fn with_arena(policy: SlruPolicy<C>) -> Self {
        Self::new(policy, SlotArena::new())
    }

    /// Allocates a slot with fresh metadata.
    pub fn track(&self) -> SlotId {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        store.insert(policy.instantiate_entry())
    }

    /// Drops the slot from the membership and frees it.
    pub fn untrack(&self, slot: SlotId) -> Option<SlruEntry> {
        let mut guard = self.inner.write();
        let Shared { policy, store } = &mut *guard;
        policy.forget(store, slot);
        store.remove(slot)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
