//! Example driving the SLRU replacement policy from a toy set-associative cache.
//!
//! The host below owns tags and replacement metadata for a 4-way, 4-set
//! cache. The policy only decides which way to evict and how ways move between
//! probation and protected.
//!
//! Run with: cargo run --example basic_slru
//! Trace demotions with: RUST_LOG=seglru=trace cargo run --example basic_slru

use seglru::ds::SlotId;
use seglru::policy::slru::{Segment, SlruEntry, SlruPolicy};
use tracing_subscriber::EnvFilter;

const SETS: usize = 4;
const WAYS: usize = 4;

/// Tags plus one metadata record per way; slot id = set * WAYS + way.
struct ToyCache {
    tags: Vec<Option<u64>>,
    meta: Vec<SlruEntry>,
    policy: SlruPolicy,
    hits: u64,
    misses: u64,
}

impl ToyCache {
    fn new() -> Self {
        // Half of all slots may be protected.
        let policy = SlruPolicy::new(SETS * WAYS / 2, SETS * WAYS / 2);
        let meta = vec![policy.instantiate_entry(); SETS * WAYS];
        Self {
            tags: vec![None; SETS * WAYS],
            meta,
            policy,
            hits: 0,
            misses: 0,
        }
    }

    fn set_slots(addr: u64) -> Vec<SlotId> {
        let set = (addr as usize) % SETS;
        (0..WAYS).map(|w| SlotId::from_index(set * WAYS + w)).collect()
    }

    fn access(&mut self, addr: u64) {
        let slots = Self::set_slots(addr);
        if let Some(&hit) = slots.iter().find(|s| self.tags[s.index()] == Some(addr)) {
            self.hits += 1;
            self.policy.touch(&mut self.meta, hit);
            return;
        }

        self.misses += 1;
        let slot = match slots.iter().find(|s| self.tags[s.index()].is_none()) {
            Some(&empty) => empty,
            None => self.policy.victim(&mut self.meta, &slots),
        };
        self.tags[slot.index()] = Some(addr);
        self.policy.reset(&mut self.meta, slot);
    }

    fn evict(&mut self, addr: u64) {
        let slots = Self::set_slots(addr);
        if let Some(&slot) = slots.iter().find(|s| self.tags[s.index()] == Some(addr)) {
            self.tags[slot.index()] = None;
            self.policy.invalidate(&mut self.meta, slot);
        }
    }

    fn resident(&self, addr: u64) -> Option<Segment> {
        Self::set_slots(addr)
            .into_iter()
            .find(|s| self.tags[s.index()] == Some(addr))
            .map(|s| self.meta[s.index()].segment())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== SLRU Replacement Example ===\n");

    let mut cache = ToyCache::new();
    println!(
        "{} sets x {} ways, protected capacity {}\n",
        SETS,
        WAYS,
        cache.policy.protected_capacity()
    );

    // Hot working set: fill then re-touch so it is promoted.
    let hot = [0u64, 1, 2, 3, 4, 5, 6, 7];
    for &addr in &hot {
        cache.access(addr);
    }
    for &addr in &hot {
        cache.access(addr);
    }
    println!("Hot set accessed twice: protected_len = {}", cache.policy.protected_len());

    // One-pass scan over many cold addresses.
    for addr in 1_000..1_064 {
        cache.access(addr);
    }
    let survivors: Vec<_> = hot
        .iter()
        .filter(|&&a| cache.resident(a) == Some(Segment::Protected))
        .collect();
    println!("After a 64-address scan, protected hot lines: {:?}", survivors);

    cache.evict(0);
    println!("\nExplicitly evicted address 0: resident = {:?}", cache.resident(0));

    println!("\nhits = {}, misses = {}", cache.hits, cache.misses);
    match cache.policy.check_invariants(&cache.meta) {
        Ok(()) => println!("invariants hold"),
        Err(e) => println!("invariant violated: {e}"),
    }
}

// Expected output (protected survivors depend only on the access order):
// === SLRU Replacement Example ===
//
// 4 sets x 4 ways, protected capacity 8
//
// Hot set accessed twice: protected_len = 8
// After a 64-address scan, protected hot lines: [0, 1, 2, 3, 4, 5, 6, 7]
//
// Explicitly evicted address 0: resident = None
//
// hits = 8, misses = 72
// invariants hold
