// ==============================================
// SLRU POLICY CONCURRENCY TESTS (integration)
// ==============================================
//
// ConcurrentSlruPolicy shares one lock between the membership and the entry
// store. These tests hammer it from several threads and check that the
// capacity and segment invariants survive.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seglru::ds::{SlotArena, SlotId};
use seglru::policy::slru::{ConcurrentSlruPolicy, Segment, SlruEntry, SlruPolicy};

const THREADS: usize = 8;

type ArenaPolicy = ConcurrentSlruPolicy<SlotArena<SlruEntry>>;

fn tracked(cache: &ArenaPolicy, n: usize) -> Vec<SlotId> {
    (0..n).map(|_| cache.track()).collect()
}

// ==============================================
// Mixed operations
// ==============================================

mod mixed_operations {
    use super::*;

    #[test]
    fn random_ops_keep_invariants() {
        let cache = ConcurrentSlruPolicy::with_arena(SlruPolicy::new(6, 10));
        let slots = Arc::new(tracked(&cache, 16));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = cache.clone();
                let slots = Arc::clone(&slots);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(t as u64);
                    barrier.wait();
                    for _ in 0..2_000 {
                        let slot = slots[rng.gen_range(0..slots.len())];
                        match rng.gen_range(0..10) {
                            0..=5 => cache.touch(slot),
                            6 => cache.reset(slot),
                            7 => cache.invalidate(slot),
                            _ => {
                                let start = rng.gen_range(0..slots.len() - 4);
                                let set = &slots[start..start + 4];
                                let victim = cache.replace(set);
                                assert!(set.contains(&victim));
                            },
                        }
                        assert!(cache.protected_len() <= 6);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        cache.check_invariants().unwrap();
        let protected = slots
            .iter()
            .filter(|&&s| cache.segment_of(s) == Some(Segment::Protected))
            .count();
        assert_eq!(protected, cache.protected_len());
    }

    #[test]
    fn concurrent_hits_fill_protected_exactly_to_capacity() {
        let cache = ConcurrentSlruPolicy::with_arena(SlruPolicy::new(4, 4));
        let slots = Arc::new(tracked(&cache, 8));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = cache.clone();
                let slots = Arc::clone(&slots);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.touch(slots[t]);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.protected_len(), 4);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Slot lifecycle
// ==============================================

mod slot_lifecycle {
    use super::*;

    #[test]
    fn untrack_races_with_touch_without_dangling_members() {
        for _ in 0..200 {
            let cache = ConcurrentSlruPolicy::with_arena(SlruPolicy::new(2, 2));
            let slots = tracked(&cache, 3);
            cache.touch(slots[0]);

            let barrier = Arc::new(Barrier::new(2));

            let toucher = {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                let (a, b) = (slots[1], slots[2]);
                thread::spawn(move || {
                    barrier.wait();
                    cache.touch(a);
                    cache.touch(b);
                })
            };
            let remover = {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                let victim = slots[0];
                thread::spawn(move || {
                    barrier.wait();
                    cache.untrack(victim)
                })
            };

            toucher.join().unwrap();
            let removed = remover.join().unwrap();

            assert!(removed.is_some());
            assert_eq!(cache.segment_of(slots[0]), None);
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn store_access_shares_the_lock() {
        let cache = ConcurrentSlruPolicy::with_arena(SlruPolicy::new(1, 1));
        let a = cache.track();
        cache.touch(a);

        let live = cache.with_store_mut(|store| store.len());
        assert_eq!(live, 1);
        assert!(cache.entry(a).unwrap().is_protected());
        assert_eq!(cache.protected_capacity(), 1);
    }
}
