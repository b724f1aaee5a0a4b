#![no_main]

use libfuzzer_sys::fuzz_target;
use seglru::ds::{SlotArena, SlotId};
use seglru::policy::slru::{SlruEntry, SlruPolicy};

// Fuzz arbitrary lifecycle sequences on SlruPolicy over an arena store.
//
// First byte picks the protected capacity; then (op, arg) byte pairs.
// Slots are allocated and freed along the way so stale ids get exercised.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap % 16);
    let mut policy = SlruPolicy::new(capacity, 16);
    let mut store: SlotArena<SlruEntry> = SlotArena::new();
    let mut live: Vec<SlotId> = Vec::new();

    for pair in ops.chunks_exact(2) {
        let (op, arg) = (pair[0] % 7, usize::from(pair[1]));

        match op {
            0 => {
                // track a new slot
                if live.len() < 64 {
                    live.push(store.insert(policy.instantiate_entry()));
                }
            },
            1 | 2 | 3 if !live.is_empty() => {
                let slot = live[arg % live.len()];
                let before = policy.protected_len();
                let was_protected = store.get(slot).unwrap().is_protected();
                match op {
                    1 => policy.touch(&mut store, slot),
                    2 => {
                        policy.reset(&mut store, slot);
                        assert_eq!(policy.protected_len(), before - usize::from(was_protected));
                    },
                    _ => {
                        policy.invalidate(&mut store, slot);
                        assert!(store.get(slot).unwrap().last_touch().is_epoch());
                    },
                }
            },
            4 if !live.is_empty() => {
                // victim over a window of live slots
                let start = arg % live.len();
                let end = (start + 1 + arg % 8).min(live.len());
                let set = &live[start..end];
                let victim = policy.victim(&mut store, set);
                assert!(set.contains(&victim));
                let has_probation = set.iter().any(|&s| {
                    s != victim && store.get(s).unwrap().is_probation()
                });
                if has_probation {
                    assert!(store.get(victim).unwrap().is_probation());
                }
            },
            5 if !live.is_empty() => {
                // free a slot
                let slot = live.swap_remove(arg % live.len());
                policy.forget(&mut store, slot);
                assert!(store.remove(slot).is_some());
                assert!(!policy.is_protected(slot));
            },
            _ => {},
        }

        assert!(policy.protected_len() <= capacity);
        policy.check_invariants(&store).unwrap();
    }
});
