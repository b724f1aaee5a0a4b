#![no_main]

use libfuzzer_sys::fuzz_target;
use seglru::ds::SlotArena;

// Fuzz arbitrary insert/remove/get/clear sequences on the generational arena.
//
// Every id ever handed out is kept; ids whose slot was freed must stay stale
// even after the index is reused.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut all_ids = Vec::new();
    let mut freed = Vec::new();

    for pair in data.chunks_exact(2) {
        let (op, value) = (pair[0] % 5, u32::from(pair[1]));

        match op {
            0 => {
                let id = arena.insert(value);
                all_ids.push(id);
                assert_eq!(arena.get(id), Some(&value));
            },
            1 if !all_ids.is_empty() => {
                let id = all_ids[value as usize % all_ids.len()];
                let old_len = arena.len();
                if arena.remove(id).is_some() {
                    assert_eq!(arena.len(), old_len - 1);
                    freed.push(id);
                }
                assert!(!arena.contains(id));
            },
            2 if !all_ids.is_empty() => {
                let id = all_ids[value as usize % all_ids.len()];
                if let Some(v) = arena.get_mut(id) {
                    *v = value;
                    assert_eq!(arena.get(id), Some(&value));
                }
            },
            3 => {
                arena.clear();
                freed.append(&mut all_ids);
                assert!(arena.is_empty());
            },
            _ => {
                assert_eq!(arena.iter().count(), arena.len());
            },
        }

        for id in &freed {
            assert!(!arena.contains(*id), "stale id {id:?} resolved");
        }
    }
});
