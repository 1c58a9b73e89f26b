#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use recall_history::{HistoryBuilder, Version};

#[derive(Debug, Arbitrary)]
enum Op {
    Save(u8),
    SaveTagged(u8, bool),
    Undo,
    Redo,
    Restore(u16),
    RestoreTag(bool),
    Clear(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    dedup: bool,
    ops: Vec<Op>,
}

fn tag(flag: bool) -> &'static str {
    if flag { "left" } else { "right" }
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity % 16);
    let builder = HistoryBuilder::<u8>::cloneable().capacity(capacity);
    let builder = if input.dedup { builder.dedup() } else { builder };
    let Ok(history) = builder.build(&0) else {
        return;
    };

    let mut live = 0u8;
    let mut last_issued = Version::FIRST;

    for op in input.ops.iter().take(512) {
        match *op {
            Op::Save(v) => {
                let before = history.current_version();
                let version = history.save(&v);
                if version != before {
                    assert!(version > last_issued);
                    last_issued = version;
                }
                assert_eq!(history.current(), v);
            }
            Op::SaveTagged(v, t) => {
                let before = history.current_version();
                let version = history.save_tagged(&v, tag(t));
                if version != before {
                    assert!(version > last_issued);
                    last_issued = version;
                }
            }
            Op::Undo => {
                let could = history.can_undo();
                assert_eq!(history.undo(&mut live), could);
                if could {
                    assert_eq!(live, history.current());
                }
            }
            Op::Redo => {
                let could = history.can_redo();
                assert_eq!(history.redo(&mut live), could);
                if could {
                    assert_eq!(live, history.current());
                }
            }
            Op::Restore(n) => {
                let target = Version::new(u64::from(n));
                let retained = history.snapshot(target).is_some();
                assert_eq!(history.restore(target, &mut live), retained);
                if retained {
                    assert_eq!(history.current_version(), target);
                }
            }
            Op::RestoreTag(t) => {
                let found = history.find_tag(tag(t));
                assert_eq!(history.restore_tag(tag(t), &mut live), found.is_some());
            }
            Op::Clear(v) => {
                let version = history.clear(&v);
                assert!(version > last_issued);
                last_issued = version;
                assert_eq!(history.retained(), 1);
            }
        }

        let stats = history.stats();
        assert!(stats.retained >= 1);
        assert!(capacity == 0 || stats.retained <= capacity);
        assert!(stats.cursor < stats.retained);
        assert!(stats.next_version > last_issued);
        let versions = history.versions();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }
});
