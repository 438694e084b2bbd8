//! End-to-end history behavior through real edits.

use std::sync::Arc;
use std::thread;
use unmess_core::{NoopObserver, PixelBuffer, RgbaBuffer};
use unmess_history::{HistoryManager, ImageState, Operation};
use unmess_ops::Edit;

fn loaded(w: u32, h: u32) -> ImageState {
    let buf = RgbaBuffer::from_fn(w, h, |x, y| [(x % 2) as f32, (y % 2) as f32, 0.5, 1.0]);
    ImageState::from_image(&buf, "grid.png").unwrap()
}

#[test]
fn capacity_keeps_newest_in_order() {
    let h = HistoryManager::new(3).unwrap();
    let states: Vec<_> = (1..=5).map(|w| Arc::new(loaded(w, 1))).collect();
    for s in &states {
        h.save_state(Arc::clone(s));
    }

    assert_eq!(h.undo_count(), 3);
    assert_eq!(h.total_memory_used(), (3 + 4 + 5) * 4);

    // Walk back through the retained states: 5 -> 4 -> 3
    assert!(Arc::ptr_eq(&h.undo().unwrap(), &states[3]));
    assert!(Arc::ptr_eq(&h.undo().unwrap(), &states[2]));
    assert!(h.undo().is_none());
    assert_eq!(h.redo_count(), 3);
    assert_eq!(h.total_memory_used(), (3 + 4 + 5) * 4);
}

#[test]
fn undo_redo_symmetry() {
    let h = HistoryManager::default();
    let mut state = Arc::new(loaded(4, 4));
    h.save_state(Arc::clone(&state));

    let edits = [Edit::Invert, Edit::Contrast(0.5), Edit::Rotate90 { clockwise: true }];
    let mut chain = vec![Arc::clone(&state)];
    for edit in &edits {
        state = Arc::new(state.apply(edit, &NoopObserver).unwrap());
        h.save_state(Arc::clone(&state));
        chain.push(Arc::clone(&state));
    }

    for expected in chain.iter().rev().skip(1) {
        let got = h.undo().unwrap();
        assert_eq!(got.current(), expected.current());
    }
    for expected in chain.iter().skip(1) {
        let got = h.redo().unwrap();
        assert_eq!(got.operations().len(), expected.operations().len());
        assert_eq!(got.current(), expected.current());
    }
    assert!(!h.can_redo());
}

#[test]
fn contrast_pivot_through_state() {
    let buf = RgbaBuffer::filled(2, 2, [0.5, 0.5, 0.5, 1.0]);
    let state = ImageState::from_image(&buf, "gray.png").unwrap();
    let next = state.apply(&Edit::Contrast(1.0), &NoopObserver).unwrap();
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(next.current().pixel(x, y), [0.5, 0.5, 0.5, 1.0]);
        }
    }
}

#[test]
fn log_survives_json_and_replays() {
    let mut state = loaded(6, 5);
    for edit in [Edit::Saturation(0.5), Edit::GaussianBlur(1), Edit::Flip { horizontal: false }] {
        state = state.apply(&edit, &NoopObserver).unwrap();
    }

    let json = serde_json::to_string(state.operations()).unwrap();
    let ops: Vec<Operation> = serde_json::from_str(&json).unwrap();
    let mut buf = state.original();
    for op in &ops {
        buf = op.to_edit().unwrap().apply(&buf, &NoopObserver).unwrap();
    }
    assert_eq!(&buf, state.current());
}

#[test]
fn concurrent_saves_keep_accounting() {
    let h = Arc::new(HistoryManager::new(8).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let h = Arc::clone(&h);
            thread::spawn(move || {
                for i in 0..10 {
                    h.save_state(Arc::new(loaded(1 + (t + i) % 3, 2)));
                    if i % 3 == 0 {
                        h.undo();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = h.stats();
    assert!(stats.undo_count <= 8);
    // Every retained state is 1..=3 pixels wide and 2 tall
    let max = (stats.undo_count + stats.redo_count) as u64 * 3 * 2 * 4;
    let min = (stats.undo_count + stats.redo_count) as u64 * 2 * 4;
    assert!((min..=max).contains(&stats.total_memory_used));
}
