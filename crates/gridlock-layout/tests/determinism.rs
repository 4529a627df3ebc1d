//! Output determinism across repeated runs.
//!
//! The same operation stream must produce byte-identical serialized layouts.
//! Layouts are fingerprinted with blake3 over their JSON encoding.

use gridlock_layout::{
    CompactionMode, LayoutItem, MoveOptions, ResizeHandle, ResizeOptions, compact, move_element,
    resize_element, sort_for_compaction,
};

fn fingerprint(layout: &[LayoutItem]) -> String {
    let bytes = serde_json::to_vec(layout).expect("layout serializes");
    format!("blake3:{}", blake3::hash(&bytes).to_hex())
}

fn dashboard() -> Vec<LayoutItem> {
    vec![
        LayoutItem::fixed("nav", 0, 0, 12, 1),
        LayoutItem::new("chart", 0, 1, 8, 4),
        LayoutItem::new("stats", 8, 1, 4, 2),
        LayoutItem::new("feed", 8, 3, 4, 6),
        LayoutItem::new("table", 0, 5, 8, 3),
        LayoutItem::new("notes", 0, 8, 4, 2).with_min_size(2, 1),
        LayoutItem::new("tags", 4, 8, 4, 2),
    ]
}

/// A fixed stream of drags and resizes, settled after every step.
fn replay(mode: CompactionMode) -> Vec<String> {
    let cols = 12;
    let mut layout = compact(&dashboard(), mode, cols, false);
    let mut prints = vec![fingerprint(&layout)];

    let drags = [("feed", 0, 1), ("tags", 8, 0), ("chart", 4, 6), ("stats", 0, 0)];
    for (id, x, y) in drags {
        let moved = move_element(&layout, id, Some(x), Some(y), MoveOptions::user(mode, cols))
            .expect("known id");
        layout = compact(&moved, mode, cols, false);
        prints.push(fingerprint(&layout));
    }

    let options = ResizeOptions {
        mode,
        cols,
        ..ResizeOptions::default()
    };
    layout = resize_element(&layout, "notes", 1, 3, ResizeHandle::Se, options).expect("known id");
    prints.push(fingerprint(&layout));
    layout = resize_element(&layout, "table", 10, 2, ResizeHandle::W, options).expect("known id");
    prints.push(fingerprint(&layout));
    prints
}

#[test]
fn replay_is_byte_identical() {
    for mode in [
        CompactionMode::Vertical,
        CompactionMode::Horizontal,
        CompactionMode::None,
    ] {
        let first = replay(mode);
        let second = replay(mode);
        assert_eq!(first, second, "mode {mode}");
    }
}

#[test]
fn modes_diverge() {
    let vertical = replay(CompactionMode::Vertical);
    let horizontal = replay(CompactionMode::Horizontal);
    assert_ne!(vertical.last(), horizontal.last());
}

#[test]
fn ties_sort_identically_regardless_of_run() {
    let layout: Vec<LayoutItem> = (0..32)
        .map(|i| LayoutItem::new(format!("tie-{i:02}"), i % 4, i % 3, 1, 1))
        .collect();
    let first = sort_for_compaction(&layout, CompactionMode::Vertical);
    for _ in 0..8 {
        let again = sort_for_compaction(&layout, CompactionMode::Vertical);
        assert_eq!(fingerprint(&first), fingerprint(&again));
    }
}

#[test]
fn fingerprint_ignores_transient_moved_flag() {
    let mut flagged = dashboard();
    for item in &mut flagged {
        item.moved = true;
    }
    assert_eq!(fingerprint(&flagged), fingerprint(&dashboard()));
}
