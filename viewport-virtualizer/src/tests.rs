use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    /// An integral value in `[start, end_exclusive)`, so sums stay exact.
    fn gen_extent(&mut self, start: u64, end_exclusive: u64) -> f64 {
        self.gen_range_u64(start, end_exclusive) as f64
    }
}

fn expected_offsets(extents: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(extents.len() + 1);
    let mut acc = 0.0;
    out.push(acc);
    for &e in extents {
        acc += e;
        out.push(acc);
    }
    out
}

/// Every index whose `[offset, offset + extent)` intersects `[lo, hi)`, by linear scan.
fn expected_intersecting(extents: &[f64], lo: f64, hi: f64) -> Vec<usize> {
    let offsets = expected_offsets(extents);
    (0..extents.len())
        .filter(|&i| offsets[i] < hi && offsets[i + 1] > lo)
        .collect()
}

fn diagnostics_sink() -> (
    Arc<Mutex<Vec<ExtentDiagnostic>>>,
    impl Fn(ExtentDiagnostic) + Send + Sync + 'static,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = Arc::clone(&seen);
        move |d: ExtentDiagnostic| seen.lock().unwrap().push(d)
    };
    (seen, sink)
}

fn counting_source(calls: &Arc<AtomicUsize>, f: fn(usize) -> f64) -> ExtentSource {
    let calls = Arc::clone(calls);
    ExtentSource::variable(move |i| {
        calls.fetch_add(1, Ordering::Relaxed);
        f(i)
    })
}

#[test]
fn uniform_list_window_with_item_overscan() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(10_000, 40.0).with_overscan(2));
    v.set_viewport_and_scroll(800.0, 4000.0);

    assert!(v.position_index().is_uniform());
    assert_eq!(v.total_extent(), 400_000.0);
    // Items 100..=119 cover pixels 4000..4800.
    assert_eq!(v.visible_range(), VisibleRange::new(100, 119));
    assert_eq!(v.virtual_range(), VisibleRange::new(98, 121));
}

#[test]
fn heterogeneous_list_offsets_and_window() {
    let extents = [10.0, 20.0, 30.0, 40.0, 50.0];
    let mut v = ListVirtualizer::new(ListOptions::new(5, ExtentSource::from_extents(extents)));
    v.set_viewport_and_scroll(35.0, 25.0);

    assert!(!v.position_index().is_uniform());
    assert_eq!(v.total_extent(), 150.0);
    let offsets: Vec<f64> = (0..=5).map(|i| v.offset_at(i).unwrap()).collect();
    assert_eq!(offsets, vec![0.0, 10.0, 30.0, 60.0, 100.0, 150.0]);
    assert_eq!(v.extent_at(3), Some(40.0));
    assert_eq!(v.offset_at(6), None);

    // [25, 60) touches item 1 ([10, 30)) and item 2 ([30, 60)); item 3 starts at 60.
    assert_eq!(v.visible_range(), VisibleRange::new(1, 2));
    assert_eq!(v.visible_range_for(25.0, 36.0), VisibleRange::new(1, 3));
}

#[test]
fn empty_collection_never_renders() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(0, 40.0));
    v.set_viewport_extent(800.0);

    let mut calls = 0usize;
    let out = v.virtualize(&[] as &[u32], |_, _| {
        calls += 1;
    });
    assert!(out.nodes.is_empty());
    assert!(out.range.is_empty());
    assert_eq!(out.total_extent, 0.0);
    assert_eq!(calls, 0);
    assert_eq!(v.index_at_offset(0.0), None);
}

#[test]
fn non_positive_viewport_is_an_empty_range() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(100, 10.0).with_overscan(3));
    for view in [0.0, -20.0, f64::NAN] {
        assert!(v.visible_range_for(0.0, view).is_empty());
        assert!(v.virtual_range_for(50.0, view).is_empty());
    }

    v.set_viewport_extent(f64::INFINITY);
    assert_eq!(v.viewport_extent(), 0.0);
    let mut items = Vec::new();
    v.collect_virtual_items(&mut items);
    assert!(items.is_empty());
}

#[test]
fn elastic_scroll_offsets_are_clamped_before_search() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(100, 10.0).with_overscan(0));
    v.set_viewport_extent(30.0);

    v.set_scroll_offset(-50.0);
    assert_eq!(v.scroll_offset(), -50.0);
    assert_eq!(v.visible_range(), VisibleRange::new(0, 2));

    v.set_scroll_offset(1.0e9);
    assert_eq!(v.visible_range(), VisibleRange::new(99, 99));

    v.set_scroll_offset_clamped(1.0e9);
    assert_eq!(v.scroll_offset(), 970.0);
    assert_eq!(v.visible_range(), VisibleRange::new(97, 99));
}

#[test]
fn non_finite_scroll_offsets_are_ignored() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(10, 10.0));
    v.set_scroll_offset(30.0);
    v.set_scroll_offset(f64::NAN);
    v.set_scroll_offset(f64::NEG_INFINITY);
    assert_eq!(v.scroll_offset(), 30.0);
}

#[test]
fn invalid_extents_are_clamped_and_reported() {
    let (seen, sink) = diagnostics_sink();
    let extents = [10.0, -5.0, f64::NAN, 20.0, f64::INFINITY, 5.0];
    let v = ListVirtualizer::new(
        ListOptions::new(extents.len(), ExtentSource::from_extents(extents))
            .with_on_diagnostic(Some(sink)),
    );

    assert_eq!(v.total_extent(), 35.0);
    assert_eq!(v.extent_at(1), Some(0.0));
    assert_eq!(v.extent_at(2), Some(0.0));
    assert_eq!(v.offset_at(4), Some(30.0));
    assert_eq!(v.offset_at(5), Some(30.0));

    let seen = seen.lock().unwrap();
    let issues: Vec<(Option<usize>, ExtentIssue)> =
        seen.iter().map(|d| (d.index, d.issue)).collect();
    assert_eq!(
        issues,
        vec![
            (Some(1), ExtentIssue::Negative),
            (Some(2), ExtentIssue::NonFinite),
            (Some(4), ExtentIssue::NonFinite),
        ]
    );
}

#[test]
fn invalid_fixed_extent_is_reported_without_index() {
    let (seen, sink) = diagnostics_sink();
    let mut v = ListVirtualizer::new(ListOptions::fixed(10, -3.0).with_on_diagnostic(Some(sink)));
    v.set_viewport_extent(100.0);

    assert_eq!(v.total_extent(), 0.0);
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(seen.lock().unwrap()[0].index, None);
    assert_eq!(seen.lock().unwrap()[0].issue, ExtentIssue::Negative);
    // Zero-extent items never panic the range search.
    assert!(!v.visible_range().is_empty());
}

#[test]
fn position_index_is_monotonic_and_conserves_extent() {
    let mut rng = Lcg::new(7);
    for _ in 0..50 {
        let n = rng.gen_range_usize(0, 200);
        let extents: Vec<f64> = (0..n).map(|_| rng.gen_extent(0, 60)).collect();
        let index = PositionIndex::build(n, &ExtentSource::from_extents(extents.clone()), None);

        let expected = expected_offsets(&extents);
        assert_eq!(index.offset_at(0), 0.0);
        for i in 0..n {
            assert!(index.offset_at(i + 1) >= index.offset_at(i));
            assert_eq!(index.offset_at(i), expected[i]);
            assert_eq!(index.extent_at(i), Some(extents[i]));
        }
        assert_eq!(index.total_extent(), extents.iter().sum::<f64>());
        assert_eq!(index.extent_at(n), None);
    }
}

#[test]
fn visible_range_matches_linear_scan() {
    let mut rng = Lcg::new(42);
    for _ in 0..300 {
        let n = rng.gen_range_usize(1, 120);
        let extents: Vec<f64> = (0..n).map(|_| rng.gen_extent(1, 50)).collect();
        let index = PositionIndex::build(n, &ExtentSource::from_extents(extents.clone()), None);
        let total = index.total_extent();

        let scroll = rng.gen_range_u64(0, total as u64) as f64;
        let view = rng.gen_extent(1, 400);
        let range = compute_visible_range(&index, scroll, view);

        // Coverage and minimality: exactly the intersecting items, no gaps.
        let expected = expected_intersecting(&extents, scroll, scroll + view);
        let actual: Vec<usize> = range.indices().collect();
        assert_eq!(actual, expected, "scroll={scroll} view={view} extents={extents:?}");
    }
}

#[test]
fn item_overscan_adds_at_most_k_per_side() {
    let mut rng = Lcg::new(3);
    for _ in 0..200 {
        let n = rng.gen_range_usize(1, 80);
        let extents: Vec<f64> = (0..n).map(|_| rng.gen_extent(1, 30)).collect();
        let index = PositionIndex::build(n, &ExtentSource::from_extents(extents), None);
        let scroll = rng.gen_range_u64(0, index.total_extent() as u64) as f64;
        let view = rng.gen_extent(1, 200);
        let k = rng.gen_range_usize(0, 6);

        let visible = compute_visible_range(&index, scroll, view);
        let range = compute_range(&index, scroll, view, Overscan::Items(k));
        assert_eq!(range.start, visible.start.saturating_sub(k));
        assert_eq!(range.end, (visible.end + k).min(n - 1));
    }
}

#[test]
fn pixel_overscan_covers_the_widened_interval() {
    let mut rng = Lcg::new(11);
    for _ in 0..200 {
        let n = rng.gen_range_usize(1, 80);
        let extents: Vec<f64> = (0..n).map(|_| rng.gen_extent(1, 30)).collect();
        let index = PositionIndex::build(n, &ExtentSource::from_extents(extents.clone()), None);
        let scroll = rng.gen_range_u64(0, index.total_extent() as u64) as f64;
        let view = rng.gen_extent(1, 200);
        let px = rng.gen_extent(0, 100);

        let range = compute_range(&index, scroll, view, Overscan::Pixels(px));
        let expected = expected_intersecting(&extents, scroll - px, scroll + view + px);
        let actual: Vec<usize> = range.indices().collect();
        assert_eq!(actual, expected);
    }

    let index = PositionIndex::build(10, &ExtentSource::Fixed(10.0), None);
    // [50 - 15, 80 + 15) = [35, 95)
    assert_eq!(
        compute_range(&index, 50.0, 30.0, Overscan::Pixels(15.0)),
        VisibleRange::new(3, 9)
    );
}

#[test]
fn uniform_and_table_layouts_agree() {
    let mut rng = Lcg::new(99);
    for _ in 0..100 {
        let n = rng.gen_range_usize(1, 500);
        let extent = rng.gen_extent(1, 64);
        let uniform = PositionIndex::build(n, &ExtentSource::Fixed(extent), None);
        let table = PositionIndex::build(n, &ExtentSource::variable(move |_| extent), None);
        assert!(uniform.is_uniform());
        assert!(!table.is_uniform());
        assert_eq!(uniform.total_extent(), table.total_extent());

        let scroll = rng.gen_range_u64(0, uniform.total_extent() as u64 + 1) as f64;
        let view = rng.gen_extent(1, 1000);
        let k = Overscan::Items(rng.gen_range_usize(0, 4));
        assert_eq!(
            compute_range(&uniform, scroll, view, k),
            compute_range(&table, scroll, view, k)
        );
        assert_eq!(
            uniform.index_at_offset(scroll),
            table.index_at_offset(scroll)
        );
    }
}

/// Every index whose `[offset_at(i), offset_at(i + 1))` intersects `[lo, hi)`, by linear scan.
fn expected_intersecting_index(index: &PositionIndex, lo: f64, hi: f64) -> Vec<usize> {
    (0..index.len())
        .filter(|&i| index.offset_at(i) < hi && index.offset_at(i + 1) > lo)
        .collect()
}

#[test]
fn fractional_uniform_extents_follow_offset_at() {
    let index = PositionIndex::build(10_000, &ExtentSource::Fixed(0.1), None);
    // Item 16 ends at 17 * 0.1, just past 1.7.
    assert_eq!(
        compute_visible_range(&index, 1.7, 0.05),
        VisibleRange::new(16, 17)
    );

    let mut rng = Lcg::new(23);
    for extent in [0.1, 0.3, 16.6] {
        let n = 2_000;
        let index = PositionIndex::build(n, &ExtentSource::Fixed(extent), None);
        let total = index.total_extent();

        for k in 0..n {
            // Offsets that sit exactly on (or next to) an item boundary.
            let x = k as f64 * extent;
            let i = index.index_at_offset(x).unwrap();
            assert!(
                index.offset_at(i) <= x && x < index.offset_at(i + 1),
                "extent={extent} x={x}"
            );
        }

        for _ in 0..300 {
            let scroll = rng.gen_range_u64(0, n as u64) as f64 * extent;
            let scroll = scroll.min(total - extent);
            let view = rng.gen_range_u64(1, 200) as f64 * extent / 7.0;
            let range = compute_visible_range(&index, scroll, view);
            let actual: Vec<usize> = range.indices().collect();
            assert_eq!(
                actual,
                expected_intersecting_index(&index, scroll, scroll + view),
                "extent={extent} scroll={scroll} view={view}"
            );
        }
    }
}

#[test]
fn range_and_build_are_deterministic() {
    let source = ExtentSource::variable(|i| (i % 7 + 1) as f64 * 3.0);
    let a = PositionIndex::build(1000, &source, None);
    let b = PositionIndex::build(1000, &source, None);
    assert_eq!(a, b);

    let r1 = compute_range(&a, 1234.0, 300.0, Overscan::Items(2));
    let r2 = compute_range(&a, 1234.0, 300.0, Overscan::Items(2));
    assert_eq!(r1, r2);
}

#[test]
fn invalidate_from_recomputes_the_suffix() {
    let extents = Arc::new(Mutex::new(vec![10.0; 8]));
    let source = ExtentSource::variable({
        let extents = Arc::clone(&extents);
        move |i| extents.lock().unwrap()[i]
    });
    let mut v = ListVirtualizer::new(ListOptions::new(8, source.clone()));
    assert_eq!(v.total_extent(), 80.0);

    extents.lock().unwrap()[3] = 25.0;
    // Same closure: nothing changes until the host signals it.
    v.set_extent(source.clone());
    assert_eq!(v.total_extent(), 80.0);

    v.invalidate_extents_from(3);
    assert_eq!(v.offset_at(3), Some(30.0));
    assert_eq!(v.offset_at(4), Some(55.0));
    assert_eq!(v.total_extent(), 95.0);
    assert_eq!(
        v.position_index(),
        &PositionIndex::build(8, &source, None)
    );

    // Past the end is a no-op.
    v.invalidate_extents_from(8);
    assert_eq!(v.total_extent(), 95.0);
}

#[test]
fn resize_keeps_the_prefix_and_matches_a_full_build() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = counting_source(&calls, |i| (i % 5 + 1) as f64);
    let mut index = PositionIndex::build(100, &source, None);
    assert_eq!(calls.load(Ordering::Relaxed), 100);

    index.resize(120, &source, None);
    assert_eq!(calls.load(Ordering::Relaxed), 120);
    assert_eq!(index, PositionIndex::build(120, &source, None));

    let before = calls.load(Ordering::Relaxed);
    index.resize(30, &source, None);
    assert_eq!(calls.load(Ordering::Relaxed), before);
    assert_eq!(index.len(), 30);
    assert_eq!(index, PositionIndex::build(30, &source, None));
}

#[test]
fn index_is_rebuilt_only_when_count_or_extent_identity_changes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = counting_source(&calls, |_| 20.0);
    let mut v = ListVirtualizer::new(ListOptions::new(50, source.clone()));
    v.set_viewport_extent(100.0);
    assert_eq!(calls.load(Ordering::Relaxed), 50);

    let items: Vec<u32> = (0..50).collect();
    for scroll in [0.0, 40.0, 400.0, 999.0] {
        v.set_scroll_offset(scroll);
        v.virtualize(&items, |_, it| it.index);
    }
    v.set_extent(source.clone());
    v.update_options(|o| o.overscan = Overscan::Items(4));
    assert_eq!(calls.load(Ordering::Relaxed), 50);

    let more: Vec<u32> = (0..60).collect();
    v.virtualize(&more, |_, it| it.index);
    assert_eq!(calls.load(Ordering::Relaxed), 60);

    v.set_extent(ExtentSource::Fixed(20.0));
    assert!(v.position_index().is_uniform());
    assert_eq!(v.total_extent(), 1200.0);
}

#[test]
fn virtualize_renders_each_materialized_item_once_in_order() {
    let items: Vec<&str> = (0..100).map(|_| "row").collect();
    let mut v = ListVirtualizer::new(
        ListOptions::variable(items.len(), |i| if i % 2 == 0 { 10.0 } else { 30.0 })
            .with_overscan(1),
    );
    v.set_viewport_and_scroll(50.0, 85.0);

    let out = v.virtualize(&items, |item, it| (*item, it));
    assert_eq!(out.total_extent, 2000.0);
    assert_eq!(out.nodes.len(), out.range.len());

    let indices: Vec<usize> = out.nodes.iter().map(|(_, it)| it.index).collect();
    let expected: Vec<usize> = out.range.indices().collect();
    assert_eq!(indices, expected);
    for (_, it) in &out.nodes {
        assert_eq!(Some(it.offset), v.offset_at(it.index));
        assert_eq!(Some(it.extent), v.extent_at(it.index));
    }
    // [85, 135): items 4 ([80, 90)) through 7 ([130, 160)), plus one each side.
    assert_eq!(v.visible_range(), VisibleRange::new(4, 7));
    assert_eq!(out.range, VisibleRange::new(3, 8));
}

#[test]
fn keyed_render_passes_follow_get_item_key() {
    let items = ["a", "b", "c", "d", "e", "f"];
    let mut v = ListVirtualizer::new(
        ListOptions::fixed(items.len(), 10.0)
            .with_overscan(0)
            .with_get_item_key(|i| alloc::format!("key-{i}")),
    );
    v.set_viewport_and_scroll(20.0, 20.0);

    let out = v.virtualize_keyed(&items, |item, it| (it.key, *item));
    assert_eq!(
        out.nodes,
        vec![
            (alloc::string::String::from("key-2"), "c"),
            (alloc::string::String::from("key-3"), "d"),
        ]
    );
    assert_eq!(v.key_for(5), "key-5");
}

#[test]
fn item_keys_close_over_host_data() {
    let ids: Arc<[u64]> = Arc::from([907u64, 12, 440, 3]);
    let mut v = ListVirtualizer::new(
        ListOptions::fixed(ids.len(), 10.0)
            .with_overscan(0)
            .with_get_item_key({
                let ids = Arc::clone(&ids);
                move |i| ids[i]
            }),
    );
    v.set_viewport_and_scroll(20.0, 10.0);

    let out = v.virtualize_keyed(&["a", "b", "c", "d"], |item, it| (it.key, *item));
    assert_eq!(out.nodes, vec![(12, "b"), (440, "c")]);
}

#[test]
fn index_at_offset_maps_into_items() {
    let v = ListVirtualizer::new(ListOptions::new(
        4,
        ExtentSource::from_extents([5.0, 0.0, 10.0, 5.0]),
    ));
    assert_eq!(v.index_at_offset(0.0), Some(0));
    assert_eq!(v.index_at_offset(4.9), Some(0));
    // Zero-extent item 1 covers no pixels.
    assert_eq!(v.index_at_offset(5.0), Some(2));
    assert_eq!(v.index_at_offset(19.0), Some(3));
    assert_eq!(v.index_at_offset(500.0), Some(3));
    assert_eq!(v.index_at_offset(-1.0), Some(0));
    assert_eq!(
        v.item_at_offset(7.0),
        Some(VirtualItem {
            index: 2,
            offset: 5.0,
            extent: 10.0
        })
    );
}

#[test]
fn scroll_to_index_offset_aligns_and_clamps() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(100, 10.0));
    v.set_viewport_extent(50.0);

    assert_eq!(v.scroll_to_index_offset(10, Align::Start), 100.0);
    assert_eq!(v.scroll_to_index_offset(10, Align::End), 60.0);
    assert_eq!(v.scroll_to_index_offset(10, Align::Center), 80.0);
    assert_eq!(v.scroll_to_index_offset(99, Align::Start), v.max_scroll_offset());
    assert_eq!(v.scroll_to_index_offset(1000, Align::End), 950.0);
    assert_eq!(v.scroll_to_index_offset(0, Align::End), 0.0);

    v.set_scroll_offset(200.0);
    // Viewport covers [200, 250).
    assert_eq!(v.scroll_to_index_offset(22, Align::Auto), 200.0);
    assert_eq!(v.scroll_to_index_offset(5, Align::Auto), 50.0);
    assert_eq!(v.scroll_to_index_offset(30, Align::Auto), 260.0);

    assert_eq!(v.scroll_to_index(30, Align::Start), 300.0);
    assert_eq!(v.scroll_offset(), 300.0);
    assert_eq!(v.visible_range().start, 30);

    let empty = ListVirtualizer::new(ListOptions::fixed(0, 10.0));
    assert_eq!(empty.scroll_to_index_offset(3, Align::Center), 0.0);
}

#[test]
fn scroll_direction_tracks_the_latest_change() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(100, 10.0));
    assert_eq!(v.scroll_direction(), None);
    v.set_scroll_offset(50.0);
    assert_eq!(v.scroll_direction(), Some(ScrollDirection::Forward));
    v.set_scroll_offset(50.0);
    assert_eq!(v.scroll_direction(), Some(ScrollDirection::Forward));
    v.set_scroll_offset(10.0);
    assert_eq!(v.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn viewport_state_roundtrips() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(100, 10.0));
    v.set_viewport_and_scroll(40.0, 120.0);
    let state = v.viewport_state();
    assert_eq!(state, ViewportState::new(120.0, 40.0));

    let mut w = ListVirtualizer::new(ListOptions::fixed(100, 10.0));
    w.restore_viewport_state(state);
    assert_eq!(w.visible_range(), v.visible_range());
}

#[test]
fn horizontal_axis_is_carried_through_options() {
    let mut v = ListVirtualizer::new(
        ListOptions::fixed(10, 100.0)
            .with_axis(Axis::Horizontal)
            .with_overscan(0),
    );
    v.set_viewport_and_scroll(250.0, 100.0);
    assert_eq!(v.axis(), Axis::Horizontal);
    let mut offsets = Vec::new();
    v.for_each_virtual_item(|it| offsets.push(it.offset));
    assert_eq!(offsets, vec![100.0, 200.0, 300.0]);

    v.update_options(|o| o.axis = Axis::Vertical);
    assert_eq!(v.axis(), Axis::Vertical);
}

#[test]
fn grid_window_of_full_rows() {
    let items: Vec<u32> = (0..1000).collect();
    let mut g = GridVirtualizer::new(GridOptions::new(0, 5, 100.0, 50.0).with_overscan(0));
    g.set_viewport_height(300.0);

    let out = g.virtualize_grid(&items, |item, cell| (*item, cell));
    assert_eq!(g.row_count(), 200);
    assert_eq!(out.rows, VisibleRange::new(0, 5));
    assert_eq!(out.columns, VisibleRange::new(0, 4));
    assert_eq!(
        out.total_extent,
        GridExtent {
            width: 500.0,
            height: 10_000.0
        }
    );
    let indices: Vec<u32> = out.nodes.iter().map(|(item, _)| *item).collect();
    assert_eq!(indices, (0..30).collect::<Vec<u32>>());

    let (_, cell) = out.nodes[7];
    assert_eq!((cell.row, cell.column), (1, 2));
    assert_eq!((cell.x, cell.y, cell.width, cell.height), (200.0, 50.0, 100.0, 50.0));

    g.set_overscan(1);
    assert_eq!(g.row_range(), VisibleRange::new(0, 6));
}

#[test]
fn grid_last_row_is_clipped_to_count() {
    let mut g = GridVirtualizer::new(GridOptions::new(1003, 5, 100.0, 50.0).with_overscan(0));
    g.set_viewport_height(120.0);
    g.set_scroll_top(1.0e9);

    assert_eq!(g.row_count(), 201);
    let mut cells = Vec::new();
    g.collect_visible_cells(&mut cells);
    let indices: Vec<usize> = cells.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1000, 1001, 1002]);
    assert_eq!(g.cell(1003), None);
    assert_eq!(g.cell(1002).map(|c| (c.row, c.column)), Some((200, 2)));
}

#[test]
fn grid_horizontal_scroll_is_independent() {
    let mut g = GridVirtualizer::new(GridOptions::new(100, 10, 100.0, 50.0).with_overscan(0));
    g.set_viewport_height(100.0);
    g.set_scroll_left(500.0);
    assert_eq!(g.scroll_left(), 0.0);

    g.set_viewport_width(Some(250.0));
    g.set_scroll_left(150.0);
    g.set_scroll_top(50.0);
    // [150, 400) horizontally, [50, 150) vertically.
    assert_eq!(g.column_range(), VisibleRange::new(1, 3));
    assert_eq!(g.row_range(), VisibleRange::new(1, 2));

    let mut cells = Vec::new();
    g.collect_visible_cells(&mut cells);
    let indices: Vec<usize> = cells.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![11, 12, 13, 21, 22, 23]);

    let state = g.viewport_state();
    assert_eq!(state.horizontal, Some(ViewportState::new(150.0, 250.0)));
    g.set_viewport_width(None);
    assert_eq!(g.column_range(), VisibleRange::new(0, 9));
}

#[test]
fn grid_cells_match_brute_force() {
    let mut rng = Lcg::new(5);
    for _ in 0..100 {
        let count = rng.gen_range_usize(0, 400);
        let cols = rng.gen_range_usize(1, 12);
        let (w, h) = (rng.gen_extent(1, 80), rng.gen_extent(1, 80));
        let mut g = GridVirtualizer::new(GridOptions::new(count, cols, w, h).with_overscan(0));
        let (vw, vh) = (rng.gen_extent(1, 300), rng.gen_extent(1, 300));
        let (left, top) = (
            rng.gen_range_u64(0, (cols as f64 * w) as u64) as f64,
            rng.gen_range_u64(0, 2000) as f64,
        );
        g.set_viewport_height(vh);
        g.set_viewport_width(Some(vw));
        g.set_scroll_top(top);
        g.set_scroll_left(left);

        let mut cells = Vec::new();
        g.collect_visible_cells(&mut cells);
        let actual: Vec<usize> = cells.iter().map(|c| c.index).collect();

        let total_h = g.total_extent().height;
        let top = top.min(total_h);
        let expected: Vec<usize> = (0..count)
            .filter(|&i| {
                let (row, col) = ((i / cols) as f64, (i % cols) as f64);
                let rows_hit = row * h < top + vh && (row + 1.0) * h > top;
                let cols_hit = col * w < left + vw && (col + 1.0) * w > left;
                rows_hit && cols_hit
            })
            .collect();
        if top < total_h {
            assert_eq!(actual, expected, "count={count} cols={cols} top={top} left={left}");
        }
    }
}

#[test]
fn grid_without_columns_is_empty() {
    let mut g = GridVirtualizer::new(GridOptions::new(10, 0, 10.0, 10.0));
    g.set_viewport_height(100.0);
    assert_eq!(g.row_count(), 0);
    let out = g.virtualize_grid(&[1, 2, 3], |item, _| *item);
    assert!(out.nodes.is_empty());
    assert_eq!(out.total_extent, GridExtent::default());
}
