use crate::reconcile::diff_children;
use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::collections::HashMap;

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
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

/// A recording host surface: ordered children, stored specs, op counters,
/// and an optional scroll error to exercise the settle retries.
#[derive(Debug, Default)]
struct SimSurface {
    next_id: usize,
    children: Vec<usize>,
    specs: HashMap<usize, NodeSpec>,
    observed: HashMap<usize, u64>,

    creates: usize,
    removes: usize,
    inserts: usize,
    patches: usize,
    scroll_sets: usize,

    scroll_offset: u64,
    virtual_size: u64,
    list_total_size: u64,
    transform_offset: u64,

    /// Subtracted from the next `set_scroll_offset` only (one-shot drift).
    error_once: u64,
    /// Subtracted from every `set_scroll_offset` (never converges).
    error_sticky: u64,
}

impl SimSurface {
    fn ops(&self) -> (usize, usize, usize, usize) {
        (self.creates, self.removes, self.inserts, self.patches)
    }

    fn texts(&self) -> Vec<String> {
        self.children
            .iter()
            .filter_map(|id| self.specs.get(id))
            .filter_map(|spec| spec.text.clone())
            .collect()
    }
}

impl HostSurface<u64> for SimSurface {
    type Handle = usize;

    fn create(&mut self, spec: &NodeSpec) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.specs.insert(id, spec.clone());
        self.creates += 1;
        id
    }

    fn set_attr(&mut self, handle: &mut usize, name: &str, value: &str) {
        self.patches += 1;
        if let Some(spec) = self.specs.get_mut(handle) {
            if let Some(slot) = spec.attrs.iter_mut().find(|(n, _)| n == name) {
                slot.1 = value.into();
            } else {
                spec.attrs.push((name.into(), value.into()));
            }
        }
    }

    fn remove_attr(&mut self, handle: &mut usize, name: &str) {
        self.patches += 1;
        if let Some(spec) = self.specs.get_mut(handle) {
            spec.attrs.retain(|(n, _)| n != name);
        }
    }

    fn set_text(&mut self, handle: &mut usize, text: &str) {
        self.patches += 1;
        if let Some(spec) = self.specs.get_mut(handle) {
            spec.text = Some(text.into());
        }
    }

    fn insert_before(&mut self, handle: &usize, anchor: Option<&usize>) {
        self.inserts += 1;
        self.children.retain(|id| id != handle);
        match anchor.and_then(|a| self.children.iter().position(|id| id == a)) {
            Some(pos) => self.children.insert(pos, *handle),
            None => self.children.push(*handle),
        }
    }

    fn remove(&mut self, handle: &usize) {
        self.removes += 1;
        self.children.retain(|id| id != handle);
        self.specs.remove(handle);
    }

    fn observe_resize(&mut self, handle: &usize, key: &u64) {
        self.observed.insert(*handle, *key);
    }

    fn unobserve_resize(&mut self, handle: &usize) {
        self.observed.remove(handle);
    }

    fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_sets += 1;
        let mut applied = offset.saturating_sub(self.error_sticky);
        if self.error_once > 0 {
            applied = applied.saturating_sub(self.error_once);
            self.error_once = 0;
        }
        self.scroll_offset = applied;
    }

    fn set_virtual_size(&mut self, size: u64) {
        self.virtual_size = size;
    }

    fn set_list_total_size(&mut self, size: u64) {
        self.list_total_size = size;
    }

    fn set_transform_offset(&mut self, offset: u64) {
        self.transform_offset = offset;
    }
}

#[derive(Clone, Debug)]
struct Row {
    id: u64,
    text: String,
}

fn rows_range(start: u64, end: u64) -> Vec<Row> {
    (start..end)
        .map(|id| Row {
            id,
            text: format!("row {id}"),
        })
        .collect()
}

fn rows(n: usize) -> Vec<Row> {
    rows_range(0, n as u64)
}

fn base_options() -> VirtListOptions<Row, u64> {
    VirtListOptions::new(
        |row: &Row| row.id,
        |row: &Row| NodeSpec::new("div").with_text(row.text.clone()),
    )
}

fn fixed_list(n: usize, item_size: u32, buffer: usize, client: u32) -> VirtList<Row, u64, SimSurface> {
    let options = base_options()
        .with_item_size(item_size)
        .with_fixed(true)
        .with_buffer(buffer);
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(client)]);
    list.init(rows(n));
    list
}

fn variable_list(n: usize, estimate: u32, buffer: usize, client: u32) -> VirtList<Row, u64, SimSurface> {
    let options = base_options().with_item_size(estimate).with_buffer(buffer);
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(client)]);
    list.init(rows(n));
    list
}

fn expected_virtual_size(list: &VirtList<Row, u64, SimSurface>) -> u64 {
    let data = list.reactive_data();
    (0..data.render_begin)
        .map(|i| list.item_size(&(i as u64)) as u64)
        .sum()
}

fn range_extent(list: &VirtList<Row, u64, SimSurface>, begin: usize, end_inclusive: usize) -> u64 {
    (begin..=end_inclusive)
        .map(|i| list.item_size(&(i as u64)) as u64)
        .sum()
}

fn assert_invariants(list: &VirtList<Row, u64, SimSurface>) {
    let data = list.reactive_data();
    let len = list.len();
    if len == 0 {
        return;
    }
    assert!(data.in_view_begin <= data.in_view_end);
    assert!(data.in_view_end <= len - 1);
    assert!(data.render_begin <= data.in_view_begin);
    assert!(data.render_end >= data.in_view_end);
    assert!(data.render_end <= len - 1);
    assert_eq!(data.virtual_size, expected_virtual_size(list));
}

// ---- window scenarios ----

#[test]
fn fixed_init_window_matches_reference_scenario() {
    let list = fixed_list(1000, 72, 4, 600);
    let data = list.reactive_data();

    assert_eq!(data.in_view_begin, 0);
    assert_eq!(data.in_view_end, 8);
    assert!(72 * (data.in_view_end as u64 + 1) > 600);
    assert_eq!(data.render_begin, 0);
    assert_eq!(data.render_end, 12);
    assert_eq!(data.virtual_size, 0);
    assert_eq!(data.list_total_size, 72_000);

    // 13 materialized nodes, in window order.
    assert_eq!(list.surface().children.len(), 13);
    assert_eq!(list.surface().texts()[0], "row 0");
    assert_eq!(list.surface().texts()[12], "row 12");

    // Geometry realized on the host.
    assert_eq!(list.surface().virtual_size, 0);
    assert_eq!(list.surface().list_total_size, 72_000);
}

#[test]
fn fixed_mode_accounts_for_gap() {
    let options = base_options()
        .with_item_size(72)
        .with_gap(8)
        .with_fixed(true);
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows(100));

    assert_eq!(list.reactive_data().list_total_size, 100 * 80);
    // 7 * 80 = 560 <= 600 < 640, one extra index past the boundary.
    assert_eq!(list.reactive_data().in_view_end, 7);
}

#[test]
fn scroll_to_index_lands_on_exact_offset() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.scroll_to_index(500);

    let data = list.reactive_data();
    assert_eq!(data.offset, 36_000);
    assert_eq!(list.surface().scroll_offset, 36_000);
    assert_eq!(data.in_view_begin, 500);
    assert_eq!(data.render_begin, 496);
    assert_invariants(&list);
}

#[test]
fn scroll_to_index_past_end_delegates_to_bottom() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.scroll_to_index(5000);

    // Clamped to the scrollable extent, with the settle retry pending.
    assert_eq!(list.reactive_data().offset, 72_000 - 600);
    assert!(list.is_settling());
    assert_eq!(list.reactive_data().in_view_end, 999);
}

#[test]
fn scroll_event_within_same_item_is_throttled() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.on_scroll_event(7200);
    let ops = list.surface().ops();

    // Still inside item 100: no range update, no reconciliation.
    list.on_scroll_event(7210);
    list.on_scroll_event(7250);
    assert_eq!(list.reactive_data().in_view_begin, 100);
    assert_eq!(list.surface().ops(), ops);
}

#[test]
fn offset_under_header_snaps_to_first_item() {
    let mut list = fixed_list(100, 72, 2, 600);
    list.on_resize_batch([ResizeEntry::Header(50)]);
    list.on_scroll_event(3000);
    assert!(list.reactive_data().in_view_begin > 0);

    // Offset inside the header region: snap straight to index 0.
    list.on_scroll_event(40);
    assert_eq!(list.reactive_data().in_view_begin, 0);
    let ops = list.surface().ops();

    // Jitter within the header region is idempotent.
    list.on_scroll_event(30);
    assert_eq!(list.surface().ops(), ops);
}

#[test]
fn viewport_resize_rederives_visible_end() {
    let mut list = fixed_list(1000, 72, 0, 600);
    assert_eq!(list.reactive_data().in_view_end, 8);

    list.on_resize_batch([ResizeEntry::Client(1200)]);
    // 16 * 72 = 1152 <= 1200 < 1224.
    assert_eq!(list.reactive_data().in_view_end, 16);
    assert_invariants(&list);
}

#[test]
fn empty_init_clears_stale_nodes() {
    let mut list = fixed_list(100, 72, 4, 600);
    assert!(!list.surface().children.is_empty());

    list.init(Vec::new());
    assert!(list.surface().children.is_empty());
    assert_eq!(list.reactive_data(), ReactiveData {
        buffer_top: 4,
        buffer_bottom: 4,
        ..ReactiveData::default()
    });
    assert_eq!(list.measurement_cache_len(), 0);
}

#[test]
fn render_control_overrides_buffered_window() {
    let options = base_options()
        .with_item_size(72)
        .with_fixed(true)
        .with_buffer(10)
        .with_render_control(|begin, end| RenderRange { begin, end });
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows(1000));

    let data = list.reactive_data();
    assert_eq!(data.render_begin, data.in_view_begin);
    assert_eq!(data.render_end, data.in_view_end);
    assert_eq!(list.surface().children.len(), data.in_view_end + 1);
}

#[test]
fn manual_render_forces_window_and_virtual_size() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.manual_render(100, 120);

    let data = list.reactive_data();
    assert_eq!(data.render_begin, 100);
    assert_eq!(data.render_end, 120);
    assert_eq!(data.virtual_size, 100 * 72);
    assert_eq!(list.surface().virtual_size, 100 * 72);
    assert_eq!(list.surface().children.len(), 21);
    assert_eq!(list.surface().texts()[0], "row 100");
}

// ---- boundary callbacks ----

#[test]
fn top_boundary_fires_exactly_once() {
    let fired = Arc::new(AtomicUsize::new(0));
    let first_id = Arc::new(AtomicU64::new(u64::MAX));
    let fired_cb = Arc::clone(&fired);
    let first_cb = Arc::clone(&first_id);

    let options = base_options()
        .with_item_size(72)
        .with_fixed(true)
        .with_buffer(4)
        .with_on_to_top(move |row: &Row| {
            fired_cb.fetch_add(1, Ordering::SeqCst);
            first_cb.store(row.id, Ordering::SeqCst);
        });
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows(1000));

    list.on_scroll_event(5000);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    list.scroll_to_offset(0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(first_id.load(Ordering::SeqCst), 0);

    // Sub-threshold jitter must not re-fire the callback.
    list.on_scroll_event(1);
    list.on_scroll_event(0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Leaving the zone re-arms it.
    list.on_scroll_event(5000);
    list.scroll_to_offset(0);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn bottom_boundary_fires_with_last_item() {
    let last_id = Arc::new(AtomicU64::new(u64::MAX));
    let last_cb = Arc::clone(&last_id);

    let options = base_options()
        .with_item_size(72)
        .with_fixed(true)
        .with_buffer(4)
        .with_on_to_bottom(move |row: &Row| {
            last_cb.store(row.id, Ordering::SeqCst);
        });
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows(1000));

    list.on_scroll_event(72_000 - 600);
    assert_eq!(last_id.load(Ordering::SeqCst), 999);
}

// ---- measurement and drift correction ----

#[test]
fn variable_resize_drift_corrects_offset() {
    let mut list = variable_list(100, 72, 6, 600);
    list.on_scroll_event(720);
    assert_eq!(list.reactive_data().in_view_begin, 10);

    // A small upward move arms the correction; index 9 is now the anchor.
    list.on_scroll_event(715);
    assert_eq!(list.reactive_data().in_view_begin, 9);
    let anchor_gap = 715 - list.item_pos_by_index(9).top;

    // Item 3 (already rendered: the window starts at 3) re-measures 72 -> 120.
    list.on_resize_batch([ResizeEntry::Item { key: 3, size: 120 }]);

    let data = list.reactive_data();
    assert_eq!(data.offset, 715 + 48);
    assert_eq!(data.list_total_size, 99 * 72 + 120);
    // The on-screen anchor did not move.
    assert_eq!(data.offset - list.item_pos_by_index(9).top, anchor_gap);
    assert_invariants(&list);
}

#[test]
fn resize_batch_aggregates_before_correcting() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_cb = Arc::clone(&fired);
    let options = base_options()
        .with_item_size(72)
        .with_buffer(6)
        .with_on_item_resize(move |_key: &u64, _size: u32| {
            fired_cb.fetch_add(1, Ordering::SeqCst);
        });
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows(100));

    list.on_scroll_event(720);
    list.on_scroll_event(715);
    let sets_before = list.surface().scroll_sets;

    // One batch: +48, -20, +10 => a single corrected scroll of +38.
    list.on_resize_batch([
        ResizeEntry::Item { key: 3, size: 120 },
        ResizeEntry::Item { key: 4, size: 52 },
        ResizeEntry::Item { key: 5, size: 82 },
    ]);

    assert_eq!(fired.load(Ordering::SeqCst), 3);
    assert_eq!(list.reactive_data().offset, 715 + 38);
    assert_eq!(list.surface().scroll_sets, sets_before + 1);
    assert_invariants(&list);
}

#[test]
fn caller_scroll_aborts_pending_drift_correction() {
    let mut list = variable_list(100, 72, 6, 600);
    list.on_scroll_event(720);
    list.on_scroll_event(715);

    // The caller issues its own authoritative position...
    list.scroll_to_offset(400);
    // ...so the next batch's delta must not be compounded onto it.
    list.on_resize_batch([ResizeEntry::Item { key: 4, size: 172 }]);
    assert_eq!(list.reactive_data().offset, 400);

    // The abort flag is single-shot: a later upward move re-arms the
    // correction and the next batch applies it.
    list.on_scroll_event(600);
    list.on_scroll_event(500);
    assert_eq!(list.reactive_data().in_view_begin, 5);
    list.on_resize_batch([ResizeEntry::Item { key: 5, size: 172 }]);
    assert_eq!(list.reactive_data().offset, 500 + 100);
}

#[test]
fn fixed_mode_ignores_item_measurements() {
    let mut list = fixed_list(100, 72, 4, 600);
    list.on_resize_batch([ResizeEntry::Item { key: 3, size: 500 }]);

    assert_eq!(list.item_size(&3), 72);
    assert_eq!(list.reactive_data().list_total_size, 7200);
}

#[test]
fn size_cache_falls_back_and_invalidates() {
    let mut list = variable_list(100, 72, 4, 600);
    assert_eq!(list.item_size(&5), 72);

    list.on_resize_batch([ResizeEntry::Item { key: 5, size: 100 }]);
    assert_eq!(list.item_size(&5), 100);
    assert_eq!(list.measurement_cache_len(), 1);

    list.clear_item_size(&5);
    assert_eq!(list.item_size(&5), 72);
    assert_eq!(list.measurement_cache_len(), 0);
}

// ---- prefix insertion / removal ----

#[test]
fn added_list_to_top_keeps_screen_anchor() {
    let options = base_options().with_item_size(72).with_fixed(true).with_buffer(4);
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows_range(100, 200));

    list.on_scroll_event(720);
    let anchor = list.list()[list.reactive_data().in_view_begin].id;
    assert_eq!(anchor, 110);

    list.added_list_to_top(rows_range(90, 100));
    let data = list.reactive_data();
    assert_eq!(data.offset, 1440);
    assert_eq!(list.list()[data.in_view_begin].id, anchor);
    assert_eq!(data.list_total_size, 110 * 72);
    assert_invariants_shifted(&list);
}

#[test]
fn deleted_list_to_top_restores_offset() {
    let options = base_options().with_item_size(72).with_fixed(true).with_buffer(4);
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows_range(90, 200));

    list.on_scroll_event(1440);
    let anchor = list.list()[list.reactive_data().in_view_begin].id;

    list.deleted_list_to_top(10);
    let data = list.reactive_data();
    assert_eq!(data.offset, 720);
    assert_eq!(list.list()[data.in_view_begin].id, anchor);
    assert_eq!(data.list_total_size, 100 * 72);
    assert_invariants_shifted(&list);
}

/// Same checks as `assert_invariants`, for lists whose ids are not 0-based.
fn assert_invariants_shifted(list: &VirtList<Row, u64, SimSurface>) {
    let data = list.reactive_data();
    let len = list.len();
    assert!(data.render_begin <= data.in_view_begin);
    assert!(data.in_view_begin <= data.in_view_end);
    assert!(data.in_view_end <= data.render_end);
    assert!(data.render_end <= len - 1);
    let expected: u64 = list.list()[..data.render_begin]
        .iter()
        .map(|row| list.item_size(&row.id) as u64)
        .sum();
    assert_eq!(data.virtual_size, expected);
}

// ---- reconciler ----

#[test]
fn reconciler_minimal_churn_on_window_shift() {
    let mut surface = SimSurface::default();
    let spec = |text: &str| NodeSpec::new("div").with_text(text);

    let old = diff_children(
        &mut surface,
        Vec::new(),
        vec![(1, spec("a")), (2, spec("b")), (3, spec("c"))],
    );
    assert_eq!(surface.creates, 3);
    assert_eq!(surface.texts(), ["a", "b", "c"]);
    let handle_a = old[0].handle;
    let handle_c = old[2].handle;

    let new = diff_children(
        &mut surface,
        old,
        vec![(1, spec("a")), (3, spec("c")), (4, spec("d"))],
    );

    // Exactly one destroy (b), exactly one create (d), a and c reused.
    assert_eq!(surface.removes, 1);
    assert_eq!(surface.creates, 4);
    assert_eq!(new[0].handle, handle_a);
    assert_eq!(new[1].handle, handle_c);
    assert_eq!(surface.texts(), ["a", "c", "d"]);
    // Resize observation follows the window membership.
    assert_eq!(surface.observed.len(), 3);
}

#[test]
fn reconciler_patches_text_and_attrs_in_place() {
    let mut surface = SimSurface::default();

    let old = diff_children(
        &mut surface,
        Vec::new(),
        vec![(
            1,
            NodeSpec::new("div")
                .with_attr("class", "item")
                .with_attr("stale", "yes")
                .with_text("before"),
        )],
    );
    let handle = old[0].handle;
    let creates = surface.creates;

    let new = diff_children(
        &mut surface,
        old,
        vec![(
            1,
            NodeSpec::new("div")
                .with_attr("class", "item selected")
                .with_text("after"),
        )],
    );

    assert_eq!(surface.creates, creates);
    assert_eq!(new[0].handle, handle);
    let spec = &surface.specs[&handle];
    assert_eq!(spec.text.as_deref(), Some("after"));
    assert_eq!(spec.attr("class"), Some("item selected"));
    assert_eq!(spec.attr("stale"), None);
}

#[test]
fn reconciler_keeps_order_of_consecutive_new_nodes() {
    let mut surface = SimSurface::default();
    let spec = |text: &str| NodeSpec::new("div").with_text(text);

    let old = diff_children(&mut surface, Vec::new(), vec![(5, spec("e")), (6, spec("f"))]);
    let new = diff_children(
        &mut surface,
        old,
        vec![(3, spec("c")), (4, spec("d")), (5, spec("e")), (6, spec("f"))],
    );

    assert_eq!(new.len(), 4);
    assert_eq!(surface.texts(), ["c", "d", "e", "f"]);
}

// ---- navigation ----

#[test]
fn scroll_into_view_is_minimal() {
    let mut list = fixed_list(100, 72, 4, 600);

    // Fully visible: no movement.
    list.scroll_into_view(3);
    assert_eq!(list.reactive_data().offset, 0);

    // Straddling the bottom edge (item 8 spans 576..648): minimal reveal.
    list.scroll_into_view(8);
    assert_eq!(list.reactive_data().offset, 648 - 600);

    // Straddling the top edge: minimal reveal of the leading edge.
    list.scroll_into_view(0);
    assert_eq!(list.reactive_data().offset, 0);

    // Far below the viewport: leading-edge alignment.
    list.scroll_into_view(50);
    assert_eq!(list.reactive_data().offset, 50 * 72);
}

#[test]
fn settle_retries_until_position_matches() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.surface_mut().error_once = 7;

    list.scroll_to_bottom();
    assert!(list.is_settling());
    assert_eq!(list.surface().scroll_offset, 71_400 - 7);

    list.tick(10);
    assert_eq!(list.surface().scroll_offset, 71_400);

    list.tick(20);
    assert!(!list.is_settling());
    assert_eq!(list.reactive_data().in_view_end, 999);
}

#[test]
fn settle_gives_up_after_attempt_cap() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.surface_mut().error_sticky = 50;

    list.scroll_to_bottom();
    let mut now = 0;
    for _ in 0..40 {
        now += 10;
        list.tick(now);
    }

    assert!(!list.is_settling());
    // The initial issue plus nine retries, then silence.
    assert_eq!(list.surface().scroll_sets, 10);
}

#[test]
fn scroll_to_top_settles_immediately_when_exact() {
    let mut list = fixed_list(1000, 72, 4, 600);
    list.scroll_to_index(500);

    list.scroll_to_top();
    list.tick(5);
    assert!(!list.is_settling());
    assert_eq!(list.reactive_data().offset, 0);
    assert_eq!(list.reactive_data().in_view_begin, 0);
}

// ---- synthetic scrollbar ----

#[test]
fn scrollbar_thumb_geometry() {
    let sb = VirtualScrollbar::new(100_000, 600);
    assert_eq!(sb.thumb_size(), 20);

    let mut sb = VirtualScrollbar::new(1200, 600);
    assert_eq!(sb.thumb_size(), 300);
    sb.set_offset(600);
    assert_eq!(sb.thumb_top(), 300);
    sb.set_offset(300);
    assert_eq!(sb.thumb_top(), 150);
}

#[test]
fn scrollbar_track_click_centers_thumb() {
    let mut sb = VirtualScrollbar::new(1200, 600);
    assert_eq!(sb.track_click(0), 0);
    // Click at the very end: thumb clamps to the track, offset to max.
    assert_eq!(sb.track_click(600), 600);
    // Click centered on the middle.
    assert_eq!(sb.track_click(300), 300);
}

#[test]
fn scrollbar_drag_is_delta_based_and_clamped() {
    let mut sb = VirtualScrollbar::new(1200, 600);
    assert_eq!(sb.drag_move(50), None);

    sb.drag_start(100);
    assert_eq!(sb.drag_move(200), Some(100));
    assert_eq!(sb.drag_move(100_000), Some(600));
    assert_eq!(sb.drag_move(-100_000), Some(0));
    sb.drag_end();
    assert_eq!(sb.drag_move(500), None);
}

#[test]
fn scrollbar_wheel_down_increases_offset() {
    let mut sb = VirtualScrollbar::new(1200, 600);
    assert_eq!(sb.wheel(100), 50);
    assert_eq!(sb.wheel(100), 100);
    assert_eq!(sb.wheel(-400), 0);
    assert_eq!(sb.wheel(10_000), 600);
}

#[test]
fn scrollbar_auto_hides_unless_dragging() {
    let mut sb = VirtualScrollbar::new(1200, 600);
    sb.hover_enter();
    assert!(sb.is_visible());

    sb.hover_leave(0);
    sb.tick(999);
    assert!(sb.is_visible());
    sb.tick(1000);
    assert!(!sb.is_visible());

    sb.hover_enter();
    sb.drag_start(0);
    sb.hover_leave(2000);
    sb.tick(10_000);
    assert!(sb.is_visible());
}

#[test]
fn synthetic_mode_drives_transform_and_range() {
    let scrolled = Arc::new(AtomicU64::new(u64::MAX));
    let scrolled_cb = Arc::clone(&scrolled);
    let options = base_options()
        .with_item_size(72)
        .with_fixed(true)
        .with_buffer(4)
        .with_virtual_scrollbar(true)
        .with_on_scroll(move |offset| {
            scrolled_cb.store(offset, Ordering::SeqCst);
        });
    let mut list = VirtList::new(SimSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init(rows(1000));

    let sb = list.scrollbar().unwrap();
    assert_eq!(sb.content_size(), 72_000);
    assert_eq!(sb.viewport_size(), 600);

    list.scrollbar_wheel(1200);
    let data = list.reactive_data();
    assert_eq!(data.offset, 600);
    assert_eq!(list.surface().transform_offset, 600);
    assert_eq!(data.in_view_begin, 8);
    assert_eq!(scrolled.load(Ordering::SeqCst), 600);

    list.scrollbar_drag_start(0);
    list.scrollbar_drag_move(300);
    // 300 / 600 of the scrollable 71_400 => 35_700 over the wheel position.
    assert_eq!(list.reactive_data().offset, 600 + 35_700);
    assert_eq!(
        list.surface().transform_offset,
        list.reactive_data().offset
    );
    assert_invariants(&list);
}

// ---- fuzz ----

#[test]
fn virtual_size_identity_under_random_resize_and_scroll() {
    let mut rng = Lcg::new(0x5eed);

    for round in 0..8u64 {
        let n = 50 + (round as usize) * 37;
        let mut list = variable_list(n, 40 + (round as u32) * 7, (round % 4) as usize, 400);
        assert_invariants(&list);

        for _ in 0..400 {
            match rng.gen_range_u64(0, 3) {
                0 => {
                    let max = list
                        .reactive_data()
                        .list_total_size
                        .saturating_sub(400)
                        .max(1);
                    let prev_begin = list.reactive_data().in_view_begin;
                    let offset = rng.gen_range_u64(0, max);
                    list.on_scroll_event(offset);

                    // Coverage on a freshly recomputed range: anchored at the
                    // item containing the offset, it spans the viewport or
                    // exhausts the list.
                    let data = list.reactive_data();
                    if data.in_view_begin != prev_begin && data.in_view_begin > 0 {
                        assert!(list.item_pos_by_index(data.in_view_begin).top <= data.offset);
                        if data.in_view_end < list.len() - 1 {
                            assert!(
                                range_extent(&list, data.in_view_begin, data.in_view_end) > 400
                            );
                        }
                    }
                }
                1 => {
                    // Hosts only report sizes for observed (rendered) nodes,
                    // so measurements stay within the render window.
                    let window = list.reactive_data();
                    let batch: Vec<ResizeEntry<u64>> = (0..rng.gen_range_usize(1, 6))
                        .map(|_| ResizeEntry::Item {
                            key: rng.gen_range_u64(
                                window.render_begin as u64,
                                window.render_end as u64 + 1,
                            ),
                            size: rng.gen_range_u32(20, 160),
                        })
                        .collect();
                    list.on_resize_batch(batch);
                }
                _ => {
                    let index = rng.gen_range_usize(0, n);
                    list.scroll_to_index(index);
                    list.tick(rng.gen_range_u64(0, 10_000));
                }
            }
            assert_invariants(&list);
        }
    }
}
