use alloc::sync::Arc;

use crate::surface::NodeSpec;
use crate::types::{Axis, ItemKey, RenderRange};

/// Extracts the stable identity of an item. Keys must be unique across the
/// current list; identity is defined solely by key, never by position.
pub type ItemKeyFn<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Builds the visual content for an item.
///
/// Invoked once per (key, window) appearance; the created node is cached per
/// key across windows by the reconciler and only content-patched while the
/// key stays in the window.
pub type ItemRenderFn<T> = Arc<dyn Fn(&T) -> NodeSpec + Send + Sync>;

/// Scroll event passthrough, fired with the raw offset before any range work.
pub type ScrollCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Boundary-reached callback, fired with the first (top) or last (bottom)
/// item of the list.
pub type BoundaryCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Fired when a rendered item's measured extent changes.
pub type ItemResizeCallback<K> = Arc<dyn Fn(&K, u32) + Send + Sync>;

/// Fired when the strictly visible range changes: `(in_view_begin, in_view_end)`.
pub type RangeUpdateCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Render-window override hook.
///
/// Receives the computed visible range and returns the render range to
/// materialize instead of the buffered default. May narrow or widen; the
/// result is clamped to list bounds.
pub type RenderControl = Arc<dyn Fn(usize, usize) -> RenderRange + Send + Sync>;

/// Configuration for [`crate::VirtList`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
pub struct VirtListOptions<T, K = ItemKey> {
    pub item_key: ItemKeyFn<T, K>,
    pub item_render: ItemRenderFn<T>,

    /// Estimated item extent, used for every item never measured.
    pub item_size: u32,
    /// Space between items, folded into every per-item extent.
    pub gap: u32,
    /// Fixed-size mode: every item is exactly `item_size + gap`; measurements
    /// are ignored.
    pub fixed: bool,
    /// Scroll axis. Host-interpreted; the engine's math is axis-agnostic.
    pub axis: Axis,

    /// Symmetric buffer item count, used when the directional buffers are unset.
    pub buffer: usize,
    pub buffer_top: Option<usize>,
    pub buffer_bottom: Option<usize>,

    /// Index the first range computation is anchored at.
    pub start: usize,
    /// Boundary-reached tolerance; an effective floor of 2 units always applies.
    pub scroll_distance: u64,
    /// Replaces native scroll-driven rendering with the synthetic scrollbar
    /// and transform-driven positioning.
    pub use_virtual_scrollbar: bool,

    pub on_scroll: Option<ScrollCallback>,
    pub on_to_top: Option<BoundaryCallback<T>>,
    pub on_to_bottom: Option<BoundaryCallback<T>>,
    pub on_item_resize: Option<ItemResizeCallback<K>>,
    pub on_range_update: Option<RangeUpdateCallback>,
    pub render_control: Option<RenderControl>,
}

impl<T, K> VirtListOptions<T, K> {
    /// Creates options from the two mandatory collaborators: the key extractor
    /// and the item render callback. Everything else defaults to a vertical,
    /// variable-size list with a 40-unit estimate and no buffers.
    pub fn new(
        item_key: impl Fn(&T) -> K + Send + Sync + 'static,
        item_render: impl Fn(&T) -> NodeSpec + Send + Sync + 'static,
    ) -> Self {
        Self {
            item_key: Arc::new(item_key),
            item_render: Arc::new(item_render),
            item_size: 40,
            gap: 0,
            fixed: false,
            axis: Axis::Vertical,
            buffer: 0,
            buffer_top: None,
            buffer_bottom: None,
            start: 0,
            scroll_distance: 0,
            use_virtual_scrollbar: false,
            on_scroll: None,
            on_to_top: None,
            on_to_bottom: None,
            on_item_resize: None,
            on_range_update: None,
            render_control: None,
        }
    }

    pub fn with_item_size(mut self, item_size: u32) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_buffer_top(mut self, buffer_top: usize) -> Self {
        self.buffer_top = Some(buffer_top);
        self
    }

    pub fn with_buffer_bottom(mut self, buffer_bottom: usize) -> Self {
        self.buffer_bottom = Some(buffer_bottom);
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn with_scroll_distance(mut self, scroll_distance: u64) -> Self {
        self.scroll_distance = scroll_distance;
        self
    }

    pub fn with_virtual_scrollbar(mut self, use_virtual_scrollbar: bool) -> Self {
        self.use_virtual_scrollbar = use_virtual_scrollbar;
        self
    }

    pub fn with_on_scroll(mut self, f: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(f));
        self
    }

    pub fn with_on_to_top(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_to_top = Some(Arc::new(f));
        self
    }

    pub fn with_on_to_bottom(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_to_bottom = Some(Arc::new(f));
        self
    }

    pub fn with_on_item_resize(mut self, f: impl Fn(&K, u32) + Send + Sync + 'static) -> Self {
        self.on_item_resize = Some(Arc::new(f));
        self
    }

    pub fn with_on_range_update(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_range_update = Some(Arc::new(f));
        self
    }

    pub fn with_render_control(
        mut self,
        f: impl Fn(usize, usize) -> RenderRange + Send + Sync + 'static,
    ) -> Self {
        self.render_control = Some(Arc::new(f));
        self
    }

    /// Effective top buffer: `buffer_top` when set, the symmetric `buffer`
    /// otherwise.
    pub(crate) fn effective_buffer_top(&self) -> usize {
        self.buffer_top.unwrap_or(self.buffer)
    }

    pub(crate) fn effective_buffer_bottom(&self) -> usize {
        self.buffer_bottom.unwrap_or(self.buffer)
    }
}

impl<T, K> Clone for VirtListOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            item_key: Arc::clone(&self.item_key),
            item_render: Arc::clone(&self.item_render),
            item_size: self.item_size,
            gap: self.gap,
            fixed: self.fixed,
            axis: self.axis,
            buffer: self.buffer,
            buffer_top: self.buffer_top,
            buffer_bottom: self.buffer_bottom,
            start: self.start,
            scroll_distance: self.scroll_distance,
            use_virtual_scrollbar: self.use_virtual_scrollbar,
            on_scroll: self.on_scroll.clone(),
            on_to_top: self.on_to_top.clone(),
            on_to_bottom: self.on_to_bottom.clone(),
            on_item_resize: self.on_item_resize.clone(),
            on_range_update: self.on_range_update.clone(),
            render_control: self.render_control.clone(),
        }
    }
}

impl<T, K> core::fmt::Debug for VirtListOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtListOptions")
            .field("item_size", &self.item_size)
            .field("gap", &self.gap)
            .field("fixed", &self.fixed)
            .field("axis", &self.axis)
            .field("buffer", &self.buffer)
            .field("buffer_top", &self.buffer_top)
            .field("buffer_bottom", &self.buffer_bottom)
            .field("start", &self.start)
            .field("scroll_distance", &self.scroll_distance)
            .field("use_virtual_scrollbar", &self.use_virtual_scrollbar)
            .finish_non_exhaustive()
    }
}
