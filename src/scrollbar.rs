/// Minimum thumb extent, so the thumb stays grabbable on huge lists.
const MIN_THUMB_SIZE: u64 = 20;
/// Wheel delta scale, applied as `delta * WHEEL_SPEED / 100`.
const WHEEL_SPEED: i64 = 50;
/// Auto-hide delay after the pointer leaves the track.
const HIDE_DELAY_MS: u64 = 1000;

/// A headless synthetic scrollbar: a decoupled scroll-position driver used
/// when the real scroll container is hidden and content is positioned by
/// transform instead of native scrolling.
///
/// The scrollbar owns thumb geometry and input interpretation only. Every
/// input method returns the resulting content offset; the owning controller
/// translates the content and re-runs range computation with it. Visibility
/// is hover-driven with a 1 s auto-hide advanced by [`tick`](Self::tick),
/// suppressed while dragging.
///
/// All geometry is in integer length units along the scroll axis; offsets map
/// linearly between thumb travel `[0, viewport - thumb]` and content travel
/// `[0, content - viewport]`.
#[derive(Clone, Debug, Default)]
pub struct VirtualScrollbar {
    content_size: u64,
    viewport_size: u64,
    offset: u64,

    dragging: bool,
    drag_start_pos: i64,
    drag_start_offset: u64,

    visible: bool,
    hide_at_ms: Option<u64>,
}

impl VirtualScrollbar {
    pub fn new(content_size: u64, viewport_size: u64) -> Self {
        Self {
            content_size,
            viewport_size,
            ..Self::default()
        }
    }

    /// Thumb extent: proportional to the visible share of the content, never
    /// below [`MIN_THUMB_SIZE`], never above the viewport.
    pub fn thumb_size(&self) -> u64 {
        if self.content_size == 0 {
            return self.viewport_size;
        }
        let proportional = self.viewport_size * self.viewport_size / self.content_size;
        proportional.max(MIN_THUMB_SIZE).min(self.viewport_size)
    }

    /// Thumb start position along the track.
    pub fn thumb_top(&self) -> u64 {
        let max_scroll = self.max_scroll();
        if max_scroll == 0 {
            return 0;
        }
        self.offset * self.max_thumb_top() / max_scroll
    }

    fn max_thumb_top(&self) -> u64 {
        self.viewport_size.saturating_sub(self.thumb_size())
    }

    fn max_scroll(&self) -> u64 {
        self.content_size.saturating_sub(self.viewport_size)
    }

    fn clamp(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll())
    }

    /// Track click: jumps so the thumb center aligns with the click point.
    /// Returns the new content offset.
    pub fn track_click(&mut self, pos: u64) -> u64 {
        let max_thumb_top = self.max_thumb_top();
        if max_thumb_top == 0 {
            return self.offset;
        }
        let thumb_top = pos
            .saturating_sub(self.thumb_size() / 2)
            .min(max_thumb_top);
        self.offset = thumb_top * self.max_scroll() / max_thumb_top;
        self.offset
    }

    /// Begins a thumb drag at the given pointer coordinate. Keeps the
    /// scrollbar visible until the drag ends.
    pub fn drag_start(&mut self, pos: i64) {
        self.dragging = true;
        self.drag_start_pos = pos;
        self.drag_start_offset = self.offset;
        self.show();
    }

    /// Drag movement, delta-based and clamped to bounds. Returns the new
    /// content offset, or `None` when no drag is active.
    pub fn drag_move(&mut self, pos: i64) -> Option<u64> {
        if !self.dragging {
            return None;
        }
        let track = self.viewport_size as i64;
        if track == 0 {
            return Some(self.offset);
        }
        let delta = pos - self.drag_start_pos;
        let delta_offset = delta.saturating_mul(self.max_scroll() as i64) / track;
        let target = self.drag_start_offset as i64 + delta_offset;
        self.offset = self.clamp(target.max(0) as u64);
        Some(self.offset)
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    /// Wheel input. Positive `delta` (wheel-down) increases the offset.
    /// Returns the new content offset.
    pub fn wheel(&mut self, delta: i64) -> u64 {
        let delta_offset = delta.saturating_mul(WHEEL_SPEED) / 100;
        let target = self.offset as i64 + delta_offset;
        self.offset = self.clamp(target.max(0) as u64);
        self.offset
    }

    /// Pointer entered the container: show, cancel any pending hide.
    pub fn hover_enter(&mut self) {
        self.show();
    }

    /// Pointer left the container: schedule the auto-hide, unless a drag is
    /// in progress.
    pub fn hover_leave(&mut self, now_ms: u64) {
        if self.dragging {
            return;
        }
        self.hide_at_ms = Some(now_ms + HIDE_DELAY_MS);
    }

    /// Advances the auto-hide timer.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(hide_at) = self.hide_at_ms {
            if now_ms >= hide_at && !self.dragging {
                self.visible = false;
                self.hide_at_ms = None;
            }
        }
    }

    fn show(&mut self) {
        self.visible = true;
        self.hide_at_ms = None;
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = self.clamp(offset);
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Updates the content extent; the current offset is re-clamped.
    pub fn set_content_size(&mut self, content_size: u64) {
        self.content_size = content_size;
        self.offset = self.clamp(self.offset);
    }

    pub fn set_viewport_size(&mut self, viewport_size: u64) {
        self.viewport_size = viewport_size;
        self.offset = self.clamp(self.offset);
    }

    pub fn content_size(&self) -> u64 {
        self.content_size
    }

    pub fn viewport_size(&self) -> u64 {
        self.viewport_size
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
