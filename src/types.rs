/// Scroll axis of a list instance. The engine's math is axis-agnostic; hosts
/// use this to decide which coordinate to measure and which scroll property
/// to drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Direction of the last scroll movement, named after list traversal:
/// `Forward` moves toward the list start (offset decreasing), `Backward`
/// toward the list end (offset increasing). The same semantics apply to
/// native scrolling and the synthetic scrollbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// An inclusive index range of materialized items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderRange {
    pub begin: usize,
    pub end: usize,
}

/// Measured extents of the viewport and the four optional decorative slots.
///
/// Slot nodes live on the host side; the engine only consumes their sizes,
/// delivered through [`ResizeEntry`] batches. An absent slot simply stays 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSize {
    pub client_size: u32,
    pub header_size: u32,
    pub footer_size: u32,
    pub sticky_header_size: u32,
    pub sticky_footer_size: u32,
}

impl SlotSize {
    /// Summed extent of the four slots (excludes the viewport itself).
    pub fn slot_total(&self) -> u64 {
        self.header_size as u64
            + self.footer_size as u64
            + self.sticky_header_size as u64
            + self.sticky_footer_size as u64
    }
}

/// One entry of a host resize notification batch.
///
/// Item extent deltas are aggregated across the whole batch before the engine
/// applies a single total-size update and decides on drift correction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeEntry<K> {
    Client(u32),
    Header(u32),
    Footer(u32),
    StickyHeader(u32),
    StickyFooter(u32),
    Item { key: K, size: u32 },
}

/// Position of an item along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPos {
    /// Start offset of the item.
    pub top: u64,
    /// Extent of the item itself.
    pub current: u32,
    /// End offset of the item (`top + current`).
    pub bottom: u64,
}

/// Default key type for lists keyed by a numeric id.
pub type ItemKey = u64;
