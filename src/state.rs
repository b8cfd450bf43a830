/// The engine's single mutable state record.
///
/// Owned exclusively by [`crate::VirtList`]; callers read it through
/// [`crate::VirtList::reactive_data`], which returns a value snapshot. All
/// extents are in length units along the scroll axis.
///
/// Invariants maintained by the controller:
/// - `in_view_begin <= in_view_end`, both within list bounds
/// - `render_begin <= in_view_begin` and `render_end >= in_view_end`
/// - `virtual_size` equals the summed extent of items in `[0, render_begin)`
/// - `list_total_size` equals the summed extent of all items
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactiveData {
    /// Current scroll offset.
    pub offset: u64,
    /// Summed extent of all items (slots excluded).
    pub list_total_size: u64,
    /// Extent of the skipped leading region, realized as leading padding.
    pub virtual_size: u64,
    /// First strictly visible index.
    pub in_view_begin: usize,
    /// Last strictly visible index.
    pub in_view_end: usize,
    /// First materialized index (visible range expanded by `buffer_top`).
    pub render_begin: usize,
    /// Last materialized index (visible range expanded by `buffer_bottom`).
    pub render_end: usize,
    /// Buffer item count applied above the visible range.
    pub buffer_top: usize,
    /// Buffer item count applied below the visible range.
    pub buffer_bottom: usize,
}
