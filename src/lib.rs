//! A headless virtual list engine.
//!
//! This crate renders only a bounded window of nodes for an arbitrarily long
//! list, recycling and re-measuring them as the host scrolls, so list length
//! is decoupled from render cost. It covers:
//!
//! - window/range computation over variably-sized items
//! - live size re-measurement with scroll-position correction
//! - keyed node reconciliation between successive windows
//! - an optional synthetic scrollbar for transform-driven rendering
//!
//! It is UI-agnostic: a DOM/TUI/GUI layer implements [`HostSurface`] and
//! drives the engine with scroll offsets, resize batches, and `tick(now_ms)`
//! calls. What gets rendered inside an item is a caller-supplied callback
//! returning a [`NodeSpec`]; the engine owns the window, not the content.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod key;
mod list;
mod options;
mod reconcile;
mod scrollbar;
mod size_cache;
mod state;
mod surface;
mod types;

#[cfg(test)]
mod tests;

pub use list::VirtList;
pub use options::{
    BoundaryCallback, ItemKeyFn, ItemRenderFn, ItemResizeCallback, RangeUpdateCallback,
    RenderControl, ScrollCallback, VirtListOptions,
};
pub use reconcile::RenderNode;
pub use scrollbar::VirtualScrollbar;
pub use state::ReactiveData;
pub use surface::{HostSurface, NodeSpec};
pub use types::{Axis, ItemKey, ItemPos, RenderRange, ResizeEntry, ScrollDirection, SlotSize};

#[doc(hidden)]
pub use key::ListKey;
