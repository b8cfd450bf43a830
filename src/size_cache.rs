use crate::key::{KeyMap, ListKey};

/// Key → last-measured extent along the scroll axis.
///
/// Entries exist only for items that have been rendered (and measured) at
/// least once; every other lookup falls back to the configured estimate.
/// Mutation flows exclusively through the controller's resize handling, so
/// range math, total-size math and position lookups all observe the same
/// estimate-fallback behavior by going through [`SizeCache::get`].
#[derive(Clone, Debug)]
pub(crate) struct SizeCache<K> {
    sizes: KeyMap<K, u32>,
    fixed: bool,
    item_size: u32,
    gap: u32,
}

impl<K: ListKey> SizeCache<K> {
    pub(crate) fn new(fixed: bool, item_size: u32, gap: u32) -> Self {
        Self {
            sizes: KeyMap::new(),
            fixed,
            item_size,
            gap,
        }
    }

    /// Measured extent of the item, or the estimate when unmeasured.
    ///
    /// Fixed mode returns `item_size + gap` unconditionally. Measured extents
    /// are expected to already include the inter-item gap, so the returned
    /// value is directly summable in both modes.
    pub(crate) fn get(&self, key: &K) -> u32 {
        if self.fixed {
            return self.item_size.saturating_add(self.gap);
        }
        self.sizes
            .get(key)
            .copied()
            .unwrap_or_else(|| self.item_size.saturating_add(self.gap))
    }

    pub(crate) fn set(&mut self, key: K, size: u32) {
        self.sizes.insert(key, size);
    }

    /// Drops a measurement; the key falls back to the estimate again.
    pub(crate) fn delete(&mut self, key: &K) {
        self.sizes.remove(key);
    }

    pub(crate) fn clear(&mut self) {
        self.sizes.clear();
    }

    pub(crate) fn fixed(&self) -> bool {
        self.fixed
    }

    /// Per-item extent in fixed mode.
    pub(crate) fn fixed_size(&self) -> u32 {
        self.item_size.saturating_add(self.gap)
    }

    pub(crate) fn len(&self) -> usize {
        self.sizes.len()
    }
}
