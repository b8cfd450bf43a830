use alloc::string::String;
use alloc::vec::Vec;

/// Declarative description of one rendered node: a tag, an ordered attribute
/// list, and optional text content.
///
/// The item render callback produces one of these per (key, window)
/// appearance; the reconciler compares successive specs shallowly (attribute
/// and text equality, no deep content diff) and maps the differences onto
/// [`HostSurface`] calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The seam between the engine and a concrete UI tree.
///
/// A host implements node creation/patching/removal plus the handful of
/// geometry hooks the engine drives: the leading virtual padding, the total
/// content extent, the native scroll position, and (in synthetic-scrollbar
/// mode) the content transform. All extents are integer length units along
/// the configured scroll axis.
///
/// `observe_resize` receives the item key so the host can tag its resize
/// notifications; it is paired with exactly one `unobserve_resize` when the
/// node leaves the window.
pub trait HostSurface<K> {
    /// Host-owned reference to a created visual node.
    type Handle;

    fn create(&mut self, spec: &NodeSpec) -> Self::Handle;
    fn set_attr(&mut self, handle: &mut Self::Handle, name: &str, value: &str);
    fn remove_attr(&mut self, handle: &mut Self::Handle, name: &str);
    fn set_text(&mut self, handle: &mut Self::Handle, text: &str);

    /// Inserts `handle` into the render surface before `anchor`; appends when
    /// `anchor` is `None`.
    fn insert_before(&mut self, handle: &Self::Handle, anchor: Option<&Self::Handle>);
    fn remove(&mut self, handle: &Self::Handle);

    fn observe_resize(&mut self, handle: &Self::Handle, key: &K);
    fn unobserve_resize(&mut self, handle: &Self::Handle);

    /// Current native scroll position. Synthetic-scrollbar hosts may return 0;
    /// the engine tracks the offset itself in that mode.
    fn scroll_offset(&self) -> u64;
    fn set_scroll_offset(&mut self, offset: u64);

    /// Realizes the skipped leading extent (leading padding).
    fn set_virtual_size(&mut self, size: u64);
    /// Realizes the total content extent of the item list.
    fn set_list_total_size(&mut self, size: u64);
    /// Translates the content by `-offset` in synthetic-scrollbar mode.
    fn set_transform_offset(&mut self, offset: u64);
}
