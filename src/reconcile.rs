use alloc::vec::Vec;

use crate::key::{KeyMap, ListKey};
use crate::surface::{HostSurface, NodeSpec};

/// One materialized window entry: the item key, the spec it was last rendered
/// with, and the host-owned handle of its visual node.
#[derive(Debug)]
pub struct RenderNode<K, H> {
    pub key: K,
    pub spec: NodeSpec,
    pub handle: H,
}

/// Keyed diff between the previous window's node list and the next one.
///
/// The old list is consumed; surviving handles move into the returned list.
/// Node operations are O(n):
///
/// 1. Every old node whose key is absent from the new list is destroyed
///    (unobserved, then removed from the surface).
/// 2. A single pass over the new list from last to first patches existing
///    nodes in place (shallow attribute/text diff, the node is never moved)
///    and inserts fresh nodes immediately before the current anchor, so
///    consecutive new nodes keep their relative order.
pub(crate) fn diff_children<K, S>(
    surface: &mut S,
    old: Vec<RenderNode<K, S::Handle>>,
    new: Vec<(K, NodeSpec)>,
) -> Vec<RenderNode<K, S::Handle>>
where
    K: ListKey,
    S: HostSurface<K>,
{
    let mut old_index: KeyMap<K, usize> = KeyMap::new();
    for (i, node) in old.iter().enumerate() {
        old_index.insert(node.key.clone(), i);
    }
    let mut new_index: KeyMap<K, usize> = KeyMap::new();
    for (i, (key, _)) in new.iter().enumerate() {
        new_index.insert(key.clone(), i);
    }

    // Destroy before building: a key that dropped out must unregister from
    // resize observation before its node leaves the surface.
    let mut old_slots: Vec<Option<RenderNode<K, S::Handle>>> = Vec::with_capacity(old.len());
    for node in old {
        if new_index.contains_key(&node.key) {
            old_slots.push(Some(node));
        } else {
            surface.unobserve_resize(&node.handle);
            surface.remove(&node.handle);
            old_slots.push(None);
        }
    }

    let mut out: Vec<Option<RenderNode<K, S::Handle>>> = Vec::new();
    out.resize_with(new.len(), || None);

    let mut anchor: Option<usize> = None;
    for (i, (key, spec)) in new.into_iter().enumerate().rev() {
        let reused = old_index
            .get(&key)
            .and_then(|&old_i| old_slots[old_i].take());

        match reused {
            Some(mut node) => {
                patch_node(surface, &mut node, &spec);
                node.spec = spec;
                out[i] = Some(node);
            }
            None => {
                let handle = surface.create(&spec);
                let anchor_handle = anchor.and_then(|a| out[a].as_ref()).map(|n| &n.handle);
                surface.insert_before(&handle, anchor_handle);
                surface.observe_resize(&handle, &key);
                out[i] = Some(RenderNode { key, spec, handle });
            }
        }
        anchor = Some(i);
    }

    out.into_iter().flatten().collect()
}

/// Shallow patch: text when present and changed, attributes added/changed,
/// attributes the new spec no longer carries.
fn patch_node<K, S>(surface: &mut S, node: &mut RenderNode<K, S::Handle>, next: &NodeSpec)
where
    S: HostSurface<K>,
{
    if let Some(text) = &next.text {
        if node.spec.text.as_deref() != Some(text.as_str()) {
            surface.set_text(&mut node.handle, text);
        }
    }

    for (name, value) in &next.attrs {
        if node.spec.attr(name) != Some(value.as_str()) {
            surface.set_attr(&mut node.handle, name, value);
        }
    }

    for (name, _) in &node.spec.attrs {
        if next.attr(name).is_none() {
            surface.remove_attr(&mut node.handle, name);
        }
    }
}
