//! Windowing walk-through: 10k rows, native scrolling, a resize batch with
//! drift correction, and a settle-driven jump to the bottom.
//!
//! Run with: `cargo run --example basic`

use virt_list::{HostSurface, NodeSpec, ResizeEntry, VirtList, VirtListOptions};

/// A console host: keeps the window's node texts and echoes geometry changes.
#[derive(Debug, Default)]
struct ConsoleSurface {
    nodes: Vec<(usize, String)>,
    next_id: usize,
    scroll_offset: u64,
}

impl HostSurface<u64> for ConsoleSurface {
    type Handle = usize;

    fn create(&mut self, spec: &NodeSpec) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push((id, spec.text.clone().unwrap_or_default()));
        id
    }

    fn set_attr(&mut self, _handle: &mut usize, _name: &str, _value: &str) {}
    fn remove_attr(&mut self, _handle: &mut usize, _name: &str) {}

    fn set_text(&mut self, handle: &mut usize, text: &str) {
        if let Some(slot) = self.nodes.iter_mut().find(|(id, _)| id == handle) {
            slot.1 = text.to_string();
        }
    }

    fn insert_before(&mut self, handle: &usize, anchor: Option<&usize>) {
        let entry = match self.nodes.iter().position(|(id, _)| id == handle) {
            Some(pos) => self.nodes.remove(pos),
            None => return,
        };
        match anchor.and_then(|a| self.nodes.iter().position(|(id, _)| id == a)) {
            Some(pos) => self.nodes.insert(pos, entry),
            None => self.nodes.push(entry),
        }
    }

    fn remove(&mut self, handle: &usize) {
        self.nodes.retain(|(id, _)| id != handle);
    }

    fn observe_resize(&mut self, _handle: &usize, _key: &u64) {}
    fn unobserve_resize(&mut self, _handle: &usize) {}

    fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    fn set_virtual_size(&mut self, size: u64) {
        println!("  leading padding -> {size}");
    }

    fn set_list_total_size(&mut self, size: u64) {
        println!("  content extent  -> {size}");
    }

    fn set_transform_offset(&mut self, _offset: u64) {}
}

#[derive(Clone)]
struct Message {
    id: u64,
    body: String,
}

fn window_summary<S: HostSurface<u64>>(list: &VirtList<Message, u64, S>) -> String {
    let data = list.reactive_data();
    format!(
        "offset={} visible={}..={} window={}..={} virtual={}",
        data.offset, data.in_view_begin, data.in_view_end, data.render_begin, data.render_end,
        data.virtual_size
    )
}

fn main() {
    let options = VirtListOptions::new(
        |m: &Message| m.id,
        |m: &Message| NodeSpec::new("div").with_text(m.body.clone()),
    )
    .with_item_size(24)
    .with_buffer(3)
    .with_on_to_bottom(|m: &Message| println!("  reached the end at #{}", m.id));

    let mut list = VirtList::new(ConsoleSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(240)]);

    let messages: Vec<Message> = (0..10_000)
        .map(|id| Message {
            id,
            body: format!("message {id}"),
        })
        .collect();

    println!("init 10k rows");
    list.init(messages);
    println!("  {}", window_summary(&list));

    println!("scroll to row 4200");
    list.scroll_to_index(4200);
    println!("  {}", window_summary(&list));

    println!("rows above the anchor re-measure taller (one batch)");
    let nudged = list.reactive_data().offset - 10;
    list.on_scroll_event(nudged);
    list.on_resize_batch((4196..4199).map(|key| ResizeEntry::Item { key, size: 40 }));
    println!("  {}", window_summary(&list));

    println!("jump to the bottom (settle loop)");
    list.scroll_to_bottom();
    let mut now = 0;
    while list.is_settling() {
        now += 3;
        list.tick(now);
    }
    println!("  {}", window_summary(&list));
    println!(
        "  materialized nodes: {} of {}",
        list.render_nodes().len(),
        list.len()
    );
}
