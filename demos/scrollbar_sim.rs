//! Synthetic scrollbar session: wheel, thumb drag, track click, auto-hide.
//! The hidden container never scrolls; content moves by transform.
//!
//! Run with: `cargo run --example scrollbar_sim`

use virt_list::{HostSurface, NodeSpec, ResizeEntry, VirtList, VirtListOptions};

#[derive(Debug, Default)]
struct TransformSurface {
    transform_offset: u64,
}

impl HostSurface<u64> for TransformSurface {
    type Handle = u64;

    fn create(&mut self, _spec: &NodeSpec) -> u64 {
        0
    }

    fn set_attr(&mut self, _handle: &mut u64, _name: &str, _value: &str) {}
    fn remove_attr(&mut self, _handle: &mut u64, _name: &str) {}
    fn set_text(&mut self, _handle: &mut u64, _text: &str) {}
    fn insert_before(&mut self, _handle: &u64, _anchor: Option<&u64>) {}
    fn remove(&mut self, _handle: &u64) {}
    fn observe_resize(&mut self, _handle: &u64, _key: &u64) {}
    fn unobserve_resize(&mut self, _handle: &u64) {}

    fn scroll_offset(&self) -> u64 {
        0
    }

    fn set_scroll_offset(&mut self, _offset: u64) {}
    fn set_virtual_size(&mut self, _size: u64) {}
    fn set_list_total_size(&mut self, _size: u64) {}

    fn set_transform_offset(&mut self, offset: u64) {
        self.transform_offset = offset;
    }
}

fn thumb_line(list: &VirtList<u64, u64, TransformSurface>) -> String {
    let sb = list.scrollbar().expect("synthetic mode");
    format!(
        "thumb {:>3}..{:>3} of 600  offset {:>6}  translateY(-{})",
        sb.thumb_top(),
        sb.thumb_top() + sb.thumb_size(),
        sb.offset(),
        list.surface().transform_offset
    )
}

fn main() {
    let options = VirtListOptions::new(
        |id: &u64| *id,
        |id: &u64| NodeSpec::new("div").with_text(format!("row {id}")),
    )
    .with_item_size(30)
    .with_buffer(2)
    .with_virtual_scrollbar(true);

    let mut list = VirtList::new(TransformSurface::default(), options);
    list.on_resize_batch([ResizeEntry::Client(600)]);
    list.init((0..2000).collect());
    println!("init:        {}", thumb_line(&list));

    println!("wheel down x3");
    for _ in 0..3 {
        list.scrollbar_wheel(240);
    }
    println!("             {}", thumb_line(&list));

    println!("drag the thumb 150 units down");
    list.scrollbar_drag_start(100);
    list.scrollbar_drag_move(175);
    list.scrollbar_drag_move(250);
    list.scrollbar_drag_end();
    println!("             {}", thumb_line(&list));

    println!("click the track near the end");
    list.scrollbar_track_click(580);
    println!("             {}", thumb_line(&list));

    println!("hover off: hidden after one second");
    list.scrollbar_hover_enter();
    list.scrollbar_hover_leave(10_000);
    list.tick(10_999);
    println!("  visible at t+999ms:  {}", list.scrollbar().unwrap().is_visible());
    list.tick(11_000);
    println!("  visible at t+1000ms: {}", list.scrollbar().unwrap().is_visible());

    let data = list.reactive_data();
    println!(
        "window {}..={} of {} rows ({} nodes live)",
        data.render_begin,
        data.render_end,
        list.len(),
        list.render_nodes().len()
    );
}
