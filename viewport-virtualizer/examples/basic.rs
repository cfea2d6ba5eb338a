// Example: a uniform list, its visible window and the scroll-to helper.
use viewport_virtualizer::{Align, ListOptions, ListVirtualizer};

fn main() {
    let mut v = ListVirtualizer::new(ListOptions::fixed(10_000, 40.0).with_overscan(2));
    v.set_viewport_and_scroll(800.0, 4000.0);

    let mut items = Vec::new();
    v.collect_virtual_items(&mut items);
    println!("total_extent={}", v.total_extent());
    println!("visible_range={:?}", v.visible_range());
    println!("virtual_range={:?}", v.virtual_range());
    println!("first_materialized={:?}", items.first());

    let off = v.scroll_to_index_offset(9_999, Align::End);
    v.set_scroll_offset_clamped(off);
    println!("after scroll_to_index: offset={}", v.scroll_offset());
}
