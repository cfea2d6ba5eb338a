use viewport_virtualizer::{ListOptions, ListVirtualizer};
use viewport_virtualizer_adapter::{apply_anchor, capture_first_visible_anchor};

fn keyed(count: usize, prepended: usize) -> ListOptions<u64> {
    ListOptions::fixed(count, 24.0).with_get_item_key(move |i| {
        if i < prepended {
            2000 + i as u64
        } else {
            1000 + (i - prepended) as u64
        }
    })
}

fn main() {
    // Example: keep the viewport still while older messages load above it.
    //
    // 1) capture an anchor (key + offset_in_viewport) before the data changes
    // 2) apply the data change (count / key mapping)
    // 3) apply the anchor so the same item stays at the same place on screen
    let mut v = ListVirtualizer::new(keyed(100, 0));
    v.set_viewport_and_scroll(240.0, 1_210.0);

    let Some(anchor) = capture_first_visible_anchor(&v) else {
        println!("nothing visible");
        return;
    };
    println!("before prepend: off={} anchor={anchor:?}", v.scroll_offset());

    v.set_options(keyed(110, 10));

    let ok = apply_anchor(&mut v, &anchor, |k| match *k {
        1000..1100 => Some((*k - 1000) as usize + 10),
        2000..2010 => Some((*k - 2000) as usize),
        _ => None,
    });
    println!(
        "after prepend: ok={ok} off={} visible={:?}",
        v.scroll_offset(),
        v.visible_range()
    );
}
