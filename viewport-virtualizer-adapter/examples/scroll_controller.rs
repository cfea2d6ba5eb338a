use std::cell::RefCell;
use std::rc::Rc;

use viewport_virtualizer::{ListOptions, ListVirtualizer};
use viewport_virtualizer_adapter::{FrameQueue, ScrollController};

fn main() {
    // Example: a host frame loop feeding a burst of scroll events through the controller.
    let mut v = ListVirtualizer::new(ListOptions::fixed(10_000, 40.0).with_overscan(2));
    v.set_viewport_extent(800.0);
    let v = Rc::new(RefCell::new(v));

    let mut c = ScrollController::attach((), FrameQueue::new(), {
        let v = Rc::clone(&v);
        move |offset| {
            let mut v = v.borrow_mut();
            v.set_scroll_offset(offset);
            println!("frame: offset={offset} range={:?}", v.virtual_range());
        }
    });

    for frame in 0..3 {
        // Several wheel events land between two frames...
        for tick in 0..8 {
            c.handle_scroll((frame * 8 + tick) as f64 * 50.0);
        }
        // ...and only the latest one is delivered.
        c.pump_frames();
    }

    c.handle_scroll(9_000.0);
    c.detach();
    println!("after detach: delivered={}", c.pump_frames());
}
