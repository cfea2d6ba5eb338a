// Example: per-item extents, a render pass and in-place extent invalidation.
use std::sync::{Arc, Mutex};

use viewport_virtualizer::{ExtentDiagnostic, ExtentSource, ListOptions, ListVirtualizer};

fn main() {
    let rows: Vec<String> = (0..1_000).map(|i| format!("row {i}")).collect();
    let heights = Arc::new(Mutex::new(
        (0..rows.len())
            .map(|i| 20.0 + (i % 4) as f64 * 10.0)
            .collect::<Vec<f64>>(),
    ));

    let source = ExtentSource::variable({
        let heights = Arc::clone(&heights);
        move |i| heights.lock().map(|h| h[i]).unwrap_or(0.0)
    });
    let mut v = ListVirtualizer::new(
        ListOptions::new(rows.len(), source).with_on_diagnostic(Some(|d: ExtentDiagnostic| {
            eprintln!("clamped extent: {d:?}");
        })),
    );
    v.set_viewport_and_scroll(300.0, 1_250.0);

    let out = v.virtualize(&rows, |row, it| format!("{row} @ {}", it.offset));
    println!("range={:?} total={}", out.range, out.total_extent);
    for node in &out.nodes {
        println!("  {node}");
    }

    // Row 10 grew after a measurement pass.
    if let Ok(mut h) = heights.lock() {
        h[10] = 120.0;
    }
    v.invalidate_extents_from(10);
    println!(
        "after invalidate: total={} range={:?}",
        v.total_extent(),
        v.virtual_range()
    );
}
