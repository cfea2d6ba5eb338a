// Example: a fixed-cell grid, vertical only and then with horizontal virtualization.
use viewport_virtualizer::{GridOptions, GridVirtualizer};

fn main() {
    let photos: Vec<u32> = (0..1_003).collect();
    let mut g = GridVirtualizer::new(GridOptions::new(photos.len(), 5, 100.0, 50.0));
    g.set_viewport_height(300.0);
    g.set_scroll_top(2_000.0);

    let out = g.virtualize_grid(&photos, |photo, cell| (*photo, cell.x, cell.y));
    println!(
        "rows={:?} columns={:?} cells={} total={:?}",
        out.rows,
        out.columns,
        out.nodes.len(),
        out.total_extent
    );

    g.set_viewport_width(Some(250.0));
    g.set_scroll_left(150.0);
    let mut cells = Vec::new();
    g.collect_visible_cells(&mut cells);
    println!(
        "with horizontal viewport: columns={:?} cells={}",
        g.column_range(),
        cells.len()
    );
}
