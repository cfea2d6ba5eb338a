/// The scroll state of one axis.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub viewport_extent: f64,
}

impl ViewportState {
    pub fn new(scroll_offset: f64, viewport_extent: f64) -> Self {
        Self {
            scroll_offset,
            viewport_extent,
        }
    }
}

/// Per-axis scroll state of a grid.
///
/// A `None` horizontal viewport means the grid is not virtualized horizontally: every column
/// of a visible row is materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridViewportState {
    pub vertical: ViewportState,
    pub horizontal: Option<ViewportState>,
}
