use viewport_virtualizer::ListVirtualizer;

/// Keeps the viewport pinned to an item identity across data changes.
///
/// Capture before inserting items above the viewport (older messages in a chat, new rows at
/// the top of a feed), apply after, and the anchored item stays where it was on screen.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// `scroll_offset - item_offset` at capture time. Negative when the item starts below the
    /// top of the viewport.
    pub offset_in_viewport: f64,
}

/// Anchors the first visible item. `None` when nothing is visible.
pub fn capture_first_visible_anchor<K>(v: &ListVirtualizer<K>) -> Option<ScrollAnchor<K>> {
    let visible = v.visible_range();
    if visible.is_empty() {
        return None;
    }
    let start = v.offset_at(visible.start)?;
    Some(ScrollAnchor {
        key: v.key_for(visible.start),
        offset_in_viewport: v.clamp_scroll_offset(v.scroll_offset()) - start,
    })
}

/// Anchors the item under `offset_in_viewport` pixels from the top of the viewport.
pub fn capture_anchor_at_offset<K>(
    v: &ListVirtualizer<K>,
    offset_in_viewport: f64,
) -> Option<ScrollAnchor<K>> {
    let scroll = v.clamp_scroll_offset(v.scroll_offset());
    let item = v.item_at_offset(scroll + offset_in_viewport)?;
    Some(ScrollAnchor {
        key: v.key_for(item.index),
        offset_in_viewport: scroll - item.offset,
    })
}

/// Restores `anchor` against the current data, returning whether the key was found.
///
/// `key_to_index` maps keys to indexes of the *current* collection; the host owns that mapping.
pub fn apply_anchor<K>(
    v: &mut ListVirtualizer<K>,
    anchor: &ScrollAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    if index >= v.count() {
        return false;
    }
    let Some(start) = v.offset_at(index) else {
        return false;
    };
    v.set_scroll_offset_clamped(start + anchor.offset_in_viewport);
    true
}
