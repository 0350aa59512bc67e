use kaomoji_core::{Frame, Role, Vec2};

/// Find the top-most hit region under `pos` (reverse iteration).
pub(crate) fn top_hit_id(frame: &Frame, pos: Vec2) -> Option<u64> {
    frame
        .hit_regions
        .iter()
        .rev()
        .find(|h| h.rect.contains(pos))
        .map(|h| h.id)
}

/// `n` is 1-based, in paint order.
pub(crate) fn nth_button_id(frame: &Frame, n: usize) -> Option<u64> {
    n.checked_sub(1)
        .and_then(|i| frame.hit_regions.get(i))
        .map(|h| h.id)
}

pub(crate) fn button_id_by_label(frame: &Frame, label: &str) -> Option<u64> {
    frame
        .semantics_nodes
        .iter()
        .find(|n| n.role == Role::Button && n.label.as_deref() == Some(label))
        .map(|n| n.id)
}
