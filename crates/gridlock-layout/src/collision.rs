//! Collision detection and layout queries.

use crate::item::LayoutItem;

/// Do two items overlap?
///
/// An item never collides with itself (same id), and rectangles whose edges
/// only touch do not collide.
#[inline]
pub fn collides(a: &LayoutItem, b: &LayoutItem) -> bool {
    if a.id == b.id {
        return false;
    }
    a.rect().overlaps(&b.rect())
}

/// First item in iteration order that collides with `item`.
pub fn first_collision<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Option<&'a LayoutItem> {
    layout.iter().find(|other| collides(other, item))
}

/// Every item that collides with `item`, in iteration order.
pub fn all_collisions<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Vec<&'a LayoutItem> {
    layout.iter().filter(|other| collides(other, item)).collect()
}

/// Bottom edge of the lowest item, or `0` for an empty layout.
pub fn bottom(layout: &[LayoutItem]) -> i32 {
    layout.iter().map(LayoutItem::bottom).max().unwrap_or(0).max(0)
}

/// Static items, in layout order.
pub fn statics(layout: &[LayoutItem]) -> Vec<&LayoutItem> {
    layout.iter().filter(|item| item.is_static).collect()
}

/// Look up an item by id.
pub fn get_layout_item<'a>(layout: &'a [LayoutItem], id: &str) -> Option<&'a LayoutItem> {
    layout.iter().find(|item| item.id == id)
}

/// Position of an item by id.
pub(crate) fn index_of(layout: &[LayoutItem], id: &str) -> Option<usize> {
    layout.iter().position(|item| item.id == id)
}
