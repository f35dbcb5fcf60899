//! Ordering of sibling entities: columns within a board, cards within a
//! column. Ordinals are plain integers maintained by append arithmetic.
//! They are neither contiguous nor unique: deletions leave gaps and
//! arbitrary updates may collide, in which case display order among the
//! colliding siblings falls back to the stable order the store returns.

/// Entities carrying a display ordinal
pub trait Ordered {
    fn sort_order(&self) -> i64;
}

/// Ordinal for a sibling appended to the collection: one past the current
/// maximum, or 0 when the collection is empty. Existing siblings are never
/// reordered and gaps are never filled.
pub fn next_order<T: Ordered>(siblings: &[T]) -> i64 {
    siblings
        .iter()
        .map(Ordered::sort_order)
        .max()
        .map_or(0, |max| max + 1)
}

/// Sorts siblings ascending by ordinal for display. The sort is stable, so
/// equal ordinals keep the order the store returned them in.
pub fn sort_ascending<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.sort_order());
}
