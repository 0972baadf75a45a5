use crate::models::{MenuItem, SubMenuItem};

/// Spacing between assigned sort keys. Gaps let a future single-item insert
/// pick a key between two neighbors without renumbering the whole scope.
pub(crate) const ORDER_STEP: i32 = 10;

/// Anything carrying an integer sort key within one scope.
pub(crate) trait SortKeyed {
    fn sort_key(&self) -> i32;
    fn set_sort_key(&mut self, key: i32);
}

impl SortKeyed for MenuItem {
    fn sort_key(&self) -> i32 {
        self.order
    }
    fn set_sort_key(&mut self, key: i32) {
        self.order = key;
    }
}

impl SortKeyed for SubMenuItem {
    fn sort_key(&self) -> i32 {
        self.order
    }
    fn set_sort_key(&mut self, key: i32) {
        self.order = key;
    }
}

/// Assign `index * ORDER_STEP` to every entry, in sequence order.
///
/// Pure renumbering: identities are untouched, incoming keys are ignored.
pub(crate) fn renumber<T: SortKeyed>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_sort_key(index as i32 * ORDER_STEP);
    }
}

/// Sort key for an entry appended to `items`: one step past the current
/// maximum, or 0 for an empty scope.
pub(crate) fn next_order<T: SortKeyed>(items: &[T]) -> i32 {
    items
        .iter()
        .map(SortKeyed::sort_key)
        .max()
        .map(|max| max + ORDER_STEP)
        .unwrap_or(0)
}

/// Single-item positional move plus renumber.
///
/// The entry at `source` is removed and reinserted at `dest`; everything in
/// between shifts by one. `source == dest` returns the input unchanged.
/// Out-of-range indices are a caller bug; release builds clamp.
pub(crate) fn reorder<T: SortKeyed + Clone>(list: &[T], source: usize, dest: usize) -> Vec<T> {
    debug_assert!(source < list.len(), "reorder source out of range");
    debug_assert!(dest < list.len(), "reorder destination out of range");

    let mut out = list.to_vec();
    if out.is_empty() || source == dest {
        return out;
    }

    let source = source.min(out.len() - 1);
    let dest = dest.min(out.len() - 1);

    let moved = out.remove(source);
    out.insert(dest, moved);
    renumber(&mut out);
    out
}
