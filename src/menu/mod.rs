pub(crate) mod collection;
pub(crate) mod reorder;
pub(crate) mod sync;
