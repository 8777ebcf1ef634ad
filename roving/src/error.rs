//! Selection error types.

use thiserror::Error;

/// Contract violations reported by movement and selection operations.
///
/// A stale selection is not an error; it falls back to the first item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Movement was requested on a collection with no items.
    #[error("cannot move selection in an empty collection")]
    EmptyCollection,

    /// An explicit selection named an item the collection does not hold.
    #[error("item {0} is not in the collection")]
    ItemNotFound(String),

    /// The same item id appeared twice in one collection.
    #[error("item {0} appears more than once in the collection")]
    DuplicateItem(String),
}

impl SelectionError {
    pub(crate) fn not_found(item: &impl std::fmt::Debug) -> Self {
        Self::ItemNotFound(format!("{item:?}"))
    }

    pub(crate) fn duplicate(item: &impl std::fmt::Debug) -> Self {
        Self::DuplicateItem(format!("{item:?}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SelectionError>;
