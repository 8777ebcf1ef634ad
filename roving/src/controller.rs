//! Roving-focus selection operations.
//!
//! Every function here is pure: it takes the ordered items and the caller's
//! current selection and returns the new selection. Nothing is stored, so the
//! caller decides where selection state lives (see [`RovingGroup`] for a
//! hosted variant).
//!
//! A selection that no longer names an item (the item was removed) is not an
//! error. It resolves to the first item, so routine collection churn never
//! fails. Only movement on an empty collection and explicit selection of an
//! absent item are errors.
//!
//! Lookups are linear scans. These widgets hold a handful of items.
//!
//! [`RovingGroup`]: crate::RovingGroup

use crate::error::{Result, SelectionError};
use crate::event::{Key, Modifiers};
use crate::keymap::KeyMap;

/// A logical movement, already translated from platform keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Next item, wrapping from last to first.
    Forward,
    /// Previous item, wrapping from first to last.
    Backward,
    /// First item.
    First,
    /// Last item.
    Last,
}

fn current_index<T: PartialEq>(items: &[T], selection: &T) -> usize {
    items.iter().position(|item| item == selection).unwrap_or(0)
}

/// Resolve the effective current item.
///
/// Returns `selection` if present, otherwise the first item, and `None` only
/// when `items` is empty.
pub fn current_of<'a, T: PartialEq>(items: &'a [T], selection: &T) -> Option<&'a T> {
    items
        .iter()
        .find(|item| *item == selection)
        .or_else(|| items.first())
}

/// The item after the current one, wrapping to the first.
pub fn next<'a, T: PartialEq>(items: &'a [T], selection: &T) -> Result<&'a T> {
    if items.is_empty() {
        return Err(SelectionError::EmptyCollection);
    }
    let index = current_index(items, selection);
    Ok(&items[(index + 1) % items.len()])
}

/// The item before the current one, wrapping to the last.
pub fn previous<'a, T: PartialEq>(items: &'a [T], selection: &T) -> Result<&'a T> {
    if items.is_empty() {
        return Err(SelectionError::EmptyCollection);
    }
    let len = items.len();
    let index = current_index(items, selection);
    Ok(&items[(index + len - 1) % len])
}

/// The first item.
pub fn first<T>(items: &[T]) -> Result<&T> {
    items.first().ok_or(SelectionError::EmptyCollection)
}

/// The last item.
pub fn last<T>(items: &[T]) -> Result<&T> {
    items.last().ok_or(SelectionError::EmptyCollection)
}

/// Apply a direction to the selection.
pub fn move_selection<'a, T: PartialEq>(
    direction: Direction,
    items: &'a [T],
    selection: &T,
) -> Result<&'a T> {
    match direction {
        Direction::Forward => next(items, selection),
        Direction::Backward => previous(items, selection),
        Direction::First => first(items),
        Direction::Last => last(items),
    }
}

/// Handle a translated key.
///
/// `None` stands for any key that does not navigate: the selection comes
/// back unchanged, even if it is stale or `items` is empty.
pub fn handle_directional_key<'a, T: PartialEq>(
    direction: Option<Direction>,
    items: &'a [T],
    selection: &'a T,
) -> Result<&'a T> {
    match direction {
        Some(direction) => move_selection(direction, items, selection),
        None => Ok(selection),
    }
}

/// Explicitly select an item, e.g. on click.
///
/// Idempotent: selecting the current item returns it again.
pub fn select<'a, T: PartialEq + std::fmt::Debug>(item: &T, items: &'a [T]) -> Result<&'a T> {
    items
        .iter()
        .find(|candidate| *candidate == item)
        .ok_or_else(|| SelectionError::not_found(item))
}

/// True iff `item` is the effective current item, i.e. the only tabbable one.
pub fn is_focusable<T: PartialEq>(item: &T, items: &[T], selection: &T) -> bool {
    current_of(items, selection) == Some(item)
}

/// Number of focusable items: 1 for a non-empty collection, 0 otherwise.
pub fn focusable_count<T: PartialEq>(items: &[T], selection: &T) -> usize {
    items
        .iter()
        .filter(|item| is_focusable(*item, items, selection))
        .count()
}

/// Tab order value for an item: `0` when tabbable, `-1` when reachable only
/// through the current item.
pub fn tab_index<T: PartialEq>(item: &T, items: &[T], selection: &T) -> i32 {
    if is_focusable(item, items, selection) {
        0
    } else {
        -1
    }
}

/// Selection operations bound to a [`KeyMap`].
///
/// Holds configuration only; selection state still flows in and out of each
/// call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionController {
    keymap: KeyMap,
}

impl SelectionController {
    /// Create a controller with the default key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with a custom key map.
    pub fn with_keymap(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    /// Get the key map.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Translate a key through the key map and apply it.
    pub fn handle_key<'a, T: PartialEq>(
        &self,
        key: Key,
        modifiers: Modifiers,
        items: &'a [T],
        selection: &'a T,
    ) -> Result<&'a T> {
        let direction = self.keymap.direction(key, modifiers);
        if direction.is_none() {
            log::trace!("[selection] ignoring key {:?} {:?}", key, modifiers);
        }
        handle_directional_key(direction, items, selection)
    }
}
