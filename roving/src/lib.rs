//! Roving-focus selection for ordered collections.
//!
//! A composite widget (radio group, tab list, menu, listbox) keeps exactly one
//! of its items tabbable: the current one. Arrow keys move the current marker
//! around the collection with wraparound, and pointer clicks select an item
//! directly. This crate holds that decision logic and nothing else; rendering,
//! attribute writing and moving platform focus stay with the caller.
//!
//! The pure operations live in [`controller`]. [`RovingGroup`] hosts the
//! selection for callers that would rather not store it themselves.

pub mod collection;
pub mod controller;
pub mod error;
pub mod event;
pub mod group;
pub mod keymap;

pub use collection::Collection;
pub use controller::{
    Direction, SelectionController, current_of, first, focusable_count, handle_directional_key,
    is_focusable, last, move_selection, next, previous, select, tab_index,
};
pub use error::{Result, SelectionError};
pub use event::{EventResult, Key, Modifiers, translate};
pub use group::{GroupId, RovingGroup, SelectionChange, SubscriptionId};
pub use keymap::{KeyMap, Orientation};
