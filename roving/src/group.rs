//! Hosted roving-focus selection.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::collection::Collection;
use crate::controller::{self, Direction};
use crate::error::{Result, SelectionError};
use crate::event::{EventResult, Key, Modifiers};
use crate::keymap::KeyMap;

/// Unique identifier for a RovingGroup instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__roving_group_{}", self.0)
    }
}

/// Handle returned by [`RovingGroup::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// A committed move of the current marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange<T> {
    /// The item that was current before, if any.
    pub previous: Option<T>,
    /// The item that is current now.
    pub current: T,
}

type Listener<T> = Arc<dyn Fn(&SelectionChange<T>) + Send + Sync>;

/// Internal state for a RovingGroup
struct RovingGroupInner<T> {
    items: Collection<T>,
    /// `Some` iff `items` is non-empty, and always one of `items`.
    current: Option<T>,
    keymap: KeyMap,
    /// Item waiting to receive platform focus.
    focus_request: Option<T>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: usize,
}

impl<T: Debug> Debug for RovingGroupInner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RovingGroupInner")
            .field("items", &self.items)
            .field("current", &self.current)
            .field("keymap", &self.keymap)
            .field("focus_request", &self.focus_request)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A roving-focus group with shared state.
///
/// Holds the ordered items and the current selection for a rendering layer
/// that would rather not store them. Clones share state, so one handle can
/// live in the view and another in an input handler.
///
/// Changes follow a two-phase contract. A command commits the new selection
/// first. Only then are subscribers notified and a focus request queued; the
/// caller renders and afterwards calls [`take_focus_request`] to move
/// platform focus. A failed focus move can never leave the selection
/// half-updated.
///
/// # Example
///
/// ```
/// use roving::{Key, Modifiers, RovingGroup};
///
/// let group = RovingGroup::with_default(["back", "play", "pause", "forward"], "pause")?;
/// group.on_key(Key::Right, Modifiers::new())?;
/// assert_eq!(group.current(), Some("forward"));
///
/// // After re-rendering, move platform focus.
/// assert_eq!(group.take_focus_request(), Some("forward"));
/// assert_eq!(group.tab_index(&"forward"), 0);
/// assert_eq!(group.tab_index(&"back"), -1);
/// # Ok::<(), roving::SelectionError>(())
/// ```
///
/// [`take_focus_request`]: RovingGroup::take_focus_request
#[derive(Debug)]
pub struct RovingGroup<T> {
    id: GroupId,
    inner: Arc<RwLock<RovingGroupInner<T>>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl<T: PartialEq + Clone + Debug> RovingGroup<T> {
    /// Create a group whose current item is the first item.
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self> {
        let items = Collection::new(items)?;
        let current = items.first().cloned();
        Ok(Self::from_parts(items, current))
    }

    /// Create a group starting at `default`.
    ///
    /// Falls back to the first item if `default` is not among `items`.
    pub fn with_default(items: impl IntoIterator<Item = T>, default: T) -> Result<Self> {
        let items = Collection::new(items)?;
        let current = controller::current_of(items.as_slice(), &default).cloned();
        if current.as_ref() != Some(&default) {
            log::debug!(
                "[roving_group] default {:?} not found, starting at {:?}",
                default,
                current
            );
        }
        Ok(Self::from_parts(items, current))
    }

    fn from_parts(items: Collection<T>, current: Option<T>) -> Self {
        Self {
            id: GroupId::new(),
            inner: Arc::new(RwLock::new(RovingGroupInner {
                items,
                current,
                keymap: KeyMap::default(),
                focus_request: None,
                listeners: Vec::new(),
                next_subscription: 0,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the key map used by [`on_key`](Self::on_key).
    pub fn with_keymap(self, keymap: KeyMap) -> Self {
        self.set_keymap(keymap);
        self
    }

    /// Get the unique ID for this group
    pub fn id(&self) -> GroupId {
        self.id
    }

    fn read(&self) -> RwLockReadGuard<'_, RovingGroupInner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RovingGroupInner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get all items in order
    pub fn items(&self) -> Vec<T> {
        self.read().items.as_slice().to_vec()
    }

    /// Get the current item, `None` only when the group is empty
    pub fn current(&self) -> Option<T> {
        self.read().current.clone()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Check if there are no items
    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Check if `item` is the current item
    pub fn is_current(&self, item: &T) -> bool {
        self.read().current.as_ref() == Some(item)
    }

    /// Check if `item` is tabbable. Exactly one item is, unless empty.
    pub fn is_focusable(&self, item: &T) -> bool {
        let guard = self.read();
        match &guard.current {
            Some(current) => controller::is_focusable(item, guard.items.as_slice(), current),
            None => false,
        }
    }

    /// Tab order value for `item`: `0` if tabbable, `-1` otherwise
    pub fn tab_index(&self, item: &T) -> i32 {
        if self.is_focusable(item) { 0 } else { -1 }
    }

    /// Get the key map
    pub fn keymap(&self) -> KeyMap {
        self.read().keymap
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Move to the next item, wrapping around.
    pub fn next(&self) -> Result<Option<SelectionChange<T>>> {
        self.move_by(Direction::Forward)
    }

    /// Move to the previous item, wrapping around.
    pub fn previous(&self) -> Result<Option<SelectionChange<T>>> {
        self.move_by(Direction::Backward)
    }

    /// Move to the first item.
    pub fn first(&self) -> Result<Option<SelectionChange<T>>> {
        self.move_by(Direction::First)
    }

    /// Move to the last item.
    pub fn last(&self) -> Result<Option<SelectionChange<T>>> {
        self.move_by(Direction::Last)
    }

    /// Apply a direction.
    ///
    /// Returns `Ok(None)` if the current item did not change (single item
    /// collection).
    pub fn move_by(&self, direction: Direction) -> Result<Option<SelectionChange<T>>> {
        self.commit(|inner| {
            let current = inner
                .current
                .as_ref()
                .ok_or(SelectionError::EmptyCollection)?;
            controller::move_selection(direction, inner.items.as_slice(), current)
                .map(|item| Some(item.clone()))
        })
    }

    /// Select an item explicitly, e.g. on click.
    ///
    /// Selecting the current item again is a no-op and returns `Ok(None)`.
    pub fn select(&self, item: &T) -> Result<Option<SelectionChange<T>>> {
        self.commit(|inner| {
            controller::select(item, inner.items.as_slice()).map(|item| Some(item.clone()))
        })
    }

    /// Replace the items, keeping the current item if it survived.
    ///
    /// If it did not, the first item becomes current and the change is
    /// reported like any other. On a duplicate id nothing changes.
    pub fn set_items(
        &self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<Option<SelectionChange<T>>> {
        let items = Collection::new(items)?;
        let change = self.commit(|inner| {
            inner.items = items;
            let healed = match &inner.current {
                Some(current) => controller::current_of(inner.items.as_slice(), current),
                None => inner.items.first(),
            }
            .cloned();
            if inner.current.is_some() && healed != inner.current {
                log::debug!(
                    "[roving_group] current {:?} removed, falling back to {:?}",
                    inner.current,
                    healed
                );
            }
            Ok(healed)
        })?;
        self.dirty.store(true, Ordering::SeqCst);
        Ok(change)
    }

    /// Set the key map used by [`on_key`](Self::on_key).
    pub fn set_keymap(&self, keymap: KeyMap) {
        self.write().keymap = keymap;
    }

    /// Handle a key press while the group has focus.
    ///
    /// Keys the key map does not translate are ignored, as is every key
    /// while the group is empty. Both checks run under the same lock as the
    /// move, so a clone emptying the group concurrently cannot turn an
    /// ignored key into an error.
    pub fn on_key(&self, key: Key, modifiers: Modifiers) -> Result<EventResult> {
        let mut handled = false;
        self.commit(|inner| {
            let Some(direction) = inner.keymap.direction(key, modifiers) else {
                return Ok(inner.current.clone());
            };
            let Some(current) = inner.current.as_ref() else {
                return Ok(None);
            };
            handled = true;
            controller::move_selection(direction, inner.items.as_slice(), current)
                .map(|item| Some(item.clone()))
        })?;

        if handled {
            Ok(EventResult::Consumed)
        } else {
            log::trace!("[roving_group] {} ignoring key {:?}", self.id, key);
            Ok(EventResult::Ignored)
        }
    }

    /// Commit a new current item and notify.
    ///
    /// `update` returns the target; listeners run after the write lock is
    /// released so they may read the group.
    fn commit<F>(&self, update: F) -> Result<Option<SelectionChange<T>>>
    where
        F: FnOnce(&mut RovingGroupInner<T>) -> Result<Option<T>>,
    {
        let (change, listeners) = {
            let mut guard = self.write();
            let target = update(&mut *guard)?;
            if guard.current == target {
                return Ok(None);
            }
            self.dirty.store(true, Ordering::SeqCst);
            let previous = std::mem::replace(&mut guard.current, target.clone());
            let Some(current) = target else {
                guard.focus_request = None;
                log::debug!("[roving_group] {} emptied, selection cleared", self.id);
                return Ok(None);
            };
            guard.focus_request = Some(current.clone());
            let listeners: Vec<Listener<T>> = guard
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            (SelectionChange { previous, current }, listeners)
        };

        log::debug!(
            "[roving_group] {} selection {:?} -> {:?}",
            self.id,
            change.previous,
            change.current
        );
        for listener in &listeners {
            listener(&change);
        }
        Ok(Some(change))
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Call `listener` after every committed selection change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SelectionChange<T>) + Send + Sync + 'static,
    {
        let mut guard = self.write();
        let id = SubscriptionId(guard.next_subscription);
        guard.next_subscription += 1;
        guard.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns true if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.write();
        let before = guard.listeners.len();
        guard.listeners.retain(|(sid, _)| *sid != id);
        guard.listeners.len() != before
    }

    // -------------------------------------------------------------------------
    // Focus control
    // -------------------------------------------------------------------------

    /// Request focus for the current item (e.g. when the group is entered).
    pub fn focus(&self) {
        let mut guard = self.write();
        guard.focus_request = guard.current.clone();
    }

    /// Take the item that should receive platform focus, clearing the request.
    pub fn take_focus_request(&self) -> Option<T> {
        self.write().focus_request.take()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the group state has changed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for RovingGroup<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: PartialEq + Clone + Debug> Default for RovingGroup<T> {
    fn default() -> Self {
        Self::from_parts(Collection::empty(), None)
    }
}
