use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use roving::{
    Direction, EventResult, Key, KeyMap, Modifiers, RovingGroup, SelectionChange, SelectionError,
};

fn media() -> RovingGroup<&'static str> {
    RovingGroup::with_default(["back", "play", "pause", "forward"], "pause").unwrap()
}

fn focusable(group: &RovingGroup<&'static str>) -> Vec<&'static str> {
    group
        .items()
        .into_iter()
        .filter(|item| group.is_focusable(item))
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_starts_at_first_item() {
    let group = RovingGroup::new(["a", "b", "c"]).unwrap();
    assert_eq!(group.current(), Some("a"));
    assert!(!group.is_dirty());
    assert_eq!(group.take_focus_request(), None);
}

#[test]
fn test_with_default_uses_default() {
    assert_eq!(media().current(), Some("pause"));
}

#[test]
fn test_with_missing_default_falls_back_to_first() {
    let group = RovingGroup::with_default(["a", "b"], "z").unwrap();
    assert_eq!(group.current(), Some("a"));
}

#[test]
fn test_duplicate_items_rejected() {
    let err = RovingGroup::new(["a", "b", "a"]).unwrap_err();
    assert_eq!(err, SelectionError::DuplicateItem("\"a\"".to_string()));
}

#[test]
fn test_empty_group() {
    let group: RovingGroup<u32> = RovingGroup::default();
    assert!(group.is_empty());
    assert_eq!(group.current(), None);
    assert_eq!(group.next(), Err(SelectionError::EmptyCollection));
    assert_eq!(group.previous(), Err(SelectionError::EmptyCollection));
    assert_eq!(group.last(), Err(SelectionError::EmptyCollection));
    assert!(!group.is_focusable(&0));
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn test_next_reports_change() {
    let group = media();
    let change = group.next().unwrap();
    assert_eq!(
        change,
        Some(SelectionChange {
            previous: Some("pause"),
            current: "forward",
        })
    );
    assert_eq!(group.current(), Some("forward"));
}

#[test]
fn test_forward_cycle() {
    let group = media();
    let mut seen = Vec::new();
    for _ in 0..4 {
        group.next().unwrap();
        seen.push(group.current().unwrap());
    }
    assert_eq!(seen, ["forward", "back", "play", "pause"]);
}

#[test]
fn test_backward_cycle() {
    let group = media();
    let mut seen = Vec::new();
    for _ in 0..4 {
        group.previous().unwrap();
        seen.push(group.current().unwrap());
    }
    assert_eq!(seen, ["play", "back", "forward", "pause"]);
}

#[test]
fn test_first_and_last() {
    let group = media();
    group.last().unwrap();
    assert_eq!(group.current(), Some("forward"));
    group.move_by(Direction::First).unwrap();
    assert_eq!(group.current(), Some("back"));
}

#[test]
fn test_single_item_move_is_no_change() {
    let group = RovingGroup::new(["only"]).unwrap();
    assert_eq!(group.next(), Ok(None));
    assert!(!group.is_dirty());
}

// ============================================================================
// Select
// ============================================================================

#[test]
fn test_select_is_idempotent() {
    let group = media();
    assert!(group.select(&"play").unwrap().is_some());
    group.clear_dirty();
    group.take_focus_request();

    assert_eq!(group.select(&"play"), Ok(None));
    assert_eq!(group.current(), Some("play"));
    assert!(!group.is_dirty());
    assert_eq!(group.take_focus_request(), None);
}

#[test]
fn test_select_missing_item_leaves_state_alone() {
    let group = media();
    assert_eq!(
        group.select(&"stop"),
        Err(SelectionError::ItemNotFound("\"stop\"".to_string()))
    );
    assert_eq!(group.current(), Some("pause"));
    assert!(!group.is_dirty());
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_exactly_one_focusable() {
    let group = media();
    assert_eq!(focusable(&group), ["pause"]);
    group.next().unwrap();
    assert_eq!(focusable(&group), ["forward"]);
    assert_eq!(group.tab_index(&"forward"), 0);
    assert_eq!(group.tab_index(&"pause"), -1);
}

#[test]
fn test_focus_request_follows_commit() {
    let group = media();
    group.next().unwrap();
    group.next().unwrap();
    // Only the latest committed item is requested.
    assert_eq!(group.take_focus_request(), Some("back"));
    assert_eq!(group.take_focus_request(), None);
}

#[test]
fn test_explicit_focus_request() {
    let group = media();
    group.focus();
    assert_eq!(group.take_focus_request(), Some("pause"));
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_on_key_moves_and_consumes() {
    let group = media();
    assert_eq!(group.on_key(Key::Right, Modifiers::new()), Ok(EventResult::Consumed));
    assert_eq!(group.current(), Some("forward"));
    assert_eq!(group.on_key(Key::Left, Modifiers::new()), Ok(EventResult::Consumed));
    assert_eq!(group.current(), Some("pause"));
}

#[test]
fn test_on_key_ignores_other_keys() {
    let group = media();
    assert_eq!(group.on_key(Key::Char('x'), Modifiers::new()), Ok(EventResult::Ignored));
    assert_eq!(group.on_key(Key::Right, Modifiers::alt()), Ok(EventResult::Ignored));
    assert_eq!(group.current(), Some("pause"));
}

#[test]
fn test_on_key_respects_keymap() {
    let group = media().with_keymap(KeyMap::vertical().vim_keys(true));
    assert_eq!(group.on_key(Key::Right, Modifiers::new()), Ok(EventResult::Ignored));
    assert_eq!(group.on_key(Key::Char('j'), Modifiers::new()), Ok(EventResult::Consumed));
    assert_eq!(group.current(), Some("forward"));
}

#[test]
fn test_on_key_ignored_when_empty() {
    let group: RovingGroup<u32> = RovingGroup::default();
    assert_eq!(group.on_key(Key::Down, Modifiers::new()), Ok(EventResult::Ignored));
}

#[test]
fn test_on_key_while_another_handle_empties_group() {
    let group = RovingGroup::new(["a", "b"]).unwrap();
    let writer = group.clone();
    let stop = Arc::new(AtomicBool::new(false));

    let churn = {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                writer.set_items([]).unwrap();
                writer.set_items(["a", "b"]).unwrap();
            }
        })
    };

    let mut results = Vec::new();
    for _ in 0..50_000 {
        results.push(group.on_key(Key::Right, Modifiers::new()));
    }
    stop.store(true, Ordering::Relaxed);
    churn.join().unwrap();

    for result in results {
        assert!(
            matches!(result, Ok(EventResult::Consumed | EventResult::Ignored)),
            "{result:?}"
        );
    }
}

// ============================================================================
// Items
// ============================================================================

#[test]
fn test_set_items_keeps_surviving_selection() {
    let group = media();
    let change = group.set_items(["pause", "stop"]).unwrap();
    assert_eq!(change, None);
    assert_eq!(group.current(), Some("pause"));
    assert!(group.is_dirty());
}

#[test]
fn test_set_items_heals_removed_selection() {
    let group = media();
    let change = group.set_items(["play", "forward"]).unwrap();
    assert_eq!(
        change,
        Some(SelectionChange {
            previous: Some("pause"),
            current: "play",
        })
    );
    assert_eq!(group.take_focus_request(), Some("play"));
    assert_eq!(focusable(&group), ["play"]);
}

#[test]
fn test_set_items_to_empty_and_back() {
    let group = media();
    assert_eq!(group.set_items([]), Ok(None));
    assert_eq!(group.current(), None);
    assert!(focusable(&group).is_empty());

    let change = group.set_items(["x", "y"]).unwrap();
    assert_eq!(
        change,
        Some(SelectionChange {
            previous: None,
            current: "x",
        })
    );
}

#[test]
fn test_set_items_rejects_duplicates_without_change() {
    let group = media();
    assert!(group.set_items(["a", "a"]).is_err());
    assert_eq!(group.items(), ["back", "play", "pause", "forward"]);
    assert!(!group.is_dirty());
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_subscribers_see_committed_state() {
    let group = media();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let observer = group.clone();
    let log = Arc::clone(&seen);
    group.subscribe(move |change| {
        // The group is readable and already updated when listeners run.
        assert_eq!(observer.current(), Some(change.current));
        log.lock().unwrap().push(change.current);
    });

    group.next().unwrap();
    group.select(&"play").unwrap();
    group.select(&"play").unwrap();

    assert_eq!(*seen.lock().unwrap(), ["forward", "play"]);
}

#[test]
fn test_unsubscribe() {
    let group = media();
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    let id = group.subscribe(move |_| *counter.lock().unwrap() += 1);

    group.next().unwrap();
    assert!(group.unsubscribe(id));
    assert!(!group.unsubscribe(id));
    group.next().unwrap();

    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_clones_share_state() {
    let group = media();
    let view = group.clone();
    group.next().unwrap();
    assert_eq!(view.current(), Some("forward"));
    assert!(view.is_dirty());
    view.clear_dirty();
    assert!(!group.is_dirty());
    assert_eq!(view.id(), group.id());
}
