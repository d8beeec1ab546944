//! Integration tests for the dropdown component.
//!
//! Test categories:
//! - Controlled-component contract: options/value in, one change per commit
//! - Keyboard and pointer flows end to end
//! - Dismissal: outside pointer-downs and listener hygiene
//! - Several dropdowns sharing one hub

#![forbid(unsafe_code)]

use std::sync::Arc;

use droplist::dismiss::DismissHub;
use droplist::dropdown::Dropdown;
use droplist::interpreter::Target;
use droplist::key::{KeyMsg, KeyType};
use droplist::option::SelectOption;
use droplist::pointer::PointerMsg;
use droplist::state::Edge;
use parking_lot::Mutex;

fn fruit() -> Vec<SelectOption> {
    vec![
        SelectOption::new("a", "Apple"),
        SelectOption::new("b", "Banana").disabled(true),
        SelectOption::new("c", "Cherry"),
    ]
}

fn key(t: KeyType) -> KeyMsg {
    KeyMsg::from_type(t)
}

fn recording(options: Vec<SelectOption>, value: &str) -> (Dropdown, Arc<Mutex<Vec<String>>>) {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let dropdown = Dropdown::new()
        .options(options)
        .value(value)
        .on_change(move |v| sink.lock().push(v.to_string()));
    (dropdown, changes)
}

// ============================================================================
// Controlled component
// ============================================================================

mod contract_tests {
    use super::*;

    #[test]
    fn test_open_move_commit_skips_disabled() {
        let (mut dd, changes) = recording(fruit(), "a");

        dd.open();
        assert_eq!(dd.active_index(), Some(0));
        dd.move_active(1);
        assert_eq!(dd.active_index(), Some(2));
        assert!(dd.commit(2));

        assert_eq!(dd.get_value(), "c");
        assert_eq!(changes.lock().as_slice(), ["c"]);
        assert!(!dd.is_open());
    }

    #[test]
    fn test_type_ahead_never_lands_on_disabled() {
        let (mut dd, changes) = recording(fruit(), "a");

        dd.open();
        dd.type_ahead('b');
        assert_eq!(dd.active_index(), Some(0));
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_recommitting_same_value_still_reports() {
        let (mut dd, changes) = recording(fruit(), "a");
        dd.open();
        assert!(dd.commit(0));
        assert_eq!(changes.lock().as_slice(), ["a"]);
    }

    #[test]
    fn test_disabled_commit_reports_nothing() {
        let (mut dd, changes) = recording(fruit(), "a");
        dd.open();
        assert!(!dd.commit(1));
        assert!(!dd.commit(99));
        assert!(dd.is_open());
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_owner_value_updates_are_silent() {
        let (mut dd, changes) = recording(fruit(), "a");
        dd.set_value("c");
        assert_eq!(dd.selected_label(), Some("Cherry"));
        dd.open();
        assert_eq!(dd.active_index(), Some(2));
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_unknown_value_shows_placeholder_and_opens_on_first_enabled() {
        let (dd, _) = recording(fruit(), "zzz");
        let mut dd = dd.placeholder("Fruit");
        assert!(dd.view().starts_with("Fruit"));
        assert!(dd.view().ends_with('▾'));
        assert_eq!(dd.selected_label(), None);

        dd.open();
        assert_eq!(dd.active_index(), Some(0));
    }

    #[test]
    fn test_replacing_options_while_open_revalidates() {
        let (mut dd, _) = recording(fruit(), "c");
        dd.open();
        assert_eq!(dd.active_index(), Some(2));

        dd.set_options(vec![
            SelectOption::new("x", "Xigua").disabled(true),
            SelectOption::new("y", "Yuzu"),
        ]);
        assert_eq!(dd.active_index(), Some(1));
    }

    #[test]
    fn test_empty_options() {
        let (mut dd, changes) = recording(Vec::new(), "");
        dd.open();
        assert!(dd.is_open());
        assert_eq!(dd.active_index(), None);
        dd.move_active(1);
        dd.move_to_edge(Edge::Last);
        dd.handle_key(&key(KeyType::Enter));
        assert!(changes.lock().is_empty());
    }
}

// ============================================================================
// Keyboard and pointer flows
// ============================================================================

mod input_tests {
    use super::*;

    #[test]
    fn test_keyboard_only_selection() {
        let (mut dd, changes) = recording(fruit(), "a");

        dd.handle_key(&KeyMsg::from_char(' '));
        assert!(dd.is_open());
        dd.handle_key(&key(KeyType::End));
        dd.handle_key(&key(KeyType::Up));
        assert_eq!(dd.active_index(), Some(0), "Up skips the disabled row");
        dd.handle_key(&KeyMsg::from_char('c'));
        let out = dd.handle_key(&key(KeyType::Enter));

        assert_eq!(out.committed.as_deref(), Some("c"));
        assert_eq!(changes.lock().as_slice(), ["c"]);
    }

    #[test]
    fn test_escape_discards_highlight() {
        let (mut dd, changes) = recording(fruit(), "a");
        dd.handle_key(&key(KeyType::Down));
        dd.handle_key(&key(KeyType::Down));
        dd.handle_key(&key(KeyType::Esc));

        assert!(!dd.is_open());
        assert_eq!(dd.get_value(), "a");
        assert!(changes.lock().is_empty());

        dd.open();
        assert_eq!(dd.active_index(), Some(0), "reopening starts at the value");
    }

    #[test]
    fn test_pointer_selection() {
        let (mut dd, changes) = recording(fruit(), "a");
        dd.layout(2, 1);

        assert_eq!(dd.hit_test(2, 1), Target::Trigger);
        dd.handle_pointer(&PointerMsg::press(3, 1));
        assert!(dd.is_open());
        assert_eq!(dd.hit_test(3, 4), Target::Row(2));

        dd.handle_pointer(&PointerMsg::hover(3, 4));
        assert_eq!(dd.active_index(), Some(2));
        dd.handle_pointer(&PointerMsg::press(3, 3));
        assert!(dd.is_open(), "disabled row click keeps the list open");
        dd.handle_pointer(&PointerMsg::press(3, 4));

        assert_eq!(dd.get_value(), "c");
        assert_eq!(changes.lock().as_slice(), ["c"]);
        assert!(!dd.is_open());
        assert_eq!(dd.hit_test(3, 4), Target::Outside);
    }

    #[test]
    fn test_disabled_component_ignores_everything() {
        let (dd, changes) = recording(fruit(), "a");
        let mut dd = dd.disabled(true);
        let hub = DismissHub::new();
        dd.mount(&hub);
        dd.layout(0, 0);

        for k in [
            key(KeyType::Enter),
            key(KeyType::Down),
            KeyMsg::from_char('c'),
        ] {
            let out = dd.handle_key(&k);
            assert!(!out.consumed);
        }
        dd.handle_pointer(&PointerMsg::press(0, 0));
        dd.open();
        assert!(!dd.is_open());
        assert!(!dd.commit(2));
        assert!(changes.lock().is_empty());

        dd.set_disabled(false);
        dd.open();
        assert!(dd.is_open());
    }
}

// ============================================================================
// Dismissal
// ============================================================================

mod dismissal_tests {
    use super::*;

    #[test]
    fn test_outside_pointer_down_closes_without_commit() {
        let hub = DismissHub::new();
        let (mut dd, changes) = recording(fruit(), "a");
        dd.mount(&hub);
        dd.layout(0, 0);
        dd.open();
        dd.move_active(1);

        hub.dispatch(&PointerMsg::press(40, 10));
        assert!(!dd.is_open());
        assert_eq!(dd.get_value(), "a");
        assert!(changes.lock().is_empty());
        assert_eq!(dd.boundary().list, None);
    }

    #[test]
    fn test_inside_pointer_down_does_not_dismiss() {
        let hub = DismissHub::new();
        let (mut dd, _) = recording(fruit(), "a");
        dd.mount(&hub);
        dd.layout(0, 0);
        dd.open();

        hub.dispatch(&PointerMsg::press(1, 2));
        assert!(dd.is_open());
    }

    #[test]
    fn test_motion_outside_does_not_dismiss() {
        let hub = DismissHub::new();
        let (mut dd, _) = recording(fruit(), "a");
        dd.mount(&hub);
        dd.open();

        hub.dispatch(&PointerMsg::hover(60, 30));
        assert!(dd.is_open());
    }

    #[test]
    fn test_mount_twice_registers_once() {
        let hub = DismissHub::new();
        let mut dd = Dropdown::new().options(fruit());
        dd.mount(&hub);
        dd.mount(&hub);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_unmount_removes_listener() {
        let hub = DismissHub::new();
        let mut dd = Dropdown::new().options(fruit());
        dd.mount(&hub);
        dd.open();
        dd.unmount();

        assert!(!dd.is_mounted());
        assert!(!dd.is_open());
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(&PointerMsg::press(50, 50)), 0);
    }

    #[test]
    fn test_dropping_dropdown_removes_listener() {
        let hub = DismissHub::new();
        {
            let mut dd = Dropdown::new().options(fruit());
            dd.mount(&hub);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_remount_after_unmount() {
        let hub = DismissHub::new();
        let mut dd = Dropdown::new().options(fruit());
        dd.mount(&hub);
        dd.unmount();
        dd.mount(&hub);
        dd.layout(0, 0);
        dd.open();

        hub.dispatch(&PointerMsg::press(70, 0));
        assert!(!dd.is_open());
        assert_eq!(hub.listener_count(), 1);
    }
}

// ============================================================================
// Several dropdowns on one screen
// ============================================================================

mod multiple_tests {
    use super::*;

    #[test]
    fn test_opening_one_by_click_dismisses_the_other() {
        let hub = DismissHub::new();
        let (mut left, _) = recording(fruit(), "a");
        let (mut right, _) = recording(fruit(), "c");
        left.mount(&hub);
        right.mount(&hub);
        left.layout(0, 0);
        right.layout(20, 0);

        left.open();
        let click = PointerMsg::press(21, 0);
        hub.dispatch(&click);
        right.handle_pointer(&click);

        assert!(!left.is_open());
        assert!(right.is_open());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Dropdown::new();
        let b = Dropdown::new();
        assert_ne!(a.id(), b.id());
    }
}
