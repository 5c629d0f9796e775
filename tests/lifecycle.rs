//! Lifecycle properties of the toast manager, observed through its host.

use std::time::Duration;
use toastr::host::{CONTAINER_CLASS, ID_ATTRIBUTE, TOAST_CLASS};
use toastr::{NodeState, Position, ToastContent, ToastManager, ToastOptions};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn toast_count(manager: &ToastManager) -> usize {
    manager.host().root().find_all_by_class(TOAST_CLASS).len()
}

#[test]
fn test_host_exists_before_any_toast() {
    let manager = ToastManager::default();
    assert!(manager.host().root().has_class(CONTAINER_CLASS));
    assert_eq!(toast_count(&manager), 0);
}

#[test]
fn test_show_attaches_one_node() {
    let mut manager = ToastManager::default();
    manager.show("T", ToastOptions::new());

    let nodes = manager.host().root().find_all_by_class(TOAST_CLASS);
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].text_content().contains('T'));

    let id = manager.current_toast_id().unwrap();
    assert_eq!(nodes[0].attribute(ID_ATTRIBUTE), Some(id.to_string().as_str()));
}

#[test]
fn test_remove_exits_then_detaches() {
    let mut manager = ToastManager::default();
    let id = manager.show("Test message", ToastOptions::new());

    manager.remove(&id);
    assert!(manager.is_empty());
    assert_eq!(manager.current_toast_id(), None);
    assert_eq!(manager.node_state(&id), Some(NodeState::Exiting));
    assert_eq!(toast_count(&manager), 1);

    manager.advance(ms(299));
    assert_eq!(toast_count(&manager), 1);
    manager.advance(ms(1));
    assert_eq!(manager.node_state(&id), None);
    assert_eq!(toast_count(&manager), 0);
}

#[test]
fn test_auto_dismiss_after_duration() {
    let mut manager = ToastManager::default();
    let id = manager.show(
        ToastContent::new("Auto"),
        ToastOptions::new().duration(ms(2000)),
    );

    manager.advance(ms(1999));
    assert_eq!(manager.node_state(&id), Some(NodeState::Displayed));
    assert_eq!(manager.current_toast_id(), Some(id));

    manager.advance(ms(1));
    assert_eq!(manager.node_state(&id), Some(NodeState::Exiting));
    assert_eq!(manager.current_toast_id(), None);

    manager.advance(ms(300));
    assert_eq!(manager.node_state(&id), None);
}

#[test]
fn test_zero_duration_persists() {
    let mut manager = ToastManager::default();
    let id = manager.show("Sticky", ToastOptions::new().duration(Duration::ZERO));

    manager.advance(Duration::from_secs(3600));
    assert_eq!(manager.node_state(&id), Some(NodeState::Displayed));
    assert_eq!(manager.current_toast_id(), Some(id));
}

#[test]
fn test_removing_first_leaves_second_untouched() {
    let mut manager = ToastManager::default();
    let first = manager.show("Message 1", ToastOptions::new());
    let second = manager.show("Message 2", ToastOptions::new());

    let nodes = manager.host().root().find_all_by_class(TOAST_CLASS);
    assert_eq!(nodes.len(), 2);
    assert!(nodes[0].text_content().contains("Message 1"));
    assert!(nodes[1].text_content().contains("Message 2"));

    manager.remove(&first);
    manager.advance(ms(300));

    let nodes = manager.host().root().find_all_by_class(TOAST_CLASS);
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].text_content().contains("Message 2"));
    assert_eq!(manager.node_state(&second), Some(NodeState::Displayed));
    assert_eq!(manager.current_toast_id(), Some(second));
}

#[test]
fn test_unknown_id_is_a_no_op() {
    let mut manager = ToastManager::default();
    manager.show("kept", ToastOptions::new());
    let pending = manager.pending_tasks();

    manager.remove(&toastr::ToastId::new());
    assert_eq!(manager.len(), 1);
    assert_eq!(toast_count(&manager), 1);
    assert_eq!(manager.pending_tasks(), pending);
}

#[test]
fn test_latest_position_moves_whole_host() {
    let mut manager = ToastManager::default();
    manager.show("a", ToastOptions::new().position(Position::TopLeft));
    assert_eq!(manager.host().position(), Some(Position::TopLeft));

    manager.show("b", ToastOptions::new().position(Position::BottomCenter));
    let root = manager.host().root();
    assert_eq!(manager.host().position(), Some(Position::BottomCenter));
    assert!(!root.has_class("top-left"));
    // Both toasts live under the one repositioned host
    assert_eq!(toast_count(&manager), 2);

    // Unset position falls back to the default, not the previous call
    manager.show("c", ToastOptions::new());
    assert_eq!(manager.host().position(), Some(Position::TopRight));
}

#[test]
fn test_close_control_removes_toast() {
    let mut manager = ToastManager::default();
    let id = manager.show("Closable", ToastOptions::new());

    assert!(manager.activate_close(&id));
    assert!(manager.is_empty());
    assert_eq!(manager.node_state(&id), Some(NodeState::Exiting));

    // A second click on the exiting node changes nothing
    assert!(manager.activate_close(&id));
    assert_eq!(manager.pending_tasks(), 1);
}

#[test]
fn test_node_count_matches_live_and_exiting_toasts() {
    let mut manager = ToastManager::default();
    let mut exiting = 0;
    for i in 0..6u64 {
        let id = manager.show(format!("toast {i}"), ToastOptions::new().duration(ms(500 + i * 100)));
        if i % 2 == 0 {
            manager.remove(&id);
            exiting += 1;
        }
        assert_eq!(toast_count(&manager), manager.len() + exiting);
    }

    // Removals at t=0 detach at 300; auto-dismissals start at 600
    manager.advance(ms(300));
    assert_eq!(toast_count(&manager), manager.len());
    assert_eq!(manager.len(), 3);
}

#[test]
fn test_exit_marker_class_from_caller_does_not_stall_removal() {
    let mut manager = ToastManager::default();
    let id = manager.show(
        "x",
        ToastOptions::new()
            .duration(Duration::ZERO)
            .class_name("toastr-exit"),
    );
    assert_eq!(manager.node_state(&id), Some(NodeState::Displayed));

    manager.remove(&id);
    assert_eq!(manager.node_state(&id), Some(NodeState::Exiting));
    assert_eq!(manager.pending_tasks(), 1);

    manager.advance(ms(300));
    assert_eq!(manager.node_state(&id), None);
    assert_eq!(toast_count(&manager), 0);
}

#[test]
fn test_close_class_from_caller_keeps_close_control_working() {
    let mut manager = ToastManager::default();
    let id = manager.show("x", ToastOptions::new().class_name("toastr-close"));

    assert!(manager.activate_close(&id));
    assert!(manager.is_empty());
    assert_eq!(manager.node_state(&id), Some(NodeState::Exiting));
}
