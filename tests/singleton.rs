//! The process-wide manager instance.

use std::time::Duration;
use toastr::{Config, ToastManager, ToastOptions};

#[test]
fn test_instance_is_shared() {
    let first = ToastManager::instance();
    let second = ToastManager::instance();
    assert!(std::ptr::eq(first, second));

    // Already created, so a later configuration is ignored
    assert!(!ToastManager::init_instance(&Config::default()));
    assert!(std::ptr::eq(ToastManager::instance(), first));
}

#[test]
fn test_state_persists_across_locks() {
    let id = {
        let mut manager = ToastManager::lock();
        manager.show("global", ToastOptions::new().duration(Duration::ZERO))
    };

    {
        let manager = ToastManager::lock();
        assert!(manager.get(&id).is_some());
    }

    let mut manager = ToastManager::lock();
    manager.remove(&id);
    assert!(manager.get(&id).is_none());
}
