//! Toastr - transient toast notifications
//!
//! This library manages a single stack of toast notifications attached to a
//! shared host surface: it creates them, anchors the host, builds a typed
//! presentation tree per toast and dismisses toasts on a timer or on demand.

// Core modules
pub mod cli;
pub mod config;
pub mod host;
pub mod manager;
pub mod node;
pub mod scheduler;
pub mod script;
pub mod toast;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use manager::{NodeState, ToastManager};
pub use toast::{Position, ResolvedOptions, Toast, ToastContent, ToastId, ToastOptions, ToastType};
