//! Toast lifecycle management.
//!
//! The [`ToastManager`] owns the ordered toast records, the shared [`Host`]
//! and the deferred tasks that dismiss and detach toasts. A toast node goes
//! through three states:
//!
//! - displayed: attached, auto-dismiss pending if it has a duration
//! - exiting: tracked by the manager, `toastr-exit` applied for styling,
//!   detachment scheduled
//! - detached: gone from the host
//!
//! The record leaves the collection as soon as the node starts exiting.

use crate::config::Config;
use crate::host::{build_toast_node, Host, CLOSE_CLASS, EXIT_CLASS};
use crate::node::Action;
use crate::scheduler::{Scheduler, Task, TimerKey};
use crate::toast::{ResolvedOptions, Toast, ToastContent, ToastId, ToastOptions};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;
use tracing::{debug, trace};

static INSTANCE: OnceLock<Mutex<ToastManager>> = OnceLock::new();

/// Presentation state of an attached toast node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Displayed,
    Exiting,
}

#[derive(Debug)]
pub struct ToastManager {
    /// Live records, oldest first
    toasts: Vec<Toast>,
    host: Host,
    scheduler: Scheduler,
    /// Pending auto-dismiss task per toast
    auto_dismiss: HashMap<ToastId, TimerKey>,
    /// Toasts whose node is attached but waiting to be detached
    exiting: HashSet<ToastId>,
    defaults: ResolvedOptions,
    exit_animation: Duration,
}

impl ToastManager {
    /// Create a standalone manager with its own host
    pub fn new(config: &Config) -> Self {
        Self {
            toasts: Vec::new(),
            host: Host::new(),
            scheduler: Scheduler::new(),
            auto_dismiss: HashMap::new(),
            exiting: HashSet::new(),
            defaults: config.defaults.resolved(),
            exit_animation: config.exit_animation(),
        }
    }

    /// The process-wide manager, created with default configuration on first use
    pub fn instance() -> &'static Mutex<ToastManager> {
        INSTANCE.get_or_init(|| {
            debug!("Creating toast manager instance");
            Mutex::new(ToastManager::default())
        })
    }

    /// Create the process-wide manager from `config`.
    ///
    /// Returns `false` and changes nothing if it already exists.
    pub fn init_instance(config: &Config) -> bool {
        let mut created = false;
        INSTANCE.get_or_init(|| {
            created = true;
            Mutex::new(ToastManager::new(config))
        });
        created
    }

    /// Lock the process-wide manager
    pub fn lock() -> MutexGuard<'static, ToastManager> {
        // Every operation leaves the manager consistent, so a poisoned lock is safe to reuse
        Self::instance()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Id of the newest toast still in the collection
    pub fn current_toast_id(&self) -> Option<ToastId> {
        self.toasts.last().map(|t| t.id)
    }

    /// Show a toast and return its id
    pub fn show(&mut self, content: impl Into<ToastContent>, options: ToastOptions) -> ToastId {
        let toast = Toast::new(content.into(), options.resolve(&self.defaults));
        let id = toast.id;
        debug!(
            "Showing toast {} ({}, {}): {}",
            id, toast.kind, toast.options.position, toast.title
        );

        self.host.set_position(toast.options.position);
        // Close control is wired through the node's activation action
        self.host.attach(build_toast_node(&toast));

        if let Some(delay) = toast.options.auto_dismiss() {
            let key = self.scheduler.schedule(delay, Task::AutoDismiss(id));
            self.auto_dismiss.insert(id, key);
        }
        self.toasts.push(toast);
        id
    }

    /// Remove a toast. Unknown ids and repeated calls are no-ops.
    pub fn remove(&mut self, id: &ToastId) {
        if let Some(index) = self.toasts.iter().position(|t| t.id == *id) {
            self.toasts.remove(index);
            debug!("Removed toast {}", id);
        }
        if let Some(key) = self.auto_dismiss.remove(id) {
            self.scheduler.cancel(key);
        }

        if self.exiting.contains(id) {
            return;
        }
        let Some(node) = self.host.find_toast_mut(&id.to_string()) else {
            return;
        };
        node.add_class(EXIT_CLASS);
        self.exiting.insert(*id);
        self.scheduler.schedule(self.exit_animation, Task::Detach(*id));
    }

    /// Remove every live toast; each one exits normally
    pub fn clear(&mut self) {
        let ids: Vec<ToastId> = self.toasts.iter().map(|t| t.id).collect();
        for id in ids {
            self.remove(&id);
        }
    }

    /// Activate the close control of a toast, as a click would.
    ///
    /// Returns `false` if the toast has no close control attached.
    pub fn activate_close(&mut self, id: &ToastId) -> bool {
        let action = self
            .host
            .find_toast(&id.to_string())
            .and_then(|node| node.find_descendant_by_class(CLOSE_CLASS))
            .and_then(|close| close.on_activate);
        match action {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Remove(id) => self.remove(&id),
        }
    }

    /// Move the clock forward by `delta`, running every task that comes due
    pub fn advance(&mut self, delta: Duration) {
        let until = self.scheduler.now().saturating_add(delta);
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.settle(until);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::AutoDismiss(id) => {
                trace!("Auto-dismiss fired for {}", id);
                self.auto_dismiss.remove(&id);
                self.remove(&id);
            }
            Task::Detach(id) => {
                self.exiting.remove(&id);
                if self.host.detach(&id.to_string()) {
                    debug!("Detached toast {}", id);
                } else {
                    trace!("Toast {} already detached", id);
                }
            }
        }
    }

    /// Time elapsed on the manager's clock
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == *id)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// State of the node for `id`; `None` once detached
    pub fn node_state(&self, id: &ToastId) -> Option<NodeState> {
        self.host.find_toast(&id.to_string())?;
        if self.exiting.contains(id) {
            Some(NodeState::Exiting)
        } else {
            Some(NodeState::Displayed)
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
