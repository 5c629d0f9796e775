//! Scripted toast timelines.
//!
//! A script is a TOML list of timed steps (show, remove, close) played
//! through a [`ToastManager`] on its virtual clock. A [`Snapshot`] of the
//! manager is taken after every step and once more at `until_ms`.

use crate::manager::ToastManager;
use crate::host::Host;
use crate::toast::{ToastContent, ToastId, ToastOptions};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    /// Keep the clock running until this time after the last step
    #[serde(default)]
    pub until_ms: Option<u64>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    Show {
        #[serde(flatten)]
        content: ToastContent,
        #[serde(default)]
        options: ToastOptions,
    },
    /// Remove a toast by the index it was shown at; the current toast if unset
    Remove {
        #[serde(default)]
        target: Option<usize>,
    },
    /// Activate a toast's close control
    Close {
        #[serde(default)]
        target: Option<usize>,
    },
}

/// Manager state at one point of a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub at_ms: u64,
    pub current: Option<ToastId>,
    pub records: usize,
    pub host: Host,
}

impl Snapshot {
    pub fn capture(manager: &ToastManager) -> Self {
        Self {
            at_ms: manager.now().as_millis() as u64,
            current: manager.current_toast_id(),
            records: manager.len(),
            host: manager.host().clone(),
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse script: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let script: Script = toml::from_str(content).context("Invalid toast script")?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        let mut shown = 0usize;
        let mut last_at = 0u64;
        for (index, step) in self.steps.iter().enumerate() {
            if step.at_ms < last_at {
                bail!(
                    "Step {} at {}ms comes before the previous step at {}ms",
                    index,
                    step.at_ms,
                    last_at
                );
            }
            last_at = step.at_ms;
            match &step.action {
                StepAction::Show { .. } => shown += 1,
                StepAction::Remove { target: Some(t) } | StepAction::Close { target: Some(t) }
                    if *t >= shown =>
                {
                    bail!(
                        "Step {} targets toast {} but only {} toast(s) were shown before it",
                        index,
                        t,
                        shown
                    );
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Play every step through `manager`
    pub fn play(&self, manager: &mut ToastManager) -> Vec<Snapshot> {
        let start = manager.now();
        let mut shown: Vec<ToastId> = Vec::new();
        let mut snapshots = Vec::with_capacity(self.steps.len() + 1);

        for step in &self.steps {
            let at = start + Duration::from_millis(step.at_ms);
            manager.advance(at.saturating_sub(manager.now()));

            match &step.action {
                StepAction::Show { content, options } => {
                    let id = manager.show(content.clone(), options.clone());
                    shown.push(id);
                }
                StepAction::Remove { target } => {
                    if let Some(id) = resolve_target(manager, &shown, *target) {
                        manager.remove(&id);
                    }
                }
                StepAction::Close { target } => {
                    if let Some(id) = resolve_target(manager, &shown, *target) {
                        if !manager.activate_close(&id) {
                            info!("Toast {} has no close control attached", id);
                        }
                    }
                }
            }
            snapshots.push(Snapshot::capture(manager));
        }

        if let Some(until) = self.until_ms {
            let at = start + Duration::from_millis(until);
            manager.advance(at.saturating_sub(manager.now()));
            snapshots.push(Snapshot::capture(manager));
        }
        snapshots
    }
}

fn resolve_target(manager: &ToastManager, shown: &[ToastId], target: Option<usize>) -> Option<ToastId> {
    match target {
        Some(index) => shown.get(index).copied(),
        None => manager.current_toast_id(),
    }
}
