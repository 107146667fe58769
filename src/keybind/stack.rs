//! InputSectionStack: the long-lived registry of sections and enablements
//!
//! All mutations and the snapshot read that feeds a rebuild go through one
//! mutex, so a rebuild never observes a mid-mutation stack. The stack never
//! hands out a live view; consumers get a [`StackSnapshot`] clone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use super::builder::build;
use super::section::{EnabledSectionMeta, InputSection};
use super::snapshot::AppInputConfig;

/// A consistent, owned copy of the stack for the resolution engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackSnapshot {
    /// All defined sections by name
    pub sections: HashMap<String, InputSection>,
    /// Enabled sections, lowest priority first
    pub enabled: Vec<EnabledSectionMeta>,
}

#[derive(Debug, Default)]
struct StackState {
    sections: HashMap<String, InputSection>,
    enabled: Vec<EnabledSectionMeta>,
}

/// Serialized registry of all defined input sections plus the enabled list
#[derive(Debug, Default)]
pub struct InputSectionStack {
    inner: Mutex<StackState>,
}

impl InputSectionStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a section's content
    ///
    /// Sections may overlap on keys; de-duplication is the resolution
    /// engine's job, not the stack's.
    pub fn define_section(&self, section: InputSection) {
        let mut state = self.lock();
        debug!(
            section = section.name.as_str(),
            origin = section.origin.label(),
            force = section.is_force,
            bindings = section.bindings.len(),
            "Defining input section"
        );
        state.sections.insert(section.name.clone(), section);
    }

    /// Remove a defined section, and its enablement if present
    pub fn remove_section(&self, name: &str) {
        let mut state = self.lock();
        state.sections.remove(name);
        state.enabled.retain(|meta| meta.name != name);
    }

    /// Enable a section at top-of-stack priority
    ///
    /// If the section is already enabled, only its exclusive flag changes;
    /// its position in the stack is kept.
    pub fn set_enabled(&self, name: &str, is_exclusive: bool) {
        let mut state = self.lock();
        if let Some(meta) = state.enabled.iter_mut().find(|meta| meta.name == name) {
            meta.is_exclusive = is_exclusive;
        } else {
            state
                .enabled
                .push(EnabledSectionMeta::new(name, is_exclusive));
        }
    }

    /// Remove a section from the enabled list
    pub fn set_disabled(&self, name: &str) {
        let mut state = self.lock();
        state.enabled.retain(|meta| meta.name != name);
    }

    /// Atomic, consistent read of (defined sections, enabled list)
    pub fn snapshot(&self) -> StackSnapshot {
        let state = self.lock();
        StackSnapshot {
            sections: state.sections.clone(),
            enabled: state.enabled.clone(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StackState> {
        // A panicked holder cannot leave the state torn: every mutation
        // completes in one assignment batch under the lock
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The section stack paired with the currently published resolution
///
/// `rebuild` takes a snapshot, runs the engine, and swaps the new
/// configuration in with a single write. Readers clone an `Arc` and never
/// block each other; a reader always sees either the old or the new
/// complete snapshot.
#[derive(Debug)]
pub struct InputConfigStore {
    stack: InputSectionStack,
    current: RwLock<Arc<AppInputConfig>>,
}

impl InputConfigStore {
    /// Create a store with an empty stack and an empty published config
    pub fn new() -> Self {
        Self {
            stack: InputSectionStack::new(),
            current: RwLock::new(Arc::new(AppInputConfig::empty())),
        }
    }

    /// The underlying section stack
    pub fn stack(&self) -> &InputSectionStack {
        &self.stack
    }

    /// The currently published configuration
    pub fn current(&self) -> Arc<AppInputConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuild from the current stack state and publish the result
    pub fn rebuild(&self) -> Arc<AppInputConfig> {
        let config = Arc::new(build(&self.stack.snapshot()));
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = config.clone();
        config
    }
}

impl Default for InputConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
