//! KeyMapping: one raw key → command entry as parsed from a section source
//!
//! A `KeyMapping` is a value: editing a binding in the UI produces a new
//! `KeyMapping`, never an in-place mutation of an existing one. Provenance
//! and enabled/disabled state live on the wrapping
//! [`InputBinding`](super::InputBinding) instead.

use super::normalize::normalize_key;

/// A single key → command mapping as contributed by a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapping {
    /// The key or chord exactly as the source spelled it
    pub raw_key: String,
    /// The tokenized command to run when the key fires
    pub raw_action: Vec<String>,
    /// Whether the command is an app-level command rather than a player command
    pub is_special_command: bool,
    /// Stable identifier assigned by the editing UI, if any
    pub binding_id: Option<u64>,
    /// Trailing comment from the source line, if any
    pub comment: Option<String>,
}

impl KeyMapping {
    /// Create a mapping from a raw key and tokenized action
    pub fn new(raw_key: impl Into<String>, raw_action: Vec<String>) -> Self {
        Self {
            raw_key: raw_key.into(),
            raw_action,
            is_special_command: false,
            binding_id: None,
            comment: None,
        }
    }

    /// Mark this mapping as an app-level command (builder pattern)
    pub fn special(mut self) -> Self {
        self.is_special_command = true;
        self
    }

    /// Attach a source comment (builder pattern)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach an editing identifier (builder pattern)
    pub fn with_binding_id(mut self, id: u64) -> Self {
        self.binding_id = Some(id);
        self
    }

    /// The canonical key string used for lookup and de-duplication
    pub fn normalized_key(&self) -> String {
        normalize_key(&self.raw_key)
    }

    /// The action joined back into a single display string
    pub fn action_string(&self) -> String {
        self.raw_action.join(" ")
    }
}
