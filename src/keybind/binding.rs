//! InputBinding: a resolved key mapping with provenance and state
//!
//! Built fresh by every rebuild; never shared across rebuilds. The enabled
//! flag and display message only change while a single `AppInputConfig` is
//! under construction, never after it is published.

use super::mapping::KeyMapping;
use super::section::SectionOrigin;

/// One candidate binding in a resolved input configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    /// The underlying key mapping
    pub mapping: KeyMapping,
    /// Origin of the section that contributed this binding
    pub origin: SectionOrigin,
    /// Name of the section that contributed this binding
    pub source_section: String,
    /// Whether this binding takes part in resolution
    pub is_enabled: bool,
    /// Why the binding is disabled, for display in a bindings table
    pub display_message: Option<String>,
    /// Whether the binding is mirrored by a menu item
    pub is_menu_item: bool,
}

impl InputBinding {
    /// Create an enabled binding
    pub fn enabled(
        mapping: KeyMapping,
        origin: SectionOrigin,
        source_section: impl Into<String>,
    ) -> Self {
        Self {
            mapping,
            origin,
            source_section: source_section.into(),
            is_enabled: true,
            display_message: None,
            is_menu_item: false,
        }
    }

    /// Create a binding that is disabled from the start, with a reason
    pub fn disabled(
        mapping: KeyMapping,
        origin: SectionOrigin,
        source_section: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut binding = Self::enabled(mapping, origin, source_section);
        binding.disable(message);
        binding
    }

    /// Disable this binding with a reason (construction-time only)
    pub(crate) fn disable(&mut self, message: impl Into<String>) {
        self.is_enabled = false;
        self.display_message = Some(message.into());
    }

    /// The canonical key string this binding resolves under
    pub fn normalized_key(&self) -> String {
        self.mapping.normalized_key()
    }
}
