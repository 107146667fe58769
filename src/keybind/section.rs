//! Input sections: named, ordered groups of key bindings from one origin

use super::mapping::KeyMapping;

/// Name of the single user-editable section backed by the config file
pub const DEFAULT_SECTION: &str = "default";

/// Where a section's bindings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionOrigin {
    /// The user's on-disk bindings file
    ConfigFile,
    /// A loaded plugin
    Plugin,
    /// An embedded script
    EmbeddedScript,
    /// An active video filter
    VideoFilter,
}

impl SectionOrigin {
    /// Short label for logs and the inspector CLI
    pub fn label(self) -> &'static str {
        match self {
            SectionOrigin::ConfigFile => "config",
            SectionOrigin::Plugin => "plugin",
            SectionOrigin::EmbeddedScript => "script",
            SectionOrigin::VideoFilter => "filter",
        }
    }
}

/// A named, ordered list of key bindings plus layering metadata
///
/// Sections may freely overlap on keys; de-duplication happens during
/// resolution, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSection {
    /// Unique section name
    pub name: String,
    /// Who contributed this section
    pub origin: SectionOrigin,
    /// Strong (force) sections layer above the default section, weak ones below
    pub is_force: bool,
    /// The section's bindings in source order
    pub bindings: Vec<KeyMapping>,
}

impl InputSection {
    /// Create a section
    pub fn new(
        name: impl Into<String>,
        origin: SectionOrigin,
        is_force: bool,
        bindings: Vec<KeyMapping>,
    ) -> Self {
        Self {
            name: name.into(),
            origin,
            is_force,
            bindings,
        }
    }

    /// Whether this is the single user-editable config-file section
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SECTION && self.origin == SectionOrigin::ConfigFile
    }
}

/// One entry of the stack's enabled list
///
/// Order in the enabled list encodes priority, lowest first. The exclusive
/// flag makes the section's bindings the final candidate list when the
/// resolver reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledSectionMeta {
    pub name: String,
    pub is_exclusive: bool,
}

impl EnabledSectionMeta {
    pub fn new(name: impl Into<String>, is_exclusive: bool) -> Self {
        Self {
            name: name.into(),
            is_exclusive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_default_requires_name_and_origin() {
        let default =
            InputSection::new(DEFAULT_SECTION, SectionOrigin::ConfigFile, true, Vec::new());
        assert!(default.is_default());

        let wrong_origin =
            InputSection::new(DEFAULT_SECTION, SectionOrigin::Plugin, true, Vec::new());
        assert!(!wrong_origin.is_default());

        let wrong_name = InputSection::new("osc", SectionOrigin::ConfigFile, true, Vec::new());
        assert!(!wrong_name.is_default());
    }
}
