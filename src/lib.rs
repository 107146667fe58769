//! keystack - layered key-binding resolution for a desktop media player
//!
//! This crate provides the core types and logic for stacking several
//! independently maintained collections of key bindings ("input sections")
//! and resolving them into a single conflict-free lookup table.

pub mod cli;
pub mod config_paths;
pub mod keybind;
pub mod tracing;

// Re-export commonly used types
pub use keybind::{
    build, AppInputConfig, EnabledSectionMeta, InputBinding, InputConfigStore, InputSection,
    InputSectionStack, KeyMapping, SectionOrigin, StackSnapshot, DEFAULT_SECTION,
};
