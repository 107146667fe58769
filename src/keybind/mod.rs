//! Layered key-binding resolution
//!
//! This module turns several ordered collections of key bindings ("input
//! sections") contributed by different origins (the user's config file,
//! plugins, embedded scripts, video filters) into one conflict-free,
//! queryable mapping from a normalized key string to the binding that
//! should fire.
//!
//! # Architecture
//!
//! ```text
//! config/plugin/script events → InputSectionStack → build() → AppInputConfig
//! ```
//!
//! The [`InputSectionStack`] is the long-lived, mutex-serialized registry of
//! sections and the ordered list of enabled sections. [`build`] is a pure
//! function over a [`StackSnapshot`] that produces an immutable
//! [`AppInputConfig`]; [`InputConfigStore`] publishes each new snapshot to
//! readers with a single atomic swap.
//!
//! Shadowed, malformed, or legacy bindings are never dropped: they stay in
//! the candidate list as disabled [`InputBinding`]s with a human-readable
//! message, so a bindings table can show the user why a row is inactive.

mod binding;
mod builder;
mod loader;
mod mapping;
mod normalize;
mod section;
mod snapshot;
mod stack;

pub use binding::InputBinding;
pub use builder::{build, IGNORE_COMMAND};
pub use loader::{load_sections_file, parse_sections_yaml, SectionFileError};
pub use mapping::KeyMapping;
pub use normalize::{chord_prefixes, chord_steps, normalize_key, CHORD_SEPARATOR, MAX_CHORD_STEPS};
pub use section::{EnabledSectionMeta, InputSection, SectionOrigin, DEFAULT_SECTION};
pub use snapshot::AppInputConfig;
pub use stack::{InputConfigStore, InputSectionStack, StackSnapshot};
