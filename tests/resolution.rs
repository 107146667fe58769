//! Resolution engine property tests
//!
//! Checks the externally observable guarantees of the engine: uniqueness,
//! last-wins shadowing, default-range purity, exclusive cutoff, chord
//! prefix coverage, and idempotence.

use std::collections::HashSet;

use keystack::{
    build, AppInputConfig, InputSection, InputSectionStack, KeyMapping, SectionOrigin,
    DEFAULT_SECTION,
};

fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn section(
    name: &str,
    origin: SectionOrigin,
    force: bool,
    pairs: &[(&str, &str)],
) -> InputSection {
    InputSection::new(
        name,
        origin,
        force,
        pairs
            .iter()
            .map(|(key, action)| KeyMapping::new(*key, tokens(action)))
            .collect(),
    )
}

/// A busy stack with overlap across every origin
fn busy_stack() -> InputSectionStack {
    let stack = InputSectionStack::new();
    stack.define_section(section(
        DEFAULT_SECTION,
        SectionOrigin::ConfigFile,
        true,
        &[
            ("q", "quit"),
            ("SPACE", "cycle pause"),
            ("a", "seek 5"),
            ("ctrl+k-c", "comment"),
        ],
    ));
    stack.define_section(section(
        "plugin-a",
        SectionOrigin::Plugin,
        false,
        &[("a", "plugin-a-action"), ("b", "plugin-b-action")],
    ));
    stack.define_section(section(
        "osc",
        SectionOrigin::EmbeddedScript,
        false,
        &[("tab", "osc-toggle"), ("a", "osc-a")],
    ));
    stack.define_section(section(
        "crop",
        SectionOrigin::VideoFilter,
        true,
        &[("c", "crop-apply"), ("q", "crop-cancel")],
    ));
    stack.set_enabled("plugin-a", false);
    stack.set_enabled("osc", false);
    stack.set_enabled(DEFAULT_SECTION, false);
    stack.set_enabled("crop", false);
    stack
}

// ========================================================================
// Uniqueness
// ========================================================================

#[test]
fn test_resolved_entries_are_enabled_and_unique() {
    let config = build(&busy_stack().snapshot());

    for (_, binding) in config.resolved_entries() {
        assert!(binding.is_enabled);
    }

    let mut seen = HashSet::new();
    for binding in config.candidates().iter().filter(|b| b.is_enabled) {
        let key = binding.normalized_key();
        if key.is_empty() {
            continue;
        }
        assert!(seen.insert(key), "two enabled candidates share a key");
    }
}

// ========================================================================
// Last-wins
// ========================================================================

#[test]
fn test_later_candidate_wins_and_earlier_gets_message() {
    let config = build(&busy_stack().snapshot());

    // "q" appears in default and in the crop filter section; crop is a
    // force section above the default, so it wins
    let winner = config.lookup("q").unwrap();
    assert_eq!(winner.mapping.action_string(), "crop-cancel");

    let loser = config
        .candidates()
        .iter()
        .find(|b| b.source_section == DEFAULT_SECTION && b.mapping.raw_key == "q")
        .unwrap();
    assert!(!loser.is_enabled);
    assert!(!loser.display_message.as_deref().unwrap_or("").is_empty());
}

#[test]
fn test_shadowing_keeps_both_rows_visible() {
    let config = build(&busy_stack().snapshot());
    let a_rows: Vec<_> = config
        .candidates()
        .iter()
        .filter(|b| b.normalized_key() == "a")
        .collect();
    // plugin-a, osc, and default all bind "a"; every row stays visible
    assert_eq!(a_rows.len(), 3);
    assert_eq!(a_rows.iter().filter(|b| b.is_enabled).count(), 1);
}

// ========================================================================
// Default-range purity
// ========================================================================

#[test]
fn test_default_range_matches_source_section_exactly() {
    let config = build(&busy_stack().snapshot());

    for idx in 0..config.candidate_count() {
        let binding = config.candidate_at(idx).unwrap();
        let in_range = config.is_default_section_index(idx);
        let from_default = binding.source_section == DEFAULT_SECTION
            && binding.origin == SectionOrigin::ConfigFile;
        assert_eq!(in_range, from_default, "index {}", idx);
    }
}

// ========================================================================
// Exclusive cutoff
// ========================================================================

#[test]
fn test_exclusive_section_excludes_everything_else() {
    let stack = busy_stack();
    stack.define_section(section(
        "modal",
        SectionOrigin::EmbeddedScript,
        true,
        &[("escape", "leave"), ("enter", "accept")],
    ));
    stack.set_enabled("modal", true);

    let config = build(&stack.snapshot());
    for binding in config.candidates() {
        assert_eq!(binding.source_section, "modal");
    }
    assert!(config.lookup("q").is_none());
    assert!(config.lookup("escape").is_some());
}

// ========================================================================
// Chord prefix coverage
// ========================================================================

#[test]
fn test_every_strict_prefix_of_active_chords_resolves() {
    let stack = InputSectionStack::new();
    stack.define_section(section(
        DEFAULT_SECTION,
        SectionOrigin::ConfigFile,
        true,
        &[("ctrl+k-c-d", "deep chord"), ("ctrl+k", "real prefix")],
    ));
    stack.set_enabled(DEFAULT_SECTION, false);

    let config = build(&stack.snapshot());

    // The real binding on "ctrl+k" is kept as-is
    let real = config.lookup("ctrl+k").unwrap();
    assert_eq!(real.mapping.action_string(), "real prefix");

    // The intermediate prefix is synthesized
    let synthesized = config.lookup("ctrl+k-c").unwrap();
    assert_eq!(synthesized.mapping.action_string(), "ignore");
    assert_eq!(synthesized.source_section, DEFAULT_SECTION);

    // The full chord resolves to its command
    let full = config.lookup("ctrl+k-c-d").unwrap();
    assert_eq!(full.mapping.action_string(), "deep chord");
}

#[test]
fn test_prefixes_share_provenance_with_their_chord() {
    let stack = InputSectionStack::new();
    stack.define_section(section(
        "plugin-a",
        SectionOrigin::Plugin,
        false,
        &[("x-y-z", "plugin chord")],
    ));
    stack.set_enabled("plugin-a", false);

    let config = build(&stack.snapshot());
    for key in ["x", "x-y"] {
        let binding = config.lookup(key).unwrap();
        assert_eq!(binding.origin, SectionOrigin::Plugin);
        assert_eq!(binding.source_section, "plugin-a");
    }
}

// ========================================================================
// Idempotence and totality
// ========================================================================

#[test]
fn test_build_twice_is_structurally_equal() {
    let snapshot = busy_stack().snapshot();
    assert_eq!(build(&snapshot), build(&snapshot));
}

#[test]
fn test_build_never_fails_on_inconsistent_input() {
    let stack = InputSectionStack::new();
    // Dangling enablement, empty section, weird keys
    stack.set_enabled("ghost", false);
    stack.define_section(section("empty", SectionOrigin::Plugin, false, &[]));
    stack.set_enabled("empty", false);
    stack.define_section(section(
        "odd",
        SectionOrigin::Plugin,
        false,
        &[("", "no key"), ("default-bindings", "start")],
    ));
    stack.set_enabled("odd", false);

    let config: AppInputConfig = build(&stack.snapshot());
    assert_eq!(config.candidate_count(), 2);
    // The empty key is kept as a candidate but resolves to nothing
    assert!(config.lookup("").is_none());
}
