//! The resolution engine: builds an AppInputConfig from a stack snapshot
//!
//! `build` is a pure, synchronous function; it performs no I/O, never
//! fails, and always terminates with a complete, internally consistent
//! configuration. Anomalies become disabled bindings with messages or log
//! lines, never errors.
//!
//! Resolution runs in three stages:
//!
//! 1. Candidate assembly: walk the enabled list bottom→top, layering weak
//!    sections ahead of the default section and force sections after it.
//! 2. De-duplication: walk the candidates in order; the last binding for a
//!    normalized key wins, earlier ones are disabled in place with a
//!    reason.
//! 3. Partial-chord filling: synthesize `ignore` bindings for every
//!    unclaimed strict prefix of an active 2–4 step chord, so the dispatch
//!    layer does not fall through to default handling mid-chord.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;

use tracing::{debug, error};

use super::binding::InputBinding;
use super::mapping::KeyMapping;
use super::normalize::{chord_prefixes, chord_steps, MAX_CHORD_STEPS};
use super::section::{InputSection, SectionOrigin};
use super::snapshot::{AppInputConfig, BindingSlot};
use super::stack::StackSnapshot;

/// The no-op command synthesized for partial chord prefixes
pub const IGNORE_COMMAND: &str = "ignore";

/// Key of the legacy "start of default bindings" marker line
const LEGACY_MARKER_KEY: &str = "default-bindings";

/// Action of the legacy marker line
const LEGACY_MARKER_ACTION: &str = "start";

/// Build a complete input configuration from a consistent stack snapshot
///
/// Reentrant and stateless; may run on any thread as long as the snapshot
/// was taken under the stack's serialization discipline.
pub fn build(snapshot: &StackSnapshot) -> AppInputConfig {
    let (mut candidates, default_section_range) = combine_enabled_section_bindings(snapshot);
    let mut resolved = resolve_duplicates(&mut candidates);
    let synthesized = fill_in_partial_sequences(&candidates, &mut resolved);

    debug!(
        candidates = candidates.len(),
        resolved = resolved.len(),
        synthesized = synthesized.len(),
        "Rebuilt input configuration"
    );

    AppInputConfig {
        candidates,
        synthesized,
        resolved,
        default_section_range,
    }
}

/// Stage 1: merge enabled sections into one ordered candidate list
///
/// Weak sections accumulate at the head (each section reversed, sections in
/// reverse stack order); force sections append to the tail in stack order.
/// An exclusive enablement discards everything merged so far and makes that
/// section's bindings the final, complete candidate list.
fn combine_enabled_section_bindings(
    snapshot: &StackSnapshot,
) -> (Vec<InputBinding>, Range<usize>) {
    let mut weak: VecDeque<InputBinding> = VecDeque::new();
    let mut strong: Vec<InputBinding> = Vec::new();
    let mut weak_count: usize = 0;
    let mut default_count: usize = 0;

    for meta in &snapshot.enabled {
        let Some(section) = snapshot.sections.get(&meta.name) else {
            error!(
                section = meta.name.as_str(),
                "Enabled section is not defined; skipping"
            );
            continue;
        };

        if meta.is_exclusive {
            weak.clear();
            strong.clear();
            weak_count = 0;
            default_count = 0;
        }

        if section.is_force {
            for mapping in &section.bindings {
                strong.push(annotate(mapping, section));
            }
        } else {
            // Pushing front one by one leaves this section reversed at the
            // head, ahead of previously merged weak sections
            for mapping in &section.bindings {
                weak.push_front(annotate(mapping, section));
            }
            weak_count += section.bindings.len();
        }

        if section.is_default() {
            default_count = section.bindings.len();
        }

        if meta.is_exclusive {
            break;
        }
    }

    let mut candidates: Vec<InputBinding> = weak.into();
    candidates.extend(strong);

    let default_section_range = if default_count > 0 {
        weak_count..weak_count + default_count
    } else {
        // Heuristic fallback: reserve a single insertion point near the
        // weak/strong boundary even when the user has no bindings
        let start = weak_count.saturating_sub(1);
        start..(start + 1).min(candidates.len())
    };

    (candidates, default_section_range)
}

/// Wrap a raw mapping into an InputBinding, validating it on the way
fn annotate(mapping: &KeyMapping, section: &InputSection) -> InputBinding {
    if is_legacy_marker(mapping) {
        return InputBinding::disabled(
            mapping.clone(),
            section.origin,
            section.name.clone(),
            "Marker line from an older bindings file; not an actual binding",
        );
    }

    if let Some(target) = target_section_annotation(&mapping.raw_action) {
        if target == section.name {
            // The annotation is redundant inside its own section; store the
            // action without it
            let mut stripped = mapping.clone();
            stripped.raw_action.remove(0);
            return InputBinding::enabled(stripped, section.origin, section.name.clone());
        }
        return InputBinding::disabled(
            mapping.clone(),
            section.origin,
            section.name.clone(),
            format!(
                "Binding targets section \"{}\" from section \"{}\"; \
                 cross-section bindings are not supported",
                target, section.name
            ),
        );
    }

    InputBinding::enabled(mapping.clone(), section.origin, section.name.clone())
}

/// Whether this mapping is the legacy "default-bindings start" marker
fn is_legacy_marker(mapping: &KeyMapping) -> bool {
    mapping.raw_key == LEGACY_MARKER_KEY
        && mapping.raw_action.len() == 1
        && mapping.raw_action[0] == LEGACY_MARKER_ACTION
}

/// Extract a `{section}` destination annotation from an action's first token
fn target_section_annotation(action: &[String]) -> Option<&str> {
    let first = action.first()?;
    first.strip_prefix('{')?.strip_suffix('}')
}

/// Stage 2: last-in-order wins per normalized key
///
/// Shadowed bindings stay in the candidate list, disabled with a reason, so
/// the bindings table can show the user what happened.
fn resolve_duplicates(candidates: &mut [InputBinding]) -> HashMap<String, BindingSlot> {
    let mut resolved: HashMap<String, BindingSlot> = HashMap::new();

    for idx in 0..candidates.len() {
        if !candidates[idx].is_enabled {
            continue;
        }
        let key = candidates[idx].normalized_key();
        if key.is_empty() {
            continue;
        }

        if let Some(&BindingSlot::Candidate(prev)) = resolved.get(&key) {
            let message = shadow_message(&key, &candidates[prev], &candidates[idx]);
            candidates[prev].disable(message);
        }
        resolved.insert(key, BindingSlot::Candidate(idx));
    }

    resolved
}

/// Message for a binding shadowed by a later one with the same key
fn shadow_message(key: &str, shadowed: &InputBinding, winner: &InputBinding) -> String {
    if shadowed.origin == SectionOrigin::Plugin || winner.origin == SectionOrigin::Plugin {
        format!(
            "\"{}\" conflicts with a plugin binding; plugins must choose unused keys",
            key
        )
    } else {
        "Overridden by another binding below it in the list".to_string()
    }
}

/// Stage 3: cover partial chord sequences with synthesized ignore bindings
///
/// Walks the candidate arena in order (not the hash map) so the output is
/// deterministic and repeated builds of the same snapshot are structurally
/// equal. Never overwrites an existing entry, real or synthesized.
fn fill_in_partial_sequences(
    candidates: &[InputBinding],
    resolved: &mut HashMap<String, BindingSlot>,
) -> Vec<InputBinding> {
    let mut synthesized: Vec<InputBinding> = Vec::new();

    for (idx, binding) in candidates.iter().enumerate() {
        if !binding.is_enabled {
            continue;
        }
        let key = binding.normalized_key();
        // Only the binding that currently owns the key contributes prefixes
        if resolved.get(&key) != Some(&BindingSlot::Candidate(idx)) {
            continue;
        }
        let steps = chord_steps(&key);
        if steps.len() < 2 || steps.len() > MAX_CHORD_STEPS {
            continue;
        }

        for prefix in chord_prefixes(&key) {
            if resolved.contains_key(&prefix) {
                continue;
            }
            let mapping = KeyMapping::new(prefix.clone(), vec![IGNORE_COMMAND.to_string()]);
            resolved.insert(prefix, BindingSlot::Synthesized(synthesized.len()));
            synthesized.push(InputBinding::enabled(
                mapping,
                binding.origin,
                binding.source_section.clone(),
            ));
        }
    }

    synthesized
}
