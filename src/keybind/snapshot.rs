//! AppInputConfig: the immutable output snapshot of a resolution run
//!
//! Consumers only ever read a snapshot. The key-dispatch layer uses
//! [`AppInputConfig::lookup`]; a bindings table iterates
//! [`AppInputConfig::candidates`] and uses
//! [`AppInputConfig::is_default_section_index`] to decide per-row
//! editability.

use std::collections::HashMap;
use std::ops::Range;

use super::binding::InputBinding;

/// Where a resolved entry lives
///
/// The resolver map stores indices into an owning arena rather than a
/// second reference to the binding itself, so "disable and annotate"
/// during construction is a plain slot mutation. Synthesized chord-prefix
/// entries get their own arena so candidate indices and the
/// default-section range stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindingSlot {
    /// Index into the candidate list
    Candidate(usize),
    /// Index into the synthesized chord-prefix list
    Synthesized(usize),
}

/// A complete, immutable resolution of the current section stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInputConfig {
    pub(crate) candidates: Vec<InputBinding>,
    pub(crate) synthesized: Vec<InputBinding>,
    pub(crate) resolved: HashMap<String, BindingSlot>,
    pub(crate) default_section_range: Range<usize>,
}

impl AppInputConfig {
    /// An empty configuration, used before the first rebuild
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            synthesized: Vec::new(),
            resolved: HashMap::new(),
            default_section_range: 0..0,
        }
    }

    /// The single active binding for a normalized key, if any
    ///
    /// Returned bindings are always enabled; synthesized chord-prefix
    /// entries are returned exactly like real bindings so the dispatch
    /// layer suppresses fallback handling mid-chord.
    pub fn lookup(&self, normalized_key: &str) -> Option<&InputBinding> {
        match self.resolved.get(normalized_key)? {
            BindingSlot::Candidate(idx) => self.candidates.get(*idx),
            BindingSlot::Synthesized(idx) => self.synthesized.get(*idx),
        }
    }

    /// Number of candidates, including disabled/shadowed ones
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Positional access into the full candidate list
    pub fn candidate_at(&self, index: usize) -> Option<&InputBinding> {
        self.candidates.get(index)
    }

    /// The full candidate list in layering order
    pub fn candidates(&self) -> &[InputBinding] {
        &self.candidates
    }

    /// Whether the candidate at `index` belongs to the user-editable section
    pub fn is_default_section_index(&self, index: usize) -> bool {
        self.default_section_range.contains(&index)
    }

    /// Candidate index range of the user-editable section
    pub fn default_section_range(&self) -> Range<usize> {
        self.default_section_range.clone()
    }

    /// Bindings synthesized to cover partial chord sequences
    pub fn synthesized(&self) -> &[InputBinding] {
        &self.synthesized
    }

    /// Number of resolved keys (real and synthesized)
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Iterate over all resolved keys and their active bindings
    pub fn resolved_entries(&self) -> impl Iterator<Item = (&str, &InputBinding)> {
        self.resolved.iter().filter_map(|(key, slot)| {
            let binding = match slot {
                BindingSlot::Candidate(idx) => self.candidates.get(*idx)?,
                BindingSlot::Synthesized(idx) => self.synthesized.get(*idx)?,
            };
            Some((key.as_str(), binding))
        })
    }
}

impl Default for AppInputConfig {
    fn default() -> Self {
        Self::empty()
    }
}
