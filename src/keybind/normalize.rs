//! Normalized key derivation
//!
//! Raw key strings come from config files and plugins in whatever spelling
//! the author used ("Ctrl+S", "control+s", "Esc"). Resolution needs one
//! canonical spelling per key, so every lookup and every de-duplication
//! runs on the normalized form produced here.
//!
//! Grammar: modifiers and key are joined by `+` within one chord step,
//! chord steps are joined by `-`. Modifiers are emitted in a fixed order
//! (ctrl, alt, shift, meta). Named keys and modifiers are lowercased and
//! alias-canonicalized; single-character keys keep their case so `a` and
//! `A` stay distinct bindings.

/// Separator between the steps of a multi-key chord
pub const CHORD_SEPARATOR: char = '-';

/// Longest chord the resolver fills partial sequences for
pub const MAX_CHORD_STEPS: usize = 4;

/// Normalize a raw key or chord string into its canonical form
///
/// ```
/// use keystack::keybind::normalize_key;
///
/// assert_eq!(normalize_key("Shift+Ctrl+S"), "ctrl+shift+S");
/// assert_eq!(normalize_key("Esc"), "escape");
/// assert_eq!(normalize_key("Ctrl+a-b"), "ctrl+a-b");
/// ```
pub fn normalize_key(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    // A bare "-" is the dash key, not an empty chord
    if raw == "-" {
        return "-".to_string();
    }

    raw.split(CHORD_SEPARATOR)
        .filter(|step| !step.is_empty())
        .map(normalize_step)
        .collect::<Vec<_>>()
        .join("-")
}

/// Split a normalized key into its chord steps
pub fn chord_steps(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        return Vec::new();
    }
    if normalized == "-" {
        return vec!["-"];
    }
    normalized
        .split(CHORD_SEPARATOR)
        .filter(|step| !step.is_empty())
        .collect()
}

/// All strict, non-empty prefixes of a chord, shortest first
///
/// A single keystroke has no strict prefixes; `"ctrl+a-b-c"` yields
/// `["ctrl+a", "ctrl+a-b"]`.
pub fn chord_prefixes(normalized: &str) -> Vec<String> {
    let steps = chord_steps(normalized);
    if steps.len() < 2 {
        return Vec::new();
    }
    (1..steps.len()).map(|len| steps[..len].join("-")).collect()
}

/// Normalize one chord step: canonical modifier order, alias mapping
fn normalize_step(step: &str) -> String {
    // The plus key itself
    if step == "+" {
        return "+".to_string();
    }

    // "ctrl++" means ctrl plus the plus key; strip the trailing separator
    // before splitting so the key survives
    let (body, trailing_plus_key) = match step.strip_suffix('+') {
        Some(rest) if !rest.is_empty() => (rest, true),
        _ => (step, false),
    };

    let mut ctrl = false;
    let mut alt = false;
    let mut shift = false;
    let mut meta = false;
    let mut keys: Vec<String> = Vec::new();

    for part in body.split('+').filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => ctrl = true,
            "alt" | "option" | "opt" => alt = true,
            "shift" => shift = true,
            "meta" | "cmd" | "command" | "super" | "win" => meta = true,
            _ => keys.push(canonical_key_name(part)),
        }
    }

    if trailing_plus_key {
        keys.push("+".to_string());
    }

    let mut parts: Vec<String> = Vec::new();
    if ctrl {
        parts.push("ctrl".to_string());
    }
    if alt {
        parts.push("alt".to_string());
    }
    if shift {
        parts.push("shift".to_string());
    }
    if meta {
        parts.push("meta".to_string());
    }
    parts.extend(keys);
    parts.join("+")
}

/// Canonical spelling for a key name
///
/// Single characters keep their case; named keys are lowercased and
/// folded through the alias table.
fn canonical_key_name(name: &str) -> String {
    if name.chars().count() == 1 {
        return name.to_string();
    }

    let lower = name.to_lowercase();
    match lower.as_str() {
        "return" => "enter".to_string(),
        "esc" => "escape".to_string(),
        "spacebar" => "space".to_string(),
        "back" | "bs" => "backspace".to_string(),
        "del" => "delete".to_string(),
        "ins" => "insert".to_string(),
        "pgup" => "pageup".to_string(),
        "pgdown" | "pgdn" | "pgdwn" => "pagedown".to_string(),
        "arrowup" => "up".to_string(),
        "arrowdown" => "down".to_string(),
        "arrowleft" => "left".to_string(),
        "arrowright" => "right".to_string(),
        _ => lower,
    }
}
