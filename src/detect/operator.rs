//! Operator/brand detection.
//!
//! Case-insensitive alias lookup against the brand registry. Presence-only:
//! one mention anywhere in the joint text fires the entry.

use std::collections::BTreeSet;

use crate::registry::operators::OperatorRegistry;

/// Find every registry entry whose canonical name or any alias occurs as a
/// substring of `text` (case-insensitive). An entry fires on its first
/// matching alias.
pub(crate) fn detect_operators(text: &str, registry: &OperatorRegistry) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    if text.is_empty() {
        return found;
    }

    let lower = text.to_lowercase();
    for entry in registry.entries() {
        let hit = lower.contains(&entry.name.to_lowercase())
            || entry.aliases.iter().any(|alias| lower.contains(&alias.to_lowercase()));
        if hit {
            found.insert(entry.name.clone());
        }
    }

    found
}
