use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One gambling brand: a canonical name, its case-insensitive aliases and
/// whether the registry considers it offshore (unlicensed for the audience
/// the ad reaches).
///
/// The canonical name itself is always searched alongside the aliases, so an
/// entry with an empty alias list is still detectable. Alias lookup is plain
/// substring matching; keep aliases distinctive; a short alias like "stake"
/// will also match inside unrelated words such as "stakeholder".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub offshore: bool,
}

/// The brand registry the operator detector searches.
///
/// Versionable configuration: deployments replace the built-in table by
/// loading a JSON array of entries, extending coverage without code changes.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    entries: Vec<OperatorEntry>,
}

impl OperatorRegistry {
    /// The built-in table: the offshore brands the scoring rules care about
    /// plus the major licensed books, for contrast in mixed-content clips.
    pub fn builtin() -> Self {
        let entry = |name: &str, aliases: &[&str], offshore: bool| OperatorEntry {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            offshore,
        };

        Self {
            entries: vec![
                entry("bovada", &["bovada.lv"], true),
                entry("stake", &["stake.com", "stake.us"], true),
                entry("roobet", &["roobet.com"], true),
                entry("rainbet", &["rainbet.com"], true),
                entry("rollbit", &["rollbit.com"], true),
                entry("draftkings", &["draft kings", "dk sportsbook"], false),
                entry("fanduel", &["fan duel"], false),
                entry("betmgm", &["bet mgm"], false),
                entry("caesars", &["caesars sportsbook"], false),
            ],
        }
    }

    /// Parse a registry from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<OperatorEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Parse a registry from JSON, falling back to the built-in table when no
    /// JSON is supplied or it fails to parse.
    ///
    /// A corrupt registry file must not take analyses down with it; the
    /// degraded run is logged and continues with built-in coverage.
    pub fn load_or_builtin(json: Option<&str>) -> Self {
        match json {
            None => Self::builtin(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|err| {
                tracing::warn!(%err, "operator registry rejected; using built-in table");
                Self::builtin()
            }),
        }
    }

    pub fn entries(&self) -> &[OperatorEntry] {
        &self.entries
    }

    /// Canonical names of every entry marked offshore.
    pub fn offshore_set(&self) -> BTreeSet<String> {
        self.entries.iter().filter(|e| e.offshore).map(|e| e.name.clone()).collect()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_offshore_set_matches_scoring_expectations() {
        let offshore = OperatorRegistry::builtin().offshore_set();
        for brand in ["bovada", "stake", "roobet", "rainbet", "rollbit"] {
            assert!(offshore.contains(brand), "missing offshore brand {brand}");
        }
        assert!(!offshore.contains("draftkings"));
        assert!(!offshore.contains("fanduel"));
    }

    #[test]
    fn from_json_round_trips_entries() {
        let json = r#"[
            {"name": "examplebet", "aliases": ["examplebet.io"], "offshore": true},
            {"name": "localbook"}
        ]"#;
        let registry = OperatorRegistry::from_json(json).unwrap();
        assert_eq!(registry.entries().len(), 2);
        assert!(registry.offshore_set().contains("examplebet"));
        assert!(registry.entries()[1].aliases.is_empty());
        assert!(!registry.entries()[1].offshore);
    }

    #[test]
    fn load_or_builtin_survives_corrupt_json() {
        let registry = OperatorRegistry::load_or_builtin(Some("not json"));
        assert!(!registry.offshore_set().is_empty());
    }
}
