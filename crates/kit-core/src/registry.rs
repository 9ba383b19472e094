//! Module registry: the catalog of modules fe-kit knows how to add.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Registry bundled into the binary.
const BUILTIN_REGISTRY: &str = include_str!("registry.json");

/// A module the tool can add or upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Module name as typed on the command line.
    pub name: String,
    /// npm package that backs the module.
    pub package: String,
    /// Human-readable description.
    pub description: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    package: String,
    #[serde(default)]
    description: String,
}

/// Read-only mapping from module name to [`ModuleEntry`].
///
/// Several modules may share one package; resolving either of them changes
/// the same dependency entry.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    entries: BTreeMap<String, ModuleEntry>,
}

impl ModuleRegistry {
    /// The registry shipped with this build, parsed once per process.
    pub fn builtin() -> Result<&'static Self> {
        static BUILTIN: OnceLock<std::result::Result<ModuleRegistry, String>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Self::from_json(BUILTIN_REGISTRY).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| Error::RegistryParse(message.clone()))
    }

    /// Parse a registry from its JSON form:
    /// `{ "<name>": { "package": "<pkg>", "description": "<text>" } }`.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> =
            serde_json::from_str(content).map_err(|e| Error::RegistryParse(e.to_string()))?;

        let mut entries = BTreeMap::new();
        for (name, entry) in raw {
            validate_name(&name)?;
            if entry.package.trim().is_empty() {
                return Err(Error::RegistryParse(format!(
                    "module '{name}' has an empty package name"
                )));
            }
            entries.insert(
                name.clone(),
                ModuleEntry {
                    name,
                    package: entry.package,
                    description: entry.description,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Look up a module by name.
    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All module names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::RegistryParse("module name must not be empty".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::RegistryParse(format!(
            "module name '{name}' must contain only alphanumeric characters, hyphens, or underscores"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_parses() {
        let registry = ModuleRegistry::builtin().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.contains("utils"));
        assert_eq!(registry.get("utils").unwrap().package, "jundev-utils");
    }

    #[test]
    fn test_builtin_registry_is_shared() {
        let a = ModuleRegistry::builtin().unwrap();
        let b = ModuleRegistry::builtin().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_names_sorted() {
        let registry = ModuleRegistry::from_json(
            r#"{ "beta": { "package": "pkg-b" }, "alpha": { "package": "pkg-a" } }"#,
        )
        .unwrap();
        assert_eq!(registry.names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_unknown_module_returns_none() {
        let registry = ModuleRegistry::builtin().unwrap();
        assert!(registry.get("ghost").is_none());
        assert!(!registry.contains("ghost"));
    }

    #[test]
    fn test_shared_package_allowed() {
        let registry = ModuleRegistry::from_json(
            r#"{ "a": { "package": "shared" }, "b": { "package": "shared" } }"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").unwrap().package, registry.get("b").unwrap().package);
    }

    #[test]
    fn test_empty_package_rejected() {
        let err = ModuleRegistry::from_json(r#"{ "a": { "package": " " } }"#).unwrap_err();
        assert!(matches!(err, Error::RegistryParse(ref msg) if msg.contains("empty package")));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let err = ModuleRegistry::from_json(r#"{ "bad name": { "package": "x" } }"#).unwrap_err();
        assert!(matches!(err, Error::RegistryParse(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err =
            ModuleRegistry::from_json(r#"{ "a": { "package": "x", "pkg": "y" } }"#).unwrap_err();
        assert!(matches!(err, Error::RegistryParse(_)));
    }
}
