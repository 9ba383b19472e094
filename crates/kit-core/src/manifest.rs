//! Typed view over a project's `package.json`.
//!
//! Only two parts of the document belong to fe-kit:
//!
//! - `dependencies`: package name → version constraint
//! - `feKit.modules`: module name → `{ "version": ... }`, the record of which
//!   modules were added or upgraded through the tool
//!
//! Everything else (scripts, devDependencies, unknown keys inside `feKit`) is
//! carried through untouched, in its original key order.
//!
//! # Section policy
//!
//! An absent section parses as empty. When rendering, a section is written
//! back if it was present in the source document or if it is non-empty now,
//! so loading and saving an untouched manifest never adds empty sections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use kit_fs::{NormalizedPath, io};

use crate::error::{Error, Result};

/// Version constraint written for every added or upgraded module.
pub const LATEST: &str = "latest";

const DEPENDENCIES_KEY: &str = "dependencies";

/// Top-level key of the tool-owned section.
pub const KIT_SECTION_KEY: &str = "feKit";

/// Tracking record for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Version recorded at the last add/upgrade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Other fields in the record, kept as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleRecord {
    pub fn latest() -> Self {
        Self {
            version: Some(LATEST.to_string()),
            extra: Map::new(),
        }
    }
}

/// The `feKit` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitSection {
    /// Modules installed or upgraded through the tool, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "module_table")]
    pub modules: Vec<(String, ModuleRecord)>,

    /// Keys inside `feKit` that this version does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KitSection {
    pub fn record(&self, module: &str) -> Option<&ModuleRecord> {
        self.modules
            .iter()
            .find(|(name, _)| name == module)
            .map(|(_, record)| record)
    }

    /// Replace the record for `module` in place, or append it.
    pub fn set_record(&mut self, module: &str, record: ModuleRecord) {
        match self.modules.iter_mut().find(|(name, _)| name == module) {
            Some((_, existing)) => *existing = record,
            None => self.modules.push((module.to_string(), record)),
        }
    }
}

/// `feKit.modules` as a JSON object whose key order is kept.
mod module_table {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::{Map, Value};

    use super::ModuleRecord;

    pub fn serialize<S: Serializer>(
        modules: &[(String, ModuleRecord)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(modules.iter().map(|(name, record)| (name, record)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, ModuleRecord)>, D::Error> {
        Map::<String, Value>::deserialize(deserializer)?
            .into_iter()
            .map(|(name, value)| {
                let record = ModuleRecord::deserialize(value)
                    .map_err(|e| D::Error::custom(format!("module '{name}': {e}")))?;
                Ok((name, record))
            })
            .collect()
    }
}

/// A loaded project manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: NormalizedPath,
    source: String,
    document: Map<String, Value>,
    had_dependencies: bool,
    had_kit: bool,

    /// Package name → version constraint.
    pub dependencies: BTreeMap<String, String>,

    /// The tool-owned `feKit` section.
    pub kit: KitSection,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::ManifestNotFound`] if there is no file at `path`,
    /// [`Error::ManifestParse`] if it is not a JSON object with well-formed
    /// fe-kit sections.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let source = match io::read_text(path) {
            Ok(source) => source,
            Err(e) if e.is_not_found() => {
                return Err(Error::ManifestNotFound {
                    path: path.to_native(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(path.clone(), source)
    }

    /// Parse manifest text that was read from `path`.
    pub fn parse(path: NormalizedPath, source: String) -> Result<Self> {
        let parse_err = |message: String| Error::ManifestParse {
            path: path.to_native(),
            message,
        };

        let document = match serde_json::from_str::<Value>(&source) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(parse_err("top-level value must be a JSON object".into())),
            Err(e) => return Err(parse_err(e.to_string())),
        };

        let had_dependencies = document.contains_key(DEPENDENCIES_KEY);
        let dependencies = match document.get(DEPENDENCIES_KEY) {
            Some(value) => BTreeMap::<String, String>::deserialize(value).map_err(|e| {
                parse_err(format!("'{DEPENDENCIES_KEY}' must map package names to version strings: {e}"))
            })?,
            None => BTreeMap::new(),
        };

        let had_kit = document.contains_key(KIT_SECTION_KEY);
        let kit = match document.get(KIT_SECTION_KEY) {
            Some(value) => KitSection::deserialize(value)
                .map_err(|e| parse_err(format!("invalid '{KIT_SECTION_KEY}' section: {e}")))?,
            None => KitSection::default(),
        };

        Ok(Self {
            path,
            source,
            document,
            had_dependencies,
            had_kit,
            dependencies,
            kit,
        })
    }

    /// Where this manifest was loaded from.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// The text the manifest was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of tracked modules in document order.
    pub fn tracked_modules(&self) -> Vec<String> {
        self.kit.modules.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn is_tracked(&self, module: &str) -> bool {
        self.kit.record(module).is_some()
    }

    /// Point `package` at [`LATEST`] and record `module` as upgraded to it.
    ///
    /// Always overwrites; calling it twice leaves the same state as once.
    pub fn stage_module(&mut self, module: &str, package: &str) {
        self.dependencies
            .insert(package.to_string(), LATEST.to_string());
        self.kit.set_record(module, ModuleRecord::latest());
    }

    /// Check that every `(module, package)` pair is tracked and has its
    /// package in `dependencies`.
    pub fn verify_staged<'a>(
        &self,
        staged: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<()> {
        for (module, package) in staged {
            if !self.is_tracked(module) || !self.dependencies.contains_key(package) {
                return Err(Error::InconsistentState {
                    module: module.to_string(),
                    package: package.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Render the full document: 2-space indentation, trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut document = self.document.clone();

        if self.had_dependencies || !self.dependencies.is_empty() {
            let value = serde_json::to_value(&self.dependencies)
                .map_err(|e| Error::ManifestSerialize(e.to_string()))?;
            document.insert(DEPENDENCIES_KEY.to_string(), value);
        }

        if self.had_kit || !self.kit.modules.is_empty() || !self.kit.extra.is_empty() {
            let value = serde_json::to_value(&self.kit)
                .map_err(|e| Error::ManifestSerialize(e.to_string()))?;
            document.insert(KIT_SECTION_KEY.to_string(), value);
        }

        let mut rendered = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| Error::ManifestSerialize(e.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Persist the full document atomically and return the written text.
    pub fn save(&self) -> Result<String> {
        let rendered = self.render()?;
        io::write_text(&self.path, &rendered)?;
        tracing::info!(path = %self.path, "manifest written");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Manifest {
        Manifest::parse(NormalizedPath::new("/proj/package.json"), source.to_string()).unwrap()
    }

    #[test]
    fn test_absent_sections_parse_as_empty() {
        let manifest = parse(r#"{ "name": "app" }"#);
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.kit.modules.is_empty());
        assert!(manifest.tracked_modules().is_empty());
    }

    #[test]
    fn test_untouched_manifest_gains_no_sections() {
        let manifest = parse("{\n  \"name\": \"app\"\n}\n");
        assert_eq!(manifest.render().unwrap(), manifest.source());
    }

    #[test]
    fn test_present_empty_section_is_kept() {
        let manifest = parse(r#"{"name":"app","dependencies":{}}"#);
        assert_eq!(
            manifest.render().unwrap(),
            "{\n  \"name\": \"app\",\n  \"dependencies\": {}\n}\n"
        );
    }

    #[test]
    fn test_stage_module_creates_both_sections() {
        let mut manifest = parse(r#"{ "name": "app" }"#);
        manifest.stage_module("utils", "jundev-utils");

        assert_eq!(manifest.dependencies.get("jundev-utils").map(String::as_str), Some(LATEST));
        assert_eq!(manifest.kit.record("utils"), Some(&ModuleRecord::latest()));

        let rendered = manifest.render().unwrap();
        let expected = r#"{
  "name": "app",
  "dependencies": {
    "jundev-utils": "latest"
  },
  "feKit": {
    "modules": {
      "utils": {
        "version": "latest"
      }
    }
  }
}
"#;
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_key_order_preserved() {
        let mut manifest = parse(
            r#"{"name":"app","dependencies":{"react":"^18.2.0"},"scripts":{"dev":"vite"},"version":"1.0.0"}"#,
        );
        manifest.stage_module("http", "axios");

        let rendered = manifest.render().unwrap();
        let keys: Vec<String> = serde_json::from_str::<Map<String, Value>>(&rendered)
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["name", "dependencies", "scripts", "version", "feKit"]);
    }

    #[test]
    fn test_unrelated_dependencies_untouched() {
        let mut manifest = parse(r#"{"dependencies":{"react":"^18.2.0","axios":"1.6.0"}}"#);
        manifest.stage_module("http", "axios");

        assert_eq!(manifest.dependencies.get("react").map(String::as_str), Some("^18.2.0"));
        assert_eq!(manifest.dependencies.get("axios").map(String::as_str), Some(LATEST));
    }

    #[test]
    fn test_unknown_kit_keys_preserved() {
        let mut manifest = parse(r#"{"feKit":{"theme":"dark","modules":{"old":{}}}}"#);
        manifest.stage_module("utils", "jundev-utils");

        let rendered: Value = serde_json::from_str(&manifest.render().unwrap()).unwrap();
        assert_eq!(rendered["feKit"]["theme"], "dark");
        assert_eq!(rendered["feKit"]["modules"]["old"], serde_json::json!({}));
        assert_eq!(rendered["feKit"]["modules"]["utils"]["version"], "latest");
    }

    #[test]
    fn test_record_without_version_round_trips() {
        let manifest = parse(r#"{"feKit":{"modules":{"utils":{}}}}"#);
        assert_eq!(manifest.kit.record("utils").unwrap().version, None);
        assert!(manifest.render().unwrap().contains("\"utils\": {}"));
    }

    #[test]
    fn test_untouched_record_fields_survive_write() {
        let mut manifest = parse(
            r#"{"feKit":{"modules":{"alpha":{"version":"1.0","pinned":true},"beta":{"version":"0.1","note":"x"}}}}"#,
        );
        manifest.stage_module("beta", "pkg-b");
        manifest.stage_module("gamma", "pkg-shared");

        let rendered: Value = serde_json::from_str(&manifest.render().unwrap()).unwrap();
        assert_eq!(
            rendered["feKit"]["modules"]["alpha"],
            serde_json::json!({ "version": "1.0", "pinned": true })
        );
        // Staged records are replaced outright
        assert_eq!(
            rendered["feKit"]["modules"]["beta"],
            serde_json::json!({ "version": "latest" })
        );
    }

    #[test]
    fn test_tracked_modules_follow_document_order() {
        let mut manifest = parse(r#"{"feKit":{"modules":{"zeta":{},"alpha":{}}}}"#);
        assert_eq!(manifest.tracked_modules(), vec!["zeta", "alpha"]);

        manifest.stage_module("zeta", "pkg-z");
        manifest.stage_module("beta", "pkg-b");
        assert_eq!(manifest.tracked_modules(), vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_malformed_record_rejected() {
        let err = Manifest::parse(
            NormalizedPath::new("/p/package.json"),
            r#"{"feKit":{"modules":{"utils":{"version":3}}}}"#.into(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ManifestParse { ref message, .. } if message.contains("utils")));
    }

    #[test]
    fn test_verify_staged_detects_missing_package() {
        let mut manifest = parse("{}");
        manifest.stage_module("utils", "jundev-utils");
        manifest.dependencies.remove("jundev-utils");

        let err = manifest
            .verify_staged([("utils", "jundev-utils")])
            .unwrap_err();
        assert!(matches!(err, Error::InconsistentState { ref module, .. } if module == "utils"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = Manifest::parse(NormalizedPath::new("/p/package.json"), "[1, 2]".into())
            .unwrap_err();
        assert!(matches!(err, Error::ManifestParse { ref message, .. } if message.contains("object")));
    }

    #[test]
    fn test_non_string_dependency_rejected() {
        let err = Manifest::parse(
            NormalizedPath::new("/p/package.json"),
            r#"{"dependencies":{"react":18}}"#.into(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("package.json"));
        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }
}
