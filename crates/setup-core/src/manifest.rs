//! JSON document editing for package.json and the boilerplate's config files
//!
//! Installers never share a mutable document: each receives an owned
//! [`PackageManifest`] snapshot, edits it, and returns it. The writer emits
//! a canonical key ordering, which keeps repeated runs byte-identical.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, SetupError};

/// Well-known package.json keys, written first and in this order. Everything
/// else follows alphabetically.
const MANIFEST_KEY_ORDER: &[&str] = &[
    "name",
    "version",
    "private",
    "description",
    "keywords",
    "homepage",
    "bugs",
    "repository",
    "funding",
    "license",
    "author",
    "contributors",
    "type",
    "main",
    "module",
    "types",
    "bin",
    "files",
    "scripts",
    "config",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
    "engines",
    "os",
    "cpu",
    "publishConfig",
];

/// Keys whose object values are themselves sorted alphabetically
const SORTED_SECTIONS: &[&str] = &[
    "scripts",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
    "engines",
    "publishConfig",
];

fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SetupError::io(format!("failed to read {}", path.display()), e))?;
    serde_json::from_str(&raw).map_err(|e| SetupError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json_object(path: &Path, map: &Map<String, Value>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&Value::Object(map.clone()))
        .map_err(|e| SetupError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
    fs::write(path, rendered)
        .map_err(|e| SetupError::io(format!("failed to write {}", path.display()), e))
}

/// A generic JSON config document (.eslintrc.json, tsconfig.json) edited in
/// place. Key insertion order is preserved on write.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    map: Map<String, Value>,
}

impl JsonDocument {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            map: read_json_object(path)?,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_object(path, &self.map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }

    /// Mutable handle on a nested object, created empty if absent or not an
    /// object
    pub fn object_mut(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut().expect("just ensured an object")
    }

    /// Append a string to a nested array unless it is already present.
    /// Creates the array if absent.
    pub fn push_unique(&mut self, key: &str, value: &str) {
        let entry = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            *entry = Value::Array(Vec::new());
        }
        let array = entry.as_array_mut().expect("just ensured an array");
        if !array.iter().any(|v| v.as_str() == Some(value)) {
            array.push(Value::String(value.to_string()));
        }
    }
}

/// The project's package.json, threaded through the pipeline as an owned
/// snapshot
#[derive(Debug, Clone)]
pub struct PackageManifest {
    map: Map<String, Value>,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            map: read_json_object(path)?,
        })
    }

    /// Write the manifest with the canonical key ordering: well-known keys
    /// first in conventional order, remaining keys alphabetically, and the
    /// scripts/engines/dependency sections sorted within themselves.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_object(path, &self.sorted())
    }

    fn sorted(&self) -> Map<String, Value> {
        let mut out = Map::new();

        let sort_section = |key: &str, value: &Value| -> Value {
            if SORTED_SECTIONS.contains(&key) {
                if let Value::Object(inner) = value {
                    let mut keys: Vec<&String> = inner.keys().collect();
                    keys.sort();
                    let mut sorted = Map::new();
                    for k in keys {
                        sorted.insert(k.clone(), inner[k].clone());
                    }
                    return Value::Object(sorted);
                }
            }
            value.clone()
        };

        for key in MANIFEST_KEY_ORDER {
            if let Some(value) = self.map.get(*key) {
                out.insert((*key).to_string(), sort_section(key, value));
            }
        }

        let mut rest: Vec<&String> = self
            .map
            .keys()
            .filter(|k| !MANIFEST_KEY_ORDER.contains(&k.as_str()))
            .collect();
        rest.sort();
        for key in rest {
            out.insert(key.clone(), sort_section(key, &self.map[key]));
        }

        out
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }

    pub fn set_name(&mut self, name: &str) {
        self.set("name", Value::String(name.to_string()));
    }

    /// The command registered for a script entry, if any
    pub fn script(&self, name: &str) -> Option<&str> {
        self.map.get("scripts")?.get(name)?.as_str()
    }

    pub fn set_script(&mut self, name: &str, command: &str) {
        self.scripts_mut()
            .insert(name.to_string(), Value::String(command.to_string()));
    }

    pub fn remove_script(&mut self, name: &str) {
        if let Some(Value::Object(scripts)) = self.map.get_mut("scripts") {
            scripts.remove(name);
        }
    }

    /// Pin the supported node major version and the minimum npm version
    pub fn set_engines(&mut self, node_version: u32) {
        let mut engines = Map::new();
        engines.insert(
            "node".to_string(),
            Value::String(format!("~ {}", node_version)),
        );
        engines.insert("npm".to_string(), Value::String(">= 6".to_string()));
        self.set("engines", Value::Object(engines));
    }

    fn scripts_mut(&mut self) -> &mut Map<String, Value> {
        let entry = self
            .map
            .entry("scripts".to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut().expect("just ensured an object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_from(raw: &str) -> PackageManifest {
        let value: Value = serde_json::from_str(raw).unwrap();
        PackageManifest {
            map: value.as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_canonical_ordering_puts_name_first() {
        let manifest = manifest_from(r#"{"scripts":{},"version":"1.0.0","name":"demo"}"#);
        let sorted = manifest.sorted();
        let keys: Vec<&String> = sorted.keys().collect();
        assert_eq!(keys, ["name", "version", "scripts"]);
    }

    #[test]
    fn test_unknown_keys_sort_alphabetically_after_known() {
        let manifest = manifest_from(r#"{"zeta":1,"alpha":2,"name":"demo"}"#);
        let sorted = manifest.sorted();
        let keys: Vec<&String> = sorted.keys().collect();
        assert_eq!(keys, ["name", "alpha", "zeta"]);
    }

    #[test]
    fn test_scripts_section_is_sorted() {
        let manifest =
            manifest_from(r#"{"name":"demo","scripts":{"test":"t","compile":"c","lint":"l"}}"#);
        let sorted = manifest.sorted();
        let scripts: Vec<&String> = sorted["scripts"].as_object().unwrap().keys().collect();
        assert_eq!(scripts, ["compile", "lint", "test"]);
    }

    #[test]
    fn test_save_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        let manifest = manifest_from(r#"{"version":"1.0.0","name":"demo","scripts":{"b":"2","a":"1"}}"#);

        manifest.save(&path).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        manifest.save(&path).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_preserves_unmutated_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        fs::write(
            &path,
            r#"{"name":"demo","license":"MIT","repository":{"type":"git","url":"x"}}"#,
        )
        .unwrap();

        let mut manifest = PackageManifest::load(&path).unwrap();
        manifest.set_script("test", "jasmine-ts");
        manifest.save(&path).unwrap();

        let reread = PackageManifest::load(&path).unwrap();
        assert_eq!(reread.get("license"), Some(&Value::String("MIT".into())));
        assert_eq!(
            reread.get("repository").unwrap()["url"],
            Value::String("x".into())
        );
        assert_eq!(reread.script("test"), Some("jasmine-ts"));
    }

    #[test]
    fn test_set_engines() {
        let mut manifest = manifest_from(r#"{"name":"demo"}"#);
        manifest.set_engines(22);
        let engines = manifest.get("engines").unwrap();
        assert_eq!(engines["node"], Value::String("~ 22".into()));
        assert_eq!(engines["npm"], Value::String(">= 6".into()));
    }

    #[test]
    fn test_remove_script() {
        let mut manifest =
            manifest_from(r#"{"name":"demo","scripts":{"setup":"s","presetup":"p","compile":"c"}}"#);
        manifest.remove_script("setup");
        manifest.remove_script("presetup");
        assert_eq!(manifest.script("setup"), None);
        assert_eq!(manifest.script("compile"), Some("c"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PackageManifest::load(&path).unwrap_err();
        assert!(matches!(err, SetupError::Parse { .. }));
    }

    #[test]
    fn test_push_unique_does_not_duplicate() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".eslintrc.json");
        fs::write(&path, r#"{"extends":["eslint:recommended"]}"#).unwrap();

        let mut doc = JsonDocument::load(&path).unwrap();
        doc.push_unique("extends", "plugin:jasmine/recommended");
        doc.push_unique("extends", "plugin:jasmine/recommended");

        let extends = doc.get("extends").unwrap().as_array().unwrap();
        assert_eq!(extends.len(), 2);
    }
}
