use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::StoreError;

/// Path prefix addressing the free-form metadata instead of a section.
pub const METADATA_ROOT: &str = "metadata";

/// The résumé being edited: named sections plus free-form metadata.
///
/// Sections are stored as JSON so single-document sections (profile) and
/// decorated lists share one shape. No history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default)]
    pub sections: BTreeMap<String, Value>,
    #[serde(default = "empty_object")]
    pub metadata: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            sections: BTreeMap::new(),
            metadata: empty_object(),
        }
    }
}

impl ResumeDocument {
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// Replaces a section wholesale (last write wins, no field merge).
    pub fn replace_section(&mut self, name: &str, content: Value) {
        self.sections.insert(name.to_string(), content);
    }

    /// Reads a dotted path such as `profile.name` or `metadata.theme.color`.
    /// Numeric segments index into arrays.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let segments = split_path(path).ok()?;
        let (root, rest) = segments.split_first()?;
        let mut current = if *root == METADATA_ROOT {
            &self.metadata
        } else {
            self.sections.get(*root)?
        };
        for segment in rest {
            current = match current {
                Value::Object(map) => map.get(*segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Writes `value` at a dotted path, creating intermediate objects as
    /// needed. A single-segment path replaces the whole section.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let segments = split_path(path)?;
        let (root, rest) = segments
            .split_first()
            .ok_or_else(|| StoreError::InvalidPath(path.to_string()))?;

        let target = if *root == METADATA_ROOT {
            &mut self.metadata
        } else {
            self.sections
                .entry(root.to_string())
                .or_insert_with(empty_object)
        };
        set_in(target, rest, value).map_err(|_| StoreError::InvalidPath(path.to_string()))
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, StoreError> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

fn set_in(target: &mut Value, segments: &[&str], value: Value) -> Result<(), ()> {
    let Some((head, tail)) = segments.split_first() else {
        *target = value;
        return Ok(());
    };
    if target.is_null() {
        *target = empty_object();
    }
    let child = match target {
        Value::Object(map) => map
            .entry(head.to_string())
            .or_insert_with(|| if tail.is_empty() { Value::Null } else { empty_object() }),
        Value::Array(items) => {
            let index: usize = head.parse().map_err(|_| ())?;
            items.get_mut(index).ok_or(())?
        }
        _ => return Err(()),
    };
    set_in(child, tail, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace_section_is_wholesale() {
        let mut doc = ResumeDocument::default();
        doc.replace_section("profile", json!({"name": "Ada", "email": "ada@x"}));
        doc.replace_section("profile", json!({"name": "Grace"}));
        assert_eq!(doc.section("profile"), Some(&json!({"name": "Grace"})));
    }

    #[test]
    fn test_set_path_creates_intermediates() {
        let mut doc = ResumeDocument::default();
        doc.set_path("profile.links.github", json!("gh/ada")).unwrap();
        doc.set_path("metadata.theme.color", json!("#333")).unwrap();
        assert_eq!(doc.get_path("profile.links.github"), Some(&json!("gh/ada")));
        assert_eq!(doc.metadata, json!({"theme": {"color": "#333"}}));
    }

    #[test]
    fn test_set_path_indexes_arrays() {
        let mut doc = ResumeDocument::default();
        doc.replace_section("skills", json!({"items": [{"name": "Go"}, {"name": "C"}]}));
        doc.set_path("skills.items.1.name", json!("Rust")).unwrap();
        assert_eq!(doc.get_path("skills.items.1.name"), Some(&json!("Rust")));
        assert!(doc.set_path("skills.items.7.name", json!("x")).is_err());
    }

    #[test]
    fn test_invalid_paths() {
        let mut doc = ResumeDocument::default();
        assert!(matches!(doc.set_path("", json!(1)), Err(StoreError::InvalidPath(_))));
        assert!(matches!(
            doc.set_path("profile..name", json!(1)),
            Err(StoreError::InvalidPath(_))
        ));
        doc.replace_section("profile", json!({"name": "Ada"}));
        assert!(doc.set_path("profile.name.first", json!("A")).is_err());
        assert_eq!(doc.get_path("profile.name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_single_segment_replaces_section() {
        let mut doc = ResumeDocument::default();
        doc.set_path("awards", json!([1, 2])).unwrap();
        assert_eq!(doc.section("awards"), Some(&json!([1, 2])));
    }
}
