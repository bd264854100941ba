//! Custom fields: user-defined `{title, content, icon}` triples attached to any entity,
//! independent of the entity's fixed schema. Array order is display order.

pub mod icons;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::UnknownFieldKey;

pub use icons::{Icon, IconRegistry, DEFAULT_ICON};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl CustomField {
    /// A blank field with a fresh random id and the default icon.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            content: String::new(),
            icon: default_icon(),
        }
    }

    /// Resolves this field's icon, falling back to the registry default
    /// for names the registry does not know.
    pub fn resolve_icon<'r>(&self, registry: &'r IconRegistry) -> &'r Icon {
        registry.resolve(&self.icon)
    }
}

/// The editable attributes of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldKey {
    Title,
    Content,
    Icon,
}

impl FromStr for CustomFieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(CustomFieldKey::Title),
            "content" => Ok(CustomFieldKey::Content),
            "icon" => Ok(CustomFieldKey::Icon),
            other => Err(UnknownFieldKey(other.to_string())),
        }
    }
}

/// Add/remove/update operations over an entity's custom field list.
pub trait CustomFieldStore {
    /// Appends a blank field and returns its id.
    fn add_field(&mut self) -> String;

    /// Removes the field with `id`. Returns whether anything was removed.
    fn remove_field(&mut self, id: &str) -> bool;

    /// Replaces exactly one attribute of the field with `id`, leaving order
    /// and every other entry untouched. Unknown ids are a no-op.
    fn update_field(&mut self, id: &str, key: CustomFieldKey, value: &str) -> bool;
}

impl CustomFieldStore for Vec<CustomField> {
    fn add_field(&mut self) -> String {
        let field = CustomField::blank();
        let id = field.id.clone();
        self.push(field);
        id
    }

    fn remove_field(&mut self, id: &str) -> bool {
        let before = self.len();
        self.retain(|f| f.id != id);
        self.len() != before
    }

    fn update_field(&mut self, id: &str, key: CustomFieldKey, value: &str) -> bool {
        let Some(field) = self.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        let slot = match key {
            CustomFieldKey::Title => &mut field.title,
            CustomFieldKey::Content => &mut field.content,
            CustomFieldKey::Icon => &mut field.icon,
        };
        value.clone_into(slot);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, title: &str, content: &str, icon: &str) -> CustomField {
        CustomField {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            icon: icon.to_string(),
        }
    }

    #[test]
    fn test_add_appends_blank_field() {
        let mut fields = vec![field("a", "GitHub", "gh/me", "github")];
        let id = fields.add_field();
        assert_eq!(fields.len(), 2);
        let added = &fields[1];
        assert_eq!(added.id, id);
        assert!(added.title.is_empty());
        assert!(added.content.is_empty());
        assert_eq!(added.icon, DEFAULT_ICON);
    }

    #[test]
    fn test_add_generates_distinct_ids() {
        let mut fields: Vec<CustomField> = Vec::new();
        let first = fields.add_field();
        let second = fields.add_field();
        assert_ne!(first, second);
    }

    #[test]
    fn test_update_only_touches_matching_title() {
        let mut fields = vec![
            field("a", "Blog", "me.dev", "globe"),
            field("b", "Phone", "555", "phone"),
            field("c", "Mail", "me@x", "mail"),
        ];
        let before = fields.clone();

        assert!(fields.update_field("b", CustomFieldKey::Title, "X"));

        assert_eq!(fields[0], before[0]);
        assert_eq!(fields[2], before[2]);
        assert_eq!(fields[1].title, "X");
        assert_eq!(fields[1].content, "555");
        assert_eq!(fields[1].icon, "phone");
        assert_eq!(fields[1].id, "b");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut fields = vec![field("a", "Blog", "me.dev", "globe")];
        let before = fields.clone();
        assert!(!fields.update_field("zzz", CustomFieldKey::Content, "ignored"));
        assert_eq!(fields, before);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut fields = vec![
            field("a", "", "", "star"),
            field("b", "", "", "star"),
            field("c", "", "", "star"),
        ];
        assert!(fields.remove_field("b"));
        assert!(!fields.remove_field("b"));
        let ids: Vec<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_unresolvable_icon_fails_soft() {
        let registry = IconRegistry::default();
        let f = field("a", "", "", "NoSuchIcon");
        assert_eq!(f.resolve_icon(&registry).name, DEFAULT_ICON);
    }

    #[test]
    fn test_missing_icon_deserializes_to_default() {
        let f: CustomField = serde_json::from_str(r#"{"id":"x","title":"T"}"#).unwrap();
        assert_eq!(f.icon, DEFAULT_ICON);
        assert!(f.content.is_empty());
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("icon".parse::<CustomFieldKey>(), Ok(CustomFieldKey::Icon));
        assert_eq!(
            "label".parse::<CustomFieldKey>(),
            Err(UnknownFieldKey("label".into()))
        );
    }
}
