//! Section configuration overlay: presentation metadata layered over entity data.
//!
//! A [`Section<T>`] is the entity's own fields plus `labelConfig` and
//! `sectionConfig`, merged flat on the wire. Title, visibility and field
//! captions can be edited and persisted without touching entity values.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::SectionError;

pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub title: String,
    pub is_show: bool,
    pub columns: u8,
    pub separate_links: bool,
}

impl SectionConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_show: true,
            columns: MIN_COLUMNS,
            separate_links: false,
        }
    }
}

/// Maps one entity field to its user-editable caption and optional icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl LabelConfig {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Entity types that can be decorated into a configurable section.
pub trait SectionEntity {
    const DEFAULT_TITLE: &'static str;

    /// One label per renderable field, keyed by the field's wire name.
    fn default_labels() -> Vec<LabelConfig>;
}

/// Presentation metadata shared by single-entity and list sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMeta {
    pub label_config: Vec<LabelConfig>,
    pub section_config: SectionConfig,
}

impl SectionMeta {
    pub fn new(title: impl Into<String>, label_config: Vec<LabelConfig>) -> Self {
        Self {
            label_config,
            section_config: SectionConfig::titled(title),
        }
    }

    pub fn for_entity<T: SectionEntity>() -> Self {
        Self::new(T::DEFAULT_TITLE, T::default_labels())
    }
}

/// Title, visibility and caption edits. All validation failures are silent no-ops.
pub trait SectionOverlay {
    fn meta(&self) -> &SectionMeta;

    fn meta_mut(&mut self) -> &mut SectionMeta;

    /// Replaces the section title. Empty or whitespace-only input is ignored.
    fn update_title(&mut self, new_title: &str) -> bool {
        if new_title.trim().is_empty() {
            return false;
        }
        self.meta_mut().section_config.title = new_title.to_string();
        true
    }

    /// Includes or excludes the section from the rendered résumé without
    /// touching its data.
    fn toggle_visibility(&mut self, is_show: bool) {
        self.meta_mut().section_config.is_show = is_show;
    }

    /// Replaces the caption of the label with `key`. Never inserts: an
    /// unknown key is a no-op.
    fn relabel_field(&mut self, key: &str, new_label: &str) -> bool {
        match self
            .meta_mut()
            .label_config
            .iter_mut()
            .find(|l| l.key == key)
        {
            Some(entry) => {
                entry.label = new_label.to_string();
                true
            }
            None => false,
        }
    }

    fn set_columns(&mut self, columns: u8) {
        self.meta_mut().section_config.columns = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
    }

    fn set_separate_links(&mut self, separate: bool) {
        self.meta_mut().section_config.separate_links = separate;
    }

    fn title(&self) -> &str {
        &self.meta().section_config.title
    }

    fn is_visible(&self) -> bool {
        self.meta().section_config.is_show
    }

    fn label_for(&self, key: &str) -> Option<&str> {
        self.meta()
            .label_config
            .iter()
            .find(|l| l.key == key)
            .map(|l| l.label.as_str())
    }
}

impl SectionOverlay for SectionMeta {
    fn meta(&self) -> &SectionMeta {
        self
    }

    fn meta_mut(&mut self) -> &mut SectionMeta {
        self
    }
}

/// An entity decorated with section metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(flatten)]
    pub meta: SectionMeta,
}

impl<T: Serialize> Section<T> {
    /// Decorates `data`, rejecting label keys that are duplicated or that do
    /// not name a field of `T`.
    pub fn new(data: T, meta: SectionMeta) -> Result<Self, SectionError> {
        validate_labels(&meta.label_config, &data)?;
        Ok(Self { data, meta })
    }
}

impl<T: Serialize + SectionEntity> Section<T> {
    pub fn with_defaults(data: T) -> Result<Self, SectionError> {
        Self::new(data, SectionMeta::for_entity::<T>())
    }
}

impl<T> SectionOverlay for Section<T> {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut SectionMeta {
        &mut self.meta
    }
}

/// A list of entities decorated with one shared set of section metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionList<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub meta: SectionMeta,
}

impl<T: Serialize + Default> SectionList<T> {
    /// Label keys are checked against the field set of `T::default()`; see
    /// [`validate_labels`] for fields that are not labelable.
    pub fn new(items: Vec<T>, meta: SectionMeta) -> Result<Self, SectionError> {
        validate_labels(&meta.label_config, &T::default())?;
        Ok(Self { items, meta })
    }
}

impl<T: Serialize + Default + SectionEntity> SectionList<T> {
    pub fn with_defaults(items: Vec<T>) -> Result<Self, SectionError> {
        Self::new(items, SectionMeta::for_entity::<T>())
    }
}

impl<T> SectionOverlay for SectionList<T> {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut SectionMeta {
        &mut self.meta
    }
}

/// Checks that label keys are unique and each names a field of `entity`.
///
/// The field set is whatever `entity` serializes to, so fields skipped when
/// empty (an unsaved entity's `id`) cannot carry a label. Identifiers are not
/// rendered, so no default label set names them.
pub fn validate_labels<T: Serialize>(
    labels: &[LabelConfig],
    entity: &T,
) -> Result<(), SectionError> {
    let value = serde_json::to_value(entity).map_err(|_| SectionError::NotAnObject)?;
    let fields = value.as_object().ok_or(SectionError::NotAnObject)?;

    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.key.as_str()) {
            return Err(SectionError::DuplicateLabelKey(label.key.clone()));
        }
        if !fields.contains_key(&label.key) {
            return Err(SectionError::UnknownLabelKey(label.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entries::{
        Award, CustomItem, Education, Language, Profile, Project, Skill, Work,
    };

    fn education_section() -> Section<Education> {
        Section::with_defaults(Education {
            id: "e1".into(),
            school: "MIT".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_labels_match_entity_fields() {
        assert!(validate_labels(&Education::default_labels(), &Education::default()).is_ok());
        assert!(validate_labels(&Work::default_labels(), &Work::default()).is_ok());
        assert!(validate_labels(&Project::default_labels(), &Project::default()).is_ok());
        assert!(validate_labels(&Award::default_labels(), &Award::default()).is_ok());
        assert!(validate_labels(&Language::default_labels(), &Language::default()).is_ok());
        assert!(validate_labels(&Skill::default_labels(), &Skill::default()).is_ok());
        assert!(validate_labels(&CustomItem::default_labels(), &CustomItem::default()).is_ok());
        assert!(validate_labels(&Profile::default_labels(), &Profile::default()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_and_duplicate_keys() {
        let meta = SectionMeta::new("Edu", vec![LabelConfig::new("university", "Uni")]);
        assert_eq!(
            Section::new(Education::default(), meta).unwrap_err(),
            SectionError::UnknownLabelKey("university".into())
        );

        let meta = SectionMeta::new(
            "Edu",
            vec![
                LabelConfig::new("school", "School"),
                LabelConfig::new("school", "Again"),
            ],
        );
        assert_eq!(
            Section::new(Education::default(), meta).unwrap_err(),
            SectionError::DuplicateLabelKey("school".into())
        );
    }

    #[test]
    fn test_skipped_id_field_is_not_labelable() {
        let meta = SectionMeta::new("Awards", vec![LabelConfig::new("id", "Identifier")]);
        assert_eq!(
            SectionList::<Award>::new(vec![], meta.clone()).unwrap_err(),
            SectionError::UnknownLabelKey("id".into())
        );

        let saved = Award {
            id: "a1".into(),
            ..Default::default()
        };
        assert!(Section::new(saved, meta).is_ok());
        assert!(Award::default_labels().iter().all(|l| l.key != "id"));
    }

    #[test]
    fn test_update_title_ignores_blank() {
        let mut section = education_section();
        assert!(!section.update_title("   "));
        assert!(!section.update_title(""));
        assert_eq!(section.title(), "Education");
        assert!(section.update_title("Studies"));
        assert_eq!(section.title(), "Studies");
    }

    #[test]
    fn test_toggle_visibility_keeps_data() {
        let mut section = education_section();
        section.toggle_visibility(false);
        assert!(!section.is_visible());
        assert_eq!(section.data.school, "MIT");
        section.toggle_visibility(true);
        assert!(section.is_visible());
    }

    #[test]
    fn test_relabel_changes_only_matching_caption() {
        let mut section = education_section();
        let before = section.meta.label_config.clone();

        assert!(section.relabel_field("school", "University"));

        for (old, new) in before.iter().zip(&section.meta.label_config) {
            assert_eq!(old.key, new.key);
            assert_eq!(old.icon, new.icon);
            if old.key != "school" {
                assert_eq!(old.label, new.label);
            }
        }
        assert_eq!(section.label_for("school"), Some("University"));
    }

    #[test]
    fn test_relabel_unknown_key_never_inserts() {
        let mut section = education_section();
        let before = section.meta.clone();
        assert!(!section.relabel_field("advisor", "Advisor"));
        assert_eq!(section.meta, before);
    }

    #[test]
    fn test_columns_are_clamped() {
        let mut section = education_section();
        section.set_columns(0);
        assert_eq!(section.meta.section_config.columns, 1);
        section.set_columns(9);
        assert_eq!(section.meta.section_config.columns, 4);
        section.set_columns(2);
        assert_eq!(section.meta.section_config.columns, 2);
    }

    #[test]
    fn test_section_serializes_flat() {
        let section = education_section();
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["school"], "MIT");
        assert_eq!(value["sectionConfig"]["isShow"], true);
        assert_eq!(value["sectionConfig"]["separateLinks"], false);
        assert_eq!(value["labelConfig"][0]["key"], "school");

        let back: Section<Education> = serde_json::from_value(value).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_section_list_overlay() {
        let mut list = SectionList::with_defaults(vec![Award::default(), Award::default()]).unwrap();
        list.update_title("Honors");
        list.relabel_field("issuer", "Awarded by");
        assert_eq!(list.title(), "Honors");
        assert_eq!(list.label_for("issuer"), Some("Awarded by"));
        assert_eq!(list.items.len(), 2);
    }
}
