// Timeline: the list + detail CRUD pattern shared by every résumé section.
// Implements: collection controller, view-only sorting, delete confirmation,
// edit sessions, transient notifications.

pub mod controller;
pub mod delete;
pub mod edit;
pub mod notification;
pub mod sort;

use std::cmp::Ordering;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::custom_fields::CustomField;

pub use controller::{ListView, Phase, TimelineController, View};
pub use delete::{DeleteGuard, DeleteState};
pub use edit::EditSession;
pub use notification::{Notification, NotificationKind, Notifier};

/// A record that can live in a timeline section.
///
/// Entities are otherwise heterogeneous; the controller only relies on this
/// minimal shared shape plus the transform and comparator in [`TimelineOptions`].
pub trait TimelineEntity:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Path segment of the collection endpoint under the API base URL.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Date-like field used by the default display ordering.
    fn sort_date(&self) -> Option<&str> {
        None
    }

    fn custom_fields(&self) -> &[CustomField];

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField>;

    /// Projects the entity into the normalized shape the list renderer consumes.
    fn to_timeline_item(&self) -> TimelineItem;
}

/// Normalized list-row projection of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub title: String,
    pub cover: Option<String>,
    pub details: Vec<String>,
}

impl TimelineItem {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            cover: None,
            details: Vec::new(),
        }
    }

    pub fn with_cover(mut self, photos: &[String]) -> Self {
        self.cover = photos.iter().find(|p| !p.trim().is_empty()).cloned();
        self
    }

    /// Appends a detail line, skipping empty ones.
    pub fn detail(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        if !line.trim().is_empty() {
            self.details.push(line);
        }
        self
    }

    /// Appends one `title: content` line per non-empty custom field.
    pub fn custom_details(mut self, fields: &[CustomField]) -> Self {
        for field in fields {
            let line = match (field.title.trim(), field.content.trim()) {
                ("", "") => continue,
                ("", content) => content.to_string(),
                (title, "") => title.to_string(),
                (title, content) => format!("{title}: {content}"),
            };
            self.details.push(line);
        }
        self
    }
}

pub type Transform<T> = Box<dyn Fn(&[T]) -> Vec<TimelineItem> + Send + Sync>;
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Per-section parameters of a timeline controller.
pub struct TimelineOptions<T> {
    /// Body POSTed when the user adds a new entry.
    pub default_value: T,
    /// Projection from display-ordered entities to list rows.
    pub transform: Transform<T>,
    /// Display ordering. Never applied to the stored collection.
    pub comparator: Comparator<T>,
}

impl<T: TimelineEntity> TimelineOptions<T> {
    /// Options every section uses unless it overrides them: `T::default()` as the
    /// new-entry body, the entity's own projection, newest-first ordering.
    pub fn for_entity() -> Self {
        Self {
            default_value: T::default(),
            transform: Box::new(|items: &[T]| items.iter().map(T::to_timeline_item).collect()),
            comparator: Box::new(sort::by_date_desc::<T>),
        }
    }

    pub fn with_default_value(mut self, value: T) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_comparator(
        mut self,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    pub fn with_transform(
        mut self,
        transform: impl Fn(&[T]) -> Vec<TimelineItem> + Send + Sync + 'static,
    ) -> Self {
        self.transform = Box::new(transform);
        self
    }
}

/// Formats a `start – end` period, using "Present" for an open end.
pub fn format_period(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, "") => format!("{start} – Present"),
        ("", end) => end.to_string(),
        (start, end) => format!("{start} – {end}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_period() {
        assert_eq!(format_period("2020-09", "2024-06"), "2020-09 – 2024-06");
        assert_eq!(format_period("2022-01", ""), "2022-01 – Present");
        assert_eq!(format_period("", "2021"), "2021");
        assert_eq!(format_period(" ", ""), "");
    }

    #[test]
    fn test_item_builder_skips_blank_lines() {
        let fields = vec![
            CustomField {
                id: "1".into(),
                title: "Advisor".into(),
                content: "Dr. Lee".into(),
                icon: "star".into(),
            },
            CustomField {
                id: "2".into(),
                title: String::new(),
                content: String::new(),
                icon: "star".into(),
            },
        ];
        let item = TimelineItem::new("e1", "MIT")
            .with_cover(&["".to_string(), "logo.png".to_string()])
            .detail("BSc")
            .detail("  ")
            .custom_details(&fields);
        assert_eq!(item.cover.as_deref(), Some("logo.png"));
        assert_eq!(item.details, vec!["BSc", "Advisor: Dr. Lee"]);
    }
}
