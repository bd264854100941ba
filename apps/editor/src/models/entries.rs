use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::custom_fields::CustomField;
use crate::errors::UnknownSection;
use crate::models::section::{LabelConfig, SectionEntity};
use crate::timeline::{format_period, TimelineEntity, TimelineItem};

/// The list-based résumé sections, each backed by its own collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Education,
    Work,
    Projects,
    Awards,
    Languages,
    Skills,
    Custom,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Education,
        SectionKind::Work,
        SectionKind::Projects,
        SectionKind::Awards,
        SectionKind::Languages,
        SectionKind::Skills,
        SectionKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Education => "education",
            SectionKind::Work => "work",
            SectionKind::Projects => "projects",
            SectionKind::Awards => "awards",
            SectionKind::Languages => "languages",
            SectionKind::Skills => "skills",
            SectionKind::Custom => "custom",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.trim().is_empty())
}

fn joined(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub major: String,
    pub gpa: String,
    pub start_date: String,
    pub end_date: String,
    pub summary: String,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for Education {
    const COLLECTION: &'static str = "educations";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_date(&self) -> Option<&str> {
        non_empty(&self.start_date)
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.school)
            .with_cover(&self.photos)
            .detail(joined(&[self.degree.as_str(), self.major.as_str()], ", "))
            .detail(format_period(&self.start_date, &self.end_date))
            .detail(non_empty(&self.gpa).map(|g| format!("GPA {g}")).unwrap_or_default())
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for Education {
    const DEFAULT_TITLE: &'static str = "Education";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("school", "School").with_icon("book"),
            LabelConfig::new("degree", "Degree"),
            LabelConfig::new("major", "Major"),
            LabelConfig::new("gpa", "GPA"),
            LabelConfig::new("startDate", "Start Date").with_icon("calendar"),
            LabelConfig::new("endDate", "End Date").with_icon("calendar"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Work
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Work {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub summary: String,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for Work {
    const COLLECTION: &'static str = "works";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_date(&self) -> Option<&str> {
        non_empty(&self.start_date)
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.company)
            .with_cover(&self.photos)
            .detail(joined(&[self.position.as_str(), self.location.as_str()], " · "))
            .detail(format_period(&self.start_date, &self.end_date))
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for Work {
    const DEFAULT_TITLE: &'static str = "Work Experience";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("company", "Company").with_icon("briefcase"),
            LabelConfig::new("position", "Position"),
            LabelConfig::new("location", "Location").with_icon("location"),
            LabelConfig::new("startDate", "Start Date").with_icon("calendar"),
            LabelConfig::new("endDate", "End Date").with_icon("calendar"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Project
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub role: String,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    pub summary: String,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for Project {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_date(&self) -> Option<&str> {
        non_empty(&self.start_date)
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.name)
            .with_cover(&self.photos)
            .detail(self.role.clone())
            .detail(format_period(&self.start_date, &self.end_date))
            .detail(self.url.clone())
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for Project {
    const DEFAULT_TITLE: &'static str = "Projects";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("name", "Project Name").with_icon("code"),
            LabelConfig::new("role", "Role"),
            LabelConfig::new("url", "Link").with_icon("link"),
            LabelConfig::new("startDate", "Start Date").with_icon("calendar"),
            LabelConfig::new("endDate", "End Date").with_icon("calendar"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Award
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Award {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub summary: String,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for Award {
    const COLLECTION: &'static str = "awards";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_date(&self) -> Option<&str> {
        non_empty(&self.date)
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.title)
            .with_cover(&self.photos)
            .detail(self.issuer.clone())
            .detail(self.date.clone())
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for Award {
    const DEFAULT_TITLE: &'static str = "Awards";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("title", "Award").with_icon("award"),
            LabelConfig::new("issuer", "Issuer"),
            LabelConfig::new("date", "Date").with_icon("calendar"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Language
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub language: String,
    pub proficiency: String,
    pub certificate: String,
    pub date: String,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for Language {
    const COLLECTION: &'static str = "languages";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_date(&self) -> Option<&str> {
        non_empty(&self.date)
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.language)
            .detail(self.proficiency.clone())
            .detail(joined(&[self.certificate.as_str(), self.date.as_str()], ", "))
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for Language {
    const DEFAULT_TITLE: &'static str = "Languages";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("language", "Language").with_icon("language"),
            LabelConfig::new("proficiency", "Proficiency"),
            LabelConfig::new("certificate", "Certificate"),
            LabelConfig::new("date", "Date").with_icon("calendar"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub level: String,
    pub keywords: Vec<String>,
    pub summary: String,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for Skill {
    const COLLECTION: &'static str = "skills";

    fn id(&self) -> &str {
        &self.id
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.name)
            .detail(self.level.clone())
            .detail(self.keywords.join(", "))
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for Skill {
    const DEFAULT_TITLE: &'static str = "Skills";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("name", "Skill").with_icon("code"),
            LabelConfig::new("level", "Level"),
            LabelConfig::new("keywords", "Keywords"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Custom block
// ────────────────────────────────────────────────────────────────────────────

/// A free-form timeline entry for user-defined sections (volunteering, talks, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub summary: String,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl TimelineEntity for CustomItem {
    const COLLECTION: &'static str = "custom-items";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_date(&self) -> Option<&str> {
        non_empty(&self.date)
    }

    fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut Vec<CustomField> {
        &mut self.custom_fields
    }

    fn to_timeline_item(&self) -> TimelineItem {
        TimelineItem::new(&self.id, &self.title)
            .with_cover(&self.photos)
            .detail(self.subtitle.clone())
            .detail(self.date.clone())
            .custom_details(&self.custom_fields)
    }
}

impl SectionEntity for CustomItem {
    const DEFAULT_TITLE: &'static str = "Custom Section";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("title", "Title"),
            LabelConfig::new("subtitle", "Subtitle"),
            LabelConfig::new("date", "Date").with_icon("calendar"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile (single-document section, edited through the draft pipeline)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl Profile {
    /// Key of the profile section inside the shared résumé document.
    pub const SECTION: &'static str = "profile";
}

impl SectionEntity for Profile {
    const DEFAULT_TITLE: &'static str = "Profile";

    fn default_labels() -> Vec<LabelConfig> {
        vec![
            LabelConfig::new("name", "Name"),
            LabelConfig::new("headline", "Headline"),
            LabelConfig::new("email", "Email").with_icon("mail"),
            LabelConfig::new("phone", "Phone").with_icon("phone"),
            LabelConfig::new("location", "Location").with_icon("location"),
            LabelConfig::new("website", "Website").with_icon("globe"),
            LabelConfig::new("summary", "Summary"),
        ]
    }
}
