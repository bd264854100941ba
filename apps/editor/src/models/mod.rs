pub mod document;
pub mod entries;
pub mod section;

pub use document::ResumeDocument;
pub use entries::{
    Award, CustomItem, Education, Language, Profile, Project, SectionKind, Skill, Work,
};
pub use section::{
    LabelConfig, Section, SectionConfig, SectionEntity, SectionList, SectionMeta, SectionOverlay,
};
