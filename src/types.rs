//! Shared identifier types.

/// Curriculum topic identifier (supplied by the catalogue)
pub type TopicId = String;

/// Section identifier (generated by the section model)
pub type SectionId = String;

/// Opaque paper identifier returned by the generation service
pub type PaperId = String;
