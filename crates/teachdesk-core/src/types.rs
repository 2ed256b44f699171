//! Core domain types for lesson plans

use std::path::PathBuf;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Grade levels offered by the Create New form, in display order
pub const GRADE_LEVELS: &[&str] = &[
    "Kindergarten",
    "1st Grade",
    "2nd Grade",
    "3rd Grade",
    "4th Grade",
    "5th Grade",
    "6th Grade",
    "7th Grade",
    "8th Grade",
    "High School",
];

/// Grade preselected when the Create New form opens
pub const DEFAULT_GRADE: &str = "7th Grade";

/// Title used for grounding references that arrive without one
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

/// Current time truncated to millisecond precision.
///
/// Saved lessons store `dateCreated` as epoch milliseconds, so timestamps are
/// truncated up front to keep a record equal to itself after a store round trip.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A citation returned by the AI backend supporting a generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingReference {
    pub title: String,
    pub uri: String,
}

impl GroundingReference {
    /// Build a reference from optional backend fields.
    ///
    /// Returns `None` when the URI is missing or blank; such entries are never stored.
    pub fn from_parts(title: Option<&str>, uri: Option<&str>) -> Option<Self> {
        let uri = uri.map(str::trim).filter(|u| !u.is_empty())?;
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SOURCE_TITLE);
        Some(Self {
            title: title.to_string(),
            uri: uri.to_string(),
        })
    }
}

/// Requested size of a generated visual aid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageResolution {
    #[default]
    Low,
    Medium,
    High,
}

impl ImageResolution {
    pub const ALL: [ImageResolution; 3] = [
        ImageResolution::Low,
        ImageResolution::Medium,
        ImageResolution::High,
    ];

    /// Image size token understood by the image generation endpoint
    pub fn as_image_size(&self) -> &'static str {
        match self {
            ImageResolution::Low => "1K",
            ImageResolution::Medium => "2K",
            ImageResolution::High => "4K",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ImageResolution::Low => ImageResolution::Medium,
            ImageResolution::Medium => ImageResolution::High,
            ImageResolution::High => ImageResolution::Low,
        }
    }
}

impl std::fmt::Display for ImageResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_image_size())
    }
}

/// The active generated or viewed plan
///
/// `id` is only present once the plan has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonResult {
    pub id: Option<String>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub topic: String,
    pub content: String,
    pub source_file: Option<PathBuf>,
    pub generated_image_url: Option<String>,
    pub grounding_refs: Vec<GroundingReference>,
    pub created_at: DateTime<Utc>,
}

impl LessonResult {
    /// Result of a Create New request
    pub fn new_plan(
        grade: impl Into<String>,
        subject: impl Into<String>,
        topic: impl Into<String>,
        content: impl Into<String>,
        grounding_refs: Vec<GroundingReference>,
    ) -> Self {
        Self {
            id: None,
            grade: Some(grade.into()),
            subject: Some(subject.into()),
            topic: topic.into(),
            content: content.into(),
            source_file: None,
            generated_image_url: None,
            grounding_refs,
            created_at: timestamp_now(),
        }
    }

    /// Result of a Match Style request
    pub fn style_matched(
        source_file: impl Into<PathBuf>,
        topic: impl Into<String>,
        content: impl Into<String>,
        grounding_refs: Vec<GroundingReference>,
    ) -> Self {
        Self {
            id: None,
            grade: None,
            subject: None,
            topic: topic.into(),
            content: content.into(),
            source_file: Some(source_file.into()),
            generated_image_url: None,
            grounding_refs,
            created_at: timestamp_now(),
        }
    }

    /// Persisted form of this result under the given id
    pub fn to_saved(&self, id: impl Into<String>) -> SavedLesson {
        SavedLesson {
            id: id.into(),
            topic: self.topic.clone(),
            grade: self.grade.clone(),
            subject: self.subject.clone(),
            content: self.content.clone(),
            created_at: self.created_at,
            grounding_refs: self.grounding_refs.clone(),
            generated_image_url: self.generated_image_url.clone(),
        }
    }
}

impl From<&SavedLesson> for LessonResult {
    fn from(lesson: &SavedLesson) -> Self {
        Self {
            id: Some(lesson.id.clone()),
            grade: lesson.grade.clone(),
            subject: lesson.subject.clone(),
            topic: lesson.topic.clone(),
            content: lesson.content.clone(),
            source_file: None,
            generated_image_url: lesson.generated_image_url.clone(),
            grounding_refs: lesson.grounding_refs.clone(),
            created_at: lesson.created_at,
        }
    }
}

/// A lesson persisted in the local store, keyed by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLesson {
    pub id: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    #[serde(rename = "dateCreated", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "groundingUrls", default)]
    pub grounding_refs: Vec<GroundingReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image_url: Option<String>,
}
