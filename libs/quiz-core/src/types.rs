//! Core types for quiz extraction and consolidation.

use serde::{Deserialize, Serialize};

/// How a question expects to be answered.
///
/// `ChooseMany` iff more than one option was marked correct; a question
/// with zero marked answers stays `ChooseOne` (and gets a warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionNature {
    ChooseOne,
    ChooseMany,
}

impl QuestionNature {
    /// Derive the nature from the number of marked correct answers.
    pub fn from_correct_count(count: usize) -> Self {
        if count > 1 {
            Self::ChooseMany
        } else {
            Self::ChooseOne
        }
    }
}

impl Default for QuestionNature {
    fn default() -> Self {
        Self::ChooseOne
    }
}

/// Where an attachment belongs. Only question-level assets exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Question,
}

impl Default for AttachmentKind {
    fn default() -> Self {
        Self::Question
    }
}

/// An image/asset reference attached to a question.
///
/// The identifier derives from the raw markdown reference, not the
/// normalized URL, so ids survive root or layout changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: AttachmentKind,
}

/// One parsed question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub correct_answer: Vec<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub nature: QuestionNature,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Back-reference stamped by the consolidator; absent on parser output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_id: Option<String>,
    /// Back-reference stamped by the consolidator; absent on parser output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quizz_id: Option<String>,
}

/// Single-language quiz parsed from one markdown file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by_id: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Provenance metadata emitted next to a parsed quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMeta {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Parser output: one JSON document per markdown source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub quizz: Quiz,
    pub meta: QuizMeta,
}

/// One language variant inside a consolidated quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: String,
    pub language: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Consolidated multi-language quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub id: String,
    pub slug: String,
    pub created_by_id: String,
    pub sets: Vec<QuizSet>,
}

/// Provenance metadata emitted next to an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMeta {
    pub languages: Vec<String>,
    pub sources: Vec<String>,
    pub generated_at: String,
    pub warnings: Vec<String>,
}

/// Consolidator output: one JSON document per quiz directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDocument {
    pub quizz: Aggregate,
    pub meta: AggregateMeta,
}
