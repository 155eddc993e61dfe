//! Core quiz extraction and consolidation library.
//!
//! Provides:
//! - Markdown parser turning question-bank documents into structured records
//! - Content-derived stable identifiers for quizzes, questions, attachments
//! - Attachment URL normalization into a canonical rooted form
//! - Consolidation of per-language sibling documents into one aggregate
//!
//! The library performs no filesystem or network I/O; discovery, reading,
//! writing and uploading live in the CLI application.

pub mod consolidate;
pub mod error;
pub mod ident;
pub mod language;
pub mod normalize;
pub mod parser;
pub mod slug;
pub mod types;

pub use consolidate::{consolidate, Consolidated, ConsolidateOptions, SourceDocument};
pub use error::{ConsolidateError, Result};
pub use ident::stable_id;
pub use language::{infer_language, language_from_markdown_source, DEFAULT_LANGUAGE, KNOWN_LANGUAGES};
pub use normalize::{normalize_attachment, normalize_url, NormalizedUrl, ROOT_MARKER};
pub use parser::{parse_quiz, strip_question_label, ParseOptions};
pub use types::{
    Aggregate, AggregateDocument, AggregateMeta, Attachment, AttachmentKind, Question,
    QuestionNature, Quiz, QuizDocument, QuizMeta, QuizSet,
};
