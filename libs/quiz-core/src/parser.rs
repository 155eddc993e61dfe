//! Markdown parser for quiz question banks.
//!
//! # Format
//! ```markdown
//! ## Python Quiz
//!
//! Short introduction, becomes the description.
//!
//! #### 1. What is 2+2?
//! - [ ] 3
//! - [x] 4
//!
//! Hint: think fingers
//! Addition of two integers.
//! ```
//!
//! Parsing is best-effort extraction, not validation: malformed structure
//! degrades to warnings and the document is still emitted.

use crate::ident::stable_id;
use crate::language::language_from_markdown_source;
use crate::normalize::normalize_url;
use crate::types::{Attachment, AttachmentKind, Question, QuestionNature, Quiz, QuizDocument, QuizMeta};
use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

/// List marker + checkbox + option text.
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s*\[( |x|X)\]\s*(.+)$").expect("valid regex"));

/// Inline image reference; the capture is the raw asset reference.
static IMAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid regex"));

/// Leading ordinal label on a question heading ("1.", "Question 2.", ...).
static QUESTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-zÀ-ÿ?¿¡']*\s*)?\d+\.?\s*(.*)$").expect("valid regex"));

/// Case-insensitive hint label on a trailing line.
static HINT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^hint[:\-]?\s*").expect("valid regex"));

/// Configuration for one parse; supplied by the caller, never defaulted
/// inside the library.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Source path relative to the declared root, `/`-separated.
    pub source: String,
    /// Creator identity stamped on the quiz.
    pub created_by: String,
}

/// Parse one markdown document into a quiz record plus warnings.
///
/// Never fails: undecodable input is the caller's concern, everything else
/// degrades to warnings in `meta.warnings`.
pub fn parse_quiz(content: &str, opts: &ParseOptions) -> QuizDocument {
    let mut splitter = Splitter::new();
    for line in content.lines() {
        splitter.process_line(line);
    }
    let (title, intro_lines, blocks) = splitter.finish();

    let quiz_id = stable_id(&["quiz", &opts.source]);
    let rel_dir = rel_dir_of(&opts.source);

    let description = {
        let joined = intro_lines.join(" ");
        let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            format!("Seeded from {}", opts.source)
        } else {
            collapsed
        }
    };

    let mut questions = Vec::with_capacity(blocks.len());
    let mut warnings = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let question = parse_question_block(block, &quiz_id, index, rel_dir);
        if question.correct_answer.is_empty() {
            warnings.push(format!("Question {} has no marked correct answers", index + 1));
        }
        if question.options.is_empty() {
            warnings.push(format!("Question {} has no options", index + 1));
        }
        questions.push(question);
    }

    QuizDocument {
        quizz: Quiz {
            id: quiz_id,
            title: title.unwrap_or_else(|| title_from_source(&opts.source)),
            description,
            created_by_id: opts.created_by.clone(),
            questions,
        },
        meta: QuizMeta {
            source: opts.source.clone(),
            language: language_from_markdown_source(&opts.source),
            generated_at: Utc::now().to_rfc3339(),
            warnings,
        },
    }
}

/// Strip the leading ordinal label from a question heading.
///
/// "1. What is 2+2?" and "Pregunta 3. ¿Qué es?" both lose their label; a
/// heading without one passes through trimmed.
pub fn strip_question_label(text: &str) -> String {
    let trimmed = text.trim();
    match QUESTION_LABEL.captures(trimmed) {
        Some(caps) if !caps[1].trim().is_empty() => caps[1].trim().to_string(),
        _ => trimmed.to_string(),
    }
}

/// One heading-delimited question block.
struct Block {
    heading: String,
    body: Vec<String>,
}

/// Line-stream state machine splitting a document into title, preamble and
/// question blocks.
struct Splitter {
    title: Option<String>,
    intro: Vec<String>,
    blocks: Vec<Block>,
    current: Option<Block>,
    in_questions: bool,
}

impl Splitter {
    fn new() -> Self {
        Self {
            title: None,
            intro: Vec::new(),
            blocks: Vec::new(),
            current: None,
            in_questions: false,
        }
    }

    fn process_line(&mut self, line: &str) {
        if self.title.is_none() && !self.in_questions && line.starts_with("## ") {
            self.title = Some(strip_heading(line, "##"));
            return;
        }

        if line.starts_with("#### ") {
            self.in_questions = true;
            if let Some(block) = self.current.take() {
                self.blocks.push(block);
            }
            self.current = Some(Block {
                heading: strip_heading(line, "####"),
                body: Vec::new(),
            });
            return;
        }

        if !self.in_questions {
            self.intro.push(line.to_string());
        } else if let Some(ref mut block) = self.current {
            block.body.push(line.to_string());
        }
    }

    fn finish(mut self) -> (Option<String>, Vec<String>, Vec<Block>) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
        (self.title, self.intro, self.blocks)
    }
}

fn strip_heading(line: &str, marker: &str) -> String {
    line.strip_prefix(marker).unwrap_or(line).trim().to_string()
}

/// Parse one question block's body into a structured question.
fn parse_question_block(block: &Block, quiz_id: &str, index: usize, rel_dir: &str) -> Question {
    let heading_text = strip_question_label(&block.heading);
    let index_part = index.to_string();

    let mut question_lines: Vec<&str> = Vec::new();
    let mut trailing_lines: Vec<&str> = Vec::new();
    let mut options: Vec<String> = Vec::new();
    let mut correct: Vec<String> = Vec::new();
    let mut attachments: Vec<Attachment> = Vec::new();
    let mut inside_options = false;
    let mut inside_code = false;

    for line in &block.body {
        if line.trim().starts_with("```") {
            inside_code = !inside_code;
        }

        // Attachment scanning runs on every line, code fences included;
        // image markup in example code still counts as an asset reference.
        for caps in IMAGE_REF.captures_iter(line) {
            let raw = &caps[1];
            attachments.push(Attachment {
                id: stable_id(&["attachment", quiz_id, &index_part, raw]),
                url: normalize_url(raw, rel_dir).url,
                kind: AttachmentKind::Question,
            });
        }

        let option = if inside_code { None } else { OPTION_LINE.captures(line) };
        if let Some(caps) = option {
            inside_options = true;
            let text = caps[2].trim().to_string();
            options.push(text.clone());
            if caps[1].eq_ignore_ascii_case("x") {
                correct.push(text);
            }
            continue;
        }

        if inside_options {
            trailing_lines.push(line);
        } else {
            question_lines.push(line);
        }
    }

    let mut hint_lines: Vec<String> = Vec::new();
    let mut explanation_lines: Vec<String> = Vec::new();
    for line in trailing_lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if HINT_LABEL.is_match(trimmed) {
            hint_lines.push(HINT_LABEL.replace(trimmed, "").into_owned());
        } else {
            explanation_lines.push(trimmed.to_string());
        }
    }

    let extra_question = question_lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    let question_text = if extra_question.trim().is_empty() {
        heading_text.clone()
    } else {
        format!("{}\n{}", heading_text, extra_question.trim())
    }
    .trim()
    .to_string();

    let nature = QuestionNature::from_correct_count(correct.len());
    let answer = if correct.is_empty() { None } else { Some(correct.join("; ")) };

    Question {
        id: stable_id(&["question", quiz_id, &index_part, &heading_text]),
        question: question_text,
        answer,
        explanation: join_non_empty(&explanation_lines),
        hint: join_non_empty(&hint_lines),
        correct_answer: correct,
        options,
        nature,
        attachments,
        set_id: None,
        quizz_id: None,
    }
}

fn join_non_empty(lines: &[String]) -> Option<String> {
    let joined = lines.join("\n").trim().to_string();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Synthesize a title from the first path segment of the source location.
fn title_from_source(source: &str) -> String {
    let folder = source.split('/').next().unwrap_or(source);
    folder
        .split(['-', '_'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn rel_dir_of(source: &str) -> &str {
    source.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}
