//! Consolidation of per-language quiz documents into one aggregate.
//!
//! Sibling files in one directory ("python-quiz.json", "python-quiz-fr.json",
//! ...) merge into a single document with one set per language. Each run
//! recomputes the aggregate from scratch; nothing is persisted between runs.

use crate::error::{ConsolidateError, Result};
use crate::ident::stable_id;
use crate::language::infer_language;
use crate::normalize::normalize_attachment;
use crate::slug::slugify;
use crate::types::{Aggregate, AggregateDocument, AggregateMeta, QuizDocument, QuizSet};
use chrono::Utc;

/// One already-parsed document entering consolidation.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name (with extension) the document was read from; drives
    /// language inference when the document declares none.
    pub file_name: String,
    pub document: QuizDocument,
}

/// Configuration for one consolidation pass.
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    /// Aggregate directory relative to the declared root, `/`-separated.
    /// Attachments are re-normalized against this, not the per-file
    /// directories recorded at parse time.
    pub rel_dir: String,
    /// Name of the aggregate directory, for slug fallback.
    pub dir_name: String,
    /// Creator identity used when the base document carries none.
    pub fallback_created_by: String,
}

/// Outcome of consolidating one directory group.
#[derive(Debug)]
pub struct Consolidated {
    pub document: AggregateDocument,
    /// Attachment URLs rewritten during re-normalization.
    pub normalized_urls: usize,
}

/// Merge a directory group of per-language documents into one aggregate.
///
/// Documents are ordered by inferred language; the `en` document (or the
/// first in order) contributes the aggregate identity. Returns an error
/// only for an empty group.
pub fn consolidate(inputs: Vec<SourceDocument>, opts: &ConsolidateOptions) -> Result<Consolidated> {
    if inputs.is_empty() {
        return Err(ConsolidateError::EmptyGroup);
    }

    let mut entries: Vec<(String, SourceDocument)> = inputs
        .into_iter()
        .map(|input| {
            let stem = file_stem(&input.file_name);
            let language = infer_language(non_empty(&input.document.meta.language), stem);
            (language, input)
        })
        .collect();
    entries.sort_by(|a, b| (&a.0, &a.1.file_name).cmp(&(&b.0, &b.1.file_name)));

    let base = entries
        .iter()
        .find(|(language, _)| language == "en")
        .unwrap_or(&entries[0]);
    let base_quiz = &base.1.document.quizz;

    let aggregate_id = if base_quiz.id.is_empty() {
        stable_id(&["quizz", &opts.rel_dir])
    } else {
        base_quiz.id.clone()
    };
    let slug = slugify(non_empty(&base_quiz.title).unwrap_or(&opts.dir_name));
    let created_by_id = non_empty(&base_quiz.created_by_id)
        .unwrap_or(&opts.fallback_created_by)
        .to_string();

    let mut sets = Vec::with_capacity(entries.len());
    let mut languages: Vec<String> = Vec::new();
    let mut sources: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut normalized_urls = 0usize;

    for (language, input) in &entries {
        let set_id = format!("{aggregate_id}-{language}");
        let questions = input
            .document
            .quizz
            .questions
            .iter()
            .map(|question| {
                let mut stamped = question.clone();
                stamped.set_id = Some(set_id.clone());
                stamped.quizz_id = Some(aggregate_id.clone());
                stamped.attachments = question
                    .attachments
                    .iter()
                    .map(|attachment| {
                        let (normalized, changed) = normalize_attachment(attachment, &opts.rel_dir);
                        if changed {
                            normalized_urls += 1;
                        }
                        normalized
                    })
                    .collect();
                stamped
            })
            .collect();

        sets.push(QuizSet {
            id: set_id,
            language: language.clone(),
            title: input.document.quizz.title.clone(),
            description: input.document.quizz.description.clone(),
            questions,
        });

        if !languages.contains(language) {
            languages.push(language.clone());
        }
        if let Some(source) = non_empty(&input.document.meta.source) {
            if !sources.iter().any(|s| s == source) {
                sources.push(source.to_string());
            }
        }
        warnings.extend(input.document.meta.warnings.iter().cloned());
    }

    Ok(Consolidated {
        document: AggregateDocument {
            quizz: Aggregate {
                id: aggregate_id,
                slug,
                created_by_id,
                sets,
            },
            meta: AggregateMeta {
                languages,
                sources,
                generated_at: Utc::now().to_rfc3339(),
                warnings,
            },
        },
        normalized_urls,
    })
}

fn file_stem(file_name: &str) -> &str {
    file_name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file_name)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_quiz, ParseOptions};
    use crate::types::{Attachment, Question, QuestionNature, Quiz, QuizMeta};
    use pretty_assertions::assert_eq;

    fn opts() -> ConsolidateOptions {
        ConsolidateOptions {
            rel_dir: "python".to_string(),
            dir_name: "python".to_string(),
            fallback_created_by: "seed-user".to_string(),
        }
    }

    fn parsed(source: &str, content: &str) -> QuizDocument {
        parse_quiz(
            content,
            &ParseOptions {
                source: source.to_string(),
                created_by: "author-1".to_string(),
            },
        )
    }

    fn source(file_name: &str, document: QuizDocument) -> SourceDocument {
        SourceDocument {
            file_name: file_name.to_string(),
            document,
        }
    }

    #[test]
    fn empty_group_is_an_error() {
        assert!(matches!(
            consolidate(vec![], &opts()),
            Err(ConsolidateError::EmptyGroup)
        ));
    }

    #[test]
    fn two_languages_merge_into_sorted_sets() {
        let en = parsed("python/python-quiz.md", "## Python Quiz\n\n#### 1. Q?\n- [x] a\n- [ ] b\n");
        let fr = parsed("python/python-quiz-fr.md", "## Quiz Python\n\n#### 1. Q ?\n- [x] a\n- [ ] b\n");
        let result = consolidate(
            vec![source("python-quiz-fr.json", fr), source("python-quiz.json", en.clone())],
            &opts(),
        )
        .unwrap();

        let quizz = &result.document.quizz;
        assert_eq!(quizz.id, en.quizz.id);
        assert_eq!(quizz.slug, "python-quiz");
        assert_eq!(quizz.created_by_id, "author-1");
        assert_eq!(quizz.sets.len(), 2);
        assert_eq!(quizz.sets[0].language, "en");
        assert_eq!(quizz.sets[1].language, "fr");
        assert_eq!(result.document.meta.languages, vec!["en", "fr"]);
        assert_eq!(
            result.document.meta.sources,
            vec!["python/python-quiz.md", "python/python-quiz-fr.md"]
        );
    }

    #[test]
    fn set_ids_combine_aggregate_id_and_language() {
        let en = parsed("python/python-quiz.md", "## T\n\n#### 1. Q\n- [x] a\n");
        let result = consolidate(vec![source("python-quiz.json", en)], &opts()).unwrap();
        let quizz = &result.document.quizz;
        assert_eq!(quizz.sets[0].id, format!("{}-en", quizz.id));
        for question in &quizz.sets[0].questions {
            assert_eq!(question.set_id.as_deref(), Some(quizz.sets[0].id.as_str()));
            assert_eq!(question.quizz_id.as_deref(), Some(quizz.id.as_str()));
        }
    }

    #[test]
    fn base_falls_back_to_first_sorted_language() {
        let de = parsed("python/python-quiz-de.md", "## Deutsches Quiz\n\n#### 1. F\n- [x] a\n");
        let fr = parsed("python/python-quiz-fr.md", "## Quiz Français\n\n#### 1. Q\n- [x] a\n");
        let result = consolidate(
            vec![source("python-quiz-fr.json", fr), source("python-quiz-de.json", de.clone())],
            &opts(),
        )
        .unwrap();
        // "de" sorts before "fr" and becomes the base.
        assert_eq!(result.document.quizz.id, de.quizz.id);
        assert_eq!(result.document.quizz.slug, "deutsches-quiz");
    }

    #[test]
    fn declared_language_beats_filename_suffix() {
        let mut doc = parsed("python/python-quiz.md", "## T\n\n#### 1. Q\n- [x] a\n");
        doc.meta.language = "fr".to_string();
        let result = consolidate(vec![source("python-quiz-en.json", doc)], &opts()).unwrap();
        assert_eq!(result.document.quizz.sets[0].language, "fr");
    }

    #[test]
    fn attachments_renormalize_against_aggregate_directory() {
        let quiz = Quiz {
            id: "agg".to_string(),
            title: "T".to_string(),
            description: "d".to_string(),
            created_by_id: "author-1".to_string(),
            questions: vec![Question {
                id: "q0".to_string(),
                question: "Q".to_string(),
                answer: None,
                explanation: None,
                hint: None,
                correct_answer: vec![],
                options: vec![],
                nature: QuestionNature::ChooseOne,
                attachments: vec![
                    Attachment {
                        id: "a0".to_string(),
                        url: "img/x.png".to_string(),
                        kind: Default::default(),
                    },
                    Attachment {
                        id: "a1".to_string(),
                        url: "~/python/img/y.png".to_string(),
                        kind: Default::default(),
                    },
                ],
                set_id: None,
                quizz_id: None,
            }],
        };
        let document = QuizDocument {
            quizz: quiz,
            meta: QuizMeta {
                source: "python/python-quiz.md".to_string(),
                language: "en".to_string(),
                generated_at: String::new(),
                warnings: vec![],
            },
        };

        let result = consolidate(vec![source("python-quiz.json", document)], &opts()).unwrap();
        let attachments = &result.document.quizz.sets[0].questions[0].attachments;
        assert_eq!(attachments[0].url, "~/python/img/x.png");
        assert_eq!(attachments[1].url, "~/python/img/y.png");
        assert_eq!(result.normalized_urls, 1);
    }

    #[test]
    fn missing_identity_falls_back_to_directory_hash_and_fallback_creator() {
        let mut doc = parsed("python/python-quiz.md", "#### 1. Q\n- [x] a\n");
        doc.quizz.id = String::new();
        doc.quizz.title = String::new();
        doc.quizz.created_by_id = String::new();
        let result = consolidate(vec![source("python-quiz.json", doc)], &opts()).unwrap();
        assert_eq!(result.document.quizz.id, stable_id(&["quizz", "python"]));
        assert_eq!(result.document.quizz.slug, "python");
        assert_eq!(result.document.quizz.created_by_id, "seed-user");
    }

    #[test]
    fn filename_suffix_drives_language_when_metadata_is_empty() {
        let mut en = parsed("python/python-quiz.md", "## T\n\n#### 1. Q\n- [x] a\n");
        en.meta.language = String::new();
        let mut fr = parsed("python/python-quiz.md", "## T\n\n#### 1. Q\n- [x] a\n");
        fr.meta.language = String::new();

        let result = consolidate(
            vec![source("quiz-fr.json", fr), source("quiz-en.json", en)],
            &opts(),
        )
        .unwrap();
        assert_eq!(result.document.meta.languages, vec!["en", "fr"]);
    }

    #[test]
    fn moving_the_root_changes_urls_but_not_attachment_ids() {
        let make = |rel_dir: &str| {
            let mut doc = parsed("python/python-quiz.md", "## T\n\n#### 1. Q\n- [x] yes\n");
            doc.quizz.questions[0].attachments.push(Attachment {
                id: "att-0".to_string(),
                url: "img/a.png".to_string(),
                kind: Default::default(),
            });
            consolidate(
                vec![source("python-quiz.json", doc)],
                &ConsolidateOptions {
                    rel_dir: rel_dir.to_string(),
                    dir_name: "python".to_string(),
                    fallback_created_by: "seed-user".to_string(),
                },
            )
            .unwrap()
        };

        let near = make("python");
        let deep = make("content/python");
        let near_att = &near.document.quizz.sets[0].questions[0].attachments[0];
        let deep_att = &deep.document.quizz.sets[0].questions[0].attachments[0];
        assert_eq!(near_att.url, "~/python/img/a.png");
        assert_eq!(deep_att.url, "~/content/python/img/a.png");
        assert_eq!(near_att.id, deep_att.id);
    }

    #[test]
    fn warnings_concatenate_in_set_order() {
        let en = parsed("python/python-quiz.md", "## T\n\n#### 1. Q\nprose\n");
        let fr = parsed("python/python-quiz-fr.md", "## T\n\n#### 1. Q\n- [ ] a\n");
        let result = consolidate(
            vec![source("python-quiz-fr.json", fr), source("python-quiz.json", en)],
            &opts(),
        )
        .unwrap();
        assert_eq!(
            result.document.meta.warnings,
            vec![
                "Question 1 has no marked correct answers".to_string(),
                "Question 1 has no options".to_string(),
                "Question 1 has no marked correct answers".to_string(),
            ]
        );
    }
}
