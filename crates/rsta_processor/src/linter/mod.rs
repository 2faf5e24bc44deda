/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Prose and markup linting.
//!
//! Language checks run on the plain text reconstructed by
//! [`crate::extractor`]; syntax checks run on the raw source.

pub mod languagetool;
pub mod syntax;

use crate::error::ProcessorError;
use crate::extractor::rst_to_text;
use crate::parser::RstParser;
use indexmap::IndexSet;
use rsta_core::NodeKind;
use serde::Serialize;
use std::fmt;

pub use languagetool::LanguageToolClient;

/// One problem reported by a grammar checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch {
    pub message: String,
    /// Text surrounding the problem.
    pub context: String,
    /// Character offset of the problem inside `context`.
    pub offset_in_context: usize,
    /// Length of the problem in characters.
    pub error_length: usize,
    pub replacements: Vec<String>,
}

impl GrammarMatch {
    /// The offending span of `context`.
    pub fn actual(&self) -> String {
        self.context
            .chars()
            .skip(self.offset_in_context)
            .take(self.error_length)
            .collect()
    }
}

/// An external grammar-checking engine.
pub trait GrammarChecker {
    fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarMatch>, ProcessorError>;
}

impl<C: GrammarChecker + ?Sized> GrammarChecker for &C {
    fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarMatch>, ProcessorError> {
        (**self).check(text, language)
    }
}

impl<C: GrammarChecker + ?Sized> GrammarChecker for Box<C> {
    fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarMatch>, ProcessorError> {
        (**self).check(text, language)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageError {
    pub actual: String,
    pub message: String,
    pub context: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub line: usize,
    pub code: &'static str,
    pub description: String,
}

impl SyntaxError {
    pub fn new(line: usize, code: &'static str, description: impl Into<String>) -> Self {
        Self {
            line,
            code,
            description: description.into(),
        }
    }
}

/// Lints article sources. Each `lint_*` call replaces the previous results of
/// the same kind.
#[derive(Debug)]
pub struct Linter<C> {
    language: String,
    custom_dictionary: IndexSet<String>,
    checker: C,
    max_line_length: usize,
    syntax_errors: Vec<SyntaxError>,
    language_errors: Vec<LanguageError>,
}

impl<C: GrammarChecker> Linter<C> {
    pub fn new(checker: C, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            custom_dictionary: IndexSet::new(),
            checker,
            max_line_length: 79,
            syntax_errors: Vec::new(),
            language_errors: Vec::new(),
        }
    }

    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Words the grammar checker may not flag. Stored trimmed and lowercased.
    pub fn add_custom_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_dictionary
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    pub fn is_custom_word(&self, word: &str) -> bool {
        self.custom_dictionary.contains(&word.trim().to_lowercase())
    }

    /// Grammar-check `content`. Markup (`.rst`) is reduced to plain text first.
    pub fn lint_language(
        &mut self,
        content: &str,
        extension: &str,
    ) -> Result<&[LanguageError], ProcessorError> {
        let text = match extension.trim_start_matches('.') {
            "rst" => rst_to_text(content),
            _ => content.to_string(),
        };

        let matches = self.checker.check(&text, &self.language)?;
        let errors = matches
            .into_iter()
            .filter_map(|m| {
                let actual = m.actual();
                if self.is_custom_word(&actual) {
                    return None;
                }
                Some(LanguageError {
                    actual,
                    message: m.message,
                    context: m.context,
                    suggestions: m.replacements,
                })
            })
            .collect();

        self.language_errors = errors;
        Ok(&self.language_errors)
    }

    /// Style checks plus every diagnostic the front-end reports for `content`.
    pub fn lint_syntax(&mut self, content: &str) -> &[SyntaxError] {
        let mut errors = syntax::check(content, self.max_line_length);

        let doc = RstParser::article().parse_standalone(content);
        for node in doc.system_messages() {
            if let NodeKind::SystemMessage {
                level,
                message,
                line,
            } = &node.kind
            {
                errors.push(SyntaxError::new(
                    line.unwrap_or(0),
                    syntax::INVALID_MARKUP,
                    format!("({}) {}", level, message.replace('\n', " ")),
                ));
            }
        }

        errors.sort_by_key(|e| e.line);
        self.syntax_errors = errors;
        &self.syntax_errors
    }

    pub fn syntax_errors(&self) -> &[SyntaxError] {
        &self.syntax_errors
    }

    pub fn language_errors(&self) -> &[LanguageError] {
        &self.language_errors
    }

    pub fn has_errors(&self) -> bool {
        !self.syntax_errors.is_empty() || !self.language_errors.is_empty()
    }

    pub fn report(&self) -> Report<'_> {
        Report {
            syntax: &self.syntax_errors,
            language: &self.language_errors,
        }
    }
}

/// Human-readable lint results.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub syntax: &'a [SyntaxError],
    pub language: &'a [LanguageError],
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.syntax.is_empty() {
            writeln!(f, "+ No syntax errors")?;
        } else {
            writeln!(f, "# Syntax errors #")?;
            for error in self.syntax {
                writeln!(f, "{} | {} {}", error.line, error.code, error.description)?;
            }
        }

        if self.language.is_empty() {
            writeln!(f, "+ No language errors")?;
        } else {
            writeln!(f, "\n# Language errors #")?;
            for error in self.language {
                let top = &error.suggestions[..error.suggestions.len().min(3)];
                writeln!(
                    f,
                    "{} in \"{}\":\n\t{}\n\tSuggestions: {}",
                    error.message, error.actual, error.context, top.join(" | ")
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Flags every word in `words` found in the checked text.
    struct WordChecker {
        words: Vec<&'static str>,
        seen: RefCell<Vec<String>>,
    }

    impl WordChecker {
        fn new(words: &[&'static str]) -> Self {
            Self {
                words: words.to_vec(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl GrammarChecker for WordChecker {
        fn check(&self, text: &str, _language: &str) -> Result<Vec<GrammarMatch>, ProcessorError> {
            self.seen.borrow_mut().push(text.to_string());
            Ok(self
                .words
                .iter()
                .filter_map(|word| {
                    let byte = text.find(word)?;
                    Some(GrammarMatch {
                        message: "Possible spelling mistake found.".to_string(),
                        context: text.to_string(),
                        offset_in_context: text[..byte].chars().count(),
                        error_length: word.chars().count(),
                        replacements: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    })
                })
                .collect())
        }
    }

    #[test]
    fn test_custom_dictionary_filters_matches() {
        let mut linter = Linter::new(WordChecker::new(&["Ferris", "crbb"]), "en-US");
        linter.add_custom_words(["  ferris "]);

        let errors = linter.lint_language("Ferris is a crbb.", ".txt").unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].actual, "crbb");
    }

    #[test]
    fn test_rst_content_is_extracted_before_checking() {
        let checker = WordChecker::new(&[]);
        let mut linter = Linter::new(&checker, "en-US");
        linter
            .lint_language("Use :abbrev:`AI` *daily* now.\n", "rst")
            .unwrap();
        assert_eq!(checker.seen.borrow()[0], "Use daily now.");
    }

    #[test]
    fn test_lint_language_replaces_previous_results() {
        let mut linter = Linter::new(WordChecker::new(&["crbb"]), "en-US");
        assert_eq!(linter.lint_language("crbb", ".txt").unwrap().len(), 1);
        assert!(linter.lint_language("fine", ".txt").unwrap().is_empty());
    }

    #[test]
    fn test_lint_syntax_includes_markup_diagnostics() {
        let mut linter = Linter::new(WordChecker::new(&[]), "en-US");
        let errors = linter.lint_syntax("Use :unknown:`x` here. \n");
        let codes: Vec<&str> = errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![syntax::TRAILING_WHITESPACE, syntax::INVALID_MARKUP]
        );
        assert!(errors[1].description.contains("Unknown interpreted text role \"unknown\"."));
    }

    #[test]
    fn test_article_markup_is_valid_syntax() {
        let mut linter = Linter::new(WordChecker::new(&[]), "en-US");
        let src = ".. new-def:: AI\n   :long: Artificial intelligence\n\nUse :abbrev:`AI`.\n";
        assert!(linter.lint_syntax(src).is_empty());
    }

    #[test]
    fn test_report_format() {
        let mut linter = Linter::new(WordChecker::new(&["crbb"]), "en-US");
        linter.lint_language("A crbb.", ".txt").unwrap();

        assert_eq!(
            linter.report().to_string(),
            "+ No syntax errors\n\n# Language errors #\n\
             Possible spelling mistake found. in \"crbb\":\n\tA crbb.\n\tSuggestions: a | b | c\n"
        );
    }

    #[test]
    fn test_empty_report() {
        let linter = Linter::new(WordChecker::new(&[]), "en-US");
        assert_eq!(
            linter.report().to_string(),
            "+ No syntax errors\n+ No language errors\n"
        );
        assert!(!linter.has_errors());
    }
}
