/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Glossary description resolution with an on-disk cache.
//!
//! A cached file is ground truth: once `<cache_dir>/<query>.txt` exists the
//! summarization source is never asked about that query again. Deleting the
//! file is the only way to refresh it.

use crate::error::ProcessorError;
use crate::summary::Summarizer;
use regex::Regex;
use rsta_core::Definition;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static REFERENCE_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\[\d+\]|\x{200B})").expect("reference marker pattern"));

/// A period followed by anything but another period.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^.]").expect("sentence boundary pattern"));

/// Resolves the description shown for a glossary entry.
#[derive(Debug, Clone)]
pub struct DescriptionResolver<S> {
    summarizer: S,
    cache_dir: PathBuf,
    default_language: String,
}

impl<S: Summarizer> DescriptionResolver<S> {
    pub fn new(summarizer: S, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            summarizer,
            cache_dir: cache_dir.into(),
            default_language: "en".to_string(),
        }
    }

    /// Language used when a definition does not name one.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache file for a search query.
    pub fn cache_path(&self, query: &str) -> PathBuf {
        self.cache_dir.join(cache_file_name(query))
    }

    /// The description for `definition`, or `None` when it has neither an
    /// explicit description nor a search query.
    pub fn resolve(&self, definition: &Definition) -> Result<Option<String>, ProcessorError> {
        let description = match (&definition.description, &definition.search) {
            (Some(description), _) => description.clone(),
            (None, None) => return Ok(None),
            (None, Some(query)) => self.lookup(query, definition.language.as_deref())?,
        };

        Ok(Some(match definition.max_sentences {
            Some(max) if max > 0 => truncate_sentences(&description, max),
            _ => description,
        }))
    }

    fn lookup(&self, query: &str, language: Option<&str>) -> Result<String, ProcessorError> {
        let path = self.cache_path(query);
        match fs::read_to_string(&path) {
            Ok(cached) => {
                log::debug!("description cache hit: {}", path.display());
                return Ok(cached);
            }
            Err(e) => log::debug!("description cache miss: {} ({})", path.display(), e),
        }

        let language = language.unwrap_or(&self.default_language);
        let raw = self.summarizer.summary(query, language)?;
        let description = clean_summary(&raw);

        fs::create_dir_all(&self.cache_dir)?;
        fs::write(&path, &description)?;
        Ok(description)
    }
}

/// File name of the cache entry for `query`.
pub fn cache_file_name(query: &str) -> String {
    format!("{}.txt", query.replace('/', "_"))
}

/// Strip reference markers, join lines and trim.
pub fn clean_summary(raw: &str) -> String {
    REFERENCE_MARKERS
        .replace_all(raw, "")
        .replace('\n', " ")
        .trim()
        .to_string()
}

/// Keep the text up to and including the period of the `max`-th sentence
/// boundary. Text with fewer boundaries is returned unchanged.
///
/// Boundaries are naive: "e.g. this" counts two of them.
pub fn truncate_sentences(text: &str, max: usize) -> String {
    if max == 0 {
        return text.to_string();
    }
    match SENTENCE_BOUNDARY.find_iter(text).nth(max - 1) {
        Some(boundary) => text[..boundary.start() + 1].to_string(),
        None => text.to_string(),
    }
}
