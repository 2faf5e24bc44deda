/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

/// Fatal errors of a build or lint run.
///
/// Problems that only affect one reference (unknown keys, empty glossaries,
/// unknown roles) never surface here; they are rendered as visible markers in
/// the document instead.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("summary lookup for \"{query}\" failed: {message}")]
    Summarizer { query: String, message: String },

    #[error("grammar checker failed: {0}")]
    GrammarChecker(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(#[from] rsta_core::ConfigError),

    #[error("failed to parse {0}: {1}")]
    Parse(String, String),
}

impl From<serde_json::Error> for ProcessorError {
    fn from(e: serde_json::Error) -> Self {
        ProcessorError::Parse("JSON".to_string(), e.to_string())
    }
}
