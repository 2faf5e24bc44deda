/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! External summarization sources.

pub mod wikipedia;

use crate::error::ProcessorError;

pub use wikipedia::WikipediaSummarizer;

/// A source of short plain-text descriptions for a search query.
///
/// Calls are blocking. Failures are returned as-is; callers treat them as
/// fatal to the build.
pub trait Summarizer {
    fn summary(&self, query: &str, language: &str) -> Result<String, ProcessorError>;
}

impl<S: Summarizer + ?Sized> Summarizer for &S {
    fn summary(&self, query: &str, language: &str) -> Result<String, ProcessorError> {
        (**self).summary(query, language)
    }
}

impl<S: Summarizer + ?Sized> Summarizer for Box<S> {
    fn summary(&self, query: &str, language: &str) -> Result<String, ProcessorError> {
        (**self).summary(query, language)
    }
}

/// A summarizer for builds that must not reach the network.
///
/// Every lookup fails, so only explicit descriptions and cached files can be
/// used.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSummarizer;

impl Summarizer for OfflineSummarizer {
    fn summary(&self, query: &str, _language: &str) -> Result<String, ProcessorError> {
        Err(ProcessorError::Summarizer {
            query: query.to_string(),
            message: "offline mode: no cached description".to_string(),
        })
    }
}
