/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Wikipedia page summaries via the REST API.

use super::Summarizer;
use crate::error::ProcessorError;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Fetches the lead section of a Wikipedia page.
#[derive(Debug, Clone)]
pub struct WikipediaSummarizer {
    client: Client,
    /// Base URL with a `{lang}` placeholder for the language subdomain.
    base_url: String,
}

/// The part of the REST `page/summary` response we use.
#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: Option<String>,
}

impl WikipediaSummarizer {
    pub fn new(timeout: Duration) -> Result<Self, ProcessorError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rsta/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: "https://{lang}.wikipedia.org/api/rest_v1/page/summary/".to_string(),
        })
    }

    /// Point the client at another server, e.g. a mirror. `{lang}` is replaced
    /// by the requested language.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn page_url(&self, query: &str, language: &str) -> Result<Url, ProcessorError> {
        let fail = |message: String| ProcessorError::Summarizer {
            query: query.to_string(),
            message,
        };

        let valid = |c: char| c.is_ascii_alphanumeric() || c == '-';
        if language.is_empty() || !language.chars().all(valid) {
            return Err(fail(format!("invalid language code \"{}\"", language)));
        }

        let base = self.base_url.replace("{lang}", language);
        let mut url = Url::parse(&base).map_err(|e| fail(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| fail(format!("cannot use {} as a base URL", base)))?
            .pop_if_empty()
            .push(&query.trim().replace(' ', "_"));
        Ok(url)
    }
}

impl Summarizer for WikipediaSummarizer {
    fn summary(&self, query: &str, language: &str) -> Result<String, ProcessorError> {
        let url = self.page_url(query, language)?;
        log::info!("fetching summary for \"{}\" ({})", query, language);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProcessorError::Summarizer {
                query: query.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let page: PageSummary = response.json()?;
        match page.extract {
            Some(extract) if !extract.trim().is_empty() => Ok(extract),
            _ => Err(ProcessorError::Summarizer {
                query: query.to_string(),
                message: "page has no summary".to_string(),
            }),
        }
    }
}
