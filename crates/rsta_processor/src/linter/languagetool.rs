/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! LanguageTool HTTP client.

use super::{GrammarChecker, GrammarMatch};
use crate::error::ProcessorError;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Talks to a LanguageTool server (`/v2/check`).
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    client: Client,
    server: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    message: String,
    #[serde(default)]
    replacements: Vec<Replacement>,
    context: MatchContext,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct MatchContext {
    text: String,
    offset: usize,
    length: usize,
}

impl From<RawMatch> for GrammarMatch {
    fn from(raw: RawMatch) -> Self {
        GrammarMatch {
            message: raw.message,
            context: raw.context.text,
            offset_in_context: raw.context.offset,
            error_length: raw.context.length,
            replacements: raw.replacements.into_iter().map(|r| r.value).collect(),
        }
    }
}

/// Decode a `/v2/check` response body.
pub fn parse_response(body: &str) -> Result<Vec<GrammarMatch>, ProcessorError> {
    let response: CheckResponse = serde_json::from_str(body)?;
    Ok(response
        .matches
        .into_iter()
        .map(GrammarMatch::from)
        .collect())
}

impl LanguageToolClient {
    pub fn new(server: impl Into<String>, timeout: Duration) -> Result<Self, ProcessorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            server: server.into(),
        })
    }

    pub fn check_url(&self) -> String {
        format!("{}/v2/check", self.server.trim_end_matches('/'))
    }
}

impl GrammarChecker for LanguageToolClient {
    fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarMatch>, ProcessorError> {
        log::debug!("checking {} chars with {}", text.len(), self.server);
        let response = self
            .client
            .post(self.check_url())
            .form(&[("text", text), ("language", language)])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ProcessorError::GrammarChecker(format!("HTTP {}: {}", status, body.trim())));
        }
        parse_response(&body)
    }
}
