/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Term definitions registered by the `new-def` directive.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A glossary or abbreviation entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub struct Definition {
    /// Short form, e.g. "AI". Falls back to the key when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Long form, e.g. "Artificial intelligence".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Explicit description; takes precedence over `search`.
    #[serde(skip_serializing_if = "Option::is_none", alias = "desc")]
    pub description: Option<String>,
    /// Query sent to the summarization source when no description is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Language code for the summarization source.
    #[serde(skip_serializing_if = "Option::is_none", alias = "lang")]
    pub language: Option<String>,
    /// Keep at most this many sentences of the description. 0 means no limit.
    #[serde(skip_serializing_if = "Option::is_none", alias = "max-sents")]
    pub max_sentences: Option<usize>,
}

/// A `new-def` option that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionOptionError {
    #[error("unknown option \"{0}\"")]
    UnknownOption(String),
    #[error("invalid value for \"{option}\": \"{value}\" is not a non-negative integer")]
    InvalidInteger { option: String, value: String },
}

impl Definition {
    /// Build a definition from directive options.
    ///
    /// Accepts the aliases `desc`, `lang` and `max_sents`. When both an alias
    /// and its canonical name are given, the canonical name wins.
    pub fn from_options<'a, I>(options: I) -> Result<Self, DefinitionOptionError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut def = Definition::default();
        let mut desc_alias = None;
        let mut lang_alias = None;
        let mut max_alias = None;

        for (name, value) in options {
            let value = value.trim();
            let text = (!value.is_empty()).then(|| value.to_string());
            match name {
                "short" => def.short = text,
                "long" => def.long = text,
                "description" => def.description = text,
                "desc" => desc_alias = text,
                "search" => def.search = text,
                "language" => def.language = text,
                "lang" => lang_alias = text,
                "max_sentences" => def.max_sentences = Some(parse_count(name, value)?),
                "max_sents" => max_alias = Some(parse_count(name, value)?),
                other => return Err(DefinitionOptionError::UnknownOption(other.to_string())),
            }
        }

        def.description = def.description.or(desc_alias);
        def.language = def.language.or(lang_alias);
        def.max_sentences = def.max_sentences.or(max_alias);
        Ok(def)
    }

    /// Short form, falling back to the registry key.
    pub fn short_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.short
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(key)
    }

    /// Long form, if one is set and not empty.
    pub fn long_form(&self) -> Option<&str> {
        self.long.as_deref().filter(|l| !l.is_empty())
    }

    /// Heading used for this term in the rendered glossary.
    pub fn glossary_term(&self, key: &str) -> String {
        match self.long_form() {
            Some(long) => format!("{} ({})", long, self.short_or(key)),
            None => self.short_or(key).to_string(),
        }
    }
}

fn parse_count(option: &str, value: &str) -> Result<usize, DefinitionOptionError> {
    value
        .parse::<usize>()
        .map_err(|_| DefinitionOptionError::InvalidInteger {
            option: option.to_string(),
            value: value.to_string(),
        })
}
