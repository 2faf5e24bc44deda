/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use rsta_core::{BuildState, Definition, Node};
use rsta_processor::{DescriptionResolver, ProcessorError, Resolver, RstParser, Summarizer};
use std::cell::RefCell;
use std::fs;
use std::path::Path;

// --- Helper Functions for Test Data Construction ---

/// A definition with short and long forms and an explicit description.
pub fn make_definition(short: &str, long: &str, description: &str) -> Definition {
    Definition {
        short: Some(short.to_string()),
        long: Some(long.to_string()),
        description: Some(description.to_string()),
        ..Default::default()
    }
}

/// A definition whose description comes from a summary lookup.
pub fn make_searched_definition(short: &str, search: &str) -> Definition {
    Definition {
        short: Some(short.to_string()),
        search: Some(search.to_string()),
        ..Default::default()
    }
}

/// Write `files` (relative path, content) below `root`.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Parse every source with one state and resolve without network access.
pub fn parse_and_resolve(sources: &[&str], cache_dir: &Path) -> (Vec<Node>, BuildState) {
    let parser = RstParser::article();
    let mut state = BuildState::default();
    let mut docs: Vec<Node> = sources
        .iter()
        .map(|s| parser.parse(s, &mut state))
        .collect();

    let resolver = Resolver::new(DescriptionResolver::new(CannedSummarizer::default(), cache_dir));
    for doc in &mut docs {
        resolver.resolve(doc, &mut state).unwrap();
    }
    (docs, state)
}

/// Returns a fixed summary per query and records every call.
#[derive(Debug, Default)]
pub struct CannedSummarizer {
    pub summaries: Vec<(String, String)>,
    pub calls: RefCell<Vec<String>>,
}

impl CannedSummarizer {
    pub fn with(query: &str, summary: &str) -> Self {
        Self {
            summaries: vec![(query.to_string(), summary.to_string())],
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Summarizer for CannedSummarizer {
    fn summary(&self, query: &str, _language: &str) -> Result<String, ProcessorError> {
        self.calls.borrow_mut().push(query.to_string());
        self.summaries
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| ProcessorError::Summarizer {
                query: query.to_string(),
                message: "no canned summary".to_string(),
            })
    }
}
