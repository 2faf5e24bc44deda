/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The deferred reference resolution pass.
//!
//! Runs once per document tree after every source of the build has been
//! read, so the registry is complete. Placeholders are replaced in document
//! order and the seen-sets in [`BuildState`] decide long versus short forms.
//! Bad references never abort the pass: they turn into visible markers.

use crate::description::DescriptionResolver;
use crate::error::ProcessorError;
use crate::summary::Summarizer;
use rsta_core::{BuildState, Node, NodeKind, Placeholder, PlaceholderKind};

/// Marker text for a term list rendered from an empty registry.
pub const EMPTY_TERM_LIST: &str = "Definitions is empty";

/// Marker text for an abbreviation with no registered definition.
pub fn unresolved_marker(key: &str) -> String {
    format!("No definition for {}", key)
}

/// What a resolution pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Abbreviation placeholders replaced with a term.
    pub abbreviations: usize,
    /// First citations emitted.
    pub citations: usize,
    /// Repeated first-citation uses removed.
    pub repeated_citations: usize,
    /// Term lists rendered (including empty markers).
    pub term_lists: usize,
    /// Keys with no definition, in document order.
    pub unresolved: Vec<String>,
}

impl ResolveReport {
    pub fn merge(&mut self, other: ResolveReport) {
        self.abbreviations += other.abbreviations;
        self.citations += other.citations;
        self.repeated_citations += other.repeated_citations;
        self.term_lists += other.term_lists;
        self.unresolved.extend(other.unresolved);
    }
}

/// Replaces placeholders with final content.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    descriptions: DescriptionResolver<S>,
}

impl<S: Summarizer> Resolver<S> {
    pub fn new(descriptions: DescriptionResolver<S>) -> Self {
        Self { descriptions }
    }

    /// Resolve every placeholder in `doc`.
    ///
    /// Only description lookups can fail; such an error aborts the pass.
    pub fn resolve(
        &self,
        doc: &mut Node,
        state: &mut BuildState,
    ) -> Result<ResolveReport, ProcessorError> {
        let mut report = ResolveReport::default();

        if let NodeKind::Placeholder(placeholder) = &doc.kind {
            let placeholder = placeholder.clone();
            let replacement = self.replace(&placeholder, state, &mut report)?;
            *doc = Node::document(replacement);
            return Ok(report);
        }

        self.resolve_children(doc, state, &mut report)?;
        Ok(report)
    }

    fn resolve_children(
        &self,
        node: &mut Node,
        state: &mut BuildState,
        report: &mut ResolveReport,
    ) -> Result<(), ProcessorError> {
        let children = std::mem::take(&mut node.children);
        let mut resolved = Vec::with_capacity(children.len());

        for mut child in children {
            if let NodeKind::Placeholder(placeholder) = &child.kind {
                let placeholder = placeholder.clone();
                resolved.extend(self.replace(&placeholder, state, report)?);
            } else {
                self.resolve_children(&mut child, state, report)?;
                resolved.push(child);
            }
        }

        node.children = resolved;
        Ok(())
    }

    fn replace(
        &self,
        placeholder: &Placeholder,
        state: &mut BuildState,
        report: &mut ResolveReport,
    ) -> Result<Vec<Node>, ProcessorError> {
        match placeholder.kind {
            PlaceholderKind::Abbreviation => {
                Ok(vec![abbreviation(&placeholder.key, state, report)])
            }
            PlaceholderKind::FirstCite => {
                let cite = first_cite(&placeholder.key, state, report);
                Ok(cite.into_iter().collect())
            }
            PlaceholderKind::TermList => {
                report.term_lists += 1;
                Ok(vec![self.term_list(state)?])
            }
        }
    }

    fn term_list(&self, state: &BuildState) -> Result<Node, ProcessorError> {
        if state.registry.is_empty() {
            log::info!("No definitions");
            return Ok(Node::literal(EMPTY_TERM_LIST));
        }

        let mut items = Vec::new();
        for (key, definition) in state.registry.iter() {
            let description = match self.descriptions.resolve(definition)? {
                Some(d) if !d.trim().is_empty() => d,
                _ => {
                    log::debug!("skipping {}: no description", key);
                    continue;
                }
            };

            items.push(Node::with_children(
                NodeKind::DefinitionListItem,
                vec![
                    Node::with_children(
                        NodeKind::Term,
                        vec![Node::text(definition.glossary_term(key))],
                    ),
                    Node::with_children(
                        NodeKind::Definition,
                        vec![Node::paragraph(vec![Node::text(description)])],
                    ),
                ],
            ));
        }

        Ok(Node::with_children(NodeKind::DefinitionList, items))
    }
}

fn abbreviation(key: &str, state: &mut BuildState, report: &mut ResolveReport) -> Node {
    let Some(definition) = state.registry.get(key) else {
        match closest_key(key, state) {
            Some(hint) => log::warn!("no definition for \"{}\" (did you mean \"{}\"?)", key, hint),
            None => log::warn!("no definition for \"{}\"", key),
        }
        report.unresolved.push(key.to_string());
        return Node::literal(unresolved_marker(key));
    };

    report.abbreviations += 1;
    let short = definition.short_or(key);
    match definition.long_form() {
        Some(long) if !state.abbreviations.contains(key) => {
            let text = format!("{} ({})", long, short);
            state.abbreviations.insert(key);
            Node::text(text)
        }
        _ => Node::text(short),
    }
}

fn first_cite(key: &str, state: &mut BuildState, report: &mut ResolveReport) -> Option<Node> {
    if !state.citations.insert(key) {
        report.repeated_citations += 1;
        return None;
    }
    report.citations += 1;
    Some(Node::with_children(
        NodeKind::CitationReference {
            refname: key.to_string(),
        },
        vec![Node::text(key)],
    ))
}

fn closest_key<'a>(key: &str, state: &'a BuildState) -> Option<&'a str> {
    state
        .registry
        .keys()
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::OfflineSummarizer;
    use rsta_core::Definition;

    fn resolver() -> Resolver<OfflineSummarizer> {
        Resolver::new(DescriptionResolver::new(OfflineSummarizer, "unused-cache"))
    }

    fn state_with_ai() -> BuildState {
        let mut state = BuildState::default();
        state.registry.register(
            "AI",
            Definition {
                short: Some("AI".to_string()),
                long: Some("Artificial intelligence".to_string()),
                description: Some("Machines that think.".to_string()),
                ..Default::default()
            },
        );
        state
    }

    fn abbrev(key: &str) -> Node {
        Node::placeholder(Placeholder::abbreviation(key, &format!(":abbrev:`{}`", key)))
    }

    #[test]
    fn test_first_use_is_long_then_short() {
        let mut state = state_with_ai();
        let mut doc = Node::document(vec![
            Node::paragraph(vec![abbrev("AI")]),
            Node::paragraph(vec![abbrev("AI")]),
        ]);

        let report = resolver().resolve(&mut doc, &mut state).unwrap();

        assert_eq!(doc.children[0].as_text(), "Artificial intelligence (AI)");
        assert_eq!(doc.children[1].as_text(), "AI");
        assert_eq!(report.abbreviations, 2);
        assert!(doc.placeholders().is_empty());
    }

    #[test]
    fn test_unknown_key_is_marker_and_leaves_seen_set() {
        let mut state = state_with_ai();
        let mut doc = Node::paragraph(vec![abbrev("ML")]);

        let report = resolver().resolve(&mut doc, &mut state).unwrap();

        assert_eq!(doc.children[0].kind, NodeKind::Literal);
        assert_eq!(doc.as_text(), "No definition for ML");
        assert_eq!(report.unresolved, vec!["ML".to_string()]);
        assert!(state.abbreviations.is_empty());
    }

    #[test]
    fn test_no_long_form_uses_short_and_key_fallback() {
        let mut state = BuildState::default();
        state.registry.register("GPU", Definition::default());
        let mut doc = Node::paragraph(vec![abbrev("GPU")]);

        resolver().resolve(&mut doc, &mut state).unwrap();

        assert_eq!(doc.as_text(), "GPU");
        assert!(!state.abbreviations.contains("GPU"));
    }

    #[test]
    fn test_empty_long_form_is_treated_as_missing() {
        let mut state = BuildState::default();
        state.registry.register(
            "AI",
            Definition {
                short: Some("AI".to_string()),
                long: Some(String::new()),
                ..Default::default()
            },
        );
        let mut doc = Node::paragraph(vec![abbrev("AI")]);

        resolver().resolve(&mut doc, &mut state).unwrap();

        assert_eq!(doc.as_text(), "AI");
        assert!(!state.abbreviations.contains("AI"));
    }

    #[test]
    fn test_first_cite_only_once() {
        let mut state = BuildState::default();
        let mut doc = Node::paragraph(vec![
            Node::placeholder(Placeholder::first_cite("kuhn1962", ":fcite:`kuhn1962`")),
            Node::text(" and again "),
            Node::placeholder(Placeholder::first_cite("kuhn1962", ":fcite:`kuhn1962`")),
        ]);

        let report = resolver().resolve(&mut doc, &mut state).unwrap();

        assert_eq!(doc.children.len(), 2);
        assert_eq!(
            doc.children[0].kind,
            NodeKind::CitationReference {
                refname: "kuhn1962".to_string()
            }
        );
        assert_eq!(report.citations, 1);
        assert_eq!(report.repeated_citations, 1);
    }

    #[test]
    fn test_empty_registry_term_list_marker() {
        let mut state = BuildState::default();
        let mut doc = Node::document(vec![Node::placeholder(Placeholder::term_list())]);

        resolver().resolve(&mut doc, &mut state).unwrap();

        assert_eq!(doc.children[0].kind, NodeKind::Literal);
        assert_eq!(doc.as_text(), EMPTY_TERM_LIST);
    }

    #[test]
    fn test_term_list_follows_registry_order_and_skips_undescribed() {
        let mut state = BuildState::default();
        state.registry.register(
            "ML",
            Definition {
                long: Some("Machine learning".to_string()),
                description: Some("Learning from data.".to_string()),
                ..Default::default()
            },
        );
        state.registry.register("GPU", Definition::default());
        state.registry.register(
            "AI",
            Definition {
                short: Some("AI".to_string()),
                long: Some("Artificial intelligence".to_string()),
                description: Some("Machines that think. And learn.".to_string()),
                max_sentences: Some(1),
                ..Default::default()
            },
        );
        let mut doc = Node::document(vec![Node::placeholder(Placeholder::term_list())]);

        resolver().resolve(&mut doc, &mut state).unwrap();

        let list = &doc.children[0];
        assert_eq!(list.kind, NodeKind::DefinitionList);
        assert_eq!(list.children.len(), 2);
        assert_eq!(
            list.children[0].children[0].as_text(),
            "Machine learning (ML)"
        );
        assert_eq!(
            list.children[1].children[0].as_text(),
            "Artificial intelligence (AI)"
        );
        assert_eq!(
            list.children[1].children[1].as_text(),
            "Machines that think."
        );
    }

    #[test]
    fn test_term_list_lookup_failure_is_fatal() {
        let mut state = BuildState::default();
        state.registry.register(
            "Rust",
            Definition {
                search: Some("Rust (programming language)".to_string()),
                ..Default::default()
            },
        );
        let dir = tempfile::tempdir().unwrap();
        let resolver = Resolver::new(DescriptionResolver::new(OfflineSummarizer, dir.path()));
        let mut doc = Node::document(vec![Node::placeholder(Placeholder::term_list())]);

        assert!(resolver.resolve(&mut doc, &mut state).is_err());
    }

    #[test]
    fn test_closest_key_hint() {
        let state = state_with_ai();
        assert_eq!(closest_key("A1", &state), Some("AI"));
        assert_eq!(closest_key("Blockchain", &state), None);
    }
}
