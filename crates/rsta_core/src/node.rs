/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Document tree model.
//!
//! The tree is deliberately uniform: every node is a [`NodeKind`] plus an
//! ordered list of children. Only [`NodeKind::Text`] leaves carry prose; all
//! other kinds are structure. Passes classify nodes by matching on the kind
//! instead of dispatching per node type.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic embedded in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemLevel {
    Info,
    Warning,
    Error,
    Severe,
}

impl std::fmt::Display for SystemLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemLevel::Info => write!(f, "INFO"),
            SystemLevel::Warning => write!(f, "WARNING"),
            SystemLevel::Error => write!(f, "ERROR"),
            SystemLevel::Severe => write!(f, "SEVERE"),
        }
    }
}

/// What a placeholder stands for until the resolution pass replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderKind {
    /// `:abbrev:` role use; long form on first use, short form afterwards.
    Abbreviation,
    /// `:fcite:` role use; a citation on first use, nothing afterwards.
    FirstCite,
    /// `.. definitions::` directive; the rendered glossary.
    TermList,
}

/// A deferred reference inserted at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    /// Term or citation key. Empty for term lists.
    pub key: String,
    /// Original markup, kept for diagnostics.
    pub raw: String,
}

impl Placeholder {
    pub fn abbreviation(key: &str, raw: &str) -> Self {
        Self {
            kind: PlaceholderKind::Abbreviation,
            key: key.to_string(),
            raw: raw.to_string(),
        }
    }

    pub fn first_cite(key: &str, raw: &str) -> Self {
        Self {
            kind: PlaceholderKind::FirstCite,
            key: key.to_string(),
            raw: raw.to_string(),
        }
    }

    pub fn term_list() -> Self {
        Self {
            kind: PlaceholderKind::TermList,
            key: String::new(),
            raw: String::new(),
        }
    }
}

/// Horizontal placement of a floating figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FigureAlign {
    Left,
    Right,
    #[default]
    Center,
}

impl std::str::FromStr for FigureAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(FigureAlign::Left),
            "right" => Ok(FigureAlign::Right),
            "center" => Ok(FigureAlign::Center),
            other => Err(format!(
                "\"{}\" unknown; choose from \"right\", \"left\", \"center\"",
                other
            )),
        }
    }
}

/// Options of a `floating-figure` directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default)]
    pub align: FigureAlign,
}

/// The kind of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Document,
    /// Section with nesting depth (1 = top level).
    Section { depth: usize },
    Title,
    Paragraph,
    BulletList,
    ListItem,
    Emphasis,
    Strong,
    Literal,
    LiteralBlock,
    /// Markup the front-end could not interpret; children hold the raw text.
    Problematic,
    /// Diagnostic emitted while reading the document.
    SystemMessage {
        level: SystemLevel,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
    Placeholder(Placeholder),
    DefinitionList,
    DefinitionListItem,
    Term,
    Definition,
    CitationReference { refname: String },
    FloatingFigure(Figure),
    Image { uri: String },
    Caption,
    NewPage { pages: usize },
    Target { name: String },
    /// Prose leaf.
    Text(String),
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(s.into()))
    }

    /// An inline literal holding `s`. Also used for error markers.
    pub fn literal(s: impl Into<String>) -> Self {
        Self::with_children(NodeKind::Literal, vec![Self::text(s)])
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::with_children(NodeKind::Paragraph, children)
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::with_children(NodeKind::Document, children)
    }

    pub fn system_message(
        level: SystemLevel,
        message: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        Self::new(NodeKind::SystemMessage {
            level,
            message: message.into(),
            line,
        })
    }

    pub fn placeholder(placeholder: Placeholder) -> Self {
        Self::new(NodeKind::Placeholder(placeholder))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Concatenated text of all leaves below this node.
    pub fn as_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text(s) = &self.kind {
            out.push_str(s);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// All placeholders still present in the tree, in document order.
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let mut found = Vec::new();
        crate::traverse::walk(self, &mut |node| {
            if let NodeKind::Placeholder(p) = &node.kind {
                found.push(p);
            }
        });
        found
    }

    /// All diagnostics in the tree, in document order.
    pub fn system_messages(&self) -> Vec<&Node> {
        let mut found = Vec::new();
        crate::traverse::walk(self, &mut |node| {
            if matches!(node.kind, NodeKind::SystemMessage { .. }) {
                found.push(node);
            }
        });
        found
    }

    /// Whether any node in the tree satisfies `pred`.
    pub fn contains(&self, pred: impl Fn(&NodeKind) -> bool + Copy) -> bool {
        pred(&self.kind) || self.children.iter().any(|c| c.contains(pred))
    }
}
