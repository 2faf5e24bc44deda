use rsta_core::{ArticleConfig, Definition, Node, NodeKind, Placeholder};
use std::fs;

#[test]
fn test_project_config_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("article.yaml"),
        concat!(
            "project:\n  title: Crabs\n  author: Ferris\n",
            "latex:\n  dark: true\n",
            "linter:\n  custom-words: [Ferris, rustacean]\n",
        ),
    )
    .unwrap();

    let config = ArticleConfig::load_from_project(dir.path()).unwrap();
    assert_eq!(config.project.title, "Crabs");
    assert!(config.latex.dark);
    assert_eq!(config.latex.document_class, "article");
    assert_eq!(config.linter.custom_words, vec!["Ferris", "rustacean"]);
    assert_eq!(config.definitions.language, "en");
}

#[test]
fn test_project_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("article.json"),
        r#"{"definitions": {"cache-dir": "cache", "language": "de"}}"#,
    )
    .unwrap();

    let config = ArticleConfig::load_from_project(dir.path()).unwrap();
    assert_eq!(config.definitions.cache_dir.to_str(), Some("cache"));
    assert_eq!(config.definitions.language, "de");
}

#[test]
fn test_missing_config_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = ArticleConfig::load_from_project(dir.path()).unwrap();
    assert_eq!(config, ArticleConfig::default());
}

#[test]
fn test_invalid_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("article.yaml"), "latex: [not, a, map]\n").unwrap();
    assert!(ArticleConfig::load_from_project(dir.path()).is_err());
}

#[test]
fn test_definition_aliases_in_yaml() {
    let yaml =
        "short: AI\nlong: Artificial intelligence\ndesc: Machines that think.\nmax-sents: 2\n";
    let def: Definition = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(def.description.as_deref(), Some("Machines that think."));
    assert_eq!(def.max_sentences, Some(2));
}

#[test]
fn test_tree_json_shape() {
    let doc = Node::document(vec![Node::paragraph(vec![
        Node::text("Use "),
        Node::placeholder(Placeholder::abbreviation("AI", ":abbrev:`AI`")),
    ])]);

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["kind"], "document");
    assert_eq!(json["children"][0]["children"][0]["kind"]["text"], "Use ");

    let back: Node = serde_json::from_value(json).unwrap();
    assert!(matches!(back.children[0].children[1].kind, NodeKind::Placeholder(_)));
}
