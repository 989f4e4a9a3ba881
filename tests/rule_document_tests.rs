//! Rule documents parsed, bound and applied end to end.

use graft::dsl::{parse_rule_document, Registry};
use graft::{Page, Projector};
use serde_json::json;

#[test]
fn test_yaml_document_projects_thin() {
    let doc = parse_rule_document(
        r#"
fat: false
rules:
  - origin: id
  - origin: author.name
    field: author
    translate: uppercase
  - origin: comments.body
    field: comments.text
    filter: nonblank
  - origin: score
    type: integer
    default: 0
"#,
    )
    .expect("parse");
    let set = doc.bind(&Registry::with_builtins()).expect("bind");

    let source = json!({
        "id": 9,
        "secret": "hidden",
        "author": {"name": "ada"},
        "comments": [{"body": "hi", "at": 1}, {"body": "  ", "at": 2}]
    });
    let out = Projector::default().apply(&source, &set).unwrap();
    assert_eq!(
        out,
        json!({
            "id": 9,
            "author": "ADA",
            "comments": [{"text": "hi"}, {}],
            "score": 0
        })
    );
}

#[test]
fn test_json_document_defaults_to_fat() {
    let doc = parse_rule_document(r#"[{"origin": "a.b", "field": "c"}]"#).unwrap();
    let set = doc.bind(&Registry::new()).unwrap();
    let out = Projector::default()
        .apply(&json!({"a": [{"b": 1}, {"b": 2}]}), &set)
        .unwrap();
    assert_eq!(out, json!({"a": [{"b": 1}, {"b": 2}], "c": [1, 2]}));
}

#[test]
fn test_paged_rows_keep_their_count() {
    let doc = parse_rule_document("fat: false\nrules:\n  - origin: name\n").unwrap();
    let set = doc.bind(&Registry::new()).unwrap();
    let page = Page {
        rows: vec![json!({"name": "a", "x": 1}), json!({"name": "b", "x": 2})],
        count: 12,
    };
    let out = Projector::default().project_page(page, &set).unwrap();
    assert_eq!(out.count, 12);
    assert_eq!(out.rows, vec![json!({"name": "a"}), json!({"name": "b"})]);
}
