//! Type coercion applied through the projector.

use graft::{CoercionKind, CoercionTable, Error, Projector, ProjectorConfig, Rule};
use serde_json::{json, Value};

fn project(source: Value, rule: Rule) -> Value {
    Projector::default()
        .project(&source, &[rule], true)
        .expect("projection")
}

#[test]
fn test_integer_coercion() {
    assert_eq!(
        project(json!({"n": "42"}), Rule::new("n").kind(CoercionKind::Integer)),
        json!({"n": 42})
    );
    // Non-numeric text becomes the null sentinel rather than an error.
    assert_eq!(
        project(json!({"n": "abc"}), Rule::new("n").kind(CoercionKind::Integer)),
        json!({"n": null})
    );
}

#[test]
fn test_translate_runs_before_coercion() {
    let rule = Rule::new("width")
        .translate(|v| json!(v.as_str().unwrap_or_default().trim_end_matches("px")))
        .kind(CoercionKind::Number);
    assert_eq!(project(json!({"width": "12.5px"}), rule), json!({"width": 12.5}));
}

#[test]
fn test_number_coercion_over_fan_out() {
    let out = Projector::default()
        .project(
            &json!({"xs": [{"p": "1.5"}, {"p": "2"}]}),
            &[Rule::new("xs.p").to("prices").kind(CoercionKind::Number)],
            false,
        )
        .unwrap();
    assert_eq!(out, json!({"prices": [1.5, 2]}));
}

#[test]
fn test_date_coercions() {
    assert_eq!(
        project(
            json!({"at": "2024-01-02T03:04:05Z"}),
            Rule::new("at").kind(CoercionKind::Datetime)
        ),
        json!({"at": "2024-01-02 03:04"})
    );
    assert_eq!(
        project(json!({"on": 86_400_000}), Rule::new("on").kind(CoercionKind::Date)),
        json!({"on": "1970-01-02"})
    );
    assert_eq!(
        project(json!({"on": "soon"}), Rule::new("on").kind(CoercionKind::Date)),
        json!({"on": "Invalid date"})
    );
}

#[test]
fn test_configured_date_pattern() {
    let projector = Projector::new(ProjectorConfig {
        date_format: "%d/%m/%Y".into(),
        ..Default::default()
    })
    .unwrap();
    let out = projector
        .project(
            &json!({"d": "2024-03-09"}),
            &[Rule::new("d").kind(CoercionKind::Date)],
            true,
        )
        .unwrap();
    assert_eq!(out, json!({"d": "09/03/2024"}));
}

#[test]
fn test_structural_coercions() {
    assert_eq!(
        project(json!({"tags": "a,b,c"}), Rule::new("tags").kind(CoercionKind::Array)),
        json!({"tags": ["a", "b", "c"]})
    );
    assert_eq!(
        project(json!({"meta": {"k": 1}}), Rule::new("meta").kind(CoercionKind::String)),
        json!({"meta": "{\"k\":1}"})
    );
    assert_eq!(
        project(
            json!({"raw": "{\"a\":1}"}),
            Rule::new("raw").to("parsed").kind(CoercionKind::Object)
        ),
        json!({"raw": "{\"a\":1}", "parsed": {"a": 1}})
    );
    assert_eq!(
        project(json!({"secret": "x"}), Rule::new("secret").kind(CoercionKind::Empty)),
        json!({"secret": null})
    );
}

#[test]
fn test_unparsable_object_text_is_an_error() {
    let err = Projector::default()
        .project(
            &json!({"raw": "{nope"}),
            &[Rule::new("raw").kind(CoercionKind::Object)],
            true,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Coerce {
            kind: CoercionKind::Object,
            ..
        }
    ));
}

#[test]
fn test_injected_coercion_table() {
    let mut table = CoercionTable::default();
    table.register(CoercionKind::Integer, |v| {
        v.as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .ok_or_else(|| Error::Coerce {
                kind: CoercionKind::Integer,
                reason: format!("{v} is not an integer"),
            })
    });
    let strict = Projector::with_coercions(ProjectorConfig::default(), table);
    let rules = [Rule::new("n").kind(CoercionKind::Integer)];

    assert_eq!(strict.project(&json!({"n": "7"}), &rules, true).unwrap(), json!({"n": 7}));
    assert!(strict.project(&json!({"n": "7a"}), &rules, true).is_err());
}
