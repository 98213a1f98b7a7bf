use guideflow::rules::{Rules, BUNDLED_RULES_JSON};
use guideflow::validation::{
    bundled_schema, check_graph, validate, GraphIssue, ValidationStage,
};
use serde_json::{json, Value};

fn document(steps: Value) -> Value {
    json!({
        "meta": {"version": "2.0.0", "lastReviewed": "2025-06-30", "approvedBy": "Board"},
        "resources": {
            "stepExternal": {"start": "https://example.org"},
            "popups": {"glossary": {"title": "Glossary", "body": "<p>Terms</p>"}}
        },
        "steps": steps
    })
}

fn schema() -> Value {
    bundled_schema().expect("bundled schema parses")
}

#[test]
fn bundled_document_passes_both_stages() {
    let document: Value = serde_json::from_str(BUNDLED_RULES_JSON).expect("bundled json");
    validate(&document, &schema()).expect("bundled document validates");
    Rules::bundled().expect("bundled document loads");
}

#[test]
fn dangling_button_target_names_both_ids() {
    let document = document(json!([
        {"id": "start", "title": "Start", "instruction": "Go",
         "buttons": [{"label": "Next", "next": "missing_step"}]}
    ]));

    let report = validate(&document, &schema()).expect_err("dangling target");

    assert!(report.schema.is_empty());
    assert_eq!(report.dangling_targets(), vec![("start", "missing_step")]);
    assert_eq!(report.failed_stages(), vec![ValidationStage::Graph]);
}

#[test]
fn embedded_anchors_in_description_and_instruction_are_checked() {
    let document = document(json!([
        {"id": "start", "title": "Start",
         "instruction": "Read <a data-next=\"gone\">this</a>",
         "description": "<span data-next='s2'>ok</span> <span data-next='__back__'>back</span>",
         "buttons": [{"label": "Next", "next": "s2"}]},
        {"id": "s2", "title": "Two", "instruction": "<b data-next=\"also_gone\">x</b>"}
    ]));

    let report = validate(&document, &schema()).expect_err("dangling anchors");

    assert_eq!(
        report.dangling_targets(),
        vec![("start", "gone"), ("s2", "also_gone")]
    );
}

#[test]
fn schema_violations_are_all_collected() {
    let document = json!({
        "meta": {"version": "1"},
        "resources": {"stepExternal": {}, "popups": {}},
        "steps": [
            {"id": "start", "instruction": "Go"},
            {"id": "s2", "title": 7, "instruction": "Go",
             "buttons": [{"label": "", "next": "start"}]}
        ]
    });

    let report = validate(&document, &schema()).expect_err("schema failures");

    let paths = report
        .schema
        .iter()
        .map(|violation| violation.path.as_str())
        .collect::<Vec<_>>();
    assert!(paths.contains(&"/meta"), "paths: {paths:?}");
    assert!(paths.contains(&"/steps/0"), "paths: {paths:?}");
    assert!(paths.contains(&"/steps/1/title"), "paths: {paths:?}");
    assert!(
        paths.contains(&"/steps/1/buttons/0/label"),
        "paths: {paths:?}"
    );
    assert!(report.schema.len() >= 5, "violations: {:?}", report.schema);
    assert!(report.graph.is_empty());
}

#[test]
fn both_stages_report_together() {
    let document = document(json!([
        {"id": "start", "instruction": "Go",
         "buttons": [{"label": "Next", "next": "nowhere"}]}
    ]));

    let report = validate(&document, &schema()).expect_err("both stages fail");

    assert_eq!(
        report.failed_stages(),
        vec![ValidationStage::Schema, ValidationStage::Graph]
    );
    assert_eq!(report.dangling_targets(), vec![("start", "nowhere")]);
}

#[test]
fn dangling_popup_keys_are_reported() {
    let document = document(json!([
        {"id": "start", "title": "Start",
         "instruction": "See <a data-popup=\"glossary\">terms</a> and <a data-popup='faq'>faq</a>"}
    ]));

    let issues = check_graph(&document);

    assert_eq!(
        issues,
        vec![GraphIssue::DanglingPopup {
            from: "start".to_string(),
            key: "faq".to_string()
        }]
    );
}

#[test]
fn unknown_sentinels_duplicates_and_missing_start_are_graph_issues() {
    let document = document(json!([
        {"id": "intro", "title": "Intro", "instruction": "Go",
         "buttons": [{"label": "Restart", "next": "__restart__"}]},
        {"id": "intro", "title": "Again", "instruction": "Go"}
    ]));

    let issues = check_graph(&document);

    assert_eq!(
        issues,
        vec![
            GraphIssue::DuplicateStep {
                id: "intro".to_string()
            },
            GraphIssue::MissingStart,
            GraphIssue::UnknownSentinel {
                from: "intro".to_string(),
                to: "__restart__".to_string()
            },
        ]
    );
}

#[test]
fn graph_issue_lines_read_as_transitions() {
    let issue = GraphIssue::DanglingTarget {
        from: "start".to_string(),
        to: "missing_step".to_string(),
    };
    assert_eq!(issue.to_string(), "start -> missing_step");
}

#[test]
fn invalid_schema_is_reported_as_a_schema_violation() {
    let document = document(json!([
        {"id": "start", "title": "Start", "instruction": "Go"}
    ]));
    let broken_schema = json!({"type": 12});

    let report = validate(&document, &broken_schema).expect_err("schema compile failure");

    assert_eq!(report.schema.len(), 1);
    assert!(report.schema[0].message.contains("schema does not compile"));
}

fn bundled_with(edit: impl FnOnce(&mut Value)) -> Value {
    let mut document: Value = serde_json::from_str(BUNDLED_RULES_JSON).expect("bundled json");
    edit(&mut document);
    document
}

#[test]
fn documents_the_validator_accepts_always_load() {
    let candidates = vec![
        bundled_with(|_| {}),
        bundled_with(|doc| doc["meta"]["lastReviewed"] = "2024-13-45".into()),
        bundled_with(|doc| doc["meta"]["lastReviewed"] = "2024-02-29".into()),
        bundled_with(|doc| {
            doc["resources"]["popups"]["lawful basis"] = json!({"title": "t", "body": "b"})
        }),
        bundled_with(|doc| doc["resources"]["stepExternal"]["old step"] = "https://x".into()),
        bundled_with(|doc| doc["resources"]["stepExternal"]["_draft"] = "https://x".into()),
        bundled_with(|doc| doc["steps"][0]["buttons"][0]["label"] = "   ".into()),
        bundled_with(|doc| doc["steps"][1]["id"] = "_not_sar".into()),
        bundled_with(|doc| doc["steps"][0]["buttons"][0]["next"] = "__restart__".into()),
        bundled_with(|doc| doc["steps"][0]["buttons"][0]["next"] = "verify identity".into()),
    ];

    let schema = schema();
    let mut accepted = 0;
    for document in candidates {
        if validate(&document, &schema).is_ok() {
            accepted += 1;
            if let Err(err) = Rules::from_value(document.clone()) {
                panic!("validated document failed to load: {err}\n{document:#}");
            }
        }
    }
    assert_eq!(accepted, 2);
}

#[test]
fn impossible_review_date_fails_the_schema_stage() {
    let document = bundled_with(|doc| doc["meta"]["lastReviewed"] = "2024-13-45".into());

    let report = validate(&document, &schema()).expect_err("bad date");

    assert_eq!(report.failed_stages(), vec![ValidationStage::Schema]);
    assert!(report
        .schema
        .iter()
        .any(|violation| violation.path == "/meta/lastReviewed"));
}

#[test]
fn resource_keys_must_be_identifiers() {
    let document = bundled_with(|doc| {
        doc["resources"]["popups"]["lawful basis"] = json!({"title": "t", "body": "b"});
        doc["resources"]["stepExternal"]["old step"] = "https://x".into();
    });

    let report = validate(&document, &schema()).expect_err("bad keys");

    let paths = report
        .schema
        .iter()
        .map(|violation| violation.path.as_str())
        .collect::<Vec<_>>();
    assert!(
        paths.iter().any(|path| path.starts_with("/resources/popups")),
        "paths: {paths:?}"
    );
    assert!(
        paths.iter().any(|path| path.starts_with("/resources/stepExternal")),
        "paths: {paths:?}"
    );
    assert!(report.graph.is_empty());
}
