use super::GraphIssue;
use crate::markup;
use crate::rules::{is_sentinel, Target, START_STEP_ID};
use serde_json::Value;
use std::collections::HashSet;

const UNNAMED_STEP: &str = "<unnamed>";

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

pub fn check_graph(document: &Value) -> Vec<GraphIssue> {
    let steps = document
        .get("steps")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let popups: HashSet<&str> = document
        .pointer("/resources/popups")
        .and_then(Value::as_object)
        .map(|popups| popups.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut issues = Vec::new();
    let mut step_ids = HashSet::new();
    for step in steps {
        if let Some(id) = str_field(step, "id") {
            if !step_ids.insert(id) {
                issues.push(GraphIssue::DuplicateStep { id: id.to_string() });
            }
        }
    }
    if !step_ids.contains(START_STEP_ID) {
        issues.push(GraphIssue::MissingStart);
    }

    for step in steps {
        let from = str_field(step, "id").unwrap_or(UNNAMED_STEP);
        let buttons = step
            .get("buttons")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for next in buttons.iter().filter_map(|button| str_field(button, "next")) {
            check_target(from, next, &step_ids, &mut issues);
        }

        let html = format!(
            "{}{}",
            str_field(step, "description").unwrap_or_default(),
            str_field(step, "instruction").unwrap_or_default()
        );
        for next in markup::next_targets(&html) {
            check_target(from, &next, &step_ids, &mut issues);
        }
        for key in markup::popup_keys(&html) {
            if !popups.contains(key.as_str()) {
                issues.push(GraphIssue::DanglingPopup {
                    from: from.to_string(),
                    key,
                });
            }
        }
    }
    issues
}

fn check_target(from: &str, to: &str, step_ids: &HashSet<&str>, issues: &mut Vec<GraphIssue>) {
    if is_sentinel(to) {
        if Target::parse(to).is_err() {
            issues.push(GraphIssue::UnknownSentinel {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        return;
    }
    if !step_ids.contains(to) {
        issues.push(GraphIssue::DanglingTarget {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
}
