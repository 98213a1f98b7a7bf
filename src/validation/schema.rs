use super::SchemaViolation;
use chrono::NaiveDate;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const ROOT_PATH: &str = "/";
const REVIEW_DATE_POINTER: &str = "/meta/lastReviewed";
const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn check_schema(document: &Value, schema: &Value) -> Vec<SchemaViolation> {
    let compiled = match JSONSchema::options()
        .with_draft(Draft::Draft202012)
        .compile(schema)
    {
        Ok(compiled) => compiled,
        Err(err) => {
            return vec![SchemaViolation {
                path: ROOT_PATH.to_string(),
                message: format!("schema does not compile: {err}"),
            }];
        }
    };

    let mut violations: Vec<SchemaViolation> = match compiled.validate(document) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| {
                let path = error.instance_path.to_string();
                SchemaViolation {
                    path: if path.is_empty() {
                        ROOT_PATH.to_string()
                    } else {
                        path
                    },
                    message: error.to_string(),
                }
            })
            .collect(),
    };
    violations.extend(review_date_violation(document));
    violations
}

// Calendar check only; the `pattern` keyword reports malformed layouts.
fn review_date_violation(document: &Value) -> Option<SchemaViolation> {
    let raw = document.pointer(REVIEW_DATE_POINTER)?.as_str()?;
    if !is_date_shaped(raw) {
        return None;
    }
    let err = NaiveDate::parse_from_str(raw, REVIEW_DATE_FORMAT).err()?;
    Some(SchemaViolation {
        path: REVIEW_DATE_POINTER.to_string(),
        message: format!("\"{raw}\" is not a calendar date: {err}"),
    })
}

fn is_date_shaped(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
