//! Minimal path-expression evaluation over JSON values.
//!
//! Supports exactly the query subset the wizard protocol uses: plain keys,
//! dotted key chains (`foo.bar`), numeric indices (`[0]`), and whole-list
//! field projection (`[].Field`). Anything that does not resolve yields
//! `Value::Null` rather than an error.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
    Project,
}

/// Evaluate a path expression against a value.
pub fn search(expr: &str, value: &Value) -> Value {
    evaluate(&parse(expr), value)
}

/// Evaluate a path expression against a top-level object.
///
/// The first segment must be a key; projections and indices make no sense at
/// the root of a variable store and resolve to null.
pub fn search_object(expr: &str, object: &Map<String, Value>) -> Value {
    let segments = parse(expr);
    let Some((first, rest)) = segments.split_first() else {
        return Value::Object(object.clone());
    };
    match first {
        Segment::Key(key) => match object.get(key) {
            Some(value) => evaluate(rest, value),
            None => Value::Null,
        },
        _ => Value::Null,
    }
}

/// Render a value for display labels and prompts. Scalars keep their natural
/// form; composites fall back to compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

fn parse(expr: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = expr.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut current)));
                }
                let mut index = String::new();
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                    index.push(inner);
                }
                if index.is_empty() {
                    segments.push(Segment::Project);
                } else if let Ok(n) = index.parse::<usize>() {
                    segments.push(Segment::Index(n));
                } else {
                    // An unparseable index never matches anything.
                    segments.push(Segment::Index(usize::MAX));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        segments.push(Segment::Key(current));
    }
    segments
}

fn evaluate(segments: &[Segment], value: &Value) -> Value {
    let Some((first, rest)) = segments.split_first() else {
        return value.clone();
    };
    match first {
        Segment::Key(key) => match value.get(key.as_str()) {
            Some(inner) => evaluate(rest, inner),
            None => Value::Null,
        },
        Segment::Index(index) => match value.get(*index) {
            Some(inner) => evaluate(rest, inner),
            None => Value::Null,
        },
        // Project every element through the remaining segments. Misses stay
        // as nulls so the result remains parallel to the source list.
        Segment::Project => match value {
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| evaluate(rest, item)).collect())
            }
            _ => Value::Null,
        },
    }
}
