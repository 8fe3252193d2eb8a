//! Embedded pipeline configuration schema and a structural validator.
//!
//! The validator understands the subset of JSON Schema the pipeline schema
//! uses: `type`, `properties`, `items`, `oneOf` and local `$ref`s into
//! `#/definitions`.

use std::fmt;
use std::sync::LazyLock;

use serde_json::{Map, Value};

/// Raw JSON of the pipeline configuration schema.
pub const SCHEMA_JSON: &str = include_str!("../schema/pipeline-configuration.schema.json");

static SCHEMA: LazyLock<Value> =
    LazyLock::new(|| serde_json::from_str(SCHEMA_JSON).expect("embedded schema is valid JSON"));

/// The pipeline configuration schema.
#[must_use]
pub fn schema() -> &'static Value {
    &SCHEMA
}

/// A schema violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value (`""` for the root).
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = if self.pointer.is_empty() { "/" } else { &self.pointer };
        write!(f, "{pointer}: {}", self.message)
    }
}

/// Validate a pipeline configuration against the embedded schema.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let violations = folio_pipeline::validate(&json!({"analyzers": {"include": 42}}));
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].pointer, "/analyzers/include");
/// ```
#[must_use]
pub fn validate(instance: &Value) -> Vec<Violation> {
    validate_against(schema(), instance)
}

/// Validate `instance` against an arbitrary schema document.
#[must_use]
pub fn validate_against(schema: &Value, instance: &Value) -> Vec<Violation> {
    let mut validator = Validator {
        root: schema,
        violations: Vec::new(),
    };
    validator.check(schema, instance, &mut String::new());
    validator.violations
}

struct Validator<'s> {
    root: &'s Value,
    violations: Vec<Violation>,
}

impl<'s> Validator<'s> {
    fn report(&mut self, pointer: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            pointer: pointer.to_owned(),
            message: message.into(),
        });
    }

    fn check(&mut self, schema: &'s Value, instance: &Value, pointer: &mut String) {
        let Some(schema) = schema.as_object() else {
            return;
        };

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            match self.resolve(reference) {
                Some(target) => self.check(target, instance, pointer),
                None => self.report(pointer, format!("unresolvable schema reference {reference}")),
            }
            return;
        }

        if let Some(expected) = schema.get("type")
            && !type_matches(expected, instance)
        {
            self.report(
                pointer,
                format!("expected {}, found {}", describe_type(expected), json_type(instance)),
            );
            return;
        }

        if let Some(alternatives) = schema.get("oneOf").and_then(Value::as_array) {
            self.check_one_of(alternatives, instance, pointer);
        }

        if let (Some(properties), Some(object)) =
            (schema.get("properties").and_then(Value::as_object), instance.as_object())
        {
            self.check_properties(properties, object, pointer);
        }

        if let (Some(items), Some(array)) = (schema.get("items"), instance.as_array()) {
            for (idx, item) in array.iter().enumerate() {
                with_segment(pointer, &idx.to_string(), |pointer| self.check(items, item, pointer));
            }
        }
    }

    fn check_properties(&mut self, properties: &'s Map<String, Value>, object: &Map<String, Value>, pointer: &mut String) {
        for (name, property_schema) in properties {
            if let Some(value) = object.get(name) {
                with_segment(pointer, name, |pointer| self.check(property_schema, value, pointer));
            }
        }
    }

    fn check_one_of(&mut self, alternatives: &'s [Value], instance: &Value, pointer: &str) {
        let matched = alternatives
            .iter()
            .filter(|alternative| validate_against_with_root(self.root, alternative, instance))
            .count();
        if matched != 1 {
            self.report(
                pointer,
                format!(
                    "expected exactly one of {} alternatives to match, {matched} matched",
                    alternatives.len()
                ),
            );
        }
    }

    /// Resolve a local reference such as `#/definitions/idList`.
    fn resolve(&self, reference: &str) -> Option<&'s Value> {
        let path = reference.strip_prefix('#')?;
        if path.is_empty() {
            return Some(self.root);
        }
        self.root.pointer(path)
    }
}

/// Whether `instance` satisfies `schema`, resolving references against `root`.
fn validate_against_with_root(root: &Value, schema: &Value, instance: &Value) -> bool {
    let mut validator = Validator {
        root,
        violations: Vec::new(),
    };
    validator.check(schema, instance, &mut String::new());
    validator.violations.is_empty()
}

/// Run `f` with `segment` appended to the JSON pointer.
fn with_segment(pointer: &mut String, segment: &str, f: impl FnOnce(&mut String)) {
    let len = pointer.len();
    pointer.push('/');
    pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    f(pointer);
    pointer.truncate(len);
}

fn type_matches(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => is_type(name, instance),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| is_type(name, instance)),
        _ => true,
    }
}

fn is_type(name: &str, instance: &Value) -> bool {
    match name {
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "number" => instance.is_number(),
        "integer" => instance.is_i64() || instance.is_u64(),
        "boolean" => instance.is_boolean(),
        "null" => instance.is_null(),
        _ => true,
    }
}

fn describe_type(expected: &Value) -> String {
    match expected {
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        Value::String(name) => name.clone(),
        other => other.to_string(),
    }
}

fn json_type(instance: &Value) -> &'static str {
    match instance {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
