//! Inspection of the standard response envelope.
//!
//! Every Fan Hub endpoint wraps its payload as
//! `{success, message?, data?, error?}`. [`Envelope`] answers the questions the
//! checks ask about such a body without committing to a concrete schema.

use serde_json::Value;

/// Read-only view over a decoded response body.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'body> {
    body: &'body Value,
}

impl<'body> Envelope<'body> {
    /// Wraps a decoded JSON body.
    #[must_use]
    pub const fn new(body: &'body Value) -> Self {
        Self { body }
    }

    /// Returns `true` when the `success` field is present and truthy.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.field("success").is_some_and(is_truthy)
    }

    /// Returns `true` when the body carries a `message` field.
    #[must_use]
    pub fn has_message(&self) -> bool {
        self.field("message").is_some()
    }

    /// Returns `true` when the body carries a `data` field.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.field("data").is_some()
    }

    /// The `message` field rendered as text.
    #[must_use]
    pub fn message_text(&self) -> Option<String> {
        self.field("message").map(display_value)
    }

    /// The `data` field.
    #[must_use]
    pub fn data(&self) -> Option<&'body Value> {
        self.field("data")
    }

    /// The `error` field when it is a string.
    #[must_use]
    pub fn error_text(&self) -> Option<&'body str> {
        self.field("error").and_then(Value::as_str)
    }

    /// Lists every way this body deviates from the envelope contract.
    ///
    /// Each entry is prefixed with `endpoint` so violations from several
    /// endpoints can be joined into one message.
    #[must_use]
    pub fn violations(&self, endpoint: &str) -> Vec<String> {
        let mut violations = Vec::new();

        if self.field("success").is_none() {
            violations.push(format!("{endpoint}: Missing 'success' field"));
        }

        if !self.has_message() && !self.has_data() {
            violations.push(format!(
                "{endpoint}: Missing both 'message' and 'data' fields"
            ));
        }

        if !self.field("success").is_some_and(Value::is_boolean) {
            violations.push(format!("{endpoint}: 'success' field should be boolean"));
        }

        violations
    }

    fn field(&self, name: &str) -> Option<&'body Value> {
        self.body.as_object().and_then(|object| object.get(name))
    }
}

/// Number of entries in a collection payload.
///
/// Arrays count their items and objects their keys; any other value is not a
/// collection.
#[must_use]
pub fn collection_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(entries) => Some(entries.len()),
        _ => None,
    }
}

/// Extracts the generated `_id` of a created document.
#[must_use]
pub fn document_id(value: &Value) -> Option<String> {
    match value.get("_id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Loose truthiness: `null`, `false`, zero and empty values are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

/// Renders a value for messages: strings verbatim, anything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToOwned::to_owned)
}
