// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Message normalization: converting an arbitrary input message into a
//! canonical string plus any structured data extracted along the way.

use std::fmt;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::config::Config;
use crate::tags::Tag;

/// A structural error value: anything that exposes both a message and a stack.
///
/// Errors are detected by shape rather than by type so that error data
/// arriving as plain JSON (for instance through the metadata of another
/// service) is treated the same as errors produced in-process.
///
/// # Examples
///
/// ```
/// use loglet::ErrorLike;
///
/// let err = ErrorLike::new("connection refused").with_name("ConnectError");
/// assert_eq!(err.to_string(), "ConnectError: connection refused");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorLike {
    pub name: String,
    pub message: String,
    pub stack: String,
    /// Additional enumerable properties carried by the error.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ErrorLike {
    /// Creates an error with the given message, no stack, and the default
    /// `"Error"` name.
    pub fn new(message: impl Into<String>) -> Self {
        ErrorLike {
            name: "Error".to_string(),
            message: message.into(),
            stack: String::new(),
            properties: Map::new(),
        }
    }

    /// Replaces the error name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the stack text.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    /// Attaches an additional property to the error.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Builds a structural error from any [`std::error::Error`].
    ///
    /// Rust errors carry no stack trace; the source chain is rendered into
    /// the stack text instead, one `caused by` line per source.
    pub fn from_std(error: &(dyn std::error::Error + 'static)) -> Self {
        let message = error.to_string();

        let mut stack = format!("Error: {message}");
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push_str(&format!("\n    caused by: {cause}"));
            source = cause.source();
        }

        ErrorLike::new(message).with_stack(stack)
    }

    /// Interprets a JSON value as an error if it has the right shape: an
    /// object with both a `message` and a `stack` string field.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let message = object.get("message")?.as_str()?;
        let stack = object.get("stack")?.as_str()?;

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Error");

        let properties = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "message" | "stack"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(ErrorLike {
            name: name.to_string(),
            message: message.to_string(),
            stack: stack.to_string(),
            properties,
        })
    }

    /// Renders the error as a JSON object carrying `name`, `message`,
    /// `stack`, and every additional property.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert("message".to_string(), Value::String(self.message.clone()));
        object.insert("stack".to_string(), Value::String(self.stack.clone()));
        for (key, value) in &self.properties {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

impl fmt::Display for ErrorLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for ErrorLike {}

/// Whether a JSON value has the structural shape of an error.
pub fn is_error_like(value: &Value) -> bool {
    ErrorLike::from_value(value).is_some()
}

/// Replaces an error-shaped value with its serializable stubbed form; other
/// values pass through unchanged.
pub fn stub_error(value: &Value) -> Value {
    match ErrorLike::from_value(value) {
        Some(error) => error.to_value(),
        None => value.clone(),
    }
}

/// The raw input message of one log call.
#[derive(Debug, Clone)]
pub enum Message {
    Null,
    Text(String),
    Number(serde_json::Number),
    /// An arbitrary structured payload.
    Data(Value),
    Error(ErrorLike),
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Message::Text(value.to_string())
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Message::Text(value)
    }
}

impl From<i32> for Message {
    fn from(value: i32) -> Self {
        Message::Number(value.into())
    }
}

impl From<i64> for Message {
    fn from(value: i64) -> Self {
        Message::Number(value.into())
    }
}

impl From<u64> for Message {
    fn from(value: u64) -> Self {
        Message::Number(value.into())
    }
}

impl From<f64> for Message {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(number) => Message::Number(number),
            // Non-finite numbers have no JSON form; fall back to their text.
            None => Message::Text(value.to_string()),
        }
    }
}

impl From<bool> for Message {
    fn from(value: bool) -> Self {
        Message::Text(value.to_string())
    }
}

impl From<ErrorLike> for Message {
    fn from(value: ErrorLike) -> Self {
        Message::Error(value)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Message::Null,
            Value::String(text) => Message::Text(text),
            Value::Number(number) => Message::Number(number),
            Value::Bool(flag) => Message::Text(flag.to_string()),
            other => Message::Data(other),
        }
    }
}

/// The outcome of normalizing one raw message.
#[derive(Debug, Clone, Default)]
pub struct ParsedMessage {
    /// Canonical message string.
    pub msg: String,
    /// Metadata extracted from the message, e.g. an error's stack.
    pub meta: Option<Map<String, Value>>,
    /// The original error, retained for later retrieval.
    pub error: Option<ErrorLike>,
    /// Tags extracted from the message.
    pub tags: Option<Vec<Tag>>,
}

impl ParsedMessage {
    /// A parsed message with only the canonical string set.
    pub fn text(msg: impl Into<String>) -> Self {
        ParsedMessage {
            msg: msg.into(),
            ..ParsedMessage::default()
        }
    }
}

/// Normalizes a raw message, in order of precedence:
///
/// 1. a configured parse hook, whose result is used verbatim;
/// 2. null input, normalized to an empty string;
/// 3. error-like input, which contributes its message, a `stack` metadata
///    entry, and the retained source error;
/// 4. any other structured payload, serialized to compact JSON;
/// 5. plain string conversion.
pub fn parse_message(msg: &Message, config: &Config) -> ParsedMessage {
    if let Some(on_parse) = &config.on_parse {
        if let Some(parsed) = on_parse(msg, config) {
            return parsed;
        }
    }

    match msg {
        Message::Null => ParsedMessage::text(""),
        Message::Error(error) => parsed_from_error(error.clone()),
        Message::Data(value) => match ErrorLike::from_value(value) {
            Some(error) => parsed_from_error(error),
            None => ParsedMessage::text(value.to_string()),
        },
        Message::Text(text) => ParsedMessage::text(text.clone()),
        Message::Number(number) => ParsedMessage::text(number.to_string()),
    }
}

fn parsed_from_error(error: ErrorLike) -> ParsedMessage {
    let mut meta = Map::new();
    meta.insert("stack".to_string(), Value::String(error.stack.clone()));

    ParsedMessage {
        msg: error.message.clone(),
        meta: Some(meta),
        error: Some(error),
        tags: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_normalizes_to_empty_string() {
        let parsed = parse_message(&Message::Null, &Config::default());
        assert_eq!(parsed.msg, "");
        assert!(parsed.meta.is_none());
        assert!(parsed.error.is_none());
    }

    #[test]
    fn errors_contribute_message_stack_and_source() {
        let error = ErrorLike::new("boom").with_stack("Error: boom\n    at main");
        let parsed = parse_message(&Message::Error(error.clone()), &Config::default());

        assert_eq!(parsed.msg, "boom");
        let meta = parsed.meta.unwrap();
        assert_eq!(meta.get("stack"), Some(&json!("Error: boom\n    at main")));
        assert_eq!(parsed.error, Some(error));
    }

    #[test]
    fn error_shaped_values_are_detected() {
        let value = json!({"message": "bad", "stack": "Error: bad", "code": 7});
        let parsed = parse_message(&Message::Data(value), &Config::default());

        assert_eq!(parsed.msg, "bad");
        let error = parsed.error.unwrap();
        assert_eq!(error.name, "Error");
        assert_eq!(error.properties.get("code"), Some(&json!(7)));
    }

    #[test]
    fn plain_objects_serialize_to_compact_json() {
        let parsed = parse_message(&Message::Data(json!({"a": 1})), &Config::default());
        assert_eq!(parsed.msg, r#"{"a":1}"#);
        assert!(parsed.meta.is_none());
    }

    #[test]
    fn scalars_coerce_to_strings() {
        let config = Config::default();
        assert_eq!(parse_message(&Message::from(5i64), &config).msg, "5");
        assert_eq!(parse_message(&Message::from(1.5f64), &config).msg, "1.5");
        assert_eq!(parse_message(&Message::from(true), &config).msg, "true");
        assert_eq!(parse_message(&Message::from("x"), &config).msg, "x");
    }

    #[test]
    fn parse_hook_takes_precedence() {
        use std::sync::Arc;

        let config = Config {
            on_parse: Some(Arc::new(|_, _| Some(ParsedMessage::text("hooked")))),
            ..Config::default()
        };

        let parsed = parse_message(&Message::from("ignored"), &config);
        assert_eq!(parsed.msg, "hooked");
    }

    #[test]
    fn stubbing_preserves_diagnostic_fields() {
        let value = json!({"message": "bad", "stack": "trace", "name": "IoError", "path": "/tmp"});
        let stubbed = stub_error(&value);

        assert_eq!(stubbed["name"], json!("IoError"));
        assert_eq!(stubbed["message"], json!("bad"));
        assert_eq!(stubbed["stack"], json!("trace"));
        assert_eq!(stubbed["path"], json!("/tmp"));

        let plain = json!({"message": "no stack here"});
        assert_eq!(stub_error(&plain), plain);
    }

    #[test]
    fn to_value_carries_extra_properties() {
        let error = ErrorLike::new("x")
            .with_stack("s")
            .with_property("code", json!(500));
        let value = error.to_value();

        assert_eq!(value["code"], json!(500));
        assert!(is_error_like(&value));
    }

    #[test]
    fn from_std_renders_the_source_chain() {
        let io = std::io::Error::other("disk gone");
        let error = ErrorLike::from_std(&io);

        assert_eq!(error.message, "disk gone");
        assert!(error.stack.starts_with("Error: disk gone"));
    }
}
