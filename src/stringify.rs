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

//! Replacer-aware JSON stringification for record values.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use serde_json::ser::Serializer;

/// A replacer applied to every key/value pair before serialization.
///
/// Returning `None` removes the pair from an object (array elements become
/// `null` instead, so positions are preserved); returning `Some` substitutes
/// the value. The root value is visited with an empty key.
pub type ReplacerFn = Arc<dyn Fn(&str, &Value) -> Option<Value> + Send + Sync>;

/// Serializes a JSON value, applying the replacer and optional indentation.
///
/// `indent` of `0` produces compact output; any other value pretty-prints
/// with that many spaces per level. The routine is total: value trees are
/// acyclic and string-keyed, so serialization cannot fail.
///
/// # Examples
///
/// ```
/// use loglet::safe_stringify;
/// use serde_json::json;
///
/// let out = safe_stringify(&json!({"a": 1}), None, 0);
/// assert_eq!(out, r#"{"a":1}"#);
/// ```
pub fn safe_stringify(value: &Value, replacer: Option<&ReplacerFn>, indent: usize) -> String {
    let value = match replacer {
        Some(replacer) => apply_replacer("", value, replacer).unwrap_or(Value::Null),
        None => value.clone(),
    };

    if indent == 0 {
        return value.to_string();
    }

    let indent_text = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent_text.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);

    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        // Writing into a Vec cannot fail; compact output as a last resort.
        Err(_) => value.to_string(),
    }
}

fn apply_replacer(key: &str, value: &Value, replacer: &ReplacerFn) -> Option<Value> {
    let replaced = replacer(key, value)?;

    Some(match replaced {
        Value::Object(object) => {
            let mut out = Map::new();
            for (key, value) in &object {
                if let Some(value) = apply_replacer(key, value, replacer) {
                    out.insert(key.clone(), value);
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    apply_replacer(&idx.to_string(), item, replacer).unwrap_or(Value::Null)
                })
                .collect(),
        ),
        other => other,
    })
}
