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

//! Compiling one log event into a keyed, serializable record.

use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::config::Config;
use crate::config::DEFAULT_LEVEL_KEY;
use crate::config::DEFAULT_MESSAGE_KEY;
use crate::config::DEFAULT_TAGS_KEY;
use crate::level::Level;
use crate::message::ErrorLike;
use crate::message::Message;
use crate::message::is_error_like;
use crate::message::parse_message;
use crate::message::stub_error;
use crate::stringify::safe_stringify;
use crate::tags::Tag;
use crate::tags::TagContext;

/// One log call, as handed to the record compiler. Transient: consumed by
/// [`LogRecord::new`] and not retained.
#[derive(Debug)]
pub struct LogInput {
    pub level: Level,
    pub msg: Message,
    pub meta: Option<Value>,
    pub tags: Option<Vec<Tag>>,
}

/// One compiled log event.
///
/// A record owns its level, the normalized message, a metadata accumulator,
/// a tag accumulator, and a snapshot of the configuration it was compiled
/// under. The merged metadata, resolved tag list, and keyed output object
/// are recomputed on each read, so a record stays consistent through
/// [`set_msg`](LogRecord::set_msg), [`merge_meta`](LogRecord::merge_meta),
/// and [`append_tags`](LogRecord::append_tags).
///
/// # Examples
///
/// ```
/// use loglet::Logger;
/// use serde_json::json;
///
/// let log = Logger::new();
/// let record = log.info("on duty", Some(json!({"shift": 3})), None).unwrap();
///
/// assert_eq!(record.level().as_str(), "info");
/// assert_eq!(record.msg(), "on duty");
/// let parsed: serde_json::Value = serde_json::from_str(&record.to_json(false)).unwrap();
/// assert_eq!(parsed["shift"], json!(3));
/// ```
#[derive(Debug, Clone)]
pub struct LogRecord {
    level: Level,
    raw_msg: String,
    meta: Map<String, Value>,
    tags: Vec<Tag>,
    source_error: Option<ErrorLike>,
    config: Arc<Config>,
}

impl LogRecord {
    /// Compiles a record from one log call and a configuration snapshot.
    pub fn new(input: LogInput, config: Arc<Config>) -> Self {
        let mut record = LogRecord {
            level: input.level,
            raw_msg: String::new(),
            meta: Map::new(),
            tags: Vec::new(),
            source_error: None,
            config,
        };

        if let Some(meta) = input.meta {
            record.meta = wrap_meta(meta);
        }
        if let Some(tags) = input.tags {
            record.tags = tags;
        }
        record.apply_message(input.msg);

        record
    }

    /// The level of the record, fixed at creation.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The normalized message string.
    pub fn msg(&self) -> &str {
        &self.raw_msg
    }

    /// Replaces the message, re-running normalization: an error message
    /// contributes its stack and source error again, exactly as at
    /// construction.
    pub fn set_msg(&mut self, msg: impl Into<Message>) {
        self.apply_message(msg.into());
    }

    fn apply_message(&mut self, msg: Message) {
        let parsed = parse_message(&msg, &self.config);
        self.raw_msg = parsed.msg;

        // Message-derived metadata never overrides caller-supplied keys.
        if let Some(meta) = parsed.meta {
            for (key, value) in meta {
                self.meta.entry(key).or_insert(value);
            }
        }
        if let Some(error) = parsed.error {
            self.source_error = Some(error);
        }
        if let Some(tags) = parsed.tags {
            self.tags.extend(tags);
        }
    }

    /// Merges additional metadata into the record. Object input merges key
    /// by key (later wins); any other value lands under a single `meta` key.
    pub fn merge_meta(&mut self, meta: Value) {
        for (key, value) in wrap_meta(meta) {
            self.meta.insert(key, value);
        }
    }

    /// Appends tags to the record's own tag list.
    pub fn append_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        self.tags.extend(tags);
    }

    /// The fully merged metadata: message-derived entries, then the
    /// record's own, then the configured static metadata, then anything the
    /// dynamic-meta hook returns, later sources winning on collision.
    /// Error-shaped values are stubbed into their serializable form.
    pub fn meta(&self) -> Map<String, Value> {
        let mut meta = self.meta.clone();

        for (key, value) in &self.config.meta {
            meta.insert(key.clone(), value.clone());
        }

        if let Some(dynamic_meta) = &self.config.dynamic_meta {
            if let Some(Value::Object(dynamic)) = dynamic_meta(self, &self.config) {
                for (key, value) in dynamic {
                    meta.insert(key, value);
                }
            }
        }

        for (_, value) in meta.iter_mut() {
            if is_error_like(value) {
                *value = stub_error(value);
            }
        }

        meta
    }

    /// The resolved tag list: configured tags first, then the record's own,
    /// each resolved independently and filtered down to non-empty strings.
    pub fn tags(&self) -> Vec<String> {
        let meta = self.meta();
        let ctx = TagContext {
            level: self.level,
            meta: &meta,
            config: &self.config,
        };

        self.config
            .tags
            .iter()
            .chain(self.tags.iter())
            .filter_map(|tag| tag.resolve(&ctx))
            .collect()
    }

    /// The keyed output object.
    ///
    /// A configured compile hook overrides rendering entirely. Otherwise
    /// the level is rendered under the configured level key (unless turned
    /// off), the message under the message key (always present), the merged
    /// metadata is spread in, and the resolved tags are rendered under the
    /// tags key (unless turned off).
    pub fn value(&self) -> Value {
        if let Some(on_compile) = &self.config.on_compile {
            return on_compile(
                self.level,
                &self.raw_msg,
                &self.meta(),
                &self.tags(),
                &self.config,
            );
        }

        let mut log = Map::new();
        if let Some(key) = self.config.level_key.resolve(DEFAULT_LEVEL_KEY) {
            log.insert(
                key.to_string(),
                Value::String(self.level.as_str().to_string()),
            );
        }

        let message_key = self
            .config
            .message_key
            .as_deref()
            .unwrap_or(DEFAULT_MESSAGE_KEY);
        log.insert(message_key.to_string(), Value::String(self.raw_msg.clone()));

        for (key, value) in self.meta() {
            log.insert(key, value);
        }

        if let Some(key) = self.config.tags_key.resolve(DEFAULT_TAGS_KEY) {
            log.insert(
                key.to_string(),
                Value::Array(self.tags().into_iter().map(Value::String).collect()),
            );
        }

        Value::Object(log)
    }

    /// Serializes the record to JSON text, applying the configured
    /// replacer. Always produces valid JSON; pretty-prints when `pretty` is
    /// set. A pure read: repeated calls on an unmutated record yield
    /// identical strings.
    pub fn to_json(&self, pretty: bool) -> String {
        safe_stringify(
            &self.value(),
            self.config.replacer.as_ref(),
            if pretty { 2 } else { 0 },
        )
    }

    /// The error the message was normalized from, if any.
    pub fn source_error(&self) -> Option<&ErrorLike> {
        self.source_error.as_ref()
    }

    /// Consumes the record into its source error, synthesizing one from
    /// the message when the record was not built from an error.
    pub fn into_error(self) -> ErrorLike {
        let LogRecord {
            raw_msg,
            source_error,
            ..
        } = self;
        source_error.unwrap_or_else(|| ErrorLike::new(raw_msg))
    }

    /// The configuration snapshot the record was compiled under.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.config.on_format.format(self, &self.config))
    }
}

fn wrap_meta(meta: Value) -> Map<String, Value> {
    match meta {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("meta".to_string(), other);
            map
        }
    }
}
