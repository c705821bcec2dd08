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

//! Per-instance logger configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::format::Formatter;
use crate::handler::Console;
use crate::handler::LogHandler;
use crate::level::Level;
use crate::message::Message;
use crate::message::ParsedMessage;
use crate::record::LogRecord;
use crate::stringify::ReplacerFn;
use crate::tags::Tag;

pub(crate) const DEFAULT_LEVEL_KEY: &str = "__level";
pub(crate) const DEFAULT_MESSAGE_KEY: &str = "msg";
pub(crate) const DEFAULT_TAGS_KEY: &str = "__tags";

/// Environment variable overriding the level threshold at construction.
pub const ENV_LEVEL: &str = "LOGLET_LEVEL";
/// Environment variable forcing development (pretty-print) mode.
pub const ENV_DEV: &str = "LOGLET_DEV";
/// Environment variable forcing silent mode.
pub const ENV_SILENT: &str = "LOGLET_SILENT";

/// Computes metadata fresh on each read of a record's merged metadata.
///
/// Only object results are merged; any other return value is ignored.
pub type DynamicMetaFn = Arc<dyn Fn(&LogRecord, &Config) -> Option<Value> + Send + Sync>;

/// Replaces the built-in message normalization when it returns `Some`.
pub type ParseFn = Arc<dyn Fn(&Message, &Config) -> Option<ParsedMessage> + Send + Sync>;

/// Fully overrides record rendering; receives the level, normalized
/// message, merged metadata, resolved tags, and the active configuration.
pub type CompileFn =
    Arc<dyn Fn(Level, &str, &Map<String, Value>, &[String], &Config) -> Value + Send + Sync>;

/// The name under which a record field is rendered.
///
/// `Default` uses the conventional name, `Named` renames the field, and
/// `Off` omits it entirely. Leaving an option unset and disabling it stay
/// distinguishable this way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyName {
    #[default]
    Default,
    Named(String),
    Off,
}

impl KeyName {
    pub(crate) fn resolve<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match self {
            KeyName::Default => Some(default),
            KeyName::Named(name) => Some(name),
            KeyName::Off => None,
        }
    }
}

/// Configuration of one [`Logger`](crate::Logger) instance.
///
/// Construct with struct update syntax over [`Config::default`]:
///
/// ```
/// use loglet::Config;
/// use loglet::KeyName;
/// use loglet::Level;
///
/// let config = Config {
///     level: Some(Level::Debug),
///     level_key: KeyName::Named("severity".to_string()),
///     tags_key: KeyName::Off,
///     ..Config::default()
/// };
/// assert_eq!(config.level, Some(Level::Debug));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Static metadata merged into every record.
    pub meta: Map<String, Value>,
    /// Global tags prepended to every record's tag list.
    pub tags: Vec<Tag>,
    /// Hook computing metadata fresh on each read.
    pub dynamic_meta: Option<DynamicMetaFn>,
    /// Level threshold; `None` disables emission entirely.
    pub level: Option<Level>,
    /// Development mode: pretty-prints JSON output.
    pub dev: bool,
    /// Suppresses sink writes; records are still constructed and listeners
    /// still notified.
    pub silent: bool,
    /// Replacer applied during JSON serialization.
    pub replacer: Option<ReplacerFn>,
    /// The output sink.
    pub log_handler: Arc<dyn LogHandler>,
    /// Key under which the level is rendered; defaults to `__level`.
    pub level_key: KeyName,
    /// Key under which the message is rendered; defaults to `msg`. The
    /// message cannot be turned off.
    pub message_key: Option<String>,
    /// Key under which resolved tags are rendered; defaults to `__tags`.
    pub tags_key: KeyName,
    /// Custom message parse hook.
    pub on_parse: Option<ParseFn>,
    /// Custom record compile hook.
    pub on_compile: Option<CompileFn>,
    /// The formatter driving [`Display`](std::fmt::Display) output.
    pub on_format: Formatter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            meta: Map::new(),
            tags: Vec::new(),
            dynamic_meta: None,
            level: Some(Level::Info),
            dev: false,
            silent: false,
            replacer: None,
            log_handler: Arc::new(Console),
            level_key: KeyName::Default,
            message_key: None,
            tags_key: KeyName::Default,
            on_parse: None,
            on_compile: None,
            on_format: Formatter::default(),
        }
    }
}

impl Config {
    pub(crate) fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.level)
    }

    /// Applies the `LOGLET_*` environment overrides, read once.
    ///
    /// An unrecognized level name is ignored; the boolean variables accept
    /// case-insensitive `true`, `1`, `yes`, `y`, and `on` as true.
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(ENV_LEVEL) {
            if let Ok(level) = Level::from_str(&level) {
                self.level = Some(level);
            }
        }
        if let Ok(dev) = std::env::var(ENV_DEV) {
            self.dev = to_bool(&dev);
        }
        if let Ok(silent) = std::env::var(ENV_SILENT) {
            self.silent = to_bool(&silent);
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("meta", &self.meta)
            .field("tags", &self.tags)
            .field("dynamic_meta", &self.dynamic_meta.as_ref().map(|_| ".."))
            .field("level", &self.level)
            .field("dev", &self.dev)
            .field("silent", &self.silent)
            .field("replacer", &self.replacer.as_ref().map(|_| ".."))
            .field("log_handler", &self.log_handler)
            .field("level_key", &self.level_key)
            .field("message_key", &self.message_key)
            .field("tags_key", &self.tags_key)
            .field("on_parse", &self.on_parse.as_ref().map(|_| ".."))
            .field("on_compile", &self.on_compile.as_ref().map(|_| ".."))
            .field("on_format", &self.on_format)
            .finish()
    }
}

/// Boolean-ish parsing for environment overrides.
pub(crate) fn to_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bool_accepts_truthy_spellings() {
        for value in ["true", "TRUE", "1", "yes", "Y", "on", "On"] {
            assert!(to_bool(value), "{value} should parse as true");
        }
        for value in ["false", "0", "no", "off", "", "2", "truthy"] {
            assert!(!to_bool(value), "{value} should parse as false");
        }
    }

    #[test]
    fn key_name_distinguishes_unset_from_disabled() {
        assert_eq!(KeyName::Default.resolve("__level"), Some("__level"));
        assert_eq!(
            KeyName::Named("severity".to_string()).resolve("__level"),
            Some("severity")
        );
        assert_eq!(KeyName::Off.resolve("__level"), None);
    }

    #[test]
    fn default_threshold_is_info() {
        let config = Config::default();
        assert!(config.is_enabled(Level::Info));
        assert!(config.is_enabled(Level::Fatal));
        assert!(!config.is_enabled(Level::Debug));
    }

    #[test]
    fn disabled_threshold_gates_everything() {
        let config = Config {
            level: None,
            ..Config::default()
        };
        assert!(!config.is_enabled(Level::Fatal));
    }
}
