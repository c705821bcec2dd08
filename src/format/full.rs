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

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::tz::TimeZone;
use serde_json::Value;

use crate::config::Config;
use crate::format::format_timestamp;
use crate::level::Level;
use crate::record::LogRecord;
use crate::stringify::safe_stringify;

/// A multi-line, human-readable formatter.
///
/// The first line carries the timestamp, level, and message; a tag summary
/// and a pretty-printed metadata dump follow as separate sections. Section
/// prefixes distinguish whether more sections follow (`├`) or the section
/// is the last one (`└`).
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00	ERROR	Hello error!
/// ├ tags: audit, log-error
/// └ {
///     "stack": "Error: Hello error!"
///   }
/// ```
///
/// By default the level is colored; disable by setting `colors` to false.
#[derive(Debug, Clone)]
pub struct FullFormatter {
    /// Whether a timestamp leads the header line.
    pub include_timestamp: bool,
    /// Whether the tag summary section is rendered.
    pub include_tags: bool,
    /// Whether the metadata section is rendered.
    pub include_meta: bool,
    /// Separator between header-line parts.
    pub separator: String,
    /// Whether the level is colored.
    pub colors: bool,
    /// Per-level colors.
    pub level_colors: LevelColor,
    /// Timezone for timestamps; the system timezone is used otherwise.
    pub tz: Option<TimeZone>,
}

/// Customize the color of each log level.
#[derive(Debug, Clone)]
pub struct LevelColor {
    pub fatal: Color,
    pub error: Color,
    pub warn: Color,
    pub info: Color,
    pub debug: Color,
    pub trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Color::BrightRed,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Blue,
            trace: Color::Magenta,
        }
    }
}

impl Default for FullFormatter {
    fn default() -> Self {
        FullFormatter {
            include_timestamp: true,
            include_tags: true,
            include_meta: true,
            separator: "\t".to_string(),
            colors: true,
            level_colors: LevelColor::default(),
            tz: None,
        }
    }
}

impl FullFormatter {
    pub(crate) fn format(&self, record: &LogRecord, _config: &Config) -> String {
        let mut header = Vec::with_capacity(3);
        if self.include_timestamp {
            header.push(format_timestamp(self.tz.as_ref()));
        }
        header.push(self.level_token(record.level()));
        header.push(record.msg().to_string());

        let mut sections = Vec::new();

        if self.include_tags {
            let tags = record.tags();
            if !tags.is_empty() {
                sections.push(format!("tags: {}", tags.join(", ")));
            }
        }

        if self.include_meta {
            let meta = record.meta();
            if !meta.is_empty() {
                let dump = safe_stringify(&Value::Object(meta), None, 2);
                sections.push(dump.replace('\n', "\n  "));
            }
        }

        let mut lines = vec![header.join(&self.separator)];
        let last = sections.len().saturating_sub(1);
        for (idx, section) in sections.into_iter().enumerate() {
            let marker = if idx == last { '└' } else { '├' };
            lines.push(format!("{marker} {section}"));
        }

        lines.join("\n")
    }

    fn level_token(&self, level: Level) -> String {
        let token = level.as_str().to_uppercase();
        if !self.colors {
            return token;
        }

        let color = match level {
            Level::Fatal => self.level_colors.fatal,
            Level::Error => self.level_colors.error,
            Level::Warn => self.level_colors.warn,
            Level::Info => self.level_colors.info,
            Level::Debug => self.level_colors.debug,
            Level::Trace => self.level_colors.trace,
        };
        ColoredString::from(token).color(color).to_string()
    }
}
