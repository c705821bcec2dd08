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

use jiff::tz::TimeZone;

use crate::config::Config;
use crate::format::format_timestamp;
use crate::record::LogRecord;

/// A one-line formatter: `LEVEL | message`, optionally timestamp-prefixed.
///
/// Output format:
///
/// ```text
/// INFO | Hello world
/// 2024-08-11T22:44:57.172105+08:00 | ERROR | Hello error!
/// ```
///
/// # Examples
///
/// ```
/// use loglet::MinimalFormatter;
///
/// let formatter = MinimalFormatter {
///     include_timestamp: true,
///     separator: " :: ".to_string(),
///     ..MinimalFormatter::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct MinimalFormatter {
    /// Whether a timestamp prefixes the line.
    pub include_timestamp: bool,
    /// Separator between the line's parts.
    pub separator: String,
    /// Timezone for timestamps; the system timezone is used otherwise.
    pub tz: Option<TimeZone>,
}

impl Default for MinimalFormatter {
    fn default() -> Self {
        MinimalFormatter {
            include_timestamp: false,
            separator: " | ".to_string(),
            tz: None,
        }
    }
}

impl MinimalFormatter {
    pub(crate) fn format(&self, record: &LogRecord, _config: &Config) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.include_timestamp {
            parts.push(format_timestamp(self.tz.as_ref()));
        }
        parts.push(record.level().as_str().to_uppercase());
        parts.push(record.msg().to_string());

        parts.join(&self.separator)
    }
}
