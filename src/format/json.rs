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

use crate::config::Config;
use crate::record::LogRecord;
use crate::stringify::safe_stringify;

/// The default formatter: the record's keyed object as one JSON line.
///
/// Output format:
///
/// ```json
/// {"__level":"info","msg":"Hello world","__tags":[]}
/// ```
///
/// The configured replacer is applied during serialization, and output is
/// pretty-printed when the configuration is in development mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub(crate) fn format(&self, record: &LogRecord, config: &Config) -> String {
        safe_stringify(
            &record.value(),
            config.replacer.as_ref(),
            if config.dev { 2 } else { 0 },
        )
    }
}
