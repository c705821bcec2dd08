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

//! Formatters for turning compiled records into output strings.

use std::str::FromStr;

use jiff::Zoned;
use jiff::tz::TimeZone;

pub use custom::CustomFormatter;
pub use full::FullFormatter;
pub use full::LevelColor;
pub use json::JsonFormatter;
pub use minimal::MinimalFormatter;

use crate::config::Config;
use crate::error::Error;
use crate::record::LogRecord;

mod custom;
mod full;
mod json;
mod minimal;

/// A formatter turning a compiled record into an output string.
///
/// Formatters are pure reads of the record. Select a built-in by name via
/// [`FromStr`], or supply a [`CustomFormatter`] to take over entirely.
///
/// # Examples
///
/// ```
/// use loglet::Formatter;
///
/// let minimal: Formatter = "minimal".parse().unwrap();
/// let full: Formatter = "clean".parse().unwrap();
/// assert!("fancy".parse::<Formatter>().is_err());
/// ```
#[derive(Debug, Clone)]
pub enum Formatter {
    Json(JsonFormatter),
    Minimal(MinimalFormatter),
    Full(FullFormatter),
    Custom(CustomFormatter),
}

impl Formatter {
    pub(crate) fn format(&self, record: &LogRecord, config: &Config) -> String {
        match self {
            Formatter::Json(formatter) => formatter.format(record, config),
            Formatter::Minimal(formatter) => formatter.format(record, config),
            Formatter::Full(formatter) => formatter.format(record, config),
            Formatter::Custom(formatter) => formatter.format(record, config),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Json(JsonFormatter::default())
    }
}

impl FromStr for Formatter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(JsonFormatter::default().into()),
            "minimal" => Ok(MinimalFormatter::default().into()),
            "full" | "clean" => Ok(FullFormatter::default().into()),
            other => Err(Error::UnknownFormatter(other.to_string())),
        }
    }
}

impl From<JsonFormatter> for Formatter {
    fn from(formatter: JsonFormatter) -> Self {
        Formatter::Json(formatter)
    }
}

impl From<MinimalFormatter> for Formatter {
    fn from(formatter: MinimalFormatter) -> Self {
        Formatter::Minimal(formatter)
    }
}

impl From<FullFormatter> for Formatter {
    fn from(formatter: FullFormatter) -> Self {
        Formatter::Full(formatter)
    }
}

impl From<CustomFormatter> for Formatter {
    fn from(formatter: CustomFormatter) -> Self {
        Formatter::Custom(formatter)
    }
}

pub(crate) fn format_timestamp(tz: Option<&TimeZone>) -> String {
    match tz {
        Some(tz) => Zoned::now().with_time_zone(tz.clone()),
        None => Zoned::now(),
    }
    .strftime("%Y-%m-%dT%H:%M:%S.%6f%:z")
    .to_string()
}
