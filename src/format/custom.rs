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

use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::config::Config;
use crate::record::LogRecord;

type FormatFunction = dyn Fn(&LogRecord, &Config) -> String + Send + Sync + 'static;

/// A formatter backed by a caller-supplied function.
///
/// The function receives the record and the active configuration and
/// returns the output line; [`safe_stringify`](crate::safe_stringify) is
/// available for serializing the record's value.
///
/// # Examples
///
/// ```
/// use loglet::CustomFormatter;
///
/// let formatter = CustomFormatter::new(|record, _config| {
///     format!("{} - {}", record.level(), record.msg())
/// });
/// ```
#[derive(Clone)]
pub struct CustomFormatter {
    f: Arc<FormatFunction>,
}

impl Debug for CustomFormatter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "CustomFormatter {{ ... }}")
    }
}

impl CustomFormatter {
    pub fn new(formatter: impl Fn(&LogRecord, &Config) -> String + Send + Sync + 'static) -> Self {
        CustomFormatter {
            f: Arc::new(formatter),
        }
    }

    pub(crate) fn format(&self, record: &LogRecord, config: &Config) -> String {
        (self.f)(record, config)
    }
}
