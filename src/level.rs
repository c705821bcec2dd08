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

//! The ordered severity level registry.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A severity level, ordered from most severe (`Fatal`) to least severe (`Trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// The sink method a level routes its output to.
///
/// Levels map onto a smaller set of output methods: `fatal` and `error` share
/// the `error` method, `debug` and `trace` share the `debug` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMethod {
    Debug,
    Info,
    Warn,
    Error,
}

impl OutputMethod {
    /// Returns the method name as used by console-like sinks.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMethod::Debug => "debug",
            OutputMethod::Info => "info",
            OutputMethod::Warn => "warn",
            OutputMethod::Error => "error",
        }
    }
}

/// One entry of the level registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDescriptor {
    /// Lowercase level name.
    pub name: &'static str,
    /// Sink method the level routes to.
    pub method: OutputMethod,
    /// Index used for threshold comparison; `0` is the most severe.
    pub rank: usize,
}

/// The registry of severity levels, most severe first.
pub static LEVELS: [LevelDescriptor; 6] = [
    LevelDescriptor {
        name: "fatal",
        method: OutputMethod::Error,
        rank: 0,
    },
    LevelDescriptor {
        name: "error",
        method: OutputMethod::Error,
        rank: 1,
    },
    LevelDescriptor {
        name: "warn",
        method: OutputMethod::Warn,
        rank: 2,
    },
    LevelDescriptor {
        name: "info",
        method: OutputMethod::Info,
        rank: 3,
    },
    LevelDescriptor {
        name: "debug",
        method: OutputMethod::Debug,
        rank: 4,
    },
    LevelDescriptor {
        name: "trace",
        method: OutputMethod::Debug,
        rank: 5,
    },
];

/// Resolves a level name (case-insensitive) to its registry entry.
///
/// # Examples
///
/// ```
/// use loglet::level::resolve;
///
/// assert_eq!(resolve("WARN").map(|d| d.rank), Some(2));
/// assert!(resolve("verbose").is_none());
/// ```
pub fn resolve(name: &str) -> Option<&'static LevelDescriptor> {
    LEVELS
        .iter()
        .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
}

impl Level {
    /// Returns the lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        self.descriptor().name
    }

    /// Returns the index of the level in the registry; `0` is the most severe.
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Returns the registry entry for the level.
    pub fn descriptor(&self) -> &'static LevelDescriptor {
        &LEVELS[self.rank()]
    }

    /// Returns the sink method the level routes to.
    pub fn output_method(&self) -> OutputMethod {
        self.descriptor().method
    }

    /// Whether a message at this level passes the configured threshold.
    ///
    /// A `None` threshold disables emission entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use loglet::Level;
    ///
    /// assert!(Level::Error.is_enabled(Some(Level::Info)));
    /// assert!(!Level::Debug.is_enabled(Some(Level::Info)));
    /// assert!(!Level::Fatal.is_enabled(None));
    /// ```
    pub fn is_enabled(&self, threshold: Option<Level>) -> bool {
        threshold.is_some_and(|threshold| self.rank() <= threshold.rank())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const VALUES: [Level; 6] = [
            Level::Fatal,
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ];

        resolve(s)
            .map(|descriptor| VALUES[descriptor.rank])
            .ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
