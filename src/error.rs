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

/// Errors surfaced by the logging entry points.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The level name passed to [`Logger::log`](crate::Logger::log) is not registered.
    #[error("\"{0}\" is not a valid log level")]
    InvalidLevel(String),
    /// The formatter name does not resolve to a built-in formatter.
    #[error("\"{0}\" is not a known formatter")]
    UnknownFormatter(String),
}
