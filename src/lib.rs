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

//! Loglet compiles log calls into structured, serializable records with
//! configurable key names and pluggable output formatting.
//!
//! # Overview
//!
//! Each log call runs through one pipeline: the message is normalized
//! (errors contribute their message, stack, and source), metadata from the
//! call, the configuration, and an optional dynamic hook are merged, tags
//! are resolved (including `<<level>>` templating and computed tags), and
//! the result is rendered by a formatter and written to a console-like
//! sink. Every call returns the compiled [`LogRecord`], and listeners are
//! notified per record for custom integrations.
//!
//! # Examples
//!
//! Simple logging with the default JSON formatter:
//!
//! ```
//! use loglet::Logger;
//! use serde_json::json;
//!
//! let log = Logger::new();
//!
//! let record = log.info("Hello world", None, None).unwrap();
//! assert_eq!(record.msg(), "Hello world");
//!
//! let failed = log.error("Something failed", Some(json!({"file": "x.csv"})), None).unwrap();
//! assert!(failed.to_json(false).contains("x.csv"));
//! ```
//!
//! Configured construction with renamed keys and tags:
//!
//! ```
//! use loglet::Config;
//! use loglet::KeyName;
//! use loglet::Logger;
//! use loglet::Tag;
//!
//! let log = Logger::with_config(Config {
//!     level_key: KeyName::Named("severity".to_string()),
//!     tags: vec![Tag::from("audit"), Tag::from("log-<<level>>")],
//!     ..Config::default()
//! });
//!
//! let record = log.warn("low disk space", None, None).unwrap();
//! assert_eq!(record.tags(), vec!["audit", "log-warn"]);
//! ```

pub mod config;
pub mod format;
pub mod handler;
pub mod level;
pub mod message;
pub mod record;
pub mod tags;

mod bridge;
mod error;
mod logger;
mod stringify;

pub use config::CompileFn;
pub use config::Config;
pub use config::DynamicMetaFn;
pub use config::KeyName;
pub use config::ParseFn;
pub use error::Error;
pub use format::CustomFormatter;
pub use format::Formatter;
pub use format::FullFormatter;
pub use format::JsonFormatter;
pub use format::LevelColor;
pub use format::MinimalFormatter;
pub use handler::Capture;
pub use handler::Console;
pub use handler::LogHandler;
pub use level::LEVELS;
pub use level::Level;
pub use level::LevelDescriptor;
pub use level::OutputMethod;
pub use logger::ListenerId;
pub use logger::Logger;
pub use message::ErrorLike;
pub use message::Message;
pub use message::ParsedMessage;
pub use record::LogInput;
pub use record::LogRecord;
pub use stringify::ReplacerFn;
pub use stringify::safe_stringify;
pub use tags::Tag;
pub use tags::TagContext;
pub use tags::TagFn;
