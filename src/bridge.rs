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

//! Bridge from the `log` crate facade into the record pipeline.

use serde_json::Map;
use serde_json::Value;

use crate::level::Level;
use crate::logger::Logger;
use crate::message::Message;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

fn max_level_filter(threshold: Option<Level>) -> log::LevelFilter {
    match threshold {
        None => log::LevelFilter::Off,
        Some(Level::Fatal) | Some(Level::Error) => log::LevelFilter::Error,
        Some(Level::Warn) => log::LevelFilter::Warn,
        Some(Level::Info) => log::LevelFilter::Info,
        Some(Level::Debug) => log::LevelFilter::Debug,
        Some(Level::Trace) => log::LevelFilter::Trace,
    }
}

struct KvCollector<'a> {
    kvs: &'a mut Map<String, Value>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        let k = key.to_string();
        let v = value.to_string();
        self.kvs.insert(k, v.into());
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.config().is_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let mut meta = Map::new();
        if !record.target().is_empty() {
            meta.insert(
                "target".to_string(),
                Value::String(record.target().to_string()),
            );
        }

        let mut visitor = KvCollector { kvs: &mut meta };
        let _ = record.key_values().visit(&mut visitor);

        let meta = if meta.is_empty() {
            None
        } else {
            Some(Value::Object(meta))
        };

        let _ = self.emit(
            Level::from(record.level()),
            Message::from(record.args().to_string()),
            meta,
            None,
        );
    }

    fn flush(&self) {
        self.config().log_handler.flush();
    }
}

impl Logger {
    /// Sets this logger up as the `log` crate's global backend, so that
    /// `log::info!` and friends flow through the record pipeline.
    ///
    /// The global maximum level is derived from the configured threshold.
    ///
    /// # Errors
    ///
    /// This function will fail if it is called more than once, or if
    /// another library has already initialized a global logger.
    pub fn try_apply(self) -> Result<(), log::SetLoggerError> {
        let max_level = max_level_filter(self.config().level);
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Sets this logger up as the `log` crate's global backend.
    ///
    /// # Panics
    ///
    /// This function will panic if it is called more than once, or if
    /// another library has already initialized a global logger.
    pub fn apply(self) {
        self.try_apply()
            .expect("Logger::apply should not be called after the global logger initialized");
    }
}
