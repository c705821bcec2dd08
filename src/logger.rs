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

//! The public logging facade.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use parking_lot::RwLock;
use serde_json::Value;

use crate::config::Config;
use crate::error::Error;
use crate::level::LEVELS;
use crate::level::Level;
use crate::level::LevelDescriptor;
use crate::message::Message;
use crate::record::LogInput;
use crate::record::LogRecord;
use crate::tags::Tag;

/// Handle to a registered listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ListenerFn = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// A logger facade that compiles log calls into [`LogRecord`]s, writes them
/// to the configured sink, and notifies registered listeners.
///
/// Every logging method returns the compiled record, or `None` when the
/// call was gated by the level threshold. Silent mode suppresses sink
/// writes only: records are still compiled, returned, and delivered to
/// listeners.
///
/// # Examples
///
/// ```
/// use loglet::Logger;
/// use serde_json::json;
///
/// let log = Logger::new();
///
/// let record = log.info("user logged in", Some(json!({"user": 42})), None).unwrap();
/// assert_eq!(record.msg(), "user logged in");
///
/// // Below the default `info` threshold: not logged.
/// assert!(log.debug("noisy detail", None, None).is_none());
/// ```
pub struct Logger {
    config: Config,
    listeners: RwLock<Vec<(ListenerId, ListenerFn)>>,
    next_listener: AtomicU64,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger with the default configuration, applying the
    /// `LOGLET_*` environment overrides.
    pub fn new() -> Logger {
        Self::with_config(Config::default())
    }

    /// Creates a logger with the given configuration. The `LOGLET_*`
    /// environment overrides are applied once, on top of the configuration.
    pub fn with_config(mut config: Config) -> Logger {
        config.apply_env_overrides();
        Logger {
            config,
            listeners: RwLock::new(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration, for adjustments between calls.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The level registry, most severe first.
    pub fn levels() -> &'static [LevelDescriptor] {
        &LEVELS
    }

    /// Logs a message at a level given by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`] if the name is not a registered
    /// level. A recognized level gated by the threshold is not an error:
    /// it yields `Ok(None)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use loglet::Logger;
    ///
    /// let log = Logger::new();
    /// let record = log.log("warn", "disk almost full", None, None).unwrap();
    /// assert_eq!(record.unwrap().level().as_str(), "warn");
    ///
    /// assert!(log.log("verbose", "nope", None, None).is_err());
    /// ```
    pub fn log(
        &self,
        level: &str,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Result<Option<LogRecord>, Error> {
        let level = Level::from_str(level)?;
        Ok(self.emit(level, msg.into(), meta, tags))
    }

    /// Logs a message at the `trace` level.
    pub fn trace(
        &self,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        self.emit(Level::Trace, msg.into(), meta, tags)
    }

    /// Logs a message at the `debug` level.
    pub fn debug(
        &self,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        self.emit(Level::Debug, msg.into(), meta, tags)
    }

    /// Logs a message at the `info` level.
    pub fn info(
        &self,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        self.emit(Level::Info, msg.into(), meta, tags)
    }

    /// Logs a message at the `warn` level.
    pub fn warn(
        &self,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        self.emit(Level::Warn, msg.into(), meta, tags)
    }

    /// Logs a message at the `error` level.
    pub fn error(
        &self,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        self.emit(Level::Error, msg.into(), meta, tags)
    }

    /// Logs a message at the `fatal` level.
    pub fn fatal(
        &self,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        self.emit(Level::Fatal, msg.into(), meta, tags)
    }

    /// Logs at the `error` level when `test` is false; returns `None` when
    /// the assertion holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use loglet::Logger;
    ///
    /// let log = Logger::new();
    /// assert!(log.assert(true, "unreachable", None, None).is_none());
    /// assert!(log.assert(false, "invariant broken", None, None).is_some());
    /// ```
    pub fn assert(
        &self,
        test: bool,
        msg: impl Into<Message>,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        if test {
            return None;
        }
        self.emit(Level::Error, msg.into(), meta, tags)
    }

    /// Awaits a future and logs its outcome: the success value at `info`,
    /// the error at `error`. Never fails; a failed future becomes an
    /// ordinary error-level record.
    ///
    /// # Examples
    ///
    /// ```
    /// use loglet::ErrorLike;
    /// use loglet::Logger;
    ///
    /// # async fn demo() {
    /// let log = Logger::new();
    ///
    /// let future = async { Ok::<_, ErrorLike>("ready") };
    /// let record = log.result(future, None, None).await.unwrap();
    /// assert_eq!(record.level().as_str(), "info");
    /// assert_eq!(record.msg(), "ready");
    /// # }
    /// ```
    pub async fn result<T, E, F>(
        &self,
        future: F,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord>
    where
        F: Future<Output = Result<T, E>>,
        T: Into<Message>,
        E: Into<Message>,
    {
        match future.await {
            Ok(value) => self.emit(Level::Info, value.into(), meta, tags),
            Err(error) => self.emit(Level::Error, error.into(), meta, tags),
        }
    }

    /// Registers a listener notified with every compiled record, including
    /// in silent mode. Listeners run synchronously in registration order;
    /// a panicking listener propagates to the logging caller.
    pub fn on_log(&self, listener: impl Fn(&LogRecord) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener; returns whether it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub(crate) fn emit(
        &self,
        level: Level,
        msg: Message,
        meta: Option<Value>,
        tags: Option<Vec<Tag>>,
    ) -> Option<LogRecord> {
        if !self.config.is_enabled(level) {
            return None;
        }

        let record = LogRecord::new(
            LogInput {
                level,
                msg,
                meta,
                tags,
            },
            Arc::new(self.config.clone()),
        );

        if !self.config.silent {
            let line = record.to_string();
            self.config
                .log_handler
                .write(level.output_method(), &line);
        }

        self.notify(&record);

        Some(record)
    }

    fn notify(&self, record: &LogRecord) {
        // Listeners may register or remove others while running.
        let listeners: Vec<ListenerFn> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(record);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}
