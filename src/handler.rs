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

//! Output sinks for formatted log lines.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::level::OutputMethod;

/// A console-like output sink.
///
/// The pipeline calls exactly one method per emitted record, selected by the
/// record level's [`OutputMethod`], with the formatted line as the single
/// argument. Sinks are assumed non-blocking; the pipeline performs no
/// buffering, batching, or retries on their behalf.
pub trait LogHandler: fmt::Debug + Send + Sync + 'static {
    fn debug(&self, line: &str);
    fn info(&self, line: &str);
    fn warn(&self, line: &str);
    fn error(&self, line: &str);

    /// Flushes any buffered output.
    fn flush(&self) {}

    /// Routes a line to the method named by `method`.
    fn write(&self, method: OutputMethod, line: &str) {
        match method {
            OutputMethod::Debug => self.debug(line),
            OutputMethod::Info => self.info(line),
            OutputMethod::Warn => self.warn(line),
            OutputMethod::Error => self.error(line),
        }
    }
}

/// The default sink: `info` and `debug` lines go to stdout, `warn` and
/// `error` lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl LogHandler for Console {
    fn debug(&self, line: &str) {
        let _ = writeln!(std::io::stdout(), "{line}");
    }

    fn info(&self, line: &str) {
        let _ = writeln!(std::io::stdout(), "{line}");
    }

    fn warn(&self, line: &str) {
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn error(&self, line: &str) {
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

/// A sink that captures lines in memory, for tests and assertions.
///
/// Clones share the same buffer, so a `Capture` can be handed to a logger
/// while the test keeps a handle for inspection.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use loglet::Capture;
/// use loglet::Config;
/// use loglet::Logger;
///
/// let capture = Capture::default();
/// let log = Logger::with_config(Config {
///     log_handler: Arc::new(capture.clone()),
///     ..Config::default()
/// });
///
/// log.info("hello", None, None).unwrap();
/// assert_eq!(capture.lines().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Capture {
    lines: Arc<Mutex<Vec<(OutputMethod, String)>>>,
}

impl Capture {
    /// Returns every captured line with the method it was routed to.
    pub fn lines(&self) -> Vec<(OutputMethod, String)> {
        self.lines.lock().clone()
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Discards every captured line.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn push(&self, method: OutputMethod, line: &str) {
        self.lines.lock().push((method, line.to_string()));
    }
}

impl LogHandler for Capture {
    fn debug(&self, line: &str) {
        self.push(OutputMethod::Debug, line);
    }

    fn info(&self, line: &str) {
        self.push(OutputMethod::Info, line);
    }

    fn warn(&self, line: &str) {
        self.push(OutputMethod::Warn, line);
    }

    fn error(&self, line: &str) {
        self.push(OutputMethod::Error, line);
    }
}
