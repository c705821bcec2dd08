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

use std::sync::Arc;

use loglet::Capture;
use loglet::Config;
use loglet::Level;
use loglet::Logger;
use serde_json::Value;
use serde_json::json;

// The log crate allows exactly one global logger per process, so this file
// holds a single test.
#[test]
fn log_crate_records_flow_through_the_pipeline() {
    let capture = Capture::default();
    Logger::with_config(Config {
        level: Some(Level::Trace),
        log_handler: Arc::new(capture.clone()),
        ..Config::default()
    })
    .apply();

    log::info!(target: "app", user = 42; "bridged message");
    log::debug!("second message");

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);

    let first: Value = serde_json::from_str(&lines[0].1).unwrap();
    assert_eq!(first["__level"], json!("info"));
    assert_eq!(first["msg"], json!("bridged message"));
    assert_eq!(first["target"], json!("app"));
    assert_eq!(first["user"], json!("42"));

    let second: Value = serde_json::from_str(&lines[1].1).unwrap();
    assert_eq!(second["__level"], json!("debug"));
}
