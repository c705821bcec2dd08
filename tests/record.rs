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

use loglet::Config;
use loglet::ErrorLike;
use loglet::KeyName;
use loglet::Level;
use loglet::LogInput;
use loglet::LogRecord;
use loglet::Message;
use loglet::Tag;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

fn compile(input: LogInput, config: Config) -> LogRecord {
    LogRecord::new(input, Arc::new(config))
}

fn input(msg: impl Into<Message>) -> LogInput {
    LogInput {
        level: Level::Info,
        msg: msg.into(),
        meta: None,
        tags: None,
    }
}

#[test]
fn merge_order_later_sources_win() {
    let config = Config {
        meta: Map::from_iter([
            ("source".to_string(), json!("global")),
            ("global_only".to_string(), json!(true)),
        ]),
        dynamic_meta: Some(Arc::new(|_, _| Some(json!({"source": "dynamic"})))),
        ..Config::default()
    };

    let record = compile(
        LogInput {
            level: Level::Info,
            msg: Message::from("x"),
            meta: Some(json!({"instance_only": 1})),
            tags: None,
        },
        config,
    );

    let meta = record.meta();
    assert_eq!(meta.get("source"), Some(&json!("dynamic")));
    assert_eq!(meta.get("global_only"), Some(&json!(true)));
    assert_eq!(meta.get("instance_only"), Some(&json!(1)));
}

#[test]
fn error_derived_meta_never_overrides_caller_meta() {
    let error = ErrorLike::new("boom").with_stack("from-error");

    let record = compile(
        LogInput {
            level: Level::Error,
            msg: error.into(),
            meta: Some(json!({"stack": "from-caller"})),
            tags: None,
        },
        Config::default(),
    );

    assert_eq!(record.msg(), "boom");
    assert_eq!(record.meta().get("stack"), Some(&json!("from-caller")));
}

#[test]
fn non_object_meta_is_wrapped() {
    let record = compile(
        LogInput {
            level: Level::Info,
            msg: Message::from("x"),
            meta: Some(json!("request context")),
            tags: None,
        },
        Config::default(),
    );

    assert_eq!(record.meta().get("meta"), Some(&json!("request context")));
}

#[test]
fn dynamic_meta_non_object_results_are_ignored() {
    let config = Config {
        dynamic_meta: Some(Arc::new(|_, _| Some(json!("not an object")))),
        ..Config::default()
    };

    let record = compile(input("x"), config);
    assert!(record.meta().is_empty());
}

#[test]
fn error_valued_meta_is_stubbed() {
    let record = compile(
        LogInput {
            level: Level::Warn,
            msg: Message::from("x"),
            meta: Some(json!({"cause": {"message": "inner", "stack": "trace", "code": 13}})),
            tags: None,
        },
        Config::default(),
    );

    let meta = record.meta();
    assert_eq!(meta["cause"]["name"], json!("Error"));
    assert_eq!(meta["cause"]["message"], json!("inner"));
    assert_eq!(meta["cause"]["stack"], json!("trace"));
    assert_eq!(meta["cause"]["code"], json!(13));
}

#[test]
fn default_keys_render_level_message_and_tags() {
    let record = compile(
        LogInput {
            level: Level::Info,
            msg: Message::from("hello"),
            meta: Some(json!({"a": 1})),
            tags: Some(vec![Tag::from("one")]),
        },
        Config::default(),
    );

    let value = record.value();
    assert_eq!(value["__level"], json!("info"));
    assert_eq!(value["msg"], json!("hello"));
    assert_eq!(value["a"], json!(1));
    assert_eq!(value["__tags"], json!(["one"]));
}

#[test]
fn key_naming_distinguishes_renamed_disabled_and_default() {
    let config = Config {
        level_key: KeyName::Named("severity".to_string()),
        message_key: Some("text".to_string()),
        tags_key: KeyName::Off,
        ..Config::default()
    };

    let record = compile(input("hello"), config);
    let value = record.value();

    assert_eq!(value["severity"], json!("info"));
    assert_eq!(value["text"], json!("hello"));
    assert!(value.get("__level").is_none());
    assert!(value.get("__tags").is_none());
}

#[test]
fn disabled_level_key_is_distinct_from_unset() {
    let disabled = compile(
        input("x"),
        Config {
            level_key: KeyName::Off,
            ..Config::default()
        },
    );
    assert!(disabled.value().get("__level").is_none());

    let unset = compile(input("x"), Config::default());
    assert_eq!(unset.value()["__level"], json!("info"));
}

#[test]
fn tags_resolve_global_first_then_instance() {
    let config = Config {
        tags: vec![Tag::from("global"), Tag::from("log-<<level>>")],
        ..Config::default()
    };

    let record = compile(
        LogInput {
            level: Level::Info,
            msg: Message::from("x"),
            meta: None,
            tags: Some(vec![
                Tag::from("instance"),
                Tag::from(7i64),
                Tag::computed(|ctx| Some(format!("computed-{}", ctx.level))),
                Tag::computed(|_| None),
            ]),
        },
        config,
    );

    assert_eq!(
        record.tags(),
        vec!["global", "log-info", "instance", "computed-info"]
    );
}

#[test]
fn set_msg_reruns_normalization() {
    let mut record = compile(input("plain"), Config::default());
    assert!(record.source_error().is_none());

    record.set_msg(ErrorLike::new("late failure").with_stack("late-stack"));

    assert_eq!(record.msg(), "late failure");
    assert_eq!(record.meta().get("stack"), Some(&json!("late-stack")));
    assert_eq!(record.source_error().map(|e| e.message.as_str()), Some("late failure"));
}

#[test]
fn merge_meta_and_append_tags_mutate_the_accumulators() {
    let mut record = compile(input("x"), Config::default());

    record.merge_meta(json!({"a": 1}));
    record.merge_meta(json!({"a": 2, "b": 3}));
    record.append_tags([Tag::from("late")]);

    let meta = record.meta();
    assert_eq!(meta.get("a"), Some(&json!(2)));
    assert_eq!(meta.get("b"), Some(&json!(3)));
    assert_eq!(record.tags(), vec!["late"]);
}

#[test]
fn to_json_is_idempotent_and_round_trips() {
    let record = compile(
        LogInput {
            level: Level::Info,
            msg: Message::from("round trip"),
            meta: Some(json!({"n": [1, 2, 3]})),
            tags: Some(vec![Tag::from("t")]),
        },
        Config::default(),
    );

    let first = record.to_json(false);
    let second = record.to_json(false);
    assert_eq!(first, second);

    let parsed: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(parsed["msg"], json!("round trip"));
    assert_eq!(parsed["n"], json!([1, 2, 3]));
}

#[test]
fn to_json_respects_the_configured_message_key() {
    let record = compile(
        input("renamed"),
        Config {
            message_key: Some("message".to_string()),
            ..Config::default()
        },
    );

    let parsed: Value = serde_json::from_str(&record.to_json(false)).unwrap();
    assert_eq!(parsed["message"], json!("renamed"));
}

#[test]
fn pretty_json_is_indented() {
    let record = compile(input("pretty"), Config::default());
    assert!(record.to_json(true).contains('\n'));
    assert!(!record.to_json(false).contains('\n'));
}

#[test]
fn compile_hook_overrides_rendering_entirely() {
    let config = Config {
        on_compile: Some(Arc::new(|level, msg, _meta, tags, _config| {
            json!({"lvl": level.as_str(), "text": msg, "count": tags.len()})
        })),
        ..Config::default()
    };

    let record = compile(
        LogInput {
            level: Level::Debug,
            msg: Message::from("custom"),
            meta: Some(json!({"dropped": true})),
            tags: Some(vec![Tag::from("t")]),
        },
        config,
    );

    let value = record.value();
    assert_eq!(value, json!({"lvl": "debug", "text": "custom", "count": 1}));
}

#[test]
fn structured_message_serializes_to_compact_json() {
    let record = compile(input(Message::from(json!({"op": "sync"}))), Config::default());
    assert_eq!(record.msg(), r#"{"op":"sync"}"#);
}

#[test]
fn into_error_returns_source_or_synthesizes() {
    let from_error = compile(
        input(ErrorLike::new("kept").with_name("IoError")),
        Config::default(),
    );
    let error = from_error.into_error();
    assert_eq!(error.name, "IoError");
    assert_eq!(error.message, "kept");

    let synthesized = compile(input("no error here"), Config::default()).into_error();
    assert_eq!(synthesized.name, "Error");
    assert_eq!(synthesized.message, "no error here");
}

#[test]
fn replacer_redacts_and_removes_keys() {
    let config = Config {
        replacer: Some(Arc::new(|key, value| {
            if key == "ssn" {
                return Some(json!("***"));
            }
            if key == "secret" {
                return None;
            }
            Some(value.clone())
        })),
        ..Config::default()
    };

    let record = compile(
        LogInput {
            level: Level::Info,
            msg: Message::from("x"),
            meta: Some(json!({"ssn": "444-55-6666", "secret": "hide me"})),
            tags: None,
        },
        config,
    );

    let parsed: Value = serde_json::from_str(&record.to_json(false)).unwrap();
    assert_eq!(parsed["ssn"], json!("***"));
    assert!(parsed.get("secret").is_none());
}
