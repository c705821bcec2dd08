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

//! Tags attached to log records: plain strings, numbers, and lazily
//! evaluated functions, with `<<level>>` template substitution.

use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::config::Config;
use crate::level::Level;

/// The context passed to function tags when they are resolved.
#[derive(Debug)]
pub struct TagContext<'a> {
    /// Level of the record being compiled.
    pub level: Level,
    /// Fully merged metadata of the record.
    pub meta: &'a Map<String, Value>,
    /// The active configuration.
    pub config: &'a Config,
}

/// A computed tag. Returning `None` removes the tag from the record.
pub type TagFn = Arc<dyn Fn(&TagContext<'_>) -> Option<String> + Send + Sync>;

/// One tag attached to a log record.
///
/// String tags support the `<<level>>` substitution token; every other
/// `<<...>>` pattern passes through unchanged. Function tags are evaluated
/// lazily each time the record's tags are read.
///
/// # Examples
///
/// ```
/// use loglet::Tag;
///
/// let plain = Tag::from("audit");
/// let templated = Tag::from("log-<<level>>");
/// let computed = Tag::computed(|ctx| Some(format!("rank-{}", ctx.level.rank())));
/// ```
#[derive(Clone)]
pub enum Tag {
    Text(String),
    Number(serde_json::Number),
    Fn(TagFn),
}

impl Tag {
    /// Creates a function tag.
    pub fn computed(f: impl Fn(&TagContext<'_>) -> Option<String> + Send + Sync + 'static) -> Self {
        Tag::Fn(Arc::new(f))
    }

    /// Resolves the tag against the given context.
    ///
    /// Function tags are invoked and their result substituted; string
    /// results then undergo `<<level>>` substitution like plain string
    /// tags. Anything that does not resolve to a non-empty string is
    /// dropped, including number tags.
    pub(crate) fn resolve(&self, ctx: &TagContext<'_>) -> Option<String> {
        let text = match self {
            Tag::Text(text) => text.clone(),
            Tag::Fn(f) => f(ctx)?,
            Tag::Number(_) => return None,
        };

        Some(expand_level_tokens(&text, ctx.level)).filter(|text| !text.is_empty())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Tag::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Tag::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::Text(value.to_string())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::Text(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Number(value.into())
    }
}

impl From<u64> for Tag {
    fn from(value: u64) -> Self {
        Tag::Number(value.into())
    }
}

/// Replaces every `<<level>>` token with the level name.
///
/// A token is `<<` followed by ASCII alphanumerics or underscores and `>>`.
/// Only the exact key `level` is recognized; all other tokens, and any
/// malformed bracket patterns, are left literal.
fn expand_level_tokens(input: &str, level: Level) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("<<") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let token = after.find(">>").map(|end| &after[..end]).filter(|key| {
            !key.is_empty()
                && key
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        });

        match token {
            Some(key) => {
                if key == "level" {
                    out.push_str(level.as_str());
                } else {
                    out.push_str("<<");
                    out.push_str(key);
                    out.push_str(">>");
                }
                rest = &after[key.len() + 2..];
            }
            None => {
                out.push_str("<<");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(tag: &Tag, level: Level) -> Option<String> {
        let meta = Map::new();
        let config = Config::default();
        let ctx = TagContext {
            level,
            meta: &meta,
            config: &config,
        };
        tag.resolve(&ctx)
    }

    #[test]
    fn level_token_is_substituted() {
        let tag = Tag::from("log-<<level>>");
        assert_eq!(resolve(&tag, Level::Warn), Some("log-warn".to_string()));
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let tag = Tag::from("<<foo>>-<<level>>");
        assert_eq!(resolve(&tag, Level::Info), Some("<<foo>>-info".to_string()));
    }

    #[test]
    fn malformed_patterns_are_left_literal() {
        assert_eq!(
            resolve(&Tag::from("<<le vel>>"), Level::Info),
            Some("<<le vel>>".to_string())
        );
        assert_eq!(
            resolve(&Tag::from("<<level"), Level::Info),
            Some("<<level".to_string())
        );
        // An invalid open recovers in time to see the next token.
        assert_eq!(
            resolve(&Tag::from("<<a<<level>>"), Level::Info),
            Some("<<ainfo".to_string())
        );
    }

    #[test]
    fn uppercase_key_is_not_recognized() {
        let tag = Tag::from("<<LEVEL>>");
        assert_eq!(resolve(&tag, Level::Info), Some("<<LEVEL>>".to_string()));
    }

    #[test]
    fn function_tags_resolve_lazily_and_substitute() {
        let tag = Tag::computed(|ctx| Some(format!("from-<<level>>-{}", ctx.meta.len())));
        assert_eq!(resolve(&tag, Level::Debug), Some("from-debug-0".to_string()));
    }

    #[test]
    fn falsy_results_drop_the_tag() {
        assert_eq!(resolve(&Tag::computed(|_| None), Level::Info), None);
        assert_eq!(
            resolve(&Tag::computed(|_| Some(String::new())), Level::Info),
            None
        );
        assert_eq!(resolve(&Tag::from(""), Level::Info), None);
    }

    #[test]
    fn number_tags_are_dropped() {
        assert_eq!(resolve(&Tag::from(42i64), Level::Info), None);
    }
}
