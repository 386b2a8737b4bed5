use crate::app::decode::parse_lenient;
use crate::app::error::ParseError;
use crate::app::models::{GlobalAccess, LegacyConfigModel};
use serde_json::{Map, Value};

pub const LEGACY_CONFIG_FILE: &str = ".eslintrc.json";
pub const LEGACY_IGNORE_FILE: &str = ".eslintignore";

/// Keys that have no counterpart in the generated config and are dropped quietly.
const SILENTLY_DROPPED: &[&str] = &["extends", "root", "$schema"];
const MIGRATED: &[&str] = &["ignorePatterns", "rules", "env", "globals"];

/// Decodes a legacy config leniently (comments and trailing commas allowed).
pub fn parse(text: &str) -> Result<LegacyConfigModel, ParseError> {
    let value = parse_lenient(text)?;
    let Value::Object(mut document) = value else {
        return Err(ParseError::new("expected an object at the top level"));
    };

    let model = LegacyConfigModel {
        ignore_patterns: ignore_patterns(document.remove("ignorePatterns"))?,
        rules: object_field("rules", document.remove("rules"))?,
        env: env_field(document.remove("env"))?,
        globals: globals_field(document.remove("globals"))?,
    };

    let dropped: Vec<&str> = document
        .keys()
        .map(String::as_str)
        .filter(|key| !SILENTLY_DROPPED.contains(key) && !MIGRATED.contains(key))
        .collect();
    if !dropped.is_empty() {
        log::warn!(
            "Legacy settings not carried over to the flat config: {}",
            dropped.join(", ")
        );
    }

    Ok(model)
}

fn ignore_patterns(value: Option<Value>) -> Result<Vec<String>, ParseError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(pattern)) => Ok(vec![pattern]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(pattern) => Ok(pattern),
                other => Err(ParseError::new(format!(
                    "ignorePatterns entries must be strings, found {}",
                    other
                ))),
            })
            .collect(),
        Some(other) => Err(ParseError::new(format!(
            "ignorePatterns must be a string or an array of strings, found {}",
            other
        ))),
    }
}

fn object_field(name: &str, value: Option<Value>) -> Result<Map<String, Value>, ParseError> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ParseError::new(format!(
            "{} must be an object, found {}",
            name, other
        ))),
    }
}

fn env_field(value: Option<Value>) -> Result<Vec<(String, bool)>, ParseError> {
    object_field("env", value)?
        .into_iter()
        .map(|(name, enabled)| match enabled {
            Value::Bool(enabled) => Ok((name, enabled)),
            other => Err(ParseError::new(format!(
                "env.{} must be a boolean, found {}",
                name, other
            ))),
        })
        .collect()
}

fn globals_field(value: Option<Value>) -> Result<Vec<(String, GlobalAccess)>, ParseError> {
    object_field("globals", value)?
        .into_iter()
        .map(|(name, setting)| {
            let access = match &setting {
                Value::Bool(false) => GlobalAccess::Readonly,
                Value::Bool(true) => GlobalAccess::Writable,
                Value::String(s) => match s.as_str() {
                    "readonly" | "readable" => GlobalAccess::Readonly,
                    "writable" | "writeable" => GlobalAccess::Writable,
                    "off" => GlobalAccess::Off,
                    _ => {
                        return Err(ParseError::new(format!(
                            "globals.{} has unknown setting {:?}",
                            name, s
                        )))
                    }
                },
                other => {
                    return Err(ParseError::new(format!(
                        "globals.{} must be a boolean or string, found {}",
                        name, other
                    )))
                }
            };
            Ok((name, access))
        })
        .collect()
}

/// Patterns from an ignore file: one per line (`\n`, `\r\n` or `\r`),
/// `#` starts a comment line.
pub fn parse_ignore_file(contents: &str) -> Vec<String> {
    contents
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
