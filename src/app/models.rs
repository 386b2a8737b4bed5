use serde_json::{Map, Value};
use std::path::PathBuf;

/// Options shared by every command, after merging settings and CLI args.
#[derive(Debug, Clone)]
pub struct Options {
    pub target_root: PathBuf,
    pub dry_run: bool,
    /// Module specifier of the shared flat config the generated file imports.
    pub base_config: String,
    pub baseline_ignores: Vec<String>,
}

/// The `extends` field of a layered config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    pub fn references(&self) -> &[String] {
        match self {
            Extends::One(reference) => std::slice::from_ref(reference),
            Extends::Many(references) => references,
        }
    }
}

/// One tsconfig-style file as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredConfigDocument {
    pub path: PathBuf,
    pub extends: Option<Extends>,
    /// Top-level fields other than `extends` and `compilerOptions`.
    pub fields: Map<String, Value>,
    pub compiler_options: Map<String, Value>,
}

/// A flattened extends chain. Never carries an `extends` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    pub fields: Map<String, Value>,
    pub compiler_options: Map<String, Value>,
}

impl ResolvedConfig {
    pub fn compiler_option(&self, key: &str) -> Option<&Value> {
        self.compiler_options.get(key)
    }

    /// Reassembles the config as a single JSON object.
    pub fn to_value(&self) -> Value {
        let mut out = self.fields.clone();
        out.insert(
            "compilerOptions".to_string(),
            Value::Object(self.compiler_options.clone()),
        );
        Value::Object(out)
    }
}

/// Access level of a global variable in the flat config dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAccess {
    Readonly,
    Writable,
    Off,
}

impl GlobalAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalAccess::Readonly => "readonly",
            GlobalAccess::Writable => "writable",
            GlobalAccess::Off => "off",
        }
    }
}

/// Decoded `.eslintrc.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyConfigModel {
    pub ignore_patterns: Vec<String>,
    pub rules: Map<String, Value>,
    /// Environment name to enabled flag, in source order.
    pub env: Vec<(String, bool)>,
    /// Explicitly declared globals, in source order.
    pub globals: Vec<(String, GlobalAccess)>,
}

impl LegacyConfigModel {
    pub fn enabled_envs(&self) -> impl Iterator<Item = &str> {
        self.env
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(name, _)| name.as_str())
    }
}
