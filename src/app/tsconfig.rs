//! Flattening of `tsconfig.json` extends chains.
//!
//! Each file may extend one or more other files; references are resolved
//! relative to the directory of the file that declares them. One visited set
//! is threaded through the whole walk and a file may be entered only once per
//! resolution, so a cycle fails fast instead of recursing forever. Two
//! siblings extending the same file count as re-entering it.
//!
//! Merge rules (derived document wins over its ancestors):
//! - top-level fields: replaced wholesale by key
//! - `compilerOptions`: merged one level deep, key by key
//! - `extends`: consumed, never present in the result

use crate::app::decode::{Decoder, LenientJson};
use crate::app::error::ResolutionError;
use crate::app::models::{Extends, LayeredConfigDocument, ResolvedConfig};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Where config text comes from. The filesystem in production.
pub trait SourceReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

pub struct ConfigChainResolver<R = FsReader, D = LenientJson> {
    reader: R,
    decoder: D,
}

impl Default for ConfigChainResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigChainResolver {
    pub fn new() -> Self {
        Self {
            reader: FsReader,
            decoder: LenientJson,
        }
    }
}

impl<R: SourceReader, D: Decoder> ConfigChainResolver<R, D> {
    pub fn with_parts(reader: R, decoder: D) -> Self {
        Self { reader, decoder }
    }

    /// Resolves `start_file` (relative to `base_dir`) and everything it extends.
    pub fn resolve(
        &self,
        start_file: &Path,
        base_dir: &Path,
    ) -> Result<ResolvedConfig, ResolutionError> {
        let base_dir = if base_dir.is_absolute() {
            base_dir.to_path_buf()
        } else {
            let cwd = std::env::current_dir().map_err(|error| ResolutionError::Io {
                path: base_dir.to_path_buf(),
                error,
            })?;
            cwd.join(base_dir)
        };
        let mut visited = HashSet::new();
        self.resolve_from(start_file, &base_dir, &mut visited)
    }

    fn resolve_from(
        &self,
        reference: &Path,
        dir: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<ResolvedConfig, ResolutionError> {
        let path = normalize_path(&dir.join(reference));
        if !visited.insert(path.clone()) {
            return Err(ResolutionError::CircularReference(path));
        }

        self.resolve_document(&path, visited)
            .map_err(|e| ResolutionError::nested(&path, e))
    }

    fn resolve_document(
        &self,
        path: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<ResolvedConfig, ResolutionError> {
        let document = self.load(path)?;
        log::debug!("Loaded {}", document.path.display());

        let Some(extends) = document.extends.clone() else {
            return Ok(document.into());
        };

        let dir = path.parent().unwrap_or(path);
        let mut base = ResolvedConfig::default();
        for reference in extends.references() {
            let ancestor = self.resolve_from(Path::new(reference), dir, visited)?;
            base = merge(base, ancestor);
        }
        Ok(merge(base, document.into()))
    }

    fn load(&self, path: &Path) -> Result<LayeredConfigDocument, ResolutionError> {
        let text = self
            .reader
            .read_to_string(path)
            .map_err(|error| ResolutionError::Io {
                path: path.to_path_buf(),
                error,
            })?;
        let parse_error = |message: String| ResolutionError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let value = self.decoder.decode(&text).map_err(|e| parse_error(e.message))?;
        document_from_value(path, value).map_err(parse_error)
    }
}

/// Resolves `tsconfig.json` in `root`.
pub fn resolve_tsconfig(root: &Path) -> Result<ResolvedConfig, ResolutionError> {
    ConfigChainResolver::new().resolve(Path::new(TSCONFIG_FILE), root)
}

fn document_from_value(path: &Path, value: Value) -> Result<LayeredConfigDocument, String> {
    let Value::Object(mut fields) = value else {
        return Err("expected an object at the top level".to_string());
    };

    let extends = match fields.remove("extends") {
        None | Some(Value::Null) => None,
        Some(Value::String(reference)) => Some(Extends::One(reference)),
        Some(Value::Array(items)) => {
            let references = items
                .into_iter()
                .map(|item| match item {
                    Value::String(reference) => Ok(reference),
                    other => Err(format!("`extends` entries must be strings, found {}", other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Some(Extends::Many(references))
        }
        Some(other) => {
            return Err(format!(
                "`extends` must be a string or an array of strings, found {}",
                other
            ))
        }
    };

    let compiler_options = match fields.remove("compilerOptions") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(options)) => options,
        Some(other) => return Err(format!("`compilerOptions` must be an object, found {}", other)),
    };

    Ok(LayeredConfigDocument {
        path: path.to_path_buf(),
        extends,
        fields,
        compiler_options,
    })
}

impl From<LayeredConfigDocument> for ResolvedConfig {
    fn from(document: LayeredConfigDocument) -> Self {
        ResolvedConfig {
            fields: document.fields,
            compiler_options: document.compiler_options,
        }
    }
}

/// `derived` wins over `base`; `compilerOptions` is a key-wise union.
pub fn merge(base: ResolvedConfig, derived: ResolvedConfig) -> ResolvedConfig {
    let ResolvedConfig {
        mut fields,
        mut compiler_options,
    } = base;

    for (key, value) in derived.fields {
        fields.insert(key, value);
    }
    for (key, value) in derived.compiler_options {
        compiler_options.insert(key, value);
    }

    ResolvedConfig {
        fields,
        compiler_options,
    }
}

/// Folds `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let at_name = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if at_name {
                    out.pop();
                } else if !at_root {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
