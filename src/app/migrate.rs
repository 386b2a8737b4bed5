//! `.eslintrc.json` to `eslint.config.js` migration.
//!
//! Phases run strictly in order: detect, parse, normalize, generate, write,
//! retire. Write happens before the legacy files are renamed, so an
//! interrupted run leaves the new config in place and a second run stops at
//! detection. Legacy files are renamed to `*.bak`, never deleted.

use crate::app::env_globals;
use crate::app::error::MigrationError;
use crate::app::generator::{FlatConfigGenerator, FlatConfigInput, FLAT_CONFIG_FILE};
use crate::app::legacy::{self, LEGACY_CONFIG_FILE, LEGACY_IGNORE_FILE};
use crate::app::models::{LegacyConfigModel, Options};
use crate::app::patterns;
use crate::app::report::Reporter;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filenames that mean the project already uses the flat config dialect.
pub const FLAT_CONFIG_CANDIDATES: &[&str] = &["eslint.config.js", "eslint.config.cjs", "eslint.config.mjs"];

const BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug)]
enum Detection {
    AlreadyMigrated(PathBuf),
    NothingToMigrate,
    Legacy(LegacyFiles),
}

#[derive(Debug)]
struct LegacyFiles {
    config: PathBuf,
    ignore: PathBuf,
    target: PathBuf,
}

/// Parsed legacy inputs, ready for normalization.
#[derive(Debug)]
struct ParsedLegacy {
    model: LegacyConfigModel,
    file_patterns: Vec<String>,
}

/// Returns `true` when there is nothing left to do afterwards, `false` only
/// when a migration was attempted and failed. Never panics on I/O or parse
/// problems; they are reported and folded into the result.
pub fn migrate(options: &Options, reporter: &dyn Reporter) -> bool {
    let files = match detect(&options.target_root) {
        Detection::AlreadyMigrated(found) => {
            reporter.log(&format!(
                "Detected existing {}; skip migration.",
                found.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            ));
            return true;
        }
        Detection::NothingToMigrate => {
            reporter.log(&format!(
                "No {} found. Nothing to migrate in {}.",
                LEGACY_CONFIG_FILE,
                options.target_root.display()
            ));
            return true;
        }
        Detection::Legacy(files) => files,
    };

    match run_migration(&files, options, reporter) {
        Ok(()) => true,
        Err(err) => {
            reporter.error(&format!("Migration failed: {}", err));
            false
        }
    }
}

fn detect(root: &Path) -> Detection {
    if let Some(found) = FLAT_CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
    {
        return Detection::AlreadyMigrated(found);
    }

    let config = root.join(LEGACY_CONFIG_FILE);
    if !config.exists() {
        return Detection::NothingToMigrate;
    }

    Detection::Legacy(LegacyFiles {
        config,
        ignore: root.join(LEGACY_IGNORE_FILE),
        target: root.join(FLAT_CONFIG_FILE),
    })
}

fn run_migration(
    files: &LegacyFiles,
    options: &Options,
    reporter: &dyn Reporter,
) -> Result<(), MigrationError> {
    log::debug!("Parsing {}", files.config.display());
    let parsed = parse_legacy(files)?;

    let ignores = patterns::normalize(
        &options.baseline_ignores,
        &parsed.model.ignore_patterns,
        &parsed.file_patterns,
    );

    let expanded_envs: Vec<String> = parsed
        .model
        .enabled_envs()
        .filter(|env| env_globals::globals_for(env).is_some())
        .map(str::to_string)
        .collect();
    let mut globals = env_globals::expand(parsed.model.enabled_envs());
    for (name, access) in &parsed.model.globals {
        globals.insert(name.clone(), *access);
    }

    let contents = FlatConfigGenerator::generate(&FlatConfigInput {
        base_config: &options.base_config,
        ignores: &ignores,
        rules: &parsed.model.rules,
        globals: &globals,
        expanded_envs: &expanded_envs,
    });

    reporter.log(&format!("Writing {}...", FLAT_CONFIG_FILE));
    if !options.dry_run {
        fs::write(&files.target, &contents).map_err(|source| MigrationError::Write {
            path: files.target.clone(),
            source,
        })?;
    }
    reporter.log(&contents);
    reporter.dir(&json!({
        "ignores": ignores,
        "rules": parsed.model.rules,
        "globals": globals.keys().collect::<Vec<_>>(),
    }));

    reporter.log("Backing up legacy ESLint files...");
    if !options.dry_run {
        retire(&files.config)?;
        if files.ignore.exists() {
            retire(&files.ignore)?;
        }
    }
    Ok(())
}

fn parse_legacy(files: &LegacyFiles) -> Result<ParsedLegacy, MigrationError> {
    let text = fs::read_to_string(&files.config).map_err(|source| MigrationError::Read {
        path: files.config.clone(),
        source,
    })?;
    let model = legacy::parse(&text).map_err(|source| MigrationError::Parse {
        path: files.config.clone(),
        source,
    })?;

    let file_patterns = match fs::read_to_string(&files.ignore) {
        Ok(contents) => legacy::parse_ignore_file(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(MigrationError::Read {
                path: files.ignore.clone(),
                source,
            })
        }
    };

    Ok(ParsedLegacy {
        model,
        file_patterns,
    })
}

fn retire(path: &Path) -> Result<(), MigrationError> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(BACKUP_SUFFIX);
    let backup = PathBuf::from(backup);

    fs::rename(path, &backup).map_err(|source| MigrationError::Rename {
        from: path.to_path_buf(),
        to: backup.clone(),
        source,
    })?;
    log::debug!("Renamed {} to {}", path.display(), backup.display());
    Ok(())
}
