use crate::app::models::Options;
use crate::app::report::Reporter;
use crate::app::tsconfig::{normalize_path, resolve_tsconfig};
use anyhow::{bail, Context, Result};
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Component, Path};

/// Removes the effective `compilerOptions.outDir` of the target project.
///
/// Returns `Ok(false)` when there is nothing safe to delete (no outDir, or
/// outDir is the project root). An outDir outside the project is an error.
pub fn clean(options: &Options, reporter: &dyn Reporter) -> Result<bool> {
    let root = normalize_path(&absolute(&options.target_root)?);
    let config = match resolve_tsconfig(&root) {
        Ok(config) => config,
        Err(err) if err.is_not_found() => {
            bail!("No tsconfig.json found in {}: {}", root.display(), err)
        }
        Err(err) if err.is_circular() => {
            bail!("tsconfig.json has a circular extends chain: {}", err)
        }
        Err(err) => return Err(err).context("Unable to resolve tsconfig.json"),
    };

    let Some(out_dir) = config.compiler_option("outDir").and_then(|v| v.as_str()) else {
        reporter.error("tsconfig.json is missing 'compilerOptions.outDir'.");
        return Ok(false);
    };

    let out_path = normalize_path(&root.join(out_dir));
    let relative = diff_paths(&out_path, &root)
        .with_context(|| format!("Cannot relate outDir {:?} to {}", out_dir, root.display()))?;

    if relative.as_os_str().is_empty() {
        reporter.error(&format!(
            "outDir {:?} resolves to the project root; refusing to delete it.",
            out_dir
        ));
        return Ok(false);
    }
    if matches!(relative.components().next(), Some(Component::ParentDir)) {
        bail!(
            "outDir {:?} must be inside the project root {}",
            out_dir,
            root.display()
        );
    }

    reporter.log(&format!("Removing {} ...", relative.display()));
    if !options.dry_run {
        match fs::remove_dir_all(&out_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} does not exist", out_path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", out_path.display()))
            }
        }
    }
    Ok(true)
}

fn absolute(path: &Path) -> Result<std::path::PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::report::testing::RecordingReporter;
    use tempfile::TempDir;

    fn options(root: &Path) -> Options {
        Options {
            target_root: root.to_path_buf(),
            dry_run: false,
            base_config: String::new(),
            baseline_ignores: Vec::new(),
        }
    }

    fn write_tsconfig(root: &Path, contents: &str) {
        fs::write(root.join("tsconfig.json"), contents).unwrap();
    }

    #[test]
    fn test_missing_tsconfig_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(clean(&options(dir.path()), &RecordingReporter::default()).is_err());
    }

    #[test]
    fn test_circular_extends_chain_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("base.json"), r#"{"extends": "./tsconfig.json"}"#).unwrap();
        write_tsconfig(
            dir.path(),
            r#"{"extends": "./base.json", "compilerOptions": {"outDir": "dist"}}"#,
        );
        fs::create_dir(dir.path().join("dist")).unwrap();

        let err = clean(&options(dir.path()), &RecordingReporter::default()).unwrap_err();
        assert!(err.to_string().contains("circular extends chain"));
        assert!(dir.path().join("dist").exists());
    }

    #[test]
    fn test_missing_out_dir_returns_false() {
        let dir = TempDir::new().unwrap();
        write_tsconfig(dir.path(), "{}");
        let reporter = RecordingReporter::default();
        assert!(!clean(&options(dir.path()), &reporter).unwrap());
        assert!(reporter.errored("outDir"));
    }

    #[test]
    fn test_refuses_to_delete_project_root() {
        let dir = TempDir::new().unwrap();
        write_tsconfig(dir.path(), r#"{"compilerOptions": {"outDir": "."}}"#);
        assert!(!clean(&options(dir.path()), &RecordingReporter::default()).unwrap());
        assert!(dir.path().join("tsconfig.json").exists());
    }

    #[test]
    fn test_out_dir_outside_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_tsconfig(dir.path(), r#"{"compilerOptions": {"outDir": "../out"}}"#);
        assert!(clean(&options(dir.path()), &RecordingReporter::default()).is_err());
    }

    #[test]
    fn test_removes_out_dir_found_through_extends() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("base.json"),
            r#"{"compilerOptions": {"outDir": "outputDirectory"}}"#,
        )
        .unwrap();
        write_tsconfig(dir.path(), r#"{"extends": "./base.json", "compilerOptions": {"strict": true}}"#);
        let out = dir.path().join("outputDirectory");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("nested/index.js"), "").unwrap();

        assert!(clean(&options(dir.path()), &RecordingReporter::default()).unwrap());
        assert!(!out.exists());
    }

    #[test]
    fn test_dry_run_keeps_out_dir() {
        let dir = TempDir::new().unwrap();
        write_tsconfig(dir.path(), r#"{"compilerOptions": {"outDir": "dist"}}"#);
        fs::create_dir(dir.path().join("dist")).unwrap();
        let mut opts = options(dir.path());
        opts.dry_run = true;
        let reporter = RecordingReporter::default();

        assert!(clean(&opts, &reporter).unwrap());
        assert!(dir.path().join("dist").exists());
        assert!(reporter.logged("Removing dist"));
    }
}
