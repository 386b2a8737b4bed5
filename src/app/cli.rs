use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Maintain lint and build configuration for TypeScript projects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project directory to operate on
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub target_root: PathBuf,

    /// Report what would change without touching the filesystem
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Settings file (defaults to ~/.config/mwts/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert .eslintrc.json/.eslintignore into eslint.config.js
    Migrate,

    /// Delete the compilerOptions.outDir of tsconfig.json
    Clean,

    /// Print a tsconfig file with its extends chain flattened
    ShowConfig {
        #[arg(default_value = "tsconfig.json")]
        file: PathBuf,

        /// Reject comments and trailing commas in every file of the chain
        #[arg(long)]
        strict: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mwts", "migrate", "--dry-run", "-C", "pkg"]);
        assert_eq!(cli.command, Command::Migrate);
        assert!(cli.dry_run);
        assert_eq!(cli.target_root, PathBuf::from("pkg"));
    }

    #[test]
    fn test_show_config_default_file() {
        let cli = Cli::parse_from(["mwts", "show-config"]);
        assert_eq!(
            cli.command,
            Command::ShowConfig {
                file: PathBuf::from("tsconfig.json"),
                strict: false,
            }
        );
    }

    #[test]
    fn test_show_config_strict_flag() {
        let cli = Cli::parse_from(["mwts", "show-config", "base.json", "--strict"]);
        assert_eq!(
            cli.command,
            Command::ShowConfig {
                file: PathBuf::from("base.json"),
                strict: true,
            }
        );
    }
}
