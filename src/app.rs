// Declare modules
pub mod clean;
pub mod cli;
pub mod config;
pub mod decode;
pub mod env_globals;
pub mod error;
pub mod generator;
pub mod legacy;
pub mod migrate;
pub mod models;
pub mod patterns;
pub mod report;
pub mod tsconfig;

use anyhow::{Context, Result};
use clap::Parser;

use self::cli::{Cli, Command};
use self::config::resolve_options;
use self::report::{LogReporter, Reporter};
use self::decode::StrictJson;
use self::tsconfig::{ConfigChainResolver, FsReader};

/// Parses arguments and dispatches the requested command. `Ok(false)` means
/// the command ran but did not succeed.
pub fn run() -> Result<bool> {
    let args = Cli::parse();
    let options = resolve_options(&args)?;
    let reporter = LogReporter;

    log::debug!("Resolved options: {:?}", options);

    match &args.command {
        Command::Migrate => Ok(migrate::migrate(&options, &reporter)),
        Command::Clean => clean::clean(&options, &reporter),
        Command::ShowConfig { file, strict } => {
            let resolved = if *strict {
                ConfigChainResolver::with_parts(FsReader, StrictJson)
                    .resolve(file, &options.target_root)
            } else {
                ConfigChainResolver::new().resolve(file, &options.target_root)
            }
            .with_context(|| format!("Unable to resolve {}", file.display()))?;
            reporter.dir(&resolved.to_value());
            Ok(true)
        }
    }
}
