//! Shared CLI helpers used across multiple commands.

use clap::Args;
use linout_config::{Settings, default_settings_path};
use linout_io::EngineInvoker;
use std::path::{Path, PathBuf};

/// Options accepted by every subcommand.
#[derive(Args)]
pub struct GlobalArgs {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Engine program to run instead of the configured one
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub engine: Option<String>,

    /// Extra argument placed before the engine flags (repeatable)
    #[arg(long = "engine-arg", global = true, value_name = "ARG", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Engine flag dialect: arrow or olinout
    #[arg(long, global = true)]
    pub dialect: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Path of the settings file in effect.
    pub fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_settings_path)
    }

    /// Load settings and apply command-line overrides.
    ///
    /// An explicit `--config` must exist; the default path may be absent.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::load_or_default(default_settings_path())?,
        };

        if let Some(engine) = &self.engine {
            settings.engine = Some(engine.clone());
        }
        if !self.engine_args.is_empty() {
            settings.engine_args = self.engine_args.clone();
        }
        if let Some(dialect) = &self.dialect {
            settings.dialect = dialect.clone();
        }

        tracing::debug!(?settings, "effective settings");
        Ok(settings)
    }
}

/// Build an engine invoker from settings.
pub fn invoker(settings: &Settings) -> anyhow::Result<EngineInvoker> {
    Ok(EngineInvoker::new(settings.engine_command()?))
}

/// Make a command-line path absolute so it survives plan-relative resolution.
pub fn absolute(path: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
    Ok(std::path::absolute(path.as_ref())?)
}
