//! Effective settings.

use super::common::GlobalArgs;
use clap::Args;
use linout_config::{Settings, ensure_user_config_dir};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write a settings file with the current values if none exists
    #[arg(long)]
    init: bool,
}

pub fn run(global: &GlobalArgs, args: ConfigArgs) -> anyhow::Result<()> {
    let path = global.settings_path();

    if args.init {
        if path.exists() {
            println!("Settings already exist at {}", path.display());
        } else {
            if global.config.is_none() {
                ensure_user_config_dir()?;
            }
            Settings::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let settings = global.settings()?;
    settings.engine_command()?;

    let origin = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{origin}", path.display());
    print!("{}", settings.to_toml()?);
    Ok(())
}
