//! Settings and batch plans for linout.
//!
//! This crate provides:
//!
//! - **Settings**: engine program, flag dialect, buffer size and default ports,
//!   loaded from `config.toml`
//! - **Batch plans**: multi-trial runs saved as TOML, where each list may be a
//!   single value or one value per trial
//! - **Paths**: platform-specific settings and plan directories
//!
//! # Example
//!
//! ```rust,no_run
//! use linout_config::{BatchPlan, Settings, default_settings_path};
//!
//! let settings = Settings::load_or_default(default_settings_path()).unwrap();
//! let command = settings.engine_command().unwrap();
//!
//! let plan = BatchPlan::load("sweeps.toml").unwrap();
//! let batch = plan.to_batch().unwrap();
//! println!("{} trials with {}", batch.len(), command.program);
//! ```

mod error;
mod plan;
mod settings;

/// Platform-specific paths for settings and plans.
pub mod paths;

pub use error::ConfigError;
pub use paths::{
    default_settings_path, ensure_user_config_dir, find_plan, list_plans, user_config_dir,
    user_plans_dir,
};
pub use plan::{BatchPlan, OneOrMany, PauseSetting};
pub use settings::Settings;
