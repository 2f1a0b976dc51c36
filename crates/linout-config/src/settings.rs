//! Persistent engine settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use linout_io::{DEFAULT_SERVER_PROCESS, Dialect, EngineCommand, PortSet};

/// Engine and default-port settings.
///
/// # TOML Format
///
/// ```toml
/// engine = "/usr/local/bin/arrow1"
/// dialect = "arrow"
/// buffer_size = 1024
/// sample_rate = 44100
/// input_ports = "system:capture_1,system:capture_2"
/// output_ports = "system:playback_1,system:playback_2"
/// server_process = "jackd"
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Engine program; the dialect's conventional binary when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Arguments placed before the derived flags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub engine_args: Vec<String>,

    /// Flag dialect, `"arrow"` or `"olinout"`.
    pub dialect: String,

    /// Audio server buffer size in samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,

    /// Sample rate for in-memory playback.
    ///
    /// File playback, which is all the CLI does, keeps the file's own rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    /// Default capture ports, comma-separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_ports: Option<String>,

    /// Default playback ports, comma-separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_ports: Option<String>,

    /// Process name of the audio server.
    pub server_process: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: None,
            engine_args: Vec::new(),
            dialect: Dialect::default().to_string(),
            buffer_size: None,
            sample_rate: None,
            input_ports: None,
            output_ports: None,
            server_process: DEFAULT_SERVER_PROCESS.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Parsed dialect.
    pub fn dialect(&self) -> Result<Dialect, ConfigError> {
        self.dialect
            .parse::<Dialect>()
            .map_err(|reason| ConfigError::invalid("dialect", reason))
    }

    /// Launch configuration for the engine.
    pub fn engine_command(&self) -> Result<EngineCommand, ConfigError> {
        let dialect = self.dialect()?;
        let mut command = EngineCommand::for_dialect(dialect)
            .with_base_args(self.engine_args.iter().cloned())
            .with_buffer_size(self.buffer_size);
        if let Some(engine) = &self.engine {
            command = command.with_program(engine.clone());
        }
        if self.buffer_size == Some(0) {
            return Err(ConfigError::invalid("buffer_size", "must be positive"));
        }
        Ok(command)
    }

    /// Default capture ports; empty means engine defaults.
    pub fn input_ports(&self) -> PortSet {
        self.input_ports
            .as_deref()
            .map(PortSet::from)
            .unwrap_or_default()
    }

    /// Default playback ports; empty means engine defaults.
    pub fn output_ports(&self) -> PortSet {
        self.output_ports
            .as_deref()
            .map(PortSet::from)
            .unwrap_or_default()
    }
}
