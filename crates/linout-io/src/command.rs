//! Engine command-line construction.

use crate::transfer::TransferRequest;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Command-line dialect spoken by the engine binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `arrow1`: `--play-file`, `--record-file`, `--channels`.
    #[default]
    Arrow,
    /// Legacy `olinout`: positional playback file, `--write`, `--ports`.
    Olinout,
}

impl Dialect {
    /// Conventional binary name for this dialect.
    pub fn default_program(self) -> &'static str {
        match self {
            Dialect::Arrow => "arrow1",
            Dialect::Olinout => "olinout",
        }
    }

    fn ports_flag(self) -> &'static str {
        match self {
            Dialect::Arrow => "--channels",
            Dialect::Olinout => "--ports",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arrow" | "arrow1" => Ok(Dialect::Arrow),
            "olinout" => Ok(Dialect::Olinout),
            other => Err(format!(
                "unknown engine dialect '{other}' (expected 'arrow' or 'olinout')"
            )),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Arrow => "arrow",
            Dialect::Olinout => "olinout",
        })
    }
}

/// How to launch the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    /// Program to execute, looked up on `PATH` when not a path.
    pub program: String,
    /// Arguments placed before any derived flag (e.g. a wrapper script path).
    pub base_args: Vec<String>,
    /// Flag dialect.
    pub dialect: Dialect,
    /// Audio server buffer size in samples; engine default when `None`.
    pub buffer_size: Option<usize>,
}

impl Default for EngineCommand {
    fn default() -> Self {
        Self::for_dialect(Dialect::Arrow)
    }
}

impl EngineCommand {
    /// Command for the conventional binary of `dialect`.
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            program: dialect.default_program().to_string(),
            base_args: Vec::new(),
            dialect,
            buffer_size: None,
        }
    }

    /// Override the program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the leading arguments.
    pub fn with_base_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the server buffer size.
    pub fn with_buffer_size(mut self, buffer_size: Option<usize>) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Arguments for a version query.
    pub fn version_args(&self) -> Vec<String> {
        self.with_base(["--version".to_string()])
    }

    /// Arguments for a port listing.
    pub fn ports_args(&self) -> Vec<String> {
        self.with_base([self.dialect.ports_flag().to_string()])
    }

    /// Arguments for a transfer, given the resolved playback and record paths.
    pub fn transfer_args(
        &self,
        request: &TransferRequest,
        play: Option<&Path>,
        record: Option<&Path>,
    ) -> Result<Vec<String>> {
        let mut flags = Vec::new();

        if !request.input_ports.is_empty() {
            flags.push(format!("--in={}", request.input_ports));
        }
        if !request.output_ports.is_empty() {
            flags.push(format!("--out={}", request.output_ports));
        }
        if let Some(buffer) = self.buffer_size {
            flags.push(format!("--buffer={buffer}"));
        }

        match self.dialect {
            Dialect::Arrow => {
                if let Some(path) = play {
                    flags.push(format!("--play-file={}", utf8(path)?));
                }
                if let Some(path) = record {
                    flags.push(format!("--record-file={}", utf8(path)?));
                }
            }
            Dialect::Olinout => {
                if let Some(path) = record {
                    flags.push(format!("--write={}", utf8(path)?));
                }
            }
        }

        if let Some(d) = request.duration {
            flags.push(format!("--duration={d}"));
        }
        if let Some(s) = request.start_offset {
            flags.push(format!("--start={s}"));
        }

        if self.dialect == Dialect::Olinout
            && let Some(path) = play
        {
            flags.push(utf8(path)?.to_string());
        }

        Ok(self.with_base(flags))
    }

    fn with_base(&self, flags: impl IntoIterator<Item = String>) -> Vec<String> {
        self.base_args.iter().cloned().chain(flags).collect()
    }
}

fn utf8(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))
}
