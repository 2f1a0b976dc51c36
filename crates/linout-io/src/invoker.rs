//! Process-backed transfer through the external engine binary.

use crate::command::EngineCommand;
use crate::transfer::{PlaybackSource, RecordSink, Recording, Transfer, TransferRequest};
use crate::wav::{WavSpec, read_wav, write_wav};
use crate::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use tempfile::TempPath;

/// Runs the engine as a blocking subprocess.
///
/// Each transfer stages its own transient WAV files; they are removed when the
/// transfer returns, whether it succeeded or not.
#[derive(Debug)]
pub struct EngineInvoker {
    command: EngineCommand,
    version: OnceLock<String>,
}

impl EngineInvoker {
    /// Create an invoker. No process is started until the first call.
    pub fn new(command: EngineCommand) -> Self {
        Self {
            command,
            version: OnceLock::new(),
        }
    }

    /// The launch configuration.
    pub fn command(&self) -> &EngineCommand {
        &self.command
    }

    /// Engine version string, queried once and cached for the invoker's lifetime.
    pub fn version(&self) -> Result<&str> {
        if let Some(version) = self.version.get() {
            return Ok(version.as_str());
        }
        let output = self.run(&self.command.version_args())?;
        let version = output.trim().to_string();
        Ok(self.version.get_or_init(|| version).as_str())
    }

    /// Raw listing of the capture and playback ports known to the audio server.
    pub fn list_ports(&self) -> Result<String> {
        self.run(&self.command.ports_args())
    }

    fn run(&self, args: &[String]) -> Result<String> {
        let program = &self.command.program;
        tracing::debug!(program = %program, args = ?args, "launching engine");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Launch {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(Error::EngineFailed {
                program: program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            tracing::warn!(program = %program, "engine stderr: {stderr}");
        }
        Ok(stdout)
    }
}

impl Transfer for EngineInvoker {
    fn transfer(&self, request: &TransferRequest) -> Result<Option<Recording>> {
        request.validate()?;

        let staged_play = match &request.playback {
            PlaybackSource::InMemory(buffer) => {
                let path = transient_wav()?;
                // validate() guarantees the rate is present here
                let rate = request.sample_rate.ok_or(Error::MissingSampleRate)?;
                write_wav(&path, buffer, WavSpec::pcm16(buffer.channels, rate))?;
                tracing::debug!(path = %path.display(), frames = buffer.num_frames(), "staged playback samples");
                Some(path)
            }
            PlaybackSource::Absent | PlaybackSource::File(_) => None,
        };
        let play: Option<&Path> = match &request.playback {
            PlaybackSource::Absent => None,
            PlaybackSource::File(path) => Some(path.as_path()),
            PlaybackSource::InMemory(_) => staged_play.as_deref(),
        };

        let staged_record = match request.record {
            RecordSink::ToMemory => Some(transient_wav()?),
            RecordSink::Disabled | RecordSink::ToFile(_) => None,
        };
        let record: Option<&Path> = match &request.record {
            RecordSink::Disabled => None,
            RecordSink::ToFile(path) => Some(path.as_path()),
            RecordSink::ToMemory => staged_record.as_deref(),
        };

        let args = self.command.transfer_args(request, play, record)?;
        let stdout = self.run(&args)?;
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::info!(target: "linout::engine", "{line}");
        }

        match staged_record {
            Some(path) => {
                let (samples, spec) = read_wav(&path)?;
                tracing::debug!(
                    frames = samples.num_frames(),
                    channels = samples.channels,
                    sample_rate = spec.sample_rate,
                    "decoded recording"
                );
                Ok(Some(Recording {
                    samples,
                    sample_rate: spec.sample_rate,
                }))
            }
            None => Ok(None),
        }
    }
}

/// Reserve a transient `.wav` path, deleted when the handle drops.
fn transient_wav() -> Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix("linout-")
        .suffix(".wav")
        .tempfile()?;
    Ok(file.into_temp_path())
}
