//! Audio playback through an external player process.

use std::env;
use std::path::Path;
use std::process::Stdio;

use alert_core::{async_trait, GatewayError, Player};
use tokio::process::Command;
use tracing::{debug, info};

/// Plays a file without a window and exits when playback finishes.
pub const DEFAULT_PLAYER_COMMAND: &str = "ffplay -nodisp -autoexit -loglevel quiet";

/// Plays audio by running a command with the artifact path appended.
///
/// The call returns once the player process exits, so playback blocks the
/// caller until the audio has finished.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    /// Create a player that runs `program args... <artifact>`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace-separated command line such as `mpg123 -q`.
    pub fn from_command_line(command: &str) -> Result<Self, GatewayError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| GatewayError::Configuration("empty player command".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Build from `PLAYER_COMMAND` (default: `ffplay -nodisp -autoexit -loglevel quiet`).
    pub fn from_env() -> Result<Self, GatewayError> {
        let command =
            env::var("PLAYER_COMMAND").unwrap_or_else(|_| DEFAULT_PLAYER_COMMAND.to_string());
        Self::from_command_line(&command)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl Player for CommandPlayer {
    async fn play(&self, artifact: &Path) -> Result<(), GatewayError> {
        info!("Playing {} with {}", artifact.display(), self.program);

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| {
                GatewayError::Unavailable(format!("failed to run {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(GatewayError::Unavailable(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        debug!("Playback finished");
        Ok(())
    }

    fn name(&self) -> &str {
        "CommandPlayer"
    }
}
