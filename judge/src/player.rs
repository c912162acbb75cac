use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use ludo::Request;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::recording::Recorder;
use crate::rooms::PlayerId;

/// How to launch a bot, loaded from a JSON file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name in logs and results.
    pub nick: String,
    /// The executable, followed by its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config '{}'", path.display()))?;
        let config: PlayerConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A bot running as a child process, speaking JSON lines over stdin/stdout.
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, cmd: &[String]) -> anyhow::Result<Self> {
        let (program, args) = cmd
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("No executable given for player {}", name))?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start player {}", name))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Could not access stdin of {}", name))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Could not access stdout of {}", name))?;
        Ok(Self {
            id,
            name: String::from(name),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn from_config(id: PlayerId, config: &PlayerConfig) -> anyhow::Result<Self> {
        Self::new(id, &config.nick, &config.cmd)
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Player {} closed its output", self.name);
        }
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response).with_context(|| {
            format!("Invalid response from {}: {}", self.name, serialized_response)
        })?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, req, serialized_response)?;
        }
        self.buf.clear();
        Ok(response)
    }

    /// Ask the bot to shut down.
    pub fn bye(&mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.child.wait()?;
        Ok(())
    }
}
