use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use ludo::Request;
use serde::{Deserialize, Serialize};

/// Writes one JSON file per game with every request sent to the players.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    pub fn store_request(
        &mut self,
        player: &str,
        request: &Request,
        response: &str,
    ) -> anyhow::Result<()> {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: serde_json::to_value(request)?,
            response: serde_json::from_str(response)?,
        });
        Ok(())
    }

    /// Write out everything stored since the last call, together with the result.
    pub fn write_game_recording(&mut self, result: &str) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let recording = GameRecording {
            requests: std::mem::take(&mut self.requests),
            result: String::from(result),
        };
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub requests: Vec<RequestToPlayer>,
    pub result: String,
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    pub player: String,
    pub request: serde_json::Value,
    pub response: serde_json::Value,
}
