//! Script command language
//!
//! One command per line; blank lines and `#` comments are skipped.

use cadence_playback::RepeatMode;
use std::time::Duration;

/// A transport or simulation command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `play <id> [<playlist>]`
    Play {
        song_id: String,
        playlist: Option<String>,
    },
    /// `toggle <id>`: play, or pause/resume when already current
    Toggle { song_id: String },
    Pause,
    Resume,
    Next,
    Previous,
    Seek(Duration),
    Volume(f32),
    Mute,
    Enqueue { song_id: String },
    Dequeue { index: usize },
    Clear,
    Move { from: usize, to: usize },
    Shuffle,
    Repeat(RepeatMode),
    CycleRepeat,
    /// `tick <secs>`: let the simulated output play for a while
    Tick(Duration),
    /// `end`: the simulated output reports end of song
    End,
    /// `status`: print a JSON snapshot
    Status,
}

impl Command {
    /// Parse one script line
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("play", [song_id]) => Command::Play {
                song_id: (*song_id).to_string(),
                playlist: None,
            },
            ("play", [song_id, playlist]) => Command::Play {
                song_id: (*song_id).to_string(),
                playlist: Some((*playlist).to_string()),
            },
            ("toggle", [song_id]) => Command::Toggle {
                song_id: (*song_id).to_string(),
            },
            ("pause", []) => Command::Pause,
            ("resume", []) => Command::Resume,
            ("next", []) => Command::Next,
            ("prev" | "previous", []) => Command::Previous,
            ("seek", [secs]) => Command::Seek(parse_secs(secs)?),
            ("volume", [level]) => Command::Volume(
                level
                    .parse()
                    .map_err(|_| format!("invalid volume '{}'", level))?,
            ),
            ("mute", []) => Command::Mute,
            ("enqueue", [song_id]) => Command::Enqueue {
                song_id: (*song_id).to_string(),
            },
            ("dequeue", [index]) => Command::Dequeue {
                index: parse_index(index)?,
            },
            ("clear", []) => Command::Clear,
            ("move", [from, to]) => Command::Move {
                from: parse_index(from)?,
                to: parse_index(to)?,
            },
            ("shuffle", []) => Command::Shuffle,
            ("repeat", [mode]) => Command::Repeat(mode.parse().map_err(|e| format!("{}", e))?),
            ("cycle-repeat", []) => Command::CycleRepeat,
            ("tick", [secs]) => Command::Tick(parse_secs(secs)?),
            ("end", []) => Command::End,
            ("status", []) => Command::Status,
            (name, args) => {
                return Err(format!(
                    "unknown command '{}' with {} argument(s)",
                    name,
                    args.len()
                ))
            }
        };

        Ok(Some(command))
    }
}

fn parse_secs(value: &str) -> Result<Duration, String> {
    value
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("invalid seconds '{}'", value))
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("invalid index '{}'", value))
}
