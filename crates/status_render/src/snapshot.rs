use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Playback states that produce a rendered track. Anything else the player reports counts as "nothing playing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlaybackStatus {
    Playing,
    Paused,
}

/// The unparsed answers of one round of player queries.
/// A query that failed is represented by an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub artist: String,
    pub title: String,
    pub status: String,
    /// Track length in microseconds, as reported by `mpris:length`.
    pub length: String,
    /// Playback position in (fractional) seconds.
    pub position: String,
}

/// One polled sample of the current playback metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub artist: String,
    pub title: String,
    pub status: PlaybackStatus,
    pub position_seconds: u64,
    /// 0 when the duration is unknown.
    pub length_seconds: u64,
}

impl PlaybackSnapshot {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, status: PlaybackStatus) -> Self {
        PlaybackSnapshot { artist: artist.into(), title: title.into(), status, position_seconds: 0, length_seconds: 0 }
    }

    pub fn with_times(mut self, position_seconds: u64, length_seconds: u64) -> Self {
        self.position_seconds = position_seconds;
        self.length_seconds = length_seconds;
        self
    }

    /// Build a snapshot from raw query output. Returns `None` unless the player is playing or paused.
    /// Garbage in the numeric fields is read as 0.
    pub fn from_raw(raw: &RawMetadata) -> Option<Self> {
        let status = PlaybackStatus::from_str(raw.status.trim()).ok()?;
        Some(PlaybackSnapshot {
            artist: raw.artist.clone(),
            title: raw.title.clone(),
            status,
            position_seconds: parse_position_seconds(&raw.position),
            length_seconds: parse_length_micros(&raw.length) / MICROS_PER_SECOND,
        })
    }

    /// The identity of the track, used to decide when scrolling starts over.
    pub fn track_key(&self) -> (&str, &str) {
        (self.artist.as_str(), self.title.as_str())
    }
}

fn parse_length_micros(s: &str) -> u64 {
    s.trim().parse::<u64>().unwrap_or(0)
}

fn parse_position_seconds(s: &str) -> u64 {
    match s.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => secs.trunc() as u64,
        _ => 0,
    }
}
