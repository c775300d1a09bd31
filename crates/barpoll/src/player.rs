use status_render::{PlaybackSnapshot, RawMetadata};

use crate::command::CommandRunner;

/// Where playback snapshots come from.
pub trait MetadataSource {
    /// Whether the followed player process is alive. Sources that are not bound to a process are always running.
    fn is_running(&self) -> bool;

    /// The current track, or `None` if nothing is playing or paused.
    fn snapshot(&self) -> Option<PlaybackSnapshot>;
}

/// Reads playback state through `playerctl`, optionally pinned to a single player.
pub struct PlayerctlSource<R> {
    runner: R,
    player: Option<String>,
}

impl<R: CommandRunner> PlayerctlSource<R> {
    pub fn new(runner: R, player: Option<String>) -> Self {
        PlayerctlSource { runner, player }
    }

    pub fn raw_metadata(&self) -> RawMetadata {
        RawMetadata {
            artist: self.playerctl(&["metadata", "--format", "{{artist}}"]),
            title: self.playerctl(&["metadata", "--format", "{{title}}"]),
            status: self.playerctl(&["status"]),
            length: self.playerctl(&["metadata", "--format", "{{mpris:length}}"]),
            position: self.playerctl(&["position"]),
        }
    }

    fn playerctl(&self, args: &[&str]) -> String {
        run_playerctl(&self.runner, self.player.as_deref(), args)
    }
}

impl<R: CommandRunner> MetadataSource for PlayerctlSource<R> {
    fn is_running(&self) -> bool {
        match &self.player {
            Some(player) => is_process_running(&self.runner, player),
            None => true,
        }
    }

    fn snapshot(&self) -> Option<PlaybackSnapshot> {
        let raw = self.raw_metadata();
        let snapshot = PlaybackSnapshot::from_raw(&raw);
        if snapshot.is_none() {
            log::debug!("No active playback (status: {:?})", raw.status);
        }
        snapshot
    }
}

/// Run playerctl with the given arguments, passing `--player` if a player is given. Failures yield an empty string.
pub fn run_playerctl(runner: &impl CommandRunner, player: Option<&str>, args: &[&str]) -> String {
    runner.run_or_empty("playerctl", &playerctl_args(player, args).iter().map(String::as_str).collect::<Vec<_>>())
}

pub fn playerctl_args(player: Option<&str>, args: &[&str]) -> Vec<String> {
    player.map(|player| format!("--player={}", player)).into_iter().chain(args.iter().map(|arg| arg.to_string())).collect()
}

/// Check for a process with exactly this name.
pub fn is_process_running(runner: &impl CommandRunner, name: &str) -> bool {
    !runner.run_or_empty("pgrep", &["-x", name]).is_empty()
}
