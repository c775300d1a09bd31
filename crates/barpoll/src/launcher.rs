use anyhow::{bail, Context, Result};

use crate::{
    command::CommandRunner,
    player::{is_process_running, playerctl_args},
};

/// Click handler of the player module: toggle playback, or start the player if it isn't running.
/// Without a specific player there is nothing to launch, so this always toggles.
pub fn click(runner: &impl CommandRunner, player: Option<&str>) -> Result<()> {
    match player {
        Some(player) if !is_process_running(runner, player) => {
            log::info!("{} is not running, launching it", player);
            launch(runner, player)
        }
        _ => toggle_play_pause(runner, player),
    }
}

pub fn toggle_play_pause(runner: &impl CommandRunner, player: Option<&str>) -> Result<()> {
    control(runner, player, &["play-pause"])
}

/// Forward arbitrary arguments to playerctl without waiting for it.
pub fn control<S: AsRef<str>>(runner: &impl CommandRunner, player: Option<&str>, args: &[S]) -> Result<()> {
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
    let full_args = playerctl_args(player, &args);
    let full_args: Vec<&str> = full_args.iter().map(String::as_str).collect();
    runner.spawn("playerctl", &full_args).context("Failed to run playerctl")
}

/// Start the player through its desktop entry, detached from this process,
/// so it survives the bar restarting. Tries the available methods in order.
pub fn launch(runner: &impl CommandRunner, player: &str) -> Result<()> {
    if runner.is_installed("systemd-run") {
        let gtk_launch = runner.locate("gtk-launch").map(|path| path.display().to_string()).unwrap_or_else(|| "gtk-launch".to_string());
        let unit = format!("--unit={}-launch", player);
        match runner.spawn("systemd-run", &["--user", "--scope", &unit, &gtk_launch, player]) {
            Ok(()) => return Ok(()),
            Err(err) => log::warn!("{}", err),
        }
    }

    if runner.is_installed("at") {
        let script = format!("echo \"gtk-launch {}\" | at now", player);
        match runner.spawn("bash", &["-lc", &script]) {
            Ok(()) => return Ok(()),
            Err(err) => log::warn!("{}", err),
        }
    }

    match runner.spawn("setsid", &["gtk-launch", player]) {
        Ok(()) => Ok(()),
        Err(err) => {
            log::warn!("{}", err);
            bail!("Failed to launch {} by any known method", player)
        }
    }
}
