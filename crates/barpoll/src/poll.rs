use std::{io::Write, time::Duration};

use anyhow::Result;
use status_render::{RenderedStatus, StatusRenderer};

use crate::{output::write_status, player::MetadataSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Used while a track is shown, so the marquee moves.
    pub scroll: Duration,
    /// Used while there is nothing to show.
    pub idle: Duration,
}

/// The player module's main loop: query, render, print, sleep.
pub struct PlayerPoller<S, W> {
    source: S,
    renderer: StatusRenderer,
    out: W,
    intervals: PollIntervals,
}

impl<S: MetadataSource, W: Write> PlayerPoller<S, W> {
    pub fn new(source: S, renderer: StatusRenderer, out: W, intervals: PollIntervals) -> Self {
        PlayerPoller { source, renderer, out, intervals }
    }

    /// Run until writing to the output fails, which happens when the bar goes away.
    pub fn run(mut self) -> Result<()> {
        log::info!("Polling player {}", self.renderer.settings().player.as_deref().unwrap_or("<any>"));
        loop {
            let sleep_for = self.tick()?;
            std::thread::sleep(sleep_for);
        }
    }

    /// Produce one line of output and return how long to wait before the next one.
    pub fn tick(&mut self) -> Result<Duration> {
        let (status, sleep_for) = self.next_status();
        write_status(&mut self.out, &status)?;
        Ok(sleep_for)
    }

    fn next_status(&mut self) -> (RenderedStatus, Duration) {
        if !self.source.is_running() {
            return (self.renderer.update(None), self.intervals.idle);
        }
        match self.source.snapshot() {
            Some(snapshot) => (self.renderer.update(Some(&snapshot)), self.intervals.scroll),
            None => (self.renderer.idle(), self.intervals.idle),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{command::fake::FakeRunner, player::PlayerctlSource};
    use status_render::{marquee, RendererSettings};

    const INTERVALS: PollIntervals = PollIntervals { scroll: Duration::from_millis(200), idle: Duration::from_secs(1) };

    fn output_lines(out: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(out).unwrap().lines().map(|line| serde_json::from_str(line).unwrap()).collect()
    }

    fn playing(runner: FakeRunner, artist: &str, title: &str) -> FakeRunner {
        runner
            .with_output("playerctl metadata --format {{artist}}", artist)
            .with_output("playerctl metadata --format {{title}}", title)
            .with_output("playerctl status", "Playing")
            .with_output("playerctl metadata --format {{mpris:length}}", "383000000")
            .with_output("playerctl position", "60.0")
    }

    #[test]
    fn test_nothing_playing() {
        let source = PlayerctlSource::new(FakeRunner::default(), None);
        let mut poller = PlayerPoller::new(source, StatusRenderer::default(), Vec::new(), INTERVALS);
        assert_eq!(poller.tick().unwrap(), INTERVALS.idle);

        let lines = output_lines(&poller.out);
        assert_eq!(lines, vec![serde_json::json!({ "text": "", "tooltip": "", "class": "stopped" })]);
    }

    #[test]
    fn test_scrolls_between_ticks() {
        let source = PlayerctlSource::new(playing(FakeRunner::default(), "Radiohead", "Paranoid Android"), None);
        let mut poller = PlayerPoller::new(source, StatusRenderer::default(), Vec::new(), INTERVALS);
        assert_eq!(poller.tick().unwrap(), INTERVALS.scroll);
        assert_eq!(poller.tick().unwrap(), INTERVALS.scroll);

        let lines = output_lines(&poller.out);
        assert_eq!(lines.len(), 2);
        assert!(lines[0]["text"].as_str().unwrap().contains(&marquee("Paranoid Android", 0, 12)));
        assert!(lines[1]["text"].as_str().unwrap().contains(&marquee("Paranoid Android", 1, 12)));
        assert_eq!(lines[1]["class"], "playing");
        assert!(lines[1]["tooltip"].as_str().unwrap().contains("01:00"));
    }

    #[test]
    fn test_player_bound_states() {
        let settings = RendererSettings { player: Some("spotify".to_string()), ..RendererSettings::default() };
        let source = PlayerctlSource::new(FakeRunner::default(), Some("spotify".to_string()));
        let mut poller = PlayerPoller::new(source, StatusRenderer::new(settings.clone()), Vec::new(), INTERVALS);
        assert_eq!(poller.tick().unwrap(), INTERVALS.idle);
        let lines = output_lines(&poller.out);
        assert_eq!(lines[0]["class"], "stopped");
        assert_eq!(lines[0]["tooltip"], "Click to open Spotify");

        let runner = FakeRunner::default().with_output("pgrep -x spotify", "1234");
        let source = PlayerctlSource::new(runner, Some("spotify".to_string()));
        let mut poller = PlayerPoller::new(source, StatusRenderer::new(settings), Vec::new(), INTERVALS);
        assert_eq!(poller.tick().unwrap(), INTERVALS.idle);
        let lines = output_lines(&poller.out);
        assert_eq!(lines[0]["class"], "paused");
        assert_eq!(lines[0]["tooltip"], " ");
    }

    #[test]
    fn test_write_failure_stops_the_loop() {
        struct ClosedPipe;
        impl Write for ClosedPipe {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let source = PlayerctlSource::new(FakeRunner::default(), None);
        let poller = PlayerPoller::new(source, StatusRenderer::default(), ClosedPipe, INTERVALS);
        assert!(poller.run().is_err());
    }
}
