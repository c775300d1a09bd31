use smart_default::SmartDefault;

use crate::{
    marquee::{escape_markup, marquee},
    output::{CssClass, RenderedStatus},
    progress::{build_progress_bar, format_time},
    snapshot::{PlaybackSnapshot, PlaybackStatus},
};

/// Fields longer than this many characters scroll.
pub const MAX_CHAR: usize = 12;
pub const PROGRESS_BAR_WIDTH: usize = 10;
pub const DEFAULT_ICON: &str = "\u{f1bc}";
pub const PAUSED_ICON: &str = "\u{f03e4}";

const STOPPED_CLASS: &str = "stopped";
const IDLE_CLASS: &str = "paused";

#[derive(Debug, Clone, PartialEq, Eq, SmartDefault)]
pub struct RendererSettings {
    #[default(MAX_CHAR)]
    pub max_chars: usize,
    #[default(PROGRESS_BAR_WIDTH)]
    pub bar_width: usize,
    #[default(DEFAULT_ICON.to_string())]
    pub icon: String,
    /// Name of the player being followed, if the module is bound to one specific player.
    pub player: Option<String>,
    /// Display name of that player. Derived from `player` when not given.
    pub label: Option<String>,
}

impl RendererSettings {
    pub fn label(&self) -> Option<String> {
        self.label.clone().or_else(|| self.player.as_deref().map(capitalize))
    }
}

/// Scroll positions of the artist and title fields, and the track they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    artist_offset: usize,
    title_offset: usize,
    last_track_key: Option<(String, String)>,
}

impl ScrollState {
    pub fn artist_offset(&self) -> usize {
        self.artist_offset
    }

    pub fn title_offset(&self) -> usize {
        self.title_offset
    }

    pub fn last_track_key(&self) -> Option<(&str, &str)> {
        self.last_track_key.as_ref().map(|(artist, title)| (artist.as_str(), title.as_str()))
    }

    /// Start scrolling over if the track changed since the last call.
    fn follow_track(&mut self, (artist, title): (&str, &str)) {
        if self.last_track_key() != Some((artist, title)) {
            log::trace!("track changed to {} - {}, resetting scroll offsets", artist, title);
            self.artist_offset = 0;
            self.title_offset = 0;
            self.last_track_key = Some((artist.to_string(), title.to_string()));
        }
    }
}

/// Turns playback snapshots into module output, one tick at a time.
#[derive(Debug, Clone, Default)]
pub struct StatusRenderer {
    settings: RendererSettings,
    scroll: ScrollState,
}

impl StatusRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        StatusRenderer { settings, scroll: ScrollState::default() }
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Render one tick. Every call with a snapshot advances the marquee of fields that overflow.
    pub fn update(&mut self, snapshot: Option<&PlaybackSnapshot>) -> RenderedStatus {
        let Some(snapshot) = snapshot else {
            return self.stopped();
        };
        self.scroll.follow_track(snapshot.track_key());

        let max_chars = self.settings.max_chars;
        let artist = scroll_field(&escape_markup(&snapshot.artist), &mut self.scroll.artist_offset, max_chars);
        let title = scroll_field(&escape_markup(&snapshot.title), &mut self.scroll.title_offset, max_chars);

        let text = format!("{} {} <i>{}</i> • <b>{}</b>", self.settings.icon, self.status_icon(snapshot.status), artist, title);
        RenderedStatus::new(text, self.tooltip(snapshot), CssClass::Single(snapshot.status.to_string()))
    }

    /// Output for when there is no player to show at all.
    pub fn stopped(&self) -> RenderedStatus {
        match self.settings.label() {
            Some(label) => {
                RenderedStatus::new(format!("{} {}", self.settings.icon, label), format!("Click to open {}", label), STOPPED_CLASS)
            }
            None => RenderedStatus::new("", "", STOPPED_CLASS),
        }
    }

    /// Output for when the player is running, but has nothing loaded.
    pub fn idle(&self) -> RenderedStatus {
        match self.settings.label() {
            Some(label) => RenderedStatus::new(format!("{} {}", self.settings.icon, label), " ", IDLE_CLASS),
            None => self.stopped(),
        }
    }

    fn status_icon(&self, status: PlaybackStatus) -> &'static str {
        match status {
            PlaybackStatus::Paused => PAUSED_ICON,
            PlaybackStatus::Playing if self.settings.player.is_some() => " ",
            PlaybackStatus::Playing => "",
        }
    }

    fn tooltip(&self, snapshot: &PlaybackSnapshot) -> String {
        let current = format_time(snapshot.position_seconds);
        let total = format_time(snapshot.length_seconds);
        let elapsed = snapshot.position_seconds.min(snapshot.length_seconds);
        let (empty, filled) = build_progress_bar(elapsed, snapshot.length_seconds, self.settings.bar_width);
        let player = self.settings.player.as_deref().unwrap_or("player");
        let click_help = if self.settings.player.is_some() { "play/pause or open" } else { "play/pause" };

        // The elapsed run is drawn first, in the lighter colour.
        format!(
            "<span foreground=\"#FFFFFF\"><b>{title}</b></span>\n\
             <span foreground=\"#F0E7AA\"><i>{artist}</i></span>\n\
             <span foreground=\"#FFFFFF\">{current}</span> \
             <span foreground=\"#CCC5C0\">{filled}</span>\
             <span foreground=\"#4B5F7D\">{empty}</span> \
             <span foreground=\"#FFFFFF\">{total}</span>\n\
             <span size='x-small' foreground='#AAAAAA'>🎧 {player}\n🖱 click → {click_help}\n🖱 scroll → volume +/-\n🖱 right-click → options</span>",
            title = escape_markup(&snapshot.title),
            artist = escape_markup(&snapshot.artist),
        )
    }
}

/// Fields that fit are padded to `max_chars` and keep their offset, so the module keeps a steady width.
fn scroll_field(text: &str, offset: &mut usize, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let shown = marquee(text, *offset, max_chars);
        *offset += 1;
        shown
    } else {
        marquee(text, 0, max_chars)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
