use clap::{Parser, Subcommand};

/// Struct that gets generated from `RawOpt`.
#[derive(Debug, PartialEq)]
pub struct Opt {
    pub log_debug: bool,
    pub config_path: Option<std::path::PathBuf>,
    pub action: Action,
}

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub(super) struct RawOpt {
    /// Write out debug logs to stderr.
    #[arg(long = "debug", global = true)]
    log_debug: bool,

    /// override path to the configuration file (defaults to $XDG_CONFIG_HOME/barpoll/config.json)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Action {
    /// Print the state of a media player forever, one json object per line.
    #[command(name = "player", alias = "p")]
    Player(PlayerArgs),

    /// Toggle play/pause. Launches the player instead when it is not running.
    #[command(name = "click")]
    Click {
        /// playerctl name of the player, i.e. `spotify`
        #[arg(short, long)]
        player: Option<String>,
    },

    /// Pass the given arguments on to playerctl, i.e. `barpoll control -- volume 0.05+`
    #[command(name = "control")]
    Control {
        #[arg(short, long)]
        player: Option<String>,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the state of the notification daemon once.
    #[command(name = "notifications", alias = "n")]
    Notifications,

    /// Generate a shell completion script
    ShellCompletions {
        #[arg(short, long)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Debug, Default, PartialEq, Eq)]
pub struct PlayerArgs {
    /// playerctl name of the player to follow. Without it, whatever player playerctl picks is shown.
    #[arg(short, long)]
    pub player: Option<String>,

    /// Name shown while the player is stopped. Defaults to the capitalized player name.
    #[arg(short, long)]
    pub label: Option<String>,

    /// Icon shown in front of the module text
    #[arg(long)]
    pub icon: Option<String>,

    /// Fields longer than this many characters scroll
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Time between two frames of the scrolling text, in milliseconds
    #[arg(long)]
    pub scroll_interval_ms: Option<u64>,
}

impl Opt {
    pub fn from_env() -> Self {
        let raw: RawOpt = RawOpt::parse();
        raw.into()
    }
}

impl From<RawOpt> for Opt {
    fn from(other: RawOpt) -> Self {
        let RawOpt { action, log_debug, config } = other;
        Opt { action, log_debug, config_path: config }
    }
}
