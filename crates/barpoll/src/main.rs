use anyhow::{Context, Result};
use clap::CommandFactory as _;
use status_render::StatusRenderer;

use crate::{
    command::SystemCommandRunner,
    config::Config,
    opts::Action,
    paths::BarpollPaths,
    player::PlayerctlSource,
    poll::{PlayerPoller, PollIntervals},
};

mod command;
mod config;
mod launcher;
mod notifications;
mod opts;
mod output;
mod paths;
mod player;
mod poll;
mod util;

fn main() {
    let opts: opts::Opt = opts::Opt::from_env();

    let log_level_filter = if opts.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("barpoll"), log_level_filter)
            .filter(Some("status_render"), log_level_filter)
            .init();
    }

    if let Action::ShellCompletions { shell } = opts.action {
        clap_complete::generate(shell, &mut opts::RawOpt::command(), "barpoll", &mut std::io::stdout());
        return;
    }

    if let Err(err) = run(opts) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(opts: opts::Opt) -> Result<()> {
    let paths = opts
        .config_path
        .map(BarpollPaths::from_config_file)
        .unwrap_or_else(BarpollPaths::default)
        .context("Failed to locate the barpoll config file")?;
    log::debug!("Using {}", paths);
    let mut config = Config::read(&paths)?;

    match opts.action {
        Action::ShellCompletions { .. } => unreachable!(),
        Action::Player(args) => {
            config.apply_overrides(&args);
            let runner = SystemCommandRunner::new(config.command_timeout());
            let source = PlayerctlSource::new(runner, config.player.clone());
            let intervals = PollIntervals { scroll: config.scroll_interval(), idle: config.idle_interval() };
            let poller = PlayerPoller::new(source, StatusRenderer::new(config.renderer_settings()), std::io::stdout().lock(), intervals);
            poller.run().context("Player module stopped")
        }
        Action::Click { player } => {
            let runner = SystemCommandRunner::new(config.command_timeout());
            launcher::click(&runner, player.or(config.player).as_deref())
        }
        Action::Control { player, args } => {
            let runner = SystemCommandRunner::new(config.command_timeout());
            launcher::control(&runner, player.or(config.player).as_deref(), &args)
        }
        Action::Notifications => {
            let runner = SystemCommandRunner::new(config.command_timeout());
            let status = notifications::query(&runner);
            log::debug!("Notification status: {:?}", status);
            output::write_status(&mut std::io::stdout().lock(), &status.render())
        }
    }
}
