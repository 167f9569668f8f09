use std::time::Duration;

use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use streampulse_player::app::{self, AppConfig, load_env_file};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "streampulse-player")]
#[command(about = "Run a scripted StreamPulse playback session against a headless host")]
struct Cli {
    /// Catalog title to open (substring match); defaults to the featured movie
    #[arg(long)]
    movie: Option<String>,

    /// Open this URL instead of a catalog movie
    #[arg(long, conflicts_with = "movie")]
    url: Option<Url>,

    /// Markup for the in-player pause ad
    #[arg(long, env = "STREAMPULSE_PAUSE_AD")]
    ad_code: Option<String>,

    /// Run without a pause ad
    #[arg(long, conflicts_with = "ad_code")]
    no_ad: bool,

    /// Playback speed of the virtual clock (0.01 to 10000)
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Simulate a host without an adaptive streaming runtime
    #[arg(long)]
    no_adaptive_runtime: bool,

    /// Let the surface decode adaptive streams natively
    #[arg(long)]
    native_streams: bool,

    /// Length of the simulated media, in seconds
    #[arg(long, default_value_t = 596)]
    duration: u64,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("streampulse_player", LevelFilter::Info)
        .filter_module("streampulse_core", LevelFilter::Info)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env may set RUST_LOG, so it is read before the logger exists.
    let env_file = load_env_file(None);

    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    match env_file {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(err) => log::debug!("No .env loaded: {err}"),
    }

    let cli = Cli::parse();

    let mut config = AppConfig::from_environment()?.with_speed(cli.speed)?;
    config.movie = cli.movie;
    config.url = cli.url;
    if cli.no_ad {
        config.ad_code = None;
    } else if let Some(code) = cli.ad_code {
        config.ad_code = Some(code);
    }
    config.adaptive_runtime = !cli.no_adaptive_runtime;
    config.native_streams = cli.native_streams;
    config.media_duration = Duration::from_secs(cli.duration);

    let report = app::run(config).await?;

    log::info!(
        "[App] '{}' finished: ready={} countdown={:?} dismissed={} controls_hidden={}",
        report.title,
        report.source_ready,
        report.countdown,
        report.ad_dismissed,
        report.controls_hidden
    );
    if let Some(reason) = report.unavailable {
        log::warn!("[App] Playback was unavailable: {reason}");
    }

    Ok(())
}
