/// Double Coin Dispatcher: drag trucks to the matching dock before the clock runs out
///
/// Architecture:
///   audio/    Procedural sound effects (tones → PCM → WAV)
///   engine/   Window, input, fixed timestep, drawing, audio output
///   game/     Rules, level table, drag & drop, leaderboard, HUD

mod audio;
mod engine;
mod game;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use dispatcher_common::{AppConfig, Language};

use crate::game::leaderboard::Leaderboard;

#[derive(Parser, Debug)]
#[command(name = "dispatcher", about = "Double Coin Dispatcher", version)]
struct Cli {
    /// Config file (defaults to ./dispatcher.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Starting level (1-3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    level: Option<u8>,
    /// Directory holding leaderboard.json
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Start with sound off
    #[arg(long)]
    mute: bool,
    /// Integer window scale (1-4)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    scale: Option<u8>,
    #[arg(long)]
    fullscreen: bool,
    /// UI language: en or de
    #[arg(long, value_parser = parse_language)]
    lang: Option<Language>,
    /// Play one sound effect (`name` or `name:arg`, e.g. `combo:4`) and exit
    #[arg(long, value_name = "NAME[:ARG]")]
    play_sfx: Option<String>,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).ok_or_else(|| format!("unknown language '{}' (expected en or de)", s))
}

impl Cli {
    /// Command-line values win over the config file
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(level) = self.level {
            config.start_level = level;
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if self.mute {
            config.muted = true;
        }
        if let Some(scale) = self.scale {
            config.window_scale = scale;
        }
        if self.fullscreen {
            config.fullscreen = true;
        }
        if let Some(lang) = self.lang {
            config.language = lang;
        }
        config.sanitized()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = cli.apply(config);

    let (directives, level_known) = log_directives(&config.log_level);
    let mut filter = EnvFilter::from_default_env();
    for directive in &directives {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Double Coin Dispatcher v{}", env!("CARGO_PKG_VERSION"));
    if !level_known {
        tracing::warn!("Unknown log level '{}', using info", config.log_level);
    }
    match &config.source {
        Some(path) => tracing::debug!("Config: {} ({:?})", path.display(), config),
        None => tracing::debug!("Config: defaults ({:?})", config),
    }

    if let Some(spec) = &cli.play_sfx {
        return play_sfx(spec, &config);
    }

    let leaderboard = Leaderboard::open(&config.leaderboard_path());
    tracing::info!("Leaderboard: {} ({} entries)", config.leaderboard_path().display(), leaderboard.entries().len());

    engine::run(&config, leaderboard)
}

/// Crates whose logs follow `log_level`
const LOG_TARGETS: [&str; 2] = ["dispatcher", "dispatcher_common"];

/// Filter directives for the configured level, and whether the level was
/// recognised. Unknown levels fall back to `info`.
fn log_directives(log_level: &str) -> (Vec<String>, bool) {
    let level = log_level.trim().to_ascii_lowercase();
    let (level, known) = match level.parse::<LevelFilter>() {
        Ok(_) => (level, true),
        Err(_) => ("info".to_string(), false),
    };
    let directives = LOG_TARGETS.iter().map(|target| format!("{}={}", target, level)).collect();
    (directives, known)
}

/// Split `name[:arg]`
fn parse_sfx_arg(spec: &str) -> Result<(&str, Option<u32>)> {
    match spec.split_once(':') {
        Some((name, arg)) => {
            let n = arg
                .parse::<u32>()
                .with_context(|| format!("Invalid sound argument '{}'", arg))?;
            Ok((name, Some(n)))
        }
        None => Ok((spec, None)),
    }
}

/// Sound check: play a single effect through the normal output path
fn play_sfx(spec: &str, config: &AppConfig) -> Result<()> {
    let (name, arg) = parse_sfx_arg(spec)?;
    let mut sound = engine::sound_engine::SoundEngine::new(config.volume, true)
        .context("No audio output device")?;
    match sound.play_named(name, arg) {
        Some(sfx) => {
            tracing::info!("Playing {:?}", sfx);
            sound.wait_idle();
            Ok(())
        }
        None => anyhow::bail!("Unknown sound '{}'", name),
    }
}
