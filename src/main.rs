use anyhow::{Context, Result};
use clap::Parser;
use snake::game::{GameConfig, SpeedConfig};
use snake::modes::HumanMode;
use snake::render::GlyphSet;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file defining the apple, body and head glyphs
    #[arg(long, value_name = "PATH")]
    glyphs: Option<PathBuf>,

    /// Write logs to this file (logging is off otherwise, the screen belongs to the game)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    // Missing or broken glyphs are fatal before the terminal is touched
    let glyphs = GlyphSet::load(cli.glyphs.as_deref()).context("Failed to load glyphs")?;

    log::info!("snake {} starting", env!("CARGO_PKG_VERSION"));

    let mut human_mode = HumanMode::new(GameConfig::default(), SpeedConfig::default(), glyphs);
    human_mode.run().await?;

    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    use env_logger::{Builder, Env, Target};

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            Builder::from_env(Env::default().default_filter_or("off")).init();
        }
    }

    Ok(())
}
