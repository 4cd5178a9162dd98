mod app;
mod config;
mod field;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use config::FieldConfig;
use field::ConnectionStrategy;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with backdrop settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    points: Option<usize>,
    #[arg(long)]
    link_threshold: Option<f32>,
    #[arg(long)]
    cursor_threshold: Option<f32>,
    #[arg(long, value_enum)]
    strategy: Option<ConnectionStrategy>,
    /// Seed for reproducible point placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop animating after this many frames.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,
    /// Show the stats overlay on startup (toggle with F3).
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn apply_to(&self, config: &mut FieldConfig) {
        if let Some(points) = self.points {
            config.point_count = points;
        }
        if let Some(threshold) = self.link_threshold {
            config.link_threshold = threshold;
        }
        if let Some(threshold) = self.cursor_threshold {
            config.cursor_threshold = threshold;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = FieldConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    let settings = config.resolve().context("invalid backdrop settings")?;

    info!(
        "starting backdrop: {} points, link threshold {}, cursor threshold {}, {:?} connections",
        settings.field.point_count,
        settings.field.link_threshold,
        settings.field.cursor_threshold,
        settings.field.strategy
    );

    let launch = app::LaunchOptions {
        settings,
        seed: args.seed,
        frame_limit: args.frames,
        show_stats: args.stats,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("network backdrop"),
        ..Default::default()
    };

    eframe::run_native(
        "network-backdrop",
        options,
        Box::new(move |cc| Ok(Box::new(app::BackdropApp::new(cc, launch)))),
    )
    .map_err(|error| anyhow!("{error}"))
    .context("failed to acquire a drawing context")
}
