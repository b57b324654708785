//! Replays recorded hand and face landmarks through the pose calculators.

use anyhow::{Context, Result};
use clap::Parser;
use landmark_pose_estimation::{
    app::{AppConfig, PoseApp},
    config::Config,
    recording::Recording,
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark recording to replay (YAML)
    #[arg(short, long)]
    input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Read finger angles for a mirrored avatar
    #[arg(short, long)]
    mirror: bool,

    /// Calibrate the face on the first tracked frame
    #[arg(long)]
    calibrate_first: bool,

    /// Reject recordings with malformed frames instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Print the example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{}", landmark_pose_estimation::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path).and_then(|cfg| cfg.validate().map(|()| cfg)) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let recording =
        Recording::from_file(&args.input).with_context(|| format!("Failed to load recording {}", args.input))?;
    if let Err(e) = recording.validate() {
        if args.strict {
            return Err(e).context("Recording failed validation");
        }
        warn!("{}; malformed frames will be skipped", e);
    }

    let mut app = PoseApp::new(AppConfig {
        config,
        mirror: args.mirror,
        calibrate_first: args.calibrate_first,
    });
    for summary in app.run(&recording) {
        println!("{summary}");
    }

    Ok(())
}
