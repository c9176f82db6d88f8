mod app;
mod camera;
mod config;
mod event;
mod keys;
mod raycast;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(version, about = "Build and break textured cubes on a flat field")]
struct Cli {
    /// TOML settings file; watched for changes while running
    #[arg(long, default_value = "blockyard.toml")]
    config: PathBuf,

    /// Directory for saved worlds, overriding `[storage] dir`
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Default log filter; RUST_LOG refines it when logging to the terminal only
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not watch the config file
    #[arg(long)]
    no_watch: bool,
}

fn init_logging(level: LevelFilter, file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match file {
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
        }
        Some(path) => {
            use simplelog::{
                ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger,
            };
            let f = std::fs::File::create(path)?;
            CombinedLogger::init(vec![
                TermLogger::new(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
                WriteLogger::new(level, Config::default(), f),
            ])?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_file.as_deref())?;

    let mut config = config::load_config(&cli.config);
    config::apply_overrides(&mut config, cli.storage_dir.as_deref());

    let (mut rl, thread) = raylib::init()
        .size(config.window.width, config.window.height)
        .title(&config.window.title)
        .resizable()
        .build();
    rl.set_target_fps(config.window.target_fps);

    let mut app = App::new(
        &mut rl,
        &thread,
        config,
        cli.config,
        cli.storage_dir,
        !cli.no_watch,
    )?;
    while !rl.window_should_close() {
        let dt = rl.get_frame_time().min(0.1);
        app.step(&mut rl, &thread, dt);
        app.render(&mut rl, &thread);
    }
    log::info!(
        "exiting after {} tick(s), {} event(s)",
        app.queue.now,
        app.events_processed()
    );
    Ok(())
}
