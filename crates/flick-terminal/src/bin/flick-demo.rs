//! flick-demo: three draggable switches in the terminal
//!
//! Run: cargo run -p flick-terminal --bin flick-demo -- --interactive

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flick_terminal::{
    default_script, run, run_headless, CellMetrics, CrosstermTerminal, DemoApp, RunConfig,
    TuiError,
};
use flick_widgets::SwitchOptions;

/// Draggable toggle switch demo
#[derive(Parser)]
#[command(name = "flick-demo", version, about, long_about = None)]
struct Cli {
    /// Switch options file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Let the thumb follow drags and flings
    #[arg(short, long)]
    interactive: bool,

    /// Replay a scripted gesture sequence and print JSON snapshots
    #[arg(long)]
    headless: bool,

    /// Frames to replay in headless mode
    #[arg(long, default_value = "240")]
    frames: u64,

    /// Frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Logical pixels per cell, horizontally
    #[arg(long, default_value = "4")]
    cell_width: f32,

    /// Logical pixels per cell, vertically
    #[arg(long, default_value = "8")]
    cell_height: f32,
}

fn options(cli: &Cli) -> Result<SwitchOptions, TuiError> {
    let options = match &cli.config {
        Some(path) => SwitchOptions::load(path)?,
        None => SwitchOptions::default(),
    };
    Ok(if cli.interactive {
        options.interactive(true)
    } else {
        options
    })
}

fn demo(cli: &Cli) -> Result<(), TuiError> {
    let options = options(cli)?;
    let metrics = CellMetrics {
        width: cli.cell_width.max(1.0),
        height: cli.cell_height.max(1.0),
    };
    let mut app = DemoApp::new(&options, metrics);
    let config = RunConfig {
        fps: cli.fps.max(1),
        ..RunConfig::default()
    };

    if cli.headless {
        app.layout(flick_core::Rect::new(0.0, 0.0, 320.0, 240.0));
        let script = default_script(&app);
        let mut stdout = io::stdout().lock();
        let frame = config.frame_duration();
        let frames = run_headless(&mut app, &script, cli.frames, frame, &mut stdout)?;
        log::info!("replayed {frames} frames at {} fps", config.fps);
        return Ok(());
    }

    let mut terminal = CrosstermTerminal::new();
    let frames = run(&mut app, &mut terminal, &config)?;
    log::info!("exited after {frames} frames");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match demo(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
