/// spin3d Terminal Demo - three rotating shapes
///
/// Controls:
///   - 1/2/3, Tab: Select a shape
///   - Space / T: Toggle the selected shape
///   - Left/Right: Move the speed slider
///   - Enter: Edit the speed field (Enter/Tab/Esc to leave it)
///   - Q/ESC, Ctrl+C: Quit
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use spin3d_core::{Color, SceneConfig};
use spin3d_terminal::logging::{init_logging, LoggingConfig};
use spin3d_terminal::{AppOptions, TerminalApp};

#[derive(Parser, Debug)]
#[command(version, about = "Three rotating shapes rendered in the terminal")]
struct Args {
    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Base color of every shape as a CSS hex value
    #[arg(long, default_value = "#fff")]
    color: String,

    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter in env_logger syntax, e.g. "debug" or "spin3d_core=debug".
    /// Ignored without --log-file
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        filter: args.log,
        file: args.log_file,
    })?;

    let color = Color::from_hex(&args.color)
        .with_context(|| format!("invalid --color {:?}", args.color))?;

    let options = AppOptions {
        fps: args.fps,
        scene: SceneConfig::default().with_color(color),
    };

    let mut app = TerminalApp::new(options)?;
    app.run()
}
