use clap::Parser;
use dots::{dispatch, CliRenderer, Config, Game, Input, Layout, Renderer};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Dots and Boxes against the computer, in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Squares per row and column
    #[arg(long, default_value_t = 5)]
    grid_size: usize,

    /// Game ticks per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seconds the computer waits before drawing its line
    #[arg(long, default_value_t = 0.5)]
    think_delay: f64,

    /// Seconds the result stays up before a new game
    #[arg(long, default_value_t = 2.0)]
    end_delay: f64,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal is busy drawing the board)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &PathBuf) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = Config {
        grid_size: args.grid_size,
        fps: args.fps,
        think_delay_secs: args.think_delay,
        end_delay_secs: args.end_delay,
    };
    config.validate().map_err(io::Error::other)?;

    let layout = Layout::terminal(config.grid_size);
    let tick_interval = config.tick_interval();
    let mut game = match args.seed {
        Some(seed) => Game::seeded(config, layout, seed),
        None => Game::new(config, layout),
    };
    let mut renderer = CliRenderer::new();

    renderer.init()?;

    let mut last_tick = Instant::now();

    loop {
        // Poll for input
        if let Some(input) = renderer.poll_input()? {
            // Terminals may not report motion right before a press.
            if let Input::Click(at) = input {
                game.pointer_move(at);
            }
            if !dispatch(&mut game, input) {
                break;
            }
        }

        // Let renderer decide when to actually render
        // (it manages its own frame rate internally)
        renderer.render(&game)?;

        // Advance timers and the computer at a fixed rate
        if last_tick.elapsed() >= tick_interval {
            game.tick();
            last_tick = Instant::now();
        }
    }

    renderer.cleanup()?;
    Ok(())
}
