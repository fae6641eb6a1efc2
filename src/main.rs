use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod game;
mod ghost;
mod grid;
mod input;
mod level;
mod render;

use game::{Game, Phase};
use input::Intent;
use level::LevelStore;
use render::Renderer;

const DEFAULT_TICK_MS: u64 = 100;

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> anyhow::Result<()> {
    let store = LevelStore::new(level::levels_dir());
    let mut rng = rand::thread_rng();
    let mut game = Game::new(&store)?;
    let mut renderer = Renderer::new();
    let tick = Duration::from_millis(read_tick_ms());

    loop {
        match game.step(&store, &mut rng)? {
            // The reset already happened; skip this tick's draw and input.
            Phase::Collided => continue,
            Phase::Over => {
                render::render_game_over(stdout, &game)?;
                return Ok(());
            }
            Phase::Playing | Phase::LevelCleared => {}
        }

        render::render(stdout, &game, &mut renderer)?;

        match input::poll_intent(tick)? {
            Some(Intent::Quit) => {
                info!(score = game.score, level = game.level, "quit");
                return Ok(());
            }
            Some(Intent::Move(dir)) => {
                let (dx, dy) = dir.delta();
                game.move_player(dx, dy);
            }
            None => {}
        }
    }
}

fn read_tick_ms() -> u64 {
    std::env::var("MAZECHASE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS)
}

// The terminal runs in raw mode, so traces go to a file or nowhere.
fn init_logging() {
    let Some(path) = std::env::var_os("MAZECHASE_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
