//! Crossterm renderer: draws the grid centered in the terminal with a
//! status line underneath, redrawing only cells that changed since the
//! previous frame.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::grid::{Cell, Pos};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct ScreenCell {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<ScreenCell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    width: usize,
    height: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
            width: 0,
            height: 0,
        }
    }

    // Level grids can change shape on advance; start the diff over.
    fn ensure_size(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.last = vec![
                ScreenCell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ];
            self.needs_full = true;
        }
    }
}

pub fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let width = game.grid.max_width();
    let height = game.grid.height();
    renderer.ensure_size(width, height);

    let needed_w = (width * CELL_W) as u16;
    let needed_h = (height + 1) as u16;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(Print(format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        )))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    for y in 0..height {
        for x in 0..width {
            let cell = screen_cell(game, Pos { x, y });
            let idx = y * width + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }

    let hud = format!(
        "Level: {}  Score: {}  (q to quit)",
        game.level, game.score
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y + height as u16))?;
        stdout.queue(Clear(ClearType::UntilNewLine))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn screen_cell(game: &Game, pos: Pos) -> ScreenCell {
    if game.ghosts.iter().any(|g| *g == pos) {
        return ScreenCell {
            glyph: Glyph::Ghost,
            color: Color::Red,
        };
    }
    // Short rows in ragged levels render as blanks past their end.
    match game.grid.get(pos.x, pos.y) {
        Some(Cell::Player) => ScreenCell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        },
        Some(Cell::Wall) => ScreenCell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Some(Cell::Pellet) => ScreenCell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Some(Cell::PowerPellet) => ScreenCell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        },
        Some(Cell::Empty) | None => ScreenCell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    cell: ScreenCell,
) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power => "● ",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    for _ in w..CELL_W {
        stdout.queue(Print(' '))?;
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Final screen after the last level: show the score and wait for `q`.
pub fn render_game_over(stdout: &mut Stdout, game: &Game) -> io::Result<()> {
    let height = game.grid.height() as u16;
    let (term_w, term_h) = terminal::size()?;
    let needed_w = (game.grid.max_width() * CELL_W) as u16;
    let needed_h = height + 1;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, needed_h))?;
    } else {
        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        stdout.queue(MoveTo(origin_x, origin_y + height))?;
    }
    stdout.queue(Clear(ClearType::UntilNewLine))?;
    stdout.queue(Print(format!(
        "GAME OVER - Final Score: {} (press q to quit)",
        game.score
    )))?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
