//! Game state machine: player and ghost positions, scoring, collision
//! handling and level transitions.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::ghost::place_ghosts;
use crate::grid::{Cell, Dir, Grid, Pos};
use crate::level::{LevelError, LevelStore, MAX_LEVEL};

/// Outcome of one tick. `Collided` and `LevelCleared` are transient: by the
/// time the caller sees them the state has already been reset or advanced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Collided,
    LevelCleared,
    Over,
}

pub struct Game {
    pub grid: Grid,
    pub player: Pos,
    pub ghosts: Vec<Pos>,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    player_moved: bool,
}

impl Game {
    pub fn new(store: &LevelStore) -> Result<Game, LevelError> {
        let mut game = Game {
            grid: Grid::new(Vec::new()),
            player: Pos { x: 0, y: 0 },
            ghosts: Vec::new(),
            score: 0,
            level: 1,
            game_over: false,
            player_moved: false,
        };
        game.restart(store)?;
        Ok(game)
    }

    /// Attempts a unit move. Out-of-bounds and wall targets are silently
    /// rejected; a valid move consumes whatever sits on the target cell.
    pub fn move_player(&mut self, dx: isize, dy: isize) {
        let nx = self.player.x as isize + dx;
        let ny = self.player.y as isize + dy;
        if !self.grid.walkable(nx, ny) {
            return;
        }
        let target = Pos {
            x: nx as usize,
            y: ny as usize,
        };
        match self.grid.get(target.x, target.y) {
            Some(Cell::Pellet) => self.score += 10,
            Some(Cell::PowerPellet) => self.score += 50,
            _ => {}
        }
        self.grid.set(self.player, Cell::Empty);
        self.grid.set(target, Cell::Player);
        self.player = target;
        self.player_moved = true;
    }

    /// Ghosts only act in response to an accepted player move, once per
    /// move. Each ghost independently tries one random direction and stays
    /// put when it is blocked; there is no retry.
    pub fn move_ghosts(&mut self, rng: &mut impl Rng) {
        if !self.player_moved {
            return;
        }
        for ghost in &mut self.ghosts {
            let (dx, dy) = Dir::ALL.choose(rng).copied().map(Dir::delta).unwrap_or((0, 0));
            let nx = ghost.x as isize + dx;
            let ny = ghost.y as isize + dy;
            if self.grid.walkable(nx, ny) {
                *ghost = Pos {
                    x: nx as usize,
                    y: ny as usize,
                };
            }
        }
        self.player_moved = false;
    }

    pub fn check_collision(&self) -> bool {
        self.ghosts.iter().any(|ghost| *ghost == self.player)
    }

    /// Power pellets do not count; a level is clear once every plain pellet
    /// is gone.
    pub fn cleared(&self) -> bool {
        !self.grid.has_pellets()
    }

    /// Reloads the current level from scratch: fresh grid, player recomputed
    /// from the grid marker, ghosts re-placed, score and flags reset.
    pub fn restart(&mut self, store: &LevelStore) -> Result<(), LevelError> {
        self.grid = store.load_level(self.level)?;
        self.player = self
            .grid
            .find_player()
            .ok_or(LevelError::PlayerNotFound { level: self.level })?;
        self.ghosts = place_ghosts(&self.grid, self.player, store.ghost_count()?);
        self.score = 0;
        self.game_over = false;
        self.player_moved = false;
        Ok(())
    }

    fn advance_level(&mut self, store: &LevelStore) -> Result<Phase, LevelError> {
        self.level += 1;
        if self.level <= MAX_LEVEL && store.level_exists(self.level) {
            info!(level = self.level, "level cleared, advancing");
            self.restart(store)?;
            Ok(Phase::LevelCleared)
        } else {
            info!(score = self.score, "final level cleared, game over");
            self.game_over = true;
            Ok(Phase::Over)
        }
    }

    /// One tick of the turn protocol: ghosts move first; a collision resets
    /// the level and reports `Collided` so the caller skips this tick's
    /// draw; otherwise a cleared board advances or ends the game.
    pub fn step(&mut self, store: &LevelStore, rng: &mut impl Rng) -> Result<Phase, LevelError> {
        self.move_ghosts(rng);
        if self.check_collision() {
            info!(level = self.level, score = self.score, "caught by a ghost");
            self.restart(store)?;
            return Ok(Phase::Collided);
        }
        if self.cleared() {
            return self.advance_level(store);
        }
        Ok(Phase::Playing)
    }
}
