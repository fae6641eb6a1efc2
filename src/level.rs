//! Level files on disk: `level<N>.txt` grids and the shared `quant.txt`
//! ghost count. Every failure here is fatal to the game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::grid::{Cell, Grid};

/// Highest level number the game will advance into.
pub const MAX_LEVEL: u32 = 3;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {level} could not be read: {source}")]
    Unreadable { level: u32, source: io::Error },
    #[error("level {level} contains unknown symbol {symbol:?} at row {row}, column {column}")]
    BadSymbol {
        level: u32,
        symbol: char,
        row: usize,
        column: usize,
    },
    #[error("level {level} contains no player marker")]
    PlayerNotFound { level: u32 },
    #[error("ghost count file could not be read: {0}")]
    GhostCountUnreadable(io::Error),
    #[error("ghost count file does not hold a non-negative integer: {0:?}")]
    BadGhostCount(String),
}

pub struct LevelStore {
    dir: PathBuf,
}

impl LevelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn level_path(&self, level: u32) -> PathBuf {
        self.dir.join(format!("level{level}.txt"))
    }

    pub fn level_exists(&self, level: u32) -> bool {
        self.level_path(level).is_file()
    }

    pub fn load_level(&self, level: u32) -> Result<Grid, LevelError> {
        let path = self.level_path(level);
        let text = fs::read_to_string(&path)
            .map_err(|source| LevelError::Unreadable { level, source })?;
        let grid = parse_grid(&text, level)?;
        debug!(level, path = %path.display(), rows = grid.height(), "loaded level");
        Ok(grid)
    }

    /// Single shared count file, re-read on every placement.
    pub fn ghost_count(&self) -> Result<usize, LevelError> {
        let text = fs::read_to_string(self.dir.join("quant.txt"))
            .map_err(LevelError::GhostCountUnreadable)?;
        let line = text.lines().next().unwrap_or("").trim();
        line.parse()
            .map_err(|_| LevelError::BadGhostCount(line.to_string()))
    }
}

/// Rows keep whatever length the file gives them; only trailing line breaks
/// are stripped, so interior and leading spaces stay meaningful.
fn parse_grid(text: &str, level: u32) -> Result<Grid, LevelError> {
    let mut rows = Vec::new();
    for (y, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        let mut row = Vec::with_capacity(line.len());
        for (x, symbol) in line.chars().enumerate() {
            let cell = Cell::from_symbol(symbol).ok_or(LevelError::BadSymbol {
                level,
                symbol,
                row: y,
                column: x,
            })?;
            row.push(cell);
        }
        rows.push(row);
    }
    Ok(Grid::new(rows))
}

/// Default level directory, overridable for packaging layouts.
pub fn levels_dir() -> PathBuf {
    std::env::var_os("MAZECHASE_LEVELS")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new("levels").to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Pos;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn parses_the_full_symbol_set() {
        let grid = parse_grid("#####\n#P.*#\n#####\n", 1).unwrap();
        assert_eq!(grid.find_player(), Some(Pos { x: 1, y: 1 }));
        assert_eq!(grid.get(2, 1), Some(Cell::Pellet));
        assert_eq!(grid.get(3, 1), Some(Cell::PowerPellet));
        assert_eq!(grid.get(0, 0), Some(Cell::Wall));
    }

    #[test]
    fn tolerates_ragged_rows_and_crlf() {
        let grid = parse_grid("#####\r\n#P.\r\n##\r\n", 1).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(2, 1), Some(Cell::Pellet));
        assert_eq!(grid.get(4, 1), None);
    }

    #[test]
    fn rejects_unknown_symbols() {
        let err = parse_grid("##\n#X\n", 2).unwrap_err();
        match err {
            LevelError::BadSymbol {
                level,
                symbol,
                row,
                column,
            } => {
                assert_eq!(level, 2);
                assert_eq!(symbol, 'X');
                assert_eq!(row, 1);
                assert_eq!(column, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_level_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let store = LevelStore::new(dir.path());
        assert!(!store.level_exists(1));
        assert!(matches!(
            store.load_level(1),
            Err(LevelError::Unreadable { level: 1, .. })
        ));
    }

    #[test]
    fn ghost_count_reads_the_first_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("quant.txt"), "4\n").unwrap();
        let store = LevelStore::new(dir.path());
        assert_eq!(store.ghost_count().unwrap(), 4);

        fs::write(dir.path().join("quant.txt"), "  0  \nnoise\n").unwrap();
        assert_eq!(store.ghost_count().unwrap(), 0);

        fs::write(dir.path().join("quant.txt"), "many\n").unwrap();
        assert!(matches!(
            store.ghost_count(),
            Err(LevelError::BadGhostCount(_))
        ));
    }

    #[test]
    fn store_loads_levels_by_number() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("level2.txt"), "###\n#P#\n###\n").unwrap();
        let store = LevelStore::new(dir.path());
        assert!(store.level_exists(2));
        let grid = store.load_level(2).unwrap();
        assert_eq!(grid.find_player(), Some(Pos { x: 1, y: 1 }));
    }
}
