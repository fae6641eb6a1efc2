//! In-memory level grid: cell symbols, positions, directions.
//!
//! Rows are independently indexed and may have different lengths; nothing in
//! here pads or rectangularizes a level.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Pellet,
    PowerPellet,
    Empty,
    Player,
}

impl Cell {
    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Pellet),
            '*' => Some(Cell::PowerPellet),
            ' ' => Some(Cell::Empty),
            'P' => Some(Cell::Player),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; ragged levels render against this width.
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *slot = cell;
        }
    }

    /// A signed coordinate is walkable iff it lands inside its row and is not
    /// a wall. Out-of-bounds (including past a short row's end) is not.
    pub fn walkable(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        matches!(
            self.get(x as usize, y as usize),
            Some(cell) if cell != Cell::Wall
        )
    }

    pub fn find_player(&self) -> Option<Pos> {
        self.cells()
            .find(|(_, cell)| *cell == Cell::Player)
            .map(|(pos, _)| pos)
    }

    /// The win check looks at `Pellet` only; power pellets never block it.
    pub fn has_pellets(&self) -> bool {
        self.cells().any(|(_, cell)| cell == Cell::Pellet)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Pos { x, y }, *cell))
        })
    }
}
