//! Initial ghost placement: spawn on the pellet cells farthest from the
//! player. Deterministic; randomness only enters once ghosts start moving.

use tracing::debug;

use crate::grid::{Cell, Grid, Pos};

/// Picks `n` spawn positions among the grid's `Pellet` cells, preferring the
/// ones farthest from the player. Walls, empties, power pellets and the
/// player's own cell are never eligible. Asking for more ghosts than there
/// are pellet cells degrades to the whole set; asking for zero yields none.
pub fn place_ghosts(grid: &Grid, player: Pos, n: usize) -> Vec<Pos> {
    let mut free: Vec<Pos> = grid
        .cells()
        .filter(|(_, cell)| *cell == Cell::Pellet)
        .map(|(pos, _)| pos)
        .collect();

    // Squared distance ranks identically to Euclidean distance.
    free.sort_by_key(|pos| dist_sq(*pos, player));

    let spawns = free.split_off(free.len().saturating_sub(n));
    debug!(requested = n, placed = spawns.len(), "placed ghosts");
    spawns
}

fn dist_sq(a: Pos, b: Pos) -> u64 {
    let dx = a.x.abs_diff(b.x) as u64;
    let dy = a.y.abs_diff(b.y) as u64;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&str]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|row| row.chars().map(|c| Cell::from_symbol(c).unwrap()).collect())
                .collect(),
        )
    }

    #[test]
    fn picks_the_cells_farthest_from_the_player() {
        let g = grid(&["#######", "#P....#", "#######"]);
        let player = Pos { x: 1, y: 1 };
        let spawns = place_ghosts(&g, player, 2);
        assert_eq!(spawns, vec![Pos { x: 4, y: 1 }, Pos { x: 5, y: 1 }]);
    }

    #[test]
    fn never_spawns_on_walls_power_pellets_or_the_player() {
        let g = grid(&["#####", "#P*.#", "#. .#", "#####"]);
        let player = g.find_player().unwrap();
        let spawns = place_ghosts(&g, player, 10);
        for pos in &spawns {
            assert_ne!(*pos, player);
            assert_eq!(g.get(pos.x, pos.y), Some(Cell::Pellet));
        }
        // Only three pellet cells exist; the oversized request degrades.
        assert_eq!(spawns.len(), 3);
    }

    #[test]
    fn zero_requested_means_zero_placed() {
        let g = grid(&["#####", "#P..#", "#####"]);
        assert!(place_ghosts(&g, g.find_player().unwrap(), 0).is_empty());
    }

    #[test]
    fn placement_is_deterministic() {
        let g = grid(&["#######", "#..P..#", "#.....#", "#######"]);
        let player = g.find_player().unwrap();
        assert_eq!(place_ghosts(&g, player, 3), place_ghosts(&g, player, 3));
    }
}
