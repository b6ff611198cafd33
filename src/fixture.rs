// Text-grid board construction.
//
// This is the canonical fixture language for tests and debugging, the
// inverse of `BoardState::render`:
//
//   v......
//   va<....
//   >>^....
//   ....*..
//   .*.....
//   ..v>>b.
//   .......
//
// A letter a-d is a snake's head (uppercase means the tail carries an extra
// stacked segment from growth), `<>^v` are body segments pointing toward the
// head, `*` is food, `.` is empty. Rows are written top to bottom; leading
// whitespace per line is ignored so fixtures can be indented in source.
// Fixtures are test tooling: malformed input panics.

use std::collections::HashMap;

use crate::types::{Battlesnake, Board, Coord};

const FOOD: char = '*';
const RIGHT: char = '>';
const LEFT: char = '<';
const UP: char = '^';
const DOWN: char = 'v';
const HEADS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Parses a text grid plus per-snake health map into a wire `Board`.
pub struct BoardBuilder {
    // grid[x][y], y = 0 at the bottom
    grid: Vec<Vec<char>>,
    healths: HashMap<char, i32>,
}

impl BoardBuilder {
    pub fn new(board_str: &str, healths: &[(char, i32)]) -> Self {
        BoardBuilder {
            grid: Self::str_to_grid(board_str),
            healths: healths.iter().copied().collect(),
        }
    }

    pub fn to_board(&self) -> Board {
        Board {
            width: self.grid.len() as i32,
            height: self.grid[0].len() as i32,
            food: self.find_food(),
            snakes: self.find_snakes(),
            hazards: Vec::new(),
        }
    }

    fn str_to_grid(board_str: &str) -> Vec<Vec<char>> {
        let rows: Vec<&str> = board_str
            .lines()
            .map(str::trim)
            .filter(|ln| !ln.is_empty())
            .collect();
        assert!(!rows.is_empty(), "board string has no rows");

        let height = rows.len();
        let width = rows[0].chars().count();
        for row in &rows {
            assert_eq!(
                row.chars().count(),
                width,
                "all rows must be the same width"
            );
        }

        // Input is written top to bottom; the grid wants y = 0 at the bottom
        let mut grid = vec![vec!['.'; height]; width];
        for (i, row) in rows.iter().enumerate() {
            let y = height - 1 - i;
            for (x, val) in row.chars().enumerate() {
                grid[x][y] = val;
            }
        }
        grid
    }

    fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.grid.iter().enumerate().flat_map(|(x, col)| {
            col.iter()
                .enumerate()
                .map(move |(y, &val)| (Coord::new(x as i32, y as i32), val))
        })
    }

    fn find_food(&self) -> Vec<Coord> {
        self.cells()
            .filter(|&(_, val)| val == FOOD)
            .map(|(coord, _)| coord)
            .collect()
    }

    fn find_heads(&self) -> Vec<(Coord, char)> {
        let mut heads: Vec<(Coord, char)> = Vec::new();
        for (coord, val) in self.cells() {
            let lower = val.to_ascii_lowercase();
            if !HEADS.contains(&lower) {
                continue;
            }
            assert!(
                !heads.iter().any(|&(_, seen)| seen.to_ascii_lowercase() == lower),
                "duplicate head '{}' in board",
                lower
            );
            heads.push((coord, val));
        }
        heads.sort_by_key(|&(_, val)| val.to_ascii_lowercase());
        heads
    }

    fn get(&self, x: i32, y: i32) -> Option<char> {
        if x < 0 || y < 0 {
            return None;
        }
        self.grid
            .get(x as usize)
            .and_then(|col| col.get(y as usize))
            .copied()
    }

    /// The segment one farther from the head: a neighbor whose arrow points
    /// at this cell.
    fn find_previous(&self, coord: Coord) -> Option<Coord> {
        let Coord { x, y } = coord;
        if self.get(x + 1, y) == Some(LEFT) {
            Some(Coord::new(x + 1, y))
        } else if self.get(x - 1, y) == Some(RIGHT) {
            Some(Coord::new(x - 1, y))
        } else if self.get(x, y + 1) == Some(DOWN) {
            Some(Coord::new(x, y + 1))
        } else if self.get(x, y - 1) == Some(UP) {
            Some(Coord::new(x, y - 1))
        } else {
            None
        }
    }

    fn find_snakes(&self) -> Vec<Battlesnake> {
        let mut snakes = Vec::new();
        for (head, head_val) in self.find_heads() {
            let mut body = vec![head];
            let mut segment = self.find_previous(head);
            while let Some(coord) = segment {
                body.push(coord);
                segment = self.find_previous(coord);
            }
            // An uppercase head means the tail is stacked
            if head_val.is_ascii_uppercase() {
                let tail = *body.last().expect("snake body cannot be empty");
                body.push(tail);
            }

            let name = head_val.to_ascii_lowercase().to_string();
            let health = *self
                .healths
                .get(&head_val.to_ascii_lowercase())
                .unwrap_or_else(|| panic!("missing health for snake '{}'", name));

            snakes.push(Battlesnake {
                id: format!("{}_id", name),
                name,
                health,
                head: body[0],
                length: body.len() as i32,
                body,
                latency: "0".to_string(),
                shout: None,
            });
        }
        snakes
    }
}
