// Reversible full-turn simulation of the shared board.
//
// BoardState advances all living snakes one simultaneous turn at a time and
// can rewind any number of applied turns in exact reverse order. Volatile
// per-turn quantities (health, available food, growth bookkeeping) live in
// tables with one row per turn: applying a turn writes row turn+1, undoing a
// turn clears it, so rows above the current turn are scratch. Bodies carry
// their own history in TemporalBody.

use crate::temporal_body::TemporalBody;
use crate::types::{Board, Coord, Direction};

/// Health granted when a snake eats.
pub const MAX_HEALTH: i32 = 100;

/// The full board plus however many turns of history have been applied.
#[derive(Debug, Clone)]
pub struct BoardState {
    width: i32,
    height: i32,
    turn: usize,
    max_lookahead: usize,
    names: Vec<String>,
    bodies: Vec<TemporalBody>,
    // healths[t][id] is snake id's health at turn t
    healths: Vec<Vec<i32>>,
    // food[t] is the food still available at turn t
    food: Vec<Vec<Coord>>,
    // grown[t] lists snakes that grew while entering turn t
    grown: Vec<Vec<usize>>,
}

impl BoardState {
    /// Builds a simulation from a wire board. Snakes dead in the snapshot are
    /// excluded; snakes that die during simulation are retained for
    /// historical queries. `max_lookahead` bounds how many turns may be
    /// applied.
    pub fn from_board(board: &Board, max_lookahead: usize) -> Self {
        let live: Vec<_> = board.snakes.iter().filter(|s| s.health > 0).collect();

        let names = live.iter().map(|s| s.name.clone()).collect();
        let bodies = live
            .iter()
            .map(|s| TemporalBody::new(s.body.iter().copied()))
            .collect();

        let num = live.len();
        let mut healths = vec![vec![0; num]; max_lookahead + 1];
        healths[0] = live.iter().map(|s| s.health).collect();

        let mut food = vec![Vec::new(); max_lookahead + 1];
        food[0] = board.food.clone();

        BoardState {
            width: board.width,
            height: board.height,
            turn: 0,
            max_lookahead,
            names,
            bodies,
            healths,
            food,
            grown: vec![Vec::new(); max_lookahead + 1],
        }
    }

    /// Like `from_board`, but places the snake with `you_id` at index 0 so
    /// the search resolves the controlled snake's choice first.
    pub fn prioritized(board: &Board, you_id: &str, max_lookahead: usize) -> Self {
        let mut reordered = board.clone();
        let you_pos = reordered
            .snakes
            .iter()
            .position(|s| s.id == you_id && s.health > 0)
            .expect("controlled snake is not alive on the board");
        // Move the controlled snake to the front, keeping the others in order
        let you = reordered.snakes.remove(you_pos);
        reordered.snakes.insert(0, you);
        Self::from_board(&reordered, max_lookahead)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn max_lookahead(&self) -> usize {
        self.max_lookahead
    }

    pub fn num_snakes(&self) -> usize {
        self.bodies.len()
    }

    pub fn name(&self, id: usize) -> &str {
        &self.names[id]
    }

    pub fn health(&self, id: usize) -> i32 {
        self.healths[self.turn][id]
    }

    pub fn is_dead(&self, id: usize) -> bool {
        self.health(id) == 0
    }

    pub fn body(&self, id: usize) -> &TemporalBody {
        &self.bodies[id]
    }

    /// Food still available at the current turn.
    pub fn food(&self) -> &[Coord] {
        &self.food[self.turn]
    }

    /// Number of snakes currently dead.
    pub fn num_dead(&self) -> usize {
        (0..self.num_snakes()).filter(|&id| self.is_dead(id)).count()
    }

    /// The last turn at which the snake's health was above zero, or 0 if it
    /// was never alive. For a living snake this is the current turn.
    pub fn turns_alive(&self, id: usize) -> usize {
        (0..=self.turn)
            .rev()
            .find(|&t| self.healths[t][id] > 0)
            .unwrap_or(0)
    }

    /// Advances the whole board one simultaneous turn.
    ///
    /// `moves` must hold exactly one entry per snake: `Some` for every living
    /// snake, `None` for every dead one. Violating that, or applying a turn
    /// at the lookahead bound, is a caller bug and panics.
    pub fn apply_turn(&mut self, moves: &[Option<Direction>]) {
        assert!(
            self.turn < self.max_lookahead,
            "apply_turn called at the lookahead bound ({})",
            self.max_lookahead
        );
        assert_eq!(
            moves.len(),
            self.num_snakes(),
            "apply_turn requires one move entry per snake"
        );

        self.move_snakes(moves);
        self.reduce_health();
        self.feed_snakes();
        self.eliminate_snakes();
        self.turn += 1;
    }

    /// Exactly reverses the most recently applied turn.
    pub fn undo_turn(&mut self) {
        assert!(self.turn > 0, "undo_turn called at turn zero");
        self.turn -= 1;
        // Eliminations and decay only wrote the row above the restored turn,
        // which is scratch again; bodies and bookkeeping need explicit undo.
        self.undo_feed_snakes();
        self.undo_move_snakes();
    }

    fn move_snakes(&mut self, moves: &[Option<Direction>]) {
        for id in 0..self.num_snakes() {
            if self.is_dead(id) {
                assert!(
                    moves[id].is_none(),
                    "snake {} is dead and must not receive a move",
                    id
                );
                continue;
            }
            let d = match moves[id] {
                Some(d) => d,
                None => panic!("living snake {} did not submit a move", id),
            };
            let body = &mut self.bodies[id];
            let new_head = d.apply(&body.head());
            body.add_head(new_head);
            body.del_tail();
        }
    }

    fn undo_move_snakes(&mut self) {
        for id in 0..self.num_snakes() {
            if self.is_dead(id) {
                continue;
            }
            let body = &mut self.bodies[id];
            body.undo_add_head();
            body.undo_del_tail();
        }
    }

    fn reduce_health(&mut self) {
        for id in 0..self.num_snakes() {
            let old = self.healths[self.turn][id];
            self.healths[self.turn + 1][id] = if old == 0 { 0 } else { old - 1 };
        }
    }

    fn feed_snakes(&mut self) {
        let current_food = self.food[self.turn].clone();
        for food in current_food {
            let mut eaten = false;
            for id in 0..self.num_snakes() {
                // Liveness at the start of the turn: a snake that just
                // decayed to zero can still save itself by eating.
                if self.is_dead(id) {
                    continue;
                }
                let head = self.bodies[id].head();
                if head == food {
                    eaten = true;
                    self.healths[self.turn + 1][id] = MAX_HEALTH;
                    self.bodies[id].grow();
                    self.grown[self.turn + 1].push(id);
                }
            }
            if !eaten {
                self.food[self.turn + 1].push(food);
            }
        }
    }

    fn undo_feed_snakes(&mut self) {
        for i in 0..self.grown[self.turn + 1].len() {
            let id = self.grown[self.turn + 1][i];
            self.bodies[id].undo_grow();
        }
        self.grown[self.turn + 1].clear();
        self.food[self.turn + 1].clear();
    }

    fn eliminate_snakes(&mut self) {
        // Pass A: starvation and walls go first.
        for id in 0..self.num_snakes() {
            if self.healths[self.turn + 1][id] == 0 {
                continue;
            }
            if self.out_of_bounds(self.bodies[id].head()) {
                self.healths[self.turn + 1][id] = 0;
            }
        }

        // Pass B: collisions, judged against the post-pass-A board and
        // applied all at once so one elimination cannot cascade into another
        // within the same turn.
        let mut collided = Vec::new();
        for id in 0..self.num_snakes() {
            if self.healths[self.turn + 1][id] == 0 {
                continue;
            }
            if self.has_body_collided(id) || self.has_lost_head_to_head(id) {
                collided.push(id);
            }
        }
        for id in collided {
            self.healths[self.turn + 1][id] = 0;
        }
    }

    fn out_of_bounds(&self, coord: Coord) -> bool {
        coord.x < 0 || coord.x >= self.width || coord.y < 0 || coord.y >= self.height
    }

    /// Head on any non-head body segment, its own included. Corpses left on
    /// the board still count.
    fn has_body_collided(&self, id: usize) -> bool {
        let head = self.bodies[id].head();
        self.bodies
            .iter()
            .any(|body| body.segments().skip(1).any(|&seg| seg == head))
    }

    /// Head shared with a still-alive snake that is at least as long.
    fn has_lost_head_to_head(&self, id: usize) -> bool {
        let head = self.bodies[id].head();
        let len = self.bodies[id].len();
        (0..self.num_snakes()).any(|other| {
            other != id
                && self.healths[self.turn + 1][other] > 0
                && self.bodies[other].head() == head
                && self.bodies[other].len() >= len
        })
    }

    /// Renders the current turn as a text grid, one character per cell:
    /// `.` empty, `*` food, a lowercase letter for a head (uppercase when the
    /// tail is stacked from growth), and `<>^v` body arrows pointing toward
    /// the head. Dead snakes are not drawn. Rows are emitted top to bottom.
    pub fn render(&self) -> String {
        let mut grid =
            vec![vec!['.'; self.height as usize]; self.width as usize];

        for f in self.food() {
            grid[f.x as usize][f.y as usize] = '*';
        }

        for id in 0..self.num_snakes() {
            if self.is_dead(id) {
                continue;
            }
            let body = &self.bodies[id];
            let name = self.names[id].chars().next().unwrap_or('?');
            let segments: Vec<Coord> = body.segments().copied().collect();
            for (i, segment) in segments.iter().enumerate() {
                if i == 0 {
                    let stacked = segments.len() >= 2
                        && segments[segments.len() - 1] == segments[segments.len() - 2];
                    let glyph = if stacked {
                        name.to_ascii_uppercase()
                    } else {
                        name.to_ascii_lowercase()
                    };
                    grid[segment.x as usize][segment.y as usize] = glyph;
                    continue;
                }
                let newer = segments[i - 1];
                let to_head = (newer.x - segment.x, newer.y - segment.y);
                let glyph = match to_head {
                    (1, 0) => '>',
                    (-1, 0) => '<',
                    (0, 1) => '^',
                    (0, -1) => 'v',
                    (0, 0) => continue,
                    _ => panic!("body segments are not adjacent"),
                };
                grid[segment.x as usize][segment.y as usize] = glyph;
            }
        }

        let mut out = String::new();
        for y in (0..self.height as usize).rev() {
            for x in 0..self.width as usize {
                out.push(grid[x][y]);
            }
            out.push('\n');
        }
        out
    }
}
