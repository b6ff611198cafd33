// Fringe nodes: board states as breadth-first search nodes.
//
// Each node owns a board that is already advanced to its turn. Expanding a
// node lazily enumerates every combination of the living snakes' four
// directions (a dead snake contributes exactly one branch, with no move),
// cloning the board and applying the turn per combination. Nodes at the
// lookahead bound yield no children, so a full run terminates on its own.
//
// Combinations are generated in canonical direction order with snake 0
// varying slowest, which makes the expansion order deterministic: a
// short-budget run visits a prefix of what a long-budget run would.

use crate::score::Outcome;
use crate::simulation::BoardState;
use crate::timed_bfs::ChildGenerator;
use crate::types::Direction;

/// One candidate future of the board, tagged with the controlled snake's
/// first-turn direction on the path that produced it.
#[derive(Debug, Clone)]
pub struct FringeNode {
    board: BoardState,
    initial_move: Option<Direction>,
    outcome: Outcome,
}

impl FringeNode {
    /// Wraps the present board as the search root. The controlled snake is
    /// whichever sits at index 0.
    pub fn root(board: BoardState) -> Self {
        let outcome = Outcome::of(&board);
        FringeNode {
            board,
            initial_move: None,
            outcome,
        }
    }

    /// The controlled snake's move in the first expanded turn, `None` on the
    /// root itself.
    pub fn initial_move(&self) -> Option<Direction> {
        self.initial_move
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn turn(&self) -> usize {
        self.board.turn()
    }
}

impl ChildGenerator for FringeNode {
    fn children(&mut self) -> Box<dyn Iterator<Item = Self> + '_> {
        if self.board.turn() >= self.board.max_lookahead() {
            return Box::new(std::iter::empty());
        }
        Box::new(TurnExpansion::new(&self.board, self.initial_move))
    }
}

/// Lazy odometer over the cartesian product of per-snake move options.
struct TurnExpansion<'a> {
    base: &'a BoardState,
    initial_move: Option<Direction>,
    options: Vec<Vec<Option<Direction>>>,
    counters: Vec<usize>,
    exhausted: bool,
}

impl<'a> TurnExpansion<'a> {
    fn new(base: &'a BoardState, initial_move: Option<Direction>) -> Self {
        let options: Vec<Vec<Option<Direction>>> = (0..base.num_snakes())
            .map(|id| {
                if base.is_dead(id) {
                    vec![None]
                } else {
                    Direction::all().iter().map(|&d| Some(d)).collect()
                }
            })
            .collect();
        let counters = vec![0; options.len()];
        TurnExpansion {
            base,
            initial_move,
            exhausted: options.is_empty(),
            options,
            counters,
        }
    }

    /// Advances to the next combination; snake 0 is the most significant
    /// digit so its candidate moves stay contiguous in expansion order.
    fn step(&mut self) {
        let mut pos = self.counters.len();
        loop {
            if pos == 0 {
                self.exhausted = true;
                return;
            }
            pos -= 1;
            self.counters[pos] += 1;
            if self.counters[pos] < self.options[pos].len() {
                return;
            }
            self.counters[pos] = 0;
        }
    }
}

impl Iterator for TurnExpansion<'_> {
    type Item = FringeNode;

    fn next(&mut self) -> Option<FringeNode> {
        if self.exhausted {
            return None;
        }

        let moves: Vec<Option<Direction>> = self
            .counters
            .iter()
            .zip(&self.options)
            .map(|(&c, opts)| opts[c])
            .collect();

        let mut board = self.base.clone();
        board.apply_turn(&moves);
        let outcome = Outcome::of(&board);
        let initial_move = self.initial_move.or(moves[0]);

        self.step();

        Some(FringeNode {
            board,
            initial_move,
            outcome,
        })
    }
}
