// Multi-max decision tree search.
//
// Within one turn, each living snake in index order branches over the four
// directions and keeps the branch that scores best for itself. Once every
// snake has chosen, the turn is applied, the next turn recurses one level
// shallower, and the turn is undone on the way back up. The board is mutated
// in place throughout; apply and undo are strictly paired.
//
// This is a heuristic approximation of simultaneous play: each snake
// maximizes its own packed score given the moves staged by snakes earlier in
// the order, not a worst-case (minimax) response. That asymmetry is a known
// tradeoff of the algorithm, kept as such.

use crate::score::Outcome;
use crate::simulation::BoardState;
use crate::types::{Board, Direction};

/// A node in the decision tree: either a terminal evaluation or one snake's
/// resolved move choice at one turn.
#[derive(Debug, Clone)]
pub enum DecisionNode {
    Leaf(Outcome),
    Choice {
        snake: usize,
        turn: usize,
        best: Direction,
        outcome: Outcome,
    },
}

impl DecisionNode {
    pub fn outcome(&self) -> &Outcome {
        match self {
            DecisionNode::Leaf(outcome) => outcome,
            DecisionNode::Choice { outcome, .. } => outcome,
        }
    }

    pub fn into_outcome(self) -> Outcome {
        match self {
            DecisionNode::Leaf(outcome) => outcome,
            DecisionNode::Choice { outcome, .. } => outcome,
        }
    }

    pub fn best(&self) -> Option<Direction> {
        match self {
            DecisionNode::Leaf(_) => None,
            DecisionNode::Choice { best, .. } => Some(*best),
        }
    }
}

/// Searches `depth` turns ahead and returns the best direction for the
/// controlled snake, which must be alive on the board.
pub fn best_direction(board: &Board, you_id: &str, depth: usize) -> Option<Direction> {
    assert!(depth >= 1, "lookahead depth must be at least 1");
    let mut state = BoardState::prioritized(board, you_id, depth);
    let root = search(&mut state, depth);
    root.best()
}

/// Runs the search on an already-built state. The controlled snake is
/// whichever sits at index 0. The state is returned to its starting turn.
pub fn search(state: &mut BoardState, depth: usize) -> DecisionNode {
    assert!(depth >= 1, "lookahead depth must be at least 1");
    let mut moves = Vec::with_capacity(state.num_snakes());
    choose(state, &mut moves, 0, depth)
}

/// Resolves snake `idx`'s choice for the current turn, with the moves of
/// snakes before it already staged in `moves`.
fn choose(
    state: &mut BoardState,
    moves: &mut Vec<Option<Direction>>,
    idx: usize,
    depth: usize,
) -> DecisionNode {
    if idx == state.num_snakes() {
        return advance(state, moves.as_slice(), depth);
    }

    // Dead snakes stage no move and add no branching.
    if state.is_dead(idx) {
        moves.push(None);
        let node = choose(state, moves, idx + 1, depth);
        moves.pop();
        return node;
    }

    let turn = state.turn();
    let mut best: Option<(Direction, u32, Outcome)> = None;
    for dir in Direction::all() {
        moves.push(Some(dir));
        let node = choose(state, moves, idx + 1, depth);
        moves.pop();

        let outcome = node.into_outcome();
        let score = outcome.evaluate(idx);
        // Strictly greater, so ties keep the earliest direction
        let replace = match &best {
            Some((_, best_score, _)) => score > *best_score,
            None => true,
        };
        if replace {
            best = Some((dir, score, outcome));
        }
    }

    let (dir, _, outcome) = best.expect("four directions always yield a candidate");
    DecisionNode::Choice {
        snake: idx,
        turn,
        best: dir,
        outcome,
    }
}

/// Every snake has chosen: apply the turn, descend or bottom out, undo.
fn advance(
    state: &mut BoardState,
    moves: &[Option<Direction>],
    depth: usize,
) -> DecisionNode {
    state.apply_turn(moves);
    let node = if depth <= 1 {
        DecisionNode::Leaf(Outcome::of(state))
    } else {
        let mut next_moves = Vec::with_capacity(state.num_snakes());
        choose(state, &mut next_moves, 0, depth - 1)
    };
    state.undo_turn();
    node
}
