// Turn planning: strategy selection, time budgeting, and fallbacks.
//
// The decision core itself never watches a clock. Time-bounding lives here:
// multi-max runs under iterative deepening with a cost estimate checked
// between depth increments, and the fringe explorer is handed whatever
// budget remains. Both treat an elapsed deadline as a normal outcome; the
// caller always gets some direction back.

use std::time::Instant;

use log::info;
use rand::seq::IndexedRandom;

use crate::config::Config;
use crate::fringe::FringeNode;
use crate::multi_max;
use crate::simulation::BoardState;
use crate::timed_bfs::{TimedBfs, CLEANUP_MARGIN};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Which engine produced the final direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    MultiMax,
    Fringe,
    Fallback,
}

/// What the planner decided and how hard it had to work for it.
#[derive(Debug, Clone)]
pub struct PlanReport {
    pub direction: Direction,
    pub strategy: StrategyKind,
    /// Deepest fully completed multi-max iteration, 0 if none ran.
    pub depth_completed: usize,
    /// Fringe nodes fully expanded, 0 for multi-max.
    pub nodes_expanded: usize,
    /// Fringe queue left unexplored at the deadline.
    pub residual: usize,
}

/// Picks a direction for `you` before `deadline`.
///
/// `start_depth` is the first iterative-deepening depth to try, carried
/// between turns by the caller's session.
pub fn decide(
    board: &Board,
    you: &Battlesnake,
    deadline: Instant,
    start_depth: usize,
    config: &Config,
) -> PlanReport {
    let alive = board.snakes.iter().filter(|s| s.health > 0).count();
    if you.health <= 0 || alive == 0 {
        return fallback_report(board, you);
    }

    if alive > config.search.max_snakes_for_multi_max {
        return fringe_plan(board, you, deadline, config)
            .unwrap_or_else(|| fallback_report(board, you));
    }

    if let Some(report) = multi_max_plan(board, you, deadline, start_depth, alive, config) {
        return report;
    }
    // Not enough budget for even one full-depth iteration; take whatever
    // breadth the clock still allows.
    fringe_plan(board, you, deadline, config).unwrap_or_else(|| fallback_report(board, you))
}

/// Iterative deepening over the multi-max tree. Returns None if no
/// iteration fit in the budget.
fn multi_max_plan(
    board: &Board,
    you: &Battlesnake,
    deadline: Instant,
    start_depth: usize,
    alive: usize,
    config: &Config,
) -> Option<PlanReport> {
    let mut depth = start_depth.max(1);
    let mut best: Option<Direction> = None;
    let mut completed = 0;

    loop {
        if depth > config.search.max_depth {
            info!("Stopping search: reached max depth ({})", depth - 1);
            break;
        }

        let remaining = remaining_ms(deadline);
        if remaining < config.search.min_time_remaining_ms {
            info!(
                "Stopping search: insufficient time remaining ({}ms)",
                remaining
            );
            break;
        }

        let estimate = config.search.estimate_iteration_ms(depth, alive);
        if estimate > remaining {
            info!(
                "Stopping search: depth {} would exceed budget (estimated {}ms, remaining {}ms)",
                depth, estimate, remaining
            );
            break;
        }

        if let Some(dir) = multi_max::best_direction(board, &you.id, depth) {
            best = Some(dir);
            completed = depth;
        }
        depth += 1;
    }

    best.map(|direction| PlanReport {
        direction,
        strategy: StrategyKind::MultiMax,
        depth_completed: completed,
        nodes_expanded: 0,
        residual: 0,
    })
}

/// Breadth-first exploration of whole-turn futures until the deadline.
/// Returns None when nothing beyond the root could be expanded.
fn fringe_plan(
    board: &Board,
    you: &Battlesnake,
    deadline: Instant,
    config: &Config,
) -> Option<PlanReport> {
    let now = Instant::now();
    let budget = deadline.checked_duration_since(now)?;
    if budget <= CLEANUP_MARGIN {
        return None;
    }

    let state = BoardState::prioritized(board, &you.id, config.search.fringe_lookahead);
    let mut bfs = TimedBfs::new(FringeNode::root(state));
    bfs.run(budget);

    // Best score for the controlled snake (index 0) over everything the run
    // generated, visited and frontier alike. Expansion order is
    // deterministic, so ties keep the earliest, shallowest candidate.
    let mut best: Option<(u32, Direction)> = None;
    for node in bfs.visited().iter().chain(bfs.frontier()) {
        let Some(direction) = node.initial_move() else {
            continue;
        };
        let score = node.outcome().evaluate(0);
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, direction));
        }
    }

    best.map(|(_, direction)| PlanReport {
        direction,
        strategy: StrategyKind::Fringe,
        depth_completed: 0,
        nodes_expanded: bfs.num_expanded(),
        residual: bfs.residual_len(),
    })
}

fn fallback_report(board: &Board, you: &Battlesnake) -> PlanReport {
    PlanReport {
        direction: fallback_direction(board, you),
        strategy: StrategyKind::Fallback,
        depth_completed: 0,
        nodes_expanded: 0,
        residual: 0,
    }
}

/// A currently-safe direction chosen without search: in bounds and not on a
/// living snake's body (tails excluded, they move away). Prefers safe cells,
/// then merely in-bounds ones, then gives up and goes up.
pub fn fallback_direction(board: &Board, you: &Battlesnake) -> Direction {
    let head = you.head;
    let mut rng = rand::rng();

    let safe: Vec<Direction> = Direction::all()
        .iter()
        .filter(|d| {
            let next = d.apply(&head);
            in_bounds(board, next) && !is_occupied(board, next)
        })
        .copied()
        .collect();
    if let Some(&dir) = safe.choose(&mut rng) {
        return dir;
    }

    let in_board: Vec<Direction> = Direction::all()
        .iter()
        .filter(|d| in_bounds(board, d.apply(&head)))
        .copied()
        .collect();
    if let Some(&dir) = in_board.choose(&mut rng) {
        return dir;
    }

    Direction::Up
}

fn in_bounds(board: &Board, coord: Coord) -> bool {
    coord.x >= 0 && coord.x < board.width && coord.y >= 0 && coord.y < board.height
}

fn is_occupied(board: &Board, coord: Coord) -> bool {
    board.snakes.iter().filter(|s| s.health > 0).any(|snake| {
        let tailless = snake.body.len().saturating_sub(1);
        snake.body[..tailless].contains(&coord)
    })
}

fn remaining_ms(deadline: Instant) -> u64 {
    deadline
        .checked_duration_since(Instant::now())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
