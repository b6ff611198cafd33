// Endpoint-facing bot logic.
//
// The Bot owns the static configuration, the per-game session registry, and
// the optional decision log. Each /move request computes a deadline from the
// configured budget, hands the CPU-bound planning to a blocking task, and
// answers with whatever direction comes back, falling back to a statically
// safe move if the search attempt aborted.

use log::{error, info};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::planner::{self, PlanReport, StrategyKind};
use crate::session::SessionStore;
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake bot: static configuration plus per-game session state.
pub struct Bot {
    config: Config,
    sessions: SessionStore,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config) -> Self {
        let debug_logger = if config.debug.enabled {
            DebugLogger::new(&config.debug.log_file_path)
        } else {
            DebugLogger::disabled()
        };
        Bot {
            config,
            sessions: SessionStore::new(),
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "temporal-snake",
            "color": "#10b07c",
            "head": "smart-caterpillar",
            "tail": "round-bum",
        })
    }

    /// Called when a game starts: opens the planner session for this
    /// game/snake pair.
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        self.sessions
            .create(&game.id, &you.id, self.config.search.initial_depth);
        info!(
            "GAME START {} ({} sessions live)",
            game.id,
            self.sessions.len()
        );
    }

    /// Called when a game ends: tears the session down again.
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        let existed = self.sessions.destroy(&game.id, &you.id);
        info!(
            "GAME OVER {} (session {}, {} still live)",
            game.id,
            if existed { "closed" } else { "was missing" },
            self.sessions.len()
        );
    }

    /// Computes and returns the next move.
    /// Corresponds to POST /move endpoint
    ///
    /// Planning is CPU-bound and synchronous, so it runs on the blocking
    /// thread pool with an explicit deadline; this handler just awaits the
    /// result. If the search attempt panics (a search bookkeeping bug), the
    /// attempt is abandoned and a statically safe direction is returned so
    /// the game server always gets an answer.
    pub async fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();
        let deadline =
            start_time + Duration::from_millis(self.config.timing.effective_budget_ms());

        let start_depth =
            self.sessions
                .starting_depth(&game.id, &you.id, self.config.search.initial_depth);

        let board_for_search = board.clone();
        let you_for_search = you.clone();
        let config = self.config.clone();
        let search = tokio::task::spawn_blocking(move || {
            planner::decide(
                &board_for_search,
                &you_for_search,
                deadline,
                start_depth,
                &config,
            )
        });

        let report = match search.await {
            Ok(report) => report,
            Err(e) => {
                error!("Turn {}: search attempt aborted: {}", turn, e);
                PlanReport {
                    direction: planner::fallback_direction(board, you),
                    strategy: StrategyKind::Fallback,
                    depth_completed: 0,
                    nodes_expanded: 0,
                    residual: 0,
                }
            }
        };

        self.sessions.record_depth(
            &game.id,
            &you.id,
            report.depth_completed,
            self.config.search.max_depth,
        );

        let shout = match report.strategy {
            StrategyKind::MultiMax => {
                format!("multi-max depth {}", report.depth_completed)
            }
            StrategyKind::Fringe => format!(
                "fringe {} expanded, {} pending",
                report.nodes_expanded, report.residual
            ),
            StrategyKind::Fallback => "winging it".to_string(),
        };

        info!(
            "Turn {}: Chose {} ({:?}, depth: {}, nodes: {}, time: {}ms)",
            turn,
            report.direction.as_str(),
            report.strategy,
            report.depth_completed,
            report.nodes_expanded,
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_decision(*turn, board.clone(), report.direction, &shout);

        json!({ "move": report.direction.as_str(), "shout": shout })
    }
}
