// Debug logging module for asynchronous decision logging
//
// Fire-and-forget JSONL writes so logging never blocks the request cycle.
// The file is opened lazily on the first write (truncating any previous
// run's log) and each decision becomes one line.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Board, Direction};

/// One logged decision
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    chosen_move: String,
    shout: String,
    board: Board,
    timestamp: String,
}

/// Shared debug logger state.
/// Uses Arc<Mutex<...>> so concurrent async writes stay ordered.
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    path: Arc<str>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates an enabled logger writing to `path`
    pub fn new(path: &str) -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            path: Arc::from(path),
            enabled: true,
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            path: Arc::from(""),
            enabled: false,
        }
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    pub fn log_decision(&self, turn: i32, board: Board, chosen_move: Direction, shout: &str) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let path = self.path.clone();
        let entry = DebugLogEntry {
            turn,
            chosen_move: chosen_move.as_str().to_string(),
            shout: shout.to_string(),
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        tokio::spawn(async move {
            Self::write_entry(file_handle, path, entry).await;
        });
    }

    async fn write_entry(
        file_handle: Arc<Mutex<Option<File>>>,
        path: Arc<str>,
        entry: DebugLogEntry,
    ) {
        let mut file_guard = file_handle.lock().await;

        if file_guard.is_none() {
            match OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path.as_ref())
                .await
            {
                Ok(file) => *file_guard = Some(file),
                Err(e) => {
                    error!("Failed to create debug log file '{}': {}", path, e);
                    return;
                }
            }
        }

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
