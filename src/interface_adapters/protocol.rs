use serde::{Deserialize, Serialize};
use serde_json::Number;

// Skill rating assumed when a client does not send one.
pub const DEFAULT_ELO: i64 = 1000;

fn default_elo() -> i64 {
    DEFAULT_ELO
}

// Request payload for enqueueing a player into matchmaking.
#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    // Numeric player id; kept as a raw number so the full i64/u64 range is accepted.
    pub pid: Number,
    #[serde(default = "default_elo")]
    pub elo: i64,
    #[serde(default)]
    pub region: Option<String>,
}

impl QueueRequest {
    // Canonical string identity, or None when `pid` is not an integer.
    pub fn user_id(&self) -> Option<String> {
        if self.pid.is_i64() || self.pid.is_u64() {
            Some(self.pid.to_string())
        } else {
            None
        }
    }
}

// Response payload returned after enqueueing a player.
#[derive(Debug, Serialize)]
pub struct QueueResponse {
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
}

// Response payload for a claimed match.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub players: Vec<String>,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
