use crate::domain::region::Region;

// A player waiting in a region queue, or sitting in a formed match until claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub user_id: String,
    pub ticket: String,
    // Skill rating; carried along but not used for formation yet.
    pub elo: i64,
    pub region: Region,
    pub queued_at: u64,
}

// A group of players formed from one region queue. Immutable until claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub match_id: String,
    pub region: Region,
    pub players: Vec<Player>,
    pub formed_at: u64,
}

impl Match {
    // Player ids in queue order.
    pub fn user_ids(&self) -> Vec<String> {
        self.players
            .iter()
            .map(|player| player.user_id.clone())
            .collect()
    }

    pub fn tickets(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|player| player.ticket.as_str())
    }
}
