use crate::domain::ports::IdGenerator;
use crate::domain::{Match, MatchmakingError, Player, Region};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

const TICKET_PREFIX: &str = "ticket_";
const MATCH_PREFIX: &str = "match_";

/// Tunables for match formation and ticket expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchmakerSettings {
    /// Players per match. Always positive.
    pub match_size: usize,
    /// Seconds a ticket may wait (queued, or matched but unclaimed) before it is dropped.
    pub ticket_ttl_seconds: u64,
}

impl Default for MatchmakerSettings {
    fn default() -> Self {
        Self {
            match_size: 1,
            ticket_ttl_seconds: 1800,
        }
    }
}

// Outcome of a single sweep over every region.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub matches_formed: usize,
    pub tickets_expired: usize,
    pub matches_expired: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.matches_formed == 0 && self.tickets_expired == 0 && self.matches_expired == 0
    }
}

/// In-memory authority over every queue, ticket and pending match.
///
/// All methods take `&mut self`; callers share one instance behind a single
/// mutex so every operation observes and leaves the indexes consistent:
/// a ticket lives in `ticket_owner`/`ticket_region` exactly while its player
/// is either waiting in `queues` or sitting in one unclaimed entry of `matches`
/// (in which case `ticket_match` points at that entry).
pub struct Matchmaker {
    settings: MatchmakerSettings,
    ids: Arc<dyn IdGenerator>,
    queues: HashMap<Region, VecDeque<Player>>,
    matches: HashMap<String, Match>,
    ticket_owner: HashMap<String, String>,
    ticket_region: HashMap<String, Region>,
    ticket_match: HashMap<String, String>,
    queued_users: HashSet<String>,
}

impl Matchmaker {
    // Create a matchmaker with empty queues for every region.
    pub fn new(settings: MatchmakerSettings, ids: Arc<dyn IdGenerator>) -> Self {
        let settings = MatchmakerSettings {
            match_size: settings.match_size.max(1),
            ..settings
        };

        Self {
            settings,
            ids,
            queues: Region::ALL
                .into_iter()
                .map(|region| (region, VecDeque::new()))
                .collect(),
            matches: HashMap::new(),
            ticket_owner: HashMap::new(),
            ticket_region: HashMap::new(),
            ticket_match: HashMap::new(),
            queued_users: HashSet::new(),
        }
    }

    pub fn settings(&self) -> MatchmakerSettings {
        self.settings
    }

    // Append a player to the tail of its region queue and hand back a fresh ticket.
    pub fn enqueue(
        &mut self,
        user_id: String,
        elo: i64,
        region: Region,
        now: u64,
    ) -> Result<String, MatchmakingError> {
        if self.queued_users.contains(&user_id) {
            return Err(MatchmakingError::AlreadyQueued { user_id });
        }

        let ticket = self.ids.next_id(TICKET_PREFIX);

        self.queued_users.insert(user_id.clone());
        self.ticket_owner.insert(ticket.clone(), user_id.clone());
        self.ticket_region.insert(ticket.clone(), region);
        self.queue_mut(region).push_back(Player {
            user_id,
            ticket: ticket.clone(),
            elo,
            region,
            queued_at: now,
        });

        Ok(ticket)
    }

    // Take the formed match this ticket belongs to. Single use: every teammate's
    // ticket is invalidated along with it.
    pub fn claim(&mut self, ticket: &str) -> Result<Match, MatchmakingError> {
        if !self.ticket_owner.contains_key(ticket) {
            return Err(MatchmakingError::NotFound);
        }

        // Owned ticket that is still waiting in a queue: no match yet.
        let match_id = self
            .ticket_match
            .get(ticket)
            .cloned()
            .ok_or(MatchmakingError::NotFound)?;

        let formed = self
            .matches
            .remove(&match_id)
            .ok_or(MatchmakingError::NotFound)?;
        self.forget_match_tickets(&formed);

        Ok(formed)
    }

    // Withdraw a ticket that is still waiting in its queue. Tickets already
    // placed in a formed match are reported as not found and stay claimable.
    pub fn cancel(&mut self, ticket: &str) -> Result<Player, MatchmakingError> {
        if !self.ticket_owner.contains_key(ticket) || self.ticket_match.contains_key(ticket) {
            return Err(MatchmakingError::NotFound);
        }

        let region = *self
            .ticket_region
            .get(ticket)
            .ok_or(MatchmakingError::NotFound)?;
        let queue = self.queue_mut(region);
        let index = queue
            .iter()
            .position(|player| player.ticket == ticket)
            .ok_or(MatchmakingError::NotFound)?;
        let player = queue.remove(index).ok_or(MatchmakingError::NotFound)?;

        self.queued_users.remove(&player.user_id);
        self.ticket_owner.remove(ticket);
        self.ticket_region.remove(ticket);

        Ok(player)
    }

    // One matchmaking pass over every region: form matches first, then expire
    // what is left, so an exactly-matchable player is never expired instead.
    pub fn sweep(&mut self, now: u64) -> SweepReport {
        let mut report = SweepReport::default();

        for region in Region::ALL {
            report.matches_formed += self.form_matches(region, now);
            report.tickets_expired += self.expire_queued(region, now);
        }
        report.matches_expired = self.expire_matches(now);

        report
    }

    pub fn queue_len(&self, region: Region) -> usize {
        self.queues.get(&region).map_or(0, VecDeque::len)
    }

    pub fn is_queued(&self, user_id: &str) -> bool {
        self.queued_users.contains(user_id)
    }

    pub fn pending_matches(&self) -> usize {
        self.matches.len()
    }

    // True while the ticket can still be cancelled or claimed.
    pub fn is_ticket_live(&self, ticket: &str) -> bool {
        self.ticket_owner.contains_key(ticket)
    }

    // Drain the front of the queue in whole matches, oldest players first.
    fn form_matches(&mut self, region: Region, now: u64) -> usize {
        let match_size = self.settings.match_size;
        let mut formed = 0;

        while self.queue_len(region) >= match_size {
            let players: Vec<Player> = self.queue_mut(region).drain(..match_size).collect();
            let match_id = self.ids.next_id(MATCH_PREFIX);

            for player in &players {
                self.queued_users.remove(&player.user_id);
                self.ticket_match
                    .insert(player.ticket.clone(), match_id.clone());
            }

            self.matches.insert(
                match_id.clone(),
                Match {
                    match_id,
                    region,
                    players,
                    formed_at: now,
                },
            );
            formed += 1;
        }

        formed
    }

    fn expire_queued(&mut self, region: Region, now: u64) -> usize {
        let ttl = self.settings.ticket_ttl_seconds;
        let queue = self.queues.entry(region).or_default();

        let mut expired = Vec::new();
        queue.retain(|player| {
            let stale = now.saturating_sub(player.queued_at) > ttl;
            if stale {
                expired.push((player.user_id.clone(), player.ticket.clone()));
            }
            !stale
        });

        for (user_id, ticket) in &expired {
            self.queued_users.remove(user_id);
            self.ticket_owner.remove(ticket);
            self.ticket_region.remove(ticket);
        }

        expired.len()
    }

    fn expire_matches(&mut self, now: u64) -> usize {
        let ttl = self.settings.ticket_ttl_seconds;
        let stale: Vec<String> = self
            .matches
            .values()
            .filter(|formed| now.saturating_sub(formed.formed_at) > ttl)
            .map(|formed| formed.match_id.clone())
            .collect();

        for match_id in &stale {
            if let Some(formed) = self.matches.remove(match_id) {
                self.forget_match_tickets(&formed);
            }
        }

        stale.len()
    }

    fn forget_match_tickets(&mut self, formed: &Match) {
        for ticket in formed.tickets() {
            self.ticket_owner.remove(ticket);
            self.ticket_region.remove(ticket);
            self.ticket_match.remove(ticket);
        }
    }

    fn queue_mut(&mut self, region: Region) -> &mut VecDeque<Player> {
        self.queues.entry(region).or_default()
    }
}
