// Errors returned by the matchmaking state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchmakingError {
    // The identity already holds a ticket in some region queue.
    AlreadyQueued { user_id: String },
    // Unknown, claimed, cancelled, expired or not-yet-matched ticket.
    NotFound,
}

// Reasons a signed request is rejected. Only ever logged; callers see a single 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingHeaders,
    InvalidTimestamp,
    StaleTimestamp,
    BadSignature,
}

impl AuthError {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthError::MissingHeaders => "missing_headers",
            AuthError::InvalidTimestamp => "invalid_timestamp",
            AuthError::StaleTimestamp => "stale_timestamp",
            AuthError::BadSignature => "bad_signature",
        }
    }
}
