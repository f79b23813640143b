// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}

// Port for minting opaque, unguessable identifiers for tickets and matches.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}
