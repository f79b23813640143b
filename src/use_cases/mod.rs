pub mod matchmaker;
pub mod signature;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod test_support;

pub use matchmaker::{Matchmaker, MatchmakerSettings, SweepReport};
pub use signature::RequestVerifier;
pub use sweeper::sweep_task;
