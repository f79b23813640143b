pub mod errors;
pub mod ports;
pub mod queue;
pub mod region;

pub use errors::{AuthError, MatchmakingError};
pub use queue::{Match, Player};
pub use region::Region;
