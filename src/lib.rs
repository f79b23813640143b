pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::{ServerConfig, load as load_config};
pub use frameworks::server::{run, run_with_config};
pub use use_cases::RequestVerifier;
