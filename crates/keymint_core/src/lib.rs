pub mod chain;
pub mod config;
pub mod logging;

pub use chain::Chain;
pub use config::{KeymintConfig, validate_url};
