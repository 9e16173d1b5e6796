pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::{ConfigError, RuntimeSettings};
pub use frameworks::runner::{RunSummary, run, run_session, run_with_config};
