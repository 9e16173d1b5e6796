// Frameworks layer: runtime bootstrap, configuration and the headless runner.

pub mod config;
pub mod runner;
