// Per-tick systems that mutate the simulation state.

pub mod body;
pub mod obstacles;
