// Domain layer - Data model and pure view state machines
pub mod asset;
pub mod carousel;
pub mod drill_down;
pub mod filter;
pub mod maintenance;
