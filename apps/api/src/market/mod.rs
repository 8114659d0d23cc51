pub mod cache;
pub mod handlers;
pub mod simulator;
