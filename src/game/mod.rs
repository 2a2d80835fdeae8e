pub mod constants;
pub mod state;
pub mod types;
pub mod world;
