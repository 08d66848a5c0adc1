pub mod actions;
pub mod config;
pub mod error;
pub mod persistence;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use actions::*;
pub use error::ConsoleError;
pub use reducer::*;
pub use state::*;
