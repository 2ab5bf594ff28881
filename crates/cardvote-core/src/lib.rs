//! Domain layer for CardVote.
//!
//! Holds the models shared by every other crate (content items, votes,
//! leaderboard entries, users, session state) together with the port traits
//! that the infrastructure layer implements and the application layer drives.

pub mod config;
pub mod content;
pub mod error;
pub mod history;
pub mod notification;
pub mod panel;
pub mod route;
pub mod session;
pub mod store;
pub mod user;

// Re-export common error type
pub use error::{CardVoteError, Result};
