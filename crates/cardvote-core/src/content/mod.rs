//! Content domain module.
//!
//! # Module Structure
//!
//! - `model`: Content items, votes and leaderboard entries
//! - `gateway`: The `ContentGateway` port used by the review controller
//!
//! # Usage
//!
//! ```ignore
//! use cardvote_core::content::{ContentGateway, ContentItem, VoteDirection};
//! ```

mod gateway;
mod model;

// Re-export public API
pub use gateway::ContentGateway;
pub use model::{
    ContentItem, ContentSource, EvaluatedItem, LeaderboardResponse, VoteDirection, VoteOutcome,
    VoteRequest,
};
