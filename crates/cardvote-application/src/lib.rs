//! Application layer for CardVote.
//!
//! Coordinates the domain ports from `cardvote-core` with the adapters from
//! `cardvote-infrastructure`: the authentication session and the review loop.

pub mod notifier;
pub mod review_controller;
pub mod session_manager;

pub use notifier::ChannelNotifier;
pub use review_controller::{ReviewSessionController, ReviewSnapshot, VoteDispatch};
pub use session_manager::SessionManager;
