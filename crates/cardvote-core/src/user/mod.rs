//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User identity, stored credentials and reaction records
//! - `backend`: The `AuthBackend` port and its `AuthOutcome`

mod backend;
mod model;

// Re-export public API
pub use backend::{AuthBackend, AuthOutcome};
pub use model::{ReactionRecord, StoredUser, User};
