//! Content gateway port.

use std::collections::HashSet;

use async_trait::async_trait;

use super::model::{ContentItem, EvaluatedItem, VoteDirection, VoteOutcome};
use crate::error::Result;
use crate::panel::PanelKind;

/// Access to the content backend and the local reaction records.
///
/// Remote operations propagate transport and status failures to the caller;
/// the reaction lookups read local state and never fail.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Fetches one random content item.
    async fn fetch_random_item(&self) -> Result<ContentItem>;

    /// Submits a vote for `item`.
    async fn submit_vote(&self, item: &ContentItem, direction: VoteDirection) -> Result<VoteOutcome>;

    /// Most liked item so far, `None` when nothing has been evaluated yet.
    async fn fetch_top_liked(&self, token: &str) -> Result<Option<EvaluatedItem>>;

    /// Most disliked item so far.
    async fn fetch_top_disliked(&self, token: &str) -> Result<Option<EvaluatedItem>>;

    /// Item that received the most recent vote.
    async fn fetch_last_evaluated(&self, token: &str) -> Result<Option<EvaluatedItem>>;

    /// Reaction keys the user has liked.
    async fn get_user_likes(&self, user_id: &str) -> HashSet<String>;

    /// Reaction keys the user has disliked.
    async fn get_user_dislikes(&self, user_id: &str) -> HashSet<String>;

    /// Appends a reaction record for `user_id`.
    async fn record_reaction(&self, user_id: &str, item: &ContentItem, direction: VoteDirection);

    /// Dispatches to the leaderboard query backing `panel`.
    async fn fetch_panel(&self, panel: PanelKind, token: &str) -> Result<Option<EvaluatedItem>> {
        match panel {
            PanelKind::TopLike => self.fetch_top_liked(token).await,
            PanelKind::TopDislike => self.fetch_top_disliked(token).await,
            PanelKind::LastEvaluated => self.fetch_last_evaluated(token).await,
        }
    }
}
