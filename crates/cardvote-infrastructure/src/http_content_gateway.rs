//! HTTP implementation of the content gateway.
//!
//! Remote calls go to `/api/v1/characters/*`. Reaction lookups are answered
//! from the local session store.

use std::collections::HashSet;

use async_trait::async_trait;
use cardvote_core::content::{
    ContentGateway, ContentItem, EvaluatedItem, LeaderboardResponse, VoteDirection, VoteOutcome,
    VoteRequest,
};
use cardvote_core::error::Result;
use cardvote_core::user::ReactionRecord;

use crate::http_client::ApiClient;
use crate::mock_session_store::MockSessionStore;

const RANDOM_PATH: &str = "/api/v1/characters/random";
const VOTE_PATH: &str = "/api/v1/characters/vote";
const TOP_LIKE_PATH: &str = "/api/v1/characters/top-like";
const TOP_DISLIKE_PATH: &str = "/api/v1/characters/top-dislike";
const LAST_EVALUATED_PATH: &str = "/api/v1/characters/last-evaluated";

pub struct HttpContentGateway {
    api: ApiClient,
    reactions: MockSessionStore,
}

impl HttpContentGateway {
    pub fn new(api: ApiClient, reactions: MockSessionStore) -> Self {
        Self { api, reactions }
    }

    async fn leaderboard(&self, path: &str, token: &str) -> Result<Option<EvaluatedItem>> {
        let response: LeaderboardResponse = self.api.get_json(path, Some(token)).await?;
        Ok(response.item)
    }
}

#[async_trait]
impl ContentGateway for HttpContentGateway {
    async fn fetch_random_item(&self) -> Result<ContentItem> {
        self.api.get_json(RANDOM_PATH, None).await
    }

    async fn submit_vote(&self, item: &ContentItem, direction: VoteDirection) -> Result<VoteOutcome> {
        self.api
            .post_json(VOTE_PATH, &VoteRequest::new(item, direction))
            .await
    }

    async fn fetch_top_liked(&self, token: &str) -> Result<Option<EvaluatedItem>> {
        self.leaderboard(TOP_LIKE_PATH, token).await
    }

    async fn fetch_top_disliked(&self, token: &str) -> Result<Option<EvaluatedItem>> {
        self.leaderboard(TOP_DISLIKE_PATH, token).await
    }

    async fn fetch_last_evaluated(&self, token: &str) -> Result<Option<EvaluatedItem>> {
        self.leaderboard(LAST_EVALUATED_PATH, token).await
    }

    async fn get_user_likes(&self, user_id: &str) -> HashSet<String> {
        self.reactions.user_reactions(VoteDirection::Like, user_id)
    }

    async fn get_user_dislikes(&self, user_id: &str) -> HashSet<String> {
        self.reactions.user_reactions(VoteDirection::Dislike, user_id)
    }

    async fn record_reaction(&self, user_id: &str, item: &ContentItem, direction: VoteDirection) {
        let record = ReactionRecord {
            user_id: user_id.to_string(),
            image_id: item.reaction_key(),
        };
        if let Err(e) = self.reactions.append_reaction(direction, record) {
            tracing::warn!("Failed to record {} for {}: {}", direction, user_id, e);
        }
    }
}
