//! Content domain models.
//!
//! Field names on the wire follow the backend's camelCase JSON, with the
//! image URL carried as `image`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// External catalog a content item was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentSource {
    Pokemon,
    RickAndMorty,
    Superhero,
    DragonBall,
}

/// A single card shown to the user.
///
/// Identity is `(source, source_id)`. Items are immutable once fetched; a new
/// item replaces the current one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub source: ContentSource,
    pub source_id: String,
    pub name: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl ContentItem {
    /// Key under which reactions to this item are recorded.
    ///
    /// The source is part of the key because source ids are only unique
    /// within one catalog.
    pub fn reaction_key(&self) -> String {
        format!("{}:{}", self.source, self.source_id)
    }
}

/// Like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoteDirection {
    Like,
    Dislike,
}

/// Body of `POST /api/v1/characters/vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub source: ContentSource,
    pub source_id: String,
    pub name: String,
    pub image: String,
    pub vote: VoteDirection,
}

impl VoteRequest {
    pub fn new(item: &ContentItem, direction: VoteDirection) -> Self {
        Self {
            source: item.source,
            source_id: item.source_id.clone(),
            name: item.name.clone(),
            image: item.image_url.clone(),
            vote: direction,
        }
    }
}

fn accepted() -> bool {
    true
}

/// Answer of the vote endpoint.
///
/// A body without `success` counts as accepted; the 2xx status already says so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    #[serde(default = "accepted")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl VoteOutcome {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Content item enriched with aggregate vote counters.
///
/// Only ever returned by leaderboard queries and never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub likes: u64,
    pub dislikes: u64,
    #[serde(default)]
    pub last_evaluated_at: Option<DateTime<Utc>>,
}

/// Envelope of every leaderboard endpoint. A `null` item means "no data yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub item: Option<EvaluatedItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pikachu() -> ContentItem {
        ContentItem {
            source: ContentSource::Pokemon,
            source_id: "25".to_string(),
            name: "Pikachu".to_string(),
            image_url: "https://img.example/25.png".to_string(),
        }
    }

    #[test]
    fn test_content_item_wire_format() {
        let item: ContentItem = serde_json::from_value(json!({
            "source": "rickandmorty",
            "sourceId": "1",
            "name": "Rick Sanchez",
            "image": "https://img.example/rick.png"
        }))
        .unwrap();

        assert_eq!(item.source, ContentSource::RickAndMorty);
        assert_eq!(item.source_id, "1");
        assert_eq!(item.image_url, "https://img.example/rick.png");
        assert_eq!(item.reaction_key(), "rickandmorty:1");
    }

    #[test]
    fn test_vote_request_body() {
        let body = serde_json::to_value(VoteRequest::new(&pikachu(), VoteDirection::Like)).unwrap();
        assert_eq!(
            body,
            json!({
                "source": "pokemon",
                "sourceId": "25",
                "name": "Pikachu",
                "image": "https://img.example/25.png",
                "vote": "like"
            })
        );
    }

    #[test]
    fn test_vote_outcome_defaults_to_accepted() {
        let outcome: VoteOutcome = serde_json::from_value(json!({})).unwrap();
        assert!(outcome.success);

        let outcome: VoteOutcome =
            serde_json::from_value(json!({"success": false, "message": "Invalid vote"})).unwrap();
        assert_eq!(outcome, VoteOutcome::rejected("Invalid vote"));
    }

    #[test]
    fn test_leaderboard_null_item_is_empty() {
        let response: LeaderboardResponse = serde_json::from_value(json!({"item": null})).unwrap();
        assert!(response.item.is_none());

        let response: LeaderboardResponse = serde_json::from_value(json!({
            "item": {
                "source": "dragonball",
                "sourceId": "7",
                "name": "Goku",
                "image": "https://img.example/goku.png",
                "likes": 12,
                "dislikes": 3,
                "lastEvaluatedAt": "2025-01-05T10:00:00Z"
            }
        }))
        .unwrap();
        let item = response.item.unwrap();
        assert_eq!(item.item.source, ContentSource::DragonBall);
        assert_eq!(item.likes, 12);
        assert!(item.last_evaluated_at.is_some());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(VoteDirection::Dislike.to_string(), "dislike");
        assert_eq!("like".parse::<VoteDirection>().unwrap(), VoteDirection::Like);
    }
}
