//! Review session controller.
//!
//! Drives the fetch, display, vote and advance loop for content items, keeps
//! the bounded action history and coordinates the three leaderboard panels.
//!
//! All UI-facing state lives behind one mutex that is never held across an
//! `.await`. Every item fetch and every panel fetch carries a request
//! generation so results can be matched against the request that currently
//! owns the field they would write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cardvote_core::config::{OverlappingVotePolicy, ReviewSettings, StaleResultPolicy};
use cardvote_core::content::{ContentGateway, ContentItem, VoteDirection};
use cardvote_core::error::Result;
use cardvote_core::history::{ActionHistory, HistoryEntry};
use cardvote_core::notification::{Notification, Notifier};
use cardvote_core::panel::{PanelKind, Panels};
use cardvote_core::route::{Navigator, Route};
use serde::Serialize;
use tokio_util::task::TaskTracker;

use crate::session_manager::SessionManager;

const LOAD_FAILED: &str = "Could not load the next item. Make sure the backend is reachable.";
const VOTE_FAILED: &str = "Could not send the vote";
const TIMEOUT_SUMMARY: &str = "Timeout";
const TIMEOUT_DETAIL: &str = "Taking too long to load the item";

/// What happened to a like/dislike request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDispatch {
    /// Accepted by the backend; the next item is scheduled.
    Submitted,
    /// No item is displayed, nothing was sent.
    NoItem,
    /// Another vote is in flight and overlapping votes are rejected.
    Busy,
    /// The backend answered with `success: false`.
    Rejected,
    /// The request failed in transport or with a non-2xx status.
    Failed,
}

/// Read-only view of the controller state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSnapshot {
    pub current_item: Option<ContentItem>,
    pub loading: bool,
    pub has_liked: bool,
    pub has_disliked: bool,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
    pub active_tab: PanelKind,
    pub panels: Panels,
    pub can_view_protected: bool,
}

struct ReviewState {
    current_item: Option<ContentItem>,
    loading: bool,
    has_liked: bool,
    has_disliked: bool,
    history: ActionHistory,
    active_tab: PanelKind,
    panels: Panels,
    item_generation: u64,
    panel_generations: HashMap<PanelKind, u64>,
    /// Bumped on logout so panel results from the old session are dropped.
    session_epoch: u64,
    votes_in_flight: usize,
}

impl ReviewState {
    fn new(history_capacity: usize) -> Self {
        Self {
            current_item: None,
            loading: false,
            has_liked: false,
            has_disliked: false,
            history: ActionHistory::with_capacity(history_capacity),
            active_tab: PanelKind::default(),
            panels: Panels::default(),
            item_generation: 0,
            panel_generations: HashMap::new(),
            session_epoch: 0,
            votes_in_flight: 0,
        }
    }

    fn shows(&self, reaction_key: &str) -> bool {
        self.current_item
            .as_ref()
            .is_some_and(|item| item.reaction_key() == reaction_key)
    }

    fn panel_generation(&self, kind: PanelKind) -> u64 {
        self.panel_generations.get(&kind).copied().unwrap_or(0)
    }
}

struct Inner {
    gateway: Arc<dyn ContentGateway>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: ReviewSettings,
    state: Mutex<ReviewState>,
    /// Scheduled post-vote advances
    tasks: TaskTracker,
    /// Item fetches still running after their watchdog fired
    late_fetches: TaskTracker,
}

/// Client-side orchestration of one review session.
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct ReviewSessionController {
    inner: Arc<Inner>,
}

impl ReviewSessionController {
    pub fn new(
        gateway: Arc<dyn ContentGateway>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        settings: ReviewSettings,
    ) -> Self {
        let state = ReviewState::new(settings.history_capacity);
        Self {
            inner: Arc::new(Inner {
                gateway,
                session,
                notifier,
                navigator,
                settings,
                state: Mutex::new(state),
                tasks: TaskTracker::new(),
                late_fetches: TaskTracker::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ReviewState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ReviewState) -> R) -> R {
        f(&mut self.state())
    }

    fn notify(&self, notification: Notification) {
        self.inner.notifier.notify(notification);
    }

    fn discards_stale(&self) -> bool {
        self.inner.settings.stale_results == StaleResultPolicy::Discard
    }

    pub fn snapshot(&self) -> ReviewSnapshot {
        let can_view_protected = self.inner.session.is_logged_in();
        let state = self.state();
        ReviewSnapshot {
            current_item: state.current_item.clone(),
            loading: state.loading,
            has_liked: state.has_liked,
            has_disliked: state.has_disliked,
            history: state.history.to_vec(),
            active_tab: state.active_tab,
            panels: state.panels.clone(),
            can_view_protected,
        }
    }

    /// Loads the first item and, when logged in, the active panel.
    ///
    /// Returns once the item settles or its watchdog fires, whichever comes
    /// first. Calling it again restarts the loop, e.g. after a failed first
    /// load.
    pub async fn activate(&self) {
        let tab = self.with_state(|state| state.active_tab);
        tokio::join!(self.load_item(), self.fetch_panel(tab));
    }

    /// Skips to a new item. No-op when nothing is displayed.
    pub async fn next_item(&self) {
        if self.with_state(|state| state.current_item.is_none()) {
            tracing::debug!("Ignoring advance without a current item");
            return;
        }
        self.load_item().await;
    }

    pub async fn like(&self) -> VoteDispatch {
        self.vote(VoteDirection::Like).await
    }

    pub async fn dislike(&self) -> VoteDispatch {
        self.vote(VoteDirection::Dislike).await
    }

    /// Submits a vote for the displayed item.
    ///
    /// On success the vote is prepended to the history and the next item is
    /// fetched after the configured advance delay. On failure loading is
    /// cleared, one error notification is raised and nothing else changes.
    pub async fn vote(&self, direction: VoteDirection) -> VoteDispatch {
        let reject_overlap = self.inner.settings.overlapping_votes == OverlappingVotePolicy::Reject;
        let claimed = self.with_state(|state| {
            let item = state.current_item.clone()?;
            if reject_overlap && state.votes_in_flight > 0 {
                return Some(Err(()));
            }
            state.votes_in_flight += 1;
            state.loading = true;
            Some(Ok(item))
        });
        let item = match claimed {
            None => return VoteDispatch::NoItem,
            Some(Err(())) => {
                tracing::debug!("Ignoring {} while another vote is in flight", direction);
                return VoteDispatch::Busy;
            }
            Some(Ok(item)) => item,
        };

        let result = self.inner.gateway.submit_vote(&item, direction).await;
        self.with_state(|state| state.votes_in_flight -= 1);

        match result {
            Ok(outcome) if outcome.success => {
                self.with_state(|state| {
                    state
                        .history
                        .record(item.source_id.clone(), item.name.clone(), direction)
                });
                tracing::info!("{} sent for {} {}", direction, item.source, item.source_id);
                self.notify(Notification::success(match direction {
                    VoteDirection::Like => "Like sent",
                    VoteDirection::Dislike => "Dislike sent",
                }));
                if let Some(user) = self.inner.session.current_user() {
                    self.inner
                        .gateway
                        .record_reaction(user.id(), &item, direction)
                        .await;
                }
                self.schedule_advance();
                VoteDispatch::Submitted
            }
            Ok(outcome) => {
                self.with_state(|state| state.loading = false);
                tracing::warn!("Vote rejected: {}", outcome.message);
                let detail = if outcome.message.is_empty() {
                    VOTE_FAILED.to_string()
                } else {
                    outcome.message
                };
                self.notify(Notification::error(detail));
                VoteDispatch::Rejected
            }
            Err(e) => {
                self.with_state(|state| state.loading = false);
                tracing::error!("Vote error: {}", e);
                self.notify(Notification::error(e.user_message()));
                VoteDispatch::Failed
            }
        }
    }

    fn schedule_advance(&self) {
        let controller = self.clone();
        let delay = self.inner.settings.advance_delay();
        self.inner.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            controller.load_item().await;
        });
    }

    /// Waits until every scheduled advance has run to completion.
    ///
    /// Fetches that outlived their watchdog are not waited for.
    pub async fn wait_idle(&self) {
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        self.inner.tasks.reopen();
    }

    async fn load_item(&self) {
        let generation = self.with_state(|state| {
            state.loading = true;
            state.has_liked = false;
            state.has_disliked = false;
            state.item_generation += 1;
            state.item_generation
        });

        let gateway = Arc::clone(&self.inner.gateway);
        let mut fetch = Box::pin(async move { gateway.fetch_random_item().await });

        match tokio::time::timeout(self.inner.settings.item_timeout(), &mut fetch).await {
            Ok(result) => self.settle_item(generation, result, false).await,
            Err(_) => {
                // The watchdog only clears the loading flag. The fetch keeps
                // running in the background and its result is still applied.
                let timed_out = self.on_timeout(generation);
                let controller = self.clone();
                self.inner.late_fetches.spawn(async move {
                    let result = fetch.await;
                    controller.settle_item(generation, result, timed_out).await;
                });
            }
        }
    }

    async fn settle_item(&self, generation: u64, result: Result<ContentItem>, timed_out: bool) {
        match result {
            Ok(item) => {
                let applied = self.with_state(|state| {
                    let current = state.item_generation == generation;
                    if !current && self.discards_stale() {
                        return false;
                    }
                    state.current_item = Some(item.clone());
                    if current {
                        state.loading = false;
                    }
                    true
                });
                if !applied {
                    tracing::debug!("Discarding superseded item {} {}", item.source, item.source_id);
                    return;
                }
                self.check_reactions(&item).await;
            }
            Err(e) => {
                let current = self.with_state(|state| {
                    let current = state.item_generation == generation;
                    if current {
                        state.loading = false;
                    }
                    current
                });
                if timed_out {
                    tracing::warn!("Item fetch failed after timeout: {}", e);
                } else if !current && self.discards_stale() {
                    tracing::debug!("Ignoring failure of superseded item fetch: {}", e);
                } else {
                    tracing::error!("Error loading item: {}", e);
                    self.notify(Notification::error(LOAD_FAILED));
                }
            }
        }
    }

    /// Returns whether the watchdog acted, i.e. the fetch was still current.
    fn on_timeout(&self, generation: u64) -> bool {
        let current = self.with_state(|state| {
            let current = state.item_generation == generation;
            if current {
                state.loading = false;
            }
            current
        });
        if current {
            tracing::warn!("Item loading timeout");
            self.notify(Notification::warn(TIMEOUT_SUMMARY, TIMEOUT_DETAIL));
        }
        current
    }

    /// Recomputes `has_liked`/`has_disliked` for `item`.
    ///
    /// The two lookups settle independently; each writes its flag only while
    /// `item` is still the displayed one.
    async fn check_reactions(&self, item: &ContentItem) {
        let Some(user) = self.inner.session.current_user() else {
            return;
        };
        let key = item.reaction_key();

        let liked = async {
            let likes = self.inner.gateway.get_user_likes(user.id()).await;
            self.with_state(|state| {
                if state.shows(&key) {
                    state.has_liked = likes.contains(&key);
                }
            });
        };
        let disliked = async {
            let dislikes = self.inner.gateway.get_user_dislikes(user.id()).await;
            self.with_state(|state| {
                if state.shows(&key) {
                    state.has_disliked = dislikes.contains(&key);
                }
            });
        };
        tokio::join!(liked, disliked);
    }

    /// Switches the active leaderboard tab.
    ///
    /// Unknown values select [`PanelKind::TopLike`]. The panel is only fetched
    /// when logged in; otherwise no panel state is touched.
    pub async fn tab_change(&self, value: &str) {
        let tab = PanelKind::resolve(value);
        self.with_state(|state| state.active_tab = tab);
        self.fetch_panel(tab).await;
    }

    async fn fetch_panel(&self, kind: PanelKind) {
        let Some(token) = self.inner.session.token() else {
            return;
        };

        let (generation, epoch) = self.with_state(|state| {
            state.panels.get_mut(kind).begin();
            let generation = state.panel_generations.entry(kind).or_insert(0);
            *generation += 1;
            (*generation, state.session_epoch)
        });

        let result = self.inner.gateway.fetch_panel(kind, &token).await;

        self.with_state(|state| {
            if state.session_epoch != epoch {
                tracing::debug!("Dropping {} result from a closed session", kind);
                return;
            }
            if state.panel_generation(kind) != generation && self.discards_stale() {
                tracing::debug!("Dropping superseded {} result", kind);
                return;
            }
            state.panels.get_mut(kind).settle(result.map_err(|e| {
                tracing::warn!("{} query failed: {}", kind, e);
                kind.failure_message().to_string()
            }));
        });
    }

    /// Logs out, clears every panel and navigates to the login view.
    pub fn logout(&self) {
        self.inner.session.logout();
        self.with_state(|state| {
            state.panels.reset();
            state.session_epoch += 1;
        });
        self.inner.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
#[path = "review_controller_test.rs"]
mod tests;
