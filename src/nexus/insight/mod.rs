//! # Insight
//!
//! A short generated description of the item open in the detail view, requested
//! from an external text-generation service.
//!
//! The fetch is decoupled from the selection that triggers it:
//!
//! 1. Selecting an item records the view synchronously and yields an
//!    [`InsightRequest`] stamped with a fresh ticket ([`InsightTracker::begin`]).
//! 2. The caller runs [`fetch`] wherever it likes (a task, a `block_on`, a test).
//!    Failures never escape it: they become [`FALLBACK_INSIGHT`].
//! 3. The caller hands the [`InsightResponse`] back. [`InsightTracker::resolve`]
//!    applies it only when its ticket is the latest one and its item is still the
//!    selection, so a slow answer for a previous item is dropped instead of being
//!    shown against the wrong one.
//!
//! The service itself sits behind [`InsightFetcher`]; [`gemini::GeminiFetcher`] is
//! the HTTP implementation.

use crate::model::MediaItem;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

pub mod gemini;

/// Shown whenever the service fails, whatever the reason.
pub const FALLBACK_INSIGHT: &str = "Neural link failed. Unable to generate insight.";

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("No API key found in ${0}")]
    MissingCredentials(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// An asynchronous text-generation capability.
#[async_trait]
pub trait InsightFetcher: Send + Sync {
    async fn request_insight(&self, title: &str, description: &str)
        -> Result<String, InsightError>;
}

pub fn build_prompt(title: &str, description: &str) -> String {
    format!(
        "Provide a short, 2-sentence \"Nexus Insight\" for this file: Title: {}, Description: {}. \
         Make it sound like a high-tech analysis from a digital hub.",
        title, description
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InsightState {
    #[default]
    Idle,
    Loading,
    Ready(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRequest {
    pub ticket: InsightTicket,
    pub item_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightResponse {
    pub ticket: InsightTicket,
    pub item_id: String,
    pub text: String,
    /// True when `text` is the fallback
    pub failed: bool,
}

/// Runs one request. Never fails: errors resolve to the fallback text.
pub async fn fetch<F: InsightFetcher + ?Sized>(
    fetcher: &F,
    request: InsightRequest,
) -> InsightResponse {
    let InsightRequest {
        ticket,
        item_id,
        title,
        description,
    } = request;

    match fetcher.request_insight(&title, &description).await {
        Ok(text) => InsightResponse {
            ticket,
            item_id,
            text,
            failed: false,
        },
        Err(e) => {
            warn!(item = %item_id, error = %e, "insight request failed");
            InsightResponse {
                ticket,
                item_id,
                text: FALLBACK_INSIGHT.to_string(),
                failed: true,
            }
        }
    }
}

/// Resolves `request` to the fallback without contacting the service, for callers
/// that could not set up a fetcher at all.
pub fn fallback(request: InsightRequest) -> InsightResponse {
    InsightResponse {
        ticket: request.ticket,
        item_id: request.item_id,
        text: FALLBACK_INSIGHT.to_string(),
        failed: true,
    }
}

/// Which insight request, if any, is authoritative for the current detail view.
#[derive(Debug, Default)]
pub struct InsightTracker {
    issued: u64,
    pending: Option<(InsightTicket, String)>,
    state: InsightState,
}

impl InsightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InsightState {
        &self.state
    }

    /// Starts a request for `item`, superseding any request still in flight.
    pub fn begin(&mut self, item: &MediaItem) -> InsightRequest {
        self.issued += 1;
        let ticket = InsightTicket(self.issued);
        self.pending = Some((ticket, item.id.clone()));
        self.state = InsightState::Loading;

        InsightRequest {
            ticket,
            item_id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
        }
    }

    /// Applies `response` if it is still current. Returns whether it was applied.
    pub fn resolve(&mut self, response: InsightResponse, selected: Option<&str>) -> bool {
        let current = match &self.pending {
            Some((ticket, item_id)) => {
                *ticket == response.ticket
                    && *item_id == response.item_id
                    && selected == Some(item_id.as_str())
            }
            None => false,
        };
        if !current {
            debug!(item = %response.item_id, "discarding stale insight");
            return false;
        }

        self.pending = None;
        self.state = InsightState::Ready(response.text);
        true
    }

    /// Leaves the detail view: any request in flight becomes stale.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = InsightState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::item;

    struct Echo;

    #[async_trait]
    impl InsightFetcher for Echo {
        async fn request_insight(
            &self,
            title: &str,
            _description: &str,
        ) -> Result<String, InsightError> {
            Ok(format!("insight for {}", title))
        }
    }

    struct Down;

    #[async_trait]
    impl InsightFetcher for Down {
        async fn request_insight(
            &self,
            _title: &str,
            _description: &str,
        ) -> Result<String, InsightError> {
            Err(InsightError::Status {
                status: 429,
                message: "quota".to_string(),
            })
        }
    }

    #[test]
    fn prompt_mentions_title_and_description() {
        let prompt = build_prompt("Quantum", "packets");
        assert!(prompt.contains("Title: Quantum"));
        assert!(prompt.contains("Description: packets"));
        assert_eq!(prompt, build_prompt("Quantum", "packets"));
    }

    #[tokio::test]
    async fn successful_fetch_is_applied() {
        let mut tracker = InsightTracker::new();
        let request = tracker.begin(&item("a", "Quantum", "X"));
        assert_eq!(tracker.state(), &InsightState::Loading);

        let response = fetch(&Echo, request).await;
        assert!(!response.failed);
        assert!(tracker.resolve(response, Some("a")));
        assert_eq!(
            tracker.state(),
            &InsightState::Ready("insight for Quantum".to_string())
        );
    }

    #[tokio::test]
    async fn failure_becomes_fallback() {
        let mut tracker = InsightTracker::new();
        let request = tracker.begin(&item("a", "Quantum", "X"));

        let response = fetch(&Down, request).await;
        assert!(response.failed);
        assert!(tracker.resolve(response, Some("a")));
        assert_eq!(
            tracker.state(),
            &InsightState::Ready(FALLBACK_INSIGHT.to_string())
        );
    }

    #[test]
    fn fallback_answers_the_pending_request() {
        let mut tracker = InsightTracker::new();
        let request = tracker.begin(&item("a", "Quantum", "X"));

        let response = fallback(request);
        assert!(response.failed);
        assert!(tracker.resolve(response, Some("a")));
        assert_eq!(
            tracker.state(),
            &InsightState::Ready(FALLBACK_INSIGHT.to_string())
        );
    }

    #[tokio::test]
    async fn superseded_request_is_discarded() {
        let mut tracker = InsightTracker::new();
        let first = tracker.begin(&item("a", "Quantum", "X"));
        let second = tracker.begin(&item("b", "Binary", "Y"));

        let (late, fresh) = tokio::join!(fetch(&Echo, first), fetch(&Echo, second));

        assert!(tracker.resolve(fresh, Some("b")));
        assert!(!tracker.resolve(late, Some("b")));
        assert_eq!(
            tracker.state(),
            &InsightState::Ready("insight for Binary".to_string())
        );
    }

    #[tokio::test]
    async fn reselecting_the_same_item_supersedes_too() {
        let mut tracker = InsightTracker::new();
        let first = tracker.begin(&item("a", "Quantum", "X"));
        let second = tracker.begin(&item("a", "Quantum", "X"));

        assert!(!tracker.resolve(fetch(&Echo, first).await, Some("a")));
        assert_eq!(tracker.state(), &InsightState::Loading);
        assert!(tracker.resolve(fetch(&Echo, second).await, Some("a")));
    }

    #[tokio::test]
    async fn result_after_leaving_is_discarded() {
        let mut tracker = InsightTracker::new();
        let request = tracker.begin(&item("a", "Quantum", "X"));
        tracker.reset();

        assert!(!tracker.resolve(fetch(&Echo, request).await, None));
        assert_eq!(tracker.state(), &InsightState::Idle);
    }
}
