//! HTTP client for the match backend.
//!
//! Four operations, mirroring the REST surface exactly: read the state
//! snapshot, post a partial update, post one penalty, delete all penalties.
//! There are no retries here; the polling layer's next cycle is the retry.

use crate::match_state::{MatchState, ShotResult, TeamSide};
use log::{debug, warn};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchClientError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Backend returned {status}: {body}")]
    BadStatus { status: StatusCode, body: String },
}

/// Timer verbs accepted by `POST /api/update`. The clock arithmetic lives
/// entirely on the server; the client only names the transition.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    Start,
    Pause,
    ResetTimer,
}

/// Partial update body for `POST /api/update`.
///
/// Only set fields are serialized; the backend merges field by field. The
/// client never relies on any other merge semantics, so staging a subset of
/// fields and posting them in one request is always safe.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct MatchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_a_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_b_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_a: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_b: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoppage_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_b: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TimerAction>,
}

impl MatchUpdate {
    pub fn timer(action: TimerAction) -> Self {
        Self {
            action: Some(action),
            ..Default::default()
        }
    }

    pub fn scores(score_a: u32, score_b: u32) -> Self {
        Self {
            score_a: Some(score_a),
            score_b: Some(score_b),
            ..Default::default()
        }
    }

    /// True when no field is set; posting this would be a no-op request.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body for `POST /api/penalties`. The write side names the player field
/// `player`, unlike the snapshot's `player_name`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct NewPenalty {
    pub team: TeamSide,
    pub player: String,
    pub result: ShotResult,
}

pub struct MatchClient {
    base_url: String,
    client: Client,
}

impl MatchClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MatchClientError> {
        let client = ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetches the full state snapshot.
    pub async fn get_state(&self) -> Result<MatchState, MatchClientError> {
        let url = format!("{}/api/match", self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::OK {
            Ok(response.json::<MatchState>().await?)
        } else {
            Err(bad_status(response).await)
        }
    }

    /// Posts a partial field update (or a timer verb) to the backend.
    pub async fn update(&self, update: &MatchUpdate) -> Result<(), MatchClientError> {
        debug!("Posting match update: {update:?}");
        let url = format!("{}/api/update", self.base_url);
        let response = self.client.post(&url).json(update).send().await?;
        expect_ok(response).await
    }

    /// Appends one penalty to the backend's ordered sequence.
    pub async fn add_penalty(&self, penalty: &NewPenalty) -> Result<(), MatchClientError> {
        debug!("Posting penalty: {penalty:?}");
        let url = format!("{}/api/penalties", self.base_url);
        let response = self.client.post(&url).json(penalty).send().await?;
        expect_ok(response).await
    }

    /// Empties the backend's penalty sequence.
    pub async fn clear_penalties(&self) -> Result<(), MatchClientError> {
        debug!("Clearing penalties");
        let url = format!("{}/api/penalties", self.base_url);
        let response = self.client.delete(&url).send().await?;
        expect_ok(response).await
    }
}

async fn expect_ok(response: Response) -> Result<(), MatchClientError> {
    if response.status() == StatusCode::OK {
        Ok(())
    } else {
        Err(bad_status(response).await)
    }
}

async fn bad_status(response: Response) -> MatchClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!("Backend request failed with {status}: {body}");
    MatchClientError::BadStatus { status, body }
}
