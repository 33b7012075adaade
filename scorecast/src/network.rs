//! The networking thread: owns the backend client and the polling task,
//! forwards each snapshot to the render loop, and executes admin writes.

use crossbeam_channel::Sender;
use log::{error, info, warn};
use scorecast_common::{
    backend::{MatchClient, MatchClientError, MatchUpdate, NewPenalty},
    match_state::MatchState,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;

use crate::{config::AppConfig, poller::Poller};

/// A write requested from the admin input loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    Update(MatchUpdate),
    AddPenalty(NewPenalty),
    ClearPenalties,
    Shutdown,
}

#[tokio::main]
pub async fn networking_thread(
    snapshots: Sender<MatchState>,
    mut actions: mpsc::Receiver<AdminAction>,
    config: AppConfig,
) {
    let client = match MatchClient::new(
        &config.backend.url,
        Duration::from_secs(config.backend.request_timeout_secs),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Couldn't create the backend client: {e}");
            return;
        }
    };

    // A zero period would panic the interval timer.
    let period = Duration::from_millis(config.polling.period_ms.max(1));

    let poll_client = client.clone();
    let poll_snapshots = snapshots.clone();
    let poller = Poller::start(period, move || {
        let client = poll_client.clone();
        let snapshots = poll_snapshots.clone();
        async move {
            fetch_and_forward(&client, &snapshots).await;
        }
    });
    info!("Networking thread initialized!");

    loop {
        match actions.recv().await {
            Some(AdminAction::Shutdown) => {
                info!("Shutdown requested");
                break;
            }
            Some(action) => match apply_action(&client, &action).await {
                // Refetch right after a write so the display doesn't wait
                // out the rest of the poll period.
                Ok(()) => fetch_and_forward(&client, &snapshots).await,
                Err(e) => error!("Admin action {action:?} failed: {e}"),
            },
            // Read-only views never hold an action sender; keep polling
            // until the process ends.
            None => std::future::pending::<()>().await,
        }
    }

    poller.stop();
}

async fn apply_action(client: &MatchClient, action: &AdminAction) -> Result<(), MatchClientError> {
    match action {
        AdminAction::Update(update) => client.update(update).await,
        AdminAction::AddPenalty(penalty) => client.add_penalty(penalty).await,
        AdminAction::ClearPenalties => client.clear_penalties().await,
        AdminAction::Shutdown => Ok(()),
    }
}

async fn fetch_and_forward(client: &MatchClient, snapshots: &Sender<MatchState>) {
    match client.get_state().await {
        Ok(state) => {
            if let Err(e) = snapshots.try_send(state) {
                warn!("Display loop isn't keeping up, dropping a snapshot: {e}");
            }
        }
        Err(e) => warn!("State fetch failed, retrying on the next cycle: {e}"),
    }
}
