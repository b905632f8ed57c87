//! The "my reservations" screen.

use padelbook_api::ApiClient;
use padelbook_common::models::{Reservation, ReservationId, User};
use padelbook_common::{ClientError, ConfirmPrompt, InteractionPort, Notice};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Result of a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The user declined the confirmation prompt. Nothing was sent to the backend.
    Kept,
}

/// Read-only copy of the reservation list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationListSnapshot {
    pub user: Option<User>,
    pub reservations: Vec<Reservation>,
    pub loaded: bool,
    /// Inline error from the last load.
    pub error: Option<String>,
}

/// Fetches the user's reservations and cancels them one at a time.
pub struct ReservationList {
    api: Arc<ApiClient>,
    port: Arc<dyn InteractionPort>,
    state: Mutex<ReservationListSnapshot>,
}

impl ReservationList {
    pub fn new(api: Arc<ApiClient>, port: Arc<dyn InteractionPort>) -> Self {
        Self {
            api,
            port,
            state: Mutex::new(ReservationListSnapshot::default()),
        }
    }

    /// Loads the profile and the reservation list together.
    ///
    /// A failure of either leaves the previous list in place and records an
    /// inline error.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), ClientError> {
        let result = tokio::try_join!(self.api.me(), self.api.my_reservations());
        let mut state = self.state.lock().await;
        state.loaded = true;
        match result {
            Ok((user, reservations)) => {
                info!(count = reservations.len(), "reservations loaded");
                state.user = Some(user);
                state.reservations = reservations;
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "reservations failed to load");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Cancels one reservation after the user confirms.
    #[instrument(skip(self))]
    pub async fn cancel(&self, reservation_id: ReservationId) -> Result<CancelOutcome, ClientError> {
        let prompt = {
            let state = self.state.lock().await;
            cancel_prompt(
                state
                    .reservations
                    .iter()
                    .find(|reservation| reservation.id == reservation_id),
            )
        };
        if !self.port.confirm(&prompt) {
            self.port.notify(Notice::info(
                "Kept",
                format!("Reservation #{reservation_id} was not cancelled."),
            ));
            return Ok(CancelOutcome::Kept);
        }

        match self.api.cancel_reservation(reservation_id).await {
            Ok(()) => {
                info!(reservation_id, "reservation cancelled");
                let mut state = self.state.lock().await;
                if let Some(index) = state
                    .reservations
                    .iter()
                    .position(|reservation| reservation.id == reservation_id)
                {
                    state.reservations.remove(index);
                }
                self.port.notify(Notice::success(
                    "Cancelled",
                    "Your reservation has been cancelled.",
                ));
                Ok(CancelOutcome::Cancelled)
            }
            Err(err) => {
                warn!(reservation_id, error = %err, "cancellation rejected");
                self.port.notify(Notice::error("Error", err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn snapshot(&self) -> ReservationListSnapshot {
        self.state.lock().await.clone()
    }
}

fn cancel_prompt(reservation: Option<&Reservation>) -> ConfirmPrompt {
    let text = match reservation {
        Some(reservation) => format!(
            "{} on {}. This cannot be undone.",
            reservation.court_name, reservation.date
        ),
        None => "This cannot be undone.".to_string(),
    };
    ConfirmPrompt {
        title: "Cancel this reservation?".to_string(),
        text,
        confirm_label: "Yes, cancel".to_string(),
        cancel_label: "Keep it".to_string(),
    }
}
