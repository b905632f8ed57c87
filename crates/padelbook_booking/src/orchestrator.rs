//! The booking screen: pick a court and a date, toggle slots, get a price,
//! confirm.
//!
//! Availability depends on (court, date) and the quote depends on
//! (court, date, selection). Each fetch carries a ticket taken when it was
//! dispatched; a response whose ticket is no longer current is dropped, so the
//! latest trigger always wins regardless of response order.

use crate::selection::Selection;
use chrono::{Local, NaiveDate};
use padelbook_api::endpoints;
use padelbook_api::ApiClient;
use padelbook_common::models::{
    Court, CourtId, PriceQuote, ReservationReceipt, SlotId, TimeSlot, User,
};
use padelbook_common::{validation_error, ClientError, ConfirmPrompt, InteractionPort, Notice};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Where the booking screen currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPhase {
    Idle,
    CourtsLoaded,
    CourtSelected,
    AvailabilityLoaded,
    SlotsSelected,
    PriceQuoted,
    Reserving,
    ReservationConfirmed,
    ReservationFailed,
}

/// State of the last booking submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    InFlight,
    Confirmed(ReservationReceipt),
    Failed(String),
}

/// What happened when the user confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Nothing to book; no request was sent.
    NothingSelected,
    /// Booked; the user asked to see their reservations.
    ViewReservations(ReservationReceipt),
    /// Booked; the user stayed, the selection was reset and availability re-fetched.
    Stayed(ReservationReceipt),
}

/// Read-only copy of the booking screen.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSnapshot {
    pub phase: BookingPhase,
    pub user: Option<User>,
    pub courts: Vec<Court>,
    pub court: Option<Court>,
    pub date: NaiveDate,
    /// `None` while availability is loading or no court is selected.
    pub availability: Option<Vec<TimeSlot>>,
    pub selection: Vec<SlotId>,
    pub quote: Option<PriceQuote>,
    pub submission: Option<Submission>,
    pub last_error: Option<String>,
}

#[derive(Debug)]
struct BookingState {
    user: Option<User>,
    courts: Option<Vec<Court>>,
    court_id: Option<CourtId>,
    date: NaiveDate,
    availability: Option<Vec<TimeSlot>>,
    availability_ticket: u64,
    selection: Selection,
    quote: Option<PriceQuote>,
    quote_ticket: u64,
    submission: Option<Submission>,
    last_error: Option<String>,
}

impl BookingState {
    fn new(date: NaiveDate) -> Self {
        Self {
            user: None,
            courts: None,
            court_id: None,
            date,
            availability: None,
            availability_ticket: 0,
            selection: Selection::new(),
            quote: None,
            quote_ticket: 0,
            submission: None,
            last_error: None,
        }
    }

    fn phase(&self) -> BookingPhase {
        match &self.submission {
            Some(Submission::InFlight) => return BookingPhase::Reserving,
            Some(Submission::Confirmed(_)) => return BookingPhase::ReservationConfirmed,
            Some(Submission::Failed(_)) => return BookingPhase::ReservationFailed,
            None => {}
        }
        if self.quote.is_some() {
            BookingPhase::PriceQuoted
        } else if !self.selection.is_empty() {
            BookingPhase::SlotsSelected
        } else if self.availability.is_some() {
            BookingPhase::AvailabilityLoaded
        } else if self.court_id.is_some() {
            BookingPhase::CourtSelected
        } else if self.courts.is_some() {
            BookingPhase::CourtsLoaded
        } else {
            BookingPhase::Idle
        }
    }

    fn court(&self) -> Option<&Court> {
        let court_id = self.court_id?;
        self.courts.as_ref()?.iter().find(|court| court.id == court_id)
    }

    /// Drops everything derived from (court, date) and returns a fresh ticket.
    fn invalidate_availability(&mut self) -> u64 {
        self.selection.clear();
        self.availability = None;
        self.submission = None;
        self.invalidate_quote();
        self.availability_ticket += 1;
        self.availability_ticket
    }

    /// Court, date and selection are frozen while a booking is in flight, so
    /// a submission always resolves against the inputs it was sent with.
    fn ensure_not_submitting(&self) -> Result<(), ClientError> {
        if self.submission == Some(Submission::InFlight) {
            return Err(validation_error("A reservation is already being submitted"));
        }
        Ok(())
    }

    fn invalidate_quote(&mut self) -> u64 {
        self.quote = None;
        self.quote_ticket += 1;
        self.quote_ticket
    }
}

/// Drives the booking screen against the backend.
pub struct BookingOrchestrator {
    api: Arc<ApiClient>,
    port: Arc<dyn InteractionPort>,
    state: Mutex<BookingState>,
}

impl BookingOrchestrator {
    /// A booking screen starting on today's date.
    pub fn new(api: Arc<ApiClient>, port: Arc<dyn InteractionPort>) -> Self {
        Self::with_date(api, port, Local::now().date_naive())
    }

    pub fn with_date(api: Arc<ApiClient>, port: Arc<dyn InteractionPort>, date: NaiveDate) -> Self {
        Self {
            api,
            port,
            state: Mutex::new(BookingState::new(date)),
        }
    }

    /// Loads the profile and the court list together.
    ///
    /// Both must succeed. On any failure the session is dropped and the caller
    /// should send the user back to the entry screen.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), ClientError> {
        if !self.api.session().has_token() {
            return Err(ClientError::Unauthenticated {
                endpoint: endpoints::ME.to_string(),
            });
        }
        match tokio::try_join!(self.api.me(), self.api.courts()) {
            Ok((user, courts)) => {
                info!(courts = courts.len(), "booking screen loaded");
                let mut state = self.state.lock().await;
                state.user = Some(user);
                state.courts = Some(courts);
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "booking screen failed to load, dropping session");
                self.api.logout();
                self.state.lock().await.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Picks a court and fetches its availability for the current date.
    #[instrument(skip(self))]
    pub async fn select_court(&self, court_id: CourtId) -> Result<(), ClientError> {
        {
            let mut state = self.state.lock().await;
            state.ensure_not_submitting()?;
            let courts = state
                .courts
                .as_ref()
                .ok_or_else(|| validation_error("Courts have not been loaded"))?;
            if !courts.iter().any(|court| court.id == court_id) {
                return Err(validation_error(format!("Unknown court {court_id}")));
            }
            state.court_id = Some(court_id);
        }
        self.refresh_availability().await
    }

    /// Changes the date. Availability is re-fetched when a court is selected.
    #[instrument(skip(self))]
    pub async fn set_date(&self, date: NaiveDate) -> Result<(), ClientError> {
        let court_selected = {
            let mut state = self.state.lock().await;
            state.ensure_not_submitting()?;
            state.date = date;
            if state.court_id.is_none() {
                state.invalidate_availability();
            }
            state.court_id.is_some()
        };
        if court_selected {
            self.refresh_availability().await
        } else {
            Ok(())
        }
    }

    /// Flips one slot in or out of the selection and re-prices it.
    ///
    /// Only slots currently offered may be added; a selected slot can always
    /// be removed. Refused while a booking is being submitted.
    #[instrument(skip(self))]
    pub async fn toggle_slot(&self, slot_id: SlotId) -> Result<bool, ClientError> {
        let selected = {
            let mut state = self.state.lock().await;
            state.ensure_not_submitting()?;
            if state.court_id.is_none() {
                return Err(validation_error("Select a court first"));
            }
            let offered = state
                .availability
                .as_ref()
                .is_some_and(|slots| slots.iter().any(|slot| slot.id == slot_id));
            if !offered && !state.selection.contains(slot_id) {
                return Err(validation_error(format!("Slot {slot_id} is not available")));
            }
            state.submission = None;
            state.selection.toggle(slot_id)
        };
        self.refresh_quote().await?;
        Ok(selected)
    }

    /// Books the current selection.
    ///
    /// On success the user is asked whether to view their reservations or
    /// stay; staying resets the selection and re-fetches availability. On
    /// failure the backend's message is shown as is and the selection is
    /// kept for another attempt.
    #[instrument(skip(self))]
    pub async fn confirm(&self) -> Result<ConfirmOutcome, ClientError> {
        let (court_id, date, slot_ids) = {
            let mut state = self.state.lock().await;
            let Some(court_id) = state.court_id else {
                return Ok(ConfirmOutcome::NothingSelected);
            };
            if state.selection.is_empty() {
                return Ok(ConfirmOutcome::NothingSelected);
            }
            state.ensure_not_submitting()?;
            state.submission = Some(Submission::InFlight);
            (court_id, state.date, state.selection.ids().to_vec())
        };

        match self.api.reserve(court_id, date, &slot_ids).await {
            Ok(receipt) => {
                info!(court_id, %date, slots = ?slot_ids, "reservation confirmed");
                self.state.lock().await.submission = Some(Submission::Confirmed(receipt.clone()));
                self.port.notify(Notice::success(
                    "Reservation confirmed",
                    receipt
                        .message
                        .clone()
                        .unwrap_or_else(|| "Your court is booked.".to_string()),
                ));
                if self.port.confirm(&post_booking_prompt()) {
                    return Ok(ConfirmOutcome::ViewReservations(receipt));
                }
                if let Err(err) = self.refresh_availability().await {
                    warn!(error = %err, "could not refresh availability after booking");
                }
                Ok(ConfirmOutcome::Stayed(receipt))
            }
            Err(err) => {
                warn!(court_id, %date, error = %err, "reservation rejected");
                {
                    let mut state = self.state.lock().await;
                    state.submission = Some(Submission::Failed(err.to_string()));
                    state.last_error = Some(err.to_string());
                }
                self.port
                    .notify(Notice::error("Reservation failed", err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn phase(&self) -> BookingPhase {
        self.state.lock().await.phase()
    }

    pub async fn snapshot(&self) -> BookingSnapshot {
        let state = self.state.lock().await;
        BookingSnapshot {
            phase: state.phase(),
            user: state.user.clone(),
            courts: state.courts.clone().unwrap_or_default(),
            court: state.court().cloned(),
            date: state.date,
            availability: state.availability.clone(),
            selection: state.selection.ids().to_vec(),
            quote: state.quote.clone(),
            submission: state.submission.clone(),
            last_error: state.last_error.clone(),
        }
    }

    async fn refresh_availability(&self) -> Result<(), ClientError> {
        let (ticket, court_id, date) = {
            let mut state = self.state.lock().await;
            let Some(court_id) = state.court_id else {
                return Ok(());
            };
            (state.invalidate_availability(), court_id, state.date)
        };

        let result = self.api.court_availability(court_id, date).await;

        let mut state = self.state.lock().await;
        if state.availability_ticket != ticket {
            debug!(court_id, %date, "discarding superseded availability");
            return Ok(());
        }
        match result {
            Ok(slots) => {
                debug!(court_id, %date, slots = slots.len(), "availability loaded");
                state.availability = Some(slots);
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn refresh_quote(&self) -> Result<(), ClientError> {
        let (ticket, court_id, date, slot_ids) = {
            let mut state = self.state.lock().await;
            let ticket = state.invalidate_quote();
            match state.court_id {
                Some(court_id) if !state.selection.is_empty() => {
                    (ticket, court_id, state.date, state.selection.ids().to_vec())
                }
                _ => return Ok(()),
            }
        };

        let result = self.api.price_quote(court_id, date, &slot_ids).await;

        let mut state = self.state.lock().await;
        if state.quote_ticket != ticket {
            debug!(slots = ?slot_ids, "discarding superseded quote");
            return Ok(());
        }
        match result {
            Ok(quote) => {
                debug!(total = quote.total, "price quoted");
                state.quote = Some(quote);
                Ok(())
            }
            Err(err) => {
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// Rejects dates before `today`.
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, ClientError> {
    if date < today {
        return Err(validation_error(format!(
            "Cannot book a past date ({date})"
        )));
    }
    Ok(date)
}

fn post_booking_prompt() -> ConfirmPrompt {
    ConfirmPrompt {
        title: "Reservation confirmed".to_string(),
        text: "Do you want to see your reservations?".to_string(),
        confirm_label: "View my reservations".to_string(),
        cancel_label: "Stay here".to_string(),
    }
}
