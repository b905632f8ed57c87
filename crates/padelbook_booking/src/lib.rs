//! Booking flow, reservation list and admin views.

pub mod admin; // Admin user directory and reservation overview
pub mod orchestrator; // Booking screen state machine
pub mod reservations; // "My reservations" screen
pub mod selection; // Slot selection set

#[cfg(test)]
mod selection_proptest;

pub use admin::{all_reservations, UserDirectory};
pub use orchestrator::{
    validate_booking_date, BookingOrchestrator, BookingPhase, BookingSnapshot, ConfirmOutcome,
    Submission,
};
pub use reservations::{CancelOutcome, ReservationList, ReservationListSnapshot};
pub use selection::Selection;
