//! The "my reservations" screen.

use std::io::{self, Write};

use padelbook_booking::ReservationList;
use padelbook_common::models::ReservationId;
use padelbook_session::Route;

use super::{require, AlreadyReported};
use crate::app_state::AppState;
use crate::render;

pub async fn list(state: &AppState) -> anyhow::Result<()> {
    require(state, Route::MyReservations).await?;
    let list = ReservationList::new(state.api.clone(), state.port.clone());
    list.load().await?;

    let snapshot = list.snapshot().await;
    let mut out = io::stdout();
    if snapshot.reservations.is_empty() {
        writeln!(out, "You have no reservations.")?;
    }
    for reservation in &snapshot.reservations {
        writeln!(out, "{}", render::reservation_line(reservation))?;
    }
    Ok(())
}

pub async fn cancel(state: &AppState, id: ReservationId) -> anyhow::Result<()> {
    require(state, Route::MyReservations).await?;
    let list = ReservationList::new(state.api.clone(), state.port.clone());
    list.load().await?;

    list.cancel(id).await.map_err(AlreadyReported)?;
    Ok(())
}
