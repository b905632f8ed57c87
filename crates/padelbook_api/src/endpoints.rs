//! Typed calls for each backend endpoint.

use crate::client::{decode, decode_list, ApiClient};
use chrono::NaiveDate;
use padelbook_common::models::{
    AdminUser, CancelRequest, Court, CourtDateRequest, CourtId, Credentials, DateRequest,
    LoginResponse, PriceQuote, RegisterRequest, Reservation, ReservationId, ReservationReceipt,
    SlotId, SlotSelectionRequest, TimeSlot, User,
};
use padelbook_common::ClientError;
use serde_json::Value;
use tracing::info;

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ME: &str = "/me";
pub const COURTS: &str = "/pistas";
pub const TIME_SLOTS: &str = "/horarios";
pub const COURT_AVAILABILITY: &str = "/disponibilidadpista";
pub const AVAILABILITY: &str = "/disponibilidad";
pub const PRICE_QUOTE: &str = "/calcular_precio";
pub const RESERVE: &str = "/reservar";
pub const MY_RESERVATIONS: &str = "/mis_reservas";
pub const CANCEL_RESERVATION: &str = "/cancelar_reserva";
pub const ADMIN_RESERVATIONS: &str = "/admin/todas_reservas";
pub const ADMIN_USERS: &str = "/admin/usuarios";

impl ApiClient {
    // --- Authentication ---

    /// Logs in and, when the backend hands out a token, stores it.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let data = self.post(LOGIN, credentials).await?;
        let response: LoginResponse = decode(data)?;
        if let Some(token) = response
            .access_token
            .as_ref()
            .filter(|token| !token.as_str().is_empty())
        {
            self.session().set_token(token.clone());
            info!(email = %credentials.email, "logged in");
        }
        Ok(response)
    }

    /// Creates an account. The backend's answer carries nothing we rely on.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        self.post(REGISTER, request).await
    }

    /// Forgets the stored token. No request is made.
    pub fn logout(&self) {
        self.session().clear();
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        decode(self.get(ME).await?)
    }

    // --- Catalogue ---

    pub async fn courts(&self) -> Result<Vec<Court>, ClientError> {
        decode_list(self.get(COURTS).await?, "pistas")
    }

    pub async fn time_slots(&self) -> Result<Vec<TimeSlot>, ClientError> {
        decode_list(self.get(TIME_SLOTS).await?, "horarios")
    }

    // --- Availability and pricing ---

    /// Free slots of one court on one date.
    pub async fn court_availability(
        &self,
        court_id: CourtId,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, ClientError> {
        let body = CourtDateRequest {
            pista_id: court_id,
            fecha: date,
        };
        decode_list(self.post(COURT_AVAILABILITY, &body).await?, "disponibilidades")
    }

    /// Availability across every court on one date, as the backend shapes it.
    pub async fn availability_all(&self, date: NaiveDate) -> Result<Value, ClientError> {
        self.post(AVAILABILITY, &DateRequest { fecha: date }).await
    }

    pub async fn price_quote(
        &self,
        court_id: CourtId,
        date: NaiveDate,
        slot_ids: &[SlotId],
    ) -> Result<PriceQuote, ClientError> {
        let body = SlotSelectionRequest {
            pista_id: court_id,
            fecha: date,
            horario_ids: slot_ids,
        };
        decode(self.post(PRICE_QUOTE, &body).await?)
    }

    // --- Reservations ---

    pub async fn reserve(
        &self,
        court_id: CourtId,
        date: NaiveDate,
        slot_ids: &[SlotId],
    ) -> Result<ReservationReceipt, ClientError> {
        let body = SlotSelectionRequest {
            pista_id: court_id,
            fecha: date,
            horario_ids: slot_ids,
        };
        decode(self.post(RESERVE, &body).await?)
    }

    pub async fn my_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        decode_list(self.get(MY_RESERVATIONS).await?, "reservas")
    }

    pub async fn cancel_reservation(&self, reservation_id: ReservationId) -> Result<(), ClientError> {
        self.post(
            CANCEL_RESERVATION,
            &CancelRequest {
                reserva_id: reservation_id,
            },
        )
        .await?;
        Ok(())
    }

    // --- Administration ---

    pub async fn all_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        decode_list(self.get(ADMIN_RESERVATIONS).await?, "reservas")
    }

    pub async fn users(&self) -> Result<Vec<AdminUser>, ClientError> {
        decode_list(self.get(ADMIN_USERS).await?, "usuarios")
    }
}
