// --- File: crates/padelbook_common/src/models.rs ---

// Data shared by every layer of the client: what the backend sends us, what
// we send back, and the session credential. Field names on the wire are the
// backend's (Spanish); the Rust names describe the meaning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CourtId = i64;
pub type SlotId = i64;
pub type ReservationId = i64;

/// Role id the backend assigns to administrators.
pub const ADMIN_ROLE_ID: i64 = 2;

/// Role name the backend reports for administrators.
pub const ADMIN_ROLE_NAME: &str = "Administrador";

/// Photos shown for a court that has none of its own.
pub const DEFAULT_COURT_PHOTOS: [&str; 3] = [
    "https://images.unsplash.com/photo-1626224583764-f87db24ac4ea?q=80&w=500",
    "https://images.unsplash.com/photo-1593114051523-2895f366b445?q=80&w=500",
    "https://images.unsplash.com/photo-1554062614-69021c38cc9b?q=80&w=500",
];

/// Opaque bearer credential proving an authenticated identity.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// The current user as reported by `/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
    #[serde(default)]
    pub rol_id: Option<i64>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.rol_id == Some(ADMIN_ROLE_ID) || self.role.as_deref() == Some(ADMIN_ROLE_NAME)
    }

    /// Display name with every word capitalised.
    pub fn formatted_name(&self) -> String {
        format_display_name(&self.display_name)
    }
}

/// "juan LEBRÓN" -> "Juan Lebrón".
pub fn format_display_name(name: &str) -> String {
    name.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A bookable court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cubierta", default)]
    pub covered: bool,
    #[serde(rename = "precio_base", default)]
    pub base_price: f64,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<String>,
}

impl Court {
    /// The court's photos, or the default set when it has none.
    pub fn display_photos(&self) -> Vec<&str> {
        if self.photos.is_empty() {
            DEFAULT_COURT_PHOTOS.to_vec()
        } else {
            self.photos.iter().map(String::as_str).collect()
        }
    }

    pub fn cover_label(&self) -> &'static str {
        if self.covered {
            "COVERED"
        } else {
            "OUTDOOR"
        }
    }
}

/// Rotating index over a court's photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoCarousel {
    index: usize,
    len: usize,
}

impl PhotoCarousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn for_court(court: &Court) -> Self {
        Self::new(court.display_photos().len())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }
}

/// A bookable time window. Availability is implied by presence in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    #[serde(rename = "franja")]
    pub label: String,
}

/// A named surcharge or discount applied to a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedExtra {
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Computed total for a candidate set of slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(rename = "total_precio")]
    pub total: f64,
    #[serde(rename = "extra_aplicado", default)]
    pub applied_extra: Option<AppliedExtra>,
}

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(rename = "pista_nombre")]
    pub court_name: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "horarios", default)]
    pub slots: Vec<TimeSlot>,
    #[serde(default)]
    pub total: f64,
    /// Only present in the admin listing.
    #[serde(rename = "usuario", alias = "usuario_nombre", default)]
    pub user_name: Option<String>,
}

/// What `/reservar` answers on success.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReservationReceipt {
    #[serde(alias = "reserva_id", default)]
    pub id: Option<ReservationId>,
    #[serde(alias = "mensaje", default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// A row of the admin user table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub rol_id: Option<i64>,
}

impl AdminUser {
    pub fn is_admin(&self) -> bool {
        self.rol_id == Some(ADMIN_ROLE_ID)
    }

    pub fn role_label(&self) -> &'static str {
        if self.is_admin() {
            "Admin"
        } else {
            "Client"
        }
    }

    /// Case-insensitive substring match on name or email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}

// --- Request bodies ---

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourtDateRequest {
    pub pista_id: CourtId,
    pub fecha: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRequest {
    pub fecha: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotSelectionRequest<'a> {
    pub pista_id: CourtId,
    pub fecha: NaiveDate,
    pub horario_ids: &'a [SlotId],
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelRequest {
    pub reserva_id: ReservationId,
}

/// What `/login` answers on success.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<SessionToken>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
