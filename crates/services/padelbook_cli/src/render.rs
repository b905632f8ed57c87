//! Plain-text rendering of backend data.

use padelbook_common::models::{
    format_display_name, AdminUser, Court, PhotoCarousel, PriceQuote, Reservation, TimeSlot, User,
};

pub fn money(amount: f64) -> String {
    format!("{amount:.2} €")
}

pub fn court_line(court: &Court) -> String {
    format!(
        "#{:<4} {:<24} {:<8} {}/h  ({} photos)",
        court.id,
        court.name,
        court.cover_label(),
        money(court.base_price),
        court.display_photos().len()
    )
}

/// One line per photo, walking the court's carousel once around.
pub fn court_photo_lines(court: &Court) -> Vec<String> {
    let photos = court.display_photos();
    let mut carousel = PhotoCarousel::for_court(court);
    let mut lines = Vec::with_capacity(photos.len());
    for _ in 0..photos.len() {
        let index = carousel.index();
        lines.push(format!("      [{}/{}] {}", index + 1, photos.len(), photos[index]));
        carousel.next();
    }
    lines
}

pub fn slot_line(slot: &TimeSlot) -> String {
    format!("#{:<5} {}", slot.id, slot.label)
}

pub fn quote_line(quote: &PriceQuote) -> String {
    match &quote.applied_extra {
        Some(extra) => format!("Total: {} (includes {})", money(quote.total), extra.name),
        None => format!("Total: {}", money(quote.total)),
    }
}

pub fn reservation_line(reservation: &Reservation) -> String {
    let slots = reservation
        .slots
        .iter()
        .map(|slot| slot.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut line = format!(
        "#{:<5} {}  {:<20} {}  {}",
        reservation.id,
        reservation.date.format("%d/%m/%Y"),
        reservation.court_name,
        money(reservation.total),
        slots
    );
    if let Some(user) = &reservation.user_name {
        line.push_str(&format!("  [{}]", format_display_name(user)));
    }
    line
}

pub fn admin_user_line(user: &AdminUser) -> String {
    format!(
        "#{:<4} {:<24} {:<28} {:<10} {}",
        user.id,
        format_display_name(&user.name),
        user.email,
        user.dni.as_deref().unwrap_or("-"),
        user.role_label()
    )
}

pub fn welcome_line(user: &User) -> String {
    let role = if user.is_admin() { " (admin)" } else { "" };
    format!("Welcome, {}{role}!", user.formatted_name())
}
