//! Два разных счёта, которые легко перепутать:
//! - `sellable_capacity` - сколько билетов зал может продать;
//! - `slots_needed` - сколько физических мест ищет движок под один запрос.
//! При политике сопровождающего место МГН съедает ещё одно физическое место.

use crate::models::{BookingRequest, VenueLayout};

/// Вместимость для продажи: все места минус места МГН, если включена политика сопровождающего.
pub fn sellable_capacity(layout: &VenueLayout) -> u32 {
    let physical = layout.physical_seat_count();
    if layout.accessible_consumes_companion_seat {
        physical.saturating_sub(layout.accessible_seat_count())
    } else {
        physical
    }
}

/// Число физических мест под запрос.
pub fn slots_needed(layout: &VenueLayout, request: &BookingRequest) -> u32 {
    if layout.accessible_consumes_companion_seat && request.wants_accessible() {
        request.seats.saturating_add(request.accessible_seats)
    } else {
        request.seats
    }
}
