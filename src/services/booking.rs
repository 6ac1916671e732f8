use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::{BookingError, Unplaceable};
use crate::models::{Booking, BookingId, BookingRequest, EventId, Occupancy, SeatId, SeatSelection, VenueLayout};
use crate::services::BookingService;

/// Заполненность мероприятия.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub capacity: u32,
    pub occupied: u32,
    pub remaining: u32,
    /// Процент заполнения, округлённый до целого.
    pub fill_rate: u32,
}

impl EventSummary {
    fn new(capacity: u32, occupied: u32) -> Self {
        let fill_rate = if capacity == 0 {
            0
        } else {
            ((occupied as f64 * 100.0) / capacity as f64).round() as u32
        };
        Self {
            capacity,
            occupied,
            remaining: capacity.saturating_sub(occupied),
            fill_rate,
        }
    }
}

impl BookingService {
    /// Бронирует места на мероприятие.
    ///
    /// Весь путь "снимок занятости -> подбор мест -> запись" идёт под мьютексом
    /// мероприятия.
    pub async fn book(
        &self,
        event_id: EventId,
        request: BookingRequest,
        selection: SeatSelection,
    ) -> Result<Booking, BookingError> {
        check_request(&request, self.config.max_seats_per_booking)?;

        let slot = self
            .event_slot(event_id)
            .await
            .ok_or(BookingError::EventNotFound(event_id))?;
        // План и вместимость берём из состояния мероприятия: правка плана меняет их вместе
        let mut state = slot.state.lock().await;
        let layout = state.layout.clone();

        // Проверка вместимости до вызова движка: движок не знает, сколько продано
        let occupied = state.occupancy.len() as u32;
        if occupied + request.seats > state.capacity {
            return Err(BookingError::CapacityExceeded {
                requested: request.seats,
                remaining: state.capacity.saturating_sub(occupied),
            });
        }

        let manual = matches!(selection, SeatSelection::Manual(_));
        let seats = match selection {
            SeatSelection::Automatic => {
                let placement = self
                    .allocator
                    .allocate(&layout, &state.occupancy, &request)
                    .ok_or_else(|| {
                        if request.wants_accessible() {
                            Unplaceable::NoAccessibleSeats
                        } else {
                            Unplaceable::NoContiguousSeats
                        }
                    })
                    .inspect_err(|reason| warn!("Event {}: no placement for {:?}: {}", event_id, request, reason))?;
                debug!("Event {}: placed via {:?}", event_id, placement.strategy);
                placement.seats
            }
            SeatSelection::Manual(seats) => {
                validate_manual_selection(&layout, &state.occupancy, &request, &seats)?;
                seats
            }
        };

        let booking = Booking {
            id: BookingId::new(),
            event_id,
            seats,
            requested: request,
            manual,
            created_at: Utc::now(),
        };

        state.occupancy.extend(booking.seats.iter().cloned());
        state.bookings.insert(booking.id, booking.clone());

        info!(
            "Booking {} confirmed for event {}: {}",
            booking.id,
            event_id,
            booking
                .seats
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(booking)
    }

    /// Отменяет бронь и освобождает её места.
    pub async fn cancel(&self, event_id: EventId, booking_id: BookingId) -> Result<Booking, BookingError> {
        let slot = self
            .event_slot(event_id)
            .await
            .ok_or(BookingError::EventNotFound(event_id))?;
        let mut state = slot.state.lock().await;

        let booking = state
            .bookings
            .remove(&booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        for seat in &booking.seats {
            state.occupancy.remove(seat);
        }

        info!("Booking {} cancelled, {} seats released", booking_id, booking.seats.len());
        Ok(booking)
    }

    pub async fn occupancy(&self, event_id: EventId) -> Result<Occupancy, BookingError> {
        let slot = self
            .event_slot(event_id)
            .await
            .ok_or(BookingError::EventNotFound(event_id))?;
        let state = slot.state.lock().await;
        Ok(state.occupancy.clone())
    }

    /// Брони мероприятия в порядке создания.
    pub async fn bookings(&self, event_id: EventId) -> Result<Vec<Booking>, BookingError> {
        let slot = self
            .event_slot(event_id)
            .await
            .ok_or(BookingError::EventNotFound(event_id))?;
        let state = slot.state.lock().await;

        let mut bookings: Vec<Booking> = state.bookings.values().cloned().collect();
        bookings.sort_by_key(|booking| booking.created_at);
        Ok(bookings)
    }

    pub async fn summary(&self, event_id: EventId) -> Result<EventSummary, BookingError> {
        let slot = self
            .event_slot(event_id)
            .await
            .ok_or(BookingError::EventNotFound(event_id))?;
        let state = slot.state.lock().await;
        Ok(EventSummary::new(state.capacity, state.occupancy.len() as u32))
    }
}

/// Проверки запроса до движка: схема `BookingRequest` и лимит мест на бронь.
pub fn check_request(request: &BookingRequest, max_seats: u32) -> Result<(), BookingError> {
    request.validate()?;
    if request.seats > max_seats {
        return Err(BookingError::TooManySeats {
            requested: request.seats,
            max: max_seats,
        });
    }
    Ok(())
}

/// Ручной выбор мест: количество совпадает с запросом, места есть в плане,
/// без повторов и не заняты.
pub fn validate_manual_selection(
    layout: &VenueLayout,
    occupancy: &Occupancy,
    request: &BookingRequest,
    seats: &[SeatId],
) -> Result<(), BookingError> {
    if seats.len() != request.seats as usize {
        return Err(BookingError::SelectionSizeMismatch {
            selected: seats.len(),
            requested: request.seats,
        });
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = seats.iter().find(|seat| !seen.insert(*seat)) {
        return Err(BookingError::DuplicateSeat(duplicate.clone()));
    }

    let unknown: Vec<SeatId> = seats
        .iter()
        .filter(|seat| !layout.contains_seat(seat.row(), seat.number()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(BookingError::UnknownSeats(unknown));
    }

    let taken: Vec<SeatId> = seats.iter().filter(|seat| occupancy.contains(seat)).cloned().collect();
    if !taken.is_empty() {
        return Err(BookingError::SeatsAlreadyOccupied(taken));
    }

    Ok(())
}
