use thiserror::Error;

use crate::models::{BookingId, EventId, SeatId, VenueId};

/// Ошибки плана зала. Отлавливаются при редактировании, а не при размещении.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("row #{index} has an empty label")]
    EmptyRowLabel { index: usize },

    #[error("row label `{0}` must contain only uppercase letters A-Z")]
    InvalidRowLabel(String),

    #[error("row `{0}` is declared more than once")]
    DuplicateRow(String),

    #[error("row `{0}` has no seats")]
    EmptyRow(String),

    #[error("accessible seat {seat} is outside row `{row}` (1..={seat_count})")]
    AccessibleSeatOutOfRange { row: String, seat: u32, seat_count: u32 },

    #[error("malformed layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Почему алгоритм не нашёл места. Тексты показываются пользователю.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unplaceable {
    #[error("not enough contiguous seats: try fewer seats or select them manually")]
    NoContiguousSeats,

    #[error("no accessible seats available for this group size: try fewer seats or contact the organiser")]
    NoAccessibleSeats,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid booking request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("at most {max} seats can be booked at once (requested {requested})")]
    TooManySeats { requested: u32, max: u32 },

    #[error("venue {0} not found")]
    VenueNotFound(VenueId),

    #[error("event {0} not found")]
    EventNotFound(EventId),

    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    #[error("not enough seats left: requested {requested}, remaining {remaining}")]
    CapacityExceeded { requested: u32, remaining: u32 },

    #[error(transparent)]
    Unplaceable(#[from] Unplaceable),

    #[error("{selected} seats selected but {requested} requested")]
    SelectionSizeMismatch { selected: usize, requested: u32 },

    #[error("seat {0} selected more than once")]
    DuplicateSeat(SeatId),

    #[error("seats are not part of the venue layout: {}", join_seats(.0))]
    UnknownSeats(Vec<SeatId>),

    #[error("seats are already occupied: {}", join_seats(.0))]
    SeatsAlreadyOccupied(Vec<SeatId>),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

fn join_seats(seats: &[SeatId]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
