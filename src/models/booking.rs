use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::SeatId;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Зал (площадка) со своим планом.
    VenueId
);
uuid_id!(
    /// Конкретное мероприятие (представление) в зале.
    EventId
);
uuid_id!(BookingId);

/// Запрос на бронирование: сколько мест и сколько из них для МГН.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_accessible_quota"))]
pub struct BookingRequest {
    #[validate(range(min = 1))]
    pub seats: u32,
    #[serde(default)]
    pub accessible_seats: u32,
}

impl BookingRequest {
    pub fn new(seats: u32) -> Self {
        Self { seats, accessible_seats: 0 }
    }

    pub fn accessible(seats: u32, accessible_seats: u32) -> Self {
        Self { seats, accessible_seats }
    }

    pub fn wants_accessible(&self) -> bool {
        self.accessible_seats > 0
    }
}

fn validate_accessible_quota(request: &BookingRequest) -> Result<(), ValidationError> {
    if request.accessible_seats > request.seats {
        let mut err = ValidationError::new("accessible_exceeds_seats");
        err.message = Some("accessible seat count cannot exceed the requested seat count".into());
        return Err(err);
    }
    Ok(())
}

/// Как выбираются места: алгоритмом или вручную кассиром.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "seats")]
pub enum SeatSelection {
    #[default]
    Automatic,
    Manual(Vec<SeatId>),
}

/// Подтверждённая бронь.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub event_id: EventId,
    pub seats: Vec<SeatId>,
    pub requested: BookingRequest,
    pub manual: bool,
    pub created_at: DateTime<Utc>,
}
