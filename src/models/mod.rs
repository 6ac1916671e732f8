pub mod layout;
pub mod seat;
pub mod booking;

pub use layout::{next_row_label, NumberingScheme, Row, VenueLayout};
pub use seat::{Occupancy, ParseSeatIdError, SeatId};
pub use booking::{Booking, BookingId, BookingRequest, EventId, SeatSelection, VenueId};
