pub mod config;
pub mod error;
pub mod models;
pub mod placement;
pub mod services;

use std::sync::Arc;

pub use error::{BookingError, LayoutError, Unplaceable};
pub use placement::{allocate, sellable_capacity, slots_needed, Allocator, Placement};

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub bookings: services::BookingService,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let bookings = services::BookingService::new(config.booking.clone());
        Arc::new(Self { config, bookings })
    }
}
