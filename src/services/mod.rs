//! Слой вызывающего кода вокруг движка рассадки.
//!
//! Движок только предлагает места. Здесь живут проверки до вызова движка,
//! ручной выбор мест, запись брони и главное правило конкурентности:
//! "подобрать места + записать занятость" выполняется под мьютексом
//! мероприятия, поэтому две брони одного мероприятия никогда не получат
//! одно и то же место. Разные мероприятия бронируются параллельно.
//!
//! Порядок блокировок один на весь сервис: залы -> карта мероприятий ->
//! мьютекс мероприятия. Под мьютексом мероприятия другие блокировки не берутся.

pub mod booking;
pub mod venues;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::config::BookingConfig;
use crate::models::{Booking, BookingId, EventId, Occupancy, VenueId, VenueLayout};
use crate::placement::Allocator;

pub use booking::EventSummary;
pub use venues::LayoutUpdate;

struct Venue {
    layout: Arc<VenueLayout>,
    capacity: u32,
}

struct EventSlot {
    venue_id: VenueId,
    state: Mutex<EventState>,
}

struct EventState {
    layout: Arc<VenueLayout>,
    capacity: u32,
    occupancy: Occupancy,
    bookings: HashMap<BookingId, Booking>,
}

pub struct BookingService {
    config: BookingConfig,
    allocator: Allocator,
    venues: RwLock<HashMap<VenueId, Venue>>,
    events: RwLock<HashMap<EventId, Arc<EventSlot>>>,
}

impl BookingService {
    pub fn new(config: BookingConfig) -> Self {
        Self::with_allocator(config, Allocator::default())
    }

    pub fn with_allocator(config: BookingConfig, allocator: Allocator) -> Self {
        Self {
            config,
            allocator,
            venues: RwLock::new(HashMap::new()),
            events: RwLock::new(HashMap::new()),
        }
    }

    async fn event_slot(&self, event_id: EventId) -> Option<Arc<EventSlot>> {
        self.events.read().await.get(&event_id).cloned()
    }
}
