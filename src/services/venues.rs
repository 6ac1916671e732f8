use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::BookingError;
use crate::models::{EventId, Occupancy, VenueId, VenueLayout};
use crate::placement::sellable_capacity;
use crate::services::{BookingService, EventSlot, EventState, Venue};

/// Итог правки плана зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutUpdate {
    pub capacity: u32,
    pub events_updated: usize,
}

impl BookingService {
    /// Регистрирует зал. План проверяется здесь, движок дальше ему доверяет.
    pub async fn create_venue(&self, layout: VenueLayout) -> Result<VenueId, BookingError> {
        layout.validate()?;
        let capacity = sellable_capacity(&layout);
        let venue_id = VenueId::new();

        self.venues.write().await.insert(
            venue_id,
            Venue {
                layout: Arc::new(layout),
                capacity,
            },
        );

        info!("Venue {} created, capacity {}", venue_id, capacity);
        Ok(venue_id)
    }

    /// Заменяет план зала и переносит новую вместимость на все его мероприятия.
    ///
    /// Блокировка залов держится до конца: новое мероприятие не может
    /// появиться между заменой плана и обходом мероприятий.
    pub async fn update_layout(&self, venue_id: VenueId, layout: VenueLayout) -> Result<LayoutUpdate, BookingError> {
        layout.validate()?;
        let capacity = sellable_capacity(&layout);
        let layout = Arc::new(layout);

        let mut venues = self.venues.write().await;
        let venue = venues
            .get_mut(&venue_id)
            .ok_or(BookingError::VenueNotFound(venue_id))?;
        venue.layout = layout.clone();
        venue.capacity = capacity;

        let slots: Vec<Arc<EventSlot>> = self
            .events
            .read()
            .await
            .values()
            .filter(|slot| slot.venue_id == venue_id)
            .cloned()
            .collect();

        for slot in &slots {
            let mut state = slot.state.lock().await;
            state.layout = layout.clone();
            state.capacity = capacity;
        }
        drop(venues);

        info!(
            "Venue {} layout updated: capacity {}, {} events updated",
            venue_id,
            capacity,
            slots.len()
        );
        Ok(LayoutUpdate {
            capacity,
            events_updated: slots.len(),
        })
    }

    pub async fn layout(&self, venue_id: VenueId) -> Result<Arc<VenueLayout>, BookingError> {
        self.venues
            .read()
            .await
            .get(&venue_id)
            .map(|venue| venue.layout.clone())
            .ok_or(BookingError::VenueNotFound(venue_id))
    }

    pub async fn venue_capacity(&self, venue_id: VenueId) -> Result<u32, BookingError> {
        self.venues
            .read()
            .await
            .get(&venue_id)
            .map(|venue| venue.capacity)
            .ok_or(BookingError::VenueNotFound(venue_id))
    }

    /// Новое мероприятие в зале, план и вместимость берутся из текущей версии зала.
    pub async fn schedule_event(&self, venue_id: VenueId) -> Result<EventId, BookingError> {
        let venues = self.venues.read().await;
        let venue = venues.get(&venue_id).ok_or(BookingError::VenueNotFound(venue_id))?;
        let event_id = EventId::new();

        let slot = EventSlot {
            venue_id,
            state: Mutex::new(EventState {
                layout: venue.layout.clone(),
                capacity: venue.capacity,
                occupancy: Occupancy::new(),
                bookings: HashMap::new(),
            }),
        };
        // Вставка под блокировкой залов, иначе правка плана может пропустить мероприятие
        self.events.write().await.insert(event_id, Arc::new(slot));
        drop(venues);

        info!("Event {} scheduled at venue {}", event_id, venue_id);
        Ok(event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookingConfig;
    use crate::error::LayoutError;
    use crate::models::{BookingRequest, NumberingScheme, Row, SeatId, SeatSelection};
    use futures::future::join_all;

    fn layout(rows: Vec<Row>) -> VenueLayout {
        VenueLayout::new(rows, NumberingScheme::Standard)
    }

    #[tokio::test]
    async fn rejects_invalid_layout_on_create() {
        let service = BookingService::new(BookingConfig::default());
        let bad = layout(vec![Row::new("A", 2).with_accessible([5])]);
        let err = service.create_venue(bad).await.unwrap_err();
        assert!(matches!(err, BookingError::Layout(LayoutError::AccessibleSeatOutOfRange { .. })));
    }

    #[tokio::test]
    async fn layout_edit_propagates_capacity_to_events() {
        let service = BookingService::new(BookingConfig::default());
        let venue = service
            .create_venue(layout(vec![Row::new("A", 10), Row::new("B", 10)]))
            .await
            .unwrap();
        let other = service.create_venue(layout(vec![Row::new("A", 5)])).await.unwrap();

        let first = service.schedule_event(venue).await.unwrap();
        let second = service.schedule_event(venue).await.unwrap();
        let elsewhere = service.schedule_event(other).await.unwrap();
        assert_eq!(service.summary(first).await.unwrap().capacity, 20);

        let edited = layout(vec![
            Row::new("A", 10).with_accessible([1, 2]),
            Row::new("B", 10),
        ])
        .with_companion_seats(true);
        let update = service.update_layout(venue, edited).await.unwrap();

        assert_eq!(update, LayoutUpdate { capacity: 18, events_updated: 2 });
        assert_eq!(service.venue_capacity(venue).await.unwrap(), 18);
        assert_eq!(service.summary(first).await.unwrap().capacity, 18);
        assert_eq!(service.summary(second).await.unwrap().capacity, 18);
        assert_eq!(service.summary(elsewhere).await.unwrap().capacity, 5);
        assert!(service.layout(venue).await.unwrap().accessible_consumes_companion_seat);
    }

    #[tokio::test]
    async fn bookings_after_edit_use_new_layout() {
        let service = BookingService::new(BookingConfig::default());
        let venue = service.create_venue(layout(vec![Row::new("A", 10)])).await.unwrap();
        let event = service.schedule_event(venue).await.unwrap();

        service.update_layout(venue, layout(vec![Row::new("A", 4)])).await.unwrap();

        let booking = service
            .book(event, BookingRequest::new(2), SeatSelection::Automatic)
            .await
            .unwrap();
        assert_eq!(booking.seats, vec![SeatId::new("A", 2), SeatId::new("A", 3)]);
        assert_eq!(service.summary(event).await.unwrap().capacity, 4);

        let err = service
            .book(event, BookingRequest::new(3), SeatSelection::Automatic)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::CapacityExceeded { requested: 3, remaining: 2 }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_edits_and_scheduling_agree_on_capacity() {
        let service = Arc::new(BookingService::new(BookingConfig::default()));
        let venue = service
            .create_venue(layout(vec![Row::new("A", 10), Row::new("B", 10)]))
            .await
            .unwrap();

        let scheduling = (0..16).map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.schedule_event(venue).await })
        });
        let editing = (0..8).map(|i| {
            let service = service.clone();
            let rows = vec![Row::new("A", 10), Row::new("B", 10 + i)];
            tokio::spawn(async move { service.update_layout(venue, layout(rows)).await })
        });
        let booking = (0..8).map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                if let Ok(event) = service.schedule_event(venue).await {
                    let _ = service.book(event, BookingRequest::new(4), SeatSelection::Automatic).await;
                }
            })
        });

        let events: Vec<EventId> = join_all(scheduling)
            .await
            .into_iter()
            .map(|result| result.unwrap().unwrap())
            .collect();
        for result in join_all(editing).await {
            result.unwrap().unwrap();
        }
        for result in join_all(booking).await {
            result.unwrap();
        }

        let capacity = service.venue_capacity(venue).await.unwrap();
        let current = service.layout(venue).await.unwrap();
        for event in events {
            assert_eq!(service.summary(event).await.unwrap().capacity, capacity);
        }
        for slot in service.events.read().await.values() {
            let state = slot.state.lock().await;
            assert_eq!(state.capacity, capacity);
            assert!(Arc::ptr_eq(&state.layout, &current));
            assert!(state.occupancy.iter().all(|seat| current.contains_seat(seat.row(), seat.number())));
        }
    }

    #[tokio::test]
    async fn unknown_venue() {
        let service = BookingService::new(BookingConfig::default());
        let missing = VenueId::new();
        assert!(matches!(
            service.schedule_event(missing).await,
            Err(BookingError::VenueNotFound(id)) if id == missing
        ));
        assert!(matches!(
            service.update_layout(missing, VenueLayout::default()).await,
            Err(BookingError::VenueNotFound(_))
        ));
    }
}
