//! Движок рассадки.
//!
//! Чистая функция от (план, занятые места, запрос): без состояния, без I/O.
//! Сериализация "подобрать места + записать бронь" - забота вызывающего
//! (см. `services::booking`), иначе два параллельных запроса по одному
//! снимку занятости получат пересекающиеся места.
//!
//! Стратегии:
//! 1.  **SingleRowStrategy**: блок мест в одном ряду, от центра (Standard)
//!     или от прохода по сторонам чётности (FrenchParity).
//! 2.  **DualRowStrategy**: небольшая чётная группа делится на два соседних
//!     ряда, одинаковые колонки, поиск слева направо.

pub mod capacity;
pub mod dual_row;
pub mod numbering;
pub mod single_row;

use serde::Serialize;
use tracing::debug;

use crate::models::{BookingRequest, Occupancy, Row, SeatId, VenueLayout};

pub use capacity::{sellable_capacity, slots_needed};

/// Свободные места плана, по рядам в порядке плана.
#[derive(Debug, Clone)]
pub struct FreeSeats {
    // rows[i][n - 1] - свободно ли место n ряда i
    rows: Vec<Vec<bool>>,
}

impl FreeSeats {
    /// Всё, что есть в плане и отсутствует в занятых. Лишние id в занятых игнорируются.
    pub fn build(layout: &VenueLayout, occupancy: &Occupancy) -> Self {
        let rows = layout
            .rows
            .iter()
            .map(|row| {
                (1..=row.seat_count)
                    .map(|number| !occupancy.is_taken(&row.id, number))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn row<'a>(&'a self, layout: &'a VenueLayout, index: usize) -> Option<RowView<'a>> {
        let row = layout.rows.get(index)?;
        let free = self.rows.get(index)?;
        Some(RowView { row, free })
    }

    pub fn count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&free| free).count()
    }
}

/// Ряд вместе с его свободными местами.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub row: &'a Row,
    free: &'a [bool],
}

impl<'a> RowView<'a> {
    pub fn is_free(&self, number: u32) -> bool {
        number >= 1 && self.free.get(number as usize - 1).copied().unwrap_or(false)
    }

    pub fn seat(&self, number: u32) -> SeatId {
        SeatId::new(self.row.id.as_str(), number)
    }

    /// Число мест МГН в блоке, либо None если хоть одно место блока занято.
    pub(crate) fn check_block(&self, numbers: &[u32]) -> Option<u32> {
        let mut accessible = 0;
        for &number in numbers {
            if !self.is_free(number) {
                return None;
            }
            if self.row.is_accessible(number) {
                accessible += 1;
            }
        }
        Some(accessible)
    }
}

/// Правило квоты МГН: при запросе МГН - не меньше запрошенного,
/// без запроса - ни одного места МГН.
pub(crate) fn quota_met(found: u32, required: u32) -> bool {
    if required > 0 {
        found >= required
    } else {
        found == 0
    }
}

/// Что ищет стратегия: размер группы, число физических мест и квота МГН.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    pub group_size: u32,
    pub slots: u32,
    pub accessible: u32,
}

impl SlotRequest {
    pub fn for_layout(layout: &VenueLayout, request: &BookingRequest) -> Self {
        Self {
            group_size: request.seats,
            slots: slots_needed(layout, request),
            accessible: request.accessible_seats,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    SingleRow,
    DualRow,
}

/// Найденная рассадка.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub seats: Vec<SeatId>,
    pub strategy: StrategyKind,
}

pub trait PlacementStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn place(&self, layout: &VenueLayout, free: &FreeSeats, request: &SlotRequest) -> Option<Vec<SeatId>>;
}

/// Один ряд: первый подходящий ряд в порядке плана.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRowStrategy;

impl PlacementStrategy for SingleRowStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SingleRow
    }

    fn place(&self, layout: &VenueLayout, free: &FreeSeats, request: &SlotRequest) -> Option<Vec<SeatId>> {
        (0..layout.rows.len()).find_map(|index| {
            let view = free.row(layout, index)?;
            single_row::search(layout.numbering, &view, request.slots, request.accessible)
        })
    }
}

/// Два соседних ряда для чётных групп до `DUAL_ROW_MAX_GROUP` человек.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualRowStrategy;

pub const DUAL_ROW_MAX_GROUP: u32 = 6;

impl PlacementStrategy for DualRowStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DualRow
    }

    fn place(&self, layout: &VenueLayout, free: &FreeSeats, request: &SlotRequest) -> Option<Vec<SeatId>> {
        if request.group_size % 2 != 0 || request.group_size > DUAL_ROW_MAX_GROUP {
            return None;
        }
        // нечётное число слотов (места сопровождающих) поровну не делится
        if request.slots % 2 != 0 {
            return None;
        }
        dual_row::search(layout, free, request.slots / 2, request.accessible)
    }
}

/// Набор стратегий, пробуемых по порядку.
pub struct Allocator {
    strategies: Vec<Box<dyn PlacementStrategy>>,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(vec![Box::new(SingleRowStrategy), Box::new(DualRowStrategy)])
    }
}

impl Allocator {
    pub fn new(strategies: Vec<Box<dyn PlacementStrategy>>) -> Self {
        Self { strategies }
    }

    /// Подбирает места или возвращает None, если ни одна стратегия не справилась.
    pub fn allocate(
        &self,
        layout: &VenueLayout,
        occupancy: &Occupancy,
        request: &BookingRequest,
    ) -> Option<Placement> {
        // Такой запрос не проходит проверку, движок просто ничего не предлагает
        if request.seats == 0 || request.accessible_seats > request.seats {
            return None;
        }

        let free = FreeSeats::build(layout, occupancy);
        let slots = SlotRequest::for_layout(layout, request);
        debug!(
            "Searching {} slots ({} accessible) among {} free seats",
            slots.slots,
            slots.accessible,
            free.count()
        );

        for strategy in &self.strategies {
            if let Some(seats) = strategy.place(layout, &free, &slots) {
                debug!("Placement found by {:?}: {} seats", strategy.kind(), seats.len());
                return Some(Placement {
                    seats,
                    strategy: strategy.kind(),
                });
            }
        }

        debug!("No placement for {} seats", request.seats);
        None
    }
}

/// Рассадка стандартным набором стратегий.
pub fn allocate(layout: &VenueLayout, occupancy: &Occupancy, request: &BookingRequest) -> Option<Placement> {
    Allocator::default().allocate(layout, occupancy, request)
}
