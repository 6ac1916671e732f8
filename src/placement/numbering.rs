//! Нумерация мест в ряду для двух схем.
//!
//! Standard: 1..N слева направо. FrenchParity: нечётные слева (…, 5, 3, 1),
//! проход, чётные справа (2, 4, 6, …) - младшие номера ближе к проходу.

use serde::Serialize;

use crate::models::NumberingScheme;

/// Сторона прохода во французской нумерации.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Odd,
    Even,
}

/// Порядок мест ряда слева направо и позиция прохода.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOrdering {
    pub seats: Vec<u32>,
    /// Индекс в `seats`, перед которым проходит проход.
    pub aisle: Option<usize>,
}

impl RowOrdering {
    /// Номера одной стороны, начиная от прохода.
    pub fn from_aisle(&self, side: Side) -> Vec<u32> {
        let Some(aisle) = self.aisle else {
            return self.seats.clone();
        };

        match side {
            Side::Odd => self.seats[..aisle].iter().rev().copied().collect(),
            Side::Even => self.seats[aisle..].to_vec(),
        }
    }
}

pub fn row_ordering(scheme: NumberingScheme, seat_count: u32) -> RowOrdering {
    match scheme {
        NumberingScheme::Standard => RowOrdering {
            seats: (1..=seat_count).collect(),
            aisle: None,
        },
        NumberingScheme::FrenchParity => {
            let mut odds: Vec<u32> = (1..=seat_count).step_by(2).collect();
            odds.reverse();
            let aisle = odds.len();

            let mut seats = odds;
            seats.extend((2..=seat_count).step_by(2));
            RowOrdering { seats, aisle: Some(aisle) }
        }
    }
}

/// Серия одной чётности от прохода наружу: 1, 3, 5 … или 2, 4, 6 …
pub fn parity_series(side: Side, seat_count: u32) -> Vec<u32> {
    row_ordering(NumberingScheme::FrenchParity, seat_count).from_aisle(side)
}
