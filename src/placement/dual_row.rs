use std::cmp::min;

use crate::models::{NumberingScheme, SeatId, VenueLayout};
use crate::placement::numbering::{parity_series, Side};
use crate::placement::{quota_met, FreeSeats};

/// Ищет по `per_row` мест в одних и тех же колонках двух соседних рядов.
///
/// Колонки перебираются строго слева направо (для FrenchParity - от прохода),
/// без поиска от центра. Результат: сначала места переднего ряда, затем заднего.
pub fn search(layout: &VenueLayout, free: &FreeSeats, per_row: u32, required_accessible: u32) -> Option<Vec<SeatId>> {
    if per_row == 0 {
        return None;
    }
    let step = match layout.numbering {
        NumberingScheme::Standard => 1,
        NumberingScheme::FrenchParity => 2,
    };

    for index in 0..layout.rows.len().saturating_sub(1) {
        let (Some(front), Some(back)) = (free.row(layout, index), free.row(layout, index + 1)) else {
            continue;
        };
        let max_column = min(front.row.seat_count, back.row.seat_count);

        for column in candidate_columns(layout.numbering, max_column) {
            if column + (per_row - 1) * step > max_column {
                continue;
            }

            let numbers: Vec<u32> = (0..per_row).map(|j| column + j * step).collect();
            let (Some(front_accessible), Some(back_accessible)) =
                (front.check_block(&numbers), back.check_block(&numbers))
            else {
                continue;
            };
            if !quota_met(front_accessible + back_accessible, required_accessible) {
                continue;
            }

            let mut seats: Vec<SeatId> = numbers.iter().map(|&n| front.seat(n)).collect();
            seats.extend(numbers.iter().map(|&n| back.seat(n)));
            return Some(seats);
        }
    }

    None
}

/// Колонки-кандидаты. Для FrenchParity нечётная и чётная серии сливаются по возрастанию.
fn candidate_columns(scheme: NumberingScheme, max_column: u32) -> Vec<u32> {
    match scheme {
        NumberingScheme::Standard => (1..=max_column).collect(),
        NumberingScheme::FrenchParity => {
            let mut columns = parity_series(Side::Odd, max_column);
            columns.extend(parity_series(Side::Even, max_column));
            columns.sort_unstable();
            columns
        }
    }
}
