use crate::models::{NumberingScheme, SeatId};
use crate::placement::numbering::{parity_series, Side};
use crate::placement::{quota_met, RowView};

/// Блок из `block` мест в одном ряду с учётом квоты МГН.
pub fn search(scheme: NumberingScheme, view: &RowView<'_>, block: u32, required_accessible: u32) -> Option<Vec<SeatId>> {
    match scheme {
        NumberingScheme::Standard => search_standard(view, block, required_accessible),
        NumberingScheme::FrenchParity => search_french(view, block, required_accessible),
    }
}

/// Порядок стартовых мест от центра: c, c-1, c+1, c-2, c+2, ...
pub fn center_out_starts(seat_count: u32) -> Vec<u32> {
    let center = seat_count.div_ceil(2);
    let mut order = Vec::with_capacity(seat_count as usize);

    for offset in 0..seat_count {
        if center > offset {
            order.push(center - offset);
        }
        if offset > 0 && center + offset <= seat_count {
            order.push(center + offset);
        }
    }

    order
}

/// Standard: подряд идущие номера, первый подходящий блок ближе к центру.
pub fn search_standard(view: &RowView<'_>, block: u32, required_accessible: u32) -> Option<Vec<SeatId>> {
    let seat_count = view.row.seat_count;
    if block == 0 || block > seat_count {
        return None;
    }

    center_out_starts(seat_count)
        .into_iter()
        .filter(|&start| start + block - 1 <= seat_count)
        .find_map(|start| {
            let numbers: Vec<u32> = (start..start + block).collect();
            accept_block(view, &numbers, required_accessible)
        })
}

/// FrenchParity: ищем отдельно по нечётной и чётной сторонам (шаг 2 от прохода),
/// из двух найденных берём блок с меньшей суммой номеров.
pub fn search_french(view: &RowView<'_>, block: u32, required_accessible: u32) -> Option<Vec<SeatId>> {
    let seat_count = view.row.seat_count;
    let odd = first_in_series(view, &parity_series(Side::Odd, seat_count), block, required_accessible);
    let even = first_in_series(view, &parity_series(Side::Even, seat_count), block, required_accessible);

    match (odd, even) {
        (Some(odd), Some(even)) => {
            if number_sum(&odd) <= number_sum(&even) {
                Some(odd)
            } else {
                Some(even)
            }
        }
        (odd, even) => odd.or(even),
    }
}

fn first_in_series(view: &RowView<'_>, series: &[u32], block: u32, required_accessible: u32) -> Option<Vec<SeatId>> {
    if block == 0 {
        return None;
    }
    series
        .windows(block as usize)
        .find_map(|numbers| accept_block(view, numbers, required_accessible))
}

fn accept_block(view: &RowView<'_>, numbers: &[u32], required_accessible: u32) -> Option<Vec<SeatId>> {
    let accessible = view.check_block(numbers)?;
    if !quota_met(accessible, required_accessible) {
        return None;
    }
    Some(numbers.iter().map(|&number| view.seat(number)).collect())
}

fn number_sum(seats: &[SeatId]) -> u32 {
    seats.iter().map(SeatId::number).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Occupancy, Row, VenueLayout};
    use crate::placement::FreeSeats;

    fn ids(seats: &[SeatId]) -> Vec<String> {
        seats.iter().map(ToString::to_string).collect()
    }

    fn run(scheme: NumberingScheme, row: Row, occupied: &[&str], block: u32, accessible: u32) -> Option<Vec<String>> {
        let layout = VenueLayout::new(vec![row], scheme);
        let free = FreeSeats::build(&layout, &Occupancy::from_labels(occupied.iter().copied()));
        let view = free.row(&layout, 0)?;
        search(scheme, &view, block, accessible).map(|seats| ids(&seats))
    }

    #[test]
    fn starts_alternate_around_center() {
        assert_eq!(center_out_starts(10), vec![5, 4, 6, 3, 7, 2, 8, 1, 9, 10]);
        assert_eq!(center_out_starts(5), vec![3, 2, 4, 1, 5]);
        assert_eq!(center_out_starts(1), vec![1]);
        assert!(center_out_starts(0).is_empty());
    }

    #[test]
    fn standard_prefers_center() {
        let found = run(NumberingScheme::Standard, Row::new("A", 10), &[], 2, 0);
        assert_eq!(found, Some(vec!["A5".into(), "A6".into()]));
    }

    #[test]
    fn standard_walks_outward_past_occupied_seats() {
        let found = run(NumberingScheme::Standard, Row::new("A", 10), &["A5"], 2, 0);
        // старт 5 и 4 задевают A5, следующий кандидат - 6
        assert_eq!(found, Some(vec!["A6".into(), "A7".into()]));
    }

    #[test]
    fn standard_block_may_end_on_last_seat() {
        let found = run(NumberingScheme::Standard, Row::new("A", 4), &["A1"], 3, 0);
        assert_eq!(found, Some(vec!["A2".into(), "A3".into(), "A4".into()]));
        assert_eq!(run(NumberingScheme::Standard, Row::new("A", 4), &["A2"], 3, 0), None);
        assert_eq!(run(NumberingScheme::Standard, Row::new("A", 4), &[], 5, 0), None);
    }

    #[test]
    fn plain_request_never_takes_accessible_seats() {
        let row = Row::new("A", 4).with_accessible([2]);
        assert_eq!(run(NumberingScheme::Standard, row.clone(), &[], 3, 0), None);
        assert_eq!(
            run(NumberingScheme::Standard, row, &[], 2, 0),
            Some(vec!["A3".into(), "A4".into()])
        );
    }

    #[test]
    fn accessible_request_takes_first_block_meeting_quota() {
        let row = Row::new("A", 10).with_accessible([1, 2]);
        assert_eq!(
            run(NumberingScheme::Standard, row.clone(), &[], 2, 1),
            Some(vec!["A2".into(), "A3".into()])
        );
        assert_eq!(
            run(NumberingScheme::Standard, row.clone(), &[], 2, 2),
            Some(vec!["A1".into(), "A2".into()])
        );
        assert_eq!(
            run(NumberingScheme::Standard, row.clone(), &[], 3, 1),
            Some(vec!["A2".into(), "A3".into(), "A4".into()])
        );
        assert_eq!(run(NumberingScheme::Standard, row, &[], 3, 3), None);
    }

    #[test]
    fn french_prefers_lower_sum_side() {
        let found = run(NumberingScheme::FrenchParity, Row::new("A", 10), &[], 2, 0);
        assert_eq!(found, Some(vec!["A1".into(), "A3".into()]));

        let found = run(NumberingScheme::FrenchParity, Row::new("A", 10), &["A1"], 2, 0);
        assert_eq!(found, Some(vec!["A2".into(), "A4".into()]));
    }

    #[test]
    fn french_falls_back_to_only_side_that_fits() {
        // вся нечётная сторона занята
        let found = run(
            NumberingScheme::FrenchParity,
            Row::new("A", 8),
            &["A1", "A3", "A5", "A7"],
            3,
            0,
        );
        assert_eq!(found, Some(vec!["A2".into(), "A4".into(), "A6".into()]));

        // нечётных мест в ряду из 7 - четыре, чётных - три
        let found = run(NumberingScheme::FrenchParity, Row::new("A", 7), &[], 4, 0);
        assert_eq!(found, Some(vec!["A1".into(), "A3".into(), "A5".into(), "A7".into()]));
        assert_eq!(run(NumberingScheme::FrenchParity, Row::new("A", 7), &[], 5, 0), None);
    }

    #[test]
    fn french_accessible_quota_applies_per_side() {
        let row = Row::new("A", 10).with_accessible([4]);
        assert_eq!(
            run(NumberingScheme::FrenchParity, row.clone(), &[], 2, 1),
            Some(vec!["A2".into(), "A4".into()])
        );
        // без запроса МГН чётная сторона стартует после A4
        assert_eq!(
            run(NumberingScheme::FrenchParity, row, &[], 2, 0),
            Some(vec!["A1".into(), "A3".into()])
        );
    }
}
