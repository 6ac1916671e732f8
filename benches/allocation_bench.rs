use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seat_planner::allocate;
use seat_planner::models::{next_row_label, BookingRequest, NumberingScheme, Occupancy, Row, SeatId, VenueLayout};

// Зал на 30 рядов по 40 мест, занят каждый третий ряд через место
fn big_hall(numbering: NumberingScheme) -> (VenueLayout, Occupancy) {
    let mut rows = Vec::new();
    for _ in 0..30 {
        let label = next_row_label(rows.last().map(|row: &Row| row.id.as_str()));
        rows.push(Row::new(label, 40).with_accessible([1, 2, 39, 40]));
    }

    let occupancy = rows
        .iter()
        .enumerate()
        .filter(|(index, _)| index % 3 != 2)
        .flat_map(|(_, row)| (1..=row.seat_count).step_by(2).map(|n| SeatId::new(row.id.as_str(), n)))
        .collect();

    (VenueLayout::new(rows, numbering), occupancy)
}

fn bench_allocate(c: &mut Criterion) {
    let (standard, occupancy) = big_hall(NumberingScheme::Standard);
    c.bench_function("allocate_standard_group_of_4", |b| {
        b.iter(|| allocate(black_box(&standard), black_box(&occupancy), &BookingRequest::new(4)))
    });
    c.bench_function("allocate_standard_accessible_pair", |b| {
        b.iter(|| allocate(black_box(&standard), black_box(&occupancy), &BookingRequest::accessible(2, 1)))
    });

    let (french, occupancy) = big_hall(NumberingScheme::FrenchParity);
    c.bench_function("allocate_french_group_of_6", |b| {
        b.iter(|| allocate(black_box(&french), black_box(&occupancy), &BookingRequest::new(6)))
    });

    let full: Occupancy = standard
        .rows
        .iter()
        .flat_map(|row| (1..=row.seat_count).map(|n| SeatId::new(row.id.as_str(), n)))
        .collect();
    c.bench_function("allocate_full_hall_unsatisfiable", |b| {
        b.iter(|| allocate(black_box(&standard), black_box(&full), &BookingRequest::new(2)))
    });
}

criterion_group!(benches, bench_allocate);
criterion_main!(benches);
