use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::LayoutError;
use crate::placement::numbering::{self, RowOrdering};

/// Схема нумерации мест в ряду.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingScheme {
    /// 1, 2, 3 ... слева направо, без прохода.
    #[default]
    Standard,
    /// Нечётные по одну сторону прохода, чётные по другую, младшие номера у прохода.
    FrenchParity,
}

/// Ряд зала. Порядок рядов в плане - спереди назад, он же приоритет поиска.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub seat_count: u32,
    #[serde(default)]
    pub accessible_seats: BTreeSet<u32>,
}

impl Row {
    pub fn new(id: impl Into<String>, seat_count: u32) -> Self {
        Self {
            id: id.into(),
            seat_count,
            accessible_seats: BTreeSet::new(),
        }
    }

    pub fn with_accessible(mut self, seats: impl IntoIterator<Item = u32>) -> Self {
        self.accessible_seats.extend(seats);
        self
    }

    pub fn is_accessible(&self, number: u32) -> bool {
        self.accessible_seats.contains(&number)
    }
}

/// План зала: ряды, схема нумерации и политика мест для сопровождающих.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueLayout {
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub numbering: NumberingScheme,
    /// Если включено, каждое место для МГН занимает ещё и соседнее место сопровождающего.
    #[serde(default)]
    pub accessible_consumes_companion_seat: bool,
}

impl VenueLayout {
    pub fn new(rows: Vec<Row>, numbering: NumberingScheme) -> Self {
        Self {
            rows,
            numbering,
            accessible_consumes_companion_seat: false,
        }
    }

    pub fn with_companion_seats(mut self, enabled: bool) -> Self {
        self.accessible_consumes_companion_seat = enabled;
        self
    }

    /// Разбирает план из JSON и сразу проверяет его.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        let layout: VenueLayout = serde_json::from_str(raw)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Проверка при редактировании плана: движок рассчитывает на корректный план.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();

        for (index, row) in self.rows.iter().enumerate() {
            if row.id.is_empty() {
                return Err(LayoutError::EmptyRowLabel { index });
            }
            if !row.id.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(LayoutError::InvalidRowLabel(row.id.clone()));
            }
            if !seen.insert(row.id.as_str()) {
                return Err(LayoutError::DuplicateRow(row.id.clone()));
            }
            if row.seat_count == 0 {
                return Err(LayoutError::EmptyRow(row.id.clone()));
            }
            if let Some(&seat) = row
                .accessible_seats
                .iter()
                .find(|&&seat| seat == 0 || seat > row.seat_count)
            {
                return Err(LayoutError::AccessibleSeatOutOfRange {
                    row: row.id.clone(),
                    seat,
                    seat_count: row.seat_count,
                });
            }
        }

        Ok(())
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Есть ли такое место в плане.
    pub fn contains_seat(&self, row: &str, number: u32) -> bool {
        self.row(row)
            .map(|r| number >= 1 && number <= r.seat_count)
            .unwrap_or(false)
    }

    pub fn physical_seat_count(&self) -> u32 {
        self.rows.iter().map(|row| row.seat_count).sum()
    }

    pub fn accessible_seat_count(&self) -> u32 {
        self.rows.iter().map(|row| row.accessible_seats.len() as u32).sum()
    }

    /// Добавляет `count` рядов по `seats_per_row` мест с очередными метками.
    pub fn push_rows(&mut self, count: usize, seats_per_row: u32) {
        for _ in 0..count {
            let label = next_row_label(self.rows.last().map(|row| row.id.as_str()));
            self.rows.push(Row::new(label, seats_per_row));
        }
    }

    /// Порядок мест ряда так, как он выглядит в зале.
    pub fn physical_order(&self, row: &Row) -> RowOrdering {
        numbering::row_ordering(self.numbering, row.seat_count)
    }
}

/// Следующая метка ряда: A, B, ..., Z, AA, AB, ..., AZ, BA, ...
pub fn next_row_label(previous: Option<&str>) -> String {
    let previous = match previous {
        Some(label) if !label.is_empty() => label,
        _ => return "A".to_string(),
    };

    let mut letters: Vec<u8> = previous.bytes().collect();
    let mut i = letters.len();
    loop {
        if i == 0 {
            letters.insert(0, b'A');
            break;
        }
        i -= 1;
        if letters[i] >= b'Z' {
            letters[i] = b'A';
        } else {
            letters[i] += 1;
            break;
        }
    }

    String::from_utf8(letters).unwrap_or_else(|_| "A".to_string())
}
