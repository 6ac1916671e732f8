use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Идентификатор места: метка ряда + номер места ("A5", "AB12").
///
/// Строковое представление только производное, храним пару (ряд, номер),
/// чтобы многобуквенные ряды не давали неоднозначного разбора.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    row: String,
    number: u32,
}

impl SeatId {
    pub fn new(row: impl Into<String>, number: u32) -> Self {
        Self { row: row.into(), number }
    }

    pub fn row(&self) -> &str {
        &self.row
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid seat identifier `{0}`")]
pub struct ParseSeatIdError(pub String);

impl FromStr for SeatId {
    type Err = ParseSeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ParseSeatIdError(s.to_string()))?;
        let (row, digits) = s.split_at(split);

        if row.is_empty() || !row.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ParseSeatIdError(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseSeatIdError(s.to_string()));
        }

        let number: u32 = digits.parse().map_err(|_| ParseSeatIdError(s.to_string()))?;
        if number == 0 {
            return Err(ParseSeatIdError(s.to_string()));
        }

        Ok(SeatId::new(row, number))
    }
}

impl Serialize for SeatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Занятые места мероприятия. Движок только читает этот набор.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Occupancy {
    seats: HashSet<SeatId>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Разбирает строковые идентификаторы; нераспознанные пропускаются.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seats = HashSet::new();
        for label in labels {
            match label.as_ref().parse::<SeatId>() {
                Ok(seat) => {
                    seats.insert(seat);
                }
                Err(e) => tracing::warn!("Ignoring occupied seat: {}", e),
            }
        }
        Self { seats }
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        self.seats.contains(seat)
    }

    pub fn is_taken(&self, row: &str, number: u32) -> bool {
        // Небольшая аллокация на проверку, ряды короткие
        self.seats.contains(&SeatId::new(row, number))
    }

    pub fn insert(&mut self, seat: SeatId) -> bool {
        self.seats.insert(seat)
    }

    pub fn remove(&mut self, seat: &SeatId) -> bool {
        self.seats.remove(seat)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatId> {
        self.seats.iter()
    }

    /// Отсортированный список, удобен для вывода и сравнения.
    pub fn sorted(&self) -> Vec<SeatId> {
        let mut seats: Vec<SeatId> = self.seats.iter().cloned().collect();
        seats.sort();
        seats
    }
}

impl FromIterator<SeatId> for Occupancy {
    fn from_iter<T: IntoIterator<Item = SeatId>>(iter: T) -> Self {
        Self { seats: iter.into_iter().collect() }
    }
}

impl Extend<SeatId> for Occupancy {
    fn extend<T: IntoIterator<Item = SeatId>>(&mut self, iter: T) {
        self.seats.extend(iter);
    }
}
