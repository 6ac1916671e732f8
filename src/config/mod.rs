use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Ограничения бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub max_seats_per_booking: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { max_seats_per_booking: 10 }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "seat_planner=info".to_string()),
            },
            booking: BookingConfig {
                max_seats_per_booking: parse_var("MAX_SEATS_PER_BOOKING", "10")?,
            },
        })
    }
}

fn parse_var(name: &'static str, default: &str) -> Result<u32, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        assert_eq!(parse_var("SEAT_PLANNER_TEST_UNSET_VAR", "10").unwrap(), 10);
        assert_eq!(BookingConfig::default().max_seats_per_booking, 10);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = parse_var("SEAT_PLANNER_TEST_UNSET_VAR", "ten").unwrap_err();
        assert!(err.to_string().contains("SEAT_PLANNER_TEST_UNSET_VAR"));
    }
}
