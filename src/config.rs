use std::env;

use crate::engine::availability::ConflictWindow;
use crate::engine::distance::DEFAULT_MAX_DISTANCE_KM;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub conflict_window_minutes: i64,
    pub max_distance_km: f64,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let config = Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            conflict_window_minutes: parse_or_default("CONFLICT_WINDOW_MINUTES", 60)?,
            max_distance_km: parse_or_default("MAX_DISTANCE_KM", DEFAULT_MAX_DISTANCE_KM)?,
            seed_demo_data: parse_or_default("SEED_DEMO_DATA", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.event_buffer_size == 0 {
            return Err(AppError::Internal(
                "EVENT_BUFFER_SIZE must be > 0".to_string(),
            ));
        }
        if self.conflict_window_minutes < 0 {
            return Err(AppError::Internal(
                "CONFLICT_WINDOW_MINUTES must be >= 0".to_string(),
            ));
        }
        self.conflict_window()?;
        if !self.max_distance_km.is_finite() {
            return Err(AppError::Internal(
                "MAX_DISTANCE_KM must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn conflict_window(&self) -> Result<ConflictWindow, AppError> {
        ConflictWindow::from_minutes(self.conflict_window_minutes).ok_or_else(|| {
            AppError::Internal(format!(
                "CONFLICT_WINDOW_MINUTES out of range: {}",
                self.conflict_window_minutes
            ))
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_or_default, Config};
    use crate::engine::availability::ConflictWindow;
    use crate::error::AppError;

    fn defaults() -> Config {
        Config {
            http_port: 3000,
            log_level: "info".to_string(),
            event_buffer_size: 1024,
            conflict_window_minutes: 60,
            max_distance_km: 20.0,
            seed_demo_data: false,
        }
    }

    #[test]
    fn missing_variable_falls_back_to_default() {
        let value: u16 = parse_or_default("DELIVERY_DISPATCH_TEST_UNSET_PORT", 4242).unwrap();
        assert_eq!(value, 4242);
    }

    #[test]
    fn default_values_are_valid() {
        let config = defaults();
        assert!(config.validate().is_ok());
        assert_eq!(config.conflict_window().unwrap(), ConflictWindow::default());
    }

    #[test]
    fn oversized_conflict_window_is_rejected() {
        let config = Config {
            conflict_window_minutes: i64::MAX,
            ..defaults()
        };
        assert!(matches!(config.validate(), Err(AppError::Internal(_))));
    }

    #[test]
    fn non_finite_distance_bound_is_rejected() {
        for max_distance_km in [f64::INFINITY, f64::NAN] {
            let config = Config {
                max_distance_km,
                ..defaults()
            };
            assert!(matches!(config.validate(), Err(AppError::Internal(_))));
        }
    }

    #[test]
    fn empty_event_buffer_is_rejected() {
        let config = Config {
            event_buffer_size: 0,
            ..defaults()
        };
        assert!(config.validate().is_err());
    }
}
