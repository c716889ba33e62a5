use std::env;

use chrono::Weekday;

/// Process configuration, resolved once at startup and passed around as an
/// immutable value.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub weekly_event: WeeklyEventConfig,
}

/// The recurring fixed-distance community event (a Saturday timed 5k).
/// When enabled it is folded into schedule generation.
#[derive(Debug, Clone)]
pub struct WeeklyEventConfig {
    pub enabled: bool,
    pub weekday: Weekday,
    pub distance_km: f64,
}

impl WeeklyEventConfig {
    pub fn disabled() -> Self {
        WeeklyEventConfig {
            enabled: false,
            weekday: Weekday::Sat,
            distance_km: 5.0,
        }
    }

    pub fn enabled() -> Self {
        WeeklyEventConfig {
            enabled: true,
            ..WeeklyEventConfig::disabled()
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let event_enabled = env::var("WEEKLY_EVENT_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let weekly_event = if event_enabled {
            WeeklyEventConfig::enabled()
        } else {
            WeeklyEventConfig::disabled()
        };

        AppConfig {
            bind_addr,
            weekly_event,
        }
    }
}
