use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::utils::parse_duration;

/// A single recorded run or timed-event result. Records are immutable once
/// stored; everything derived from them is recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Activity {
    pub id: Uuid,
    /// Source-local naive time; all day and week bucketing works off this.
    pub occurred_at: NaiveDateTime,
    pub kind: ActivityKind,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation_gain_meters: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Run,
    Event,
}

impl Activity {
    /// Seconds per kilometre. Defined only when distance and duration are
    /// both positive; zero-distance imports never divide.
    pub fn pace_s_per_km(&self) -> Option<f64> {
        if self.distance_meters > 0.0 && self.duration_seconds > 0.0 {
            Some(self.duration_seconds * 1000.0 / self.distance_meters)
        } else {
            None
        }
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        if self.distance_meters > 0.0 && self.duration_seconds > 0.0 {
            Some(self.distance_meters / self.duration_seconds * 3.6)
        } else {
            None
        }
    }

    pub fn local_date(&self) -> NaiveDate {
        self.occurred_at.date()
    }

    pub fn from_new(new: NewActivity) -> Result<Self, String> {
        let duration_seconds = parse_duration(&new.duration)?;

        Ok(Activity {
            id: Uuid::new_v4(),
            occurred_at: new.occurred_at,
            kind: new.kind.unwrap_or(ActivityKind::Run),
            distance_meters: new.distance_meters,
            duration_seconds,
            latitude: new.latitude,
            longitude: new.longitude,
            elevation_gain_meters: new.elevation_gain_meters,
        })
    }
}

/// Ingest payload. Importers deliver durations in the clock form the sources
/// use ("32:09" or "1:02:03"), parsed once on the way in.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewActivity {
    pub occurred_at: NaiveDateTime,
    pub kind: Option<ActivityKind>,
    pub distance_meters: f64,
    pub duration: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation_gain_meters: Option<f64>,
}

/// Raw row shape for the activities table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub occurred_at: NaiveDateTime,
    pub kind: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation_gain_meters: Option<f64>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        let kind = if row.kind.eq_ignore_ascii_case("event") {
            ActivityKind::Event
        } else {
            ActivityKind::Run
        };

        Activity {
            id: row.id,
            occurred_at: row.occurred_at,
            kind,
            distance_meters: row.distance_meters,
            duration_seconds: row.duration_seconds,
            latitude: row.latitude,
            longitude: row.longitude,
            elevation_gain_meters: row.elevation_gain_meters,
        }
    }
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Run => "run",
            ActivityKind::Event => "event",
        }
    }
}
