use chrono::NaiveDateTime;
use sqlx::{PgPool, QueryBuilder};

use super::models::{Activity, ActivityRow};

const ACTIVITY_COLUMNS: &str = "id, occurred_at, kind, distance_meters, duration_seconds, latitude, longitude, elevation_gain_meters";

pub async fn fetch_activities(db: &PgPool) -> Result<Vec<Activity>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ActivityRow>(&format!(
        "SELECT {} FROM activities ORDER BY occurred_at DESC",
        ACTIVITY_COLUMNS
    ))
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Activity::from).collect())
}

pub async fn fetch_activities_since(
    db: &PgPool,
    since: NaiveDateTime,
) -> Result<Vec<Activity>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ActivityRow>(&format!(
        "SELECT {} FROM activities WHERE occurred_at >= $1 ORDER BY occurred_at DESC",
        ACTIVITY_COLUMNS
    ))
    .bind(since)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Activity::from).collect())
}

pub async fn insert_activities(db: &PgPool, activities: &[Activity]) -> Result<u64, sqlx::Error> {
    if activities.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO activities (id, occurred_at, kind, distance_meters, duration_seconds, latitude, longitude, elevation_gain_meters) ",
    );

    builder.push_values(activities, |mut b, activity| {
        b.push_bind(activity.id)
            .push_bind(activity.occurred_at)
            .push_bind(activity.kind.as_str())
            .push_bind(activity.distance_meters)
            .push_bind(activity.duration_seconds)
            .push_bind(activity.latitude)
            .push_bind(activity.longitude)
            .push_bind(activity.elevation_gain_meters);
    });

    let result = builder.build().execute(db).await?;
    Ok(result.rows_affected())
}

/// Parses a clock duration ("MM:SS" or "HH:MM:SS") into seconds.
///
/// The single authoritative definition; event results and manual imports
/// both come through here.
pub fn parse_duration(value: &str) -> Result<f64, String> {
    let parts: Vec<&str> = value.trim().split(':').collect();

    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| format!("Invalid duration: {}", value))?;

    match numbers[..] {
        [minutes, seconds] => Ok(f64::from(minutes * 60 + seconds)),
        [hours, minutes, seconds] => Ok(f64::from(hours * 3600 + minutes * 60 + seconds)),
        _ => Err(format!(
            "Expected MM:SS or HH:MM:SS duration, got: {}",
            value
        )),
    }
}

/// Formats seconds as "MM:SS", switching to "H:MM:SS" from one hour up.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
