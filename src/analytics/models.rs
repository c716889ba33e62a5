use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rolled-up view over a set of activities.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Summary {
    pub total_count: u32,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    pub average_distance_m: f64,
    /// Unweighted mean of per-activity paces, not distance-weighted.
    pub average_pace_s_per_km: f64,
    pub average_speed_kmh: f64,
    pub longest_distance_m: f64,
    /// None when there are no activities at all.
    pub most_frequent_weekday: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TrendPoint {
    pub period_start: NaiveDate,
    pub average_pace_s_per_km: f64,
    pub activity_count: u32,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConsistencyStats {
    pub period_days: i64,
    pub activities_in_period: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub avg_per_week: f64,
    pub days_since_last: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LocationCluster {
    pub latitude: f64,
    pub longitude: f64,
    pub run_count: u32,
    pub total_distance_m: f64,
    pub avg_distance_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecordEntry {
    pub value: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PersonalRecords {
    /// Longest single activity, metres.
    pub longest_distance: Option<RecordEntry>,
    /// Best pace over >= 5 km, extrapolated to exactly 5000 m, seconds.
    pub fastest_5k: Option<RecordEntry>,
    /// Best pace over >= 10 km, extrapolated to exactly 10000 m, seconds.
    pub fastest_10k: Option<RecordEntry>,
    /// Most elevation gain in one activity, metres.
    pub most_elevation: Option<RecordEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PacePrediction {
    pub predicted_seconds: f64,
    pub predicted_time: String,
    pub confidence: Confidence,
    pub sample_size: u32,
}
