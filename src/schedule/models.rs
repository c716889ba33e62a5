use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

pub const MIN_WEEKS_AHEAD: u32 = 1;
pub const MAX_WEEKS_AHEAD: u32 = 12;
pub const MIN_GOAL_WEEKLY_KM: f64 = 5.0;
pub const MAX_GOAL_WEEKLY_KM: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    Easy,
    Long,
    Tempo,
    Rest,
    Event,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecommendedRun {
    pub date: NaiveDate,
    pub run_type: RunType,
    /// Absent for rest days.
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WeeklyPlan {
    pub week_start: NaiveDate,
    pub target_distance_km: f64,
    pub runs: Vec<RecommendedRun>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecommendationResponse {
    pub weeks_ahead: u32,
    /// Mean weekly distance over the 8-week history window.
    pub weekly_average_km: f64,
    pub runs_per_week: f64,
    pub preferred_days: Vec<String>,
    pub rationale: String,
    pub plans: Vec<WeeklyPlan>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ScheduleQuery {
    #[validate(range(min = 1, max = 12))]
    pub weeks_ahead: u32,
    #[validate(range(min = 5.0, max = 200.0))]
    pub goal_weekly_km: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("{0}")]
    Validation(String),
}
