use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::activities::models::Activity;
use crate::analytics::utils::week_start;
use crate::config::WeeklyEventConfig;

use super::models::{
    RecommendationResponse, RecommendedRun, RunType, ScheduleError, WeeklyPlan, MAX_GOAL_WEEKLY_KM,
    MAX_WEEKS_AHEAD, MIN_GOAL_WEEKLY_KM, MIN_WEEKS_AHEAD,
};

/// History window the plan is inferred from: the last 8 weeks.
pub const HISTORY_DAYS: i64 = 56;

/// A weekday must carry at least this share of recent activities to count
/// as a preferred training day.
const PREFERRED_DAY_SHARE: f64 = 0.2;

const MIN_WEEKLY_TARGET_KM: f64 = 5.0;
const WEEKLY_GROWTH: f64 = 1.1;

const LONG_RUN_SHARE: f64 = 0.25;
const TEMPO_RUN_SHARE: f64 = 0.15;
const EASY_RUN_SHARE: f64 = 0.30;
const EASY_RUN_CAP_KM: f64 = 10.0;

const EASY_PACE_MIN_PER_KM: f64 = 6.0;
const TEMPO_PACE_MIN_PER_KM: f64 = 5.0;

/// Hard efforts want at least this many days between them.
const MIN_HARD_EFFORT_GAP_DAYS: i32 = 2;

const DEFAULT_TRAINING_DAYS: [Weekday; 4] =
    [Weekday::Mon, Weekday::Wed, Weekday::Fri, Weekday::Sun];

pub fn generate_schedule(
    activities: &[Activity],
    weeks_ahead: u32,
    goal_weekly_km: Option<f64>,
    event: &WeeklyEventConfig,
    today: NaiveDate,
) -> Result<RecommendationResponse, ScheduleError> {
    if !(MIN_WEEKS_AHEAD..=MAX_WEEKS_AHEAD).contains(&weeks_ahead) {
        return Err(ScheduleError::Validation(format!(
            "weeks_ahead must be between {} and {}, got {}",
            MIN_WEEKS_AHEAD, MAX_WEEKS_AHEAD, weeks_ahead
        )));
    }

    if let Some(goal) = goal_weekly_km {
        if !(MIN_GOAL_WEEKLY_KM..=MAX_GOAL_WEEKLY_KM).contains(&goal) {
            return Err(ScheduleError::Validation(format!(
                "goal_weekly_km must be between {} and {}, got {}",
                MIN_GOAL_WEEKLY_KM, MAX_GOAL_WEEKLY_KM, goal
            )));
        }
    }

    let cutoff = today - Duration::days(HISTORY_DAYS);
    let recent: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.local_date() >= cutoff)
        .collect();

    let buckets = weekly_buckets(&recent);
    let weekly_average_km = if buckets.is_empty() {
        0.0
    } else {
        buckets.values().map(|(km, _)| km).sum::<f64>() / buckets.len() as f64
    };
    let runs_per_week = if buckets.is_empty() {
        0.0
    } else {
        buckets.values().map(|(_, count)| f64::from(*count)).sum::<f64>() / buckets.len() as f64
    };

    let preferred = preferred_days(&recent, event);
    let day_names: Vec<String> = preferred.iter().map(|d| weekday_name(*d).to_string()).collect();

    let base_target = goal_weekly_km
        .unwrap_or_else(|| weekly_average_km.round())
        .max(MIN_WEEKLY_TARGET_KM);

    // Plans start on the Monday after today.
    let first_week = week_start(today) + Duration::days(7);

    let mut plans = Vec::with_capacity(weeks_ahead as usize);
    for week in 0..weeks_ahead {
        let mut target = (base_target * WEEKLY_GROWTH.powi(week as i32)).round();
        if let Some(goal) = goal_weekly_km {
            target = target.min(goal);
        }

        let start = first_week + Duration::days(i64::from(week) * 7);
        plans.push(plan_week(start, target, &preferred, event));
    }

    let rationale = format!(
        "Averaged {:.1} km across {:.1} runs per week over the last 8 weeks. Training days: {}.",
        weekly_average_km,
        runs_per_week,
        day_names.join(", ")
    );

    Ok(RecommendationResponse {
        weeks_ahead,
        weekly_average_km: round1(weekly_average_km),
        runs_per_week: round1(runs_per_week),
        preferred_days: day_names,
        rationale,
        plans,
    })
}

/// Total kilometres and activity count per calendar week, weeks with no
/// activities omitted.
fn weekly_buckets(activities: &[&Activity]) -> BTreeMap<NaiveDate, (f64, u32)> {
    let mut buckets: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();

    for activity in activities {
        let entry = buckets.entry(week_start(activity.local_date())).or_default();
        entry.0 += activity.distance_meters / 1000.0;
        entry.1 += 1;
    }

    buckets
}

/// Weekdays carrying at least 20% of recent activities, falling back to a
/// fixed four-day pattern when the history is too thin to infer from. The
/// weekly event day is always included while the event source is enabled.
fn preferred_days(recent: &[&Activity], event: &WeeklyEventConfig) -> Vec<Weekday> {
    let mut counts = [0u32; 7];
    for activity in recent {
        counts[activity.occurred_at.weekday().num_days_from_monday() as usize] += 1;
    }
    let total: u32 = counts.iter().sum();

    let mut days: Vec<Weekday> = Vec::new();
    if total > 0 {
        for (index, &count) in counts.iter().enumerate() {
            if f64::from(count) / f64::from(total) >= PREFERRED_DAY_SHARE {
                days.push(weekday_from_monday_index(index));
            }
        }
    }

    if days.len() < 2 {
        days = DEFAULT_TRAINING_DAYS.to_vec();
    }

    if event.enabled && !days.contains(&event.weekday) {
        days.push(event.weekday);
        days.sort_by_key(|d| d.num_days_from_monday());
    }

    days
}

fn plan_week(
    start: NaiveDate,
    target_km: f64,
    preferred: &[Weekday],
    event: &WeeklyEventConfig,
) -> WeeklyPlan {
    let mut runs: Vec<RecommendedRun> = Vec::new();
    let mut pool: Vec<Weekday> = preferred.to_vec();
    let mut effective = target_km;

    if event.enabled {
        effective = (effective - event.distance_km).max(0.0);
        pool.retain(|d| *d != event.weekday);
        runs.push(RecommendedRun {
            date: date_on(start, event.weekday),
            run_type: RunType::Event,
            distance_km: Some(event.distance_km),
            duration_minutes: Some(event.distance_km * TEMPO_PACE_MIN_PER_KM),
            notes: "Weekly timed event".to_string(),
        });
    }

    if effective <= 0.0 {
        // The event already covers the whole target; everything else rests.
        for day in pool {
            runs.push(rest_day(start, day));
        }
        runs.sort_by_key(|r| r.date);
        return WeeklyPlan {
            week_start: start,
            target_distance_km: target_km,
            runs,
        };
    }

    // Long run lands on a weekend day when one is available.
    let long_day = pool
        .iter()
        .copied()
        .find(|d| matches!(d, Weekday::Sat | Weekday::Sun))
        .or_else(|| pool.first().copied());

    if let Some(day) = long_day {
        pool.retain(|d| *d != day);
        runs.push(RecommendedRun {
            date: date_on(start, day),
            run_type: RunType::Long,
            distance_km: Some((effective * LONG_RUN_SHARE).round()),
            duration_minutes: Some((effective * LONG_RUN_SHARE).round() * EASY_PACE_MIN_PER_KM),
            notes: "Long steady run, keep it comfortable".to_string(),
        });
    }

    // Tempo goes at least two days from the long run where the pool allows.
    if !pool.is_empty() {
        let tempo_day = long_day
            .and_then(|ld| {
                pool.iter()
                    .copied()
                    .find(|d| circular_day_gap(*d, ld) >= MIN_HARD_EFFORT_GAP_DAYS)
            })
            .unwrap_or(pool[0]);
        pool.retain(|d| *d != tempo_day);

        let distance = (effective * TEMPO_RUN_SHARE).round();
        runs.push(RecommendedRun {
            date: date_on(start, tempo_day),
            run_type: RunType::Tempo,
            distance_km: Some(distance),
            duration_minutes: Some(distance * TEMPO_PACE_MIN_PER_KM),
            notes: "Tempo effort, comfortably hard".to_string(),
        });
    }

    let desired_easy = ((effective / 8.0).round() as usize).max(2);
    let easy_count = desired_easy.min(pool.len());
    let easy_distance = (effective * EASY_RUN_SHARE).round().min(EASY_RUN_CAP_KM);

    for day in pool.drain(..easy_count) {
        runs.push(RecommendedRun {
            date: date_on(start, day),
            run_type: RunType::Easy,
            distance_km: Some(easy_distance),
            duration_minutes: Some(easy_distance * EASY_PACE_MIN_PER_KM),
            notes: "Easy conversational pace".to_string(),
        });
    }

    for day in pool {
        runs.push(rest_day(start, day));
    }

    runs.sort_by_key(|r| r.date);

    WeeklyPlan {
        week_start: start,
        target_distance_km: target_km,
        runs,
    }
}

fn rest_day(start: NaiveDate, day: Weekday) -> RecommendedRun {
    RecommendedRun {
        date: date_on(start, day),
        run_type: RunType::Rest,
        distance_km: None,
        duration_minutes: None,
        notes: "Rest day".to_string(),
    }
}

fn date_on(week_start: NaiveDate, day: Weekday) -> NaiveDate {
    week_start + Duration::days(i64::from(day.num_days_from_monday()))
}

/// Distance between two weekdays accounting for week wrap-around.
fn circular_day_gap(a: Weekday, b: Weekday) -> i32 {
    let diff = (a.num_days_from_monday() as i32 - b.num_days_from_monday() as i32).abs();
    diff.min(7 - diff)
}

fn weekday_from_monday_index(index: usize) -> Weekday {
    match index {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
