use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::activities::models::{Activity, ActivityKind};
use crate::activities::utils::format_duration;

use super::models::{
    Confidence, ConsistencyStats, LocationCluster, PacePrediction, PersonalRecords, RecordEntry,
    Summary, TrendPeriod, TrendPoint,
};

/// Sunday-first, the order weekday ties resolve in.
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const PREDICTION_SAMPLE: usize = 20;
pub const PREDICTION_MIN_DISTANCE_M: f64 = 4000.0;
pub const DEFAULT_CLUSTER_PRECISION: u32 = 4;

/// Monday on or before the given date. Every weekly bucket in the crate
/// uses this one convention.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn summarize(activities: &[Activity], lookback_days: Option<i64>, now: NaiveDateTime) -> Summary {
    let window: Vec<&Activity> = match lookback_days {
        Some(days) => {
            let cutoff = now - Duration::days(days);
            activities.iter().filter(|a| a.occurred_at >= cutoff).collect()
        }
        None => activities.iter().collect(),
    };

    let total_count = window.len() as u32;
    let total_distance_m: f64 = window.iter().map(|a| a.distance_meters).sum();
    let total_duration_s: f64 = window.iter().map(|a| a.duration_seconds).sum();

    let average_distance_m = if total_count > 0 {
        total_distance_m / f64::from(total_count)
    } else {
        0.0
    };

    let paces: Vec<f64> = window.iter().filter_map(|a| a.pace_s_per_km()).collect();
    let speeds: Vec<f64> = window.iter().filter_map(|a| a.speed_kmh()).collect();

    let longest_distance_m = window
        .iter()
        .map(|a| a.distance_meters)
        .fold(0.0, f64::max);

    let mut by_weekday = [0u32; 7];
    for activity in &window {
        by_weekday[activity.occurred_at.weekday().num_days_from_sunday() as usize] += 1;
    }

    let mut most_frequent_weekday = None;
    let mut best = 0u32;
    for (i, &count) in by_weekday.iter().enumerate() {
        if count > best {
            best = count;
            most_frequent_weekday = Some(WEEKDAY_NAMES[i].to_string());
        }
    }

    Summary {
        total_count,
        total_distance_m,
        total_duration_s,
        average_distance_m,
        average_pace_s_per_km: mean(&paces),
        average_speed_kmh: mean(&speeds),
        longest_distance_m,
        most_frequent_weekday,
    }
}

/// Chronological pace series, one point per calendar week or month that has
/// at least one activity. Empty periods are omitted, not zero-filled.
pub fn pace_trend(activities: &[Activity], period: TrendPeriod) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, (Vec<f64>, u32)> = BTreeMap::new();

    for activity in activities {
        let day = activity.local_date();
        let key = match period {
            TrendPeriod::Weekly => week_start(day),
            TrendPeriod::Monthly => month_start(day),
        };

        let entry = buckets.entry(key).or_default();
        if let Some(pace) = activity.pace_s_per_km() {
            entry.0.push(pace);
        }
        // Zero-distance activities still count toward the bucket size.
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(period_start, (paces, activity_count))| TrendPoint {
            period_start,
            average_pace_s_per_km: mean(&paces),
            activity_count,
        })
        .collect()
}

pub fn consistency(
    activities: &[Activity],
    include_events: bool,
    lookback_days: i64,
    today: NaiveDate,
) -> ConsistencyStats {
    let qualifying: Vec<&Activity> = activities
        .iter()
        .filter(|a| include_events || a.kind == ActivityKind::Run)
        .collect();

    let cutoff = today - Duration::days(lookback_days);
    let in_period: Vec<&&Activity> = qualifying
        .iter()
        .filter(|a| a.local_date() >= cutoff)
        .collect();

    let windowed_dates: BTreeSet<NaiveDate> = in_period.iter().map(|a| a.local_date()).collect();
    let all_dates: BTreeSet<NaiveDate> = qualifying.iter().map(|a| a.local_date()).collect();

    // Walk back from the most recent windowed date, one calendar day at a
    // time, until the first gap.
    let current_streak = match windowed_dates.iter().next_back() {
        None => 0,
        Some(&latest) => {
            let mut streak = 1u32;
            let mut day = latest;
            while windowed_dates.contains(&(day - Duration::days(1))) {
                streak += 1;
                day = day - Duration::days(1);
            }
            streak
        }
    };

    // Longest run of consecutive days over the full history, window ignored.
    let mut longest_streak = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &date in &all_dates {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        prev = Some(date);
    }

    let days_since_last = all_dates
        .iter()
        .next_back()
        .map(|&d| (today - d).num_days())
        .unwrap_or(lookback_days);

    let avg_per_week = round1(in_period.len() as f64 / (lookback_days as f64 / 7.0));

    ConsistencyStats {
        period_days: lookback_days,
        activities_in_period: in_period.len() as u32,
        current_streak,
        longest_streak,
        avg_per_week,
        days_since_last,
    }
}

/// Groups activities by start coordinates rounded to `precision_digits`
/// decimal places (about 11 m at four digits). Two activities share a
/// cluster iff both rounded coordinates are equal; there is no
/// proximity-based merging.
pub fn cluster_by_location(activities: &[Activity], precision_digits: u32) -> Vec<LocationCluster> {
    let factor = 10f64.powi(precision_digits as i32);
    let mut clusters: HashMap<(i64, i64), (u32, f64)> = HashMap::new();

    for activity in activities {
        let (lat, lon) = match (activity.latitude, activity.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => continue,
        };

        let key = ((lat * factor).round() as i64, (lon * factor).round() as i64);
        let entry = clusters.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += activity.distance_meters;
    }

    let mut result: Vec<LocationCluster> = clusters
        .into_iter()
        .map(|((lat_key, lon_key), (run_count, total_distance_m))| LocationCluster {
            latitude: lat_key as f64 / factor,
            longitude: lon_key as f64 / factor,
            run_count,
            total_distance_m,
            avg_distance_m: total_distance_m / f64::from(run_count),
        })
        .collect();

    result.sort_by(|a, b| {
        b.run_count
            .cmp(&a.run_count)
            .then_with(|| a.latitude.partial_cmp(&b.latitude).unwrap_or(Ordering::Equal))
            .then_with(|| a.longitude.partial_cmp(&b.longitude).unwrap_or(Ordering::Equal))
    });

    result
}

/// The 5k and 10k records compare paces extrapolated to the exact record
/// distance rather than raw elapsed times, so a fast 6 km run can hold the
/// 5k record. First activity encountered wins ties.
pub fn personal_records(activities: &[Activity]) -> PersonalRecords {
    let mut records = PersonalRecords::default();

    for activity in activities {
        let date = activity.local_date();

        if activity.distance_meters > 0.0
            && records
                .longest_distance
                .as_ref()
                .map_or(true, |r| activity.distance_meters > r.value)
        {
            records.longest_distance = Some(RecordEntry {
                value: activity.distance_meters,
                date,
            });
        }

        if let Some(pace) = activity.pace_s_per_km() {
            if activity.distance_meters >= 5000.0 {
                let time = pace * 5.0;
                if records.fastest_5k.as_ref().map_or(true, |r| time < r.value) {
                    records.fastest_5k = Some(RecordEntry { value: time, date });
                }
            }

            if activity.distance_meters >= 10000.0 {
                let time = pace * 10.0;
                if records.fastest_10k.as_ref().map_or(true, |r| time < r.value) {
                    records.fastest_10k = Some(RecordEntry { value: time, date });
                }
            }
        }

        if let Some(elevation) = activity.elevation_gain_meters {
            if records
                .most_elevation
                .as_ref()
                .map_or(true, |r| elevation > r.value)
            {
                records.most_elevation = Some(RecordEntry {
                    value: elevation,
                    date,
                });
            }
        }
    }

    records
}

/// Extrapolates a 5k estimate from the paces of recent longer efforts.
/// Returns None when there is nothing to extrapolate from.
pub fn predict_5k(activities: &[Activity]) -> Option<PacePrediction> {
    let mut recent: Vec<&Activity> = activities.iter().collect();
    recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    let paces: Vec<f64> = recent
        .iter()
        .take(PREDICTION_SAMPLE)
        .filter(|a| a.distance_meters >= PREDICTION_MIN_DISTANCE_M)
        .filter_map(|a| a.pace_s_per_km())
        .collect();

    if paces.is_empty() {
        return None;
    }

    let predicted_seconds = mean(&paces) * 5.0;

    let confidence = if paces.len() >= 10 {
        Confidence::High
    } else if paces.len() >= 5 {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    Some(PacePrediction {
        predicted_seconds,
        predicted_time: format_duration(predicted_seconds),
        confidence,
        sample_size: paces.len() as u32,
    })
}
