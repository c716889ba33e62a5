use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use runstats_api::activities::models::{Activity, ActivityKind};
use runstats_api::config::WeeklyEventConfig;
use runstats_api::schedule::models::{RunType, ScheduleError};
use runstats_api::schedule::utils::generate_schedule;
use uuid::Uuid;

fn create_run(date_str: &str, distance_m: f64) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        occurred_at: NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S").unwrap(),
        kind: ActivityKind::Run,
        distance_meters: distance_m,
        duration_seconds: distance_m * 0.3,
        latitude: None,
        longitude: None,
        elevation_gain_meters: None,
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Eight consecutive weeks with one 20 km run each, all Wednesdays.
fn steady_history() -> Vec<Activity> {
    [
        "2024-01-10", "2024-01-17", "2024-01-24", "2024-01-31", "2024-02-07", "2024-02-14",
        "2024-02-21", "2024-02-28",
    ]
    .iter()
    .map(|d| create_run(&format!("{} 08:00:00", d), 20000.0))
    .collect()
}

fn today() -> NaiveDate {
    // A Monday, so plan weeks are easy to reason about.
    ymd(2024, 3, 4)
}

#[test]
fn test_out_of_range_parameters_are_rejected() {
    let event = WeeklyEventConfig::disabled();

    for weeks in [0u32, 13] {
        let err = generate_schedule(&[], weeks, None, &event, today()).unwrap_err();
        let ScheduleError::Validation(message) = err;
        assert!(message.contains("weeks_ahead"));
    }

    for goal in [4.9f64, 200.1] {
        let err = generate_schedule(&[], 4, Some(goal), &event, today()).unwrap_err();
        let ScheduleError::Validation(message) = err;
        assert!(message.contains("goal_weekly_km"));
    }
}

#[test]
fn test_target_progression_follows_the_ten_percent_rule() {
    let response = generate_schedule(
        &steady_history(),
        3,
        None,
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    assert_eq!(response.weekly_average_km, 20.0);
    assert_eq!(response.runs_per_week, 1.0);

    assert_eq!(response.plans.len(), 3);
    assert_eq!(response.plans[0].target_distance_km, 20.0);
    assert_eq!(response.plans[1].target_distance_km, 22.0);
    assert_eq!(response.plans[2].target_distance_km, 24.0);
}

#[test]
fn test_plans_start_on_the_monday_after_today() {
    let response = generate_schedule(
        &steady_history(),
        2,
        None,
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    assert_eq!(response.plans[0].week_start, ymd(2024, 3, 11));
    assert_eq!(response.plans[1].week_start, ymd(2024, 3, 18));

    for plan in &response.plans {
        let mut previous = None;
        for run in &plan.runs {
            assert!(run.date >= plan.week_start);
            assert!(run.date < plan.week_start + chrono::Duration::days(7));
            if let Some(prev) = previous {
                assert!(run.date > prev);
            }
            previous = Some(run.date);
        }
    }
}

#[test]
fn test_thin_history_falls_back_to_default_training_days() {
    let response = generate_schedule(&[], 1, None, &WeeklyEventConfig::disabled(), today()).unwrap();

    assert_eq!(response.weekly_average_km, 0.0);
    assert_eq!(response.runs_per_week, 0.0);
    assert_eq!(
        response.preferred_days,
        vec!["Monday", "Wednesday", "Friday", "Sunday"]
    );
    // With no history the target floors at the 5 km minimum.
    assert_eq!(response.plans[0].target_distance_km, 5.0);
}

#[test]
fn test_goal_caps_every_week() {
    let response = generate_schedule(
        &steady_history(),
        5,
        Some(20.0),
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    for plan in &response.plans {
        assert_eq!(plan.target_distance_km, 20.0);
    }
}

#[test]
fn test_long_run_is_a_quarter_of_target_on_a_weekend_day() {
    let response = generate_schedule(
        &[],
        1,
        Some(20.0),
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    let plan = &response.plans[0];
    let long = plan
        .runs
        .iter()
        .find(|r| r.run_type == RunType::Long)
        .unwrap();

    assert_eq!(long.date.weekday(), Weekday::Sun);
    assert_eq!(long.distance_km, Some((20.0f64 * 0.25).round()));
    assert_eq!(long.duration_minutes, Some(5.0 * 6.0));
}

#[test]
fn test_tempo_keeps_two_days_from_the_long_run() {
    let response = generate_schedule(
        &[],
        1,
        Some(20.0),
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    let plan = &response.plans[0];
    let tempo = plan
        .runs
        .iter()
        .find(|r| r.run_type == RunType::Tempo)
        .unwrap();

    // Long run sits on Sunday; Monday is only one day away around the week
    // boundary, Wednesday is the first day far enough.
    assert_eq!(tempo.date.weekday(), Weekday::Wed);
    assert_eq!(tempo.distance_km, Some(3.0));
}

#[test]
fn test_easy_runs_never_exceed_ten_kilometres() {
    let response = generate_schedule(
        &[],
        1,
        Some(200.0),
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    let plan = &response.plans[0];
    let easies: Vec<_> = plan
        .runs
        .iter()
        .filter(|r| r.run_type == RunType::Easy)
        .collect();

    assert!(!easies.is_empty());
    for easy in easies {
        assert_eq!(easy.distance_km, Some(10.0));
    }

    let long = plan
        .runs
        .iter()
        .find(|r| r.run_type == RunType::Long)
        .unwrap();
    assert_eq!(long.distance_km, Some(50.0));
}

#[test]
fn test_weekly_event_owns_its_day() {
    let response = generate_schedule(
        &[],
        3,
        Some(20.0),
        &WeeklyEventConfig::enabled(),
        today(),
    )
    .unwrap();

    for plan in &response.plans {
        let events: Vec<_> = plan
            .runs
            .iter()
            .filter(|r| r.run_type == RunType::Event)
            .collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date.weekday(), Weekday::Sat);
        assert_eq!(events[0].distance_km, Some(5.0));

        // Nothing else lands on the event day.
        let on_saturday = plan
            .runs
            .iter()
            .filter(|r| r.date.weekday() == Weekday::Sat)
            .count();
        assert_eq!(on_saturday, 1);
    }
}

#[test]
fn test_event_distance_reduces_the_distributable_target() {
    let response = generate_schedule(
        &[],
        1,
        Some(20.0),
        &WeeklyEventConfig::enabled(),
        today(),
    )
    .unwrap();

    let plan = &response.plans[0];
    let long = plan
        .runs
        .iter()
        .find(|r| r.run_type == RunType::Long)
        .unwrap();

    // 25% of the event-adjusted 15 km, not of the full 20.
    assert_eq!(long.distance_km, Some(4.0));
}

#[test]
fn test_event_covering_the_whole_target_leaves_rest_days() {
    let response = generate_schedule(
        &[],
        1,
        Some(5.0),
        &WeeklyEventConfig::enabled(),
        today(),
    )
    .unwrap();

    let plan = &response.plans[0];
    let events = plan
        .runs
        .iter()
        .filter(|r| r.run_type == RunType::Event)
        .count();
    let rests: Vec<_> = plan
        .runs
        .iter()
        .filter(|r| r.run_type == RunType::Rest)
        .collect();

    assert_eq!(events, 1);
    assert_eq!(rests.len(), 4);
    for rest in rests {
        assert!(rest.distance_km.is_none());
        assert!(rest.duration_minutes.is_none());
    }
}

#[test]
fn test_preferred_days_inferred_from_history() {
    // Twelve runs, evenly split between Tuesdays and Thursdays.
    let mut activities = Vec::new();
    for week in 0..6 {
        let tuesday = ymd(2024, 1, 16) + chrono::Duration::weeks(week);
        let thursday = ymd(2024, 1, 18) + chrono::Duration::weeks(week);
        activities.push(create_run(&format!("{} 08:00:00", tuesday), 8000.0));
        activities.push(create_run(&format!("{} 08:00:00", thursday), 8000.0));
    }

    let response = generate_schedule(
        &activities,
        1,
        None,
        &WeeklyEventConfig::disabled(),
        today(),
    )
    .unwrap();

    assert_eq!(response.preferred_days, vec!["Tuesday", "Thursday"]);
    assert!(response.rationale.contains("Tuesday"));
}

#[test]
fn test_identical_inputs_produce_identical_plans() {
    let activities = steady_history();
    let event = WeeklyEventConfig::enabled();

    let first = generate_schedule(&activities, 4, Some(42.0), &event, today()).unwrap();
    let second = generate_schedule(&activities, 4, Some(42.0), &event, today()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
