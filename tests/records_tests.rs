use chrono::{NaiveDate, NaiveDateTime};
use runstats_api::activities::models::{Activity, ActivityKind};
use runstats_api::analytics::utils::personal_records;
use uuid::Uuid;

fn create_activity(date_str: &str, distance_m: f64, duration_s: f64) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        occurred_at: NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S").unwrap(),
        kind: ActivityKind::Run,
        distance_meters: distance_m,
        duration_seconds: duration_s,
        latitude: None,
        longitude: None,
        elevation_gain_meters: None,
    }
}

fn with_elevation(mut activity: Activity, elevation: f64) -> Activity {
    activity.elevation_gain_meters = Some(elevation);
    activity
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_fastest_5k_uses_extrapolated_pace_not_raw_time() {
    // The 6 km run took 24:00 (240 s/km), the same elapsed time as the
    // direct 5 km run. Extrapolated to 5000 m it scores 20:00 and wins.
    let activities = vec![
        create_activity("2024-05-01 08:00:00", 5000.0, 1440.0),
        create_activity("2024-05-02 08:00:00", 6000.0, 1440.0),
    ];

    let records = personal_records(&activities);
    let fastest = records.fastest_5k.unwrap();

    assert_eq!(fastest.value, 1200.0);
    assert_eq!(fastest.date, ymd(2024, 5, 2));
}

#[test]
fn test_direct_run_wins_when_extrapolation_is_slower() {
    // 6 km in 30:00 is 5:00/km, extrapolating to 25:00 for 5 km; the
    // direct 5 km in 24:00 keeps the record.
    let activities = vec![
        create_activity("2024-05-01 08:00:00", 6000.0, 1800.0),
        create_activity("2024-05-02 08:00:00", 5000.0, 1440.0),
    ];

    let records = personal_records(&activities);
    let fastest = records.fastest_5k.unwrap();

    assert_eq!(fastest.value, 1440.0);
    assert_eq!(fastest.date, ymd(2024, 5, 2));
}

#[test]
fn test_short_runs_do_not_qualify_for_distance_records() {
    let activities = vec![
        create_activity("2024-05-01 08:00:00", 4999.0, 1200.0),
        create_activity("2024-05-02 08:00:00", 9900.0, 3000.0),
    ];

    let records = personal_records(&activities);

    assert!(records.fastest_5k.is_none());
    assert!(records.fastest_10k.is_none());
}

#[test]
fn test_fastest_10k_extrapolates_to_ten_kilometres() {
    // 12 km in 3600 s is 300 s/km, so 3000 s for 10 km.
    let activities = vec![create_activity("2024-05-01 08:00:00", 12000.0, 3600.0)];

    let records = personal_records(&activities);
    assert_eq!(records.fastest_10k.unwrap().value, 3000.0);
}

#[test]
fn test_longest_distance_and_elevation_records() {
    let activities = vec![
        with_elevation(
            create_activity("2024-05-01 08:00:00", 8000.0, 2400.0),
            120.0,
        ),
        with_elevation(
            create_activity("2024-05-02 08:00:00", 15000.0, 5400.0),
            340.0,
        ),
        create_activity("2024-05-03 08:00:00", 21097.0, 7200.0),
    ];

    let records = personal_records(&activities);

    let longest = records.longest_distance.unwrap();
    assert_eq!(longest.value, 21097.0);
    assert_eq!(longest.date, ymd(2024, 5, 3));

    let elevation = records.most_elevation.unwrap();
    assert_eq!(elevation.value, 340.0);
    assert_eq!(elevation.date, ymd(2024, 5, 2));
}

#[test]
fn test_elevation_record_absent_without_elevation_data() {
    let activities = vec![create_activity("2024-05-01 08:00:00", 8000.0, 2400.0)];

    let records = personal_records(&activities);
    assert!(records.most_elevation.is_none());
}

#[test]
fn test_first_activity_wins_ties() {
    let activities = vec![
        create_activity("2024-05-02 08:00:00", 5000.0, 1500.0),
        create_activity("2024-05-01 08:00:00", 5000.0, 1500.0),
    ];

    let records = personal_records(&activities);

    // Equal extrapolated times: the first in iteration order keeps the
    // record even though the second is dated earlier.
    assert_eq!(records.fastest_5k.unwrap().date, ymd(2024, 5, 2));
}

#[test]
fn test_empty_history_has_no_records() {
    let records = personal_records(&[]);

    assert!(records.longest_distance.is_none());
    assert!(records.fastest_5k.is_none());
    assert!(records.fastest_10k.is_none());
    assert!(records.most_elevation.is_none());
}
