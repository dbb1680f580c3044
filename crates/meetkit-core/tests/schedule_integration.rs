//! Integration tests running the analytics against the bundled sample
//! fixture and against small generated schedules.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate, TimeZone, Timelike, Utc};
use meetkit_core::time::{parse_instant, Instant};
use meetkit_core::{
    analyze_patterns, compute_balance, detect_conflicts_in_range, find_available_slots,
    find_optimal_slots, optimize_schedule, score_effectiveness, suggest_agenda, Dataset,
    MeetingStore, NewMeeting, Recommendation,
};

fn sample_store() -> MeetingStore {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_meetings.json");
    MeetingStore::open(&path).unwrap()
}

fn sample() -> Dataset {
    sample_store().snapshot().unwrap()
}

fn at(day: u32, h: u32, m: u32) -> Instant {
    Utc.with_ymd_and_hms(2024, 1, day, h, m, 0).unwrap().fixed_offset()
}

const ALICE: &str = "alice@company.com";
const BOB: &str = "bob@company.com";
const DAVID: &str = "david@company.com";

#[test]
fn test_available_slots_skip_busy_hours() {
    let slots = find_available_slots(&sample(), &[ALICE.to_string()], 60, at(15, 9, 0), at(15, 17, 0)).unwrap();
    let hours: Vec<u32> = slots.iter().map(|s| s.start_time.hour()).collect();
    assert_eq!(hours, vec![10, 11, 12, 13, 16]);
    assert!(slots.iter().all(|s| s.duration_minutes == 60));
}

#[test]
fn test_optimal_slots_ignore_participants() {
    let now = parse_instant("2024-03-01T15:45:00Z");
    let slots = find_optimal_slots(60, now).unwrap();

    let scores: Vec<u32> = slots.iter().map(|s| s.ai_score).collect();
    let recommended: Vec<bool> = slots.iter().map(|s| s.recommended).collect();
    assert_eq!(scores, vec![10, 9, 8, 7, 6]);
    assert_eq!(recommended, vec![true, true, false, false, false]);
    assert_eq!(slots[0].slot.start_time, parse_instant("2024-03-02T09:00:00Z"));
    assert_eq!(slots[4].slot.end_time, parse_instant("2024-03-06T10:00:00Z"));
}

#[test]
fn test_range_conflicts_are_inclusive() {
    let dataset = sample();
    // m1 ends exactly at 10:00.
    let found = detect_conflicts_in_range(&dataset, ALICE, at(15, 10, 0), at(15, 12, 0));
    let ids: Vec<_> = found.iter().map(|c| c.meeting_id.as_str()).collect();
    assert_eq!(ids, vec!["m1"]);

    let found = detect_conflicts_in_range(&dataset, ALICE, at(15, 9, 15), at(15, 9, 30));
    assert_eq!(found.len(), 1);
    assert!(detect_conflicts_in_range(&dataset, ALICE, at(20, 0, 0), at(21, 0, 0)).is_empty());
}

#[test]
fn test_patterns_for_sample_user() {
    let summary = analyze_patterns(&sample(), ALICE).unwrap();
    assert_eq!(summary.total_meetings, 4);
    assert_eq!(summary.total_duration_minutes, 225.0);
    assert_eq!(summary.average_duration_minutes, 56.25);
    assert_eq!(summary.productivity_trends.high_effectiveness_meetings, 1);
    assert_eq!(summary.productivity_trends.low_effectiveness_meetings, 0);
    assert_eq!(summary.hour_distribution.get(&9), Some(&2));
    assert_eq!(
        summary.meeting_type_distribution.keys().collect::<Vec<_>>(),
        vec!["team_sync", "planning", "standup", "retrospective"]
    );
    assert!(analyze_patterns(&sample(), "nobody@company.com").is_none());
}

#[test]
fn test_agenda_uses_participant_history() {
    let result = suggest_agenda(&sample(), "Review", &[BOB.to_string()]);
    assert_eq!(result.based_on_history, 1);
    assert_eq!(result.agenda_suggestions.len(), 7);
    assert_eq!(result.agenda_suggestions[0], "Present findings and results");
}

#[test]
fn test_workload_for_evenly_loaded_members() {
    let report = compute_balance(&sample(), &[ALICE.to_string(), DAVID.to_string()]);
    let alice = &report.workload_distribution[ALICE];
    assert_eq!(alice.total_meetings, 4);
    assert_eq!(alice.max_daily_meetings, 2);
    assert_eq!(alice.preference_limit, 4);
    assert_eq!(report.workload_distribution[DAVID].preference_limit, 5);
    assert_eq!(report.balance_analysis.balance_score, 1.0);
    assert_eq!(report.recommendations, vec!["Workload is well balanced".to_string()]);
}

#[test]
fn test_effectiveness_of_sample_meeting() {
    let store = sample_store();
    let report = score_effectiveness(&store.meeting("m1").unwrap());
    assert_eq!(report.effectiveness_score, 9.3);
    assert_eq!(report.score_breakdown.type_score, 8);
    assert!(report.improvement_suggestions.is_empty());
}

#[test]
fn test_optimize_flags_evening_meeting() {
    let report = optimize_schedule(&sample(), DAVID).unwrap();
    assert_eq!(report.current_meeting_count, 4);
    assert_eq!(report.optimization_score, 90);
    assert_eq!(report.ai_insights.schedule_efficiency, "Good");
    assert_eq!(report.ai_insights.time_utilization, "Suboptimal");
    assert!(matches!(
        report.recommendations.as_slice(),
        [Recommendation::NonBusinessHours { meetings, .. }] if meetings == &vec!["Customer Demo".to_string()]
    ));
}

#[test]
fn test_overloaded_day_after_creating_meetings() {
    let store = MeetingStore::default();
    let start = at(22, 8, 0);
    for i in 0..7 {
        let begin = (start + Duration::minutes(i * 60)).to_rfc3339();
        store
            .create_meeting(NewMeeting::new(format!("Block {i}"), vec!["erin".into()], 30).starting_at(begin), start)
            .unwrap();
    }

    let report = optimize_schedule(&store.snapshot().unwrap(), "erin").unwrap();
    assert_eq!(report.optimization_score, 80);
    assert_eq!(report.recommendations.len(), 1);
    match &report.recommendations[0] {
        Recommendation::OverloadedDay {
            date,
            meeting_count,
            meetings_to_reschedule,
            ..
        } => {
            assert_eq!(*date, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
            assert_eq!(*meeting_count, 7);
            assert_eq!(meetings_to_reschedule, &vec!["Block 5".to_string(), "Block 6".to_string()]);
        }
        other => panic!("unexpected recommendation: {other:?}"),
    }
}
