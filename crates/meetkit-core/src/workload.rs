//! Team workload distribution.
//!
//! Each member gets a fixed linear workload score
//! `count * 0.4 + total_minutes * 0.01 + peak_daily_count * 0.6`. Members more
//! than 20% above the team mean are overloaded, more than 20% below it
//! underutilized.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::Dataset;

const COUNT_WEIGHT: f64 = 0.4;
const DURATION_WEIGHT: f64 = 0.01;
const PEAK_DAY_WEIGHT: f64 = 0.6;
const OVERLOAD_RATIO: f64 = 1.2;
const UNDERUSE_RATIO: f64 = 0.8;
/// Window the average daily count is spread over.
const AVERAGING_DAYS: f64 = 30.0;

/// Workload metrics for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWorkload {
    pub total_meetings: usize,
    pub total_duration_minutes: f64,
    pub average_daily_meetings: f64,
    pub max_daily_meetings: usize,
    pub workload_score: f64,
    /// Configured daily limit, default 5.
    pub preference_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAnalysis {
    pub average_workload: f64,
    pub overloaded_members: Vec<String>,
    pub underutilized_members: Vec<String>,
    /// `1 - (max - min) / max` over member scores; 1 when every score is zero.
    pub balance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Per member, in request order. A repeated member appears once.
    pub workload_distribution: IndexMap<String, MemberWorkload>,
    pub balance_analysis: BalanceAnalysis,
    pub recommendations: Vec<String>,
}

/// Workload metrics for `member`.
pub fn member_workload(dataset: &Dataset, member: &str) -> MemberWorkload {
    let meetings = dataset.meetings_for_participant(member);
    let total_meetings = meetings.len();
    let total_duration_minutes: f64 = meetings.iter().map(|m| m.duration_minutes()).sum();

    let mut per_day: IndexMap<NaiveDate, usize> = IndexMap::new();
    for meeting in &meetings {
        *per_day.entry(meeting.start_date()).or_insert(0) += 1;
    }
    let max_daily_meetings = per_day.values().copied().max().unwrap_or(0);

    MemberWorkload {
        total_meetings,
        total_duration_minutes,
        average_daily_meetings: total_meetings as f64 / AVERAGING_DAYS,
        max_daily_meetings,
        workload_score: total_meetings as f64 * COUNT_WEIGHT
            + total_duration_minutes * DURATION_WEIGHT
            + max_daily_meetings as f64 * PEAK_DAY_WEIGHT,
        preference_limit: dataset.daily_limit_for(member),
    }
}

/// Balance report across `members`.
pub fn compute_balance(dataset: &Dataset, members: &[String]) -> BalanceReport {
    let workload_distribution: IndexMap<String, MemberWorkload> = members
        .iter()
        .map(|member| (member.clone(), member_workload(dataset, member)))
        .collect();

    let scores: Vec<f64> = workload_distribution
        .values()
        .map(|w| w.workload_score)
        .collect();
    let average_workload = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let pick = |keep: &dyn Fn(f64) -> bool| -> Vec<String> {
        workload_distribution
            .iter()
            .filter(|(_, w)| keep(w.workload_score))
            .map(|(member, _)| member.clone())
            .collect()
    };
    let overloaded_members = pick(&|score| score > average_workload * OVERLOAD_RATIO);
    let underutilized_members = pick(&|score| score < average_workload * UNDERUSE_RATIO);

    let recommendation = if !overloaded_members.is_empty() && !underutilized_members.is_empty() {
        format!(
            "Consider redistributing meetings from {} to {}",
            overloaded_members.join(", "),
            underutilized_members.join(", ")
        )
    } else {
        "Workload is well balanced".to_string()
    };

    tracing::debug!(members = members.len(), average_workload, "computed workload balance");

    BalanceReport {
        balance_analysis: BalanceAnalysis {
            average_workload,
            balance_score: balance_score(&scores),
            overloaded_members,
            underutilized_members,
        },
        workload_distribution,
        recommendations: vec![recommendation],
    }
}

fn balance_score(scores: &[f64]) -> f64 {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    if scores.is_empty() || max == 0.0 {
        return 1.0;
    }
    1.0 - (max - min) / max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Meeting, MeetingPreferences, UserPreference};
    use crate::time::Instant;
    use chrono::{Duration, TimeZone, Utc};

    fn at(day: u32, h: u32) -> Instant {
        Utc.with_ymd_and_hms(2024, 1, day, h, 0, 0).unwrap().fixed_offset()
    }

    fn meeting(who: &[&str], start: Instant, minutes: i64) -> Meeting {
        Meeting {
            id: "m".into(),
            title: "t".into(),
            participants: who.iter().map(|s| s.to_string()).collect(),
            start_time: start,
            end_time: start + Duration::minutes(minutes),
            timezone: "UTC".into(),
            agenda: None,
            meeting_type: None,
            effectiveness_score: None,
        }
    }

    fn names(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_member_workload_formula() {
        let dataset = Dataset {
            meetings: vec![
                meeting(&["alice"], at(15, 9), 60),
                meeting(&["alice"], at(15, 11), 30),
                meeting(&["alice"], at(16, 9), 30),
            ],
            users: vec![UserPreference {
                user_id: "alice".into(),
                name: None,
                meeting_preferences: MeetingPreferences {
                    max_daily_meetings: Some(3),
                    ..Default::default()
                },
            }],
        };

        let w = member_workload(&dataset, "alice");
        assert_eq!(w.total_meetings, 3);
        assert_eq!(w.total_duration_minutes, 120.0);
        assert_eq!(w.max_daily_meetings, 2);
        assert!((w.workload_score - (1.2 + 1.2 + 1.2)).abs() < 1e-9);
        assert_eq!(w.average_daily_meetings, 0.1);
        assert_eq!(w.preference_limit, 3);
        assert_eq!(member_workload(&dataset, "bob").preference_limit, 5);
    }

    #[test]
    fn test_all_idle_team_is_balanced() {
        let report = compute_balance(&Dataset::default(), &names(&["alice", "bob"]));
        assert_eq!(report.balance_analysis.balance_score, 1.0);
        assert_eq!(report.balance_analysis.average_workload, 0.0);
        assert!(report.balance_analysis.overloaded_members.is_empty());
        assert_eq!(report.recommendations, vec!["Workload is well balanced".to_string()]);
    }

    #[test]
    fn test_empty_team() {
        let report = compute_balance(&Dataset::default(), &[]);
        assert_eq!(report.balance_analysis.balance_score, 1.0);
        assert!(report.workload_distribution.is_empty());
    }

    #[test]
    fn test_flags_overloaded_and_underutilized() {
        let dataset = Dataset {
            meetings: vec![
                meeting(&["alice"], at(15, 9), 60),
                meeting(&["alice"], at(15, 10), 60),
                meeting(&["alice"], at(15, 11), 60),
                meeting(&["alice", "bob"], at(15, 13), 60),
            ],
            users: vec![],
        };

        let report = compute_balance(&dataset, &names(&["alice", "bob", "carol"]));
        let analysis = &report.balance_analysis;
        assert_eq!(analysis.overloaded_members, names(&["alice"]));
        assert_eq!(analysis.underutilized_members, names(&["bob", "carol"]));
        // carol scores zero, so the spread is the whole of the maximum.
        assert_eq!(analysis.balance_score, 0.0);
        assert_eq!(
            report.recommendations,
            vec!["Consider redistributing meetings from alice to bob, carol".to_string()]
        );
    }

    #[test]
    fn test_repeated_member_collapses() {
        let report = compute_balance(&Dataset::default(), &names(&["alice", "alice"]));
        assert_eq!(report.workload_distribution.len(), 1);
    }
}
