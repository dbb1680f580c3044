//! Schedule review for a single user.
//!
//! Looks for days above the user's daily limit, back-to-back meetings with
//! less than a 15 minute break, and meetings starting outside 08:00-18:59.
//! The score starts at 100 and loses 20 per overloaded day and 10 per
//! out-of-hours meeting, floored at zero.

use chrono::{NaiveDate, Timelike};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Dataset, Meeting};

const BASE_SCORE: i64 = 100;
const OVERLOADED_DAY_PENALTY: i64 = 20;
const NON_BUSINESS_PENALTY: i64 = 10;
const GOOD_EFFICIENCY_SCORE: i64 = 80;
const MIN_BREAK_MS: i64 = 15 * 60 * 1000;
const FIRST_BUSINESS_HOUR: u32 = 8;
const LAST_BUSINESS_HOUR: u32 = 18;

/// A single optimization finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    OverloadedDay {
        date: NaiveDate,
        meeting_count: usize,
        suggestion: String,
        /// Titles past the daily limit, in store order.
        meetings_to_reschedule: Vec<String>,
    },
    InsufficientBreak {
        date: NaiveDate,
        meeting1: String,
        meeting2: String,
        suggestion: String,
    },
    NonBusinessHours {
        meetings: Vec<String>,
        suggestion: String,
    },
}

/// Qualitative labels derived from the findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInsights {
    pub schedule_efficiency: String,
    pub workload_distribution: String,
    pub time_utilization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub current_meeting_count: usize,
    /// 0-100.
    pub optimization_score: u32,
    pub recommendations: Vec<Recommendation>,
    pub ai_insights: ScheduleInsights,
}

/// Review `user_id`'s schedule. `None` when the user has no meetings.
pub fn optimize_schedule(dataset: &Dataset, user_id: &str) -> Option<OptimizationReport> {
    let meetings = dataset.meetings_for_participant(user_id);
    if meetings.is_empty() {
        tracing::debug!(user_id, "no meetings to optimize");
        return None;
    }

    let mut by_day: IndexMap<NaiveDate, Vec<&Meeting>> = IndexMap::new();
    for &meeting in &meetings {
        by_day.entry(meeting.start_date()).or_default().push(meeting);
    }

    let limit = dataset.daily_limit_for(user_id) as usize;
    let mut recommendations = Vec::new();

    let mut overloaded_days = 0i64;
    for (date, day) in by_day.iter().filter(|(_, day)| day.len() > limit) {
        overloaded_days += 1;
        recommendations.push(Recommendation::OverloadedDay {
            date: *date,
            meeting_count: day.len(),
            suggestion: format!(
                "Consider rescheduling {} meetings from {}",
                day.len() - limit,
                date
            ),
            meetings_to_reschedule: day[limit..].iter().map(|m| m.title.clone()).collect(),
        });
    }

    for (date, day) in by_day.iter().filter(|(_, day)| day.len() > 1) {
        let mut sorted = day.clone();
        sorted.sort_by_key(|m| m.start_time);
        for pair in sorted.windows(2) {
            let gap = pair[1].start_time - pair[0].end_time;
            if gap.num_milliseconds() < MIN_BREAK_MS {
                recommendations.push(Recommendation::InsufficientBreak {
                    date: *date,
                    meeting1: pair[0].title.clone(),
                    meeting2: pair[1].title.clone(),
                    suggestion: "Add buffer time between meetings for better productivity".into(),
                });
            }
        }
    }

    let off_hours: Vec<String> = meetings
        .iter()
        .filter(|m| {
            let hour = m.start_time.hour();
            hour < FIRST_BUSINESS_HOUR || hour > LAST_BUSINESS_HOUR
        })
        .map(|m| m.title.clone())
        .collect();
    let off_hours_count = off_hours.len() as i64;
    if !off_hours.is_empty() {
        recommendations.push(Recommendation::NonBusinessHours {
            meetings: off_hours,
            suggestion: "Consider rescheduling meetings to business hours for better attendance".into(),
        });
    }

    let raw_score = BASE_SCORE
        - overloaded_days * OVERLOADED_DAY_PENALTY
        - off_hours_count * NON_BUSINESS_PENALTY;

    let ai_insights = ScheduleInsights {
        schedule_efficiency: if raw_score >= GOOD_EFFICIENCY_SCORE {
            "Good"
        } else {
            "Needs improvement"
        }
        .into(),
        workload_distribution: if overloaded_days == 0 { "Balanced" } else { "Unbalanced" }.into(),
        time_utilization: if off_hours_count == 0 { "Optimal" } else { "Suboptimal" }.into(),
    };

    tracing::debug!(user_id, score = raw_score, findings = recommendations.len(), "optimized schedule");

    Some(OptimizationReport {
        current_meeting_count: meetings.len(),
        optimization_score: raw_score.max(0) as u32,
        recommendations,
        ai_insights,
    })
}
