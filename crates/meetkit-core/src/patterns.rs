//! Meeting-history aggregation for a single user.

use chrono::Timelike;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Dataset;

/// Effectiveness at or above this counts as a high-effectiveness meeting.
const HIGH_EFFECTIVENESS: f64 = 8.0;
/// Effectiveness below this counts as a low-effectiveness meeting.
const LOW_EFFECTIVENESS: f64 = 6.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivityTrends {
    pub high_effectiveness_meetings: usize,
    pub low_effectiveness_meetings: usize,
}

/// Aggregates over one user's meetings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_meetings: usize,
    pub total_duration_minutes: f64,
    pub average_duration_minutes: f64,
    /// Meeting type to count, in first-seen order. Untyped meetings count as `unknown`.
    pub meeting_type_distribution: IndexMap<String, usize>,
    /// Mean stored effectiveness; meetings without a score contribute zero.
    pub average_effectiveness_score: f64,
    /// Start hour (0-23, in the meeting's own offset) to count.
    pub hour_distribution: BTreeMap<u32, usize>,
    pub productivity_trends: ProductivityTrends,
}

/// Summarize `user_id`'s meetings. `None` when the user has no meetings.
pub fn analyze_patterns(dataset: &Dataset, user_id: &str) -> Option<PatternSummary> {
    let meetings = dataset.meetings_for_participant(user_id);
    if meetings.is_empty() {
        tracing::debug!(user_id, "no meetings to analyze");
        return None;
    }

    let total_meetings = meetings.len();
    let total_duration_minutes: f64 = meetings.iter().map(|m| m.duration_minutes()).sum();

    let mut meeting_type_distribution = IndexMap::new();
    let mut hour_distribution = BTreeMap::new();
    let mut trends = ProductivityTrends::default();
    let mut effectiveness_total = 0.0;

    for meeting in &meetings {
        let kind = meeting.meeting_type.as_deref().unwrap_or("unknown");
        *meeting_type_distribution.entry(kind.to_string()).or_insert(0) += 1;
        *hour_distribution.entry(meeting.start_time.hour()).or_insert(0) += 1;

        let score = meeting.effectiveness();
        effectiveness_total += score;
        if score >= HIGH_EFFECTIVENESS {
            trends.high_effectiveness_meetings += 1;
        }
        if score < LOW_EFFECTIVENESS {
            trends.low_effectiveness_meetings += 1;
        }
    }

    Some(PatternSummary {
        total_meetings,
        total_duration_minutes,
        average_duration_minutes: total_duration_minutes / total_meetings as f64,
        meeting_type_distribution,
        average_effectiveness_score: effectiveness_total / total_meetings as f64,
        hour_distribution,
        productivity_trends: trends,
    })
}
