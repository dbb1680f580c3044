//! Conflict detection against existing meetings.
//!
//! Two tests live here and they intentionally disagree at the boundaries:
//! [`find_conflicts`] uses the half-open overlap test, so back-to-back
//! meetings are fine, while [`detect_conflicts_in_range`] treats both range
//! ends as inclusive.

use serde::{Deserialize, Serialize};

use crate::model::{Dataset, Meeting};
use crate::time::Instant;

/// A participant's existing meeting that overlaps a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub participant: String,
    pub conflicting_meeting: String,
    #[serde(with = "crate::time::lenient")]
    pub conflict_time: Instant,
}

/// A meeting touching a queried time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeConflict {
    pub meeting_id: String,
    pub title: String,
    #[serde(with = "crate::time::lenient")]
    pub start_time: Instant,
    #[serde(with = "crate::time::lenient")]
    pub end_time: Instant,
    pub participants: Vec<String>,
}

impl From<&Meeting> for RangeConflict {
    fn from(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.id.clone(),
            title: meeting.title.clone(),
            start_time: meeting.start_time,
            end_time: meeting.end_time,
            participants: meeting.participants.clone(),
        }
    }
}

/// Existing meetings overlapping `candidate`, per candidate participant.
///
/// Iterates participants in order, then each participant's meetings in store
/// order. A meeting shared by several participants is reported once per
/// participant.
pub fn find_conflicts(candidate: &Meeting, existing: &[Meeting]) -> Vec<ConflictRecord> {
    let window = candidate.interval();
    let mut conflicts = Vec::new();

    for participant in &candidate.participants {
        for meeting in existing.iter().filter(|m| m.has_participant(participant)) {
            if window.overlaps(&meeting.interval()) {
                conflicts.push(ConflictRecord {
                    participant: participant.clone(),
                    conflicting_meeting: meeting.title.clone(),
                    conflict_time: meeting.start_time,
                });
            }
        }
    }

    conflicts
}

/// Meetings of `user_id` that start in, end in, or span `[range_start, range_end]`.
pub fn detect_conflicts_in_range(
    dataset: &Dataset,
    user_id: &str,
    range_start: Instant,
    range_end: Instant,
) -> Vec<RangeConflict> {
    let within = |t: Instant| range_start <= t && t <= range_end;

    dataset
        .meetings_for_participant(user_id)
        .into_iter()
        .filter(|m| {
            within(m.start_time)
                || within(m.end_time)
                || (m.start_time <= range_start && range_start <= m.end_time)
        })
        .map(RangeConflict::from)
        .collect()
}
