//! Weighted effectiveness scoring for a single meeting.
//!
//! Each factor maps to a discrete sub-score through fixed thresholds and is
//! combined with a fixed weight:
//!
//! | factor | optimal (10) | acceptable (7) | weight |
//! |--------|--------------|----------------|--------|
//! | duration | 30-60 min | 15-90 min | 0.20 |
//! | participants | 3-8 | 2-12 | 0.15 |
//! | start hour | 9-17 | 8-18 | 0.15 |
//! | meeting type | lookup, 6 if unknown | | 0.20 |
//! | agenda length | > 20 chars | > 10 chars | 0.10 |
//! | stored score | only when > 0 | | 0.20 |
//!
//! Weights are not renormalized when the stored score is absent, so a meeting
//! without history can never exceed 8.0; with the best known type (9) the
//! practical ceiling is 7.8.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::model::Meeting;

/// Known meeting types and their sub-score.
pub const MEETING_TYPE_SCORES: &[(&str, u32)] = &[
    ("team_sync", 8),
    ("planning", 9),
    ("review", 8),
    ("workshop", 9),
    ("standup", 7),
    ("retrospective", 8),
    ("demo", 8),
    ("training", 7),
];

/// Sub-score for meeting types missing from [`MEETING_TYPE_SCORES`].
pub const UNKNOWN_TYPE_SCORE: u32 = 6;

/// Sub-scores below this produce an improvement suggestion.
const SUGGESTION_THRESHOLD: u32 = 7;

/// Three-step rating used by the threshold factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Optimal,
    Acceptable,
    Poor,
}

impl Tier {
    fn classify<T: PartialOrd>(value: T, optimal: (T, T), acceptable: (T, T)) -> Self {
        if optimal.0 <= value && value <= optimal.1 {
            Self::Optimal
        } else if acceptable.0 <= value && value <= acceptable.1 {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }

    pub fn score(self) -> u32 {
        match self {
            Self::Optimal => 10,
            Self::Acceptable => 7,
            Self::Poor => 4,
        }
    }
}

/// Factor weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub duration: f64,
    pub participants: f64,
    pub time_of_day: f64,
    pub meeting_type: f64,
    pub agenda: f64,
    pub historical: f64,
}

impl FactorWeights {
    pub fn standard() -> Self {
        Self {
            duration: 0.20,
            participants: 0.15,
            time_of_day: 0.15,
            meeting_type: 0.20,
            agenda: 0.10,
            historical: 0.20,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-factor sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub duration_score: u32,
    pub participant_score: u32,
    pub time_score: u32,
    pub type_score: u32,
    pub agenda_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_score: Option<f64>,
}

impl ScoreBreakdown {
    /// Compute the sub-scores of `meeting`.
    pub fn of(meeting: &Meeting) -> Self {
        let duration = Tier::classify(meeting.duration_minutes(), (30.0, 60.0), (15.0, 90.0));
        let participants = Tier::classify(meeting.participants.len(), (3, 8), (2, 12));
        let time_of_day = Tier::classify(meeting.start_time.hour(), (9, 17), (8, 18));
        let agenda_len = meeting.agenda.as_deref().map_or(0, |a| a.chars().count());
        let agenda = if agenda_len > 20 {
            Tier::Optimal
        } else if agenda_len > 10 {
            Tier::Acceptable
        } else {
            Tier::Poor
        };

        Self {
            duration_score: duration.score(),
            participant_score: participants.score(),
            time_score: time_of_day.score(),
            type_score: type_score(meeting.meeting_type.as_deref().unwrap_or("general")),
            agenda_score: agenda.score(),
            historical_score: Some(meeting.effectiveness()).filter(|s| *s > 0.0),
        }
    }

    /// Weighted sum, clamped to `[0, 10]`.
    pub fn weighted(&self, weights: &FactorWeights) -> f64 {
        let sum = self.duration_score as f64 * weights.duration
            + self.participant_score as f64 * weights.participants
            + self.time_score as f64 * weights.time_of_day
            + self.type_score as f64 * weights.meeting_type
            + self.agenda_score as f64 * weights.agenda
            + self.historical_score.unwrap_or(0.0) * weights.historical;
        sum.clamp(0.0, 10.0)
    }

    /// One suggestion per weak factor. Meeting type never produces one.
    pub fn suggestions(&self) -> Vec<String> {
        let checks = [
            (self.duration_score, "Consider adjusting meeting duration for better engagement"),
            (self.participant_score, "Review participant list to ensure optimal group size"),
            (self.time_score, "Consider rescheduling to business hours for better attendance"),
            (self.agenda_score, "Add detailed agenda items to improve meeting focus"),
        ];
        checks
            .into_iter()
            .filter(|(score, _)| *score < SUGGESTION_THRESHOLD)
            .map(|(_, text)| text.to_string())
            .collect()
    }
}

/// Sub-score for a meeting type.
pub fn type_score(meeting_type: &str) -> u32 {
    MEETING_TYPE_SCORES
        .iter()
        .find(|(name, _)| *name == meeting_type)
        .map_or(UNKNOWN_TYPE_SCORE, |(_, score)| *score)
}

/// Scored meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessReport {
    pub meeting_id: String,
    pub meeting_title: String,
    /// Weighted score rounded to two decimals.
    pub effectiveness_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub improvement_suggestions: Vec<String>,
}

/// Score `meeting` with the standard weights.
pub fn score_effectiveness(meeting: &Meeting) -> EffectivenessReport {
    let breakdown = ScoreBreakdown::of(meeting);
    let score = breakdown.weighted(&FactorWeights::standard());
    tracing::debug!(meeting_id = %meeting.id, score, "scored meeting");

    EffectivenessReport {
        meeting_id: meeting.id.clone(),
        meeting_title: meeting.title.clone(),
        effectiveness_score: round2(score),
        improvement_suggestions: breakdown.suggestions(),
        score_breakdown: breakdown,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
