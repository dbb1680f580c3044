//! Meeting and user-preference records.
//!
//! Records mirror the JSON fixture shape. Optional fixture fields are kept
//! optional here; defaults are applied where a computation reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{FixtureError, Result};
use crate::time::{self, minutes_between, Instant, TimeInterval};

/// Daily meeting limit applied when a user has none configured.
pub const DEFAULT_MAX_DAILY_MEETINGS: u32 = 5;

fn default_timezone() -> String {
    "UTC".into()
}

fn default_meeting_type() -> String {
    "general".into()
}

/// A scheduled meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(with = "time::lenient", default = "time::now")]
    pub start_time: Instant,
    #[serde(with = "time::lenient", default = "time::now")]
    pub end_time: Instant,
    /// Informational label; stored instants carry their own offset.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub meeting_type: Option<String>,
    #[serde(default)]
    pub effectiveness_score: Option<f64>,
}

impl Meeting {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start_time, self.end_time)
    }

    /// Length in fractional minutes. Negative when end precedes start.
    pub fn duration_minutes(&self) -> f64 {
        minutes_between(self.start_time, self.end_time)
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// Stored effectiveness, absent counted as zero.
    pub fn effectiveness(&self) -> f64 {
        self.effectiveness_score.unwrap_or(0.0)
    }

    /// Calendar date of the start, in the meeting's own offset.
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }
}

/// Meeting-related preferences for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_meetings: Option<u32>,
    /// Other preference keys, kept as found in the fixture.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A user and their scheduling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub meeting_preferences: MeetingPreferences,
}

impl UserPreference {
    pub fn max_daily_meetings(&self) -> u32 {
        self.meeting_preferences
            .max_daily_meetings
            .unwrap_or(DEFAULT_MAX_DAILY_MEETINGS)
    }
}

/// Request to create a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeeting {
    pub title: String,
    pub participants: Vec<String>,
    /// Length in minutes. Zero and negative values are accepted.
    pub duration: i64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default = "default_meeting_type")]
    pub meeting_type: String,
}

impl NewMeeting {
    pub fn new(title: impl Into<String>, participants: Vec<String>, duration: i64) -> Self {
        Self {
            title: title.into(),
            participants,
            duration,
            start_time: None,
            timezone: default_timezone(),
            agenda: None,
            meeting_type: default_meeting_type(),
        }
    }

    pub fn starting_at(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn with_agenda(mut self, agenda: impl Into<String>) -> Self {
        self.agenda = Some(agenda.into());
        self
    }

    pub fn with_type(mut self, meeting_type: impl Into<String>) -> Self {
        self.meeting_type = meeting_type.into();
        self
    }

    /// Materialize the record under `id`. A missing start means `now`.
    ///
    /// Fails with [`CoreError::TimeOutOfRange`](crate::error::CoreError::TimeOutOfRange)
    /// when the end time is not representable.
    pub fn into_meeting(self, id: String, now: Instant) -> Result<Meeting> {
        let start_time = self
            .start_time
            .as_deref()
            .map(|text| time::parse_instant_or(text, now))
            .unwrap_or(now);
        let interval = TimeInterval::from_minutes(start_time, self.duration)?;
        let agenda = self
            .agenda
            .unwrap_or_else(|| format!("Meeting agenda for {}", self.title));

        Ok(Meeting {
            id,
            title: self.title,
            participants: self.participants,
            start_time: interval.start,
            end_time: interval.end,
            timezone: self.timezone,
            agenda: Some(agenda),
            meeting_type: Some(self.meeting_type),
            effectiveness_score: Some(0.0),
        })
    }
}

/// Meetings and users, in fixture order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub users: Vec<UserPreference>,
}

impl Dataset {
    /// Read a fixture document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|source| FixtureError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            meetings = dataset.meetings.len(),
            users = dataset.users.len(),
            "loaded fixture"
        );
        Ok(dataset)
    }

    /// Meetings listing `user_id` as a participant, in store order.
    pub fn meetings_for_participant(&self, user_id: &str) -> Vec<&Meeting> {
        self.meetings
            .iter()
            .filter(|m| m.has_participant(user_id))
            .collect()
    }

    pub fn preferences_for(&self, user_id: &str) -> Option<&UserPreference> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// Configured daily limit, or the default for unknown users.
    pub fn daily_limit_for(&self, user_id: &str) -> u32 {
        self.preferences_for(user_id)
            .map(UserPreference::max_daily_meetings)
            .unwrap_or(DEFAULT_MAX_DAILY_MEETINGS)
    }

    pub fn meeting(&self, id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == id)
    }

    /// Identifier the next appended meeting receives.
    pub fn next_meeting_id(&self) -> String {
        format!("m{}", self.meetings.len() + 1)
    }

    /// Distinct participant identifiers, in first-seen order.
    pub fn participants(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for meeting in &self.meetings {
            for participant in &meeting.participants {
                seen.insert(participant.as_str());
            }
        }
        seen.into_iter().collect()
    }
}
