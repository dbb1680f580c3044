//! Process-wide meeting store.
//!
//! The dataset sits behind a single `RwLock`. Analytics run on a read guard
//! or on a cloned snapshot; meeting creation assigns the identifier, checks
//! conflicts and appends while holding the write guard, so two concurrent
//! creators never share an identifier.

use serde::Serialize;
use std::path::Path;
use std::sync::RwLock;

use crate::conflicts::{find_conflicts, ConflictRecord};
use crate::error::{CoreError, Result};
use crate::model::{Dataset, Meeting, NewMeeting, UserPreference};
use crate::time::Instant;

/// Outcome of [`MeetingStore::create_meeting`].
#[derive(Debug, Clone, Serialize)]
pub struct CreatedMeeting {
    pub meeting: Meeting,
    /// Overlaps with meetings that existed before the append.
    pub conflicts: Vec<ConflictRecord>,
}

/// Shared meeting store.
#[derive(Debug, Default)]
pub struct MeetingStore {
    data: RwLock<Dataset>,
}

impl MeetingStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }

    /// Load the fixture at `path`. Fails if the file is missing or malformed.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Dataset::load(path)?))
    }

    /// Run `f` against a consistent view of the dataset.
    pub fn read<R>(&self, f: impl FnOnce(&Dataset) -> R) -> Result<R> {
        let guard = self.data.read()?;
        Ok(f(&guard))
    }

    /// Owned copy of the current dataset.
    pub fn snapshot(&self) -> Result<Dataset> {
        self.read(Dataset::clone)
    }

    pub fn meeting_count(&self) -> Result<usize> {
        self.read(|d| d.meetings.len())
    }

    pub fn user_count(&self) -> Result<usize> {
        self.read(|d| d.users.len())
    }

    /// Meetings for `user_id`, cloned out of the store in store order.
    pub fn meetings_for_participant(&self, user_id: &str) -> Result<Vec<Meeting>> {
        self.read(|d| {
            d.meetings_for_participant(user_id)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn preferences_for(&self, user_id: &str) -> Result<Option<UserPreference>> {
        self.read(|d| d.preferences_for(user_id).cloned())
    }

    /// Look up a meeting, surfacing absence as [`CoreError::MeetingNotFound`].
    pub fn meeting(&self, id: &str) -> Result<Meeting> {
        self.read(|d| d.meeting(id).cloned())?
            .ok_or_else(|| CoreError::MeetingNotFound { id: id.to_string() })
    }

    /// Append a prepared record under the next sequential identifier.
    pub fn append_meeting(&self, mut meeting: Meeting) -> Result<Meeting> {
        let mut guard = self.data.write()?;
        meeting.id = guard.next_meeting_id();
        guard.meetings.push(meeting.clone());
        Ok(meeting)
    }

    /// Create a meeting from a request, reporting conflicts with existing meetings.
    ///
    /// The record is built before the write guard is taken, so a request with
    /// an unrepresentable end time fails without touching the store.
    pub fn create_meeting(&self, request: NewMeeting, now: Instant) -> Result<CreatedMeeting> {
        let mut meeting = request.into_meeting(String::new(), now)?;
        let mut guard = self.data.write()?;
        meeting.id = guard.next_meeting_id();
        let conflicts = find_conflicts(&meeting, &guard.meetings);
        guard.meetings.push(meeting.clone());

        tracing::info!(
            id = %meeting.id,
            participants = meeting.participants.len(),
            conflicts = conflicts.len(),
            "created meeting"
        );
        Ok(CreatedMeeting { meeting, conflicts })
    }
}

impl From<Dataset> for MeetingStore {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}
