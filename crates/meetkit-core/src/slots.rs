//! Free-slot search for a group of participants.
//!
//! [`SlotFinder`] walks a fixed grid from the start of the requested range
//! and keeps every duration-sized candidate that no busy meeting overlaps.
//! It is greedy: gaps that do not line up with the grid are missed.
//!
//! [`find_optimal_slots`] is the ranked variant exposed to clients. It does
//! not consult busy time at all and always proposes the same five mornings.

use chrono::{Days, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::Dataset;
use crate::time::{self, Instant, TimeInterval};

/// Number of slots either search returns at most.
pub const MAX_SLOTS: usize = 5;

/// Candidates recommended by [`find_optimal_slots`].
const RECOMMENDED_SLOTS: usize = 2;

/// A free interval of the requested length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(with = "crate::time::lenient")]
    pub start_time: Instant,
    #[serde(with = "crate::time::lenient")]
    pub end_time: Instant,
    pub duration_minutes: i64,
}

impl Slot {
    fn new(interval: TimeInterval, duration_minutes: i64) -> Self {
        Self {
            start_time: interval.start,
            end_time: interval.end,
            duration_minutes,
        }
    }
}

/// A proposed slot with its rank score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSlot {
    #[serde(flatten)]
    pub slot: Slot,
    pub ai_score: u32,
    pub recommended: bool,
}

/// Grid search over a participant group's busy time.
#[derive(Debug, Clone)]
pub struct SlotFinder {
    step_minutes: i64,
    max_slots: usize,
}

impl SlotFinder {
    /// Hourly grid, at most [`MAX_SLOTS`] results.
    pub fn new() -> Self {
        Self {
            step_minutes: 60,
            max_slots: MAX_SLOTS,
        }
    }

    /// Set the grid spacing. Values below one minute are raised to one.
    pub fn with_step(mut self, minutes: i64) -> Self {
        self.step_minutes = minutes.max(1);
        self
    }

    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// Busy intervals of every participant whose meeting starts inside the range.
    pub fn busy_intervals(
        &self,
        dataset: &Dataset,
        participants: &[String],
        range_start: Instant,
        range_end: Instant,
    ) -> Vec<TimeInterval> {
        participants
            .iter()
            .flat_map(|p| dataset.meetings_for_participant(p))
            .filter(|m| range_start <= m.start_time && m.start_time <= range_end)
            .map(|m| m.interval())
            .collect()
    }

    /// Grid-aligned free slots of `duration_minutes` within the range.
    ///
    /// A duration chrono cannot represent is an error. A candidate whose end
    /// falls past the calendar limit ends the walk like any other candidate
    /// past `range_end`.
    pub fn find(
        &self,
        dataset: &Dataset,
        participants: &[String],
        duration_minutes: i64,
        range_start: Instant,
        range_end: Instant,
    ) -> Result<Vec<Slot>> {
        let length = time::try_minutes(duration_minutes)?;
        let step = time::try_minutes(self.step_minutes)?;
        let busy = self.busy_intervals(dataset, participants, range_start, range_end);
        let mut slots = Vec::new();
        let mut cursor = range_start;

        while slots.len() < self.max_slots {
            let Some(end) = cursor.checked_add_signed(length) else {
                break;
            };
            if end > range_end {
                break;
            }
            let candidate = TimeInterval::new(cursor, end);
            if !busy.iter().any(|b| candidate.overlaps(b)) {
                slots.push(Slot::new(candidate, duration_minutes));
            }
            match cursor.checked_add_signed(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(slots)
    }
}

impl Default for SlotFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper over [`SlotFinder`] with the hourly grid.
pub fn find_available_slots(
    dataset: &Dataset,
    participants: &[String],
    duration_minutes: i64,
    range_start: Instant,
    range_end: Instant,
) -> Result<Vec<Slot>> {
    SlotFinder::new().find(dataset, participants, duration_minutes, range_start, range_end)
}

/// Five ranked 09:00 slots on the days following `now`.
///
/// Scores run 10 down to 6 and the first two are recommended. Participants'
/// calendars are not consulted.
/// Fails when `duration_minutes` or one of the days is out of range.
pub fn find_optimal_slots(duration_minutes: i64, now: Instant) -> Result<Vec<ScoredSlot>> {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    let today = now.date_naive();

    (0..MAX_SLOTS)
        .map(|index| {
            let day = today
                .checked_add_days(Days::new(index as u64 + 1))
                .ok_or_else(|| CoreError::TimeOutOfRange(format!("{today} plus {} days", index + 1)))?;
            let start = day.and_time(nine).and_utc().fixed_offset();
            Ok(ScoredSlot {
                slot: Slot::new(TimeInterval::from_minutes(start, duration_minutes)?, duration_minutes),
                ai_score: 10 - index as u32,
                recommended: index < RECOMMENDED_SLOTS,
            })
        })
        .collect()
}
