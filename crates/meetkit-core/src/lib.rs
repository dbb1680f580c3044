//! # Meetkit Core Library
//!
//! Scheduling analytics over an in-memory meeting dataset. The HTTP service
//! in `meetkit-server` is a thin layer over the operations exposed here.
//!
//! ## Architecture
//!
//! - **Store**: the dataset is loaded once from a JSON fixture and held behind
//!   a lock; meeting creation is the only mutation
//! - **Time**: offset-preserving timestamps with a lenient parser that falls
//!   back to the current instant
//! - **Analytics**: conflict detection, slot search, pattern analysis,
//!   agenda templates, workload balance, effectiveness scoring and
//!   schedule optimization, all pure functions over a [`Dataset`]
//! - **Config**: TOML configuration for the service
//!
//! ## Key Components
//!
//! - [`MeetingStore`]: shared dataset with atomic meeting creation
//! - [`Meeting`]: a scheduled meeting
//! - [`Config`]: service configuration management

pub mod agenda;
pub mod config;
pub mod conflicts;
pub mod effectiveness;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod patterns;
pub mod slots;
pub mod store;
pub mod time;
pub mod workload;

pub use agenda::{suggest_agenda, AgendaSuggestions, AgendaTemplate};
pub use config::{Config, DataConfig, LoggingConfig, ServerConfig};
pub use conflicts::{detect_conflicts_in_range, find_conflicts, ConflictRecord, RangeConflict};
pub use effectiveness::{score_effectiveness, EffectivenessReport, ScoreBreakdown};
pub use error::{ConfigError, CoreError, FixtureError, Result};
pub use model::{Dataset, Meeting, MeetingPreferences, NewMeeting, UserPreference};
pub use optimizer::{optimize_schedule, OptimizationReport, Recommendation};
pub use patterns::{analyze_patterns, PatternSummary};
pub use slots::{find_available_slots, find_optimal_slots, ScoredSlot, Slot, SlotFinder};
pub use store::{CreatedMeeting, MeetingStore};
pub use time::{parse_instant, Instant};
pub use workload::{compute_balance, BalanceReport, MemberWorkload};
