//! Request handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use meetkit_core::time::{self, Instant};
use meetkit_core::{
    AgendaSuggestions, BalanceReport, ConflictRecord, CoreError, EffectivenessReport, Meeting,
    MeetingStore, NewMeeting, OptimizationReport, PatternSummary, RangeConflict, ScoredSlot, Slot,
};

use crate::api::error::ApiError;

/// Application state shared across handlers.
pub struct ApiState {
    pub store: MeetingStore,
}

impl ApiState {
    pub fn new(store: MeetingStore) -> Self {
        Self { store }
    }
}

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Success envelope: `{"status": "success", ...body}`.
#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub body: T,
}

fn success<T>(body: T) -> ApiResult<T> {
    Ok(Json(Success {
        status: "success",
        body,
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub meetings: usize,
    pub users: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMeetingResponse {
    pub meeting: Meeting,
    pub conflicts_detected: Vec<ConflictRecord>,
    pub message: String,
}

/// Slot search request.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotRequest {
    pub participants: Vec<String>,
    /// Minutes.
    pub duration: i64,
    /// `[start, end]`. Required by the available-slot search only.
    #[serde(default)]
    pub date_range: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimalSlotsResponse {
    pub optimal_slots: Vec<ScoredSlot>,
    pub participants: Vec<String>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableSlotsResponse {
    pub available_slots: Vec<Slot>,
    pub participants: Vec<String>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConflictRequest {
    pub user_id: String,
    /// `[start, end]`, inclusive.
    pub time_range: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictResponse {
    pub user_id: String,
    pub time_range: Vec<String>,
    pub conflicts_found: usize,
    pub conflicts: Vec<RangeConflict>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub user_id: String,
    /// Echoed back only; analysis always covers every stored meeting.
    #[serde(default = "default_period")]
    pub period: String,
}

fn default_period() -> String {
    "month".into()
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternResponse {
    pub user_id: String,
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgendaRequest {
    pub meeting_topic: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaResponse {
    pub meeting_topic: String,
    pub participants: Vec<String>,
    #[serde(flatten)]
    pub suggestions: AgendaSuggestions,
    pub ai_enhanced: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadRequest {
    pub team_members: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadResponse {
    pub team_members: Vec<String>,
    #[serde(flatten)]
    pub report: BalanceReport,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectivenessRequest {
    pub meeting_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessResponse {
    #[serde(flatten)]
    pub report: EffectivenessReport,
    pub ai_analysis: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    pub user_id: String,
    #[serde(flatten)]
    pub report: Option<OptimizationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn parse_range(field: &str, range: &[String]) -> meetkit_core::Result<(Instant, Instant)> {
    match range {
        [start, end] => Ok((time::parse_instant(start), time::parse_instant(end))),
        _ => Err(CoreError::InvalidRequest(format!(
            "{field} must contain exactly two timestamps, got {}",
            range.len()
        ))),
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET /health
pub async fn health_handler(State(state): State<Arc<ApiState>>) -> ApiResult<HealthResponse> {
    success(HealthResponse {
        service: "meetkit",
        version: env!("CARGO_PKG_VERSION"),
        meetings: state.store.meeting_count()?,
        users: state.store.user_count()?,
    })
}

/// POST /create_meeting
pub async fn create_meeting_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<NewMeeting>,
) -> ApiResult<CreateMeetingResponse> {
    let title = request.title.clone();
    let created = state.store.create_meeting(request, time::now())?;
    let message = format!("Meeting '{title}' created successfully");

    success(CreateMeetingResponse {
        meeting: created.meeting,
        conflicts_detected: created.conflicts,
        message,
    })
}

/// POST /find_optimal_slots
pub async fn find_optimal_slots_handler(
    Json(request): Json<SlotRequest>,
) -> ApiResult<OptimalSlotsResponse> {
    if let Some(range) = &request.date_range {
        parse_range("date_range", range)?;
    }

    success(OptimalSlotsResponse {
        optimal_slots: meetkit_core::find_optimal_slots(request.duration, time::now())?,
        participants: request.participants,
        duration_minutes: request.duration,
    })
}

/// POST /find_available_slots
pub async fn find_available_slots_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SlotRequest>,
) -> ApiResult<AvailableSlotsResponse> {
    let range = request
        .date_range
        .as_deref()
        .ok_or_else(|| CoreError::InvalidRequest("date_range is required".into()))?;
    let (start, end) = parse_range("date_range", range)?;

    let available_slots = state.store.read(|d| {
        meetkit_core::find_available_slots(d, &request.participants, request.duration, start, end)
    })??;

    success(AvailableSlotsResponse {
        available_slots,
        participants: request.participants,
        duration_minutes: request.duration,
    })
}

/// POST /detect_scheduling_conflicts
pub async fn detect_conflicts_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ConflictRequest>,
) -> ApiResult<ConflictResponse> {
    let (start, end) = parse_range("time_range", &request.time_range)?;
    let conflicts = state
        .store
        .read(|d| meetkit_core::detect_conflicts_in_range(d, &request.user_id, start, end))?;

    success(ConflictResponse {
        user_id: request.user_id,
        time_range: request.time_range,
        conflicts_found: conflicts.len(),
        conflicts,
    })
}

/// POST /analyze_meeting_patterns
pub async fn analyze_patterns_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<UserRequest>,
) -> ApiResult<PatternResponse> {
    let patterns = state
        .store
        .read(|d| meetkit_core::analyze_patterns(d, &request.user_id))?;
    let message = patterns
        .is_none()
        .then(|| "No meetings found for this user in the specified period".to_string());

    success(PatternResponse {
        user_id: request.user_id,
        period: request.period,
        patterns,
        message,
    })
}

/// POST /generate_agenda_suggestions
pub async fn generate_agenda_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AgendaRequest>,
) -> ApiResult<AgendaResponse> {
    let suggestions = state.store.read(|d| {
        meetkit_core::suggest_agenda(d, &request.meeting_topic, &request.participants)
    })?;

    success(AgendaResponse {
        meeting_topic: request.meeting_topic,
        participants: request.participants,
        suggestions,
        ai_enhanced: true,
    })
}

/// POST /calculate_workload_balance
pub async fn calculate_workload_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<WorkloadRequest>,
) -> ApiResult<WorkloadResponse> {
    let report = state
        .store
        .read(|d| meetkit_core::compute_balance(d, &request.team_members))?;

    success(WorkloadResponse {
        team_members: request.team_members,
        report,
    })
}

/// POST /score_meeting_effectiveness
pub async fn score_effectiveness_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<EffectivenessRequest>,
) -> ApiResult<EffectivenessResponse> {
    let meeting = state.store.meeting(&request.meeting_id)?;
    let report = meetkit_core::score_effectiveness(&meeting);

    success(EffectivenessResponse {
        report,
        ai_analysis: true,
    })
}

/// POST /optimize_meeting_schedule
pub async fn optimize_schedule_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<UserRequest>,
) -> ApiResult<OptimizeResponse> {
    let report = state
        .store
        .read(|d| meetkit_core::optimize_schedule(d, &request.user_id))?;
    let message = report
        .is_none()
        .then(|| "No meetings found for optimization".to_string());

    success(OptimizeResponse {
        user_id: request.user_id,
        report,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use meetkit_core::Dataset;

    const FIXTURE: &str = r#"{
        "meetings": [
            {"id": "m1", "title": "Team Sync", "participants": ["alice", "bob", "carol"],
             "start_time": "2024-01-15T09:00:00Z", "end_time": "2024-01-15T10:00:00Z",
             "agenda": "Progress updates and blockers for the week",
             "meeting_type": "team_sync", "effectiveness_score": 8.5},
            {"id": "m2", "title": "Late review", "participants": ["alice"],
             "start_time": "2024-01-15T19:00:00Z", "end_time": "2024-01-15T20:00:00Z",
             "meeting_type": "review"}
        ],
        "users": [{"user_id": "alice", "meeting_preferences": {"max_daily_meetings": 4}}]
    }"#;

    fn state() -> State<Arc<ApiState>> {
        let dataset: Dataset = serde_json::from_str(FIXTURE).unwrap();
        State(Arc::new(ApiState::new(MeetingStore::new(dataset))))
    }

    fn range(start: &str, end: &str) -> Vec<String> {
        vec![start.to_string(), end.to_string()]
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let Json(body) = health_handler(state()).await.unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["service"], "meetkit");
        assert_eq!(json["meetings"], 2);
        assert_eq!(json["users"], 1);
    }

    #[tokio::test]
    async fn test_create_meeting_reports_conflicts() {
        let state = state();
        let request = NewMeeting::new("Overlap", vec!["bob".into()], 30).starting_at("2024-01-15T09:30:00Z");
        let Json(body) = create_meeting_handler(state.clone(), Json(request)).await.unwrap();

        assert_eq!(body.body.meeting.id, "m3");
        assert_eq!(body.body.conflicts_detected.len(), 1);
        assert_eq!(body.body.conflicts_detected[0].conflicting_meeting, "Team Sync");
        assert_eq!(body.body.message, "Meeting 'Overlap' created successfully");
        assert_eq!(state.0.store.meeting_count().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_meeting_without_conflicts() {
        let request = NewMeeting::new("After", vec!["bob".into()], 30).starting_at("2024-01-15T10:00:00Z");
        let Json(body) = create_meeting_handler(state(), Json(request)).await.unwrap();
        assert!(body.body.conflicts_detected.is_empty());
        assert_eq!(body.body.message, "Meeting 'After' created successfully");
    }

    #[tokio::test]
    async fn test_create_meeting_with_huge_duration_is_bad_request() {
        let state = state();
        let request = NewMeeting::new("Forever", vec!["bob".into()], i64::MAX).starting_at("2024-01-15T09:00:00Z");
        let err = create_meeting_handler(state.clone(), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_request");

        // The store keeps serving after the rejected request.
        assert_eq!(state.0.store.meeting_count().unwrap(), 2);
        let request = NewMeeting::new("Next", vec!["bob".into()], 30).starting_at("2024-01-15T11:00:00Z");
        let Json(body) = create_meeting_handler(state, Json(request)).await.unwrap();
        assert_eq!(body.body.meeting.id, "m3");
    }

    #[tokio::test]
    async fn test_optimal_slots_are_fixed() {
        let request = SlotRequest {
            participants: vec!["alice".into()],
            duration: 60,
            date_range: None,
        };
        let Json(body) = find_optimal_slots_handler(Json(request)).await.unwrap();
        let scores: Vec<u32> = body.body.optimal_slots.iter().map(|s| s.ai_score).collect();
        assert_eq!(scores, vec![10, 9, 8, 7, 6]);
        assert_eq!(body.body.duration_minutes, 60);
    }

    #[tokio::test]
    async fn test_optimal_slots_with_huge_duration_is_bad_request() {
        let request = SlotRequest {
            participants: vec!["alice".into()],
            duration: i64::MAX,
            date_range: None,
        };
        let err = find_optimal_slots_handler(Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_request");
    }

    #[tokio::test]
    async fn test_available_slots_with_huge_duration_is_bad_request() {
        let request = SlotRequest {
            participants: vec!["alice".into()],
            duration: i64::MIN,
            date_range: Some(range("2024-01-15T08:00:00Z", "2024-01-15T12:00:00Z")),
        };
        let err = find_available_slots_handler(state(), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_available_slots_require_two_element_range() {
        let request = SlotRequest {
            participants: vec!["alice".into()],
            duration: 60,
            date_range: Some(vec!["2024-01-15T08:00:00Z".into()]),
        };
        let err = find_available_slots_handler(state(), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_request");
    }

    #[tokio::test]
    async fn test_available_slots_skip_busy_time() {
        let request = SlotRequest {
            participants: vec!["alice".into()],
            duration: 60,
            date_range: Some(range("2024-01-15T08:00:00Z", "2024-01-15T12:00:00Z")),
        };
        let Json(body) = find_available_slots_handler(state(), Json(request)).await.unwrap();
        let starts: Vec<String> = body
            .body
            .available_slots
            .iter()
            .map(|s| s.start_time.to_rfc3339())
            .collect();
        assert_eq!(
            starts,
            vec![
                "2024-01-15T08:00:00+00:00",
                "2024-01-15T10:00:00+00:00",
                "2024-01-15T11:00:00+00:00"
            ]
        );
    }

    #[tokio::test]
    async fn test_detect_conflicts_in_range() {
        let request = ConflictRequest {
            user_id: "alice".into(),
            time_range: range("2024-01-15T10:00:00Z", "2024-01-15T18:00:00Z"),
        };
        let Json(body) = detect_conflicts_handler(state(), Json(request)).await.unwrap();
        assert_eq!(body.body.conflicts_found, 1);
        assert_eq!(body.body.conflicts[0].meeting_id, "m1");
    }

    #[tokio::test]
    async fn test_detect_conflicts_rejects_bad_range() {
        let request = ConflictRequest {
            user_id: "alice".into(),
            time_range: vec![],
        };
        let err = detect_conflicts_handler(state(), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patterns_for_unknown_user_has_message() {
        let request = UserRequest {
            user_id: "zoe".into(),
            period: default_period(),
        };
        let Json(body) = analyze_patterns_handler(state(), Json(request)).await.unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "No meetings found for this user in the specified period");
        assert!(json.get("patterns").is_none());
    }

    #[tokio::test]
    async fn test_agenda_response_shape() {
        let request = AgendaRequest {
            meeting_topic: "Team Sync".into(),
            participants: vec!["bob".into()],
        };
        let Json(body) = generate_agenda_handler(state(), Json(request)).await.unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ai_enhanced"], true);
        assert_eq!(json["based_on_history"], 1);
        assert_eq!(json["agenda_suggestions"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_workload_flattens_report() {
        let request = WorkloadRequest {
            team_members: vec!["alice".into(), "dave".into()],
        };
        let Json(body) = calculate_workload_handler(state(), Json(request)).await.unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["workload_distribution"]["alice"]["preference_limit"], 4);
        assert_eq!(json["balance_analysis"]["balance_score"], 0.0);
    }

    #[tokio::test]
    async fn test_score_unknown_meeting_is_not_found() {
        let request = EffectivenessRequest {
            meeting_id: "m99".into(),
        };
        let err = score_effectiveness_handler(state(), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "not_found");
    }

    #[tokio::test]
    async fn test_score_meeting() {
        let request = EffectivenessRequest {
            meeting_id: "m1".into(),
        };
        let Json(body) = score_effectiveness_handler(state(), Json(request)).await.unwrap();
        assert_eq!(body.body.report.effectiveness_score, 9.3);
        assert!(body.body.ai_analysis);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ai_analysis"], true);
    }

    #[tokio::test]
    async fn test_optimize_schedule() {
        let request = UserRequest {
            user_id: "alice".into(),
            period: default_period(),
        };
        let Json(body) = optimize_schedule_handler(state(), Json(request)).await.unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["optimization_score"], 90);
        assert_eq!(json["recommendations"][0]["type"], "non_business_hours");
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_optimize_schedule_without_meetings() {
        let request = UserRequest {
            user_id: "zoe".into(),
            period: default_period(),
        };
        let Json(body) = optimize_schedule_handler(state(), Json(request)).await.unwrap();
        assert!(body.body.report.is_none());
        assert_eq!(body.body.message.as_deref(), Some("No meetings found for optimization"));
    }
}
