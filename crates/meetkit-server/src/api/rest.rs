//! REST router.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::handlers::{
    analyze_patterns_handler, calculate_workload_handler, create_meeting_handler,
    detect_conflicts_handler, find_available_slots_handler, find_optimal_slots_handler,
    generate_agenda_handler, health_handler, optimize_schedule_handler,
    score_effectiveness_handler, ApiState,
};

/// Create the API router.
///
/// Endpoints:
/// - GET  /health
/// - POST /create_meeting
/// - POST /find_optimal_slots
/// - POST /find_available_slots
/// - POST /detect_scheduling_conflicts
/// - POST /analyze_meeting_patterns
/// - POST /generate_agenda_suggestions
/// - POST /calculate_workload_balance
/// - POST /score_meeting_effectiveness
/// - POST /optimize_meeting_schedule
pub fn create_router(state: Arc<ApiState>, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/create_meeting", post(create_meeting_handler))
        .route("/find_optimal_slots", post(find_optimal_slots_handler))
        .route("/find_available_slots", post(find_available_slots_handler))
        .route("/detect_scheduling_conflicts", post(detect_conflicts_handler))
        .route("/analyze_meeting_patterns", post(analyze_patterns_handler))
        .route("/generate_agenda_suggestions", post(generate_agenda_handler))
        .route("/calculate_workload_balance", post(calculate_workload_handler))
        .route("/score_meeting_effectiveness", post(score_effectiveness_handler))
        .route("/optimize_meeting_schedule", post(optimize_schedule_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}
