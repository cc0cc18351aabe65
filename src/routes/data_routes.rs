use axum::{
    routing::{get, post},
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
    extract::{Query, State},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use tseries::core::constants::CATALOGUE;
use tseries::{
    option_by_label, reconstruct_history, BufferProfile, Clock, GranularityOption,
    SampleSource, Session,
};

use crate::state::app_state::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct SeriesQuery {
    pub granularity: Option<String>,
    pub lookback_hours: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct HistoryQuery {
    pub seconds: Option<u64>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrentResponse {
    Loading,
    Ready { value: f64, timestamp: i64 },
}

#[derive(Serialize, Debug)]
pub struct GranularityResponse {
    pub options: Vec<GranularityOption>,
    pub recommended: GranularityOption,
    pub sample_count: usize,
}

#[derive(Serialize, Debug)]
pub struct HistoryResponse {
    pub session: Uuid,
    pub added: usize,
    pub sample_count: usize,
    pub recommended: GranularityOption,
}

#[derive(Serialize, Debug)]
pub struct SessionResponse {
    pub session: Uuid,
    pub profile: BufferProfile,
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

fn reject(status: StatusCode, message: String) -> Response {
    warn!("{} {}", status, message);
    (status, Json(ErrorBody { error: message })).into_response()
}


/// =======================
/// ROUTER
/// =======================

pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/current", get(current))
        .route("/granularities", get(granularities))
        .route("/series", get(series))
        .route("/history/load", post(load_history))
        .route("/session/reset", post(reset_session))
        .with_state(state)
}


/// =======================
/// HANDLERS
/// =======================

pub async fn current(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;

    let body = match session.buffer().latest() {
        Some(sample) => CurrentResponse::Ready {
            value: sample.value,
            timestamp: sample.timestamp,
        },
        None => CurrentResponse::Loading,
    };

    Json(body).into_response()
}

pub async fn granularities(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;

    Json(GranularityResponse {
        options: CATALOGUE.to_vec(),
        recommended: session.recommended(),
        sample_count: session.buffer().len(),
    })
    .into_response()
}

pub async fn series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Response {
    let view_config = &state.config.view;

    let lookback_hours = query.lookback_hours.unwrap_or(view_config.lookback_hours);
    if !(0.0..=view_config.max_lookback_hours).contains(&lookback_hours) {
        return reject(
            StatusCode::BAD_REQUEST,
            format!(
                "lookback_hours {} outside [0, {}]",
                lookback_hours, view_config.max_lookback_hours
            ),
        );
    }

    let granularity = match query.granularity.as_ref().or(view_config.granularity.as_ref()) {
        Some(label) => match option_by_label(label) {
            Some(option) => Some(option),
            None => {
                return reject(
                    StatusCode::BAD_REQUEST,
                    format!("unknown granularity '{}'", label),
                )
            }
        },
        None => None,
    };

    debug!("series: granularity={:?}, lookback_hours={}", granularity, lookback_hours);

    let session = state.session.read().await;
    match session.view(granularity, lookback_hours) {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            error!("series projection failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn load_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let seconds = query.seconds.unwrap_or(state.config.source.history_seconds);

    // bounded by what the buffer can retain
    let capacity = state.session.read().await.buffer().capacity();
    if seconds > capacity as u64 {
        return reject(
            StatusCode::BAD_REQUEST,
            format!("seconds {} exceeds buffer capacity {}", seconds, capacity),
        );
    }

    // fetch without holding the session lock
    let values = match state.source.fetch_history(seconds).await {
        Ok(values) => values,
        Err(e) => {
            error!("History fetch failed: {}", e);
            return reject(StatusCode::BAD_GATEWAY, e.to_string());
        }
    };

    let fetched_at = state.clock.now_ms();
    let samples = reconstruct_history(&values, fetched_at, state.config.source.history_order);

    let mut session = state.session.write().await;
    let added = session.load_history(samples);

    info!("History loaded: {} samples ({} retained)", added, session.buffer().len());

    Json(HistoryResponse {
        session: session.id(),
        added,
        sample_count: session.buffer().len(),
        recommended: session.recommended(),
    })
    .into_response()
}

pub async fn reset_session(
    State(state): State<AppState>,
    Json(profile): Json<BufferProfile>,
) -> Response {
    let fresh = match Session::new(profile, state.clock.clone()) {
        Ok(session) => session,
        Err(e) => return reject(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let id = fresh.id();
    *state.session.write().await = fresh;

    Json(SessionResponse {
        session: id,
        profile,
    })
    .into_response()
}
