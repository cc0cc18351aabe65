use axum::{
    routing::get,
    Router,
    response::{IntoResponse, Response},
    extract::State,
    Json,
};

use tracing::debug;
use serde::Serialize;

use crate::state::app_state::AppState;


pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(info_check))
        .with_state(state)
}

pub async fn info_check(State(state): State<AppState>) -> Response {
    debug!("{} info requested", state.config.name);
    Json(state.config.as_ref()).into_response()
}

async fn health_check(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;

    Json(HealthStatus {
        status: "ok".to_owned(),
        session: session.id().to_string(),
        samples: session.buffer().len(),
    })
    .into_response()
}


#[derive(Serialize)]
pub struct HealthStatus {
    status: String,
    session: String,
    samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::client::simulated::SimulatedSource;
    use crate::client::AnySource;
    use crate::models::dashboard_model::DashboardConfig;

    fn state() -> AppState {
        let mut config = DashboardConfig::default();
        config.name = "wasser".to_string();
        let source = AnySource::Simulated(SimulatedSource::new(0.0, 1.0, Some(1)));
        AppState::new(config, source).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_session() {
        let resp = health_check(State(state())).await;
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["samples"], 0);
    }

    #[tokio::test]
    async fn test_info_echoes_config() {
        let resp = info_check(State(state())).await;
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["name"], "wasser");
        assert_eq!(json["buffer"]["capacity"], 86_400);
    }
}
