use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::app::AppContext;
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub tournaments: TournamentHealth,
    pub storage: StorageHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TournamentHealth {
    pub active_sessions: usize,
    pub tracked_users: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageHealth {
    pub status: String,
    pub categories: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let state = AppState {
            ctx,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let storage_ok = images_root_available(&state.ctx);

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let health_response = HealthResponse {
        status: if storage_ok { "healthy".to_string() } else { "unhealthy".to_string() },
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tournaments: TournamentHealth {
            active_sessions: state.ctx.registry().active_count(),
            tracked_users: state.ctx.stats.len(),
        },
        storage: StorageHealth {
            status: if storage_ok { "healthy".to_string() } else { "missing images root".to_string() },
            categories: state.ctx.categories().len(),
        },
        uptime_seconds: uptime,
    };

    if storage_ok {
        Ok(Json(health_response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    // Ready once the curated images are mounted
    if images_root_available(&state.ctx) {
        Ok(Json("ready"))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

fn images_root_available(ctx: &AppContext) -> bool {
    ctx.images_root.is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Categories;
    use crate::storage::{PhotoGallery, StatsStore};
    use crate::tournament::ThreadRngShuffler;
    use axum_test::TestServer;
    use tempfile::TempDir;

    fn create_test_health_service(with_images: bool) -> (HealthService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let images_root = temp_dir.path().join("images");
        if with_images {
            std::fs::create_dir_all(images_root.join("cats")).expect("Failed to create images dir");
        }

        let ctx = AppContext::with_parts(
            images_root,
            Arc::new(PhotoGallery::new(temp_dir.path().join("uploads"), 10)),
            Arc::new(StatsStore::load(temp_dir.path().join("stats.json"))),
            Categories::default(),
            Arc::new(ThreadRngShuffler),
        );

        (HealthService::new(Arc::new(ctx)), temp_dir)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (health_service, _temp_dir) = create_test_health_service(true);
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.storage.status, "healthy");
        assert_eq!(health_response.storage.categories, 3);
        assert_eq!(health_response.tournaments.active_sessions, 0);
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_endpoint_without_images_root() {
        let (health_service, _temp_dir) = create_test_health_service(false);
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").expect_failure().await;

        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (health_service, _temp_dir) = create_test_health_service(true);
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let ready_response: String = response.json();
        assert_eq!(ready_response, "ready");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (health_service, _temp_dir) = create_test_health_service(false);
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
