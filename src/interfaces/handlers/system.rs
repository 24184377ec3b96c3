use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, repositories::profile::ProfileRepository, AppState};

#[derive(Serialize)]
struct StorageStatus {
    backend: &'static str,
    status: &'static str,
}

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    uptime: String,
    timestamp: String,
    started_at: String,
    version: &'static str,
    storage: StorageStatus,
    open_drafts: usize,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let repo = &state.profile_handler.profile_repo;
    let storage_ok = match repo.check_connection().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            false
        }
    };

    let body = HealthCheckResponse {
        status: if storage_ok { "Ok" } else { "Degraded" },
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        started_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        storage: StorageStatus {
            backend: repo.backend(),
            status: if storage_ok { "OK" } else { "Unavailable" },
        },
        open_drafts: state.draft_handler.open_sessions(),
    };

    if storage_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
