//! Health check endpoint.

use actix_web::{HttpResponse, web};

use agora_shared::HealthResponse;

use crate::state::AppState;

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    tracing::trace!(storage = state.storage.as_str(), "Health check");
    HttpResponse::Ok().json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};

    use agora_infra::{InMemoryStore, JwtConfig};

    use super::*;
    use crate::state::StorageBackend;

    #[actix_web::test]
    async fn test_health_ok() {
        let state = AppState::with_store(
            InMemoryStore::new().into_data_store(),
            StorageBackend::InMemory,
            JwtConfig::new("health-secret"),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
