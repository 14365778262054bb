//! HTTP handlers and route configuration.

mod health;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};

use agora_shared::ErrorResponse;

use crate::graphql;
use crate::observability::RequestId;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .route(web::post().to(graphql::graphql_handler))
            .route(web::get().to(graphql::graphiql)),
    )
    .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}

/// Fallback for unknown routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let mut body = ErrorResponse::not_found(format!("No route for {} {}", req.method(), req.path()));
    if let Some(id) = req.extensions().get::<RequestId>() {
        body = body.with_request_id(id.as_str());
    }

    HttpResponse::NotFound()
        .content_type("application/problem+json")
        .json(body)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};

    use super::*;

    #[actix_web::test]
    async fn test_unknown_route_is_problem_json() {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;

        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, 404);
        assert_eq!(body.detail.as_deref(), Some("No route for GET /nowhere"));
    }
}
