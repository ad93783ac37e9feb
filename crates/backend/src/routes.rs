use axum::{routing::get, Router};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Form descriptors
        .route("/api/fields/:entity", get(handlers::fields::get_fields))
        // Resumes
        .route(
            "/api/resumes",
            get(handlers::a001_resume::list_all).post(handlers::a001_resume::create),
        )
        .route(
            "/api/resumes/:id",
            get(handlers::a001_resume::get_by_id)
                .put(handlers::a001_resume::update)
                .delete(handlers::a001_resume::delete),
        )
        // Postings
        .route(
            "/api/postings",
            get(handlers::a002_posting::list_all).post(handlers::a002_posting::create),
        )
        .route(
            "/api/postings/:id",
            get(handlers::a002_posting::get_by_id)
                .put(handlers::a002_posting::update)
                .delete(handlers::a002_posting::delete),
        )
        // Applications
        .route(
            "/api/applications",
            get(handlers::a003_application::list_all).post(handlers::a003_application::create),
        )
        .route(
            "/api/applications/:id",
            get(handlers::a003_application::get_by_id)
                .put(handlers::a003_application::update)
                .delete(handlers::a003_application::delete),
        )
        // Response types
        .route(
            "/api/response_types",
            get(handlers::a004_response_type::list_all)
                .post(handlers::a004_response_type::create),
        )
        .route(
            "/api/response_types/:id",
            get(handlers::a004_response_type::get_by_id)
                .put(handlers::a004_response_type::update)
                .delete(handlers::a004_response_type::delete),
        )
        // Responses
        .route(
            "/api/responses",
            get(handlers::a005_response::list_all).post(handlers::a005_response::create),
        )
        .route(
            "/api/responses/:id",
            get(handlers::a005_response::get_by_id)
                .put(handlers::a005_response::update)
                .delete(handlers::a005_response::delete),
        )
}
