//! HTTP API Layer
//!
//! REST API for the SecureBank insurance platform using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Authentication, audit logging, tracing
//! - **DTOs**: Request/response data transfer objects
//! - **Uploads**: Multipart file storage for claim documents and photos
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod uploads;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_customer::{SimulatedVerifier, VerificationProvider};
use domain_policy::Catalog;

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, claims, customers, health, policies, schemes, support};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: ApiConfig,
    pub catalog: Arc<Catalog>,
    pub verifier: Arc<dyn VerificationProvider>,
}

/// Creates the main API router with the simulated verification provider
pub fn create_router(pool: SqlitePool, config: ApiConfig) -> Router {
    create_router_with_verifier(pool, config, Arc::new(SimulatedVerifier))
}

/// Creates the main API router with an explicit verification provider
pub fn create_router_with_verifier(
    pool: SqlitePool,
    config: ApiConfig,
    verifier: Arc<dyn VerificationProvider>,
) -> Router {
    let state = AppState {
        pool,
        config,
        catalog: Arc::new(Catalog::standard()),
        verifier,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/auth/register", post(auth_handlers::register))
        .route("/api/v1/auth/login", post(auth_handlers::login));

    let scheme_routes = Router::new()
        .route("/", get(schemes::list_schemes))
        .route("/:code", get(schemes::get_scheme))
        .route("/:code/quote", get(schemes::quote_scheme));

    let policy_routes = Router::new()
        .route("/", post(policies::create_policy))
        .route("/", get(policies::list_policies))
        .route("/:id", get(policies::get_policy))
        .route("/:id/cancel", post(policies::cancel_policy));

    let claim_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/status", put(claims::update_claim_status));

    let customer_routes = Router::new()
        .route("/me", get(customers::me))
        .route("/me/photo", post(customers::upload_photo));

    let support_routes = Router::new()
        .route("/reports", post(support::create_report))
        .route("/reports", get(support::list_reports))
        .route("/reports/:id/status", put(support::update_report_status));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/schemes", scheme_routes)
        .nest("/policies", policy_routes)
        .nest("/claims", claim_routes)
        .nest("/customers", customer_routes)
        .nest("/support", support_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
