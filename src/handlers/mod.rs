//! HTTP handlers
//!
//! This module contains the axum handlers for every API resource and the
//! router assembling them.

pub mod admin;
pub mod bookings;
pub mod chat;
pub mod events;
pub mod favorites;
pub mod health;
pub mod payments;
pub mod users;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::config::settings::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::middleware::auth::AuthVerifier;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::services::ServiceFactory;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub database: DatabaseService,
    pub pool: DatabasePool,
    pub auth: AuthVerifier,
    pub rate_limit: RateLimitMiddleware,
    pub settings: Settings,
}

impl FromRef<AppState> for AuthVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Catalog
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/bookings", get(events::event_attendees))
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        .route("/users/:id/bookings", get(bookings::user_bookings))
        // Profiles
        .route(
            "/users/:id",
            get(users::get_profile).post(users::upsert_profile),
        )
        .route("/users/:id/hosted-events", get(users::hosted_events))
        // Favorites
        .route("/favorites/toggle", post(favorites::toggle_favorite))
        .route("/users/:id/favorites", get(favorites::list_favorites))
        .route(
            "/users/:id/favorites/:event_id/check",
            get(favorites::check_favorite),
        )
        // Payments
        .route("/create-order", post(payments::create_order))
        .route("/verify-payment", post(payments::verify_payment))
        // Chat
        .route(
            "/chat/:channel/messages",
            get(chat::get_messages).post(chat::post_message),
        )
        .route("/chat/:channel/stream", get(chat::stream_messages))
        // Admin
        .route("/admin/events/pending", get(admin::pending_events))
        .route("/admin/events/history", get(admin::event_history))
        .route("/admin/events/:id/approve", post(admin::approve_event))
        .route("/admin/events/:id/reject", post(admin::reject_event))
        .route("/admin/stats", get(admin::stats));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}
