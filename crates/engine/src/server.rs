//! HTTP serving layer
//!
//! Exposes the single serving operation: `GET /api/v1/recommendations`
//! returning the ranked raw item ids for a raw user id. Unknown users get
//! an explicit empty list, not a fault.

use crate::config::ServiceConfig;
use crate::recommender::Recommender;
use crate::state::ModelState;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Application state shared across all handlers
pub struct AppState {
    pub models: Arc<ModelState>,
    pub config: ServiceConfig,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    user_id: Option<String>,
    count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub user_id: String,
    pub recommendations: Vec<String>,
}

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/recommendations", web::get().to(get_recommendations)),
    );
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tasterank-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn get_recommendations(
    query: web::Query<RecommendQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let Some(user_id) = query.user_id else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "user_id query parameter is required"
        }));
    };

    let count = query
        .count
        .unwrap_or(state.config.default_count)
        .min(state.config.max_count);

    // Snapshot the published bundle; a concurrent republish cannot tear it.
    let serving = state.models.current();
    let recommender = Recommender::new(&serving.store, &serving.model);

    match recommender.recommend(&user_id, count, state.config.min_score) {
        Ok(recommendations) => {
            debug!(
                user_id = %user_id,
                count,
                returned = recommendations.len(),
                "Recommendation request served"
            );
            HttpResponse::Ok().json(RecommendationResponse {
                user_id,
                recommendations,
            })
        }
        Err(err) => {
            error!(user_id = %user_id, error = %err, "Recommendation request failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "failed to generate recommendations"
            }))
        }
    }
}
