//! Integration tests for the HTTP serving endpoint

use actix_web::{test, web, App};
use std::path::PathBuf;
use std::sync::Arc;
use tasterank_engine::server;
use tasterank_engine::{
    AppState, ModelState, RatingRow, RatingStore, ServiceConfig, ServingModel, SvdConfig,
    SvdTrainer,
};

fn row(user_id: &str, item_id: &str, rating: f32) -> RatingRow {
    RatingRow {
        user_id: user_id.to_string(),
        item_id: item_id.to_string(),
        rating,
    }
}

fn test_state() -> web::Data<AppState> {
    let store = RatingStore::from_rows(
        &[
            row("u1", "i1", 5.0),
            row("u1", "i2", 1.0),
            row("u2", "i1", 4.0),
            row("u2", "i3", 5.0),
            row("u3", "i2", 5.0),
        ],
        1.0,
        5.0,
    )
    .unwrap();
    let model = SvdTrainer::new(SvdConfig {
        factors: 8,
        epochs: 40,
        ..SvdConfig::default()
    })
    .fit(&store)
    .unwrap();

    web::Data::new(AppState {
        models: Arc::new(ModelState::new(ServingModel { store, model })),
        config: ServiceConfig {
            host: "127.0.0.1".to_string(),
            port: 8082,
            workers: None,
            model_path: PathBuf::from("unused.bin"),
            default_count: 5,
            max_count: 100,
            min_score: 1.0,
        },
    })
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(test_state())
                .route("/health", web::get().to(server::health_check))
                .configure(server::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tasterank-service");
}

#[actix_web::test]
async fn test_recommendations_for_known_user() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations?user_id=u1&count=2")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["user_id"], "u1");
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations.len() <= 2);
    for item in recommendations {
        // u1 has already rated i1 and i2
        assert_ne!(item, "i1");
        assert_ne!(item, "i2");
    }
}

#[actix_web::test]
async fn test_unknown_user_gets_empty_recommendations() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations?user_id=nonexistent_user_999")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["user_id"], "nonexistent_user_999");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_missing_user_id_is_bad_request() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_count_is_capped_at_configured_maximum() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations?user_id=u3&count=100000")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    // The store only has 3 items; the cap just must not error.
    assert!(body["recommendations"].as_array().unwrap().len() <= 100);
}
