//! Handler-level API tests against a fully in-memory gateway

use actix_web::{test, web};
use serde_json::{Value, json};
use tiercalc_rs::config::Config;
use tiercalc_rs::server::{AppState, HttpServer};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(Config::default()))
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[actix_web::test]
async fn test_calculate_against_builtin_catalog() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    // Starter: 10 fixed + 10 variable credits per execution, 1000 included.
    // 100 executions consume 2000 credits, so 1000 overage at 0.01.
    let request = test::TestRequest::post()
        .uri("/api/v1/pricing/calculate")
        .set_json(json!({
            "executions": 100,
            "workflow_index": 0,
            "tier_key": "starter",
            "has_byok": false
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["total_credits_per_execution"], 20.0);
    assert_eq!(body["additional_credits_needed"], 1000.0);
    assert_eq!(body["total_cost"], 60.0);
    assert_eq!(body["cost_per_execution"], 0.6);
    assert_eq!(body["resolved"], true);
    assert_eq!(body["credit_packs_needed"], 1);
}

#[actix_web::test]
async fn test_calculate_byok_discounts_variable_portion() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/pricing/calculate")
        .set_json(json!({
            "executions": 100,
            "workflow_index": 0,
            "tier_key": "starter",
            "has_byok": true
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    // Overage is 1000, all of it variable; 60% savings leaves 400.
    assert_eq!(body["additional_credits_needed"], 1000.0);
    assert_eq!(body["additional_credits_after_byok"], 400.0);
    assert_eq!(body["total_cost"], 54.0);
}

#[actix_web::test]
async fn test_calculate_unknown_tier_is_unresolved_not_error() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/pricing/calculate")
        .set_json(json!({
            "executions": 100,
            "workflow_index": 0,
            "tier_key": "platinum",
            "has_byok": false
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["resolved"], false);
    assert_eq!(body["total_cost"], 0.0);
}

#[actix_web::test]
async fn test_breakeven_returns_ordered_points() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/pricing/breakeven")
        .set_json(json!({
            "workflow_index": 4,
            "max_executions": 10000,
            "step": 50
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    let points = body["break_even_points"].as_array().unwrap();
    assert!(!points.is_empty());

    let mut previous = 0;
    for point in points {
        let volume = point["execution_volume"].as_u64().unwrap();
        assert!(volume > previous);
        previous = volume;
        assert!(point["from_tier"].is_string());
        assert!(point["to_tier"].is_string());
        assert_ne!(point["from_tier"], point["to_tier"]);
    }
}

#[actix_web::test]
async fn test_breakeven_rejects_bad_workflow_index() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/pricing/breakeven")
        .set_json(json!({"workflow_index": 99}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_chart_covers_every_tier() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/pricing/chart")
        .set_json(json!({
            "workflow_index": 0,
            "metric": "cost_per_execution",
            "max_executions": 1000,
            "samples": 10
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["metric"], "cost_per_execution");
    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 4);
    for entry in series {
        assert_eq!(entry["points"].as_array().unwrap().len(), 10);
    }
}

#[actix_web::test]
async fn test_scenario_config_round_trip() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let save = test::TestRequest::post()
        .uri("/api/scenario-config")
        .set_json(json!({"creditRate": 0.02, "scenarios": []}))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, save).await;
    let id = saved["id"].as_str().unwrap().to_string();

    let load = test::TestRequest::get()
        .uri(&format!("/api/scenario-config/{}", id))
        .to_request();
    let loaded: Value = test::call_and_read_body_json(&app, load).await;

    assert_eq!(loaded["creditRate"], 0.02);
    assert_eq!(loaded["id"], id.as_str());
}

#[actix_web::test]
async fn test_scenario_config_missing_is_404() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::get()
        .uri("/api/scenario-config/no-such-id")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 404);
}

#[actix_web::test]
async fn test_roi_report_is_stamped_and_isolated() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let save = test::TestRequest::post()
        .uri("/api/roi-report")
        .set_json(json!({"id": "report-1", "savings": 1234.5}))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, save).await;
    assert_eq!(saved["id"], "report-1");

    let load = test::TestRequest::get()
        .uri("/api/roi-report/report-1")
        .to_request();
    let loaded: Value = test::call_and_read_body_json(&app, load).await;
    assert_eq!(loaded["type"], "roi-calc");
    assert_eq!(loaded["savings"], 1234.5);

    // Same id in the scenario partition stays invisible
    let cross = test::TestRequest::get()
        .uri("/api/scenario-config/report-1")
        .to_request();
    let response = test::call_service(&app, cross).await;
    assert_eq!(response.status(), 404);
}

#[actix_web::test]
async fn test_scenario_state_defaults_then_round_trip() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    // Unknown key serves the default catalog
    let load = test::TestRequest::get()
        .uri("/api/v1/scenario-state/workspace")
        .to_request();
    let defaults: Value = test::call_and_read_body_json(&app, load).await;
    assert_eq!(defaults["credit_rate"], 0.01);
    assert_eq!(defaults["workflow_types"].as_array().unwrap().len(), 8);

    // Save with an edited rate and a scenario; results come back recomputed
    let save = test::TestRequest::put()
        .uri("/api/v1/scenario-state/workspace")
        .set_json(json!({
            "credit_rate": 0.02,
            "scenarios": [{
                "id": "s1",
                "name": "baseline",
                "executions": 100,
                "workflow_index": 0,
                "tier_key": "starter",
                "has_byok": false,
                "total_credits_per_execution": 0.0,
                "total_credits_needed": 0.0,
                "included_credits": 0.0,
                "additional_credits_needed": 0.0,
                "additional_credits_after_byok": 0.0,
                "additional_credit_cost": 0.0,
                "total_cost": 0.0,
                "cost_per_execution": 0.0
            }]
        }))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, save).await;
    // 1000 overage credits at the doubled rate
    assert_eq!(saved["scenarios"][0]["total_cost"], 70.0);

    let reload = test::TestRequest::get()
        .uri("/api/v1/scenario-state/workspace")
        .to_request();
    let loaded: Value = test::call_and_read_body_json(&app, reload).await;
    assert_eq!(loaded["credit_rate"], 0.02);
    assert_eq!(loaded["scenarios"][0]["total_cost"], 70.0);
}

#[actix_web::test]
async fn test_share_link_round_trip() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let create = test::TestRequest::post()
        .uri("/api/v1/share")
        .set_json(json!({"credit_rate": 0.05, "byok_savings_percent": 40.0}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, create).await;
    let token = created["token"].as_str().unwrap();

    let resolve = test::TestRequest::get()
        .uri(&format!("/api/v1/share/{}", token))
        .to_request();
    let variables: Value = test::call_and_read_body_json(&app, resolve).await;

    assert_eq!(variables["credit_rate"], 0.05);
    assert_eq!(variables["byok_savings_percent"], 40.0);
}

#[actix_web::test]
async fn test_share_rejects_empty_payload() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/share")
        .set_json(json!({}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_generate_sas_unconfigured_is_500() {
    let app = test::init_service(HttpServer::create_app(state())).await;

    let request = test::TestRequest::get()
        .uri("/api/generate-sas?blob_name=report.pdf")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), 500);
}
