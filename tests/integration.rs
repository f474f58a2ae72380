//! Comprehensive integration tests for the income tax engine.
//!
//! This test suite covers all calculation scenarios including:
//! - Incomes landing in the first bracket, spanning brackets, and reaching
//!   the open-ended top bracket
//! - Deduction edge cases (zero, negative, and 24-UIT incomes)
//! - Income breakdown line items
//! - UIT overrides and per-year UIT values
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use renta_engine::api::{AppState, create_router};
use renta_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/renta_trabajo").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Parses a Decimal out of a JSON string field.
fn field_decimal(value: &Value) -> Decimal {
    decimal(value.as_str().expect("expected a string-encoded decimal"))
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(year: i32, gross_income: &str) -> Value {
    json!({
        "year": year,
        "gross_yearly_income": gross_income
    })
}

fn bracket_taxes(body: &Value) -> Vec<Decimal> {
    body["calculation"]["bracket_results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| field_decimal(&b["taxes"]))
        .collect()
}

fn assert_total_taxes(body: &Value, expected: &str) {
    let actual = field_decimal(&body["calculation"]["total_taxes"]);
    assert_eq!(
        actual,
        decimal(expected),
        "Expected total_taxes {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Calculation Scenarios
// =============================================================================

/// Gross 62000 in 2021 leaves a taxable base of 18800, fully inside the
/// first bracket: tax is 8% of the base, all other brackets zero.
#[tokio::test]
async fn test_base_inside_first_bracket() {
    let (status, body) = post_calculate(create_router_for_test(), create_request(2021, "62000")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(field_decimal(&calc["taxable_amounts"]["final_amount"]), decimal("18800"));
    assert_eq!(
        bracket_taxes(&body),
        vec![
            decimal("1504"),
            decimal("0"),
            decimal("0"),
            decimal("0"),
            decimal("0")
        ]
    );
    assert_total_taxes(&body, "1504");
}

#[tokio::test]
async fn test_base_spanning_two_brackets() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "120000")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(
        field_decimal(&calc["deductions"]["first"]["deducted_amount"]),
        decimal("24000")
    );
    assert_eq!(
        field_decimal(&calc["deductions"]["second"]["deducted_amount"]),
        decimal("30800")
    );
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["final_amount"]),
        decimal("65200")
    );
    assert_eq!(
        bracket_taxes(&body),
        vec![
            decimal("1760"),
            decimal("6048"),
            decimal("0"),
            decimal("0"),
            decimal("0")
        ]
    );
    assert_total_taxes(&body, "7808");
}

#[tokio::test]
async fn test_high_income_reaches_open_ended_bracket() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "300000")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    // 20% of 300000 is 60000, still below the 105600 cap.
    assert_eq!(
        field_decimal(&calc["deductions"]["first"]["deducted_amount"]),
        decimal("60000")
    );
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["final_amount"]),
        decimal("209200")
    );
    assert_eq!(
        bracket_taxes(&body),
        vec![
            decimal("1760"),
            decimal("9240"),
            decimal("11220"),
            decimal("8800"),
            decimal("3360")
        ]
    );
    assert_total_taxes(&body, "34380");
}

#[tokio::test]
async fn test_cap_applies_to_very_high_income() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "600000")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    // 20% of 600000 is 120000, above the 24 UIT cap of 105600.
    assert_eq!(
        field_decimal(&calc["deductions"]["first"]["deducted_amount"]),
        decimal("105600")
    );
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["final_amount"]),
        decimal("463600")
    );

    let top = &calc["bracket_results"][4];
    assert_eq!(field_decimal(&top["taxable_amount"]), decimal("265600"));
    assert_eq!(field_decimal(&top["taxes"]), decimal("79680"));
    assert_eq!(field_decimal(&top["range"]["min"]), decimal("198000"));
    assert!(top["range"].get("max").is_none());

    assert_total_taxes(&body, "110700");
}

#[tokio::test]
async fn test_zero_income_produces_all_zeros() {
    let (status, body) = post_calculate(create_router_for_test(), create_request(2021, "0")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(
        field_decimal(&calc["deductions"]["first"]["deducted_amount"]),
        Decimal::ZERO
    );
    assert_eq!(
        field_decimal(&calc["deductions"]["second"]["deducted_amount"]),
        Decimal::ZERO
    );
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["final_amount"]),
        Decimal::ZERO
    );
    assert_total_taxes(&body, "0");
}

#[tokio::test]
async fn test_negative_income_pays_no_tax() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "-1000")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["after_first_deduction"]),
        decimal("-800")
    );
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["final_amount"]),
        Decimal::ZERO
    );
    assert_total_taxes(&body, "0");
}

/// At exactly 24 UIT of income the percentage side of the first deduction's
/// min still wins over the cap.
#[tokio::test]
async fn test_income_of_exactly_24_uit() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "105600")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(
        field_decimal(&calc["deductions"]["first"]["deducted_amount"]),
        decimal("21120")
    );
    assert_eq!(field_decimal(&calc["deductions"]["first"]["cap"]), decimal("105600"));
}

#[tokio::test]
async fn test_uit_value_follows_selected_year() {
    // 2012 had a UIT of 3650: same gross income, different deductions.
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2012, "100000")).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(field_decimal(&calc["uit"]), decimal("3650"));
    assert_eq!(
        field_decimal(&calc["deductions"]["second"]["expected_amount"]),
        decimal("25550")
    );
    assert_eq!(
        field_decimal(&calc["taxable_amounts"]["final_amount"]),
        decimal("54450")
    );
    assert_total_taxes(&body, "6528");
}

#[tokio::test]
async fn test_bracket_ranges_scale_with_uit() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "62000")).await;

    assert_eq!(status, StatusCode::OK);

    let results = body["calculation"]["bracket_results"].as_array().unwrap();
    assert_eq!(field_decimal(&results[0]["range"]["min"]), decimal("0"));
    assert_eq!(field_decimal(&results[0]["range"]["max"]), decimal("22000"));
    assert_eq!(field_decimal(&results[3]["range"]["max"]), decimal("198000"));
    assert!(results[4]["range"].get("max").is_none());
}

// =============================================================================
// Income Breakdown
// =============================================================================

#[tokio::test]
async fn test_income_breakdown_is_summed() {
    let request = json!({
        "year": 2021,
        "income_items": [
            {"label": "salary", "amount": "96000"},
            {"label": "bonus", "amount": "16000"},
            {"label": "gratification", "amount": "8000"}
        ]
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field_decimal(&body["calculation"]["taxable_amounts"]["initial_amount"]),
        decimal("120000")
    );
    assert_total_taxes(&body, "7808");
}

#[tokio::test]
async fn test_direct_amount_wins_over_breakdown() {
    let request = json!({
        "year": 2021,
        "gross_yearly_income": "62000",
        "income_items": [
            {"label": "salary", "amount": "96000"}
        ]
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field_decimal(&body["calculation"]["taxable_amounts"]["initial_amount"]),
        decimal("62000")
    );
}

// =============================================================================
// UIT Override
// =============================================================================

#[tokio::test]
async fn test_uit_override_takes_precedence() {
    let request = json!({
        "year": 2021,
        "gross_yearly_income": "50000",
        "uit_override": "5000"
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);

    let calc = &body["calculation"];
    assert_eq!(field_decimal(&calc["uit"]), decimal("5000"));
    // 50000 - 10000 - min(35000, 40000) leaves a 5000 base in bracket 1.
    assert_eq!(field_decimal(&calc["taxable_amounts"]["final_amount"]), decimal("5000"));
    assert_total_taxes(&body, "400");
}

#[tokio::test]
async fn test_non_positive_uit_override_is_rejected() {
    let request = json!({
        "year": 2021,
        "gross_yearly_income": "50000",
        "uit_override": "0"
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Response Envelope
// =============================================================================

#[tokio::test]
async fn test_envelope_carries_request_metadata() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "120000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2021);
    assert!(body["calculation_id"].as_str().is_some());
    assert!(body["timestamp"].as_str().is_some());
    assert!(!body["engine_version"].as_str().unwrap().is_empty());
    assert!(body["duration_us"].as_u64().is_some());
}

#[tokio::test]
async fn test_identical_requests_produce_identical_calculations() {
    let first =
        post_calculate(create_router_for_test(), create_request(2021, "120000")).await;
    let second =
        post_calculate(create_router_for_test(), create_request(2021, "120000")).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    // The envelope differs per request; the calculation must not.
    assert_eq!(first.1["calculation"], second.1["calculation"]);
}

#[tokio::test]
async fn test_audit_trace_is_returned() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(2021, "120000")).await;

    assert_eq!(status, StatusCode::OK);

    let steps = body["calculation"]["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0]["rule_id"], "first_deduction");
    assert_eq!(steps[0]["article_ref"], "Art. 45");
    assert_eq!(steps[1]["rule_id"], "second_deduction");
    assert_eq!(steps[2]["rule_id"], "bracket_allocation");
    assert_eq!(steps[2]["article_ref"], "Art. 53");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_year_returns_bad_request() {
    let (status, body) =
        post_calculate(create_router_for_test(), create_request(1999, "120000")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "YEAR_NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("1999"));
}

#[tokio::test]
async fn test_missing_income_returns_validation_error() {
    let (status, body) = post_calculate(create_router_for_test(), json!({"year": 2021})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("gross_yearly_income")
    );
}

#[tokio::test]
async fn test_missing_year_returns_validation_error() {
    let (status, body) = post_calculate(
        create_router_for_test(),
        json!({"gross_yearly_income": "120000"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}
