use httpmock::prelude::*;
use serde_json::json;
use villa_common::{CheckoutLineItem, CheckoutService, CheckoutSessionRequest};
use villa_config::StripeConfig;
use villa_stripe::logic::{build_checkout_form, create_checkout_session};
use villa_stripe::{StripeCheckoutService, StripeError};

const SECRET_KEY: &str = "sk_test_123";

fn stripe_config(api_base: String) -> StripeConfig {
    StripeConfig {
        secret_key: Some(SECRET_KEY.to_string()),
        api_base,
        timeout_secs: 5,
    }
}

fn session_request() -> CheckoutSessionRequest {
    CheckoutSessionRequest {
        line_items: vec![
            CheckoutLineItem {
                name: "Casa Azul – 3 nights × $100".to_string(),
                unit_amount: 30000,
                quantity: 1,
            },
            CheckoutLineItem {
                name: "Casa Azul – Cleaning Fee".to_string(),
                unit_amount: 5000,
                quantity: 1,
            },
        ],
        success_url: "https://villas.example/success.html".to_string(),
        cancel_url: "https://villas.example/cancel.html".to_string(),
        description: Some("Booking: Casa Azul".to_string()),
        metadata: vec![("villaName".to_string(), "Casa Azul".to_string())],
        submit_message: Some("Booking: Casa Azul".to_string()),
    }
}

#[tokio::test]
async fn test_create_session_posts_form_with_basic_auth() {
    let server = MockServer::start_async().await;
    let request = session_request();
    let expected_body = serde_urlencoded::to_string(build_checkout_form(&request)).unwrap();

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/checkout/sessions")
                // "sk_test_123:" with an empty password
                .header("authorization", "Basic c2tfdGVzdF8xMjM6")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(expected_body);
            then.status(200).json_body(json!({
                "id": "cs_test_a1",
                "object": "checkout.session",
                "url": "https://checkout.stripe.com/c/pay/cs_test_a1"
            }));
        })
        .await;

    let client = reqwest::Client::new();
    let result = create_checkout_session(&client, &stripe_config(server.base_url()), &request)
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(result.id, "cs_test_a1");
    assert_eq!(result.url, "https://checkout.stripe.com/c/pay/cs_test_a1");
}

#[tokio::test]
async fn test_create_session_through_service() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/checkout/sessions")
                .x_www_form_urlencoded_tuple("mode", "payment")
                .x_www_form_urlencoded_tuple("line_items[1][price_data][unit_amount]", "5000");
            then.status(200).json_body(json!({
                "id": "cs_test_b2",
                "url": "https://checkout.stripe.com/c/pay/cs_test_b2"
            }));
        })
        .await;

    // trailing slash on the base must not double up in the path
    let service =
        StripeCheckoutService::new(stripe_config(format!("{}/", server.base_url()))).unwrap();
    let result = service
        .create_checkout_session(session_request())
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(result.url, "https://checkout.stripe.com/c/pay/cs_test_b2");
}

#[tokio::test]
async fn test_stripe_error_message_is_extracted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(401).json_body(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Invalid API Key provided: sk_test_***123"
                }
            }));
        })
        .await;

    let client = reqwest::Client::new();
    let err = create_checkout_session(&client, &stripe_config(server.base_url()), &session_request())
        .await
        .unwrap_err();

    match err {
        StripeError::ApiError {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Invalid API Key provided: sk_test_***123");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let client = reqwest::Client::new();
    let err = create_checkout_session(&client, &stripe_config(server.base_url()), &session_request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StripeError::ApiError { status_code: 502, ref message } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_success_without_url_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(200).json_body(json!({ "id": "cs_test_c3", "url": null }));
        })
        .await;

    let client = reqwest::Client::new();
    let err = create_checkout_session(&client, &stripe_config(server.base_url()), &session_request())
        .await
        .unwrap_err();

    assert!(matches!(err, StripeError::MissingCheckoutUrl));
}

#[tokio::test]
async fn test_missing_secret_key_makes_no_request() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(200);
        })
        .await;

    let config = StripeConfig {
        secret_key: None,
        ..stripe_config(server.base_url())
    };
    let client = reqwest::Client::new();
    let err = create_checkout_session(&client, &config, &session_request())
        .await
        .unwrap_err();

    assert!(matches!(err, StripeError::ConfigError));
    assert_eq!(api_mock.hits_async().await, 0);
}
