//! Support form against a local form-intake server.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use tempfile::TempDir;
use url::Url;
use viki_storefront::Storefront;
use viki_storefront::config::{ContactConfig, StorefrontConfig};
use viki_storefront::services::{StatusKind, SubmitControl};

async fn spawn_intake(status: StatusCode, reply: &'static str) -> Url {
    let app = Router::new().route("/f/test", post(move || async move { (status, reply) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind intake server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move { axum::serve(listener, app).await });
    Url::parse(&format!("http://{addr}/f/test")).expect("Bad intake URL")
}

fn storefront(dir: &TempDir, endpoint: Url) -> Storefront {
    let config = StorefrontConfig {
        data_dir: dir.path().to_path_buf(),
        contact: ContactConfig {
            endpoint,
            reset_delay: Duration::from_millis(10),
        },
        ..StorefrontConfig::default()
    };
    Storefront::open(config).expect("Failed to open storefront")
}

fn fields() -> Vec<(String, String)> {
    vec![
        ("name".to_owned(), "Ada".to_owned()),
        ("email".to_owned(), "ada@example.com".to_owned()),
        ("message".to_owned(), "Do you ship to Abuja?".to_owned()),
    ]
}

#[tokio::test]
async fn test_successful_submission() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = spawn_intake(StatusCode::OK, r#"{"ok":true}"#).await;
    let form = storefront(&dir, url)
        .contact_form()
        .expect("Failed to build contact form");

    let mut control = SubmitControl::default();
    let status = form.submit(&fields(), &mut control).await;

    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(
        status.text,
        "Message sent successfully! We will contact you shortly."
    );
    assert!(status.should_reset_form());
    assert!(!control.disabled);
}

#[tokio::test]
async fn test_rejected_submission_keeps_fields() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = spawn_intake(
        StatusCode::BAD_REQUEST,
        r#"{"errors":[{"message":"should be an email"}]}"#,
    )
    .await;
    let form = storefront(&dir, url)
        .contact_form()
        .expect("Failed to build contact form");

    let mut control = SubmitControl::default();
    let status = form.submit(&fields(), &mut control).await;

    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "should be an email");
    assert!(!status.should_reset_form());
    assert_eq!(control, SubmitControl::default());
}
