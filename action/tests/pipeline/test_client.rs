//! Control plane client and uploader against the fake

use std::time::Duration;

use axum::http::StatusCode;
use control_plane_models::GraphqlResponse;
use deploy_action::control_plane::client::ControlPlaneClient;
use deploy_action::control_plane::ControlPlane;
use deploy_action::errors::DeployError;
use deploy_action::upload::Uploader;
use secrecy::SecretString;
use serde_json::json;

use crate::fake::FakeControlPlane;

fn client(fake: &FakeControlPlane) -> ControlPlaneClient {
    ControlPlaneClient::new(
        &fake.endpoint(),
        &SecretString::from("test-key".to_string()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_initiate_deployment() {
    let fake = FakeControlPlane::start().await;

    let deployment = client(&fake)
        .initiate_deployment("my-app", "abc123")
        .await
        .unwrap();

    assert_eq!(deployment.id, "dep-1");
    assert_eq!(deployment.deployment_upload_location, fake.upload_url());

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].operation, "InitiateDeployment");
    assert_eq!(requests[0].authorization.as_deref(), Some("APIKEY test-key"));
    assert_eq!(
        requests[0].variables,
        json!({"input": {"applicationName": "my-app", "commitHash": "abc123"}})
    );
}

#[tokio::test]
async fn test_initiate_surfaces_first_error() {
    let fake = FakeControlPlane::start().await;
    fake.set_initiate_response(GraphqlResponse::with_errors([
        "Application my-app not found",
        "second error",
    ]));

    let err = client(&fake)
        .initiate_deployment("my-app", "abc123")
        .await
        .unwrap_err();

    assert_eq!(err.control_plane_message(), Some("Application my-app not found"));
    assert_eq!(
        err.to_string(),
        "Unable to initiate deployment: Application my-app not found"
    );
}

#[tokio::test]
async fn test_get_application_by_name() {
    let fake = FakeControlPlane::start().await;

    let application = client(&fake).get_application_by_name("my-app").await.unwrap();

    assert_eq!(application.id, "app-1");
    assert_eq!(application.region.as_deref(), Some("us-east-1"));
    assert_eq!(fake.requests()[0].operation, "getApplication");
    assert_eq!(fake.requests()[0].variables, json!({"input": {"name": "my-app"}}));
}

#[tokio::test]
async fn test_get_deployment() {
    let fake = FakeControlPlane::start().await;
    fake.set_statuses(&["PENDING", "COMPLETE"]);
    let client = client(&fake);

    let first = client.get_deployment("app-1", "dep-1").await.unwrap();
    let second = client.get_deployment("app-1", "dep-1").await.unwrap();

    assert_eq!(first.status, "PENDING");
    assert_eq!(second.status, "COMPLETE");
    assert_eq!(
        fake.requests()[0].variables,
        json!({"input": {"applicationId": "app-1", "deploymentId": "dep-1"}})
    );
}

#[tokio::test]
async fn test_upload_sends_raw_bytes_without_auth() {
    let fake = FakeControlPlane::start().await;
    let uploader = Uploader::new(Duration::from_secs(5)).unwrap();

    uploader
        .upload(&fake.upload_url(), b"PK\x03\x04archive".to_vec())
        .await
        .unwrap();

    let uploads = fake.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].body, b"PK\x03\x04archive");
    assert!(uploads[0].authorization.is_none());
}

#[tokio::test]
async fn test_upload_rejected() {
    let fake = FakeControlPlane::start().await;
    fake.set_upload_status(StatusCode::FORBIDDEN);
    let uploader = Uploader::new(Duration::from_secs(5)).unwrap();

    let err = uploader
        .upload(&fake.upload_url(), vec![1, 2, 3])
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::UploadError(_)));
}
