//! Fake control plane: a GraphQL endpoint plus a presigned upload target

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{post, put},
    Json, Router,
};
use control_plane_models::{GraphqlRequest, GraphqlResponse};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A GraphQL request as seen by the fake
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub authorization: Option<String>,
    pub variables: Value,
}

/// An upload as seen by the fake
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct FakeState {
    initiate: Mutex<GraphqlResponse>,
    application: Mutex<GraphqlResponse>,
    statuses: Mutex<VecDeque<String>>,
    upload_status: Mutex<Option<StatusCode>>,
    requests: Mutex<Vec<RecordedRequest>>,
    uploads: Mutex<Vec<RecordedUpload>>,
}

pub struct FakeControlPlane {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeControlPlane {
    /// Start a fake that accepts the deployment `dep-1` for application
    /// `app-1` and reports it COMPLETE on the first status check
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/upload/x", put(upload_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let fake = Self { addr, state };
        fake.set_initiate_response(GraphqlResponse::with_field(
            "initiateDeployment",
            json!({
                "id": "dep-1",
                "deploymentUploadLocation": fake.upload_url(),
                "commitHash": "abc123",
                "status": "PENDING",
            }),
        ));
        fake.set_application_response(GraphqlResponse::with_field(
            "getApplication",
            json!({"id": "app-1", "name": "my-app", "customerId": "cust-1", "region": "us-east-1"}),
        ));
        fake.set_statuses(&["COMPLETE"]);
        fake
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    pub fn upload_url(&self) -> String {
        format!("http://{}/upload/x", self.addr)
    }

    pub fn set_initiate_response(&self, response: GraphqlResponse) {
        *self.state.initiate.lock().unwrap() = response;
    }

    pub fn set_application_response(&self, response: GraphqlResponse) {
        *self.state.application.lock().unwrap() = response;
    }

    /// Statuses returned in order; the last one repeats
    pub fn set_statuses(&self, statuses: &[&str]) {
        *self.state.statuses.lock().unwrap() = statuses.iter().map(|s| s.to_string()).collect();
    }

    pub fn set_upload_status(&self, status: StatusCode) {
        *self.state.upload_status.lock().unwrap() = Some(status);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.operation).collect()
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.uploads.lock().unwrap().clone()
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// "mutation InitiateDeployment($input: ...)" -> "InitiateDeployment"
fn operation_name(query: &str) -> String {
    query
        .split(|c: char| c.is_whitespace() || c == '(')
        .filter(|part| !part.is_empty())
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

async fn graphql_handler(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(request): Json<GraphqlRequest<Value>>,
) -> Json<GraphqlResponse> {
    let operation = operation_name(&request.query);
    state.requests.lock().unwrap().push(RecordedRequest {
        operation: operation.clone(),
        authorization: authorization(&headers),
        variables: request.variables,
    });

    let response = match operation.as_str() {
        "InitiateDeployment" => state.initiate.lock().unwrap().clone(),
        "getApplication" => state.application.lock().unwrap().clone(),
        "GetDeployment" => {
            let mut statuses = state.statuses.lock().unwrap();
            let status = if statuses.len() > 1 {
                statuses.pop_front().unwrap_or_default()
            } else {
                statuses.front().cloned().unwrap_or_default()
            };
            GraphqlResponse::with_field(
                "getDeployment",
                json!({"id": "dep-1", "commitHash": "abc123", "status": status}),
            )
        }
        other => GraphqlResponse::with_errors([format!("Unknown operation {}", other)]),
    };

    Json(response)
}

async fn upload_handler(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    state.uploads.lock().unwrap().push(RecordedUpload {
        authorization: authorization(&headers),
        body: body.to_vec(),
    });
    state.upload_status.lock().unwrap().unwrap_or(StatusCode::OK)
}
