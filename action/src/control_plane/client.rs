//! GraphQL client implementation

use std::time::Duration;

use control_plane_models::{GraphqlRequest, GraphqlResponse};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::DeployError;

/// A GraphQL operation understood by the control plane
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Operation name as declared in the document
    pub name: &'static str,

    /// Field under `data` holding the result
    pub field: &'static str,

    /// What the operation does, used in error messages ("fetch deployment")
    pub action: &'static str,

    /// GraphQL document
    pub document: &'static str,
}

/// HTTP client for the control plane GraphQL endpoint
pub struct ControlPlaneClient {
    client: Client,
    endpoint: String,
}

impl ControlPlaneClient {
    /// Create a new client authenticated with `api_key`
    pub fn new(
        endpoint: &str,
        api_key: &SecretString,
        timeout: Duration,
    ) -> Result<Self, DeployError> {
        let mut authorization =
            HeaderValue::from_str(&format!("APIKEY {}", api_key.expose_secret()))
                .map_err(|_| DeployError::ConfigError("API key is not a valid header value".to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Execute `operation` and return `data.<field>` decoded as `T`
    pub async fn request<V, T>(&self, operation: &Operation, variables: V) -> Result<T, DeployError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        debug!("POST {} ({})", self.endpoint, operation.name);

        let body = GraphqlRequest {
            query: operation.document.to_string(),
            variables,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(operation, status, &text)
    }
}

/// Decode a GraphQL response body.
///
/// A non-empty `errors` array wins over the HTTP status; the first message is
/// surfaced. A body that is not JSON is reported with the status when the
/// status is not a success.
pub fn decode_response<T: DeserializeOwned>(
    operation: &Operation,
    status: StatusCode,
    body: &str,
) -> Result<T, DeployError> {
    let mut envelope: GraphqlResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            error!("{} failed: {} - {}", operation.name, status, body);
            return Err(DeployError::control_plane(
                operation.action,
                format!("{}: {}", status, body.trim()),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(err) = envelope.first_error() {
        error!("Unable to {}: {}", operation.action, err.message);
        return Err(DeployError::control_plane(operation.action, err.message.clone()));
    }

    let value = envelope.take_field(operation.field).ok_or_else(|| {
        DeployError::control_plane(
            operation.action,
            format!("response did not include {}", operation.field),
        )
    })?;

    Ok(serde_json::from_value(value)?)
}
