//! API models

use serde::{Deserialize, Serialize};

/// GraphQL request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlRequest<V> {
    pub query: String,
    pub variables: V,
}

/// Operation variables; every control plane operation takes a single `input`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputVariables<T> {
    pub input: T,
}

/// Input for the `initiateDeployment` mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateDeploymentInput {
    pub application_name: String,
    pub commit_hash: String,
}

/// Input for the `getApplication` query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationQueryInput {
    pub name: String,
}

/// Input for the `getDeployment` query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDeploymentInput {
    pub application_id: String,
    pub deployment_id: String,
}

/// Deployment record returned by `initiateDeployment`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatedDeployment {
    pub id: String,

    /// Presigned URL the archive is uploaded to
    pub deployment_upload_location: String,

    #[serde(default)]
    pub commit_hash: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// Application returned by `getApplication`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub region: Option<String>,
}

/// Deployment returned by `getDeployment`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Raw status string, e.g. "PENDING" or "COMPLETE"
    pub status: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub commit_hash: Option<String>,
}

/// A single entry of the GraphQL `errors` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }
}

/// GraphQL response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// Successful response carrying `data.<field> = value`
    pub fn with_field(field: &str, value: serde_json::Value) -> Self {
        let mut data = serde_json::Map::new();
        data.insert(field.to_string(), value);
        Self {
            data: Some(serde_json::Value::Object(data)),
            errors: None,
        }
    }

    /// Error response with the given messages and no data
    pub fn with_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: Some(messages.into_iter().map(GraphqlError::new).collect()),
        }
    }

    /// First error, if the `errors` array is present and non-empty
    pub fn first_error(&self) -> Option<&GraphqlError> {
        self.errors.as_ref().and_then(|errors| errors.first())
    }

    /// Take `data.<field>`, leaving `None` in its place
    pub fn take_field(&mut self, field: &str) -> Option<serde_json::Value> {
        self.data
            .as_mut()
            .and_then(|data| data.get_mut(field))
            .map(serde_json::Value::take)
            .filter(|value| !value.is_null())
    }
}
