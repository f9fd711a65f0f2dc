//! Control plane GraphQL API

pub mod client;
pub mod operations;

use async_trait::async_trait;
use control_plane_models::{Application, Deployment, InitiatedDeployment};

use crate::errors::DeployError;

/// Fixed control plane GraphQL endpoint
pub const CONTROL_PLANE_API: &str = "https://vt2t2uctaf.execute-api.us-east-1.amazonaws.com";

/// Control plane operations used by the deployment pipeline
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Create a deployment record and obtain its upload location
    async fn initiate_deployment(
        &self,
        application_name: &str,
        commit_hash: &str,
    ) -> Result<InitiatedDeployment, DeployError>;

    /// Look up an application by name
    async fn get_application_by_name(&self, name: &str) -> Result<Application, DeployError>;

    /// Fetch the current state of a deployment
    async fn get_deployment(
        &self,
        application_id: &str,
        deployment_id: &str,
    ) -> Result<Deployment, DeployError>;
}
