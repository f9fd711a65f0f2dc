//! Control plane GraphQL operations

use async_trait::async_trait;
use control_plane_models::{
    Application, ApplicationQueryInput, Deployment, GetDeploymentInput, InitiateDeploymentInput,
    InitiatedDeployment, InputVariables,
};
use tracing::debug;

use crate::control_plane::client::{ControlPlaneClient, Operation};
use crate::control_plane::ControlPlane;
use crate::errors::DeployError;

pub const INITIATE_DEPLOYMENT: Operation = Operation {
    name: "InitiateDeployment",
    field: "initiateDeployment",
    action: "initiate deployment",
    document: "mutation InitiateDeployment($input: InitiateDeploymentInput!) {\n  initiateDeployment(input: $input) {\n    commitHash\n    deploymentUploadLocation\n    id\n    status\n  }\n}",
};

pub const GET_APPLICATION: Operation = Operation {
    name: "getApplication",
    field: "getApplication",
    action: "fetch application",
    document: "query getApplication($input: ApplicationQueryInput!) {\n  getApplication(input: $input) {\n    customerId\n    id\n    name\n    region\n  }\n}",
};

pub const GET_DEPLOYMENT: Operation = Operation {
    name: "GetDeployment",
    field: "getDeployment",
    action: "fetch deployment",
    document: "query GetDeployment($input: GetDeploymentInput!) {\n  getDeployment(input: $input) {\n    commitHash\n    id\n    status\n  }\n}",
};

#[async_trait]
impl ControlPlane for ControlPlaneClient {
    async fn initiate_deployment(
        &self,
        application_name: &str,
        commit_hash: &str,
    ) -> Result<InitiatedDeployment, DeployError> {
        let variables = InputVariables {
            input: InitiateDeploymentInput {
                application_name: application_name.to_string(),
                commit_hash: commit_hash.to_string(),
            },
        };
        let deployment: InitiatedDeployment = self.request(&INITIATE_DEPLOYMENT, variables).await?;
        debug!("Initiated deployment {} ({:?})", deployment.id, deployment.status);
        Ok(deployment)
    }

    async fn get_application_by_name(&self, name: &str) -> Result<Application, DeployError> {
        let variables = InputVariables {
            input: ApplicationQueryInput {
                name: name.to_string(),
            },
        };
        self.request(&GET_APPLICATION, variables).await
    }

    async fn get_deployment(
        &self,
        application_id: &str,
        deployment_id: &str,
    ) -> Result<Deployment, DeployError> {
        let variables = InputVariables {
            input: GetDeploymentInput {
                application_id: application_id.to_string(),
                deployment_id: deployment_id.to_string(),
            },
        };
        self.request(&GET_DEPLOYMENT, variables).await
    }
}
