//! Process-engine port.
//!
//! The engine owns process execution (task completion, gateways,
//! deployments); this port only starts instances and reads/writes the
//! variables of the running task keyed by the stage identifier.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use caseflow_types::{
    CaseStageResponse, CaseType, CurrentScreenResponse, Result, StartCaseRequest,
    StartStageRequest, UpdateTaskVariablesRequest,
};
use uuid::Uuid;

use crate::rest::RestClient;

#[async_trait]
pub trait ProcessEngineClient: Send + Sync {
    /// Start the case-level process instance, business key = case id.
    async fn start_case(&self, case_id: Uuid, case_type: CaseType) -> Result<()>;

    /// Start a stage-level process instance, business key = stage id.
    async fn start_stage(&self, stage_id: Uuid, stage_type: &str) -> Result<()>;

    /// Overwrite variables on the running task for this stage.
    async fn update_task_variables(
        &self,
        stage_id: Uuid,
        variables: &HashMap<String, String>,
    ) -> Result<()>;

    /// The screen the stage-level process is currently waiting on.
    async fn current_screen(&self, stage_id: Uuid) -> Result<String>;

    /// The stage type the case-level process is currently at.
    async fn case_stage(&self, case_id: Uuid) -> Result<String>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

pub struct HttpProcessEngineClient {
    rest: RestClient,
}

impl HttpProcessEngineClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new("engine", base_url, timeout)?,
        })
    }
}

#[async_trait]
impl ProcessEngineClient for HttpProcessEngineClient {
    async fn start_case(&self, case_id: Uuid, case_type: CaseType) -> Result<()> {
        self.rest
            .post_no_response(
                &format!("/process/case/{case_id}"),
                &StartCaseRequest { case_type },
            )
            .await
    }

    async fn start_stage(&self, stage_id: Uuid, stage_type: &str) -> Result<()> {
        self.rest
            .post_no_response(
                &format!("/process/stage/{stage_id}"),
                &StartStageRequest {
                    stage_type: stage_type.to_string(),
                },
            )
            .await
    }

    async fn update_task_variables(
        &self,
        stage_id: Uuid,
        variables: &HashMap<String, String>,
    ) -> Result<()> {
        self.rest
            .put(
                &format!("/task/{stage_id}/variables"),
                &UpdateTaskVariablesRequest {
                    variables: variables.clone(),
                },
            )
            .await
    }

    async fn current_screen(&self, stage_id: Uuid) -> Result<String> {
        let response: CurrentScreenResponse =
            self.rest.get(&format!("/task/{stage_id}/screen")).await?;
        Ok(response.screen)
    }

    async fn case_stage(&self, case_id: Uuid) -> Result<String> {
        let response: CaseStageResponse = self
            .rest
            .get(&format!("/process/case/{case_id}/stage"))
            .await?;
        Ok(response.stage_type)
    }
}
