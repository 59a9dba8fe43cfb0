//! Reference-data port.
//!
//! Teams, team membership, deadlines, and form schemas. Nothing resolved
//! here is cached: every operation re-resolves from the source of truth.

use std::time::Duration;

use async_trait::async_trait;
use caseflow_types::{
    CaseType, DeadlineResponse, FormSchema, OrchestrationError, Result, Team, User,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::rest::RestClient;

#[async_trait]
pub trait InfoClient: Send + Sync {
    /// Direct team lookup by id.
    async fn team(&self, team_id: Uuid) -> Result<Team>;

    /// Default team for a stage type. `EntityNotFound` when unmapped.
    async fn team_for_stage_type(&self, stage_type: &str) -> Result<Uuid>;

    /// The correct team for a case's primary classification topic.
    async fn team_for_topic_and_stage(
        &self,
        case_id: Uuid,
        topic_id: Uuid,
        stage_type: &str,
    ) -> Result<Team>;

    /// `None` when the user is not a current member of the team — the
    /// assignment is dropped, not failed.
    async fn user_for_team(&self, team_id: Uuid, user_id: Uuid) -> Result<Option<User>>;

    /// Deadline for a case received on the given date.
    async fn case_deadline(&self, case_type: CaseType, received: NaiveDate) -> Result<NaiveDate>;

    /// Deadline for a stage type from a reference date.
    async fn stage_deadline(&self, stage_type: &str, received: NaiveDate) -> Result<NaiveDate>;

    /// Form schema for a screen.
    async fn form(&self, form_type: &str) -> Result<FormSchema>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

pub struct HttpInfoClient {
    rest: RestClient,
}

impl HttpInfoClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new("info", base_url, timeout)?,
        })
    }
}

#[async_trait]
impl InfoClient for HttpInfoClient {
    async fn team(&self, team_id: Uuid) -> Result<Team> {
        self.rest.get(&format!("/team/{team_id}")).await
    }

    async fn team_for_stage_type(&self, stage_type: &str) -> Result<Uuid> {
        let team: Team = self
            .rest
            .get(&format!("/stageType/{stage_type}/team"))
            .await?;
        Ok(team.uuid)
    }

    async fn team_for_topic_and_stage(
        &self,
        case_id: Uuid,
        topic_id: Uuid,
        stage_type: &str,
    ) -> Result<Team> {
        self.rest
            .get(&format!(
                "/team/case/{case_id}/topic/{topic_id}/stage/{stage_type}"
            ))
            .await
    }

    async fn user_for_team(&self, team_id: Uuid, user_id: Uuid) -> Result<Option<User>> {
        match self
            .rest
            .get(&format!("/team/{team_id}/user/{user_id}"))
            .await
        {
            Ok(user) => Ok(Some(user)),
            // Absence is a valid outcome here, not an error.
            Err(OrchestrationError::EntityNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn case_deadline(&self, case_type: CaseType, received: NaiveDate) -> Result<NaiveDate> {
        let response: DeadlineResponse = self
            .rest
            .get(&format!("/caseType/{case_type}/deadline?received={received}"))
            .await?;
        Ok(response.deadline)
    }

    async fn stage_deadline(&self, stage_type: &str, received: NaiveDate) -> Result<NaiveDate> {
        let response: DeadlineResponse = self
            .rest
            .get(&format!("/stageType/{stage_type}/deadline?received={received}"))
            .await?;
        Ok(response.deadline)
    }

    async fn form(&self, form_type: &str) -> Result<FormSchema> {
        self.rest.get(&format!("/schema/{form_type}")).await
    }
}
