//! Case-record store port.
//!
//! All durable case/stage state lives behind this port. Counter updates go
//! through `add_to_data_value`, a store-side atomic increment, so concurrent
//! increments on the same case/variable cannot lose writes.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use caseflow_types::{
    AddToDataValueRequest, AddToDataValueResponse, CaseType, CreateCaseNoteRequest,
    CreateCaseNoteResponse, CreateCaseRequest, CreateCaseResponse, CreateStageRequest,
    CreateStageResponse, DataValueResponse, RecreateStageRequest, Result, TeamByTextsRequest,
    TeamByTextsResponse, UpdateCaseDataRequest, UpdateDeadlineDaysRequest,
    UpdateDeadlineForStagesRequest, UpdateStageDeadlineRequest, UpdateStageTeamRequest,
    UpdateStageUserRequest,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::rest::RestClient;

#[async_trait]
pub trait CaseworkClient: Send + Sync {
    /// Create the case record. Returns the human-readable case reference.
    async fn create_case(
        &self,
        case_id: Uuid,
        case_type: CaseType,
        data: &HashMap<String, String>,
        case_deadline: NaiveDate,
    ) -> Result<String>;

    /// Create a stage record. A single write: team, optional user, and
    /// allocation type all land together.
    async fn create_stage(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        team_id: Uuid,
        user_id: Option<Uuid>,
        allocation_type: &str,
    ) -> Result<Uuid>;

    /// Reset stage metadata for a stage a process loop is revisiting.
    /// The stage keeps its identity.
    async fn recreate_stage(&self, case_id: Uuid, stage_id: Uuid, stage_type: &str) -> Result<()>;

    async fn update_stage_team(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        team_id: Uuid,
        allocation_type: &str,
    ) -> Result<()>;

    async fn update_stage_user(&self, case_id: Uuid, stage_id: Uuid, user_id: Uuid) -> Result<()>;

    /// Merge a batch of key/value data into the case/stage record.
    async fn update_case(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        data: &HashMap<String, String>,
    ) -> Result<()>;

    /// Read a single data value. `None` when the key was never written.
    async fn data_value(&self, case_id: Uuid, key: &str) -> Result<Option<String>>;

    async fn update_data_value(&self, case_id: Uuid, key: &str, value: &str) -> Result<()>;

    /// Store-side atomic increment: absent values count as zero. Returns
    /// the value as stored after the increment.
    async fn add_to_data_value(&self, case_id: Uuid, key: &str, additive: i64) -> Result<String>;

    async fn update_deadline_days(&self, case_id: Uuid, stage_id: Uuid, days: i32) -> Result<()>;

    async fn update_stage_deadline(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        days: i32,
    ) -> Result<()>;

    /// Per-stage-type deadline day counts, one call.
    async fn update_deadline_for_stages(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_deadlines: &HashMap<String, i32>,
    ) -> Result<()>;

    async fn create_case_note(&self, case_id: Uuid, note_type: &str, text: &str) -> Result<Uuid>;

    /// Recompute the totals of an itemised list on the case record.
    async fn calculate_totals(&self, case_id: Uuid, stage_id: Uuid, list_name: &str) -> Result<()>;

    /// The store's own free-text-to-team resolution. Returns the variable
    /// batch the store decided on, keyed by the caller-supplied key names.
    async fn team_by_stage_and_texts(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        team_uuid_key: &str,
        team_name_key: &str,
        texts: &[String],
    ) -> Result<HashMap<String, String>>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

pub struct HttpCaseworkClient {
    rest: RestClient,
}

impl HttpCaseworkClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new("casework", base_url, timeout)?,
        })
    }
}

#[async_trait]
impl CaseworkClient for HttpCaseworkClient {
    async fn create_case(
        &self,
        case_id: Uuid,
        case_type: CaseType,
        data: &HashMap<String, String>,
        case_deadline: NaiveDate,
    ) -> Result<String> {
        let request = CreateCaseRequest {
            case_type,
            data: data.clone(),
            case_deadline,
        };
        let response: CreateCaseResponse =
            self.rest.post(&format!("/case/{case_id}"), &request).await?;
        Ok(response.reference)
    }

    async fn create_stage(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        team_id: Uuid,
        user_id: Option<Uuid>,
        allocation_type: &str,
    ) -> Result<Uuid> {
        let request = CreateStageRequest {
            uuid: stage_id,
            stage_type: stage_type.to_string(),
            team_uuid: team_id,
            user_uuid: user_id,
            allocation_type: allocation_type.to_string(),
        };
        let response: CreateStageResponse = self
            .rest
            .post(&format!("/case/{case_id}/stage"), &request)
            .await?;
        Ok(response.uuid)
    }

    async fn recreate_stage(&self, case_id: Uuid, stage_id: Uuid, stage_type: &str) -> Result<()> {
        self.rest
            .post_no_response(
                &format!("/case/{case_id}/stage/{stage_id}/recreate"),
                &RecreateStageRequest {
                    uuid: stage_id,
                    stage_type: stage_type.to_string(),
                },
            )
            .await
    }

    async fn update_stage_team(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        team_id: Uuid,
        allocation_type: &str,
    ) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/stage/{stage_id}/team"),
                &UpdateStageTeamRequest {
                    team_uuid: team_id,
                    allocation_type: allocation_type.to_string(),
                },
            )
            .await
    }

    async fn update_stage_user(&self, case_id: Uuid, stage_id: Uuid, user_id: Uuid) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/stage/{stage_id}/user"),
                &UpdateStageUserRequest { user_uuid: user_id },
            )
            .await
    }

    async fn update_case(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        data: &HashMap<String, String>,
    ) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/stage/{stage_id}/data"),
                &UpdateCaseDataRequest { data: data.clone() },
            )
            .await
    }

    async fn data_value(&self, case_id: Uuid, key: &str) -> Result<Option<String>> {
        let response: DataValueResponse =
            self.rest.get(&format!("/case/{case_id}/data/{key}")).await?;
        Ok(response.value)
    }

    async fn update_data_value(&self, case_id: Uuid, key: &str, value: &str) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/data/{key}"),
                &DataValueResponse {
                    value: Some(value.to_string()),
                },
            )
            .await
    }

    async fn add_to_data_value(&self, case_id: Uuid, key: &str, additive: i64) -> Result<String> {
        let response: AddToDataValueResponse = self
            .rest
            .post(
                &format!("/case/{case_id}/data/{key}/increment"),
                &AddToDataValueRequest { additive },
            )
            .await?;
        Ok(response.value)
    }

    async fn update_deadline_days(&self, case_id: Uuid, stage_id: Uuid, days: i32) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/stage/{stage_id}/deadline"),
                &UpdateDeadlineDaysRequest { days },
            )
            .await
    }

    async fn update_stage_deadline(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        days: i32,
    ) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/stage/{stage_id}/stageDeadline"),
                &UpdateStageDeadlineRequest {
                    stage_type: stage_type.to_string(),
                    days,
                },
            )
            .await
    }

    async fn update_deadline_for_stages(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_deadlines: &HashMap<String, i32>,
    ) -> Result<()> {
        self.rest
            .put(
                &format!("/case/{case_id}/stage/{stage_id}/deadlineForStages"),
                &UpdateDeadlineForStagesRequest {
                    stage_deadlines: stage_deadlines.clone(),
                },
            )
            .await
    }

    async fn create_case_note(&self, case_id: Uuid, note_type: &str, text: &str) -> Result<Uuid> {
        let response: CreateCaseNoteResponse = self
            .rest
            .post(
                &format!("/case/{case_id}/note"),
                &CreateCaseNoteRequest {
                    note_type: note_type.to_string(),
                    text: text.to_string(),
                },
            )
            .await?;
        Ok(response.uuid)
    }

    async fn calculate_totals(&self, case_id: Uuid, stage_id: Uuid, list_name: &str) -> Result<()> {
        self.rest
            .post_no_response(
                &format!("/case/{case_id}/stage/{stage_id}/calculateTotals"),
                &serde_json::json!({ "listName": list_name }),
            )
            .await
    }

    async fn team_by_stage_and_texts(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        team_uuid_key: &str,
        team_name_key: &str,
        texts: &[String],
    ) -> Result<HashMap<String, String>> {
        let request = TeamByTextsRequest {
            stage_type: stage_type.to_string(),
            team_uuid_key: team_uuid_key.to_string(),
            team_name_key: team_name_key.to_string(),
            texts: texts.to_vec(),
        };
        let response: TeamByTextsResponse = self
            .rest
            .post(&format!("/case/{case_id}/stage/{stage_id}/teamTexts"), &request)
            .await?;
        Ok(response.data)
    }
}
