//! Shared types for caseflow.
//!
//! This crate is the single source of truth for every type that crosses a
//! collaborator boundary: model types resolved from the reference-data
//! service, the wire DTOs posted to the case-record store and process
//! engine, and the error taxonomy.
//!
//! UUIDs stay `uuid::Uuid` end to end; dates are `chrono::NaiveDate`.

pub mod error;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::OrchestrationError;

pub type Result<T> = std::result::Result<T, OrchestrationError>;

// ============================================================================
// MODEL
// ============================================================================

/// The case classifications this deployment knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "MIN")]
    Min,
    #[serde(rename = "TRO")]
    Tro,
    #[serde(rename = "DTEN")]
    Dten,
    #[serde(rename = "BREF")]
    Bref,
}

impl CaseType {
    pub fn display_value(&self) -> &'static str {
        match self {
            CaseType::Min => "Ministerial",
            CaseType::Tro => "Treat Official",
            CaseType::Dten => "Number 10",
            CaseType::Bref => "Briefing",
        }
    }

    /// Process-definition key the engine starts for this case type.
    pub fn process_key(&self) -> &'static str {
        match self {
            CaseType::Min => "MIN",
            CaseType::Tro => "TRO",
            CaseType::Dten => "DTEN",
            CaseType::Bref => "BREF",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.process_key())
    }
}

/// A team as resolved from the reference-data service.
///
/// Referenced, never owned: teams are re-resolved per operation and never
/// cached between operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "type")]
    pub uuid: Uuid,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub active: bool,
}

/// A user validated as a member of a team for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: Uuid,
    pub username: String,
}

/// One entry of the workflow-type registry served to callers choosing a
/// case type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowTypeDetails {
    pub unit: &'static str,
    #[serde(rename = "displayName")]
    pub display_name: &'static str,
    #[serde(rename = "caseType")]
    pub case_type: CaseType,
}

// ============================================================================
// CASE-RECORD STORE DTOS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseRequest {
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub data: HashMap<String, String>,
    #[serde(rename = "caseDeadline")]
    pub case_deadline: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseResponse {
    pub uuid: Uuid,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStageRequest {
    pub uuid: Uuid,
    #[serde(rename = "type")]
    pub stage_type: String,
    #[serde(rename = "teamUUID")]
    pub team_uuid: Uuid,
    #[serde(rename = "userUUID")]
    pub user_uuid: Option<Uuid>,
    #[serde(rename = "allocationType")]
    pub allocation_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStageResponse {
    pub uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecreateStageRequest {
    pub uuid: Uuid,
    #[serde(rename = "type")]
    pub stage_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStageTeamRequest {
    #[serde(rename = "teamUUID")]
    pub team_uuid: Uuid,
    #[serde(rename = "allocationType")]
    pub allocation_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStageUserRequest {
    #[serde(rename = "userUUID")]
    pub user_uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCaseDataRequest {
    pub data: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataValueResponse {
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToDataValueRequest {
    pub additive: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToDataValueResponse {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseNoteRequest {
    #[serde(rename = "type")]
    pub note_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseNoteResponse {
    pub uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeadlineDaysRequest {
    pub days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStageDeadlineRequest {
    #[serde(rename = "stageType")]
    pub stage_type: String,
    pub days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeadlineForStagesRequest {
    #[serde(rename = "stageDeadlines")]
    pub stage_deadlines: HashMap<String, i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamByTextsRequest {
    #[serde(rename = "stageType")]
    pub stage_type: String,
    #[serde(rename = "teamUUIDKey")]
    pub team_uuid_key: String,
    #[serde(rename = "teamNameKey")]
    pub team_name_key: String,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamByTextsResponse {
    pub data: HashMap<String, String>,
}

// ============================================================================
// PROCESS-ENGINE DTOS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCaseRequest {
    #[serde(rename = "caseType")]
    pub case_type: CaseType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartStageRequest {
    #[serde(rename = "stageType")]
    pub stage_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskVariablesRequest {
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentScreenResponse {
    pub screen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStageResponse {
    #[serde(rename = "stageType")]
    pub stage_type: String,
}

// ============================================================================
// REFERENCE-DATA DTOS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineResponse {
    pub deadline: NaiveDate,
}

/// Form schema served by the reference-data service for a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub uuid: Uuid,
    #[serde(rename = "type")]
    pub form_type: String,
    pub title: String,
    #[serde(rename = "defaultActionLabel")]
    pub default_action_label: String,
    pub active: bool,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub component: String,
    pub name: String,
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
}
