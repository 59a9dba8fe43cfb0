//! Case-level workflow front door.
//!
//! Creating a case touches all three collaborators in a fixed order: the
//! case record must exist before the engine starts the process, so the two
//! stores can never disagree about which cases exist.

use std::collections::HashMap;
use std::sync::Arc;

use caseflow_clients::{CaseworkClient, InfoClient, ProcessEngineClient};
use caseflow_types::{CaseType, FormSchema, OrchestrationError, Result, WorkflowTypeDetails};
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::service::{CaseOrchestrator, ServiceTaskPort};

/// Case types this deployment can start, grouped by owning unit.
pub const WORKFLOW_TYPES: [WorkflowTypeDetails; 4] = [
    WorkflowTypeDetails {
        unit: "DCU",
        display_name: "DCU MIN",
        case_type: CaseType::Min,
    },
    WorkflowTypeDetails {
        unit: "DCU",
        display_name: "DCU TRO",
        case_type: CaseType::Tro,
    },
    WorkflowTypeDetails {
        unit: "DCU",
        display_name: "DCU DTEN",
        case_type: CaseType::Dten,
    },
    WorkflowTypeDetails {
        unit: "UKVI",
        display_name: "UKVI BREF",
        case_type: CaseType::Bref,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCaseOutcome {
    pub case_id: Uuid,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartStageOutcome {
    pub stage_id: Uuid,
    pub screen: String,
}

pub struct CaseflowService {
    engine: Arc<dyn ProcessEngineClient>,
    casework: Arc<dyn CaseworkClient>,
    info: Arc<dyn InfoClient>,
    orchestrator: CaseOrchestrator,
}

impl CaseflowService {
    pub fn new(
        engine: Arc<dyn ProcessEngineClient>,
        casework: Arc<dyn CaseworkClient>,
        info: Arc<dyn InfoClient>,
    ) -> Self {
        let orchestrator =
            CaseOrchestrator::new(engine.clone(), casework.clone(), info.clone());
        Self {
            engine,
            casework,
            info,
            orchestrator,
        }
    }

    pub fn workflow_types(&self) -> &'static [WorkflowTypeDetails] {
        &WORKFLOW_TYPES
    }

    /// Create a case and start its case-level process.
    ///
    /// The case record is created first; only then does the engine start.
    pub async fn create_case(
        &self,
        case_type: Option<CaseType>,
        received: NaiveDate,
    ) -> Result<CreateCaseOutcome> {
        let case_type = case_type.ok_or_else(|| {
            OrchestrationError::EntityCreation("failed to create case, invalid case type".into())
        })?;

        let deadline = self.info.case_deadline(case_type, received).await?;

        let case_id = Uuid::new_v4();
        let mut data = HashMap::new();
        data.insert("DateReceived".to_string(), received.to_string());
        data.insert("CaseDeadline".to_string(), deadline.to_string());

        let reference = self
            .casework
            .create_case(case_id, case_type, &data, deadline)
            .await
            .map_err(|e| OrchestrationError::EntityCreation(format!("create case failed: {e}")))?;

        self.engine.start_case(case_id, case_type).await?;

        info!(%case_id, %case_type, reference = %reference, "case created");
        Ok(CreateCaseOutcome { case_id, reference })
    }

    /// Create a stage record and start its stage-level process, returning
    /// the first screen the process waits on.
    pub async fn start_stage(
        &self,
        case_id: Uuid,
        stage_type: &str,
        allocation_type: &str,
    ) -> Result<StartStageOutcome> {
        let stage_id = self
            .orchestrator
            .create_stage(
                &case_id.to_string(),
                None,
                stage_type,
                allocation_type,
                None,
                None,
            )
            .await?;
        let stage_id = Uuid::parse_str(&stage_id)
            .map_err(|e| OrchestrationError::Internal(e.into()))?;

        self.engine.start_stage(stage_id, stage_type).await?;
        let screen = self.engine.current_screen(stage_id).await?;

        Ok(StartStageOutcome { stage_id, screen })
    }

    /// The screen the stage-level process is currently waiting on.
    pub async fn current_screen(&self, stage_id: Uuid) -> Result<String> {
        self.engine.current_screen(stage_id).await
    }

    /// The stage the case-level process is currently at.
    pub async fn current_stage(&self, case_id: Uuid) -> Result<String> {
        self.engine.case_stage(case_id).await
    }

    /// Form schema for the screen the stage is waiting on.
    pub async fn screen_form(&self, stage_id: Uuid) -> Result<FormSchema> {
        let screen = self.engine.current_screen(stage_id).await?;
        self.info.form(&screen).await
    }
}
