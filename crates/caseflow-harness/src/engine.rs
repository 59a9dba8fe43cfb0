//! Recording fake of the process-engine port.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use caseflow_clients::ProcessEngineClient;
use caseflow_types::{CaseType, OrchestrationError, Result};
use uuid::Uuid;

use crate::Sequence;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    StartCase {
        case_id: Uuid,
        case_type: CaseType,
    },
    StartStage {
        stage_id: Uuid,
        stage_type: String,
    },
    UpdateTaskVariables {
        stage_id: Uuid,
        variables: HashMap<String, String>,
    },
    CurrentScreen {
        stage_id: Uuid,
    },
    CaseStage {
        case_id: Uuid,
    },
}

#[derive(Default)]
pub struct RecordingEngine {
    seq: Sequence,
    calls: Mutex<Vec<(usize, EngineCall)>>,
    screens: Mutex<HashMap<Uuid, String>>,
    default_screen: Mutex<Option<String>>,
    case_stages: Mutex<HashMap<Uuid, String>>,
}

impl RecordingEngine {
    pub fn new(seq: &Sequence) -> Self {
        Self {
            seq: seq.clone(),
            ..Self::default()
        }
    }

    /// Canned screen the engine reports for a stage.
    pub fn set_screen(&self, stage_id: Uuid, screen: &str) {
        self.screens.lock().unwrap().insert(stage_id, screen.to_string());
    }

    /// Screen reported for stages with no per-stage entry, for flows that
    /// generate the stage id internally.
    pub fn set_default_screen(&self, screen: &str) {
        *self.default_screen.lock().unwrap() = Some(screen.to_string());
    }

    /// Canned stage type the case-level process reports.
    pub fn set_case_stage(&self, case_id: Uuid, stage_type: &str) {
        self.case_stages
            .lock()
            .unwrap()
            .insert(case_id, stage_type.to_string());
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn calls_with_seq(&self) -> Vec<(usize, EngineCall)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push((self.seq.next(), call));
    }
}

#[async_trait]
impl ProcessEngineClient for RecordingEngine {
    async fn start_case(&self, case_id: Uuid, case_type: CaseType) -> Result<()> {
        self.record(EngineCall::StartCase { case_id, case_type });
        Ok(())
    }

    async fn start_stage(&self, stage_id: Uuid, stage_type: &str) -> Result<()> {
        self.record(EngineCall::StartStage {
            stage_id,
            stage_type: stage_type.to_string(),
        });
        Ok(())
    }

    async fn update_task_variables(
        &self,
        stage_id: Uuid,
        variables: &HashMap<String, String>,
    ) -> Result<()> {
        self.record(EngineCall::UpdateTaskVariables {
            stage_id,
            variables: variables.clone(),
        });
        Ok(())
    }

    async fn current_screen(&self, stage_id: Uuid) -> Result<String> {
        self.record(EngineCall::CurrentScreen { stage_id });
        self.screens
            .lock()
            .unwrap()
            .get(&stage_id)
            .cloned()
            .or_else(|| self.default_screen.lock().unwrap().clone())
            .ok_or_else(|| {
                OrchestrationError::EntityNotFound(format!("no screen for stage {stage_id}"))
            })
    }

    async fn case_stage(&self, case_id: Uuid) -> Result<String> {
        self.record(EngineCall::CaseStage { case_id });
        self.case_stages
            .lock()
            .unwrap()
            .get(&case_id)
            .cloned()
            .ok_or_else(|| {
                OrchestrationError::EntityNotFound(format!("no stage for case {case_id}"))
            })
    }
}
