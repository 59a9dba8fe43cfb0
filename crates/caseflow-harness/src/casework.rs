//! Recording fake of the case-record store port.
//!
//! Carries a small in-memory data store so counter semantics (absent
//! treated as zero, store-side increment) behave like the real service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use caseflow_clients::CaseworkClient;
use caseflow_types::{CaseType, OrchestrationError, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::Sequence;

#[derive(Debug, Clone, PartialEq)]
pub enum CaseworkCall {
    CreateCase {
        case_id: Uuid,
        case_type: CaseType,
        data: HashMap<String, String>,
        case_deadline: NaiveDate,
    },
    CreateStage {
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: String,
        team_id: Uuid,
        user_id: Option<Uuid>,
        allocation_type: String,
    },
    RecreateStage {
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: String,
    },
    UpdateStageTeam {
        case_id: Uuid,
        stage_id: Uuid,
        team_id: Uuid,
        allocation_type: String,
    },
    UpdateStageUser {
        case_id: Uuid,
        stage_id: Uuid,
        user_id: Uuid,
    },
    UpdateCase {
        case_id: Uuid,
        stage_id: Uuid,
        data: HashMap<String, String>,
    },
    DataValue {
        case_id: Uuid,
        key: String,
    },
    UpdateDataValue {
        case_id: Uuid,
        key: String,
        value: String,
    },
    AddToDataValue {
        case_id: Uuid,
        key: String,
        additive: i64,
    },
    UpdateDeadlineDays {
        case_id: Uuid,
        stage_id: Uuid,
        days: i32,
    },
    UpdateStageDeadline {
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: String,
        days: i32,
    },
    UpdateDeadlineForStages {
        case_id: Uuid,
        stage_id: Uuid,
        stage_deadlines: HashMap<String, i32>,
    },
    CreateCaseNote {
        case_id: Uuid,
        note_type: String,
        text: String,
    },
    CalculateTotals {
        case_id: Uuid,
        stage_id: Uuid,
        list_name: String,
    },
    TeamByStageAndTexts {
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: String,
        team_uuid_key: String,
        team_name_key: String,
        texts: Vec<String>,
    },
}

#[derive(Default)]
pub struct RecordingCasework {
    seq: Sequence,
    calls: Mutex<Vec<(usize, CaseworkCall)>>,
    data: Mutex<HashMap<(Uuid, String), String>>,
    team_by_texts_result: Mutex<HashMap<String, String>>,
    fail_stage_writes: AtomicBool,
}

impl RecordingCasework {
    pub fn new(seq: &Sequence) -> Self {
        Self {
            seq: seq.clone(),
            ..Self::default()
        }
    }

    /// Every subsequent stage write is rejected, as an unreachable or
    /// refusing store would.
    pub fn set_fail_stage_writes(&self, fail: bool) {
        self.fail_stage_writes.store(fail, Ordering::SeqCst);
    }

    /// What the store's free-text team resolution will answer.
    pub fn set_team_by_texts_result(&self, data: HashMap<String, String>) {
        *self.team_by_texts_result.lock().unwrap() = data;
    }

    /// Seed a raw data value, bypassing the call log.
    pub fn seed_data_value(&self, case_id: Uuid, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert((case_id, key.to_string()), value.to_string());
    }

    /// Read back a stored data value, bypassing the call log.
    pub fn stored_data_value(&self, case_id: Uuid, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(&(case_id, key.to_string())).cloned()
    }

    pub fn calls(&self) -> Vec<CaseworkCall> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn calls_with_seq(&self) -> Vec<(usize, CaseworkCall)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CaseworkCall) {
        self.calls.lock().unwrap().push((self.seq.next(), call));
    }

    fn stage_write_guard(&self) -> Result<()> {
        if self.fail_stage_writes.load(Ordering::SeqCst) {
            return Err(OrchestrationError::Remote {
                service: "casework",
                status: 503,
                message: "stage writes rejected".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CaseworkClient for RecordingCasework {
    async fn create_case(
        &self,
        case_id: Uuid,
        case_type: CaseType,
        data: &HashMap<String, String>,
        case_deadline: NaiveDate,
    ) -> Result<String> {
        self.record(CaseworkCall::CreateCase {
            case_id,
            case_type,
            data: data.clone(),
            case_deadline,
        });
        Ok(format!("{case_type}/0000001/26"))
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
        self.record(CaseworkCall::CreateStage {
            case_id,
            stage_id,
            stage_type: stage_type.to_string(),
            team_id,
            user_id,
            allocation_type: allocation_type.to_string(),
        });
        self.stage_write_guard()?;
        Ok(stage_id)
    }

    async fn recreate_stage(&self, case_id: Uuid, stage_id: Uuid, stage_type: &str) -> Result<()> {
        self.record(CaseworkCall::RecreateStage {
            case_id,
            stage_id,
            stage_type: stage_type.to_string(),
        });
        self.stage_write_guard()
    }

    async fn update_stage_team(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        team_id: Uuid,
        allocation_type: &str,
    ) -> Result<()> {
        self.record(CaseworkCall::UpdateStageTeam {
            case_id,
            stage_id,
            team_id,
            allocation_type: allocation_type.to_string(),
        });
        self.stage_write_guard()
    }

    async fn update_stage_user(&self, case_id: Uuid, stage_id: Uuid, user_id: Uuid) -> Result<()> {
        self.record(CaseworkCall::UpdateStageUser {
            case_id,
            stage_id,
            user_id,
        });
        self.stage_write_guard()
    }

    async fn update_case(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        data: &HashMap<String, String>,
    ) -> Result<()> {
        self.record(CaseworkCall::UpdateCase {
            case_id,
            stage_id,
            data: data.clone(),
        });
        Ok(())
    }

    async fn data_value(&self, case_id: Uuid, key: &str) -> Result<Option<String>> {
        self.record(CaseworkCall::DataValue {
            case_id,
            key: key.to_string(),
        });
        Ok(self.data.lock().unwrap().get(&(case_id, key.to_string())).cloned())
    }

    async fn update_data_value(&self, case_id: Uuid, key: &str, value: &str) -> Result<()> {
        self.record(CaseworkCall::UpdateDataValue {
            case_id,
            key: key.to_string(),
            value: value.to_string(),
        });
        self.data
            .lock()
            .unwrap()
            .insert((case_id, key.to_string()), value.to_string());
        Ok(())
    }

    async fn add_to_data_value(&self, case_id: Uuid, key: &str, additive: i64) -> Result<String> {
        self.record(CaseworkCall::AddToDataValue {
            case_id,
            key: key.to_string(),
            additive,
        });

        let mut data = self.data.lock().unwrap();
        let slot = (case_id, key.to_string());
        let current: i64 = data
            .get(&slot)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let next = (current + additive).to_string();
        data.insert(slot, next.clone());
        Ok(next)
    }

    async fn update_deadline_days(&self, case_id: Uuid, stage_id: Uuid, days: i32) -> Result<()> {
        self.record(CaseworkCall::UpdateDeadlineDays {
            case_id,
            stage_id,
            days,
        });
        Ok(())
    }

    async fn update_stage_deadline(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_type: &str,
        days: i32,
    ) -> Result<()> {
        self.record(CaseworkCall::UpdateStageDeadline {
            case_id,
            stage_id,
            stage_type: stage_type.to_string(),
            days,
        });
        Ok(())
    }

    async fn update_deadline_for_stages(
        &self,
        case_id: Uuid,
        stage_id: Uuid,
        stage_deadlines: &HashMap<String, i32>,
    ) -> Result<()> {
        self.record(CaseworkCall::UpdateDeadlineForStages {
            case_id,
            stage_id,
            stage_deadlines: stage_deadlines.clone(),
        });
        Ok(())
    }

    async fn create_case_note(&self, case_id: Uuid, note_type: &str, text: &str) -> Result<Uuid> {
        self.record(CaseworkCall::CreateCaseNote {
            case_id,
            note_type: note_type.to_string(),
            text: text.to_string(),
        });
        Ok(Uuid::new_v4())
    }

    async fn calculate_totals(&self, case_id: Uuid, stage_id: Uuid, list_name: &str) -> Result<()> {
        self.record(CaseworkCall::CalculateTotals {
            case_id,
            stage_id,
            list_name: list_name.to_string(),
        });
        Ok(())
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
        self.record(CaseworkCall::TeamByStageAndTexts {
            case_id,
            stage_id,
            stage_type: stage_type.to_string(),
            team_uuid_key: team_uuid_key.to_string(),
            team_name_key: team_name_key.to_string(),
            texts: texts.to_vec(),
        });
        Ok(self.team_by_texts_result.lock().unwrap().clone())
    }
}
