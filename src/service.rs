//! Service-task operations invoked by the process engine.
//!
//! Each operation is one "service task" callback: the running process
//! instance passes case/stage identifiers and scalar arguments, the
//! operation resolves any reference data it needs, builds a variable
//! batch, and writes it through the dispatch layer. Identifiers arrive as
//! strings because that is what the process definition carries.
//!
//! `ServiceTaskPort` is the documented contract of what a process step may
//! call; the test harness drives it without a running engine.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use caseflow_clients::{CaseworkClient, InfoClient, ProcessEngineClient};
use caseflow_types::{OrchestrationError, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::variables::VariableBatch;

/// Note type recorded when a case arrives by conversion from another
/// system.
const CONVERSION_NOTE_TYPE: &str = "CASE_CONVERSION";

// ---------------------------------------------------------------------------
// WriteTarget
// ---------------------------------------------------------------------------

/// Which collaborators a mutation writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    ProcessEngine,
    CaseStore,
    Both,
}

impl WriteTarget {
    pub fn writes_engine(self) -> bool {
        matches!(self, WriteTarget::ProcessEngine | WriteTarget::Both)
    }

    pub fn writes_store(self) -> bool {
        matches!(self, WriteTarget::CaseStore | WriteTarget::Both)
    }
}

// ---------------------------------------------------------------------------
// ServiceTaskPort
// ---------------------------------------------------------------------------

/// The operations a process step may invoke, with the argument shapes the
/// process definitions use (string identifiers, flat key/value lists).
#[async_trait]
pub trait ServiceTaskPort: Send + Sync {
    /// Create a stage, or re-create one a process loop is revisiting.
    /// Returns the stage identifier as a string for the process variable.
    async fn create_stage(
        &self,
        case_id: &str,
        stage_id: Option<&str>,
        stage_type: &str,
        allocation_type: &str,
        allocation_team_id: Option<&str>,
        allocated_user_id: Option<&str>,
    ) -> Result<String>;

    /// Independently apply the drafting and private-office override slots.
    /// Slots with no id supplied are skipped outright; when neither slot
    /// contributes, no collaborator is called at all.
    async fn update_team_selection(
        &self,
        case_id: &str,
        stage_id: &str,
        drafting_team_id: Option<&str>,
        private_office_team_id: Option<&str>,
    ) -> Result<()>;

    /// Record the drafting team on the case. Inactive teams clear the
    /// fields instead of being written.
    async fn set_drafting_team(&self, case_id: &str, stage_id: &str, team_id: &str) -> Result<()>;

    /// Re-derive the team from the case's primary topic. An inactive
    /// resolved team still writes an empty batch to both collaborators —
    /// downstream consumers rely on the write being present.
    async fn update_teams_for_primary_topic(
        &self,
        case_id: &str,
        stage_id: &str,
        topic_id: &str,
        stage_type: &str,
        team_name_key: &str,
        team_uuid_key: &str,
    ) -> Result<()>;

    /// Team resolution delegated to the case store's own free-text
    /// endpoint; the returned batch is forwarded to both collaborators.
    async fn update_team_by_stage_and_texts(
        &self,
        case_id: &str,
        stage_id: &str,
        stage_type: &str,
        team_uuid_key: &str,
        team_name_key: &str,
        texts: &[&str],
    ) -> Result<()>;

    /// Write key/value pairs to both collaborators.
    async fn update_value(&self, case_id: &str, stage_id: &str, pairs: &[&str]) -> Result<()>;

    /// Write key/value pairs to the case store only.
    async fn update_case_value(&self, case_id: &str, stage_id: &str, pairs: &[&str]) -> Result<()>;

    /// Clear the named fields on the case store only.
    async fn blank_case_values(&self, case_id: &str, stage_id: &str, keys: &[&str]) -> Result<()>;

    /// Adjust a numeric case counter by `additive`. The increment happens
    /// store-side, so concurrent updates cannot lose writes.
    async fn update_count(&self, case_id: &str, variable_name: &str, additive: i64) -> Result<()>;

    async fn update_deadline_days(&self, case_id: &str, stage_id: &str, days: &str) -> Result<()>;

    async fn update_stage_deadline(
        &self,
        case_id: &str,
        stage_id: &str,
        stage_type: &str,
        days: &str,
    ) -> Result<()>;

    /// Flat `[stage_type, days, stage_type, days, ...]` list folded into a
    /// single per-stage-type deadline call.
    async fn update_deadline_for_stages(
        &self,
        case_id: &str,
        stage_id: &str,
        pairs: &[&str],
    ) -> Result<()>;

    async fn create_case_note(&self, case_id: &str, text: &str, note_type: &str) -> Result<()>;

    async fn create_case_conversion_note(
        &self,
        case_id: &str,
        business_key: &str,
        text: &str,
    ) -> Result<()>;

    /// Recompute the totals of an itemised list on the case record.
    async fn calculate_totals(&self, case_id: &str, stage_id: &str, list_name: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// CaseOrchestrator
// ---------------------------------------------------------------------------

/// The orchestration core: resolves reference data, builds variable
/// batches, and propagates them to the process engine and case store.
///
/// No state is shared between operations beyond the collaborator handles;
/// concurrent invocations for different case/stage identifiers are
/// independent.
pub struct CaseOrchestrator {
    engine: Arc<dyn ProcessEngineClient>,
    casework: Arc<dyn CaseworkClient>,
    info: Arc<dyn InfoClient>,
}

impl CaseOrchestrator {
    pub fn new(
        engine: Arc<dyn ProcessEngineClient>,
        casework: Arc<dyn CaseworkClient>,
        info: Arc<dyn InfoClient>,
    ) -> Self {
        Self {
            engine,
            casework,
            info,
        }
    }

    /// Two-sided write: engine task variables first, then case store.
    /// Partial failure is surfaced, never reconciled here.
    async fn dispatch(
        &self,
        target: WriteTarget,
        case_id: Uuid,
        stage_id: Uuid,
        batch: &VariableBatch,
    ) -> Result<()> {
        debug!(%case_id, %stage_id, entries = batch.len(), ?target, "dispatching variable batch");
        if target.writes_engine() {
            self.engine
                .update_task_variables(stage_id, batch.as_map())
                .await?;
        }
        if target.writes_store() {
            self.casework
                .update_case(case_id, stage_id, batch.as_map())
                .await?;
        }
        Ok(())
    }

    /// Resolve one override slot into the batch. Absent or empty ids skip
    /// the slot; an inactive team clears both fields.
    async fn apply_team_slot(
        &self,
        batch: &mut VariableBatch,
        team_id: Option<&str>,
        uuid_key: &str,
        name_key: &str,
    ) -> Result<()> {
        let Some(team_id) = present(team_id) else {
            return Ok(());
        };

        let team = self.info.team(parse_id(team_id, "team")?).await?;
        if team.active {
            batch.set(uuid_key, team.uuid.to_string());
            batch.set(name_key, team.display_name);
        } else {
            batch.set(uuid_key, "");
            batch.set(name_key, "");
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceTaskPort for CaseOrchestrator {
    async fn create_stage(
        &self,
        case_id: &str,
        stage_id: Option<&str>,
        stage_type: &str,
        allocation_type: &str,
        allocation_team_id: Option<&str>,
        allocated_user_id: Option<&str>,
    ) -> Result<String> {
        let case_id = parse_id(case_id, "case")?;

        let team_id = match present(allocation_team_id) {
            Some(team_id) => parse_id(team_id, "team")?,
            None => self.info.team_for_stage_type(stage_type).await?,
        };

        // A user outside the team is dropped, not an error.
        let user_id = match present(allocated_user_id) {
            Some(user_id) => self
                .info
                .user_for_team(team_id, parse_id(user_id, "user")?)
                .await?
                .map(|user| user.uuid),
            None => None,
        };

        match present(stage_id) {
            None => {
                let stage_id = Uuid::new_v4();
                let created = self
                    .casework
                    .create_stage(case_id, stage_id, stage_type, team_id, user_id, allocation_type)
                    .await
                    .map_err(creation_failed("create stage"))?;
                info!(%case_id, stage_id = %created, stage_type, "stage created");
                Ok(created.to_string())
            }
            Some(existing) => {
                let stage_id = parse_id(existing, "stage")?;
                self.casework
                    .recreate_stage(case_id, stage_id, stage_type)
                    .await
                    .map_err(creation_failed("recreate stage"))?;
                self.casework
                    .update_stage_team(case_id, stage_id, team_id, allocation_type)
                    .await
                    .map_err(creation_failed("recreate stage"))?;
                if let Some(user_id) = user_id {
                    self.casework
                        .update_stage_user(case_id, stage_id, user_id)
                        .await
                        .map_err(creation_failed("recreate stage"))?;
                }
                info!(%case_id, %stage_id, stage_type, "stage recreated");
                Ok(existing.to_string())
            }
        }
    }

    async fn update_team_selection(
        &self,
        case_id: &str,
        stage_id: &str,
        drafting_team_id: Option<&str>,
        private_office_team_id: Option<&str>,
    ) -> Result<()> {
        let mut batch = VariableBatch::new();
        self.apply_team_slot(
            &mut batch,
            drafting_team_id,
            "OverrideDraftingTeamUUID",
            "OverrideDraftingTeamName",
        )
        .await?;
        self.apply_team_slot(
            &mut batch,
            private_office_team_id,
            "OverridePOTeamUUID",
            "OverridePOTeamName",
        )
        .await?;

        // Nothing changed: callers depend on the absence of side effects,
        // so neither collaborator is called.
        if batch.is_empty() {
            debug!(case_id, stage_id, "no team selection supplied, skipping");
            return Ok(());
        }

        self.dispatch(
            WriteTarget::Both,
            parse_id(case_id, "case")?,
            parse_id(stage_id, "stage")?,
            &batch,
        )
        .await
    }

    async fn set_drafting_team(&self, case_id: &str, stage_id: &str, team_id: &str) -> Result<()> {
        let mut batch = VariableBatch::new();
        self.apply_team_slot(
            &mut batch,
            Some(team_id),
            "DraftingTeamUUID",
            "DraftingTeamName",
        )
        .await?;

        self.dispatch(
            WriteTarget::Both,
            parse_id(case_id, "case")?,
            parse_id(stage_id, "stage")?,
            &batch,
        )
        .await
    }

    async fn update_teams_for_primary_topic(
        &self,
        case_id: &str,
        stage_id: &str,
        topic_id: &str,
        stage_type: &str,
        team_name_key: &str,
        team_uuid_key: &str,
    ) -> Result<()> {
        let case_id = parse_id(case_id, "case")?;
        let team = self
            .info
            .team_for_topic_and_stage(case_id, parse_id(topic_id, "topic")?, stage_type)
            .await?;

        // An inactive team writes an empty batch rather than skipping:
        // the empty-but-present write clears prior state downstream.
        let mut batch = VariableBatch::new();
        if team.active {
            batch.set(team_uuid_key, team.uuid.to_string());
            batch.set(team_name_key, team.display_name);
        }

        self.dispatch(WriteTarget::Both, case_id, parse_id(stage_id, "stage")?, &batch)
            .await
    }

    async fn update_team_by_stage_and_texts(
        &self,
        case_id: &str,
        stage_id: &str,
        stage_type: &str,
        team_uuid_key: &str,
        team_name_key: &str,
        texts: &[&str],
    ) -> Result<()> {
        let case_id = parse_id(case_id, "case")?;
        let stage_id = parse_id(stage_id, "stage")?;
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();

        let data = self
            .casework
            .team_by_stage_and_texts(
                case_id,
                stage_id,
                stage_type,
                team_uuid_key,
                team_name_key,
                &texts,
            )
            .await?;

        self.dispatch(WriteTarget::Both, case_id, stage_id, &VariableBatch::from(data))
            .await
    }

    async fn update_value(&self, case_id: &str, stage_id: &str, pairs: &[&str]) -> Result<()> {
        let batch = VariableBatch::from_pairs(pairs)?;
        self.dispatch(
            WriteTarget::Both,
            parse_id(case_id, "case")?,
            parse_id(stage_id, "stage")?,
            &batch,
        )
        .await
    }

    async fn update_case_value(&self, case_id: &str, stage_id: &str, pairs: &[&str]) -> Result<()> {
        let batch = VariableBatch::from_pairs(pairs)?;
        self.dispatch(
            WriteTarget::CaseStore,
            parse_id(case_id, "case")?,
            parse_id(stage_id, "stage")?,
            &batch,
        )
        .await
    }

    async fn blank_case_values(&self, case_id: &str, stage_id: &str, keys: &[&str]) -> Result<()> {
        let batch = VariableBatch::blank(keys);
        self.dispatch(
            WriteTarget::CaseStore,
            parse_id(case_id, "case")?,
            parse_id(stage_id, "stage")?,
            &batch,
        )
        .await
    }

    async fn update_count(&self, case_id: &str, variable_name: &str, additive: i64) -> Result<()> {
        let value = self
            .casework
            .add_to_data_value(parse_id(case_id, "case")?, variable_name, additive)
            .await?;
        debug!(case_id, variable_name, additive, value = %value, "counter updated");
        Ok(())
    }

    async fn update_deadline_days(&self, case_id: &str, stage_id: &str, days: &str) -> Result<()> {
        self.casework
            .update_deadline_days(
                parse_id(case_id, "case")?,
                parse_id(stage_id, "stage")?,
                parse_days(days)?,
            )
            .await
    }

    async fn update_stage_deadline(
        &self,
        case_id: &str,
        stage_id: &str,
        stage_type: &str,
        days: &str,
    ) -> Result<()> {
        self.casework
            .update_stage_deadline(
                parse_id(case_id, "case")?,
                parse_id(stage_id, "stage")?,
                stage_type,
                parse_days(days)?,
            )
            .await
    }

    async fn update_deadline_for_stages(
        &self,
        case_id: &str,
        stage_id: &str,
        pairs: &[&str],
    ) -> Result<()> {
        if pairs.len() % 2 != 0 {
            return Err(OrchestrationError::InvalidMethodArgument(
                "must supply stage-type/days pairs".into(),
            ));
        }

        let mut stage_deadlines = HashMap::with_capacity(pairs.len() / 2);
        for pair in pairs.chunks_exact(2) {
            stage_deadlines.insert(pair[0].to_string(), parse_days(pair[1])?);
        }

        self.casework
            .update_deadline_for_stages(
                parse_id(case_id, "case")?,
                parse_id(stage_id, "stage")?,
                &stage_deadlines,
            )
            .await
    }

    async fn create_case_note(&self, case_id: &str, text: &str, note_type: &str) -> Result<()> {
        self.casework
            .create_case_note(parse_id(case_id, "case")?, note_type, text)
            .await?;
        Ok(())
    }

    async fn create_case_conversion_note(
        &self,
        case_id: &str,
        business_key: &str,
        text: &str,
    ) -> Result<()> {
        info!(case_id, business_key, "recording case conversion");
        self.casework
            .create_case_note(parse_id(case_id, "case")?, CONVERSION_NOTE_TYPE, text)
            .await?;
        Ok(())
    }

    async fn calculate_totals(&self, case_id: &str, stage_id: &str, list_name: &str) -> Result<()> {
        self.casework
            .calculate_totals(
                parse_id(case_id, "case")?,
                parse_id(stage_id, "stage")?,
                list_name,
            )
            .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Treat `None` and the empty string alike: process variables that were
/// never set often arrive as `""`.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_id(value: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| {
        OrchestrationError::EntityCreation(format!("invalid {what} identifier '{value}'"))
    })
}

fn parse_days(value: &str) -> Result<i32> {
    value.parse().map_err(|_| {
        OrchestrationError::EntityCreation(format!("invalid day count '{value}'"))
    })
}

/// Case-store rejection while creating state surfaces as a creation
/// failure; the engine must not advance past the service task.
fn creation_failed(op: &'static str) -> impl FnOnce(OrchestrationError) -> OrchestrationError {
    move |e| match e {
        e @ OrchestrationError::InvalidMethodArgument(_) => e,
        other => OrchestrationError::EntityCreation(format!("{op} failed: {other}")),
    }
}
