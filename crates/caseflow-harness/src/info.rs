//! Recording fake of the reference-data port.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use caseflow_clients::InfoClient;
use caseflow_types::{CaseType, FormSchema, OrchestrationError, Result, Team, User};
use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::Sequence;

#[derive(Debug, Clone, PartialEq)]
pub enum InfoCall {
    Team { team_id: Uuid },
    TeamForStageType { stage_type: String },
    TeamForTopicAndStage { case_id: Uuid, topic_id: Uuid, stage_type: String },
    UserForTeam { team_id: Uuid, user_id: Uuid },
    CaseDeadline { case_type: CaseType, received: NaiveDate },
    StageDeadline { stage_type: String, received: NaiveDate },
    Form { form_type: String },
}

#[derive(Default)]
pub struct RecordingInfo {
    seq: Sequence,
    calls: Mutex<Vec<(usize, InfoCall)>>,
    teams: Mutex<HashMap<Uuid, Team>>,
    stage_type_teams: Mutex<HashMap<String, Uuid>>,
    topic_teams: Mutex<HashMap<(Uuid, String), Team>>,
    members: Mutex<HashMap<(Uuid, Uuid), User>>,
    deadline_days: Mutex<HashMap<String, i64>>,
    forms: Mutex<HashMap<String, FormSchema>>,
}

impl RecordingInfo {
    pub fn new(seq: &Sequence) -> Self {
        Self {
            seq: seq.clone(),
            ..Self::default()
        }
    }

    pub fn add_team(&self, team: Team) {
        self.teams.lock().unwrap().insert(team.uuid, team);
    }

    pub fn set_team_for_stage_type(&self, stage_type: &str, team_id: Uuid) {
        self.stage_type_teams
            .lock()
            .unwrap()
            .insert(stage_type.to_string(), team_id);
    }

    pub fn set_team_for_topic(&self, topic_id: Uuid, stage_type: &str, team: Team) {
        self.topic_teams
            .lock()
            .unwrap()
            .insert((topic_id, stage_type.to_string()), team);
    }

    pub fn add_team_member(&self, team_id: Uuid, user: User) {
        self.members.lock().unwrap().insert((team_id, user.uuid), user);
    }

    /// Deadline policy: `received + days` for the given case/stage type.
    pub fn set_deadline_days(&self, type_name: &str, days: i64) {
        self.deadline_days
            .lock()
            .unwrap()
            .insert(type_name.to_string(), days);
    }

    pub fn add_form(&self, form: FormSchema) {
        self.forms.lock().unwrap().insert(form.form_type.clone(), form);
    }

    pub fn calls(&self) -> Vec<InfoCall> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    fn record(&self, call: InfoCall) {
        self.calls.lock().unwrap().push((self.seq.next(), call));
    }

    fn deadline_for(&self, type_name: &str, received: NaiveDate) -> Result<NaiveDate> {
        let days = self
            .deadline_days
            .lock()
            .unwrap()
            .get(type_name)
            .copied()
            .ok_or_else(|| {
                OrchestrationError::EntityNotFound(format!("no deadline policy for {type_name}"))
            })?;
        Ok(received + Duration::days(days))
    }
}

#[async_trait]
impl InfoClient for RecordingInfo {
    async fn team(&self, team_id: Uuid) -> Result<Team> {
        self.record(InfoCall::Team { team_id });
        self.teams.lock().unwrap().get(&team_id).cloned().ok_or_else(|| {
            OrchestrationError::EntityNotFound(format!("team {team_id} not found"))
        })
    }

    async fn team_for_stage_type(&self, stage_type: &str) -> Result<Uuid> {
        self.record(InfoCall::TeamForStageType {
            stage_type: stage_type.to_string(),
        });
        self.stage_type_teams
            .lock()
            .unwrap()
            .get(stage_type)
            .copied()
            .ok_or_else(|| {
                OrchestrationError::EntityNotFound(format!("no team for stage type {stage_type}"))
            })
    }

    async fn team_for_topic_and_stage(
        &self,
        case_id: Uuid,
        topic_id: Uuid,
        stage_type: &str,
    ) -> Result<Team> {
        self.record(InfoCall::TeamForTopicAndStage {
            case_id,
            topic_id,
            stage_type: stage_type.to_string(),
        });
        self.topic_teams
            .lock()
            .unwrap()
            .get(&(topic_id, stage_type.to_string()))
            .cloned()
            .ok_or_else(|| {
                OrchestrationError::EntityNotFound(format!(
                    "no team for topic {topic_id} at {stage_type}"
                ))
            })
    }

    async fn user_for_team(&self, team_id: Uuid, user_id: Uuid) -> Result<Option<User>> {
        self.record(InfoCall::UserForTeam { team_id, user_id });
        Ok(self.members.lock().unwrap().get(&(team_id, user_id)).cloned())
    }

    async fn case_deadline(&self, case_type: CaseType, received: NaiveDate) -> Result<NaiveDate> {
        self.record(InfoCall::CaseDeadline { case_type, received });
        self.deadline_for(&case_type.to_string(), received)
    }

    async fn stage_deadline(&self, stage_type: &str, received: NaiveDate) -> Result<NaiveDate> {
        self.record(InfoCall::StageDeadline {
            stage_type: stage_type.to_string(),
            received,
        });
        self.deadline_for(stage_type, received)
    }

    async fn form(&self, form_type: &str) -> Result<FormSchema> {
        self.record(InfoCall::Form {
            form_type: form_type.to_string(),
        });
        self.forms.lock().unwrap().get(form_type).cloned().ok_or_else(|| {
            OrchestrationError::EntityNotFound(format!("no form schema for {form_type}"))
        })
    }
}
