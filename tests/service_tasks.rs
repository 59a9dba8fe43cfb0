//! Service-task contract tests: every operation a process step may call,
//! driven through `ServiceTaskPort` against the recording fakes.

use std::collections::HashMap;
use std::sync::Arc;

use caseflow::service::{CaseOrchestrator, ServiceTaskPort};
use caseflow::OrchestrationError;
use caseflow_harness::{
    init_tracing, CaseworkCall, EngineCall, InfoCall, RecordingCasework, RecordingEngine,
    RecordingInfo, Sequence,
};
use caseflow_types::{Team, User};
use uuid::Uuid;

struct Fixture {
    engine: Arc<RecordingEngine>,
    casework: Arc<RecordingCasework>,
    info: Arc<RecordingInfo>,
    orchestrator: CaseOrchestrator,
    case_id: Uuid,
    stage_id: Uuid,
}

impl Fixture {
    fn new() -> Self {
        init_tracing();
        let seq = Sequence::new();
        let engine = Arc::new(RecordingEngine::new(&seq));
        let casework = Arc::new(RecordingCasework::new(&seq));
        let info = Arc::new(RecordingInfo::new(&seq));
        let orchestrator =
            CaseOrchestrator::new(engine.clone(), casework.clone(), info.clone());
        Self {
            engine,
            casework,
            info,
            orchestrator,
            case_id: Uuid::new_v4(),
            stage_id: Uuid::new_v4(),
        }
    }

    fn case(&self) -> String {
        self.case_id.to_string()
    }

    fn stage(&self) -> String {
        self.stage_id.to_string()
    }

    fn team(&self, active: bool) -> Team {
        let team = Team {
            uuid: Uuid::new_v4(),
            display_name: "Team1".into(),
            active,
        };
        self.info.add_team(team.clone());
        team
    }

    fn assert_no_interactions(&self) {
        assert!(self.engine.calls().is_empty());
        assert!(self.casework.calls().is_empty());
        assert!(self.info.calls().is_empty());
    }
}

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Key/value batches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_value_writes_both_collaborators_engine_first() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_value(&fx.case(), &fx.stage(), &["testKey", "testValue"])
        .await
        .unwrap();

    let expected = map(&[("testKey", "testValue")]);
    let engine_calls = fx.engine.calls_with_seq();
    let casework_calls = fx.casework.calls_with_seq();
    assert_eq!(
        engine_calls[0].1,
        EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected.clone(),
        }
    );
    assert_eq!(
        casework_calls[0].1,
        CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: expected,
        }
    );
    // Engine task variables are written before the case store.
    assert!(engine_calls[0].0 < casework_calls[0].0);
    assert!(fx.info.calls().is_empty());
}

#[tokio::test]
async fn update_value_builds_exactly_the_supplied_pairs() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_value(
            &fx.case(),
            &fx.stage(),
            &["key1", "value1", "key2", "value3", "key3", "value3"],
        )
        .await
        .unwrap();

    let expected = map(&[("key1", "value1"), ("key2", "value3"), ("key3", "value3")]);
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected,
        }]
    );
}

#[tokio::test]
async fn odd_length_pair_list_fails_and_makes_no_calls() {
    let fx = Fixture::new();

    let err = fx
        .orchestrator
        .update_value(&fx.case(), &fx.stage(), &["key1", "value1", "key2"])
        .await
        .unwrap_err();
    assert!(matches!(err, OrchestrationError::InvalidMethodArgument(_)));

    let err = fx
        .orchestrator
        .update_case_value(&fx.case(), &fx.stage(), &["key1"])
        .await
        .unwrap_err();
    assert!(matches!(err, OrchestrationError::InvalidMethodArgument(_)));

    fx.assert_no_interactions();
}

#[tokio::test]
async fn update_case_value_touches_the_store_only() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_case_value(&fx.case(), &fx.stage(), &["testKey", "testValue"])
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: map(&[("testKey", "testValue")]),
        }]
    );
    assert!(fx.engine.calls().is_empty());
    assert!(fx.info.calls().is_empty());
}

#[tokio::test]
async fn blank_case_values_clears_keys_on_the_store_only() {
    let fx = Fixture::new();

    fx.orchestrator
        .blank_case_values(&fx.case(), &fx.stage(), &["a", "b"])
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: map(&[("a", ""), ("b", "")]),
        }]
    );
    assert!(fx.engine.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Team selection overrides
// ---------------------------------------------------------------------------

#[tokio::test]
async fn team_selection_with_no_teams_makes_no_calls() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_team_selection(&fx.case(), &fx.stage(), None, None)
        .await
        .unwrap();
    fx.orchestrator
        .update_team_selection(&fx.case(), &fx.stage(), Some(""), Some(""))
        .await
        .unwrap();

    fx.assert_no_interactions();
}

#[tokio::test]
async fn active_drafting_override_writes_both_slot_fields() {
    let fx = Fixture::new();
    let team = fx.team(true);

    fx.orchestrator
        .update_team_selection(&fx.case(), &fx.stage(), Some(&team.uuid.to_string()), None)
        .await
        .unwrap();

    let team_uuid = team.uuid.to_string();
    let expected = map(&[
        ("OverrideDraftingTeamUUID", team_uuid.as_str()),
        ("OverrideDraftingTeamName", "Team1"),
    ]);
    assert_eq!(fx.info.calls(), vec![InfoCall::Team { team_id: team.uuid }]);
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected.clone(),
        }]
    );
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: expected,
        }]
    );
}

#[tokio::test]
async fn inactive_drafting_override_clears_the_slot() {
    let fx = Fixture::new();
    let team = fx.team(false);

    fx.orchestrator
        .update_team_selection(&fx.case(), &fx.stage(), Some(&team.uuid.to_string()), None)
        .await
        .unwrap();

    let expected = map(&[
        ("OverrideDraftingTeamUUID", ""),
        ("OverrideDraftingTeamName", ""),
    ]);
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected,
        }]
    );
}

#[tokio::test]
async fn active_private_office_override_writes_po_slot() {
    let fx = Fixture::new();
    let team = fx.team(true);

    fx.orchestrator
        .update_team_selection(&fx.case(), &fx.stage(), None, Some(&team.uuid.to_string()))
        .await
        .unwrap();

    let team_uuid = team.uuid.to_string();
    let expected = map(&[
        ("OverridePOTeamUUID", team_uuid.as_str()),
        ("OverridePOTeamName", "Team1"),
    ]);
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected,
        }]
    );
}

#[tokio::test]
async fn inactive_private_office_override_clears_the_slot() {
    let fx = Fixture::new();
    let team = fx.team(false);

    fx.orchestrator
        .update_team_selection(&fx.case(), &fx.stage(), None, Some(&team.uuid.to_string()))
        .await
        .unwrap();

    let expected = map(&[("OverridePOTeamUUID", ""), ("OverridePOTeamName", "")]);
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: expected,
        }]
    );
}

#[tokio::test]
async fn both_overrides_resolve_into_a_single_dispatch() {
    let fx = Fixture::new();
    let drafting = fx.team(true);
    let private_office = fx.team(true);

    fx.orchestrator
        .update_team_selection(
            &fx.case(),
            &fx.stage(),
            Some(&drafting.uuid.to_string()),
            Some(&private_office.uuid.to_string()),
        )
        .await
        .unwrap();

    assert_eq!(fx.info.calls().len(), 2);
    let engine_calls = fx.engine.calls();
    assert_eq!(engine_calls.len(), 1);
    match &engine_calls[0] {
        EngineCall::UpdateTaskVariables { variables, .. } => assert_eq!(variables.len(), 4),
        other => panic!("unexpected engine call: {other:?}"),
    }
    assert_eq!(fx.casework.calls().len(), 1);
}

#[tokio::test]
async fn set_drafting_team_writes_the_drafting_fields() {
    let fx = Fixture::new();
    let team = fx.team(true);

    fx.orchestrator
        .set_drafting_team(&fx.case(), &fx.stage(), &team.uuid.to_string())
        .await
        .unwrap();

    let team_uuid = team.uuid.to_string();
    let expected = map(&[
        ("DraftingTeamUUID", team_uuid.as_str()),
        ("DraftingTeamName", "Team1"),
    ]);
    assert_eq!(fx.info.calls(), vec![InfoCall::Team { team_id: team.uuid }]);
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected.clone(),
        }]
    );
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: expected,
        }]
    );
}

// ---------------------------------------------------------------------------
// Primary-topic team
// ---------------------------------------------------------------------------

#[tokio::test]
async fn inactive_primary_topic_team_still_writes_an_empty_batch() {
    let fx = Fixture::new();
    let topic_id = Uuid::new_v4();
    let team = Team {
        uuid: Uuid::new_v4(),
        display_name: "Team Name".into(),
        active: false,
    };
    fx.info.set_team_for_topic(topic_id, "MOCK_STAGE_TYPE", team);

    fx.orchestrator
        .update_teams_for_primary_topic(
            &fx.case(),
            &fx.stage(),
            &topic_id.to_string(),
            "MOCK_STAGE_TYPE",
            "QueueTeamName",
            "QueueTeamUUID",
        )
        .await
        .unwrap();

    // Not a skip: both collaborators get exactly one call, empty batch.
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: HashMap::new(),
        }]
    );
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: HashMap::new(),
        }]
    );
}

#[tokio::test]
async fn active_primary_topic_team_writes_the_caller_named_keys() {
    let fx = Fixture::new();
    let topic_id = Uuid::new_v4();
    let team = Team {
        uuid: Uuid::new_v4(),
        display_name: "Team Name".into(),
        active: true,
    };
    fx.info
        .set_team_for_topic(topic_id, "MOCK_STAGE_TYPE", team.clone());

    fx.orchestrator
        .update_teams_for_primary_topic(
            &fx.case(),
            &fx.stage(),
            &topic_id.to_string(),
            "MOCK_STAGE_TYPE",
            "QueueTeamName",
            "QueueTeamUUID",
        )
        .await
        .unwrap();

    let team_uuid = team.uuid.to_string();
    let expected = map(&[
        ("QueueTeamUUID", team_uuid.as_str()),
        ("QueueTeamName", "Team Name"),
    ]);
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: expected,
        }]
    );
    assert_eq!(fx.casework.calls().len(), 1);
}

#[tokio::test]
async fn team_by_stage_and_texts_forwards_the_store_resolution() {
    let fx = Fixture::new();
    fx.casework
        .set_team_by_texts_result(map(&[("key", "value")]));

    fx.orchestrator
        .update_team_by_stage_and_texts(
            &fx.case(),
            &fx.stage(),
            "stageType",
            "teamUUIDKey",
            "teamNameKey",
            &["Text1", "Text2", "Text3"],
        )
        .await
        .unwrap();

    let calls = fx.casework.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        CaseworkCall::TeamByStageAndTexts {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            stage_type: "stageType".into(),
            team_uuid_key: "teamUUIDKey".into(),
            team_name_key: "teamNameKey".into(),
            texts: vec!["Text1".into(), "Text2".into(), "Text3".into()],
        }
    );
    assert_eq!(
        calls[1],
        CaseworkCall::UpdateCase {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            data: map(&[("key", "value")]),
        }
    );
    assert_eq!(
        fx.engine.calls(),
        vec![EngineCall::UpdateTaskVariables {
            stage_id: fx.stage_id,
            variables: map(&[("key", "value")]),
        }]
    );
    assert!(fx.info.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Stage lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_stage_generates_a_fresh_identifier() {
    let fx = Fixture::new();
    let team = fx.team(true);
    let user = User {
        uuid: Uuid::new_v4(),
        username: "user1".into(),
    };
    fx.info.add_team_member(team.uuid, user.clone());

    let result = fx
        .orchestrator
        .create_stage(
            &fx.case(),
            None,
            "testStageType",
            "testAllocationType",
            Some(&team.uuid.to_string()),
            Some(&user.uuid.to_string()),
        )
        .await
        .unwrap();

    let new_stage_id = Uuid::parse_str(&result).unwrap();
    assert_ne!(new_stage_id, fx.stage_id);
    assert_eq!(
        fx.info.calls(),
        vec![InfoCall::UserForTeam {
            team_id: team.uuid,
            user_id: user.uuid,
        }]
    );
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::CreateStage {
            case_id: fx.case_id,
            stage_id: new_stage_id,
            stage_type: "testStageType".into(),
            team_id: team.uuid,
            user_id: Some(user.uuid),
            allocation_type: "testAllocationType".into(),
        }]
    );
    assert!(fx.engine.calls().is_empty());
}

#[tokio::test]
async fn create_stage_drops_a_user_outside_the_team() {
    let fx = Fixture::new();
    let team = fx.team(true);
    let outsider = Uuid::new_v4();

    fx.orchestrator
        .create_stage(
            &fx.case(),
            None,
            "testStageType",
            "testAllocationType",
            Some(&team.uuid.to_string()),
            Some(&outsider.to_string()),
        )
        .await
        .unwrap();

    match &fx.casework.calls()[0] {
        CaseworkCall::CreateStage { user_id, .. } => assert_eq!(*user_id, None),
        other => panic!("unexpected casework call: {other:?}"),
    }
}

#[tokio::test]
async fn create_stage_resolves_the_default_team_for_the_stage_type() {
    let fx = Fixture::new();
    let default_team = Uuid::new_v4();
    fx.info.set_team_for_stage_type("testStageType", default_team);

    fx.orchestrator
        .create_stage(
            &fx.case(),
            None,
            "testStageType",
            "testAllocationType",
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        fx.info.calls(),
        vec![InfoCall::TeamForStageType {
            stage_type: "testStageType".into(),
        }]
    );
    match &fx.casework.calls()[0] {
        CaseworkCall::CreateStage { team_id, user_id, .. } => {
            assert_eq!(*team_id, default_team);
            assert_eq!(*user_id, None);
        }
        other => panic!("unexpected casework call: {other:?}"),
    }
}

#[tokio::test]
async fn create_stage_with_unmapped_stage_type_fails() {
    let fx = Fixture::new();

    let err = fx
        .orchestrator
        .create_stage(&fx.case(), None, "UNMAPPED", "testAllocationType", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::EntityNotFound(_)));
    assert!(fx.casework.calls().is_empty());
}

#[tokio::test]
async fn recreate_stage_keeps_the_original_identifier() {
    let fx = Fixture::new();
    let team = fx.team(true);
    let user = User {
        uuid: Uuid::new_v4(),
        username: "user1".into(),
    };
    fx.info.add_team_member(team.uuid, user.clone());

    let result = fx
        .orchestrator
        .create_stage(
            &fx.case(),
            Some(&fx.stage()),
            "testStageType",
            "testAllocationType",
            Some(&team.uuid.to_string()),
            Some(&user.uuid.to_string()),
        )
        .await
        .unwrap();

    assert_eq!(result, fx.stage());
    assert_eq!(
        fx.casework.calls(),
        vec![
            CaseworkCall::RecreateStage {
                case_id: fx.case_id,
                stage_id: fx.stage_id,
                stage_type: "testStageType".into(),
            },
            CaseworkCall::UpdateStageTeam {
                case_id: fx.case_id,
                stage_id: fx.stage_id,
                team_id: team.uuid,
                allocation_type: "testAllocationType".into(),
            },
            CaseworkCall::UpdateStageUser {
                case_id: fx.case_id,
                stage_id: fx.stage_id,
                user_id: user.uuid,
            },
        ]
    );
}

#[tokio::test]
async fn recreate_stage_without_a_user_skips_the_user_update() {
    let fx = Fixture::new();
    let team = fx.team(true);

    let result = fx
        .orchestrator
        .create_stage(
            &fx.case(),
            Some(&fx.stage()),
            "testStageType",
            "testAllocationType",
            Some(&team.uuid.to_string()),
            None,
        )
        .await
        .unwrap();

    assert_eq!(result, fx.stage());
    let calls = fx.casework.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], CaseworkCall::RecreateStage { .. }));
    assert!(matches!(calls[1], CaseworkCall::UpdateStageTeam { .. }));
    assert!(fx.info.calls().is_empty());
}

#[tokio::test]
async fn stage_creation_failure_surfaces_as_entity_creation() {
    let fx = Fixture::new();
    let team = fx.team(true);
    fx.casework.set_fail_stage_writes(true);

    let err = fx
        .orchestrator
        .create_stage(
            &fx.case(),
            None,
            "testStageType",
            "testAllocationType",
            Some(&team.uuid.to_string()),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::EntityCreation(_)));
}

// ---------------------------------------------------------------------------
// Counters, deadlines, notes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_count_treats_absent_as_zero() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_count(&fx.case(), "testVariableName", 1)
        .await
        .unwrap();

    assert_eq!(
        fx.casework.stored_data_value(fx.case_id, "testVariableName"),
        Some("1".to_string())
    );
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::AddToDataValue {
            case_id: fx.case_id,
            key: "testVariableName".into(),
            additive: 1,
        }]
    );
    assert!(fx.engine.calls().is_empty());
    assert!(fx.info.calls().is_empty());
}

#[tokio::test]
async fn update_count_applies_negative_additives() {
    let fx = Fixture::new();
    fx.casework.seed_data_value(fx.case_id, "testVariableName", "5");

    fx.orchestrator
        .update_count(&fx.case(), "testVariableName", -3)
        .await
        .unwrap();

    assert_eq!(
        fx.casework.stored_data_value(fx.case_id, "testVariableName"),
        Some("2".to_string())
    );
}

#[tokio::test]
async fn update_deadline_days_parses_and_forwards() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_deadline_days(&fx.case(), &fx.stage(), "123")
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateDeadlineDays {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            days: 123,
        }]
    );
    assert!(fx.engine.calls().is_empty());
}

#[tokio::test]
async fn update_deadline_days_rejects_garbage_before_calling_anyone() {
    let fx = Fixture::new();

    let err = fx
        .orchestrator
        .update_deadline_days(&fx.case(), &fx.stage(), "soon")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::EntityCreation(_)));
    fx.assert_no_interactions();
}

#[tokio::test]
async fn update_stage_deadline_forwards_type_and_days() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_stage_deadline(&fx.case(), &fx.stage(), "TEST", "7")
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateStageDeadline {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            stage_type: "TEST".into(),
            days: 7,
        }]
    );
}

#[tokio::test]
async fn update_deadline_for_stages_folds_pairs_into_one_call() {
    let fx = Fixture::new();

    fx.orchestrator
        .update_deadline_for_stages(
            &fx.case(),
            &fx.stage(),
            &["stage_type1", "5", "stage_type2", "10"],
        )
        .await
        .unwrap();

    let mut expected = HashMap::new();
    expected.insert("stage_type1".to_string(), 5);
    expected.insert("stage_type2".to_string(), 10);
    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::UpdateDeadlineForStages {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            stage_deadlines: expected,
        }]
    );
    assert!(fx.engine.calls().is_empty());
}

#[tokio::test]
async fn update_deadline_for_stages_rejects_odd_lists() {
    let fx = Fixture::new();

    let err = fx
        .orchestrator
        .update_deadline_for_stages(&fx.case(), &fx.stage(), &["stage_type1"])
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestrationError::InvalidMethodArgument(_)));
    fx.assert_no_interactions();
}

#[tokio::test]
async fn create_case_note_forwards_type_and_text() {
    let fx = Fixture::new();
    let text = "Case note for closing a case by telephone.";

    fx.orchestrator
        .create_case_note(&fx.case(), text, "CLOSE_CASE_TELEPHONE")
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::CreateCaseNote {
            case_id: fx.case_id,
            note_type: "CLOSE_CASE_TELEPHONE".into(),
            text: text.into(),
        }]
    );
    assert!(fx.engine.calls().is_empty());
    assert!(fx.info.calls().is_empty());
}

#[tokio::test]
async fn conversion_note_carries_the_fixed_tag() {
    let fx = Fixture::new();

    fx.orchestrator
        .create_case_conversion_note(&fx.case(), "COR/0123456/26", "converted")
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::CreateCaseNote {
            case_id: fx.case_id,
            note_type: "CASE_CONVERSION".into(),
            text: "converted".into(),
        }]
    );
}

#[tokio::test]
async fn calculate_totals_touches_the_store_only() {
    let fx = Fixture::new();

    fx.orchestrator
        .calculate_totals(&fx.case(), &fx.stage(), "list")
        .await
        .unwrap();

    assert_eq!(
        fx.casework.calls(),
        vec![CaseworkCall::CalculateTotals {
            case_id: fx.case_id,
            stage_id: fx.stage_id,
            list_name: "list".into(),
        }]
    );
    assert!(fx.engine.calls().is_empty());
    assert!(fx.info.calls().is_empty());
}
