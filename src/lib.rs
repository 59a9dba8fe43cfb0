//! caseflow — case workflow orchestration service.
//!
//! Coordinates the lifecycle of a case-handling workflow across three
//! independently owned collaborators: a process engine executing the
//! business-process definitions, a case-record store persisting case and
//! stage data, and a reference-data service resolving teams and users.
//!
//! The interesting logic lives in [`service::CaseOrchestrator`]: stage
//! create/recreate, team override precedence, variable batching, and the
//! two-sided dispatch that keeps engine and store consistent. Process
//! semantics and storage stay behind the ports in `caseflow-clients`.

pub mod config;
pub mod service;
pub mod variables;
pub mod workflow;

pub use caseflow_types::{OrchestrationError, Result};

pub use config::Settings;
pub use service::{CaseOrchestrator, ServiceTaskPort, WriteTarget};
pub use variables::VariableBatch;
pub use workflow::{CaseflowService, CreateCaseOutcome, StartStageOutcome};
