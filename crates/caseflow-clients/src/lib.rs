//! Collaborator ports — the sole API boundary between the orchestration
//! core and the three downstream services.
//!
//! The core depends on these traits, never on a concrete transport. The
//! HTTP implementations live here too; in-process recording fakes live in
//! `caseflow-harness`.

pub mod casework;
pub mod engine;
pub mod info;
pub mod rest;

pub use casework::{CaseworkClient, HttpCaseworkClient};
pub use engine::{HttpProcessEngineClient, ProcessEngineClient};
pub use info::{HttpInfoClient, InfoClient};
pub use rest::RestClient;

pub use caseflow_types::Result;
