//! Service settings, read from the environment.

use std::time::Duration;

use anyhow::{Context, Result};

const CASEWORK_URL: &str = "CASEFLOW_CASEWORK_URL";
const INFO_URL: &str = "CASEFLOW_INFO_URL";
const ENGINE_URL: &str = "CASEFLOW_ENGINE_URL";
const TIMEOUT_SECS: &str = "CASEFLOW_TIMEOUT_SECS";

/// Base URLs for the three collaborators plus the outbound request timeout.
#[derive(Debug, Clone)]
pub struct Settings {
    pub casework_url: String,
    pub info_url: String,
    pub engine_url: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let timeout = match std::env::var(TIMEOUT_SECS) {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("{TIMEOUT_SECS} must be an integer, got '{raw}'"))?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            casework_url: require(CASEWORK_URL)?,
            info_url: require(INFO_URL)?,
            engine_url: require(ENGINE_URL)?,
            timeout,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} environment variable not set"))
}
