use serde::{Deserialize, Serialize};

pub mod http;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    Head,
    Get,
}

impl From<ProbeMethod> for reqwest::Method {
    fn from(method: ProbeMethod) -> Self {
        match method {
            ProbeMethod::Head => reqwest::Method::HEAD,
            ProbeMethod::Get => reqwest::Method::GET,
        }
    }
}

/// Result of probing one project. Exactly one is produced per configured
/// project per run, whatever happens on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub project: String,
    pub success: bool,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn ok(project: &str, status: u16) -> Self {
        Self {
            project: project.to_string(),
            success: true,
            status: Some(status),
            error: None,
        }
    }

    pub fn failed(project: &str, status: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            project: project.to_string(),
            success: false,
            status,
            error: Some(error.into()),
        }
    }
}
