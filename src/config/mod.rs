use std::time::Duration;

use crate::types::{CopyRequest, CredentialProfile};

pub mod args;

#[derive(Debug, Clone)]
pub struct Config {
    pub request: CopyRequest,
    pub from_profile: CredentialProfile,
    pub to_profile: CredentialProfile,
    pub from_client_config: ClientConfig,
    pub to_client_config: ClientConfig,
    pub timeout: Duration,
    pub credential_source: CredentialSource,
    pub tracing_config: Option<TracingConfig>,
    pub auto_complete_shell: Option<clap_complete::shells::Shell>,
}

/// Settings of the S3 client built for one leg of a copy.
///
/// Credentials and region are not part of it; they come from the credential provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Helper { program: String },
    Environment,
}

#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub tracing_level: log::Level,
    pub json_tracing: bool,
    pub aws_sdk_tracing: bool,
    pub disable_color_tracing: bool,
}
