use std::io::BufRead;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::types::error::CredentialError;
use crate::types::{CredentialProfile, ResolvedCredentials};

pub mod cached;
pub mod environment;
pub mod external;

pub const ACCESS_KEY_ID_VARIABLE: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VARIABLE: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VARIABLE: &str = "AWS_SESSION_TOKEN";
pub const REGION_VARIABLE: &str = "AWS_REGION";

/// Where a credential helper reads interactive answers (MFA codes) from.
/// `None` means the host's standard input.
pub type InteractiveInput = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolves temporary credentials for `profile`.
    ///
    /// Every call is a fresh resolution unless the implementation says otherwise.
    /// The profile's region override, if any, replaces the resolved region.
    async fn resolve(
        &self,
        profile: &CredentialProfile,
        input: Option<InteractiveInput>,
    ) -> Result<ResolvedCredentials, CredentialError>;
}

/// Fixed credentials, for callers that already hold them.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: ResolvedCredentials,
}

impl StaticCredentialProvider {
    pub fn new(credentials: ResolvedCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn resolve(
        &self,
        profile: &CredentialProfile,
        _input: Option<InteractiveInput>,
    ) -> Result<ResolvedCredentials, CredentialError> {
        let mut credentials = self.credentials.clone();
        credentials.apply_region_override(profile.region_override.as_deref());

        Ok(credentials)
    }
}

/// Extracts credentials from `KEY=VALUE` lines such as the output of `env`.
///
/// Lines without `=` and unknown keys are skipped. A later assignment of the same key wins.
/// Fails only when the output cannot be read as text.
pub fn parse_credential_output(output: &[u8]) -> std::io::Result<ResolvedCredentials> {
    let mut credentials = ResolvedCredentials::default();

    for line in output.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match key {
            ACCESS_KEY_ID_VARIABLE => credentials.access_key_id = value.to_string(),
            SECRET_ACCESS_KEY_VARIABLE => credentials.secret_access_key = value.to_string(),
            SESSION_TOKEN_VARIABLE => credentials.session_token = value.to_string(),
            REGION_VARIABLE => credentials.region = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(credentials)
}
