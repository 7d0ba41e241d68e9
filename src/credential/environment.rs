use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::credential::{
    ACCESS_KEY_ID_VARIABLE, CredentialProvider, InteractiveInput, REGION_VARIABLE,
    SECRET_ACCESS_KEY_VARIABLE, SESSION_TOKEN_VARIABLE,
};
use crate::types::error::CredentialError;
use crate::types::{CredentialProfile, ResolvedCredentials};

/// Reads credentials from `AWS_*` variables.
///
/// The variables describe a single identity, so the profile name is not used. Region overrides
/// still apply.
#[derive(Clone)]
pub struct EnvironmentCredentialProvider {
    variables: HashMap<String, String>,
}

impl EnvironmentCredentialProvider {
    pub fn from_process_env() -> Self {
        Self::from_variables(std::env::vars())
    }

    pub fn from_variables<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            variables: variables
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    fn required(&self, name: &'static str) -> Result<String, CredentialError> {
        self.variables
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or(CredentialError::MissingVariable(name))
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentCredentialProvider {
    async fn resolve(
        &self,
        profile: &CredentialProfile,
        _input: Option<InteractiveInput>,
    ) -> Result<ResolvedCredentials, CredentialError> {
        debug!(
            profile = profile.profile_name.as_str(),
            "reading credentials from environment."
        );

        let mut credentials = ResolvedCredentials::default();
        credentials.access_key_id = self.required(ACCESS_KEY_ID_VARIABLE)?;
        credentials.secret_access_key = self.required(SECRET_ACCESS_KEY_VARIABLE)?;
        credentials.session_token = self
            .variables
            .get(SESSION_TOKEN_VARIABLE)
            .cloned()
            .unwrap_or_default();
        credentials.region = self
            .variables
            .get(REGION_VARIABLE)
            .filter(|region| !region.is_empty())
            .cloned();
        credentials.apply_region_override(profile.region_override.as_deref());

        Ok(credentials)
    }
}
