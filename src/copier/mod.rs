use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use indicatif::HumanBytes;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

use crate::config::{ClientConfig, Config, CredentialSource};
use crate::credential::environment::EnvironmentCredentialProvider;
use crate::credential::external::ExternalCredentialProvider;
use crate::credential::CredentialProvider;
use crate::storage::s3::S3StorageFactory;
use crate::storage::StorageFactory;
use crate::types::error::CopyError;
use crate::types::{s3_url, CopyRequest, CredentialProfile};

pub const DEFAULT_COPY_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Copies objects from a source profile to a destination profile.
///
/// Each leg resolves its own credentials on every [`copy`](ObjectCopier::copy), even when both
/// profiles are the same. Nothing is shared between two copies.
#[derive(Clone)]
pub struct ObjectCopier {
    from_profile: CredentialProfile,
    to_profile: CredentialProfile,
    from_client_config: ClientConfig,
    to_client_config: ClientConfig,
    timeout: Duration,
    credential_provider: Arc<dyn CredentialProvider>,
    storage_factory: Arc<dyn StorageFactory>,
}

impl ObjectCopier {
    pub fn new(from_profile: CredentialProfile, to_profile: CredentialProfile) -> Self {
        Self {
            from_profile,
            to_profile,
            from_client_config: ClientConfig::default(),
            to_client_config: ClientConfig::default(),
            timeout: DEFAULT_COPY_TIMEOUT,
            credential_provider: Arc::new(ExternalCredentialProvider::default()),
            storage_factory: Arc::new(S3StorageFactory::default()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let credential_provider: Arc<dyn CredentialProvider> = match &config.credential_source {
            CredentialSource::Helper { program } => {
                Arc::new(ExternalCredentialProvider::new(program))
            }
            CredentialSource::Environment => {
                Arc::new(EnvironmentCredentialProvider::from_process_env())
            }
        };

        Self::new(config.from_profile.clone(), config.to_profile.clone())
            .with_client_configs(
                config.from_client_config.clone(),
                config.to_client_config.clone(),
            )
            .with_timeout(config.timeout)
            .with_credential_provider(credential_provider)
    }

    /// Bounds the download and the upload together.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_client_configs(
        mut self,
        from_client_config: ClientConfig,
        to_client_config: ClientConfig,
    ) -> Self {
        self.from_client_config = from_client_config;
        self.to_client_config = to_client_config;
        self
    }

    pub fn with_credential_provider(
        mut self,
        credential_provider: Arc<dyn CredentialProvider>,
    ) -> Self {
        self.credential_provider = credential_provider;
        self
    }

    pub fn with_storage_factory(mut self, storage_factory: Arc<dyn StorageFactory>) -> Self {
        self.storage_factory = storage_factory;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Downloads `request`'s object under the source profile and uploads it under the
    /// destination profile.
    ///
    /// Stops at the first failing stage. Later stages do not run.
    pub async fn copy(&self, request: &CopyRequest) -> Result<(), CopyError> {
        let from_profile = self.from_profile.for_region(request.from_region());
        let from_credentials = self
            .credential_provider
            .resolve(&from_profile, None)
            .await
            .map_err(CopyError::GettingCredentials)?;

        debug!(
            profile = from_profile.profile_name.as_str(),
            region = from_credentials.region.as_deref(),
            "source credentials resolved."
        );

        let deadline = Instant::now() + self.timeout;

        let source = self
            .storage_factory
            .create(&self.from_client_config, &from_credentials)
            .await;
        let body = run_until(deadline, source.get_object(request.from_bucket(), request.from_key()))
            .await
            .map_err(CopyError::GettingObject)?;

        info!(
            "downloading {}",
            s3_url(request.from_bucket(), request.from_key())
        );

        let data = run_until(deadline, async {
            body.collect()
                .await
                .context("failed to read object body.")
        })
        .await
        .map_err(CopyError::DownloadingObject)?
        .into_bytes();

        debug!(size = %HumanBytes(data.len() as u64), "object downloaded.");

        let to_profile = self.to_profile.for_region(request.to_region());
        let to_credentials = self
            .credential_provider
            .resolve(&to_profile, None)
            .await
            .map_err(CopyError::GettingCredentialsForPut)?;

        debug!(
            profile = to_profile.profile_name.as_str(),
            region = to_credentials.region.as_deref(),
            "destination credentials resolved."
        );

        let to_bucket = request.effective_to_bucket();
        let to_key = request.effective_to_key();
        info!("uploading {}", s3_url(to_bucket, to_key));

        let upload_start = Instant::now();
        let target = self
            .storage_factory
            .create(&self.to_client_config, &to_credentials)
            .await;
        run_until(
            deadline,
            target.put_object(to_bucket, to_key, data, request.acl().cloned()),
        )
        .await
        .map_err(CopyError::PuttingObject)?;

        info!("upload completed in {:?}", upload_start.elapsed());

        Ok(())
    }
}

async fn run_until<T, F>(deadline: Instant, future: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    timeout_at(deadline, future).await?
}
