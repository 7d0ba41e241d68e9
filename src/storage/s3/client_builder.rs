use aws_config::meta::region::{ProvideRegion, RegionProviderChain};
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::Client;
use aws_smithy_runtime_api::client::stalled_stream_protection::StalledStreamProtectionConfig;
use aws_types::region::Region;
use aws_types::SdkConfig;

use crate::config::ClientConfig;
use crate::types::ResolvedCredentials;

impl ClientConfig {
    /// Builds an S3 client that signs every request with `credentials` and talks to the
    /// credentials' region.
    pub async fn create_client(&self, credentials: &ResolvedCredentials) -> Client {
        let config_builder =
            Builder::from(&self.load_sdk_config(credentials).await).force_path_style(self.force_path_style);

        Client::from_conf(config_builder.build())
    }

    async fn load_sdk_config(&self, credentials: &ResolvedCredentials) -> SdkConfig {
        let mut config_loader = aws_config::defaults(BehaviorVersion::latest())
            .stalled_stream_protection(StalledStreamProtectionConfig::enabled().build())
            .credentials_provider(build_credentials(credentials))
            .region(build_region_provider(credentials))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint_url) = &self.endpoint_url {
            config_loader = config_loader.endpoint_url(endpoint_url);
        };

        config_loader.load().await
    }
}

fn build_credentials(credentials: &ResolvedCredentials) -> aws_sdk_s3::config::Credentials {
    let session_token = if credentials.session_token.is_empty() {
        None
    } else {
        Some(credentials.session_token.clone())
    };

    aws_sdk_s3::config::Credentials::new(
        credentials.access_key_id.to_string(),
        credentials.secret_access_key.to_string(),
        session_token,
        None,
        "s3xcopy",
    )
}

fn build_region_provider(credentials: &ResolvedCredentials) -> Box<dyn ProvideRegion> {
    let region = credentials
        .region
        .clone()
        .filter(|region| !region.is_empty())
        .map(Region::new);

    Box::new(RegionProviderChain::first_try(region).or_default_provider())
}
