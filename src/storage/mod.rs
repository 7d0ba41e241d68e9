use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;

use crate::config::ClientConfig;
use crate::types::ResolvedCredentials;

pub mod s3;

pub type Storage = Box<dyn ObjectStorage + Send + Sync>;

#[async_trait]
pub trait ObjectStorage {
    /// Starts a download. The returned body has not been read yet.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        acl: Option<ObjectCannedAcl>,
    ) -> Result<()>;
}

/// Builds the storage for one leg of a copy, scoped to that leg's credentials.
#[async_trait]
pub trait StorageFactory: Send + Sync {
    async fn create(
        &self,
        client_config: &ClientConfig,
        credentials: &ResolvedCredentials,
    ) -> Storage;
}
