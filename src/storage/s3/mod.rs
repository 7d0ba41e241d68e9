use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::trace;

use crate::config::ClientConfig;
use crate::storage::{ObjectStorage, Storage, StorageFactory};
use crate::types::ResolvedCredentials;

mod client_builder;

#[derive(Debug, Clone, Default)]
pub struct S3StorageFactory {}

#[async_trait]
impl StorageFactory for S3StorageFactory {
    async fn create(
        &self,
        client_config: &ClientConfig,
        credentials: &ResolvedCredentials,
    ) -> Storage {
        S3Storage::boxed_new(client_config.create_client(credentials).await)
    }
}

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    fn boxed_new(client: Client) -> Storage {
        Box::new(S3Storage { client })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream> {
        let result = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context("aws_sdk_s3::client::get_object() failed.")?;

        trace!(
            bucket = bucket,
            key = key,
            content_length = result.content_length(),
            "get_object() succeeded."
        );

        Ok(result.body)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        acl: Option<ObjectCannedAcl>,
    ) -> Result<()> {
        let content_length = body.len() as i64;

        let result = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(content_length)
            .set_acl(acl)
            .body(ByteStream::from(body))
            .send()
            .await
            .context("aws_sdk_s3::client::put_object() failed.")?;

        trace!(
            bucket = bucket,
            key = key,
            e_tag = result.e_tag(),
            "put_object() succeeded."
        );

        Ok(())
    }
}
