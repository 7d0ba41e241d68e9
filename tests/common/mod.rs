#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

use s3xcopy::config::ClientConfig;
use s3xcopy::credential::{CredentialProvider, InteractiveInput};
use s3xcopy::storage::{ObjectStorage, Storage, StorageFactory};
use s3xcopy::types::error::CredentialError;
use s3xcopy::types::{CredentialProfile, ResolvedCredentials};

pub const STAGE_PROFILE: &str = "stage";
pub const PROD_PROFILE: &str = "prod";
pub const BUCKET1: &str = "bucket-a";
pub const BUCKET2: &str = "bucket-b";
pub const TEST_KEY: &str = "foo.csv";
pub const TEST_CONTENT: &[u8] = b"id,name\n1,foo\n2,bar\n";

/// Everything the fakes saw, in order.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn init_dummy_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("dummy=trace"))
                .unwrap(),
        )
        .try_init();
}

pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(event_log: &EventLog) -> Vec<String> {
    event_log.lock().unwrap().clone()
}

/// Vends `ASIA<profile>` credentials in the region configured for the profile.
pub struct FakeCredentialProvider {
    regions: HashMap<String, String>,
    failing_profiles: HashSet<String>,
    event_log: EventLog,
}

impl FakeCredentialProvider {
    pub fn new(event_log: EventLog) -> Self {
        Self {
            regions: HashMap::new(),
            failing_profiles: HashSet::new(),
            event_log,
        }
    }

    pub fn with_region(mut self, profile_name: &str, region: &str) -> Self {
        self.regions
            .insert(profile_name.to_string(), region.to_string());
        self
    }

    pub fn with_failing_profile(mut self, profile_name: &str) -> Self {
        self.failing_profiles.insert(profile_name.to_string());
        self
    }
}

#[async_trait]
impl CredentialProvider for FakeCredentialProvider {
    async fn resolve(
        &self,
        profile: &CredentialProfile,
        _input: Option<InteractiveInput>,
    ) -> Result<ResolvedCredentials, CredentialError> {
        self.event_log
            .lock()
            .unwrap()
            .push(format!("resolve {}", profile.profile_name));

        if self.failing_profiles.contains(&profile.profile_name) {
            return Err(CredentialError::MissingVariable("AWS_ACCESS_KEY_ID"));
        }

        let mut credentials = ResolvedCredentials::default();
        credentials.access_key_id = format!("ASIA{}", profile.profile_name);
        credentials.secret_access_key = format!("secret-{}", profile.profile_name);
        credentials.session_token = format!("token-{}", profile.profile_name);
        credentials.region = self.regions.get(&profile.profile_name).cloned();
        credentials.apply_region_override(profile.region_override.as_deref());

        Ok(credentials)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub body: Bytes,
    pub acl: Option<ObjectCannedAcl>,
    pub access_key_id: String,
}

/// In-memory buckets shared by every storage the factory creates.
#[derive(Clone)]
pub struct MemoryStorageFactory {
    objects: Arc<Mutex<HashMap<(String, String), StoredObject>>>,
    get_delay: Option<Duration>,
    put_delay: Option<Duration>,
    unreadable_body: bool,
    event_log: EventLog,
}

impl MemoryStorageFactory {
    pub fn new(event_log: EventLog) -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            get_delay: None,
            put_delay: None,
            unreadable_body: false,
            event_log,
        }
    }

    pub fn with_get_delay(mut self, get_delay: Duration) -> Self {
        self.get_delay = Some(get_delay);
        self
    }

    pub fn with_put_delay(mut self, put_delay: Duration) -> Self {
        self.put_delay = Some(put_delay);
        self
    }

    /// The download starts, but reading its body fails.
    pub fn with_unreadable_body(mut self) -> Self {
        self.unreadable_body = true;
        self
    }

    pub fn put_test_object(&self, bucket: &str, key: &str, body: &[u8]) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: Bytes::copy_from_slice(body),
                acl: None,
                access_key_id: "ASIAseed".to_string(),
            },
        );
    }

    pub fn get_test_object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl StorageFactory for MemoryStorageFactory {
    async fn create(
        &self,
        client_config: &ClientConfig,
        credentials: &ResolvedCredentials,
    ) -> Storage {
        self.event_log.lock().unwrap().push(format!(
            "client {} {} {}",
            credentials.access_key_id,
            credentials.region.as_deref().unwrap_or("-"),
            client_config.endpoint_url.as_deref().unwrap_or("-"),
        ));

        Box::new(MemoryStorage {
            factory: self.clone(),
            access_key_id: credentials.access_key_id.clone(),
        })
    }
}

struct MemoryStorage {
    factory: MemoryStorageFactory,
    access_key_id: String,
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream> {
        self.factory
            .event_log
            .lock()
            .unwrap()
            .push(format!("get s3://{bucket}/{key} as {}", self.access_key_id));

        if let Some(get_delay) = self.factory.get_delay {
            tokio::time::sleep(get_delay).await;
        }

        let object = self
            .factory
            .get_test_object(bucket, key)
            .ok_or_else(|| anyhow!("NoSuchKey: {key}"))?;

        if self.factory.unreadable_body {
            return unreadable_byte_stream(&object.body).await;
        }

        Ok(ByteStream::from(object.body))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        acl: Option<ObjectCannedAcl>,
    ) -> Result<()> {
        self.factory
            .event_log
            .lock()
            .unwrap()
            .push(format!("put s3://{bucket}/{key} as {}", self.access_key_id));

        if let Some(put_delay) = self.factory.put_delay {
            tokio::time::sleep(put_delay).await;
        }

        self.factory.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                acl,
                access_key_id: self.access_key_id.clone(),
            },
        );

        Ok(())
    }
}

// A file-backed stream is opened on first read, so removing the file breaks the body.
async fn unreadable_byte_stream(body: &[u8]) -> Result<ByteStream> {
    let dir = TempDir::new()?;
    let path = dir.path().join("body");
    std::fs::write(&path, body)?;

    let stream = ByteStream::from_path(&path).await?;
    std::fs::remove_file(&path)?;

    Ok(stream)
}
