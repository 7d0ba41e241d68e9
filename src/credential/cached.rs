use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

use crate::credential::{CredentialProvider, InteractiveInput};
use crate::types::error::CredentialError;
use crate::types::{CredentialProfile, ResolvedCredentials};

struct CacheEntry {
    expires_at: Instant,
    credentials: ResolvedCredentials,
}

/// Memoizes another provider per profile until the profile's assume-role TTL runs out.
///
/// [`ObjectCopier`](crate::copier::ObjectCopier) never wraps its provider in this cache on its
/// own. Two copies that run back to back with the same profile can share it when the caller
/// opts in.
pub struct CachedCredentialProvider<P> {
    inner: P,
    cache: Mutex<HashMap<CredentialProfile, CacheEntry>>,
}

impl<P: CredentialProvider> CachedCredentialProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    async fn lookup(&self, profile: &CredentialProfile) -> Option<ResolvedCredentials> {
        let mut cache = self.cache.lock().await;

        let now = Instant::now();
        cache.retain(|_, entry| now < entry.expires_at);

        cache.get(profile).map(|entry| entry.credentials.clone())
    }
}

#[async_trait]
impl<P: CredentialProvider> CredentialProvider for CachedCredentialProvider<P> {
    async fn resolve(
        &self,
        profile: &CredentialProfile,
        input: Option<InteractiveInput>,
    ) -> Result<ResolvedCredentials, CredentialError> {
        if let Some(credentials) = self.lookup(profile).await {
            trace!(
                profile = profile.profile_name.as_str(),
                "cached credentials used."
            );
            return Ok(credentials);
        }

        // Not locked while resolving. Concurrent misses may each run the helper once.
        let credentials = self.inner.resolve(profile, input).await?;
        self.cache.lock().await.insert(
            profile.clone(),
            CacheEntry {
                expires_at: Instant::now() + profile.assume_role_ttl,
                credentials: credentials.clone(),
            },
        );

        Ok(credentials)
    }
}
