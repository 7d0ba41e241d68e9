use std::fmt;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

use aws_sdk_s3::types::ObjectCannedAcl;
use zeroize_derive::{Zeroize, ZeroizeOnDrop};

use crate::types::error::CopyError;

pub mod error;

pub const DEFAULT_ASSUME_ROLE_TTL: Duration = Duration::from_secs(15 * 60);

const NO_FROM_BUCKET: &str = "Please provide a from bucket";
const NO_FROM_KEY: &str = "Please provide a from argument";

/// A single object to copy, and where to put it.
///
/// The destination key and bucket fall back to the source key and bucket when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyRequest {
    from_key: String,
    from_bucket: String,
    to_key: Option<String>,
    to_bucket: Option<String>,
    from_region: Option<String>,
    to_region: Option<String>,
    acl: Option<ObjectCannedAcl>,
}

impl CopyRequest {
    pub fn new(from_bucket: &str, from_key: &str) -> Result<Self, CopyError> {
        if from_bucket.is_empty() {
            return Err(CopyError::InvalidRequest(NO_FROM_BUCKET.to_string()));
        }
        if from_key.is_empty() {
            return Err(CopyError::InvalidRequest(NO_FROM_KEY.to_string()));
        }

        Ok(Self {
            from_key: from_key.to_string(),
            from_bucket: from_bucket.to_string(),
            to_key: None,
            to_bucket: None,
            from_region: None,
            to_region: None,
            acl: None,
        })
    }

    pub fn with_to_key(mut self, to_key: &str) -> Self {
        self.to_key = non_empty(to_key);
        self
    }

    pub fn with_to_bucket(mut self, to_bucket: &str) -> Self {
        self.to_bucket = non_empty(to_bucket);
        self
    }

    pub fn with_from_region(mut self, from_region: Option<String>) -> Self {
        self.from_region = from_region.filter(|region| !region.is_empty());
        self
    }

    pub fn with_to_region(mut self, to_region: Option<String>) -> Self {
        self.to_region = to_region.filter(|region| !region.is_empty());
        self
    }

    pub fn with_acl(mut self, acl: Option<ObjectCannedAcl>) -> Self {
        self.acl = acl;
        self
    }

    pub fn from_key(&self) -> &str {
        &self.from_key
    }

    pub fn from_bucket(&self) -> &str {
        &self.from_bucket
    }

    pub fn from_region(&self) -> Option<&str> {
        self.from_region.as_deref()
    }

    pub fn to_region(&self) -> Option<&str> {
        self.to_region.as_deref()
    }

    pub fn acl(&self) -> Option<&ObjectCannedAcl> {
        self.acl.as_ref()
    }

    pub fn effective_to_key(&self) -> &str {
        self.to_key.as_deref().unwrap_or(&self.from_key)
    }

    pub fn effective_to_bucket(&self) -> &str {
        self.to_bucket.as_deref().unwrap_or(&self.from_bucket)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn s3_url(bucket: &str, key: &str) -> String {
    format!("s3://{bucket}/{key}")
}

/// A named identity that the credential helper turns into temporary credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialProfile {
    pub profile_name: String,
    pub region_override: Option<String>,
    pub assume_role_ttl: Duration,
}

impl CredentialProfile {
    pub fn new(profile_name: &str) -> Self {
        Self {
            profile_name: profile_name.to_string(),
            region_override: None,
            assume_role_ttl: DEFAULT_ASSUME_ROLE_TTL,
        }
    }

    pub fn with_region_override(mut self, region_override: Option<String>) -> Self {
        self.region_override = region_override.filter(|region| !region.is_empty());
        self
    }

    pub fn with_assume_role_ttl(mut self, assume_role_ttl: Duration) -> Self {
        self.assume_role_ttl = assume_role_ttl;
        self
    }

    // A region given for a single copy wins over the one configured on the profile.
    pub fn for_region(&self, region: Option<&str>) -> Self {
        match region {
            Some(region) => self.clone().with_region_override(Some(region.to_string())),
            None => self.clone(),
        }
    }
}

#[derive(Clone, Default, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct ResolvedCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub region: Option<String>,
}

impl ResolvedCredentials {
    pub fn apply_region_override(&mut self, region_override: Option<&str>) {
        if let Some(region) = region_override {
            self.region = Some(region.to_string());
        }
    }
}

impl Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys = f.debug_struct("ResolvedCredentials");
        let session_token = if self.session_token.is_empty() {
            "None"
        } else {
            "** redacted **"
        };
        keys.field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &session_token)
            .field("region", &self.region);
        keys.finish()
    }
}
