/*!
# Overview
s3xcopy copies a single S3 object from one AWS profile to another.

The object is downloaded with one set of temporary credentials and uploaded again with a second,
independently resolved set. Both sets are vended by an external credential helper
(`aws-vault exec --assume-role-ttl <ttl> <profile> env` by default), which may prompt for an MFA
code on the terminal.

## Limitations
- The whole object is buffered in memory before it is uploaded.
- There is no retry. Any failure aborts the copy.
- A single deadline (`--timeout`, 10 minutes by default) bounds both the download and the upload.

## As a library

```no_run
use std::time::Duration;

use s3xcopy::copier::ObjectCopier;
use s3xcopy::types::{CopyRequest, CredentialProfile};

#[tokio::main]
async fn main() {
    let copier = ObjectCopier::new(
        CredentialProfile::new("stage"),
        CredentialProfile::new("prod"),
    )
    .with_timeout(Duration::from_secs(60));

    let request = CopyRequest::new("bucket-a", "foo.csv")
        .unwrap()
        .with_to_bucket("bucket-b");

    if let Err(e) = copier.copy(&request).await {
        eprintln!("{e}");
    }
}
```

The credential source and the object storage are both behind traits
([`credential::CredentialProvider`] and [`storage::StorageFactory`]), so the copy flow can be
driven by other credential sources or by in-memory storage.
*/

pub use config::args::CLIArgs;
pub use config::Config;

pub mod config;
pub mod copier;
pub mod credential;
pub mod storage;
pub mod types;
