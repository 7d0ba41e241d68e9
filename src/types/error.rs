use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("failed to run credential helper `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{status}")]
    HelperFailed { program: String, status: ExitStatus },
    #[error("failed to scan credential helper output: {0}")]
    Scan(#[source] std::io::Error),
    #[error("{0} is not set")]
    MissingVariable(&'static str),
}

// Transfer errors carry the storage layer's `anyhow` chain and print it in full.
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Error getting credentials: {0}")]
    GettingCredentials(#[source] CredentialError),
    #[error("Error getting object: {0:#}")]
    GettingObject(anyhow::Error),
    #[error("Error downloading object: {0:#}")]
    DownloadingObject(anyhow::Error),
    #[error("Error getting credentials for put request: {0}")]
    GettingCredentialsForPut(#[source] CredentialError),
    #[error("Error putting object: {0:#}")]
    PuttingObject(anyhow::Error),
}
