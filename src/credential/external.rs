use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::credential::{parse_credential_output, CredentialProvider, InteractiveInput};
use crate::types::error::CredentialError;
use crate::types::{CredentialProfile, ResolvedCredentials};

pub const DEFAULT_CREDENTIAL_HELPER: &str = "aws-vault";

/// Resolves credentials by running `<program> exec --assume-role-ttl <ttl> <profile> env`
/// and reading the environment it prints.
///
/// The helper's stderr is left attached to ours so MFA prompts reach the operator. Its stdin is
/// either ours or the reader handed to [`CredentialProvider::resolve`].
#[derive(Debug, Clone)]
pub struct ExternalCredentialProvider {
    program: String,
}

impl Default for ExternalCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_HELPER)
    }
}

impl ExternalCredentialProvider {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn build_command(&self, profile: &CredentialProfile) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(build_helper_args(profile))
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        command
    }
}

fn build_helper_args(profile: &CredentialProfile) -> Vec<String> {
    vec![
        "exec".to_string(),
        "--assume-role-ttl".to_string(),
        format_assume_role_ttl(profile.assume_role_ttl),
        profile.profile_name.clone(),
        "env".to_string(),
    ]
}

#[async_trait]
impl CredentialProvider for ExternalCredentialProvider {
    async fn resolve(
        &self,
        profile: &CredentialProfile,
        input: Option<InteractiveInput>,
    ) -> Result<ResolvedCredentials, CredentialError> {
        let mut command = self.build_command(profile);
        if input.is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::inherit());
        }

        debug!(
            program = self.program.as_str(),
            profile = profile.profile_name.as_str(),
            "running credential helper."
        );

        let mut child = command.spawn().map_err(|source| CredentialError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let child_stdin = child.stdin.take();
        let feed_input = async move {
            if let (Some(mut input), Some(mut child_stdin)) = (input, child_stdin) {
                // The helper may exit without reading everything.
                if let Err(e) = tokio::io::copy(&mut input, &mut child_stdin).await {
                    debug!("credential helper input was not fully consumed: {e}");
                }
            }
        };

        let (_, output) = tokio::join!(feed_input, child.wait_with_output());
        let output = output.map_err(|source| CredentialError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            echo_helper_output(&mut std::io::stdout(), &output.stdout);
            return Err(CredentialError::HelperFailed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        let mut credentials =
            parse_credential_output(&output.stdout).map_err(CredentialError::Scan)?;
        credentials.apply_region_override(profile.region_override.as_deref());

        trace!(
            profile = profile.profile_name.as_str(),
            region = credentials.region.as_deref().unwrap_or_default(),
            "credentials resolved."
        );

        Ok(credentials)
    }
}

// A failing helper usually explains itself on stdout, which was captured for parsing.
fn echo_helper_output<W: Write>(out: &mut W, helper_stdout: &[u8]) {
    if let Err(e) = out.write_all(helper_stdout).and_then(|_| out.flush()) {
        debug!("failed to echo credential helper output: {e}");
    }
}

// aws-vault parses durations with Go's `time.ParseDuration`, so render them the way Go prints them.
pub fn format_assume_role_ttl(ttl: Duration) -> String {
    let total_secs = ttl.as_secs();
    let nanos = ttl.subsec_nanos();

    if total_secs == 0 {
        return match nanos {
            0 => "0s".to_string(),
            n if n % 1_000_000 == 0 => format!("{}ms", n / 1_000_000),
            n if n % 1_000 == 0 => format!("{}µs", n / 1_000),
            n => format!("{n}ns"),
        };
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let mut seconds = (total_secs % 60).to_string();
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        seconds = format!("{seconds}.{}", fraction.trim_end_matches('0'));
    }

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
