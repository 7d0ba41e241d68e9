use crate::config::args::value_parser::{canned_acl, url};
use crate::config::{ClientConfig, CredentialSource, TracingConfig};
use crate::credential::external::DEFAULT_CREDENTIAL_HELPER;
use crate::types::{CopyRequest, CredentialProfile};
use crate::Config;
use aws_sdk_s3::types::ObjectCannedAcl;
use clap::builder::{ArgPredicate, NonEmptyStringValueParser};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
#[cfg(feature = "version")]
use shadow_rs::shadow;
use std::ffi::OsString;
use std::str::FromStr;
use std::time::Duration;

mod tests;
mod value_parser;

const DEFAULT_TIMEOUT: &str = "10m";
const DEFAULT_ASSUME_ROLE_TTL: &str = "15m";
const DEFAULT_JSON_TRACING: bool = false;
const DEFAULT_AWS_SDK_TRACING: bool = false;
const DEFAULT_DISABLE_COLOR_TRACING: bool = false;
const DEFAULT_FORCE_PATH_STYLE: bool = false;

const PROFILE_CONFLICT: &str = "Cannot set --profile and (--to-profile or --from-profile)";
const NO_FROM_BUCKET: &str = "Please provide a from bucket";
const NO_FROM_KEY: &str = "Please provide a from argument";

#[cfg(feature = "version")]
shadow!(build);

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSourceArg {
    /// run the credential helper (aws-vault) for each profile
    Helper,
    /// read AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY/AWS_SESSION_TOKEN/AWS_REGION from the environment
    Environment,
}

#[derive(Parser, Clone, Debug)]
#[cfg_attr(feature = "version", command(version=format!("{} ({} {}), {}", build::PKG_VERSION, build::SHORT_COMMIT, build::BUILD_TARGET, build::RUST_VERSION)))]
#[command(about = "Copy an S3 object from one profile to another")]
pub struct CLIArgs {
    /// S3 key of the object to get
    #[arg(long, env = "S3XCOPY_FROM", default_value_if("auto_complete_shell", ArgPredicate::IsPresent, "ignored"), help_heading = "Source")]
    from: Option<String>,

    /// S3 bucket to get the object from
    #[arg(long, env, default_value_if("auto_complete_shell", ArgPredicate::IsPresent, "ignored"), help_heading = "Source")]
    from_bucket: Option<String>,

    /// profile to use for the get request
    #[arg(long, env, help_heading = "Source")]
    from_profile: Option<String>,

    /// region to use for the get request (defaults to the region of the profile)
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), help_heading = "Source")]
    from_region: Option<String>,

    /// endpoint url for the get request
    #[arg(long, env, value_parser = url::check_scheme, help_heading = "Source")]
    from_endpoint_url: Option<String>,

    /// force path-style addressing for the get request
    #[arg(long, env, default_value_t = DEFAULT_FORCE_PATH_STYLE, help_heading = "Source")]
    from_force_path_style: bool,

    /// S3 key to put the object to (defaults to --from)
    #[arg(long, env = "S3XCOPY_TO", help_heading = "Destination")]
    to: Option<String>,

    /// S3 bucket to put the object to (defaults to --from-bucket)
    #[arg(long, env, help_heading = "Destination")]
    to_bucket: Option<String>,

    /// profile to use for the put request
    #[arg(long, env, help_heading = "Destination")]
    to_profile: Option<String>,

    /// region to use for the put request (defaults to the region of the profile)
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), help_heading = "Destination")]
    to_region: Option<String>,

    /// endpoint url for the put request
    #[arg(long, env, value_parser = url::check_scheme, help_heading = "Destination")]
    to_endpoint_url: Option<String>,

    /// force path-style addressing for the put request
    #[arg(long, env, default_value_t = DEFAULT_FORCE_PATH_STYLE, help_heading = "Destination")]
    to_force_path_style: bool,

    /// canned ACL to use for putting the object.
    /// valid choices: private | public-read | public-read-write | authenticated-read | aws-exec-read | bucket-owner-read | bucket-owner-full-control
    #[arg(long, env = "S3XCOPY_ACL", value_parser = canned_acl::parse_canned_acl, help_heading = "Destination")]
    acl: Option<String>,

    /// profile to use for both get and put. Cannot be used with --from-profile or --to-profile
    #[arg(long, env = "S3XCOPY_PROFILE", help_heading = "Credentials")]
    profile: Option<String>,

    /// where temporary credentials come from
    #[arg(long, env, value_enum, default_value_t = CredentialSourceArg::Helper, help_heading = "Credentials")]
    credential_source: CredentialSourceArg,

    /// credential helper executable, invoked as `<helper> exec --assume-role-ttl <ttl> <profile> env`
    #[arg(long, env, default_value = DEFAULT_CREDENTIAL_HELPER, value_parser = NonEmptyStringValueParser::new(), help_heading = "Credentials")]
    credential_helper: String,

    /// lifetime requested for the assumed role (e.g. 15m, 1h)
    #[arg(long, env, default_value = DEFAULT_ASSUME_ROLE_TTL, value_parser = humantime::parse_duration, help_heading = "Credentials")]
    assume_role_ttl: Duration,

    /// amount of time to allow for the download and upload (e.g. 10m, 90s)
    #[arg(long, env = "S3XCOPY_TIMEOUT", default_value = DEFAULT_TIMEOUT, value_parser = humantime::parse_duration, help_heading = "General")]
    timeout: Duration,

    /// trace verbosity(-q: warn, -qq: error, -v: debug, -vv: trace)
    #[clap(flatten)]
    verbosity: Verbosity<InfoLevel>,

    /// show trace as json format
    #[arg(long, env, default_value_t = DEFAULT_JSON_TRACING, help_heading = "Tracing/Logging")]
    json_tracing: bool,

    /// enable aws sdk tracing
    #[arg(long, env, default_value_t = DEFAULT_AWS_SDK_TRACING, help_heading = "Tracing/Logging")]
    aws_sdk_tracing: bool,

    /// disable ANSI terminal colors
    #[arg(long, env, default_value_t = DEFAULT_DISABLE_COLOR_TRACING, help_heading = "Tracing/Logging")]
    disable_color_tracing: bool,

    /// generate a auto completions script. Valid values: bash, fish, zsh, powershell, elvish.
    #[arg(long, env, value_name = "SHELL", value_parser = <clap_complete::shells::Shell as FromStr>::from_str, help_heading = "Advanced")]
    auto_complete_shell: Option<clap_complete::shells::Shell>,
}

pub fn parse_from_args<I, T>(args: I) -> Result<CLIArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CLIArgs::try_parse_from(args)
}

pub fn build_config_from_args<I, T>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config_args = CLIArgs::try_parse_from(args).map_err(|e| e.to_string())?;
    crate::Config::try_from(config_args)
}

impl CLIArgs {
    fn validate_copy_config(&self) -> Result<(), String> {
        self.check_profile_conflict()?;
        self.check_from_bucket()?;
        self.check_from_key()?;

        Ok(())
    }

    fn check_profile_conflict(&self) -> Result<(), String> {
        if is_set(&self.profile) && (is_set(&self.from_profile) || is_set(&self.to_profile)) {
            return Err(PROFILE_CONFLICT.to_string());
        }

        Ok(())
    }

    fn check_from_bucket(&self) -> Result<(), String> {
        if !is_set(&self.from_bucket) {
            return Err(NO_FROM_BUCKET.to_string());
        }

        Ok(())
    }

    fn check_from_key(&self) -> Result<(), String> {
        if !is_set(&self.from) {
            return Err(NO_FROM_KEY.to_string());
        }

        Ok(())
    }

    fn build_profiles(&self) -> (CredentialProfile, CredentialProfile) {
        let shared_profile = self.profile.as_deref().filter(|profile| !profile.is_empty());
        let (from_profile, to_profile) = if let Some(profile) = shared_profile {
            (profile, profile)
        } else {
            (
                self.from_profile.as_deref().unwrap_or_default(),
                self.to_profile.as_deref().unwrap_or_default(),
            )
        };

        (
            CredentialProfile::new(from_profile).with_assume_role_ttl(self.assume_role_ttl),
            CredentialProfile::new(to_profile).with_assume_role_ttl(self.assume_role_ttl),
        )
    }

    fn build_client_configs(&self) -> (ClientConfig, ClientConfig) {
        let from_client_config = ClientConfig {
            endpoint_url: self.from_endpoint_url.clone(),
            force_path_style: self.from_force_path_style,
        };

        let to_client_config = ClientConfig {
            endpoint_url: self.to_endpoint_url.clone(),
            force_path_style: self.to_force_path_style,
        };

        (from_client_config, to_client_config)
    }

    fn build_copy_request(&self) -> Result<CopyRequest, String> {
        let request = CopyRequest::new(
            self.from_bucket.as_deref().unwrap_or_default(),
            self.from.as_deref().unwrap_or_default(),
        )
        .map_err(|e| e.to_string())?
        .with_to_key(self.to.as_deref().unwrap_or_default())
        .with_to_bucket(self.to_bucket.as_deref().unwrap_or_default())
        .with_from_region(self.from_region.clone())
        .with_to_region(self.to_region.clone())
        .with_acl(self.acl.as_deref().map(ObjectCannedAcl::from));

        Ok(request)
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|value| !value.is_empty())
}

impl TryFrom<CLIArgs> for Config {
    type Error = String;

    fn try_from(value: CLIArgs) -> Result<Self, Self::Error> {
        value.validate_copy_config()?;

        let tracing_config = value.verbosity.log_level().map(|log_level| TracingConfig {
            tracing_level: log_level,
            json_tracing: value.json_tracing,
            aws_sdk_tracing: value.aws_sdk_tracing,
            disable_color_tracing: value.disable_color_tracing,
        });

        let credential_source = match value.credential_source {
            CredentialSourceArg::Helper => CredentialSource::Helper {
                program: value.credential_helper.clone(),
            },
            CredentialSourceArg::Environment => CredentialSource::Environment,
        };

        let request = value.build_copy_request()?;
        let (from_profile, to_profile) = value.build_profiles();
        let (from_client_config, to_client_config) = value.build_client_configs();

        Ok(Config {
            request,
            from_profile,
            to_profile,
            from_client_config,
            to_client_config,
            timeout: value.timeout,
            credential_source,
            tracing_config,
            auto_complete_shell: value.auto_complete_shell,
        })
    }
}
