#[cfg(test)]
mod tests {
    use crate::config::args::*;

    const BASE_ARGS: [&str; 5] = ["s3xcopy", "--from", "foo.csv", "--from-bucket", "bucket-a"];

    #[test]
    fn environment_source() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--credential-source", "environment"]);

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.credential_source, CredentialSource::Environment);
    }

    #[test]
    fn empty_credential_helper() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--credential-helper", ""]);

        assert!(parse_from_args(args).is_err());
    }

    #[test]
    fn unknown_source() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--credential-source", "imds"]);

        assert!(parse_from_args(args).is_err());
    }
}
