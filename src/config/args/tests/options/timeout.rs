#[cfg(test)]
mod tests {
    use crate::config::args::*;

    const BASE_ARGS: [&str; 5] = ["s3xcopy", "--from", "foo.csv", "--from-bucket", "bucket-a"];

    #[test]
    fn custom_timeout() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--timeout", "90s"]);

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(90));
    }

    #[test]
    fn compound_timeout() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--timeout", "1h 30m"]);

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(5400));
    }

    #[test]
    fn millisecond_timeout() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--timeout", "1ms"]);

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.timeout, Duration::from_millis(1));
    }

    #[test]
    fn invalid_timeout() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--timeout", "ten minutes"]);

        assert!(parse_from_args(args).is_err());
    }

    #[test]
    fn invalid_assume_role_ttl() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--assume-role-ttl", "15"]);

        assert!(parse_from_args(args).is_err());
    }
}
