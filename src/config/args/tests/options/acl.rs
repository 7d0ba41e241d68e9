#[cfg(test)]
mod tests {
    use crate::config::args::*;

    const BASE_ARGS: [&str; 5] = ["s3xcopy", "--from", "foo.csv", "--from-bucket", "bucket-a"];

    #[test]
    fn public_read() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--acl", "public-read"]);

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.request.acl(), Some(&ObjectCannedAcl::PublicRead));
    }

    #[test]
    fn invalid_acl() {
        let mut args = BASE_ARGS.to_vec();
        args.extend(["--acl", "everyone"]);

        assert!(parse_from_args(args).is_err());
    }
}
