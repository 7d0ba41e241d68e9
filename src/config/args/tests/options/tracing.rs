#[cfg(test)]
mod tests {
    use crate::config::args::*;

    const BASE_ARGS: [&str; 5] = ["s3xcopy", "--from", "foo.csv", "--from-bucket", "bucket-a"];

    #[test]
    fn with_default_value() {
        init_dummy_tracing_subscriber();

        let config = build_config_from_args(BASE_ARGS).unwrap();

        let tracing_config = config.tracing_config.unwrap();
        assert_eq!(tracing_config.tracing_level, log::Level::Info);
        assert!(!tracing_config.json_tracing);
        assert!(!tracing_config.aws_sdk_tracing);
        assert!(!tracing_config.disable_color_tracing);
    }

    #[test]
    fn with_custom_value() {
        init_dummy_tracing_subscriber();

        let mut args = BASE_ARGS.to_vec();
        args.extend([
            "-vv",
            "--json-tracing",
            "--aws-sdk-tracing",
            "--disable-color-tracing",
        ]);

        let config = build_config_from_args(args).unwrap();

        let tracing_config = config.tracing_config.unwrap();
        assert_eq!(tracing_config.tracing_level, log::Level::Trace);
        assert!(tracing_config.json_tracing);
        assert!(tracing_config.aws_sdk_tracing);
        assert!(tracing_config.disable_color_tracing);
    }

    #[test]
    fn quiet() {
        init_dummy_tracing_subscriber();

        let mut args = BASE_ARGS.to_vec();
        args.push("-q");
        let config = build_config_from_args(args).unwrap();
        assert_eq!(
            config.tracing_config.unwrap().tracing_level,
            log::Level::Warn
        );

        let mut args = BASE_ARGS.to_vec();
        args.push("-qqq");
        let config = build_config_from_args(args).unwrap();
        assert!(config.tracing_config.is_none());
    }

    fn init_dummy_tracing_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("dummy=trace")
            .try_init();
    }
}
