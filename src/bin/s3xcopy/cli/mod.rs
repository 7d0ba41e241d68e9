use tokio::time::Instant;
use tracing::{error, trace};

use s3xcopy::copier::ObjectCopier;
use s3xcopy::Config;

pub const EXIT_CODE_INVALID_ARGS: i32 = 2;
pub const EXIT_CODE_COPY_FAILED: i32 = 2;

pub async fn run(config: Config) {
    let start_time = Instant::now();
    trace!("copy start.");

    let copier = ObjectCopier::from_config(&config);
    let result = copier.copy(&config.request).await;

    let duration_sec = format!("{:.3}", start_time.elapsed().as_secs_f32());
    if let Err(e) = result {
        error!(duration_sec = duration_sec, "s3xcopy failed.");
        eprintln!("{e}");

        std::process::exit(EXIT_CODE_COPY_FAILED);
    }

    trace!(duration_sec = duration_sec, "s3xcopy has been completed.");
}
