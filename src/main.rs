use std::sync::Arc;

use conc_copy::args::print_usage;
use conc_copy::{APP_NAME, CliProgress, CopyEngine, CopyOptions, Logger};

// Every outcome, including failures, ends with exit code 0. Errors are
// reported on stdout only.
fn main() {
    let options = match CopyOptions::parse() {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage(APP_NAME);
            return;
        }
        Err(e) => e.exit(),
    };

    init_logging(options.verbose);

    let logger = match Logger::create(options.log_file.as_deref()) {
        Ok(logger) => logger,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let progress = Arc::new(CliProgress::new(logger, options.quiet));
    let engine = CopyEngine::new(options, progress);

    match engine.run() {
        Ok(report) => {
            if report.has_failures() {
                log::debug!("{} entries failed", report.failed().count());
            }
        }
        // Already reported through the progress callback.
        Err(e) => log::debug!("Run aborted: {}", e),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
