use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset. `level` comes from the
/// configuration; `verbose` raises the crate to at least debug.
pub fn cli_filter_directive(verbose: bool, level: Option<&str>) -> String {
    let crate_level = match (verbose, level) {
        (_, Some("trace")) => "trace",
        (true, _) => "debug",
        (false, Some(level)) => level,
        (false, None) => "info",
    };

    if verbose {
        format!("maze_forge={},info", crate_level)
    } else {
        format!("maze_forge={}", crate_level)
    }
}

pub fn init_cli_logger(verbose: bool) {
    init_cli_logger_with_level(verbose, None);
}

pub fn init_cli_logger_with_level(verbose: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli_filter_directive(verbose, level)));

    // Logs go to stderr so `--stdout` output stays clean JSON.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("maze_forge=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(cli_filter_directive(false, None), "maze_forge=info");
        assert_eq!(cli_filter_directive(true, None), "maze_forge=debug,info");
    }

    #[test]
    fn test_configured_level_is_used() {
        assert_eq!(cli_filter_directive(false, Some("warn")), "maze_forge=warn");
        assert_eq!(cli_filter_directive(false, Some("trace")), "maze_forge=trace");
        assert_eq!(cli_filter_directive(true, Some("error")), "maze_forge=debug,info");
        assert_eq!(cli_filter_directive(true, Some("trace")), "maze_forge=trace,info");
    }

    #[test]
    fn test_directives_parse() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            for verbose in [false, true] {
                let directive = cli_filter_directive(verbose, Some(level));
                assert!(EnvFilter::try_new(&directive).is_ok(), "{}", directive);
            }
        }
    }
}
