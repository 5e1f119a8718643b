//! Structured logging initialization for camkeep.
//!
//! Log records go to stderr so that interactive prompts and command results
//! on stdout stay readable.

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Returns the default filter directive for the given verbosity flags.
///
/// The interactive tool talks to the user on stdout, so the default level is
/// `warn`: degraded-continue paths stay visible without burying the prompts.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "camkeep=error";
    }
    match verbose {
        0 => "camkeep=warn",
        1 => "camkeep=info",
        2 => "camkeep=debug",
        _ => "camkeep=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// # Arguments
///
/// * `robot_mode` - If true, output structured JSON logs for machine consumption
/// * `verbose` - Verbosity level: 0 = warn, 1 = info, 2 = debug, 3+ = trace
/// * `quiet` - If true, only errors are logged
///
/// # Environment Variables
///
/// * `RUST_LOG` - Override default filter (e.g., "camkeep=debug")
///
/// # Output Behavior
///
/// | Mode | TTY | Output |
/// |------|-----|--------|
/// | Robot | any | JSON lines to stderr |
/// | Human | yes | Colored output to stderr |
/// | Human | no | Compact plain output to stderr |
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    if robot_mode {
        let fmt_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else if io::stderr().is_terminal() {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
