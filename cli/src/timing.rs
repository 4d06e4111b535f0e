//! Tracing setup for the CLI.
//!
//! `--timing` turns on `FmtSpan::CLOSE`, so every `#[instrument]`ed command
//! reports its duration when its span closes. Log records emitted by the
//! business crate through `log` are bridged into the same subscriber.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Connection pool chatter that drowns out our own debug output.
const QUIET_TARGETS: &[&str] = &["hyper_util=warn", "reqwest=info", "rustls=warn"];

fn filter(verbose: bool, timing: bool) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else if timing {
        // span close events are INFO
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    if verbose {
        for directive in QUIET_TARGETS {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

/// Installs the global subscriber, writing to stderr so tables on stdout stay
/// pipeable.
pub fn init_tracing(verbose: bool, timing: bool) {
    let span_events = if timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(filter(verbose, timing))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is process global, so only the directives are tested.
    #[test]
    fn quiet_targets_parse() {
        for directive in QUIET_TARGETS {
            assert!(directive.parse::<tracing_subscriber::filter::Directive>().is_ok());
        }
    }
}
