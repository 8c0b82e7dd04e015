//! Tracing subscriber setup.
//!
//! Logs go to stderr so `--json` output on stdout stays machine readable.
//! `RUST_LOG` is honoured; `--verbose` raises this crate to `debug`.

use std::io::stderr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{HanksTankError, Result};

fn crate_directive(verbose: bool) -> &'static str {
    if verbose {
        "hanks_tank=debug"
    } else {
        "hanks_tank=warn"
    }
}

/// Filter from `RUST_LOG` plus the crate-level directive.
pub fn build_filter(verbose: bool) -> Result<EnvFilter> {
    let directive = crate_directive(verbose)
        .parse()
        .map_err(|e| HanksTankError::Config {
            message: format!("invalid log directive: {e}"),
        })?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

pub fn setup_logging(verbose: bool) -> Result<()> {
    let filter = build_filter(verbose)?;

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(stderr)
                .with_target(verbose)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| HanksTankError::Config {
            message: format!("failed to initialise logging: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_directive_levels() {
        assert_eq!(crate_directive(true), "hanks_tank=debug");
        assert_eq!(crate_directive(false), "hanks_tank=warn");
    }

    #[test]
    fn test_build_filter_includes_crate_directive() {
        let filter = build_filter(true).unwrap();
        assert!(filter.to_string().contains("hanks_tank=debug"));
    }
}
