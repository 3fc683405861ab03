//! Tracing setup for the command line

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
///
/// Targets are named per crate: `tracing` matches directive targets by
/// prefix, so a bare `fhirkit` would also select `fhirkit_models` and
/// `fhirkit_validator`.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,fhirkit_cli=info",
        1 => "info,fhirkit_cli=debug,fhirkit_models=debug,fhirkit_validator=debug",
        _ => "debug,fhirkit_cli=trace,fhirkit_models=trace,fhirkit_validator=trace",
    }
}

/// Log to stderr so stdout carries only command output
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_targets() {
        for verbose in 0..3 {
            let filter = default_filter(verbose);
            let targets: Vec<&str> = filter
                .split(',')
                .filter_map(|directive| directive.split_once('=').map(|(target, _)| target))
                .collect();

            assert!(targets.contains(&"fhirkit_cli"), "{filter}");
            assert!(!targets.contains(&"fhirkit"), "{filter}");
            assert!(filter.parse::<EnvFilter>().is_ok(), "{filter}");
        }
        assert_eq!(default_filter(0), "warn,fhirkit_cli=info");
    }
}
