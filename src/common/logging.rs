use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Advisory warnings are always shown; `verbose` adds debug output for this
/// crate. `RUST_LOG` takes precedence over both.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second initialization (e.g. from tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(use_ansi(no_color, std::io::stderr().is_terminal()))
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,wtsrc=debug"
    } else {
        "warn"
    }
}

/// Escape codes only go to a terminal, and never with `--no-color`.
fn use_ansi(no_color: bool, stderr_is_terminal: bool) -> bool {
    !no_color && stderr_is_terminal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "warn,wtsrc=debug");
    }

    #[test]
    fn test_ansi_needs_a_terminal_and_colors() {
        assert!(use_ansi(false, true));
        assert!(!use_ansi(true, true));
        assert!(!use_ansi(false, false));
        assert!(!use_ansi(true, false));
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(false, true);
        init_logging(true, false);
    }
}
