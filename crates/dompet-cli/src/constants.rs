//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (ledger file, transaction, budget).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;
}

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "DOMPET_LOG";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DOMPET_CONFIG";
