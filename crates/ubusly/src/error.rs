//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ubusly_api::Error as ApiError;
use ubusly_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(ubusly::connection_failed),
        help(
            "Check that the device is reachable and uhttpd serves the ubus endpoint.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(ubusly::tls_error),
        help(
            "Routers usually serve a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or set ca_cert in your profile."
        )
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(ubusly::timeout),
        help("Increase the timeout with --timeout or check the device's load.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login rejected by the device")]
    #[diagnostic(
        code(ubusly::auth_failed),
        help("Verify the username and password, then run: ubusly login")
    )]
    AuthFailed,

    #[error("No saved session at {path}")]
    #[diagnostic(code(ubusly::no_session), help("Run: ubusly login"))]
    NoSession { path: String },

    #[error("The device no longer accepts this session")]
    #[diagnostic(
        code(ubusly::session_expired),
        help("Sessions expire after their idle timeout. Run: ubusly login")
    )]
    SessionExpired,

    #[error("No credentials for profile '{profile}'")]
    #[diagnostic(
        code(ubusly::no_credentials),
        help("Pass --username, set UBUSLY_PASSWORD, or add them to the profile.")
    )]
    NoCredentials { profile: String },

    // ── Bus ──────────────────────────────────────────────────────────
    #[error("Permission denied")]
    #[diagnostic(
        code(ubusly::permission_denied),
        help(
            "The session lacks an ACL for this call, or it has expired.\n\
             Run: ubusly login"
        )
    )]
    PermissionDenied,

    #[error("Nothing matched the request ({what})")]
    #[diagnostic(
        code(ubusly::not_found),
        help("Check the config, section and option names. Run: ubusly uci get -c <config>")
    )]
    NotFound { what: String },

    #[error("Call failed: {message}")]
    #[diagnostic(code(ubusly::bus_error))]
    Bus { message: String },

    #[error(transparent)]
    #[diagnostic(code(ubusly::api))]
    Api(ApiError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ubusly::validation))]
    Validation { field: String, reason: String },

    #[error("Unknown config '{name}'")]
    #[diagnostic(code(ubusly::unknown_config), help("Known configs: {available}"))]
    UnknownConfig { name: String, available: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ubusly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ubusly config init --url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Profile '{name}' already exists")]
    #[diagnostic(code(ubusly::profile_exists), help("Use --force to replace it."))]
    ProfileExists { name: String },

    #[error(transparent)]
    #[diagnostic(code(ubusly::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(ubusly::json), help("--values takes a JSON object, e.g. '{{\"enabled\":\"1\"}}'"))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed
            | Self::NoSession { .. }
            | Self::SessionExpired
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::PermissionDenied => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::UnknownConfig { .. } | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::SessionExpired => Self::SessionExpired,
            ApiError::NotAuthenticated => Self::NoSession {
                path: "(none)".into(),
            },
            ApiError::Tls(message) => Self::Tls { message },
            e if e.is_timeout() => Self::Timeout,
            e if e.is_session_expired() => Self::PermissionDenied,
            e if e.is_not_found() => Self::NotFound {
                what: e.to_string(),
            },
            ApiError::Transport(e) => Self::ConnectionFailed {
                url: e.url().map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: ApiError::Transport(e),
            },
            e @ ApiError::BusExit { .. } => Self::Bus {
                message: e.to_string(),
            },
            other => Self::Api(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoState { path } => Self::NoSession {
                path: path.display().to_string(),
            },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_statuses_map_to_exit_codes() {
        assert_eq!(
            CliError::from(ApiError::BusExit { code: 6 }).exit_code(),
            exit_code::PERMISSION
        );
        assert_eq!(
            CliError::from(ApiError::BusExit { code: 4 }).exit_code(),
            exit_code::NOT_FOUND
        );
        assert_eq!(
            CliError::from(ApiError::BusExit { code: 7 }).exit_code(),
            exit_code::TIMEOUT
        );
        assert_eq!(
            CliError::from(ApiError::BusExit { code: 2 }).exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn session_errors_are_auth_failures() {
        assert_eq!(CliError::from(ApiError::SessionExpired).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(ApiError::NotAuthenticated).exit_code(), exit_code::AUTH);
    }
}
