use strum::{Display, FromRepr};
use thiserror::Error;

/// Status codes returned in the first element of every ubus response.
///
/// Mirrors `enum ubus_msg_status` from libubus. `Ok` is the only success value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(i64)]
pub enum BusStatus {
    #[strum(to_string = "success")]
    Ok = 0,
    #[strum(to_string = "invalid command")]
    InvalidCommand = 1,
    #[strum(to_string = "invalid argument")]
    InvalidArgument = 2,
    #[strum(to_string = "method not found")]
    MethodNotFound = 3,
    #[strum(to_string = "not found")]
    NotFound = 4,
    #[strum(to_string = "no data")]
    NoData = 5,
    #[strum(to_string = "access denied")]
    PermissionDenied = 6,
    #[strum(to_string = "request timed out")]
    Timeout = 7,
    #[strum(to_string = "operation not supported")]
    NotSupported = 8,
    #[strum(to_string = "unknown error")]
    UnknownError = 9,
    #[strum(to_string = "connection failed")]
    ConnectionFailed = 10,
    #[strum(to_string = "out of memory")]
    NoMemory = 11,
    #[strum(to_string = "parse error")]
    ParseError = 12,
    #[strum(to_string = "system error")]
    SystemError = 13,
}

impl BusStatus {
    /// Human-readable description for a raw exit code.
    pub fn describe(code: i64) -> String {
        Self::from_repr(code).map_or_else(|| "unrecognized status".into(), |s| s.to_string())
    }
}

/// JSON-RPC error code rpcd uses when the session id is unknown or expired.
pub const RPC_ACCESS_DENIED: i64 = -32002;

/// Top-level error type for the `ubusly-api` crate.
///
/// Transport failures, bus-side rejections and decode failures are kept in
/// separate variants so callers can tell a device refusing a request apart
/// from a response this crate could not make sense of.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status from the endpoint.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// JSON-RPC level error object returned by the endpoint.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    // ── Bus ─────────────────────────────────────────────────────────
    /// The envelope carried a non-zero exit code.
    #[error("exit status {code} ({})", BusStatus::describe(*code))]
    BusExit { code: i64 },

    /// The endpoint answered with an empty envelope.
    #[error("empty response")]
    EmptyResponse,

    // ── Decoding ────────────────────────────────────────────────────
    /// A syntactically valid body that no registered matcher accepted.
    #[error("unrecognized result shape: {body}")]
    UnrecognizedResultShape { body: String },

    /// A section's `.type` has no entry in the section registry.
    #[error("unknown config section type '{type_name}'")]
    UnknownSectionType { type_name: String },

    /// A value did not match any accepted encoding of its declared type.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// The raw payload was not valid JSON, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A verb accessor was handed a body of the wrong variant.
    #[error("expected {expected} result, got {found}")]
    UnexpectedResult {
        expected: &'static str,
        found: &'static str,
    },

    // ── Session ─────────────────────────────────────────────────────
    /// No session has been established (call `login` first).
    #[error("not logged in")]
    NotAuthenticated,

    /// The bus rejected the cached session; log in again.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,
}

impl Error {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns `true` if the round trip itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::InvalidUrl(_)
                | Self::Tls(_)
                | Self::Http { .. }
                | Self::Rpc { .. }
        )
    }

    /// Returns `true` if the bus refused the session and a fresh login is needed.
    pub fn is_session_expired(&self) -> bool {
        match self {
            Self::SessionExpired => true,
            Self::BusExit { code } => BusStatus::from_repr(*code) == Some(BusStatus::PermissionDenied),
            Self::Rpc { code, .. } => *code == RPC_ACCESS_DENIED,
            _ => false,
        }
    }

    /// Returns `true` if the device reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BusExit { code } if BusStatus::from_repr(*code) == Some(BusStatus::NotFound))
    }

    /// The bus exit code, if this error came from a non-zero envelope.
    pub fn exit_code(&self) -> Option<i64> {
        match self {
            Self::BusExit { code } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if the request timed out in transport.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::BusExit { code } => BusStatus::from_repr(*code) == Some(BusStatus::Timeout),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_exit_message_names_the_status() {
        let err = Error::BusExit { code: 6 };
        assert_eq!(err.to_string(), "exit status 6 (access denied)");
        assert!(err.is_session_expired());
        assert!(!err.is_transport());
    }

    #[test]
    fn unknown_codes_still_render() {
        let err = Error::BusExit { code: 99 };
        assert_eq!(err.to_string(), "exit status 99 (unrecognized status)");
        assert_eq!(err.exit_code(), Some(99));
    }

    #[test]
    fn rpc_access_denied_counts_as_expiry() {
        let err = Error::Rpc {
            code: RPC_ACCESS_DENIED,
            message: "Access denied".into(),
        };
        assert!(err.is_session_expired());
        assert!(err.is_transport());
    }
}
