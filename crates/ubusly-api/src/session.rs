//! Session records issued by the bus `session` object.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Error;
use crate::response::{Response, ResultBody};

/// Timeout rpcd applies when a login does not ask for one, in seconds.
pub const DEFAULT_SESSION_TIMEOUT: u64 = 300;

/// Login timeout value that keeps the session alive indefinitely.
pub const NO_EXPIRY_SESSION_TIMEOUT: u64 = 0;

const ANONYMOUS_SESSION: &str = "00000000000000000000000000000000";

/// Opaque 32-character session token.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The all-zero session used only for `session login`.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_SESSION.to_owned())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_SESSION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            f.write_str("SessionId(anonymous)")
        } else {
            f.write_str("SessionId([redacted])")
        }
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::anonymous()
    }
}

pub type AclMap = BTreeMap<String, Vec<String>>;

/// Access lists granted to a session, keyed by ACL scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acls {
    #[serde(rename = "access-group", default)]
    pub access_group: AclMap,
    #[serde(rename = "cgi-io", default, skip_serializing_if = "Option::is_none")]
    pub cgi_io: Option<AclMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<AclMap>,
    #[serde(default)]
    pub ubus: AclMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uci: Option<AclMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub username: String,
}

/// Session record returned by `session login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub ubus_rpc_session: SessionId,
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub expires: u64,
    #[serde(default)]
    pub acls: Acls,
    #[serde(default)]
    pub data: SessionData,
}

impl Session {
    pub fn id(&self) -> &SessionId {
        &self.ubus_rpc_session
    }

    pub fn username(&self) -> &str {
        &self.data.username
    }

    /// Whether the session was issued without an idle timeout.
    pub fn never_expires(&self) -> bool {
        self.timeout == NO_EXPIRY_SESSION_TIMEOUT
    }
}

/// Arguments for `session login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOptions {
    pub username: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl LoginOptions {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

/// Typed result of a successful login.
pub type LoginResult = Session;

impl LoginOptions {
    pub fn result(&self, response: &Response) -> Result<LoginResult, Error> {
        match response.body()? {
            Some(ResultBody::Session(session)) => Ok((**session).clone()),
            other => Err(crate::uci::unexpected("session", other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn anonymous_session_is_32_zeros() {
        let id = SessionId::anonymous();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c == '0'));
        assert!(id.is_anonymous());
    }

    #[test]
    fn debug_redacts_token() {
        let id = SessionId::new("c1ed6c7b025d0caca723a816fa61b668");
        let shown = format!("{id:?}");
        assert!(!shown.contains("c1ed6c7b"));
    }

    #[test]
    fn session_record_decodes_without_optional_acls() {
        let raw = json!({
            "ubus_rpc_session": "c1ed6c7b025d0caca723a816fa61b668",
            "timeout": 300,
            "expires": 299,
            "acls": {
                "access-group": {"unauthenticated": ["read"]},
                "ubus": {"session": ["access", "login"]}
            },
            "data": {"username": "root"}
        });
        let session: Session = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(session.username(), "root");
        assert_eq!(session.timeout, 300);
        assert!(session.acls.uci.is_none());
        assert_eq!(serde_json::to_value(&session).unwrap(), raw);
    }

    #[test]
    fn login_options_expose_password_on_the_wire() {
        let opts = LoginOptions::new("root", SecretString::from("hunter2".to_owned()));
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({"username": "root", "password": "hunter2"})
        );
        let with_timeout = opts.with_timeout(NO_EXPIRY_SESSION_TIMEOUT);
        assert_eq!(serde_json::to_value(&with_timeout).unwrap()["timeout"], json!(0));
    }
}
