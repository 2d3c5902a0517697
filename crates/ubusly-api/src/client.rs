// Operation façade over the bus.
//
// `UbusClient` builds one `Call` per request, sends it through a `Transport`,
// and decodes the envelope. It also tracks the session lifecycle: a token is
// cached after login (or restored from disk) and dropped once the bus refuses
// it. Nothing here retries; the caller decides whether to log in again.

use std::sync::RwLock;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::call::{Call, RPC_METHOD};
use crate::discriminator::Discriminator;
use crate::error::Error;
use crate::response::Response;
use crate::session::{LoginOptions, Session, SessionId};
use crate::transport::{HttpTransport, Transport, TransportConfig};
use crate::uci::{
    self, AddOptions, ApplyOptions, ChangesOptions, ConfigsOptions, DeleteOptions, GetOptions,
    RevertOptions, SetOptions,
};

/// Where the client is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
    Expired,
}

#[derive(Debug, Clone)]
enum SessionState {
    Unauthenticated,
    Authenticated(SessionId),
    Expired,
}

/// Client for one bus endpoint and one session.
pub struct UbusClient<T: Transport = HttpTransport> {
    transport: T,
    discriminator: Discriminator,
    state: RwLock<SessionState>,
}

impl UbusClient<HttpTransport> {
    /// Create an unauthenticated client for `endpoint`.
    pub fn new(endpoint: Url, config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::new(endpoint, config)?))
    }

    /// Parse `endpoint` and create a client for it.
    pub fn from_url(endpoint: &str, config: &TransportConfig) -> Result<Self, Error> {
        Self::new(Url::parse(endpoint)?, config)
    }
}

impl<T: Transport> UbusClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            discriminator: Discriminator::default(),
            state: RwLock::new(SessionState::Unauthenticated),
        }
    }

    /// Replace the response discriminator.
    pub fn with_discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = discriminator;
        self
    }

    /// Start from a previously issued session instead of logging in.
    pub fn with_session(self, session_id: SessionId) -> Self {
        self.set_state(SessionState::Authenticated(session_id));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn status(&self) -> SessionStatus {
        match *self.state.read().expect("session lock poisoned") {
            SessionState::Unauthenticated => SessionStatus::Unauthenticated,
            SessionState::Authenticated(_) => SessionStatus::Authenticated,
            SessionState::Expired => SessionStatus::Expired,
        }
    }

    /// The cached token, if the client is authenticated.
    pub fn session_id(&self) -> Option<SessionId> {
        match &*self.state.read().expect("session lock poisoned") {
            SessionState::Authenticated(id) => Some(id.clone()),
            _ => None,
        }
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write().expect("session lock poisoned") = state;
    }

    fn current_session(&self) -> Result<SessionId, Error> {
        match &*self.state.read().expect("session lock poisoned") {
            SessionState::Authenticated(id) => Ok(id.clone()),
            SessionState::Unauthenticated => Err(Error::NotAuthenticated),
            SessionState::Expired => Err(Error::SessionExpired),
        }
    }

    // ── Session ─────────────────────────────────────────────────────

    /// `session login` with the anonymous session; caches the issued token.
    pub async fn login(&self, opts: &LoginOptions) -> Result<Session, Error> {
        debug!(username = %opts.username, "logging in");
        let call = Call::new(SessionId::anonymous(), "session", "login", opts)?;
        let response = self.send(call).await?;
        let session = opts.result(&response)?;

        if session.id().is_empty() {
            return Err(Error::decode("login returned an empty session id"));
        }
        debug!(timeout = session.timeout, "session established");
        self.set_state(SessionState::Authenticated(session.id().clone()));
        Ok(session)
    }

    // ── Calls ───────────────────────────────────────────────────────

    /// Invoke `object.method` with the cached session.
    ///
    /// Fails with [`Error::NotAuthenticated`] before login and with
    /// [`Error::SessionExpired`] once the bus has rejected the session.
    pub async fn call<A: Serialize + ?Sized>(
        &self,
        object: &str,
        method: &str,
        args: &A,
    ) -> Result<Response, Error> {
        let session = self.current_session()?;
        let call = Call::new(session, object, method, args)?;

        match self.send(call).await {
            Err(e) if e.is_session_expired() => {
                warn!(object, method, "bus rejected the session; login required");
                self.set_state(SessionState::Expired);
                Err(e)
            }
            other => other,
        }
    }

    async fn send(&self, call: Call) -> Result<Response, Error> {
        debug!(object = call.object_path(), method = call.method(), "ubus call");
        let raw: Value = self.transport.invoke(RPC_METHOD, call.into_params()).await?;
        trace!(body = %raw, "ubus reply");
        Response::decode(&raw, &self.discriminator)
    }

    /// Handle for the `uci` object.
    pub fn uci(&self) -> Uci<'_, T> {
        Uci { client: self }
    }
}

/// Verbs of the `uci` bus object.
pub struct Uci<'c, T: Transport> {
    client: &'c UbusClient<T>,
}

impl<T: Transport> Uci<'_, T> {
    pub async fn add(&self, opts: &AddOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "add", opts).await
    }

    pub async fn apply(&self, opts: &ApplyOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "apply", opts).await
    }

    pub async fn changes(&self, opts: &ChangesOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "changes", opts).await
    }

    pub async fn configs(&self, opts: &ConfigsOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "configs", opts).await
    }

    pub async fn delete(&self, opts: &DeleteOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "delete", opts).await
    }

    pub async fn get(&self, opts: &GetOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "get", opts).await
    }

    pub async fn revert(&self, opts: &RevertOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "revert", opts).await
    }

    pub async fn set(&self, opts: &SetOptions) -> Result<Response, Error> {
        self.client.call(uci::OBJECT, "set", opts).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use secrecy::SecretString;
    use serde_json::json;

    use super::*;
    use crate::error::RPC_ACCESS_DENIED;

    /// Replays canned replies and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<Value, Error>>>,
        sent: Mutex<Vec<Value>>,
    }

    impl ScriptedTransport {
        fn replying(replies: Vec<Result<Value, Error>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                sent: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<Value> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn invoke(&self, method: &str, params: Value) -> Result<Value, Error> {
            assert_eq!(method, "call");
            self.sent.lock().unwrap().push(params);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(Error::EmptyResponse))
        }
    }

    const TOKEN: &str = "c1ed6c7b025d0caca723a816fa61b668";

    fn login_reply() -> Result<Value, Error> {
        Ok(json!([0, {
            "ubus_rpc_session": TOKEN,
            "timeout": 300,
            "expires": 300,
            "acls": {"access-group": {}, "ubus": {"uci": ["*"]}},
            "data": {"username": "root"}
        }]))
    }

    fn login_opts() -> LoginOptions {
        LoginOptions::new("root", SecretString::from("secret".to_owned()))
    }

    #[tokio::test]
    async fn calls_before_login_are_refused() {
        let client = UbusClient::with_transport(ScriptedTransport::default());
        let err = client.uci().configs(&ConfigsOptions {}).await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        assert!(client.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn login_uses_the_anonymous_session_then_caches_the_token() {
        let client = UbusClient::with_transport(ScriptedTransport::replying(vec![
            login_reply(),
            Ok(json!([0, {"configs": ["network"]}])),
        ]));

        let session = client.login(&login_opts()).await.unwrap();
        assert_eq!(session.username(), "root");
        assert_eq!(client.status(), SessionStatus::Authenticated);

        let resp = client.uci().configs(&ConfigsOptions {}).await.unwrap();
        assert_eq!(
            ConfigsOptions {}.result(&resp).unwrap().configs,
            ["network"]
        );

        let sent = client.transport().sent();
        assert_eq!(sent[0][0], json!("00000000000000000000000000000000"));
        assert_eq!(sent[0][1], json!("session"));
        assert_eq!(sent[0][3]["password"], json!("secret"));
        assert_eq!(sent[1], json!([TOKEN, "uci", "configs", {}]));
    }

    #[tokio::test]
    async fn access_denied_expires_the_session() {
        let client = UbusClient::with_transport(ScriptedTransport::replying(vec![Ok(json!([6]))]))
            .with_session(SessionId::new(TOKEN));

        let err = client.uci().get(&GetOptions::new("firewall")).await.unwrap_err();
        assert!(matches!(err, Error::BusExit { code: 6 }));
        assert_eq!(client.status(), SessionStatus::Expired);
        assert!(client.session_id().is_none());

        let err = client.uci().get(&GetOptions::new("firewall")).await.unwrap_err();
        assert!(matches!(err, Error::SessionExpired));
        assert_eq!(client.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn access_denied_with_a_body_expires_the_session() {
        let client =
            UbusClient::with_transport(ScriptedTransport::replying(vec![Ok(json!([6, {"x": 1}]))]))
                .with_session(SessionId::new(TOKEN));

        let err = client.uci().get(&GetOptions::new("firewall")).await.unwrap_err();
        assert!(matches!(err, Error::BusExit { code: 6 }), "{err:?}");
        assert_eq!(client.status(), SessionStatus::Expired);
    }

    #[tokio::test]
    async fn rpc_access_denied_expires_the_session() {
        let client = UbusClient::with_transport(ScriptedTransport::replying(vec![Err(Error::Rpc {
            code: RPC_ACCESS_DENIED,
            message: "Access denied".into(),
        })]))
        .with_session(SessionId::new(TOKEN));

        let err = client.uci().changes(&ChangesOptions::default()).await.unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(client.status(), SessionStatus::Expired);
    }

    #[tokio::test]
    async fn other_failures_keep_the_session() {
        let client = UbusClient::with_transport(ScriptedTransport::replying(vec![Ok(json!([4]))]))
            .with_session(SessionId::new(TOKEN));

        let err = client
            .uci()
            .delete(&DeleteOptions {
                config: "firewall".into(),
                section: Some("missing".into()),
                ..DeleteOptions::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(client.status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn failed_login_leaves_client_unauthenticated() {
        let client = UbusClient::with_transport(ScriptedTransport::replying(vec![Ok(json!([6]))]));
        let err = client.login(&login_opts()).await.unwrap_err();
        assert!(matches!(err, Error::BusExit { code: 6 }));
        assert_eq!(client.status(), SessionStatus::Unauthenticated);
    }
}
