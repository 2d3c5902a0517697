#![allow(clippy::unwrap_used)]
// Integration tests for `UbusClient` against a wiremock `/ubus` endpoint.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ubusly_api::sections::firewall::ForwardingOptions;
use ubusly_api::uci::{AddOptions, ChangesOptions, GetOptions, SetOptions};
use ubusly_api::{
    Error, HttpTransport, LoginOptions, SectionOptions, SessionId, SessionStatus, UbusClient,
};

const TOKEN: &str = "c1ed6c7b025d0caca723a816fa61b668";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, UbusClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/ubus", server.uri())).unwrap();
    let client = UbusClient::with_transport(HttpTransport::with_client(
        reqwest::Client::new(),
        endpoint,
    ));
    (server, client)
}

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": result}))
}

async fn mount_call(server: &MockServer, object: &str, verb: &str, result: Value) {
    Mock::given(method("POST"))
        .and(path("/ubus"))
        .and(body_partial_json(json!({"method": "call", "params": [TOKEN, object, verb]})))
        .respond_with(rpc_result(result))
        .mount(server)
        .await;
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/ubus"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": ["00000000000000000000000000000000", "session", "login",
                       {"username": "root", "password": "hunter2"}]
        })))
        .respond_with(rpc_result(json!([0, {
            "ubus_rpc_session": TOKEN,
            "timeout": 300,
            "expires": 300,
            "acls": {"access-group": {"uci-access": ["read", "write"]}, "ubus": {"uci": ["*"]}},
            "data": {"username": "root"}
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let secret: SecretString = "hunter2".to_string().into();
    let session = client.login(&LoginOptions::new("root", secret)).await.unwrap();

    assert_eq!(session.id().as_str(), TOKEN);
    assert_eq!(session.username(), "root");
    assert_eq!(client.status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/ubus"))
        .respond_with(rpc_result(json!([6])))
        .mount(&server)
        .await;

    let secret: SecretString = "wrong".to_string().into();
    let result = client.login(&LoginOptions::new("root", secret)).await;

    assert!(
        matches!(result, Err(Error::BusExit { code: 6 })),
        "expected BusExit, got: {result:?}"
    );
    assert_eq!(client.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn test_rpc_access_denied_expires_session() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    Mock::given(method("POST"))
        .and(path("/ubus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32002, "message": "Access denied"}
        })))
        .mount(&server)
        .await;

    let result = client.uci().get(&GetOptions::new("network")).await;
    assert!(
        matches!(result, Err(Error::Rpc { code: -32002, .. })),
        "expected Rpc error, got: {result:?}"
    );
    assert_eq!(client.status(), SessionStatus::Expired);

    let again = client.uci().get(&GetOptions::new("network")).await;
    assert!(matches!(again, Err(Error::SessionExpired)));
}

// ── UCI tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_config_sections() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    mount_call(&server, "uci", "get", json!([0, {"values": {
        "wan": {".anonymous": false, ".type": "zone", ".name": "wan", ".index": 2,
                "name": "wan", "network": ["wan", "wan6"], "masq": "1"},
        "lan": {".anonymous": false, ".type": "zone", ".name": "lan", ".index": 1,
                "name": "lan", "network": "lan"},
        "cfg01e63d": {".anonymous": true, ".type": "defaults", ".name": "cfg01e63d", ".index": 0,
                      "syn_flood": "1", "input": "REJECT"}
    }}]))
    .await;

    let opts = GetOptions::new("firewall");
    let resp = client.uci().get(&opts).await.unwrap();
    let result = opts.result(&resp).unwrap();

    let names: Vec<&str> = result.sections.iter().map(|s| s.name()).collect();
    assert_eq!(names, ["cfg01e63d", "lan", "wan"]);

    let SectionOptions::Zone(lan) = result.sections[1].options() else {
        panic!("expected zone");
    };
    assert_eq!(lan.network.as_deref(), Some(&["lan".to_string()][..]));
}

#[tokio::test]
async fn test_get_missing_section() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    mount_call(&server, "uci", "get", json!([4])).await;

    let opts = GetOptions {
        section: Some("nope".into()),
        ..GetOptions::new("firewall")
    };
    let err = client.uci().get(&opts).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "exit status 4 (not found)");
    assert_eq!(client.status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_changes_all_configs() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    mount_call(&server, "uci", "changes", json!([0, {"changes": {
        "firewall": [["set", "cfg04ad58", "enabled", "0"]],
        "network": [["add", "cfg0fad58", "device"], ["set", "cfg0fad58", "name", "br-guest"]]
    }}]))
    .await;

    let opts = ChangesOptions::default();
    let resp = client.uci().changes(&opts).await.unwrap();
    let result = opts.result(&resp).unwrap();

    assert_eq!(result.changes["firewall"].len(), 1);
    assert_eq!(result.changes["network"][0].section_type.as_deref(), Some("device"));
    assert_eq!(result.changes["network"][1].value.as_deref(), Some("br-guest"));
}

#[tokio::test]
async fn test_add_then_set() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    mount_call(&server, "uci", "add", json!([0, {"section": "cfg0fad58"}])).await;

    Mock::given(method("POST"))
        .and(path("/ubus"))
        .and(body_partial_json(json!({"params": [TOKEN, "uci", "set", {
            "config": "firewall",
            "section": "cfg0fad58",
            "values": {"src": "guest", "dest": "wan"}
        }]})))
        .respond_with(rpc_result(json!([0])))
        .expect(1)
        .mount(&server)
        .await;

    let add = AddOptions::new("firewall", "forwarding");
    let resp = client.uci().add(&add).await.unwrap();
    let section = add.result(&resp).unwrap().section;
    assert_eq!(section, "cfg0fad58");

    let set = SetOptions {
        config: "firewall".into(),
        section,
        values: ForwardingOptions {
            src: Some("guest".into()),
            dest: Some("wan".into()),
            ..ForwardingOptions::default()
        }
        .into(),
    };
    let resp = client.uci().set(&set).await.unwrap();
    assert!(resp.is_success());
    assert!(resp.body.is_none());
}

#[tokio::test]
async fn test_unrecognized_body_is_an_error() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    mount_call(&server, "uci", "get", json!([0, {"surprise": true}])).await;

    let result = client.uci().get(&GetOptions::new("firewall")).await;
    assert!(
        matches!(result, Err(Error::UnrecognizedResultShape { ref body }) if body.contains("surprise")),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_http_error_status() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    Mock::given(method("POST"))
        .and(path("/ubus"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.uci().get(&GetOptions::new("firewall")).await;
    assert!(matches!(result, Err(Error::Http { status: 502, .. })));
}

#[tokio::test]
async fn test_non_json_reply() {
    let (server, client) = setup().await;
    let client = client.with_session(SessionId::new(TOKEN));

    Mock::given(method("POST"))
        .and(path("/ubus"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.uci().get(&GetOptions::new("firewall")).await;
    assert!(matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("html")));
}
