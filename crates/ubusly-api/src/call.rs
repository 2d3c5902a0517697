//! Outbound call parameters.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::session::SessionId;

/// JSON-RPC method name every bus invocation is sent under.
pub const RPC_METHOD: &str = "call";

/// One bus invocation: `[session, object, method, args]`.
///
/// Built fresh for every request and consumed when sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    session_id: SessionId,
    object_path: String,
    method: String,
    args: Map<String, Value>,
}

impl Call {
    /// Build a call whose argument record must serialize to a JSON object.
    pub fn new<A: Serialize + ?Sized>(
        session_id: SessionId,
        object_path: impl Into<String>,
        method: impl Into<String>,
        args: &A,
    ) -> Result<Self, Error> {
        let args = match serde_json::to_value(args) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Map::new(),
            Ok(other) => {
                return Err(Error::decode(format!(
                    "call arguments must be a JSON object, got {other}"
                )));
            }
            Err(e) => return Err(Error::decode(e.to_string())),
        };

        Ok(Self {
            session_id,
            object_path: object_path.into(),
            method: method.into(),
            args,
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &Map<String, Value> {
        &self.args
    }

    /// The positional parameter list handed to the transport.
    pub fn into_params(self) -> Value {
        Value::Array(vec![
            Value::String(self.session_id.as_str().to_owned()),
            Value::String(self.object_path),
            Value::String(self.method),
            Value::Object(self.args),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Args {
        config: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        section: Option<&'static str>,
    }

    #[test]
    fn params_are_four_positional_elements() {
        let call = Call::new(
            SessionId::new("abc"),
            "uci",
            "get",
            &Args {
                config: "firewall",
                section: None,
            },
        )
        .unwrap();

        assert_eq!(
            call.into_params(),
            json!(["abc", "uci", "get", {"config": "firewall"}])
        );
    }

    #[test]
    fn unit_args_become_empty_object() {
        let call = Call::new(SessionId::anonymous(), "uci", "configs", &()).unwrap();
        assert_eq!(call.args().len(), 0);
        assert_eq!(call.into_params()[3], json!({}));
    }

    #[test]
    fn non_object_args_are_rejected() {
        let err = Call::new(SessionId::anonymous(), "uci", "get", &vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
