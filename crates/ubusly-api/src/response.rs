//! Response envelope `[exitCode]` / `[exitCode, body]` and the typed bodies.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::codec::UciList;
use crate::discriminator::Discriminator;
use crate::error::Error;
use crate::sections::ConfigSection;
use crate::session::Session;

// ── Envelope ────────────────────────────────────────────────────────

/// A decoded bus response. `body` is `None` when the envelope held only the
/// exit code.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub exit_code: i64,
    pub body: Option<ResultBody>,
}

impl Response {
    /// Decode an envelope and fail with [`Error::BusExit`] on a non-zero code.
    pub fn decode(raw: &Value, discriminator: &Discriminator) -> Result<Self, Error> {
        Self::parse(raw, discriminator)?.check()
    }

    /// Decode an envelope without judging its exit code. The body of a
    /// non-zero envelope is kept only when it classifies cleanly.
    pub fn parse(raw: &Value, discriminator: &Discriminator) -> Result<Self, Error> {
        let Value::Array(items) = raw else {
            return Err(Error::decode(format!("response envelope is not an array: {raw}")));
        };

        match items.as_slice() {
            [] => Err(Error::EmptyResponse),
            [code] => Ok(Self {
                exit_code: exit_code(code)?,
                body: None,
            }),
            [code, body] => {
                let status = exit_code(code)?;
                let body = if status == 0 {
                    Some(discriminator.classify(body)?)
                } else {
                    discriminator.classify(body).ok()
                };
                Ok(Self {
                    exit_code: status,
                    body,
                })
            }
            _ => Err(Error::decode(format!(
                "response envelope has {} elements, expected 1 or 2",
                items.len()
            ))),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit code into [`Error::BusExit`].
    pub fn check(self) -> Result<Self, Error> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::BusExit {
                code: self.exit_code,
            })
        }
    }

    /// The body of a successful response, or the error the envelope encodes.
    pub fn body(&self) -> Result<Option<&ResultBody>, Error> {
        if self.is_success() {
            Ok(self.body.as_ref())
        } else {
            Err(Error::BusExit {
                code: self.exit_code,
            })
        }
    }
}

fn exit_code(raw: &Value) -> Result<i64, Error> {
    raw.as_i64()
        .ok_or_else(|| Error::decode(format!("exit code is not an integer: {raw}")))
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.body.is_some() { 2 } else { 1 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.exit_code)?;
        if let Some(body) = &self.body {
            seq.serialize_element(body)?;
        }
        seq.end()
    }
}

// ── Bodies ──────────────────────────────────────────────────────────

/// Every body shape the bus is known to return.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultBody {
    /// `{"configs": [...]}`
    Configs(Vec<String>),
    /// `{"changes": [...]}` or `{"changes": {config: [...]}}`
    Changes(ChangeSet),
    /// `{"section": name}`
    Add { section: String },
    /// Session record from `session login`.
    Session(Box<Session>),
    /// `{"value": scalar-or-list}`
    Value(UciList),
    /// `{"values": section}` or `{"values": {name: section}}`
    Values(SectionSet),
    /// Bare integer body.
    Status(i64),
}

impl ResultBody {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configs(_) => "configs",
            Self::Changes(_) => "changes",
            Self::Add { .. } => "add",
            Self::Session(_) => "session",
            Self::Value(_) => "value",
            Self::Values(_) => "values",
            Self::Status(_) => "status",
        }
    }
}

impl Serialize for ResultBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Status(n) => serializer.serialize_i64(*n),
            Self::Session(session) => session.serialize(serializer),
            Self::Configs(configs) => single_entry(serializer, "configs", configs),
            Self::Changes(changes) => single_entry(serializer, "changes", changes),
            Self::Add { section } => single_entry(serializer, "section", section),
            Self::Value(value) => single_entry(serializer, "value", value),
            Self::Values(values) => single_entry(serializer, "values", values),
        }
    }
}

fn single_entry<S: Serializer, V: Serialize + ?Sized>(
    serializer: S,
    key: &str,
    value: &V,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

/// Sections returned by `uci get`.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionSet {
    /// The section object itself; the request named one section.
    Single(ConfigSection),
    /// Sections keyed by name, ordered by `.index`.
    Multi(IndexMap<String, ConfigSection>),
}

impl SectionSet {
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sections in positional order.
    pub fn sections(&self) -> Vec<&ConfigSection> {
        match self {
            Self::Single(section) => vec![section],
            Self::Multi(map) => map.values().collect(),
        }
    }

    pub fn into_sections(self) -> Vec<ConfigSection> {
        match self {
            Self::Single(section) => vec![section],
            Self::Multi(map) => map.into_values().collect(),
        }
    }
}

impl Serialize for SectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(section) => section.serialize(serializer),
            Self::Multi(map) => map.serialize(serializer),
        }
    }
}

/// Pending changes returned by `uci changes`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeSet {
    /// Changes of the one config named in the request.
    Single(Vec<Change>),
    /// Changes of every config with pending edits.
    PerConfig(IndexMap<String, Vec<Change>>),
}

impl Serialize for ChangeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(changes) => changes.serialize(serializer),
            Self::PerConfig(map) => map.serialize(serializer),
        }
    }
}

// ── Changes ─────────────────────────────────────────────────────────

/// Kind of a pending change as reported by the uci delta log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeOperation {
    Add,
    Set,
    Remove,
    Rename,
    ListAdd,
    ListDel,
    Reorder,
    Other(String),
}

impl ChangeOperation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Add => "add",
            Self::Set => "set",
            Self::Remove => "remove",
            Self::Rename => "rename",
            Self::ListAdd => "list-add",
            Self::ListDel => "list-del",
            Self::Reorder => "order",
            Self::Other(op) => op,
        }
    }
}

impl From<&str> for ChangeOperation {
    fn from(op: &str) -> Self {
        match op {
            "add" => Self::Add,
            "set" => Self::Set,
            "remove" => Self::Remove,
            "rename" => Self::Rename,
            "list-add" => Self::ListAdd,
            "list-del" => Self::ListDel,
            "order" => Self::Reorder,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChangeOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One pending change: `[op, section]`, `[op, section, type|option]` or
/// `[op, section, option, value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub operation: ChangeOperation,
    pub section: String,
    /// Section type, only for `add`.
    pub section_type: Option<String>,
    pub option: Option<String>,
    pub value: Option<String>,
}

impl Change {
    /// Decode the positional array form.
    pub fn from_wire(raw: &Value) -> Result<Self, Error> {
        let Value::Array(items) = raw else {
            return Err(Error::decode(format!("change is not an array: {raw}")));
        };
        let fields = items
            .iter()
            .map(|v| v.as_str())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::decode(format!("change holds non-string entries: {raw}")))?;

        let (op, section, rest) = match fields.as_slice() {
            [op, section, rest @ ..] if rest.len() <= 2 => (*op, *section, rest),
            _ => {
                return Err(Error::decode(format!(
                    "change must have 2 to 4 entries, got {}",
                    fields.len()
                )));
            }
        };

        let operation = ChangeOperation::from(op);
        let mut change = Self {
            operation,
            section: section.to_owned(),
            section_type: None,
            option: None,
            value: None,
        };
        match rest {
            [third] if change.operation == ChangeOperation::Add => {
                change.section_type = Some((*third).to_owned());
            }
            [third] => change.option = Some((*third).to_owned()),
            [option, value] => {
                change.option = Some((*option).to_owned());
                change.value = Some((*value).to_owned());
            }
            _ => {}
        }
        Ok(change)
    }
}

impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let trailing: Vec<&str> = [&self.section_type, &self.option, &self.value]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect();
        let mut seq = serializer.serialize_seq(Some(2 + trailing.len()))?;
        seq.serialize_element(self.operation.as_str())?;
        seq.serialize_element(&self.section)?;
        for field in trailing {
            seq.serialize_element(field)?;
        }
        seq.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(raw: &Value) -> Result<Response, Error> {
        Response::decode(raw, &Discriminator::default())
    }

    #[test]
    fn exit_code_without_body_is_an_error() {
        let err = decode(&json!([5])).unwrap_err();
        assert!(matches!(err, Error::BusExit { code: 5 }));
    }

    #[test]
    fn zero_without_body_is_success() {
        let resp = decode(&json!([0])).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.body, None);
    }

    #[test]
    fn exit_code_wins_over_an_unrecognized_body() {
        let err = decode(&json!([6, {"x": 1}])).unwrap_err();
        assert!(matches!(err, Error::BusExit { code: 6 }), "{err:?}");

        let err = decode(&json!([4, {"values": {"lan": {".type": "no-such-type", ".name": "lan"}}}])).unwrap_err();
        assert!(matches!(err, Error::BusExit { code: 4 }), "{err:?}");

        let resp = Response::parse(&json!([6, {"x": 1}]), &Discriminator::default()).unwrap();
        assert_eq!(resp.body, None);
    }

    #[test]
    fn parse_keeps_failed_envelopes() {
        let resp = Response::parse(&json!([6]), &Discriminator::default()).unwrap();
        assert_eq!(resp.exit_code, 6);
        assert!(matches!(resp.body(), Err(Error::BusExit { code: 6 })));
    }

    #[test]
    fn malformed_envelopes() {
        assert!(matches!(decode(&json!([])), Err(Error::EmptyResponse)));
        assert!(matches!(decode(&json!({"a": 1})), Err(Error::Decode { .. })));
        assert!(matches!(decode(&json!(["0"])), Err(Error::Decode { .. })));
        assert!(matches!(decode(&json!([0, {}, {}])), Err(Error::Decode { .. })));
    }

    #[test]
    fn change_arity() {
        let add = Change::from_wire(&json!(["add", "cfg0fad58", "forwarding"])).unwrap();
        assert_eq!(add.operation, ChangeOperation::Add);
        assert_eq!(add.section_type.as_deref(), Some("forwarding"));
        assert_eq!(add.option, None);

        let remove = Change::from_wire(&json!(["remove", "cfg0fad58", "dest"])).unwrap();
        assert_eq!(remove.option.as_deref(), Some("dest"));
        assert_eq!(remove.section_type, None);

        let set = Change::from_wire(&json!(["set", "cfg04ad58", "enabled", "0"])).unwrap();
        assert_eq!(set.option.as_deref(), Some("enabled"));
        assert_eq!(set.value.as_deref(), Some("0"));

        let bare = Change::from_wire(&json!(["remove", "cfg04ad58"])).unwrap();
        assert_eq!(bare.option, None);

        assert!(Change::from_wire(&json!(["set"])).is_err());
        assert!(Change::from_wire(&json!(["set", "a", "b", "c", "d"])).is_err());
        assert!(Change::from_wire(&json!(["set", "a", 1])).is_err());
    }

    #[test]
    fn unknown_operations_are_kept() {
        let change = Change::from_wire(&json!(["frob", "s"])).unwrap();
        assert_eq!(change.operation, ChangeOperation::Other("frob".into()));
        assert_eq!(serde_json::to_value(&change).unwrap(), json!(["frob", "s"]));
    }

    #[test]
    fn envelopes_re_encode_to_their_wire_form() {
        for raw in [
            json!([0]),
            json!([0, {"configs": ["dhcp", "firewall"]}]),
            json!([0, {"section": "cfg0fad58"}]),
            json!([0, {"value": ["a", "b"]}]),
            json!([0, {"changes": [["add", "cfg0fad58", "forwarding"]]}]),
            json!([0, {"changes": {"firewall": [["set", "cfg04ad58", "enabled", "0"]]}}]),
            json!([0, {"values": {
                ".anonymous": false, ".type": "zone", ".name": "lan", ".index": 2, "name": "lan"
            }}]),
        ] {
            let resp = Response::parse(&raw, &Discriminator::default()).unwrap();
            assert_eq!(serde_json::to_value(&resp).unwrap(), raw);
        }
    }
}
