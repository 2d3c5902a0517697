//! Shape-based classification of response bodies.
//!
//! The bus never says which kind of body it sent. Each matcher looks for the
//! key that only its shape carries and either claims the body, passes
//! (`Ok(None)`), or fails the whole decode when a claimed body contains
//! something that cannot be represented faithfully (unknown section type,
//! bad scalar). Matchers run in order and the first claim wins, so shapes
//! with distinctive keys go first and the bare integer goes last.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::codec::UciList;
use crate::error::Error;
use crate::response::{Change, ChangeSet, ResultBody, SectionSet};
use crate::sections::{ConfigSection, SectionRegistry};
use crate::session::Session;

/// Claims a body (`Ok(Some)`), passes on it (`Ok(None)`), or rejects it.
pub type Matcher = fn(&Value, &SectionRegistry) -> Result<Option<ResultBody>, Error>;

/// Matchers in the order they are tried by default.
pub const DEFAULT_MATCHERS: &[(&str, Matcher)] = &[
    ("changes", match_changes),
    ("configs", match_configs),
    ("add", match_add),
    ("session", match_session),
    ("value", match_value),
    ("values", match_values),
    ("status", match_status),
];

/// Ordered matcher pipeline bound to a section registry.
#[derive(Debug, Clone)]
pub struct Discriminator {
    registry: &'static SectionRegistry,
    matchers: Vec<(&'static str, Matcher)>,
}

impl Default for Discriminator {
    fn default() -> Self {
        Self::new(SectionRegistry::builtin())
    }
}

impl Discriminator {
    pub fn new(registry: &'static SectionRegistry) -> Self {
        Self::with_matchers(registry, DEFAULT_MATCHERS)
    }

    pub fn with_matchers(registry: &'static SectionRegistry, matchers: &[(&'static str, Matcher)]) -> Self {
        Self {
            registry,
            matchers: matchers.to_vec(),
        }
    }

    pub fn registry(&self) -> &'static SectionRegistry {
        self.registry
    }

    /// Names of the matchers in the order they are tried.
    pub fn matcher_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.iter().map(|(name, _)| *name)
    }

    /// Classify one response body.
    pub fn classify(&self, body: &Value) -> Result<ResultBody, Error> {
        for (name, matcher) in &self.matchers {
            if let Some(result) = matcher(body, self.registry)? {
                tracing::trace!(matcher = *name, "classified response body");
                return Ok(result);
            }
        }
        Err(Error::UnrecognizedResultShape {
            body: body.to_string(),
        })
    }
}

fn marker<'v>(body: &'v Value, key: &str) -> Option<&'v Value> {
    body.as_object()?.get(key)
}

// ── Matchers ────────────────────────────────────────────────────────

pub fn match_changes(body: &Value, _: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    let set = match marker(body, "changes") {
        Some(Value::Array(items)) => match decode_changes(items) {
            Some(changes) => ChangeSet::Single(changes),
            None => return Ok(None),
        },
        Some(Value::Object(per_config)) => {
            let mut map = IndexMap::with_capacity(per_config.len());
            for (config, changes) in per_config {
                let decoded = changes.as_array().and_then(|items| decode_changes(items));
                let Some(decoded) = decoded else {
                    return Ok(None);
                };
                map.insert(config.clone(), decoded);
            }
            ChangeSet::PerConfig(map)
        }
        _ => return Ok(None),
    };
    Ok(Some(ResultBody::Changes(set)))
}

/// `None` when any entry is not a 2 to 4 element array of strings.
fn decode_changes(items: &[Value]) -> Option<Vec<Change>> {
    items.iter().map(|c| Change::from_wire(c).ok()).collect()
}

pub fn match_configs(body: &Value, _: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    let Some(Value::Array(items)) = marker(body, "configs") else {
        return Ok(None);
    };
    let configs = items
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>();
    Ok(configs.map(ResultBody::Configs))
}

pub fn match_add(body: &Value, _: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    match marker(body, "section") {
        Some(Value::String(section)) if !section.is_empty() => Ok(Some(ResultBody::Add {
            section: section.clone(),
        })),
        _ => Ok(None),
    }
}

pub fn match_session(body: &Value, _: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    match marker(body, "ubus_rpc_session") {
        Some(Value::String(id)) if !id.is_empty() => {}
        _ => return Ok(None),
    }
    Ok(serde_json::from_value::<Session>(body.clone())
        .ok()
        .map(|s| ResultBody::Session(Box::new(s))))
}

pub fn match_value(body: &Value, _: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    let Some(raw) = marker(body, "value") else {
        return Ok(None);
    };
    Ok(serde_json::from_value::<UciList>(raw.clone())
        .ok()
        .map(ResultBody::Value))
}

pub fn match_values(body: &Value, registry: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    let Some(Value::Object(values)) = marker(body, "values") else {
        return Ok(None);
    };

    if values.contains_key(".anonymous") {
        let single = Value::Object(values.clone());
        if !is_section_shaped(&single) {
            return Ok(None);
        }
        let section = ConfigSection::decode(&single, registry)?;
        return Ok(Some(ResultBody::Values(SectionSet::Single(section))));
    }

    if !values.values().all(is_section_shaped) {
        return Ok(None);
    }

    Ok(Some(ResultBody::Values(SectionSet::Multi(decode_sections(
        values, registry,
    )?))))
}

/// An object carrying a string `.type`.
fn is_section_shaped(raw: &Value) -> bool {
    marker(raw, ".type").is_some_and(Value::is_string)
}

fn decode_sections(
    values: &Map<String, Value>,
    registry: &SectionRegistry,
) -> Result<IndexMap<String, ConfigSection>, Error> {
    let mut sections = values
        .iter()
        .map(|(name, raw)| Ok((name.clone(), ConfigSection::decode(raw, registry)?)))
        .collect::<Result<IndexMap<_, _>, Error>>()?;
    sections.sort_by(|_, a, _, b| a.index().cmp(&b.index()));
    Ok(sections)
}

pub fn match_status(body: &Value, _: &SectionRegistry) -> Result<Option<ResultBody>, Error> {
    Ok(body.as_i64().map(ResultBody::Status))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::UciBool;
    use crate::response::{ChangeOperation, Response};
    use crate::sections::SectionOptions;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn classify(body: &Value) -> Result<ResultBody, Error> {
        Discriminator::default().classify(body)
    }

    #[test]
    fn configs_list() {
        let resp = Response::decode(
            &json!([0, {"configs": ["network", "firewall", "wireless"]}]),
            &Discriminator::default(),
        )
        .unwrap();
        assert_eq!(
            resp.body,
            Some(ResultBody::Configs(vec![
                "network".into(),
                "firewall".into(),
                "wireless".into()
            ]))
        );
    }

    #[test]
    fn option_value_is_normalised_to_a_list() {
        assert_eq!(
            classify(&json!({"value": "1"})).unwrap(),
            ResultBody::Value(UciList::from("1"))
        );
        assert_eq!(
            classify(&json!({"value": ["a", "b"]})).unwrap(),
            ResultBody::Value(UciList::from_iter(["a", "b"]))
        );
    }

    #[test]
    fn single_section_values() {
        let body = classify(&json!({"values": {
            ".anonymous": true,
            ".type": "forwarding",
            ".name": "cfg04ad58",
            ".index": 0,
            "src": "lan",
            "dest": "wan"
        }}))
        .unwrap();

        let ResultBody::Values(SectionSet::Single(section)) = body else {
            panic!("expected a single section, got {body:?}");
        };
        assert_eq!(section.name(), "cfg04ad58");
        let SectionOptions::Forwarding(fwd) = section.options() else {
            panic!("expected forwarding");
        };
        assert_eq!(fwd.src.as_deref(), Some("lan"));
        assert_eq!(fwd.dest.as_deref(), Some("wan"));
    }

    #[test]
    fn multi_section_values_are_sorted_by_index() {
        let body = classify(&json!({"values": {
            "wan": {".anonymous": false, ".type": "zone", ".name": "wan", ".index": 3, "masq": "1"},
            "cfg02dc81": {".anonymous": true, ".type": "defaults", ".name": "cfg02dc81", ".index": 0, "syn_flood": "1"},
            "lan": {".anonymous": false, ".type": "zone", ".name": "lan", ".index": 1},
            "cfg04ad58": {".anonymous": true, ".type": "forwarding", ".name": "cfg04ad58", ".index": 2}
        }}))
        .unwrap();

        let ResultBody::Values(set) = body else {
            panic!("expected values");
        };
        let names: Vec<_> = set.sections().iter().map(|s| s.name().to_owned()).collect();
        assert_eq!(names, ["cfg02dc81", "lan", "cfg04ad58", "wan"]);
        let indices: Vec<_> = set.sections().iter().map(|s| s.index()).collect();
        assert_eq!(indices, [0, 1, 2, 3]);

        let SectionOptions::Zone(wan) = set.sections()[3].options() else {
            panic!("expected zone");
        };
        assert_eq!(wan.masq, Some(UciBool(true)));
    }

    #[test]
    fn empty_values_is_an_empty_multi_set() {
        let body = classify(&json!({"values": {}})).unwrap();
        assert_eq!(body, ResultBody::Values(SectionSet::Multi(IndexMap::new())));
    }

    #[test]
    fn unknown_section_type_fails_the_whole_body() {
        let err = classify(&json!({"values": {
            "lan": {".anonymous": false, ".type": "zone", ".name": "lan", ".index": 0},
            "x": {".anonymous": false, ".type": "mystery", ".name": "x", ".index": 1}
        }}))
        .unwrap_err();
        assert!(matches!(err, Error::UnknownSectionType { type_name } if type_name == "mystery"));
    }

    #[test]
    fn per_config_changes() {
        let body = classify(&json!({"changes": {"firewall": [["set", "cfg04ad58", "enabled", "0"]]}})).unwrap();
        let ResultBody::Changes(ChangeSet::PerConfig(map)) = body else {
            panic!("expected per-config changes");
        };
        let changes = &map["firewall"];
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0],
            Change {
                operation: ChangeOperation::Set,
                section: "cfg04ad58".into(),
                section_type: None,
                option: Some("enabled".into()),
                value: Some("0".into()),
            }
        );
    }

    #[test]
    fn single_config_changes_and_empty_changes() {
        let body = classify(&json!({"changes": [["add", "cfg0fad58", "forwarding"]]})).unwrap();
        assert!(matches!(body, ResultBody::Changes(ChangeSet::Single(ref c)) if c.len() == 1));

        let body = classify(&json!({"changes": []})).unwrap();
        assert_eq!(body, ResultBody::Changes(ChangeSet::Single(vec![])));
    }

    #[test]
    fn add_and_session_and_status() {
        assert_eq!(
            classify(&json!({"section": "cfg0fad58"})).unwrap(),
            ResultBody::Add {
                section: "cfg0fad58".into()
            }
        );
        assert!(matches!(
            classify(&json!({"ubus_rpc_session": "abc", "timeout": 300, "expires": 300})).unwrap(),
            ResultBody::Session(_)
        ));
        assert_eq!(classify(&json!(4)).unwrap(), ResultBody::Status(4));
    }

    #[test]
    fn ambiguous_bodies_fall_through() {
        for body in [
            json!({}),
            json!({"section": ""}),
            json!({"ubus_rpc_session": ""}),
            json!({"configs": "network"}),
            json!({"values": "nope"}),
            json!({"values": {"lan": "x"}}),
            json!({"values": {"lan": {".name": "lan", "proto": "static"}}}),
            json!({"values": {".anonymous": true, ".name": "cfg1"}}),
            json!({"changes": [["set", 1]]}),
            json!({"changes": ["set"]}),
            json!({"changes": {"network": [["set"]]}}),
            json!({"changes": {"network": "set"}}),
            json!("text"),
        ] {
            let err = classify(&body).unwrap_err();
            assert!(
                matches!(err, Error::UnrecognizedResultShape { ref body } if !body.is_empty()),
                "{err:?}"
            );
        }
    }

    #[test]
    fn classification_is_repeatable() {
        let disc = Discriminator::default();
        let body = json!({"values": {".anonymous": true, ".type": "rule", ".name": "cfg1", "proto": ["tcp", "udp"]}});
        let first = disc.classify(&body).unwrap();
        for _ in 0..10 {
            assert_eq!(disc.classify(&body).unwrap(), first);
        }
    }

    #[test]
    fn order_is_configurable() {
        let only_status: &[(&str, Matcher)] = &[("status", match_status)];
        let disc = Discriminator::with_matchers(SectionRegistry::builtin(), only_status);
        assert!(disc.classify(&json!({"configs": []})).is_err());
        assert_eq!(disc.matcher_names().collect::<Vec<_>>(), ["status"]);
        assert_eq!(
            Discriminator::default().matcher_names().last(),
            Some("status")
        );
    }
}
