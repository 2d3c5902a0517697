//! Argument records and typed results for the `uci` bus object.

use indexmap::IndexMap;
use serde::Serialize;

use crate::codec::UciList;
use crate::error::Error;
use crate::response::{Change, ChangeSet, Response, ResultBody};
use crate::sections::{ConfigSection, SectionOptions};

pub const OBJECT: &str = "uci";

pub(crate) fn unexpected(expected: &'static str, body: Option<&ResultBody>) -> Error {
    Error::UnexpectedResult {
        expected,
        found: body.map_or("no body", ResultBody::kind),
    }
}

// ── Argument records ────────────────────────────────────────────────

/// `uci add`: create a section, optionally named and with initial values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOptions {
    pub config: String,
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<SectionOptions>,
}

/// `uci apply`: commit pending changes, optionally with rollback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback: Option<bool>,
    /// Seconds before an unconfirmed apply is rolled back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// `uci changes`: pending changes of one config, or of all when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

/// `uci configs`: names of all configs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigsOptions {}

/// `uci delete`: remove a section, every section of a type, or one option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteOptions {
    pub config: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

/// `uci get`: read a config, a filtered set of sections, or one option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetOptions {
    pub config: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

/// `uci revert`: drop pending changes of a config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevertOptions {
    pub config: String,
}

/// `uci set`: update options of an existing section. Unset fields are left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetOptions {
    pub config: String,
    pub section: String,
    pub values: SectionOptions,
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddResult {
    pub section: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangesResult {
    pub changes: IndexMap<String, Vec<Change>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigsResult {
    pub configs: Vec<String>,
}

/// Sections (sorted by index) for section queries, or the option's value
/// keyed by its name for option queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<ConfigSection>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub option: IndexMap<String, UciList>,
}

impl AddOptions {
    pub fn new(config: impl Into<String>, section_type: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            section_type: section_type.into(),
            name: None,
            values: None,
        }
    }

    pub fn result(&self, response: &Response) -> Result<AddResult, Error> {
        match response.body()? {
            Some(ResultBody::Add { section }) => Ok(AddResult {
                section: section.clone(),
            }),
            other => Err(unexpected("add", other)),
        }
    }
}

impl ChangesOptions {
    pub fn result(&self, response: &Response) -> Result<ChangesResult, Error> {
        match response.body()? {
            Some(ResultBody::Changes(ChangeSet::Single(changes))) => {
                let config = self.config.clone().unwrap_or_default();
                Ok(ChangesResult {
                    changes: IndexMap::from([(config, changes.clone())]),
                })
            }
            Some(ResultBody::Changes(ChangeSet::PerConfig(map))) => Ok(ChangesResult {
                changes: map.clone(),
            }),
            other => Err(unexpected("changes", other)),
        }
    }
}

impl ConfigsOptions {
    pub fn result(&self, response: &Response) -> Result<ConfigsResult, Error> {
        match response.body()? {
            Some(ResultBody::Configs(configs)) => Ok(ConfigsResult {
                configs: configs.clone(),
            }),
            other => Err(unexpected("configs", other)),
        }
    }
}

impl GetOptions {
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            ..Self::default()
        }
    }

    pub fn result(&self, response: &Response) -> Result<GetResult, Error> {
        match response.body()? {
            None => Ok(GetResult::default()),
            Some(ResultBody::Value(value)) => Ok(GetResult {
                sections: Vec::new(),
                option: IndexMap::from([(self.option.clone().unwrap_or_default(), value.clone())]),
            }),
            Some(ResultBody::Values(set)) => Ok(GetResult {
                sections: set.clone().into_sections(),
                option: IndexMap::new(),
            }),
            other => Err(unexpected("get", other)),
        }
    }
}
