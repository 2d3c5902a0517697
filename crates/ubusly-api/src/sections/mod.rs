//! Typed UCI config sections.
//!
//! A section on the wire is one JSON object: four reserved metadata keys
//! (`.anonymous`, `.type`, `.name`, `.index`) followed by option keys whose
//! meaning depends on `.type`. [`ConfigSection::decode`] reads the metadata
//! first, then hands the remaining keys to the option record registered for
//! that type in the [`SectionRegistry`].

/// Declares an option record: every field optional, renamed to its UCI name,
/// omitted from output when unset. Also exposes the declared names as `FIELDS`.
macro_rules! section_options {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $wire:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// UCI option names this record declares.
            pub const FIELDS: &'static [&'static str] = &[$($wire),*];
        }
    };
}

pub mod dhcp;
pub mod dropbear;
pub mod firewall;
pub mod network;
pub mod registry;
pub mod system;
pub mod uhttpd;
pub mod wireless;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

pub use registry::{SectionKind, SectionOptions, SectionRegistry};

/// Reserved metadata keys. Option names never start with `.`.
pub const RESERVED_KEYS: [&str; 4] = [".anonymous", ".type", ".name", ".index"];

/// Static metadata carried by every section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMeta {
    #[serde(rename = ".anonymous", default)]
    pub anonymous: bool,
    #[serde(rename = ".type")]
    pub section_type: String,
    #[serde(rename = ".name", default)]
    pub name: String,
    /// Absent when a single section is fetched by name.
    #[serde(rename = ".index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// One decoded section: metadata plus the typed options for its type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSection {
    #[serde(flatten)]
    meta: SectionMeta,
    #[serde(flatten)]
    options: SectionOptions,
}

impl ConfigSection {
    pub fn new(meta: SectionMeta, options: SectionOptions) -> Self {
        Self { meta, options }
    }

    /// Decode a raw section object, resolving its options through `registry`.
    pub fn decode(raw: &Value, registry: &SectionRegistry) -> Result<Self, Error> {
        let Value::Object(map) = raw else {
            return Err(Error::decode(format!("section is not an object: {raw}")));
        };

        let meta: SectionMeta = serde_json::from_value(raw.clone())
            .map_err(|e| Error::decode(format!("section metadata: {e}")))?;

        let kind = registry
            .resolve(&meta.section_type)
            .ok_or_else(|| Error::UnknownSectionType {
                type_name: meta.section_type.clone(),
            })?;

        let options = kind
            .decode(Value::Object(option_keys(map)))
            .map_err(|e| match e {
                Error::Decode { message } => {
                    Error::decode(format!("section '{}': {message}", meta.name))
                }
                other => other,
            })?;

        Ok(Self { meta, options })
    }

    pub fn is_anonymous(&self) -> bool {
        self.meta.anonymous
    }

    pub fn section_type(&self) -> &str {
        &self.meta.section_type
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Position within the config file; 0 when the bus did not report one.
    pub fn index(&self) -> u32 {
        self.meta.index.unwrap_or(0)
    }

    pub fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    pub fn options(&self) -> &SectionOptions {
        &self.options
    }

    pub fn into_options(self) -> SectionOptions {
        self.options
    }
}

fn option_keys(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(k, _)| !k.starts_with('.'))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
