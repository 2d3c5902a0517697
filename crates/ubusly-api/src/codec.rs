//! Scalar wire encodings used by UCI option values.
//!
//! The bus carries almost every option as a JSON string: booleans as `"1"`/`"0"`
//! (with `"on"`/`"off"` accepted on input), integers as decimal strings, and
//! list options as either a bare string or an array depending on cardinality.
//! The newtypes here decode those forms into native values and always emit the
//! canonical encoding.

use std::fmt;
use std::ops::Deref;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── UciBool ─────────────────────────────────────────────────────────

/// Boolean encoded as `"1"`/`"0"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UciBool(pub bool);

impl UciBool {
    /// Parse one of the accepted wire spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "1" | "on" => Some(Self(true)),
            "0" | "off" => Some(Self(false)),
            _ => None,
        }
    }

    pub const fn as_wire(self) -> &'static str {
        if self.0 { "1" } else { "0" }
    }
}

impl From<bool> for UciBool {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<UciBool> for bool {
    fn from(b: UciBool) -> Self {
        b.0
    }
}

impl fmt::Display for UciBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for UciBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for UciBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoolVisitor;

        impl Visitor<'_> for BoolVisitor {
            type Value = UciBool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(r#"one of "1", "0", "on", "off""#)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UciBool, E> {
                UciBool::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(BoolVisitor)
    }
}

// ── UciInt ──────────────────────────────────────────────────────────

/// Integer encoded as a decimal string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UciInt(pub i64);

impl From<i64> for UciInt {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

impl From<UciInt> for i64 {
    fn from(n: UciInt) -> Self {
        n.0
    }
}

impl fmt::Display for UciInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for UciInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UciInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IntVisitor;

        impl Visitor<'_> for IntVisitor {
            type Value = UciInt;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string holding a decimal integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UciInt, E> {
                v.parse::<i64>()
                    .map(UciInt)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(IntVisitor)
    }
}

// ── UciList ─────────────────────────────────────────────────────────

/// List option that arrives as a bare string when it holds one element.
///
/// A one-element list re-encodes as a bare string, so the two wire forms
/// cannot be told apart after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UciList(pub Vec<String>);

impl UciList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for UciList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for UciList {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<&str> for UciList {
    fn from(s: &str) -> Self {
        Self(vec![s.to_owned()])
    }
}

impl<S: Into<String>> FromIterator<S> for UciList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for UciList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl Serialize for UciList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for UciList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = UciList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or an array of strings")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UciList, E> {
                Ok(UciList(vec![v.to_owned()]))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<UciList, E> {
                Ok(UciList(vec![v]))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<UciList, A::Error> {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<String>()? {
                    items.push(item);
                }
                Ok(UciList(items))
            }
        }

        deserializer.deserialize_any(ListVisitor)
    }
}
