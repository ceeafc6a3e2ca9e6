//! Schema metadata for resource variants.
//!
//! Each variant carries a static `ResourceDescriptor`: its name, its declared
//! type chain and the kind of every declared field in declaration order. The
//! relationship extractor and the registry read this table instead of
//! inspecting types at runtime.

use std::collections::BTreeMap;

use serde::Serialize;

use super::wellknown::{Duration, Timestamp};

/// Wire-level kind of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    StringList,
    Bool,
    Int32,
    Int32List,
    Int64,
    Double,
    Timestamp,
    Duration,
    Map,
    Message,
    MessageList,
}

impl FieldKind {
    /// Whether a field of this kind can hold resource identifiers.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String | Self::StringList)
    }
}

/// One declared field of a resource variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Declared (snake_case) field name.
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Static metadata of a resource variant.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    /// Variant name, e.g. `VirtualMachine`.
    pub name: &'static str,
    /// Declared type chain, most specific first. May be empty.
    pub type_names: &'static [&'static str],
    pub fields: &'static [FieldDescriptor],
}

impl ResourceDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.type_names.contains(&type_name)
    }
}

/// A borrowed view of a field value, as far as relationship extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    String(&'a str),
    StringList(&'a [String]),
    Other,
}

/// Implemented by every type that may appear as a declared resource field.
pub trait Field {
    const KIND: FieldKind;

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Other
    }
}

impl Field for String {
    const KIND: FieldKind = FieldKind::String;

    fn value(&self) -> FieldValue<'_> {
        FieldValue::String(self)
    }
}

/// Presence-tracked string; unset reads as empty.
impl Field for Option<String> {
    const KIND: FieldKind = FieldKind::String;

    fn value(&self) -> FieldValue<'_> {
        FieldValue::String(self.as_deref().unwrap_or_default())
    }
}

impl Field for Vec<String> {
    const KIND: FieldKind = FieldKind::StringList;

    fn value(&self) -> FieldValue<'_> {
        FieldValue::StringList(self)
    }
}

impl Field for bool {
    const KIND: FieldKind = FieldKind::Bool;
}

impl Field for u32 {
    const KIND: FieldKind = FieldKind::Int32;
}

impl Field for Vec<u32> {
    const KIND: FieldKind = FieldKind::Int32List;
}

impl Field for i64 {
    const KIND: FieldKind = FieldKind::Int64;
}

impl Field for f64 {
    const KIND: FieldKind = FieldKind::Double;
}

impl Field for Option<Timestamp> {
    const KIND: FieldKind = FieldKind::Timestamp;
}

impl Field for Option<Duration> {
    const KIND: FieldKind = FieldKind::Duration;
}

impl Field for BTreeMap<String, String> {
    const KIND: FieldKind = FieldKind::Map;
}
