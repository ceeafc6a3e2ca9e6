//! Compact JSON form of resources.
//!
//! Scalars holding their zero value are left out. Set messages, set presence
//! strings and union wrappers are always written, even when everything inside
//! them is a default, so "present but disabled" stays distinguishable from
//! "unknown".

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::wellknown::{Duration, Timestamp};

/// A field value in compact form.
pub trait Compact {
    /// `None` if the value is a default and is left out.
    fn compact(&self) -> Option<Value>;
}

/// A message (or union level) rendered as a compact JSON object.
pub trait CompactFields {
    fn compact_fields(&self) -> Map<String, Value>;

    fn to_compact_value(&self) -> Value {
        Value::Object(self.compact_fields())
    }
}

/// JSON key of a snake_case field, as `rename_all = "camelCase"` spells it.
pub fn camel_case(field: &str) -> String {
    let mut key = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            key.extend(c.to_uppercase());
            upper = false;
        } else {
            key.push(c);
        }
    }
    key
}

/// JSON key of a union variant, as `rename_all = "camelCase"` spells it.
pub fn variant_key(variant: &str) -> String {
    let mut chars = variant.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Compact for String {
    fn compact(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::String(self.clone()))
    }
}

/// Presence-tracked: a set empty string is kept.
impl Compact for Option<String> {
    fn compact(&self) -> Option<Value> {
        self.as_ref().map(|s| Value::String(s.clone()))
    }
}

impl Compact for bool {
    fn compact(&self) -> Option<Value> {
        self.then_some(Value::Bool(true))
    }
}

impl Compact for u32 {
    fn compact(&self) -> Option<Value> {
        (*self != 0).then(|| Value::from(*self))
    }
}

impl Compact for i64 {
    fn compact(&self) -> Option<Value> {
        (*self != 0).then(|| Value::String(self.to_string()))
    }
}

impl Compact for f64 {
    fn compact(&self) -> Option<Value> {
        (*self != 0.0).then(|| Value::from(*self))
    }
}

/// List elements are written as they are, empty ones included.
impl Compact for Vec<String> {
    fn compact(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::from(self.clone()))
    }
}

impl Compact for Vec<u32> {
    fn compact(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::from(self.clone()))
    }
}

impl Compact for BTreeMap<String, String> {
    fn compact(&self) -> Option<Value> {
        (!self.is_empty()).then(|| {
            Value::Object(
                self.iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            )
        })
    }
}

impl Compact for Option<Timestamp> {
    fn compact(&self) -> Option<Value> {
        self.map(|t| Value::String(t.to_string()))
    }
}

impl Compact for Option<Duration> {
    fn compact(&self) -> Option<Value> {
        self.map(|d| Value::String(d.to_string()))
    }
}
